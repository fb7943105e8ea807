//! List every object of one resource, page by page, like
//! `kubectl get <plural> [-n namespace] --chunk-size=<limit> -o json`.
//!
//! Talks to `kubectl proxy` on its default port unless `KUBE_PAGER_CLUSTER_URL` says otherwise.
use anyhow::{Context, Result};
use kube_pager::{
    core::{ApiResource, Namespace},
    list_objects, Client, Config,
};
use std::num::NonZeroU32;
use tracing::*;

#[derive(clap::Parser)]
struct App {
    /// apiVersion of the resource, e.g. `v1` or `apps/v1`
    api_version: String,
    /// Kind of the resource, e.g. `Deployment`
    kind: String,
    /// Plural name of the resource, e.g. `deployments`
    plural: String,
    #[clap(long, short)]
    namespace: Option<String>,
    /// Items per page, overriding the configured pagination limit
    #[clap(long)]
    limit: Option<NonZeroU32>,
    /// Print the items as json instead of a summary
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kube_pager_client=debug".into()),
        )
        .init();
    let app: App = clap::Parser::parse();

    let config = Config::from_env().context("loading config")?;
    let mut settings = config.settings.clone();
    if let Some(limit) = app.limit {
        settings.watching.pagination_limit = Some(limit);
    }
    let client = Client::try_from(config)?;

    let resource = ApiResource::from_api_version(&app.api_version, &app.kind, &app.plural);
    let scope = Namespace::from(app.namespace.as_deref());
    info!("Listing {} in {:?}", resource.plural, scope);

    let snapshot = list_objects(&client, &settings, &resource, &scope).await?;
    if app.json {
        let items: Vec<serde_json::Value> = snapshot.items.into_iter().map(Into::into).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &snapshot.items {
            let name = item
                .get("metadata")
                .and_then(|m| m.get("name"))
                .and_then(|n| n.as_str())
                .unwrap_or("<unnamed>");
            println!("{}/{}", item.kind().unwrap_or(&app.kind), name);
        }
        info!(
            "Listed {} {} at resourceVersion {:?}",
            snapshot.items.len(),
            resource.plural,
            snapshot.resource_version
        );
    }
    Ok(())
}
