use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error response from the API.
///
/// This is the `Status` object the apiserver sends back alongside a non-success status code.
#[derive(Error, Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[error("{message}: {reason}")]
pub struct ErrorResponse {
    /// The status
    pub status: String,
    /// A message about the error
    #[serde(default)]
    pub message: String,
    /// The reason for the error
    #[serde(default)]
    pub reason: String,
    /// The error code
    pub code: u16,
    /// Extended data associated with the reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

/// Additional properties that MAY be set by the server to describe a failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    /// More details associated with the failure.
    pub causes: Option<Vec<StatusCause>>,
    /// The group of the resource associated with the failure.
    pub group: Option<String>,
    /// The kind of the resource associated with the failure.
    pub kind: Option<String>,
    /// The name of the resource associated with the failure.
    pub name: Option<String>,
    /// Seconds to wait before the operation should be retried.
    pub retry_after_seconds: Option<i32>,
}

/// A single cause of an api failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCause {
    /// The field that caused the failure, as named by its JSON serialization.
    pub field: Option<String>,
    /// A human-readable description of the cause.
    pub message: Option<String>,
    /// A machine-readable description of the cause.
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPIRED: &str = r#"
    {
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "The provided continue parameter is too old to display a consistent list result. You can start a new list without the continue parameter.",
      "reason": "Expired",
      "code": 410
    }
    "#;

    const FORBIDDEN: &str = r#"
    {
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "pods is forbidden: User \"system:anonymous\" cannot list resource \"pods\" in API group \"\" at the cluster scope",
      "reason": "Forbidden",
      "details": {
        "kind": "pods"
      },
      "code": 403
    }
    "#;

    #[test]
    fn expired_continue_token() {
        let status: ErrorResponse = serde_json::from_str(EXPIRED).unwrap();
        assert_eq!(status.code, 410);
        assert_eq!(status.reason, "Expired");
        assert!(status.details.is_none());
    }

    #[test]
    fn forbidden_list() {
        let status: ErrorResponse = serde_json::from_str(FORBIDDEN).unwrap();
        assert_eq!(status.code, 403);
        assert_eq!(status.details.unwrap().kind.unwrap(), "pods");
    }

    #[test]
    fn displays_message_and_reason() {
        let status: ErrorResponse = serde_json::from_str(EXPIRED).unwrap();
        assert!(status.to_string().ends_with(": Expired"));
    }
}
