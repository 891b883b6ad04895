use crate::domain::SeverityLevel;
use crate::service::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Unresolved address reference: {code}")]
    UnresolvedAddressReference { code: String },
    #[error("Malformed payload: {field} = '{value}'")]
    MalformedPayload { field: String, value: String },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Service call failed: {0}")]
    Service(#[from] ServiceError),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Serialization(err.to_string())
    }
}

impl AdapterError {
    /// Short name used as the `Message::name` of a failed result.
    pub fn name(&self) -> &'static str {
        match self {
            AdapterError::UnresolvedAddressReference { .. } => "UnresolvedAddressReference",
            AdapterError::MalformedPayload { .. } => "MalformedPayload",
            AdapterError::Validation(_) => "ValidationError",
            AdapterError::Service(_) => "ServiceError",
            AdapterError::Serialization(_) => "SerializationError",
        }
    }

    /// Rejections by the service or by validation are `Error`; faults on the
    /// adapter side are `Exception`.
    pub fn severity(&self) -> SeverityLevel {
        match self {
            AdapterError::Validation(_) | AdapterError::Service(_) => SeverityLevel::Error,
            _ => SeverityLevel::Exception,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_splits_remote_and_local_faults() {
        let remote = AdapterError::from(ServiceError::RateLimited);
        assert_eq!(remote.severity(), SeverityLevel::Error);
        assert_eq!(remote.name(), "ServiceError");

        let local = AdapterError::UnresolvedAddressReference { code: "42".into() };
        assert_eq!(local.severity(), SeverityLevel::Exception);
        assert_eq!(local.to_string(), "Unresolved address reference: 42");
    }

    #[test]
    fn json_errors_become_serialization() {
        let err: AdapterError = serde_json::from_str::<i32>("nope").unwrap_err().into();
        assert!(matches!(err, AdapterError::Serialization(_)));
    }
}
