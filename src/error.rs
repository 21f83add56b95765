//! Error types for the mock SOAP host.

use thiserror::Error;

/// Failures on the request path and at startup.
///
/// Request-path variants collapse into a single SOAP fault envelope (HTTP
/// 500); the startup variants abort registry construction before the
/// server binds.
#[derive(Error, Debug)]
pub enum SoapError {
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    #[error("No SOAP Envelope found")]
    NoEnvelope,

    #[error("No SOAP Body found")]
    NoBody,

    #[error("No operation found in SOAP request")]
    NoOperationMatch,

    #[error("Unsupported service: {0}")]
    UnknownService(String),

    /// Domain failure reported by a service handler. The message is
    /// forwarded verbatim into the faultstring.
    #[error("{0}")]
    Handler(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Duplicate service registration: {0}")]
    DuplicateService(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SoapError {
    /// Create a handler error from any displayable message.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_messages() {
        assert_eq!(SoapError::NoBody.to_string(), "No SOAP Body found");
        assert_eq!(
            SoapError::UnknownService("payments".to_string()).to_string(),
            "Unsupported service: payments"
        );
        assert_eq!(
            SoapError::handler("Division by zero").to_string(),
            "Division by zero"
        );
    }

    #[test]
    fn test_no_operation_message_matches_wire_contract() {
        assert_eq!(
            SoapError::NoOperationMatch.to_string(),
            "No operation found in SOAP request"
        );
    }
}
