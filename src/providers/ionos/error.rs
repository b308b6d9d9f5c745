use thiserror::Error;

#[derive(Error, Debug)]
pub enum IonosProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("{reason} ({status})")]
    Status { status: u16, reason: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<serde_json::Error> for IonosProviderError {
    fn from(err: serde_json::Error) -> Self {
        IonosProviderError::Decode(err.to_string())
    }
}

use crate::error::Error;

/// Converts into the crate error, prefixing `context` (operation, zone,
/// record) so callers can tell which step failed.
pub fn map_error(e: IonosProviderError, context: impl Into<String>) -> Error {
    use IonosProviderError::*;
    let context = context.into();
    match e {
        // reqwest reports body decoding failures through its own error type
        Http(err) if err.is_decode() => Error::Decode(format!("{context}: {err}")),
        Http(source) => Error::Transport { context, source },
        Cancelled => Error::Cancelled,
        Status { status, reason } => Error::Remote {
            context,
            status,
            reason,
        },
        Decode(msg) => Error::Decode(format!("{context}: {msg}")),
        InvalidInput(msg) => Error::InvalidArgument(format!("{context}: {msg}")),
        Credential(msg) => Error::CredentialError(format!("{context}: {msg}")),
        Url(err) => Error::ConfigError(format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_map_error_variants() {
        use IonosProviderError::*;

        let err = map_error(Cancelled, "list zones");
        assert!(matches!(err, Error::Cancelled));
        let err = map_error(
            Status {
                status: 401,
                reason: "Unauthorized".to_string(),
            },
            "list zones",
        );
        assert!(matches!(err, Error::Remote { status: 401, .. }));
        let err = map_error(Decode("bad".to_string()), "list zones");
        assert!(matches!(err, Error::Decode(_)));
        let err = map_error(InvalidInput("no id".to_string()), "delete record");
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = map_error(Credential("fail".to_string()), "build client");
        assert!(matches!(err, Error::CredentialError(_)));
        let err = map_error(url::Url::parse("not a url").unwrap_err().into(), "build client");
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_map_error_keeps_context() {
        let err = map_error(
            IonosProviderError::Status {
                status: 404,
                reason: "Not Found".to_string(),
            },
            "delete record rid-9 in zone example.com",
        );
        assert_eq!(
            err.to_string(),
            "delete record rid-9 in zone example.com: remote error: Not Found (404)"
        );

        let err = map_error(
            IonosProviderError::Decode("record t1: bad TXT quoting".to_string()),
            "list records of zone example.com",
        );
        assert_eq!(
            err.to_string(),
            "Decode error: list records of zone example.com: record t1: bad TXT quoting"
        );
    }

    #[test]
    fn test_json_error_is_decode() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: IonosProviderError = json_err.into();
        assert!(matches!(map_error(err, "list zones"), Error::Decode(_)));
    }
}
