use thiserror::Error;

use crate::core::record::DNSRecord;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{context}: transport error: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request cancelled")]
    Cancelled,

    #[error("{context}: remote error: {reason} ({status})")]
    Remote {
        context: String,
        status: u16,
        reason: String,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Ambiguous match: {count} {record_type} records named {name}, expected at most 1")]
    AmbiguousMatch {
        record_type: String,
        name: String,
        count: usize,
    },

    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    /// A multi-record operation stopped partway; `completed` holds the
    /// records processed before `source` occurred.
    #[error("{source} (after {} completed)", .completed.len())]
    Partial {
        completed: Vec<DNSRecord>,
        source: Box<Error>,
    },
}

impl Error {
    /// Network-level failures, caller cancellation included.
    pub fn is_transport(&self) -> bool {
        match self {
            Error::Transport { .. } | Error::Cancelled => true,
            Error::Partial { source, .. } => source.is_transport(),
            _ => false,
        }
    }

    /// Records completed before a multi-record operation failed.
    pub fn partial(&self) -> &[DNSRecord] {
        match self {
            Error::Partial { completed, .. } => completed,
            _ => &[],
        }
    }

    /// The underlying failure, looking through `Partial`.
    pub fn root(&self) -> &Error {
        match self {
            Error::Partial { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn partial_from(completed: Vec<DNSRecord>, source: Error) -> Self {
        Error::Partial {
            completed,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::time::Duration;

    #[test]
    fn test_partial_exposes_completed_and_root() {
        let done = DNSRecord::new("A", "www", "1.2.3.4", Duration::from_secs(300));
        let err = Error::partial_from(
            vec![done.clone()],
            Error::Remote {
                context: "update record rid-1 in zone example.com".into(),
                status: 500,
                reason: "Internal Server Error".into(),
            },
        );

        assert_eq!(err.partial(), &[done]);
        assert_matches!(err.root(), Error::Remote { status: 500, .. });
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "update record rid-1 in zone example.com: remote error: Internal Server Error (500) (after 1 completed)"
        );
    }

    #[test]
    fn test_cancelled_is_transport() {
        assert!(Error::Cancelled.is_transport());
        assert!(Error::partial_from(vec![], Error::Cancelled).is_transport());
        assert!(!Error::NotFound("zone".into()).is_transport());
        assert!(Error::NotFound("zone".into()).partial().is_empty());
    }

    #[test]
    fn test_ambiguous_match_message() {
        let err = Error::AmbiguousMatch {
            record_type: "TXT".into(),
            name: "a.example.com".into(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Ambiguous match: 2 TXT records named a.example.com, expected at most 1"
        );
    }
}
