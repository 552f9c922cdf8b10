//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent catalog rule violations.
/// These are independent of configuration and CLI concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown product: {product}{}", suggestion_hint(.suggestion))]
    UnknownProduct {
        product: String,
        suggestion: Option<String>,
    },

    #[error("unknown wave: {0}")]
    UnknownWave(u8),

    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("invalid product identifier: {0:?}")]
    InvalidProduct(String),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_suggestion_when_display_then_appends_hint() {
        let err = DomainError::UnknownProduct {
            product: "grafna".into(),
            suggestion: Some("grafana".into()),
        };
        assert_eq!(
            err.to_string(),
            "unknown product: grafna (did you mean 'grafana'?)"
        );
    }

    #[test]
    fn given_no_suggestion_when_display_then_plain_message() {
        let err = DomainError::UnknownProduct {
            product: "zzz".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "unknown product: zzz");
    }
}
