//! Argument guards run by services before any repository call.

use serde::Serialize;

/// Why a caller-supplied argument was rejected.
///
/// Every variant names the argument, so a missing `user_id` and a missing
/// `status` are distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArgumentError {
    #[error("Argument '{argument}' is required")]
    Missing { argument: &'static str },

    #[error("Argument '{argument}' must be greater than zero (got {value})")]
    OutOfRange { argument: &'static str, value: i64 },

    #[error("Argument '{argument}' is malformed: {reason}")]
    Malformed {
        argument: &'static str,
        reason: String,
    },
}

impl ArgumentError {
    pub fn argument(&self) -> &'static str {
        match self {
            ArgumentError::Missing { argument }
            | ArgumentError::OutOfRange { argument, .. }
            | ArgumentError::Malformed { argument, .. } => argument,
        }
    }

    pub fn malformed(argument: &'static str, reason: impl Into<String>) -> Self {
        ArgumentError::Malformed {
            argument,
            reason: reason.into(),
        }
    }
}

/// Unwraps a nullable argument.
pub fn require<T>(value: Option<T>, argument: &'static str) -> Result<T, ArgumentError> {
    value.ok_or(ArgumentError::Missing { argument })
}

/// Checks that an identifier is strictly positive.
pub fn positive_id(value: i32, argument: &'static str) -> Result<i32, ArgumentError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ArgumentError::OutOfRange {
            argument,
            value: i64::from(value),
        })
    }
}

/// Nullable identifier: absence and range are reported separately.
pub fn require_id(value: Option<i32>, argument: &'static str) -> Result<i32, ArgumentError> {
    positive_id(require(value, argument)?, argument)
}

/// Minimal structural email check: non-blank and containing `@`.
pub fn require_email<'a>(value: &'a str, argument: &'static str) -> Result<&'a str, ArgumentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ArgumentError::Missing { argument });
    }
    if !trimmed.contains('@') {
        return Err(ArgumentError::malformed(argument, "must contain '@'"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id_distinguishes_missing_and_range() {
        assert_eq!(
            require_id(None, "user_id"),
            Err(ArgumentError::Missing { argument: "user_id" })
        );
        assert_eq!(
            require_id(Some(0), "user_id"),
            Err(ArgumentError::OutOfRange {
                argument: "user_id",
                value: 0
            })
        );
        assert_eq!(require_id(Some(-3), "id").unwrap_err().argument(), "id");
        assert_eq!(require_id(Some(12), "id"), Ok(12));
    }

    #[test]
    fn test_require_email() {
        assert_eq!(require_email(" ana@example.com ", "email"), Ok("ana@example.com"));
        assert!(matches!(
            require_email("   ", "email"),
            Err(ArgumentError::Missing { .. })
        ));
        assert!(matches!(
            require_email("ana.example.com", "email"),
            Err(ArgumentError::Malformed { .. })
        ));
    }
}
