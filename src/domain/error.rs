use thiserror::Error;

/// Core domain errors
///
/// These are sentinel values: the HTTP status classifier matches on variant
/// identity after unwrapping any [`DomainError::Context`] layers, never on
/// the rendered message.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user not found")]
    UserNotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid password")]
    InvalidPassword,

    #[error("invalid reset key")]
    InvalidResetKey,

    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("password mismatch")]
    PasswordMismatch,

    #[error("no next page")]
    NoNextPage,

    #[error("no prev page")]
    NoPrevPage,

    #[error("storage error: {message}")]
    Storage { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },

    /// Contextual wrapping, e.g. the storage operation that failed.
    #[error("{operation}: {source}")]
    Context {
        operation: String,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Wrap this error with the name of the operation that produced it.
    pub fn in_operation(self, operation: impl Into<String>) -> Self {
        Self::Context {
            operation: operation.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all [`DomainError::Context`] layers removed.
    ///
    /// Status classification must go through this so that wrapping a sentinel
    /// never changes the status code it maps to.
    pub fn root_cause(&self) -> &DomainError {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_context() {
        let err = DomainError::UserNotFound
            .in_operation("user.get_by_email")
            .in_operation("user.authenticate");

        assert!(matches!(err.root_cause(), DomainError::UserNotFound));
    }

    #[test]
    fn test_root_cause_of_bare_error() {
        let err = DomainError::InvalidPassword;
        assert!(matches!(err.root_cause(), DomainError::InvalidPassword));
    }

    #[test]
    fn test_context_display_includes_operation() {
        let err = DomainError::storage("connection refused").in_operation("user.get");
        assert_eq!(
            err.to_string(),
            "user.get: storage error: connection refused"
        );
    }

    #[test]
    fn test_missing_field_message() {
        let err = DomainError::missing_field("email");
        assert_eq!(err.to_string(), "missing required field: email");
    }
}
