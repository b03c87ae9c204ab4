use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Store(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Request-shape problems the caller can fix.
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Model(ModelError::Validation(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_model_validation_counts_as_validation() {
        assert!(ServiceError::from(ModelError::Validation("missing required field(s): age".into())).is_validation());
        assert!(!ServiceError::from(ModelError::InvalidId("xyz".into())).is_validation());
        assert!(!ServiceError::not_found("Student").is_validation());
        assert!(!ServiceError::Store("timeout".into()).is_validation());
    }
}
