#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {reference}")]
    NotFound {
        entity: &'static str,
        reference: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}
