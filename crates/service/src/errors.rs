use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("vaccine `{0}` not found")]
    VaccineNameNotFound(String),
    #[error("no {0} ids left to assign")]
    IdSpaceExhausted(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: u32) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self { Self::Storage(e.to_string()) }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self { Self::Storage(e.to_string()) }
}
