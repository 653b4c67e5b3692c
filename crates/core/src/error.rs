#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("patient with id '{0}' already exists")]
    DuplicateId(String),
    #[error("patient with id '{0}' not found")]
    NotFound(String),
    #[error("failed to write patient data file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read patient data file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize patient data: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient data: {0}")]
    Deserialization(serde_json::Error),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
