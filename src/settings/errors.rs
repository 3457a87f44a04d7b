use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("File error: {0}.")]
    FileError(String),

    #[error("Unsupported settings format: {0}.")]
    UnsupportedFormat(String),

    #[error("Invalid setting '{name}': {reason}.")]
    InvalidValue { name: String, reason: String },
}
