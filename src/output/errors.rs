use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("File error: {0}.")]
    FileError(String),

    #[error("CSV output error: {0}.")]
    CsvOutputError(String),
}
