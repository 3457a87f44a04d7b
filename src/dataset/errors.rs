use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Parse error: {0}.")]
    ParseError(String),

    #[error("Column not found: {0}.")]
    SchemaError(String),

    #[error("Please upload a file.")]
    EmptyInputError,
}
