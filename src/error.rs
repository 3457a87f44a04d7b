use thiserror::Error;

use crate::dataset::errors::DatasetError;
use crate::output::errors::OutputError;
use crate::settings::errors::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("While processing '{file}': {source}")]
    InFile {
        file: String,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// The dataset error at the root of this error, if any.
    pub fn dataset_error(&self) -> Option<&DatasetError> {
        match self {
            AppError::Dataset(e) => Some(e),
            AppError::InFile { source, .. } => source.dataset_error(),
            _ => None,
        }
    }
}
