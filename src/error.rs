use thiserror::Error;

pub type FormatterResult<T> = Result<T, FormatterError>;

#[derive(Error, Debug)]
pub enum FormatterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Unrecognised input layout: {0}")]
    Structure(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
