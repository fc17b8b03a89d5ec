use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotateToolsError {
    #[error("Unknown annotation format '{0}'")]
    UnknownFormat(String),

    #[error("Invalid ignored columns pattern: `{0}`")]
    InvalidIgnoreColumnsPattern(#[from] regex::Error),

    #[error("io error: `{0}`")]
    IoError(#[from] std::io::Error),
}

pub type Result<T = ()> = std::result::Result<T, AnnotateToolsError>;
