use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed spreadsheet: {0}")]
    MalformedSpreadsheet(String),

    #[error("unwritable output location: {0}")]
    UnwritableOutput(String),

    #[error("invalid input location: {0}")]
    InvalidInputLocation(String),
}
