use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Io(String),
    Parse(String),
    Serialize(String),
    InvalidRecord(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
            AppError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AppError::Serialize(msg) => write!(f, "Serialize error: {}", msg),
            AppError::InvalidRecord(msg) => write!(f, "Invalid record: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
