use thiserror::Error;

#[derive(Error, Debug)]
pub enum Table2JsonError {
    #[error("DDL parse error: {reason} (line: '{line}')")]
    DdlParse { line: String, reason: String },

    #[error("unknown sql type '{0}'")]
    UnknownSqlType(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Config format error: {0}")]
    ConfigFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl Table2JsonError {
    pub(crate) fn ddl(line: &str, reason: impl Into<String>) -> Self {
        Self::DdlParse {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Table2JsonError>;

impl From<std::io::Error> for Table2JsonError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Table2JsonError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigFormat(err.to_string())
    }
}
