use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML / JSON parse or deserialization error in the rule file.
    ConfigParse(String),
    /// Rule validation error (blank keyword, empty ladder rung, etc.).
    ConfigValidation(String),
    /// A period's table has no usable header row or lacks a mandatory column.
    MissingColumn { period: String, column: String },
    /// IO error (file read, unsupported format, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "rules parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "rules validation error: {msg}"),
            Self::MissingColumn { period, column } => {
                write!(f, "period '{period}': missing column '{column}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

impl From<std::io::Error> for ReconError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
