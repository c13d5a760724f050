use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("no project found at '{0}' (project.studio is missing)")]
    ProjectNotFound(String),

    #[error("{0} file not found")]
    MissingFile(String),

    #[error("Fail to parse {0}")]
    InvalidDocument(String),

    #[error("migration step '{0}' is not registered")]
    UnknownStep(String),

    #[error("version '{0}' is not declared in the migration registry")]
    UndeclaredVersion(String),

    #[error("locked by another process: {0}")]
    Locked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl StudioError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) => "project_not_found",
            Self::MissingFile(_) => "missing_file",
            Self::InvalidDocument(_) => "invalid_document",
            Self::UnknownStep(_) => "unknown_step",
            Self::UndeclaredVersion(_) => "undeclared_version",
            Self::Locked(_) => "locked",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
            Self::Csv(_) => "csv_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
