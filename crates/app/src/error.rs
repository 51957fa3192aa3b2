use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error(transparent)]
    Export(#[from] export::ExportError),
    #[error("unsupported sheet \"{}\", expected .xlsx or .csv", .0.display())]
    UnsupportedSheet(std::path::PathBuf),
    #[error("customer details incomplete: {}", join(.0))]
    IncompleteCustomer(Vec<engine::CustomerIssue>),
}

fn join(issues: &[engine::CustomerIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
