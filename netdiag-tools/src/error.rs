use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Execution failed: {0}")]
    Execution(String),

    #[error("Operation timed out")]
    Timeout,

    #[error("Internal error")]
    Internal,
}
