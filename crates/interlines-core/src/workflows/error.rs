use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("Complex '{complex}' has no frame {frame}")]
    FrameNotFound { complex: String, frame: usize },

    #[error("Binding-site radius must be finite and non-negative, got {0}")]
    InvalidSiteSize(f64),
}
