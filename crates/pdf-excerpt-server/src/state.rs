use pdf_excerpt_core::Pipeline;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub pipeline: Pipeline,
    /// Add `kind` and `details` to pipeline failure responses.
    pub expose_pipeline_errors: bool,
}
