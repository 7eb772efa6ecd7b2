use thiserror::Error;

/// Unrecoverable failure of the window, render context or presentation.
///
/// Only canvas creation and frame presentation produce these. The frame loop
/// stops on the first one (cleanup still runs) and `Runtime` reports it.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("failed to create the event loop: {0}")]
    EventLoop(String),

    #[error("failed to create the window: {0}")]
    WindowCreation(String),

    #[error("failed to create the render context: {0}")]
    RenderContext(String),

    #[error("surface failure: {0}")]
    Surface(String),
}

impl FatalError {
    /// Wraps a GPU setup failure, keeping the whole context chain.
    pub fn render_context(err: anyhow::Error) -> Self {
        FatalError::RenderContext(format!("{err:#}"))
    }
}
