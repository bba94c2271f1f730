use thiserror::Error;

/// Failures surfaced by [`Renderer::render`](crate::renderer::Renderer::render).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write rendered output: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot render {kind} node: {message}")]
    Node { kind: &'static str, message: String },
}

impl RenderError {
    pub fn node(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Node {
            kind,
            message: message.into(),
        }
    }
}
