use thiserror::Error;

/// The opaque failure a `Renderer` implementation may return.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct RenderError(pub String);

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("The report renderer failed: {0}")]
    Render(#[from] RenderError),

    #[error("Series handed to the renderer are not aligned: {0}")]
    Misaligned(String),
}
