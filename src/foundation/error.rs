/// Convenience result type used across inkmark.
pub type InkResult<T> = Result<T, InkError>;

/// Top-level error taxonomy used by renderer and orchestration APIs.
///
/// Option problems are never errors: they surface as [`crate::config::ConfigWarning`] values and
/// resolution falls back to schema defaults.
#[derive(thiserror::Error, Debug)]
pub enum InkError {
    /// A renderer could not be built for a segment (unsupported mode, degenerate box).
    #[error("construction error: {0}")]
    Construction(String),

    /// A drawing surface could not be allocated.
    #[error("surface error: {0}")]
    Surface(String),

    /// An operation was called out of order (e.g. `set_bounds` twice).
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// A base color string could not be parsed.
    #[error("color error: {0}")]
    Color(String),

    /// Raw option input was not an option map.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InkError {
    /// Build an [`InkError::Construction`] value.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Build an [`InkError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build an [`InkError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build an [`InkError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build an [`InkError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Return `true` for errors that are scoped to a single segment's construction.
    pub fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_) | Self::Surface(_) | Self::Color(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
