//! Crate-level error types.

use std::fmt;

use crate::core::transform_stack::TransformStackError;
use crate::renderer::traits::RenderError;

/// Failure to load a [`SceneConfig`](crate::api::config::SceneConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    Parse(serde_json::Error),
    /// The JSON parsed but a value is out of range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Errors produced by the orbit engine.
#[derive(Debug)]
pub enum EngineError {
    /// Mismatched push/pop while composing a frame.
    TransformStack(TransformStackError),
    /// The rendering collaborator failed.
    Render(RenderError),
    Config(ConfigError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransformStack(e) => write!(f, "transform stack error: {e}"),
            Self::Render(e) => write!(f, "render error: {e}"),
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TransformStack(e) => Some(e),
            Self::Render(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<TransformStackError> for EngineError {
    fn from(e: TransformStackError) -> Self {
        Self::TransformStack(e)
    }
}

impl From<RenderError> for EngineError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
