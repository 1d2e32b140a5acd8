/// Result type used across the crate.
pub type SceneResult<T> = Result<T, SceneError>;

/// Error taxonomy for loading, navigating and rendering scenes.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Input file missing, unreadable or not valid CSV.
    #[error("load error: {0}")]
    Load(String),

    /// Malformed data, unknown series, invalid config or registry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Action not available in the current scene, or unknown scene id.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// Chart drawing, SVG parsing, rasterization or output failures.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing config and registry data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Navigation`] value.
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Build a [`SceneError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
