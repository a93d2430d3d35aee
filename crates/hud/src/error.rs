use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name}: compilation failed: {message}")]
    Compile { name: String, message: String },

    #[error("{name} must evaluate to a layout object")]
    NotCallable { name: String },

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl ScriptError {
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime(message.into())
    }

    /// Errors that keep the host disabled until the asset changes.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Runtime(_))
    }
}
