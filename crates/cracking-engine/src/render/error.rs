use std::path::PathBuf;

/// Shader loading / compilation / linking failure.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("couldn't read shader source {}", path.display())]
    ResourceLoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader `{label}` failed to compile:\n{log}")]
    ShaderCompileFailed { label: String, log: String },
    #[error("shader program failed to link: {log}")]
    ProgramLinkFailed { log: String },
}
