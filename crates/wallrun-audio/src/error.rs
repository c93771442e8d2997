/// Errors that can occur in the audio system.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AudioError {
    #[error("invalid ground switch config: {0}")]
    InvalidConfig(String),

    #[error("unknown ground material '{0}'")]
    UnknownMaterial(String),
}
