use std::path::PathBuf;

use dump_api::ProviderError;

/// Нарушение контракта провайдера: сообщение без обязательного поля.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("message {message_id} has no {field}")]
    MissingField { field: &'static str, message_id: String },

    #[error("message {message_id} has an empty {field}")]
    EmptyField { field: &'static str, message_id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetch from {queue}: {source}")]
    Fetch { queue: String, source: ProviderError },

    #[error("fetch from {queue}: giving up after {attempts} attempts: {source}")]
    RetriesExhausted { queue: String, attempts: u32, source: ProviderError },

    #[error("build record: {0}")]
    Build(#[from] BuildError),

    #[error("serialize record {message_id}: {source}")]
    Serialize { message_id: String, source: serde_json::Error },

    #[error("open {}: {source}", path.display())]
    SinkOpen { path: PathBuf, source: std::io::Error },

    #[error("write record {message_id}: {source}")]
    SinkWrite { message_id: String, source: std::io::Error },

    #[error("close sink: {0}")]
    SinkClose(std::io::Error),
}
