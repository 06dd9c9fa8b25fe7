use dump_api::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("config: {0}")]
    Config(String),

    #[error("config: {name} is required (set {env} or pass --{flag})")]
    Missing { name: &'static str, env: &'static str, flag: &'static str },

    #[error("queue client: {0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Pipeline(#[from] pipeline::PipelineError),
}
