use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("build LLM: {0}")]
    Build(String),

    #[error("chat: {0}")]
    Chat(String),

    #[error("LLM returned no text")]
    Empty,

    #[error("LLM call timed out after {0}s")]
    Timeout(u64),

    #[error("probe {url}: {source}")]
    Probe {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
