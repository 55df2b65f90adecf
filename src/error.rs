use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("temperature {0} is outside 0-1")]
    InvalidTemperature(f32),

    #[error("malformed {service} response: {detail}")]
    MalformedResponse {
        service: &'static str,
        detail: String,
    },

    #[error("console io failed: {0}")]
    Console(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("bot name is empty")]
    MissingBotName,

    #[error("bot id is empty")]
    MissingBotId,

    #[error("groupme access token is required to upload images")]
    MissingAccessToken,

    #[error("testing mode requested but no testing_bot is configured")]
    MissingTestingBot,

    #[error("webhook path {0:?} must start with '/'")]
    InvalidWebhookPath(String),

    #[error("image list {0} has no entries")]
    EmptyAssetList(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
