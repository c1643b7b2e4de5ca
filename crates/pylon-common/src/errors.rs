use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Problems decoding a message posted by the embedded page.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("bridge message is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("unknown bridge message type: {0}")]
    UnknownType(String),

    #[error("malformed payload for {kind}: {reason}")]
    MalformedPayload { kind: String, reason: String },
}

/// Misuse of the widget API and failures reported by the web surface.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Pylon SDK not initialised; call PylonContext::initialize() first")]
    NotInitialized,

    #[error("set a user before calling set_email_hash()")]
    MissingUser,

    #[error("chat widget has been destroyed")]
    Destroyed,

    #[error("web surface error: {0}")]
    Surface(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PylonError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
