use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("<{tag}> is self-closing and cannot hold children")]
    SelfClosingChild { tag: String },

    #[error("no node registered under \"{0}\"")]
    UnknownTarget(String),

    #[error("node \"{0}\" was already attached to a parent")]
    AlreadyAttached(String),

    #[error("attaching \"{child}\" under \"{parent}\" would create a cycle")]
    WouldCycle { parent: String, child: String },

    #[error("a node is already registered under \"{0}\"")]
    DuplicateKey(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid render configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DomError>;
