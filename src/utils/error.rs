use crate::domain::model::{MintStage, TxHash};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MintError {
    #[error("No wallet provider reachable")]
    ProviderUnavailable,

    #[error("User rejected the wallet request")]
    UserRejected,

    #[error("No wallet account connected")]
    NotConnected,

    #[error("Domain name '{label}' is too short (minimum {min} characters)")]
    DomainTooShort { label: String, min: usize },

    #[error("A mint is already in flight for this session")]
    MintInFlight,

    #[error("Timed out waiting for {stage} confirmation")]
    ConfirmationTimeout { stage: MintStage },

    #[error("Transaction failed at {stage} stage")]
    TransactionFailed {
        stage: MintStage,
        registration: Option<TxHash>,
    },

    #[error("Transaction aborted at {stage} stage: {reason}")]
    TransactionAborted {
        stage: MintStage,
        registration: Option<TxHash>,
        reason: String,
    },

    #[error("Invalid address: {value}")]
    InvalidAddress { value: String },

    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

impl MintError {
    /// Hash of an already-confirmed registration, when this failure happened
    /// after the first phase. Lets the caller retry the record phase alone.
    pub fn registration_hash(&self) -> Option<&TxHash> {
        match self {
            MintError::TransactionFailed { registration, .. }
            | MintError::TransactionAborted { registration, .. } => registration.as_ref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MintError>;
