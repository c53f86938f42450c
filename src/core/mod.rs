pub mod mint;
pub mod service;
pub mod session;

pub use crate::domain::model::{
    price_for_label, Address, MintOutcome, MintRequest, MintStage, NativeAmount, PendingTx,
    Receipt, ReceiptStatus, TxHash,
};
pub use crate::domain::ports::{ConfigProvider, NamingContract, WalletProvider};
pub use crate::utils::error::Result;
pub use mint::MintOrchestrator;
pub use service::NameService;
pub use session::{Session, SessionManager};
