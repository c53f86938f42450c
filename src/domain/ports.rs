use crate::domain::model::{Address, NativeAmount, PendingTx, Receipt};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Wallet-side capability: account discovery and authorization.
///
/// Transaction signing is implicit in contract calls; the provider holds the
/// keys, this crate never sees them.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts the user has already authorized (eth_accounts). Never prompts.
    async fn authorized_accounts(&self) -> Result<Vec<Address>>;

    /// Interactive authorization request (eth_requestAccounts). May prompt the
    /// user and may fail with `UserRejected`.
    async fn request_accounts(&self) -> Result<Vec<Address>>;
}

/// The naming contract at its fixed address.
#[async_trait]
pub trait NamingContract: Send + Sync {
    /// Submits `register(label)` with `value` attached, signed as `from`.
    async fn register(
        &self,
        from: &Address,
        label: &str,
        value: NativeAmount,
    ) -> Result<PendingTx>;

    /// Submits `setRecord(label, value)`, signed as `from`, no value attached.
    async fn set_record(&self, from: &Address, label: &str, value: &str) -> Result<PendingTx>;

    /// Suspends until the transaction is mined and returns its receipt.
    async fn wait_confirmed(&self, tx: &PendingTx) -> Result<Receipt>;
}

pub trait ConfigProvider: Send + Sync {
    fn rpc_endpoint(&self) -> &str;
    fn contract_address(&self) -> &str;
    fn tld(&self) -> &str;
    fn confirmation_timeout(&self) -> Duration;
}
