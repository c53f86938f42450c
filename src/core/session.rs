use crate::core::{Address, WalletProvider};
use crate::utils::error::{MintError, Result};
use std::sync::Arc;
use tokio::sync::watch;

/// Single source of truth for the authorized account of this run.
///
/// One `Session` exists per service instance and is shared by `Arc` handle
/// between the session manager and the mint orchestrator. The account only
/// moves forward from `None` to `Some`; nothing in this crate resets it
/// (a wallet-side disconnect is outside our control and not modeled).
#[derive(Debug)]
pub struct Session {
    account: watch::Sender<Option<Address>>,
}

impl Session {
    pub fn new() -> Self {
        let (account, _) = watch::channel(None);
        Self { account }
    }

    pub fn current_account(&self) -> Option<Address> {
        self.account.borrow().clone()
    }

    /// Observable view of the account for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<Option<Address>> {
        self.account.subscribe()
    }

    fn set_account(&self, account: Address) {
        self.account.send_replace(Some(account));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns wallet connection state: passive discovery at startup and explicit
/// interactive connects.
pub struct SessionManager<W: WalletProvider> {
    provider: W,
    session: Arc<Session>,
}

impl<W: WalletProvider> SessionManager<W> {
    pub fn new(provider: W, session: Arc<Session>) -> Self {
        Self { provider, session }
    }

    /// Non-interactive lookup of already-authorized accounts. Safe to call
    /// repeatedly; always reflects the provider's current state.
    pub async fn discover_account(&self) -> Result<Option<Address>> {
        let accounts = self.provider.authorized_accounts().await?;

        match accounts.into_iter().next() {
            Some(account) => {
                tracing::info!("Found an authorized account: {}", account);
                self.session.set_account(account.clone());
                Ok(Some(account))
            }
            None => {
                tracing::info!("No authorized account; wallet not connected yet");
                Ok(None)
            }
        }
    }

    /// Interactive authorization request; this may pop a wallet prompt.
    /// On rejection or provider failure the session is left untouched.
    pub async fn connect(&self) -> Result<Address> {
        let accounts = self.provider.request_accounts().await?;

        let account = accounts.into_iter().next().ok_or(MintError::UserRejected)?;
        tracing::info!("Connected: {}", account);
        self.session.set_account(account.clone());
        Ok(account)
    }
}
