use crate::core::{
    Address, MintOrchestrator, MintOutcome, NamingContract, Session, SessionManager,
    WalletProvider,
};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// The surface the presentation layer talks to: `connect`, `mint`, and an
/// observable current account. Everything else (rendering, styling, links)
/// stays on the presentation side.
pub struct NameService<W: WalletProvider, C: NamingContract> {
    session: Arc<Session>,
    session_manager: SessionManager<W>,
    orchestrator: MintOrchestrator<C>,
    tld: String,
}

impl<W: WalletProvider, C: NamingContract> NameService<W, C> {
    pub fn new(
        provider: W,
        contract: C,
        tld: impl Into<String>,
        confirmation_timeout: Duration,
    ) -> Self {
        let session = Arc::new(Session::new());
        Self {
            session_manager: SessionManager::new(provider, session.clone()),
            orchestrator: MintOrchestrator::new(contract, session.clone(), confirmation_timeout),
            session,
            tld: tld.into(),
        }
    }

    /// Startup discovery of an already-authorized account. Provider problems
    /// are logged and swallowed; the UI simply stays in its not-connected
    /// state.
    pub async fn discover_account(&self) -> Option<Address> {
        match self.session_manager.discover_account().await {
            Ok(account) => account,
            Err(e) => {
                tracing::warn!("Wallet discovery failed: {}", e);
                None
            }
        }
    }

    /// Interactive connect; may pop a wallet prompt.
    pub async fn connect(&self) -> Result<Address> {
        self.session_manager.connect().await
    }

    /// Binds the form input and runs the two-phase mint.
    pub async fn mint(
        &self,
        label: impl Into<String>,
        record: impl Into<String>,
    ) -> Result<MintOutcome> {
        self.orchestrator.set_request(label, record).await;
        self.orchestrator.mint().await
    }

    pub fn current_account(&self) -> Option<Address> {
        self.session.current_account()
    }

    pub fn subscribe_account(&self) -> watch::Receiver<Option<Address>> {
        self.session.subscribe()
    }

    /// The full domain name including the fixed suffix, e.g. "abc" -> "abc.che".
    pub fn full_name(&self, label: &str) -> String {
        format!("{}{}", label, self.tld)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NativeAmount, PendingTx, Receipt, ReceiptStatus, TxHash};
    use crate::utils::error::MintError;
    use async_trait::async_trait;

    struct NoProvider;

    #[async_trait]
    impl WalletProvider for NoProvider {
        async fn authorized_accounts(&self) -> Result<Vec<Address>> {
            Err(MintError::ProviderUnavailable)
        }
        async fn request_accounts(&self) -> Result<Vec<Address>> {
            Err(MintError::ProviderUnavailable)
        }
    }

    struct OneAccount;

    #[async_trait]
    impl WalletProvider for OneAccount {
        async fn authorized_accounts(&self) -> Result<Vec<Address>> {
            Ok(vec![Address::new(
                "0x93cA1E6471dF0A2028C1aa255DaB2EFa3f7451B5",
            )?])
        }
        async fn request_accounts(&self) -> Result<Vec<Address>> {
            self.authorized_accounts().await
        }
    }

    struct HappyContract;

    #[async_trait]
    impl NamingContract for HappyContract {
        async fn register(
            &self,
            _from: &Address,
            _label: &str,
            _value: NativeAmount,
        ) -> Result<PendingTx> {
            Ok(PendingTx {
                hash: TxHash("0xreg".to_string()),
            })
        }
        async fn set_record(
            &self,
            _from: &Address,
            _label: &str,
            _value: &str,
        ) -> Result<PendingTx> {
            Ok(PendingTx {
                hash: TxHash("0xrec".to_string()),
            })
        }
        async fn wait_confirmed(&self, tx: &PendingTx) -> Result<Receipt> {
            Ok(Receipt {
                status: ReceiptStatus::Success,
                tx_hash: tx.hash.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_discovery_failure_is_swallowed() {
        let service = NameService::new(NoProvider, HappyContract, ".che", Duration::from_secs(5));

        let account = service.discover_account().await;

        assert_eq!(account, None);
        assert_eq!(service.current_account(), None);
    }

    #[tokio::test]
    async fn test_mint_before_connect_is_not_connected() {
        let service = NameService::new(OneAccount, HappyContract, ".che", Duration::from_secs(5));

        let result = service.mint("abc", "hello").await;

        assert!(matches!(result, Err(MintError::NotConnected)));
    }

    #[tokio::test]
    async fn test_connect_then_mint() {
        let service = NameService::new(OneAccount, HappyContract, ".che", Duration::from_secs(5));

        let account = service.connect().await.unwrap();
        assert_eq!(service.current_account(), Some(account));

        let outcome = service.mint("abc", "hello").await.unwrap();
        assert!(matches!(outcome, MintOutcome::Minted { .. }));
    }

    #[tokio::test]
    async fn test_full_name_appends_tld() {
        let service = NameService::new(OneAccount, HappyContract, ".che", Duration::from_secs(5));
        assert_eq!(service.full_name("abc"), "abc.che");
    }
}
