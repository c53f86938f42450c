use crate::adapters::abi;
use crate::core::{
    Address, ConfigProvider, NamingContract, NativeAmount, PendingTx, Receipt, ReceiptStatus,
    TxHash, WalletProvider,
};
use crate::utils::error::{MintError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Wallet-side rejection code (EIP-1193).
const CODE_USER_REJECTED: i64 = 4001;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// JSON-RPC 2.0 client for the wallet bridge endpoint.
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl RpcClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T> {
        self.call_nullable(method, params)
            .await?
            .ok_or_else(|| MintError::Rpc {
                code: -32603,
                message: "response carried neither result nor error".to_string(),
            })
    }

    /// A `null` result is legal for some methods (a receipt not yet mined).
    async fn call_nullable<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Option<T>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!("RPC request {}: {}", id, method);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    MintError::ProviderUnavailable
                } else {
                    MintError::Http(e)
                }
            })?;

        let response: RpcResponse<T> = response.json().await?;
        if let Some(error) = response.error {
            tracing::debug!("RPC error {}: {} {}", id, error.code, error.message);
            if error.code == CODE_USER_REJECTED {
                return Err(MintError::UserRejected);
            }
            return Err(MintError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result)
    }
}

/// `WalletProvider` over the bridge's account methods.
pub struct RpcWalletProvider {
    client: Arc<RpcClient>,
}

impl RpcWalletProvider {
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }

    fn into_addresses(raw: Vec<String>) -> Result<Vec<Address>> {
        raw.into_iter().map(Address::new).collect()
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn authorized_accounts(&self) -> Result<Vec<Address>> {
        let raw: Vec<String> = self
            .client
            .call("eth_accounts", serde_json::json!([]))
            .await?;
        Self::into_addresses(raw)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        let raw: Vec<String> = self
            .client
            .call("eth_requestAccounts", serde_json::json!([]))
            .await?;
        Self::into_addresses(raw)
    }
}

/// `NamingContract` over `eth_sendTransaction` + receipt polling. Signing is
/// the bridge's business; we only hand it the call data.
pub struct RpcNamingContract {
    client: Arc<RpcClient>,
    contract: Address,
    poll_interval: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: String,
    status: String,
}

impl RpcNamingContract {
    pub fn new(client: Arc<RpcClient>, contract: Address) -> Self {
        Self {
            client,
            contract,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    async fn send(&self, params: serde_json::Value) -> Result<PendingTx> {
        let hash: String = self
            .client
            .call("eth_sendTransaction", serde_json::json!([params]))
            .await?;
        Ok(PendingTx { hash: TxHash(hash) })
    }
}

#[async_trait]
impl NamingContract for RpcNamingContract {
    async fn register(
        &self,
        from: &Address,
        label: &str,
        value: NativeAmount,
    ) -> Result<PendingTx> {
        self.send(serde_json::json!({
            "from": from.as_str(),
            "to": self.contract.as_str(),
            "value": value.to_wei_hex(),
            "data": abi::encode_register(label),
        }))
        .await
    }

    async fn set_record(&self, from: &Address, label: &str, value: &str) -> Result<PendingTx> {
        self.send(serde_json::json!({
            "from": from.as_str(),
            "to": self.contract.as_str(),
            "data": abi::encode_set_record(label, value),
        }))
        .await
    }

    async fn wait_confirmed(&self, tx: &PendingTx) -> Result<Receipt> {
        // Unbounded on purpose: the orchestrator wraps this in its
        // confirmation timeout.
        loop {
            let receipt: Option<RpcReceipt> = self
                .client
                .call_nullable(
                    "eth_getTransactionReceipt",
                    serde_json::json!([tx.hash.0]),
                )
                .await?;

            if let Some(receipt) = receipt {
                let status = if receipt.status == "0x1" {
                    ReceiptStatus::Success
                } else {
                    ReceiptStatus::Failure
                };
                return Ok(Receipt {
                    status,
                    tx_hash: TxHash(receipt.transaction_hash),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Builds the full service stack from a config: one shared RPC client behind
/// both ports.
pub fn build_service(
    config: &impl ConfigProvider,
) -> Result<crate::core::NameService<RpcWalletProvider, RpcNamingContract>> {
    let client = Arc::new(RpcClient::new(config.rpc_endpoint()));
    let contract = Address::new(config.contract_address())?;
    Ok(crate::core::NameService::new(
        RpcWalletProvider::new(client.clone()),
        RpcNamingContract::new(client, contract),
        config.tld(),
        config.confirmation_timeout(),
    ))
}
