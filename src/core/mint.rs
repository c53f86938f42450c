use crate::core::{
    price_for_label, MintOutcome, MintRequest, MintStage, NamingContract, ReceiptStatus, Session,
    TxHash,
};
use crate::utils::error::{MintError, Result};
use crate::utils::validation::validate_label;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Drives the two dependent on-chain transactions of a mint: `register` first,
/// `setRecord` only after the registration receipt confirms success.
///
/// A registration that confirmed is never rolled back; a later record failure
/// is reported with the registration hash so the caller can retry the record
/// phase alone.
pub struct MintOrchestrator<C: NamingContract> {
    contract: C,
    session: Arc<Session>,
    request: Mutex<MintRequest>,
    // single-slot guard: one mint per session at a time
    in_flight: Mutex<()>,
    confirmation_timeout: Duration,
}

impl<C: NamingContract> MintOrchestrator<C> {
    pub fn new(contract: C, session: Arc<Session>, confirmation_timeout: Duration) -> Self {
        Self {
            contract,
            session,
            request: Mutex::new(MintRequest::default()),
            in_flight: Mutex::new(()),
            confirmation_timeout,
        }
    }

    /// Input binding from the presentation layer.
    pub async fn set_request(&self, label: impl Into<String>, record: impl Into<String>) {
        let mut request = self.request.lock().await;
        request.label = label.into();
        request.record = record.into();
    }

    /// The pending form state. Populated until a mint fully succeeds.
    pub async fn current_request(&self) -> MintRequest {
        self.request.lock().await.clone()
    }

    pub async fn mint(&self) -> Result<MintOutcome> {
        // Re-entry while a mint is running is rejected, not queued.
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| MintError::MintInFlight)?;

        let account = self.session.current_account().ok_or(MintError::NotConnected)?;
        let request = self.request.lock().await.clone();

        if request.label.is_empty() {
            return Ok(MintOutcome::Idle);
        }
        validate_label(&request.label)?;

        let price = price_for_label(&request.label);
        tracing::info!(
            "Minting domain {} with price {}",
            request.label,
            price
        );

        let pending = self
            .contract
            .register(&account, &request.label, price)
            .await
            .map_err(|e| abort(MintStage::Registration, None, e))?;
        tracing::debug!("Registration submitted: {}", pending.hash);

        let receipt = tokio::time::timeout(
            self.confirmation_timeout,
            self.contract.wait_confirmed(&pending),
        )
        .await
        .map_err(|_| MintError::ConfirmationTimeout {
            stage: MintStage::Registration,
        })?
        .map_err(|e| abort(MintStage::Registration, None, e))?;

        if receipt.status != ReceiptStatus::Success {
            tracing::warn!("Registration transaction failed: {}", receipt.tx_hash);
            return Err(MintError::TransactionFailed {
                stage: MintStage::Registration,
                registration: None,
            });
        }
        let registration = receipt.tx_hash;
        tracing::info!("Domain minted, tx {}", registration);

        let pending = self
            .contract
            .set_record(&account, &request.label, &request.record)
            .await
            .map_err(|e| abort(MintStage::RecordSet, Some(registration.clone()), e))?;
        tracing::debug!("Record update submitted: {}", pending.hash);

        let receipt = tokio::time::timeout(
            self.confirmation_timeout,
            self.contract.wait_confirmed(&pending),
        )
        .await
        .map_err(|_| MintError::ConfirmationTimeout {
            stage: MintStage::RecordSet,
        })?
        .map_err(|e| abort(MintStage::RecordSet, Some(registration.clone()), e))?;

        if receipt.status != ReceiptStatus::Success {
            tracing::warn!(
                "Record transaction failed: {} (domain stays registered, tx {})",
                receipt.tx_hash,
                registration
            );
            return Err(MintError::TransactionFailed {
                stage: MintStage::RecordSet,
                registration: Some(registration),
            });
        }
        let record = receipt.tx_hash;
        tracing::info!("Record set, tx {}", record);

        // Both phases confirmed; ready for a fresh request.
        let mut stored = self.request.lock().await;
        stored.label.clear();
        stored.record.clear();

        Ok(MintOutcome::Minted {
            registration,
            record,
        })
    }
}

/// Unexpected fault mid-flow: provider error, rejected signature prompt,
/// network failure. Already-confirmed state is reported, never compensated.
fn abort(stage: MintStage, registration: Option<TxHash>, source: MintError) -> MintError {
    match source {
        // already shaped by a nested call
        e @ MintError::TransactionAborted { .. } => e,
        e => MintError::TransactionAborted {
            stage,
            registration,
            reason: e.to_string(),
        },
    }
}
