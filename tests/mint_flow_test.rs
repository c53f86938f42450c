use anyhow::Result;
use che_mint::config::{CliConfig, DEFAULT_CONTRACT_ADDRESS, DEFAULT_TLD};
use che_mint::core::MintStage;
use che_mint::{build_service, MintError, MintOutcome};
use httpmock::prelude::*;

const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";

// full call data for register("abc")
const REGISTER_ABC_DATA: &str = "0xf2c298be000000000000000000000000000000000000000000000000000000000000002000000000000000000000000000000000000000000000000000000000000000036162630000000000000000000000000000000000000000000000000000000000";

fn config_for(server: &MockServer) -> CliConfig {
    CliConfig {
        rpc_endpoint: server.url("/"),
        contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
        tld: DEFAULT_TLD.to_string(),
        confirmation_timeout_secs: 10,
        label: None,
        record: String::new(),
        verbose: false,
    }
}

fn mock_accounts(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("eth_accounts");
        then.status(200).json_body(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": [ACCOUNT],
        }));
    })
}

fn mock_send<'a>(server: &'a MockServer, data_fragment: &str, tx_hash: &str) -> httpmock::Mock<'a> {
    let tx_hash = tx_hash.to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("eth_sendTransaction")
            .body_contains(data_fragment);
        then.status(200).json_body(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": tx_hash,
        }));
    })
}

fn mock_receipt<'a>(server: &'a MockServer, tx_hash: &str, status: &str) -> httpmock::Mock<'a> {
    let tx_hash = tx_hash.to_string();
    let status = status.to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("eth_getTransactionReceipt")
            .body_contains(&tx_hash);
        then.status(200).json_body(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"transactionHash": tx_hash, "status": status},
        }));
    })
}

// Scenario A: 3-char label costs 0.5, register then setRecord, full success.
#[tokio::test]
async fn test_mint_abc_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let accounts = mock_accounts(&server);
    // register("abc") must carry the 0.5 tier as value and the encoded label
    let register = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("eth_sendTransaction")
            .body_contains("0x6f05b59d3b20000")
            .body_contains(REGISTER_ABC_DATA);
        then.status(200).json_body(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": "0xregtx",
        }));
    });
    let register_receipt = mock_receipt(&server, "0xregtx", "0x1");
    // setRecord("abc", "hello"): selector + "hello" in the call data
    let set_record = mock_send(&server, "0xc1880a98", "0xrectx");
    let record_receipt = mock_receipt(&server, "0xrectx", "0x1");

    let service = build_service(&config_for(&server))?;
    let account = service
        .discover_account()
        .await
        .ok_or_else(|| anyhow::anyhow!("no authorized account discovered"))?;
    assert_eq!(account.as_str(), ACCOUNT);

    let outcome = service.mint("abc", "hello").await?;

    accounts.assert();
    register.assert();
    register_receipt.assert();
    set_record.assert();
    record_receipt.assert();

    match outcome {
        MintOutcome::Minted {
            registration,
            record,
        } => {
            assert_eq!(registration.to_string(), "0xregtx");
            assert_eq!(record.to_string(), "0xrectx");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(service.full_name("abc"), "abc.che");
    Ok(())
}

// Scenario B: labels under 3 chars are rejected before anything is submitted.
#[tokio::test]
async fn test_short_label_issues_no_transactions() {
    let server = MockServer::start();
    let _accounts = mock_accounts(&server);
    let sends = mock_send(&server, "eth_sendTransaction", "0xnever");

    let service = build_service(&config_for(&server)).unwrap();
    service.discover_account().await.unwrap();

    let result = service.mint("ab", "power").await;

    assert!(matches!(
        result,
        Err(MintError::DomainTooShort { min: 3, .. })
    ));
    assert_eq!(sends.hits(), 0);
}

// Scenario C: empty label is a no-op, not an error.
#[tokio::test]
async fn test_empty_label_is_idle() {
    let server = MockServer::start();
    let _accounts = mock_accounts(&server);
    let sends = mock_send(&server, "eth_sendTransaction", "0xnever");

    let service = build_service(&config_for(&server)).unwrap();
    service.discover_account().await.unwrap();

    let outcome = service.mint("", "whatever").await.unwrap();

    assert_eq!(outcome, MintOutcome::Idle);
    assert_eq!(sends.hits(), 0);
}

// Scenario D: register succeeds at the 0.1 tier, setRecord fails; the error
// carries the registration hash so the record phase can be retried.
#[tokio::test]
async fn test_record_failure_after_successful_registration() {
    let server = MockServer::start();
    let _accounts = mock_accounts(&server);
    // 8-char label is priced at the lowest tier
    let register = mock_send(&server, "0x16345785d8a0000", "0xregtx");
    let _register_receipt = mock_receipt(&server, "0xregtx", "0x1");
    let set_record = mock_send(&server, "0xc1880a98", "0xrectx");
    let _record_receipt = mock_receipt(&server, "0xrectx", "0x0");

    let service = build_service(&config_for(&server)).unwrap();
    service.discover_account().await.unwrap();

    let result = service.mint("longname", "my power").await;

    register.assert();
    set_record.assert();
    match result {
        Err(MintError::TransactionFailed {
            stage: MintStage::RecordSet,
            registration: Some(hash),
        }) => assert_eq!(hash.to_string(), "0xregtx"),
        other => panic!("unexpected result: {:?}", other),
    }
}

// Only length is validated client-side; the contract prices "CHE" like any
// other 3-char label.
#[tokio::test]
async fn test_uppercase_label_mints_at_its_length_tier() -> Result<()> {
    let server = MockServer::start();
    let _accounts = mock_accounts(&server);
    let register = mock_send(&server, "0x6f05b59d3b20000", "0xregtx");
    let _register_receipt = mock_receipt(&server, "0xregtx", "0x1");
    let set_record = mock_send(&server, "0xc1880a98", "0xrectx");
    let _record_receipt = mock_receipt(&server, "0xrectx", "0x1");

    let service = build_service(&config_for(&server))?;
    service
        .discover_account()
        .await
        .ok_or_else(|| anyhow::anyhow!("no authorized account discovered"))?;

    let outcome = service.mint("CHE", "hello").await?;

    register.assert();
    set_record.assert();
    assert!(matches!(outcome, MintOutcome::Minted { .. }));
    Ok(())
}

// Failed registration is the hard barrier: setRecord must never go out.
#[tokio::test]
async fn test_failed_registration_gates_record() {
    let server = MockServer::start();
    let _accounts = mock_accounts(&server);
    let _register = mock_send(&server, "0xf2c298be", "0xregtx");
    let _register_receipt = mock_receipt(&server, "0xregtx", "0x0");
    let set_record = mock_send(&server, "0xc1880a98", "0xrectx");

    let service = build_service(&config_for(&server)).unwrap();
    service.discover_account().await.unwrap();

    let result = service.mint("abc", "hello").await;

    assert!(matches!(
        result,
        Err(MintError::TransactionFailed {
            stage: MintStage::Registration,
            registration: None,
        })
    ));
    assert_eq!(set_record.hits(), 0);
}

// Mint without any wallet session fails fast, no RPC traffic at all.
#[tokio::test]
async fn test_mint_without_session() {
    let server = MockServer::start();
    let sends = mock_send(&server, "eth_sendTransaction", "0xnever");

    let service = build_service(&config_for(&server)).unwrap();

    let result = service.mint("abc", "hello").await;

    assert!(matches!(result, Err(MintError::NotConnected)));
    assert_eq!(sends.hits(), 0);
}
