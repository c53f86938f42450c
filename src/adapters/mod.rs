// Adapters layer: concrete implementations for external systems (wallet bridge, contract calls).

pub mod abi;
pub mod rpc;

pub use rpc::{build_service, RpcClient, RpcNamingContract, RpcWalletProvider};
