pub mod abi;
pub mod event;
pub mod rpc;
