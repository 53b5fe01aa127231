//! # gateway-precompile
//!
//! Storage gateway stateful precompile.
//!
//! A call's first four bytes select a handler; the rest are ABI-encoded
//! string arguments. Handlers charge a fixed gas cost, then either read or
//! write the persistent recipient word, or resolve a content identifier to
//! a web gateway URL and return the fetched body.
//!
//! ## Example
//!
//! ```ignore
//! use gateway_precompile::{GatewayConfig, RecordedFetcher, StorageGatewayConfig};
//! use std::sync::Arc;
//!
//! let fetcher = RecordedFetcher::new()
//!     .with_response("https://bafy.ipfs.dweb.link/readme", "hello");
//! let gateway = StorageGatewayConfig::new(GatewayConfig::default(), Arc::new(fetcher))?;
//! let result = gateway.contract().call(&mut state, caller, address, &input, gas, false);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod fetch;
pub mod gas;
pub mod handler;
pub mod recipient;
pub mod selector;

use gateway_primitives::Address;

/// Address the storage gateway is installed at
pub const STORAGE_GATEWAY_ADDRESS: Address = Address::from_bytes([
    0x03, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
]);

pub use abi::{
    decode_head_tail_string, decode_string, decode_strings_head_tail, decode_two_strings,
    encode_slot_bytes, encode_string, encode_strings_head_tail, MAX_SLOT_STRING_LEN,
};
pub use config::{
    check_configure, is_fork_transition, GatewayConfig, StatefulPrecompileConfig,
    StorageGatewayConfig, MAX_RESPONSE_BYTES_LIMIT,
};
pub use context::{BlockContext, Call, CallFailure, CallOutput, CallResult, ChainConfig};
pub use dispatcher::Dispatcher;
pub use error::{ConfigError, GatewayError, GatewayResult};
pub use fetch::{ContentFetcher, DisabledFetcher, RecordedFetcher, RecordingFetcher};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use gas::{deduct_gas, OperationClass, READ_STORAGE_COST, WRITE_STORAGE_COST};
pub use handler::{GatewaySettings, Handler, Resolution};
pub use recipient::{
    get_recipient, recipient_bytes, recipient_key, set_recipient, INITIAL_RECIPIENT,
};
pub use selector::SelectorTable;
