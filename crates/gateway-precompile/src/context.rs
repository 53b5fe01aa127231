//! Call and block context types

use crate::error::GatewayError;
use gateway_primitives::Address;

/// One precompile call, with the selector already split off the input
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Call {
    /// Caller address
    pub caller: Address,
    /// Address the call was sent to
    pub address: Address,
    /// Argument bytes (selector excluded)
    pub input: Vec<u8>,
    /// Supplied gas
    pub gas: u64,
    /// Whether state modification is forbidden
    pub read_only: bool,
}

impl Call {
    /// Create a state-modifying call
    pub fn new(caller: Address, address: Address, input: Vec<u8>, gas: u64) -> Self {
        Self {
            caller,
            address,
            input,
            gas,
            read_only: false,
        }
    }

    /// Create a read-only call
    pub fn new_static(caller: Address, address: Address, input: Vec<u8>, gas: u64) -> Self {
        Self {
            caller,
            address,
            input,
            gas,
            read_only: true,
        }
    }
}

/// Successful call result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallOutput {
    /// Return data
    pub output: Vec<u8>,
    /// Gas left after the call
    pub remaining_gas: u64,
}

impl CallOutput {
    /// Create a call output
    pub fn new(output: Vec<u8>, remaining_gas: u64) -> Self {
        Self {
            output,
            remaining_gas,
        }
    }
}

/// Failed call result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFailure {
    /// Why the call failed
    pub error: GatewayError,
    /// Gas left at the point of failure
    pub remaining_gas: u64,
}

impl CallFailure {
    /// Create a call failure
    pub fn new(error: GatewayError, remaining_gas: u64) -> Self {
        Self {
            error,
            remaining_gas,
        }
    }
}

/// Result of dispatching a call
pub type CallResult = Result<CallOutput, CallFailure>;

/// Block environment seen at activation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockContext {
    /// Block number
    pub number: u64,
    /// Block timestamp (seconds)
    pub timestamp: u64,
}

impl BlockContext {
    /// Create a block context
    pub fn new(number: u64, timestamp: u64) -> Self {
        Self { number, timestamp }
    }
}

/// Chain parameters handed to activation hooks
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainConfig {
    /// Chain ID
    pub chain_id: u64,
}
