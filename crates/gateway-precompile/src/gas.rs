//! Gas metering

use crate::error::{GatewayError, GatewayResult};

/// Gas cost of reading one storage slot or resolving content
pub const READ_STORAGE_COST: u64 = 5_000;

/// Gas cost of writing one storage slot
pub const WRITE_STORAGE_COST: u64 = 20_000;

/// Cost class of a handler's single logical storage operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    /// Charged [`READ_STORAGE_COST`]
    Read,
    /// Charged [`WRITE_STORAGE_COST`]
    Write,
}

impl OperationClass {
    /// Fixed cost of this class
    pub const fn cost(self) -> u64 {
        match self {
            OperationClass::Read => READ_STORAGE_COST,
            OperationClass::Write => WRITE_STORAGE_COST,
        }
    }
}

/// Remaining gas after paying `cost` out of `supplied`.
pub fn deduct_gas(supplied: u64, cost: u64) -> GatewayResult<u64> {
    supplied.checked_sub(cost).ok_or(GatewayError::OutOfGas)
}
