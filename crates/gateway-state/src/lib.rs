//! # gateway-state
//!
//! The word store a host exposes to stateful precompiles.
//!
//! The precompile never owns durability or transactionality: it reads and
//! writes 32-byte words keyed by `(contract address, slot key)` through the
//! [`StateDb`] trait. Two implementations are provided for hosts and tests:
//!
//! - [`MemoryStateDb`]: single-owner map with snapshot/revert
//! - [`SharedStateDb`]: cloneable handle that locks per operation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod memory;
mod shared;
mod traits;

pub use memory::MemoryStateDb;
pub use shared::SharedStateDb;
pub use traits::StateDb;
