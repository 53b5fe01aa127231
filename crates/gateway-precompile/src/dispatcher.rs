//! Call dispatcher
//!
//! Splits the selector off the call input, looks up the handler and runs it
//! against the host's state. Unknown or missing selectors fail before any
//! gas is charged.

use crate::context::{Call, CallFailure, CallResult};
use crate::error::GatewayError;
use crate::fetch::ContentFetcher;
use crate::handler::GatewaySettings;
use crate::selector::SelectorTable;
use gateway_crypto::{Selector, SELECTOR_LEN};
use gateway_primitives::Address;
use gateway_state::StateDb;
use std::sync::Arc;

/// Stateless dispatcher shared by every call into the precompile
#[derive(Clone)]
pub struct Dispatcher {
    table: SelectorTable,
    fetcher: Arc<dyn ContentFetcher>,
    settings: GatewaySettings,
}

impl Dispatcher {
    /// Create a dispatcher
    pub fn new(
        table: SelectorTable,
        fetcher: Arc<dyn ContentFetcher>,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            table,
            fetcher,
            settings,
        }
    }

    /// Selector table
    pub fn table(&self) -> &SelectorTable {
        &self.table
    }

    /// Gateway settings
    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Run a call whose selector has already been split off.
    pub fn run(&self, state: &mut dyn StateDb, selector: Selector, call: &Call) -> CallResult {
        let handler = self.table.get(&selector).ok_or_else(|| {
            tracing::debug!(selector = %hex::encode(selector), "unknown selector");
            CallFailure::new(GatewayError::UnknownSelector(selector), call.gas)
        })?;

        tracing::trace!(
            handler = handler.name(),
            caller = %call.caller,
            gas = call.gas,
            read_only = call.read_only,
            input = %hex::encode(&call.input),
            "dispatching call"
        );
        handler.execute(call, state, self.fetcher.as_ref(), &self.settings)
    }

    /// Run a raw call: `input` is the 4-byte selector followed by arguments.
    pub fn call(
        &self,
        state: &mut dyn StateDb,
        caller: Address,
        address: Address,
        input: &[u8],
        gas: u64,
        read_only: bool,
    ) -> CallResult {
        if input.len() < SELECTOR_LEN {
            return Err(CallFailure::new(
                GatewayError::MissingSelector(input.len()),
                gas,
            ));
        }
        let (head, args) = input.split_at(SELECTOR_LEN);
        let mut selector: Selector = [0u8; SELECTOR_LEN];
        selector.copy_from_slice(head);

        let call = Call {
            caller,
            address,
            input: args.to_vec(),
            gas,
            read_only,
        };
        self.run(state, selector, &call)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("table", &self.table)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
