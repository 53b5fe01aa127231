//! Precompile function handlers
//!
//! Every handler runs the same steps: charge gas for its operation class,
//! decode its arguments, then read/write state or resolve content. State is
//! only written after every check has passed.

use crate::abi::{decode_head_tail_string, decode_string, decode_two_strings, encode_slot_bytes};
use crate::context::{Call, CallFailure, CallOutput, CallResult};
use crate::error::{GatewayError, GatewayResult};
use crate::fetch::ContentFetcher;
use crate::gas::{deduct_gas, OperationClass};
use crate::recipient::{recipient_bytes, set_recipient};
use gateway_state::StateDb;
use std::time::{Duration, Instant};

/// How a read handler finds the content identifier and path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// One string argument: the identifier; default path
    ByIdentifier,
    /// Two string arguments: identifier and path
    ByIdentifierAndPath,
    /// Arguments ignored: configured identifier and default path
    ByFixedKey,
}

/// Handler bound to a selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// Resolve content through the web gateway
    Resolve(Resolution),
    /// Store a new recipient
    SetRecipient,
    /// Return the packed recipient
    GetRecipient,
}

/// Settings the resolution handlers build targets from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    /// URL scheme including `://`
    pub scheme: String,
    /// Host suffix appended to the identifier
    pub gateway_suffix: String,
    /// Identifier used by [`Resolution::ByFixedKey`]
    pub fixed_cid: String,
    /// Path used when the call does not name one
    pub default_path: String,
    /// Upper bound for one fetch
    pub fetch_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            scheme: "https://".to_string(),
            gateway_suffix: ".ipfs.dweb.link".to_string(),
            fixed_cid: "bafybeie5nqv6kd3qnfjupgvz34woh3oksc3iau6abmyajn7qvtf6d2ho34".to_string(),
            default_path: "/readme".to_string(),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl Handler {
    /// Gas class charged by this handler
    pub fn operation(&self) -> OperationClass {
        match self {
            Handler::SetRecipient => OperationClass::Write,
            Handler::Resolve(_) | Handler::GetRecipient => OperationClass::Read,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Handler::Resolve(Resolution::ByIdentifier) => "getData",
            Handler::Resolve(Resolution::ByIdentifierAndPath) => "getDataWithPath",
            Handler::Resolve(Resolution::ByFixedKey) => "getDataByKey",
            Handler::SetRecipient => "setRecipient",
            Handler::GetRecipient => "getRecipient",
        }
    }

    /// Run the handler.
    ///
    /// Running out of gas leaves zero gas; any later failure keeps the gas
    /// that remained after the charge.
    pub fn execute(
        &self,
        call: &Call,
        state: &mut dyn StateDb,
        fetcher: &dyn ContentFetcher,
        settings: &GatewaySettings,
    ) -> CallResult {
        let remaining_gas = deduct_gas(call.gas, self.operation().cost())
            .map_err(|error| CallFailure::new(error, 0))?;

        self.perform(call, state, fetcher, settings)
            .map(|output| CallOutput::new(output, remaining_gas))
            .map_err(|error| {
                tracing::debug!(handler = self.name(), %error, "handler failed");
                CallFailure::new(error, remaining_gas)
            })
    }

    fn perform(
        &self,
        call: &Call,
        state: &mut dyn StateDb,
        fetcher: &dyn ContentFetcher,
        settings: &GatewaySettings,
    ) -> GatewayResult<Vec<u8>> {
        match self {
            Handler::Resolve(resolution) => {
                let target = resolution.target(&call.input, settings)?;
                tracing::debug!(handler = self.name(), %target, "resolving content");
                let deadline = Instant::now() + settings.fetch_timeout;
                fetcher.fetch(&target, deadline).map_err(|error| {
                    tracing::warn!(%target, %error, "content fetch failed");
                    error
                })
            }
            Handler::SetRecipient => {
                if call.read_only {
                    return Err(GatewayError::WriteProtection);
                }
                let recipient = decode_string(&call.input)?;
                tracing::debug!(%recipient, caller = %call.caller, "setting recipient");
                set_recipient(state, &recipient);
                Ok(Vec::new())
            }
            // Raw bytes, so a foreign non-UTF-8 word still fits one slot
            Handler::GetRecipient => encode_slot_bytes(&recipient_bytes(state)),
        }
    }
}

impl Resolution {
    /// Build the fetch target `{scheme}{identifier}{suffix}{path}` for a call
    pub fn target(&self, input: &[u8], settings: &GatewaySettings) -> GatewayResult<String> {
        let (identifier, path) = match self {
            Resolution::ByIdentifier => {
                let raw = decode_head_tail_string(input)?;
                (sanitize_identifier(&raw)?, settings.default_path.clone())
            }
            Resolution::ByIdentifierAndPath => {
                let (raw, path) = decode_two_strings(input)?;
                (sanitize_identifier(&raw)?, format!("/{}", path))
            }
            Resolution::ByFixedKey => (settings.fixed_cid.clone(), settings.default_path.clone()),
        };

        Ok(format!(
            "{}{}{}{}",
            settings.scheme, identifier, settings.gateway_suffix, path
        ))
    }
}

/// Keep only ASCII letters and digits of a content identifier.
///
/// The identifier becomes the leftmost host label of the target URL, so
/// nothing else may survive.
pub fn sanitize_identifier(raw: &str) -> GatewayResult<String> {
    let identifier: String = raw.chars().filter(char::is_ascii_alphanumeric).collect();
    if identifier.is_empty() {
        return Err(GatewayError::InvalidIdentifier);
    }
    Ok(identifier)
}
