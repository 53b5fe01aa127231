//! Selector table
//!
//! Maps 4-byte function selectors to handlers. The table is built once,
//! rejects duplicate selectors, and is read-only afterwards.

use crate::error::{GatewayError, GatewayResult};
use crate::handler::{Handler, Resolution};
use gateway_crypto::{function_selector, Selector};
use std::collections::HashMap;

/// `getData(string)`
pub const GET_DATA: &str = "getData(string)";
/// `getData(string,string)`
pub const GET_DATA_WITH_PATH: &str = "getData(string,string)";
/// `getDataByKey(string,string)`
pub const GET_DATA_BY_KEY: &str = "getDataByKey(string,string)";
/// `setRecipient(string)`
pub const SET_RECIPIENT: &str = "setRecipient(string)";
/// `getRecipient()`
pub const GET_RECIPIENT: &str = "getRecipient()";

/// Immutable selector → handler map
#[derive(Debug, Clone, Default)]
pub struct SelectorTable {
    handlers: HashMap<Selector, Handler>,
}

impl SelectorTable {
    /// Build a table from raw selectors
    pub fn new<I>(entries: I) -> GatewayResult<Self>
    where
        I: IntoIterator<Item = (Selector, Handler)>,
    {
        let mut handlers = HashMap::new();
        for (selector, handler) in entries {
            if handlers.insert(selector, handler).is_some() {
                return Err(GatewayError::DuplicateSelector(selector));
            }
        }
        Ok(Self { handlers })
    }

    /// Build a table from canonical signatures
    pub fn from_signatures<'a, I>(entries: I) -> GatewayResult<Self>
    where
        I: IntoIterator<Item = (&'a str, Handler)>,
    {
        Self::new(
            entries
                .into_iter()
                .map(|(signature, handler)| (function_selector(signature), handler)),
        )
    }

    /// The storage gateway's functions
    pub fn storage_gateway() -> GatewayResult<Self> {
        Self::from_signatures([
            (GET_DATA, Handler::Resolve(Resolution::ByIdentifier)),
            (
                GET_DATA_WITH_PATH,
                Handler::Resolve(Resolution::ByIdentifierAndPath),
            ),
            (GET_DATA_BY_KEY, Handler::Resolve(Resolution::ByFixedKey)),
            (SET_RECIPIENT, Handler::SetRecipient),
            (GET_RECIPIENT, Handler::GetRecipient),
        ])
    }

    /// Look up a selector
    pub fn get(&self, selector: &Selector) -> Option<Handler> {
        self.handlers.get(selector).copied()
    }

    /// Number of registered selectors
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_gateway_table() {
        let table = SelectorTable::storage_gateway().unwrap();
        assert_eq!(table.len(), 5);

        assert_eq!(
            table.get(&[0xae, 0x55, 0xc8, 0x88]),
            Some(Handler::Resolve(Resolution::ByIdentifier))
        );
        assert_eq!(
            table.get(&[0x59, 0x6b, 0xa5, 0xbb]),
            Some(Handler::Resolve(Resolution::ByIdentifierAndPath))
        );
        assert_eq!(
            table.get(&[0x0e, 0xc3, 0x59, 0x1b]),
            Some(Handler::Resolve(Resolution::ByFixedKey))
        );
        assert_eq!(table.get(&[0x79, 0x5a, 0x16, 0xe3]), Some(Handler::SetRecipient));
        assert_eq!(table.get(&[0x1b, 0x88, 0x09, 0x4d]), Some(Handler::GetRecipient));
    }

    #[test]
    fn test_unknown_selector() {
        let table = SelectorTable::storage_gateway().unwrap();
        // balanceOf(address)
        assert_eq!(table.get(&[0x70, 0xa0, 0x82, 0x31]), None);
    }

    #[test]
    fn test_duplicate_selector_rejected() {
        let result = SelectorTable::from_signatures([
            (SET_RECIPIENT, Handler::SetRecipient),
            (SET_RECIPIENT, Handler::GetRecipient),
        ]);
        assert_eq!(
            result.unwrap_err(),
            GatewayError::DuplicateSelector([0x79, 0x5a, 0x16, 0xe3])
        );
    }

    #[test]
    fn test_empty_table() {
        let table = SelectorTable::new(Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.get(&[0x79, 0x5a, 0x16, 0xe3]), None);
    }
}
