//! Selector derivation tests

use gateway_crypto::{function_selector, keccak256, SELECTOR_LEN};

#[test]
fn test_selector_depends_on_canonical_form() {
    // Whitespace and parameter names change the hash, so only the canonical
    // signature matches what Solidity callers send.
    let canonical = function_selector("getData(string,string)");
    assert_ne!(canonical, function_selector("getData(string, string)"));
    assert_ne!(canonical, function_selector("getData(string cid,string path)"));
}

#[test]
fn test_selector_matches_known_vectors() {
    assert_eq!(
        hex::encode(function_selector("balanceOf(address)")),
        "70a08231"
    );
    assert_eq!(
        hex::encode(function_selector("approve(address,uint256)")),
        "095ea7b3"
    );
}

#[test]
fn test_selector_is_leading_hash_bytes() {
    for signature in ["getData(string)", "getRecipient()", "setRecipient(string)"] {
        let hash = keccak256(signature.as_bytes());
        assert_eq!(
            function_selector(signature)[..],
            hash.as_bytes()[..SELECTOR_LEN]
        );
    }
}

#[test]
fn test_recipient_selectors_are_distinct_from_legacy_overload() {
    assert_ne!(
        function_selector("setRecipient(string)"),
        function_selector("setRecipient(string,string)")
    );
    assert_eq!(
        hex::encode(function_selector("setRecipient(string,string)")),
        "fd91173c"
    );
}
