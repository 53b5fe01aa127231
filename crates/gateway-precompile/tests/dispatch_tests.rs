//! End-to-end dispatch tests for gateway-precompile
//!
//! Drives raw call input (selector + arguments) through a dispatcher built
//! the way a host builds it, against in-memory state and recorded content.

use gateway_crypto::function_selector;
use gateway_precompile::{
    encode_string, encode_strings_head_tail, get_recipient, recipient_key, set_recipient,
    CallFailure, Dispatcher, GatewayConfig, GatewayError, RecordedFetcher, SelectorTable,
    StatefulPrecompileConfig, StorageGatewayConfig, INITIAL_RECIPIENT, READ_STORAGE_COST,
    STORAGE_GATEWAY_ADDRESS, WRITE_STORAGE_COST,
};
use gateway_primitives::{Address, H256};
use gateway_state::{MemoryStateDb, SharedStateDb, StateDb};
use std::sync::Arc;
use std::thread;

const CID: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
const FIXED_CID: &str = "bafybeie5nqv6kd3qnfjupgvz34woh3oksc3iau6abmyajn7qvtf6d2ho34";

fn caller() -> Address {
    Address::from_bytes([0x42; 20])
}

fn fetcher() -> RecordedFetcher {
    RecordedFetcher::new()
        .with_response(format!("https://{}.ipfs.dweb.link/readme", CID), "# readme")
        .with_response(
            format!("https://{}.ipfs.dweb.link/docs/a.txt", CID),
            "doc body",
        )
        .with_response(
            format!("https://{}.ipfs.dweb.link/readme", FIXED_CID),
            "fixed body",
        )
}

fn gateway() -> StorageGatewayConfig {
    StorageGatewayConfig::new(GatewayConfig::default(), Arc::new(fetcher())).unwrap()
}

fn input(signature: &str, args: &[u8]) -> Vec<u8> {
    let mut input = function_selector(signature).to_vec();
    input.extend_from_slice(args);
    input
}

fn call(
    dispatcher: &Dispatcher,
    state: &mut dyn StateDb,
    input: &[u8],
    gas: u64,
) -> gateway_precompile::CallResult {
    dispatcher.call(state, caller(), STORAGE_GATEWAY_ADDRESS, input, gas, false)
}

// ==================== Recipient Tests ====================

#[test]
fn test_set_recipient_end_to_end() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let input = input("setRecipient(string)", &encode_string("hello").unwrap());
    let output = call(gateway.contract(), &mut state, &input, WRITE_STORAGE_COST + 1_000).unwrap();

    assert!(output.output.is_empty());
    assert_eq!(output.remaining_gas, 1_000);
    assert_eq!(get_recipient(&state), "hello");
}

#[test]
fn test_set_then_get_recipient() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let set = input("setRecipient(string)", &encode_string("carol").unwrap());
    call(gateway.contract(), &mut state, &set, WRITE_STORAGE_COST).unwrap();

    let get = input("getRecipient()", &[]);
    let output = call(gateway.contract(), &mut state, &get, READ_STORAGE_COST).unwrap();
    assert_eq!(output.output, encode_string("carol").unwrap());
}

#[test]
fn test_get_recipient_returns_raw_foreign_word() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();
    state.set_state(STORAGE_GATEWAY_ADDRESS, recipient_key(), H256::from_bytes([0xff; 32]));

    let get = input("getRecipient()", &[]);
    let output = call(gateway.contract(), &mut state, &get, READ_STORAGE_COST).unwrap();

    assert_eq!(output.output.len(), 64);
    assert_eq!(&output.output[32..], &[0xff; 32][..]);
    assert_eq!(output.remaining_gas, 0);
}

#[test]
fn test_set_recipient_out_of_gas_leaves_state() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();
    set_recipient(&mut state, INITIAL_RECIPIENT);

    let input = input("setRecipient(string)", &encode_string("hello").unwrap());
    let failure = call(gateway.contract(), &mut state, &input, WRITE_STORAGE_COST - 1).unwrap_err();

    assert_eq!(failure, CallFailure::new(GatewayError::OutOfGas, 0));
    assert_eq!(get_recipient(&state), INITIAL_RECIPIENT);
}

#[test]
fn test_set_recipient_length_mismatch() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let mut args = encode_string("hello").unwrap();
    args.push(0);
    let input = input("setRecipient(string)", &args);
    let failure = call(gateway.contract(), &mut state, &input, WRITE_STORAGE_COST + 3).unwrap_err();

    assert_eq!(
        failure,
        CallFailure::new(GatewayError::LengthMismatch { declared: 5, got: 38 }, 3)
    );
    assert!(state.is_empty());
}

#[test]
fn test_static_call_cannot_write() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let input = input("setRecipient(string)", &encode_string("hello").unwrap());
    let failure = gateway
        .contract()
        .call(&mut state, caller(), STORAGE_GATEWAY_ADDRESS, &input, WRITE_STORAGE_COST, true)
        .unwrap_err();

    assert_eq!(failure.error, GatewayError::WriteProtection);
    assert!(state.is_empty());
}

// ==================== Resolution Tests ====================

#[test]
fn test_get_data_resolves_default_path() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let input = input("getData(string)", &encode_strings_head_tail(&[CID]));
    let output = call(gateway.contract(), &mut state, &input, READ_STORAGE_COST + 1).unwrap();

    assert_eq!(output.output, b"# readme");
    assert_eq!(output.remaining_gas, 1);
    assert!(state.is_empty());
}

#[test]
fn test_get_data_with_path() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let input = input(
        "getData(string,string)",
        &encode_strings_head_tail(&[CID, "docs/a.txt"]),
    );
    let output = call(gateway.contract(), &mut state, &input, READ_STORAGE_COST).unwrap();
    assert_eq!(output.output, b"doc body");
}

#[test]
fn test_get_data_by_key_uses_fixed_cid() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let input = input(
        "getDataByKey(string,string)",
        &encode_strings_head_tail(&["ignored", "also ignored"]),
    );
    let output = call(gateway.contract(), &mut state, &input, READ_STORAGE_COST).unwrap();
    assert_eq!(output.output, b"fixed body");
}

#[test]
fn test_get_data_unrecorded_content_fails() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let input = input("getData(string)", &encode_strings_head_tail(&["bafyunknown"]));
    let failure = call(gateway.contract(), &mut state, &input, READ_STORAGE_COST + 9).unwrap_err();

    assert!(matches!(failure.error, GatewayError::FetchFailed(_)));
    assert_eq!(failure.remaining_gas, 9);
}

#[test]
fn test_get_data_offset_out_of_range() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let mut args = [0u8; 32];
    args[31] = 0xff;
    let input = input("getData(string)", &args);
    let failure = call(gateway.contract(), &mut state, &input, READ_STORAGE_COST).unwrap_err();

    assert_eq!(
        failure.error,
        GatewayError::OffsetOutOfRange { argument: 0, input_len: 32 }
    );
}

// ==================== Selector Tests ====================

#[test]
fn test_unknown_selector_consumes_no_gas() {
    let gateway = gateway();
    let mut state = MemoryStateDb::new();

    let input = input("approve(address,uint256)", &[0u8; 64]);
    let failure = call(gateway.contract(), &mut state, &input, 30_000).unwrap_err();

    assert_eq!(
        failure,
        CallFailure::new(GatewayError::UnknownSelector([0x09, 0x5e, 0xa7, 0xb3]), 30_000)
    );
}

#[test]
fn test_custom_table_restricts_functions() {
    let table = SelectorTable::from_signatures([(
        "getRecipient()",
        gateway_precompile::Handler::GetRecipient,
    )])
    .unwrap();
    let dispatcher = Dispatcher::new(table, Arc::new(fetcher()), Default::default());
    let mut state = MemoryStateDb::new();

    let set = input("setRecipient(string)", &encode_string("x").unwrap());
    let failure = call(&dispatcher, &mut state, &set, WRITE_STORAGE_COST).unwrap_err();
    assert!(matches!(failure.error, GatewayError::UnknownSelector(_)));
}

// ==================== Concurrency Tests ====================

#[test]
fn test_shared_dispatcher_across_threads() {
    let gateway = Arc::new(gateway());
    let state = SharedStateDb::new();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let gateway = Arc::clone(&gateway);
            let mut state = state.clone();
            thread::spawn(move || {
                let read = input("getData(string)", &encode_strings_head_tail(&[CID]));
                for _ in 0..25 {
                    let output = call(gateway.contract(), &mut state, &read, READ_STORAGE_COST)
                        .unwrap();
                    assert_eq!(output.output, b"# readme");
                }
                let name = format!("thread{}", i);
                let write = input("setRecipient(string)", &encode_string(&name).unwrap());
                call(gateway.contract(), &mut state, &write, WRITE_STORAGE_COST).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let recipient = get_recipient(&state);
    assert!(recipient.starts_with("thread"), "got {:?}", recipient);
}
