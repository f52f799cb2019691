//! Integration tests for slot store failure handling.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]


use std::fs;

use camino::Utf8Path;
use rstest::rstest;
use slot_store::{SlotError, SlotName, SlotStore};
use test_support::unique_store_root;

#[rstest]
fn open_creates_missing_directories() {
    let root = unique_store_root("nested")
        .expect("allocate store root")
        .join("a")
        .join("b");

    let store = SlotStore::open(&root).expect("store should open");

    assert!(store.root().is_dir());
}

#[rstest]
fn open_fails_when_root_is_a_file() {
    let root = unique_store_root("file-root").expect("allocate store root");
    fs::create_dir_all(root.parent().expect("root has a parent")).expect("create parent");
    fs::write(&root, "not a directory").expect("write blocking file");

    let result = SlotStore::open(&root);

    assert!(
        matches!(result, Err(SlotError::OpenError { ref path, .. }) if path == &root),
        "unexpected result: {result:?}"
    );
}

#[rstest]
fn read_reports_non_utf8_contents() {
    let root = unique_store_root("binary").expect("allocate store root");
    let store = SlotStore::open(&root).expect("store should open");
    let slot = SlotName::new("userList").expect("valid slot");
    fs::write(root.join(slot.file_name()), [0xff_u8, 0xfe, 0xfd]).expect("write bytes");

    let result = store.read(&slot);

    assert!(
        matches!(result, Err(SlotError::InvalidContents { ref path, .. }) if path == Utf8Path::new("userList.slot")),
        "unexpected result: {result:?}"
    );
}

#[rstest]
fn clearing_an_empty_slot_is_not_an_error() {
    let root = unique_store_root("empty-clear").expect("allocate store root");
    let store = SlotStore::open(&root).expect("store should open");
    let slot = SlotName::new("userList").expect("valid slot");

    assert_eq!(store.clear(&slot), Ok(false));
}

#[rstest]
fn slots_are_independent() {
    let root = unique_store_root("independent").expect("allocate store root");
    let store = SlotStore::open(&root).expect("store should open");
    let users = SlotName::new("userList").expect("valid slot");
    let other = SlotName::new("other").expect("valid slot");

    store.write(&users, "[1]").expect("write users");
    store.write(&other, "[2]").expect("write other");
    store.clear(&other).expect("clear other");

    assert_eq!(store.read(&users), Ok(Some("[1]".to_owned())));
    assert_eq!(store.read(&other), Ok(None));
}
