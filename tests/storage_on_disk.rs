//! `Store::open` against a real file on disk, as opposed to the in-memory store the unit
//! tests in `storage/mod.rs` exercise — checks the schema installs and survives a reopen of
//! the same path.

use borth::storage::Store;

#[test]
fn schema_installs_on_a_real_file_and_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.sqlite3");
    let path = path.to_str().unwrap();

    let card_id = {
        let store = Store::open(path).unwrap();
        store.create_card(None, "hello").unwrap()
    };

    let reopened = Store::open(path).unwrap();
    assert_eq!(reopened.get_card_source(card_id).unwrap(), Some("hello".to_string()));
}

#[test]
fn opening_the_same_path_twice_does_not_clobber_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.sqlite3");
    let path = path.to_str().unwrap();

    let store = Store::open(path).unwrap();
    let card_id = store.create_card(None, "v0").unwrap();
    store.edit_card(card_id, "v1").unwrap();
    drop(store);

    let store = Store::open(path).unwrap();
    let history = store.get_card_history(card_id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(store.get_card_source(card_id).unwrap(), Some("v1".to_string()));
}
