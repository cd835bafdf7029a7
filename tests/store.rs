use camino::Utf8PathBuf;

use hf_dataset_watch::domain::{AssociationKey, WatchList, WatchScope};
use hf_dataset_watch::error::WatchError;
use hf_dataset_watch::store::{FileWatchListStore, WatchListStore};

fn temp_store() -> (tempfile::TempDir, FileWatchListStore) {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().join("state")).unwrap();
    (temp, FileWatchListStore::new_with_root(root))
}

#[test]
fn missing_record_reads_empty() {
    let (_temp, store) = temp_store();
    let list = store.read(&AssociationKey::global()).unwrap();
    assert!(list.is_empty());
    assert!(!store.record_path(&AssociationKey::global()).exists());
}

#[test]
fn write_then_read_preserves_order() {
    let (_temp, store) = temp_store();
    let key = AssociationKey::global();
    let list: WatchList = ["zeta", "alpha", "org/mid"].into_iter().collect();

    store.write(&key, &list).unwrap();

    assert_eq!(store.read(&key).unwrap(), list);
    let raw = std::fs::read_to_string(store.record_path(&key)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({"datasets": ["zeta", "alpha", "org/mid"]}));
}

#[test]
fn write_replaces_whole_record() {
    let (_temp, store) = temp_store();
    let key = AssociationKey::global();
    store
        .write(&key, &["a", "b"].into_iter().collect())
        .unwrap();
    store.write(&key, &["c"].into_iter().collect()).unwrap();

    assert_eq!(store.read(&key).unwrap().datasets, vec!["c".to_string()]);
}

#[test]
fn keys_are_isolated() {
    let (_temp, store) = temp_store();
    let alice = WatchScope::User.key_for("alice", "general");
    let bob = WatchScope::User.key_for("bob", "general");

    store.write(&alice, &["a"].into_iter().collect()).unwrap();

    assert_eq!(store.read(&alice).unwrap().len(), 1);
    assert!(store.read(&bob).unwrap().is_empty());
    assert!(store.read(&AssociationKey::global()).unwrap().is_empty());
}

#[test]
fn corrupt_record_is_decode_error() {
    let (_temp, store) = temp_store();
    let key = AssociationKey::global();
    let path = store.record_path(&key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"not json").unwrap();

    let err = store.read(&key).unwrap_err();
    assert!(matches!(err, WatchError::StoreDecode { .. }));
}

#[test]
fn later_write_wins() {
    let (_temp, store) = temp_store();
    let key = AssociationKey::global();

    let mut first = store.read(&key).unwrap();
    let mut second = store.read(&key).unwrap();
    first.insert("from-first");
    second.insert("from-second");
    store.write(&key, &first).unwrap();
    store.write(&key, &second).unwrap();

    assert_eq!(
        store.read(&key).unwrap().datasets,
        vec!["from-second".to_string()]
    );
}
