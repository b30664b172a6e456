use citysearch::storage::{FavoritesRecord, FavoritesStore, JsonFavoritesStore};
use citysearch::CitySearchError;
use std::collections::HashSet;

fn read_record(path: &std::path::Path) -> FavoritesRecord {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn missing_file_starts_empty_and_is_created_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("favorites.json");

    let store = JsonFavoritesStore::open(&path).unwrap();
    assert!(store.observe_favorites().borrow().is_empty());
    assert!(!path.exists());

    store.add_favorite(42).await.unwrap();
    assert!(path.exists());

    let record = read_record(&path);
    assert_eq!(record.version, 1);
    assert_eq!(record.favorites.into_iter().collect::<Vec<_>>(), vec![42]);
    assert!(record.updated_at.is_some());
}

#[tokio::test]
async fn operations_follow_set_semantics() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let store = JsonFavoritesStore::open(&path).unwrap();

    store.add_favorite(3).await.unwrap();
    store.add_favorite(1).await.unwrap();
    store.add_favorite(3).await.unwrap();
    store.toggle_favorite(2).await.unwrap();
    store.toggle_favorite(1).await.unwrap();
    store.remove_favorite(99).await.unwrap();

    let expected: HashSet<_> = [2, 3].into_iter().collect();
    assert_eq!(*store.observe_favorites().borrow(), expected);

    let record = read_record(&path);
    assert_eq!(record.favorites.into_iter().collect::<Vec<_>>(), vec![2, 3]);

    store.clear_favorites().await.unwrap();
    assert!(store.observe_favorites().borrow().is_empty());
    assert!(read_record(&path).favorites.is_empty());
}

#[tokio::test]
async fn observers_are_notified_after_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFavoritesStore::open(dir.path().join("favorites.json")).unwrap();
    let mut observer = store.observe_favorites();

    store.add_favorite(7).await.unwrap();
    assert!(observer.has_changed().unwrap());
    assert!(observer.borrow_and_update().contains(&7));

    store.add_favorite(7).await.unwrap();
    assert!(!observer.has_changed().unwrap(), "no-op writes are not published");
}

#[tokio::test]
async fn reopening_restores_favorites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");

    {
        let store = JsonFavoritesStore::open(&path).unwrap();
        store.add_favorite(10).await.unwrap();
        store.add_favorite(20).await.unwrap();
    }

    let store = JsonFavoritesStore::open(&path).unwrap();
    let expected: HashSet<_> = [10, 20].into_iter().collect();
    assert_eq!(*store.observe_favorites().borrow(), expected);
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn corrupt_file_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonFavoritesStore::open(&path).unwrap_err();
    assert!(matches!(err, CitySearchError::Storage(_)));
}

#[tokio::test]
async fn failed_write_leaves_set_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let store = JsonFavoritesStore::open(&path).unwrap();
    store.add_favorite(1).await.unwrap();

    // a directory where the temp file should go makes the write fail
    std::fs::create_dir(path.with_extension("tmp")).unwrap();

    let err = store.add_favorite(2).await.unwrap_err();
    assert!(matches!(err, CitySearchError::Persist(_)));

    let expected: HashSet<_> = [1].into_iter().collect();
    assert_eq!(*store.observe_favorites().borrow(), expected);
    assert_eq!(read_record(&path).favorites.into_iter().collect::<Vec<_>>(), vec![1]);
}
