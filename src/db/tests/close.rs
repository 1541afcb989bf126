use crate::db::*;
use tempfile::NamedTempFile;

/// Verify that querying the database after closing the pool returns an error
/// rather than hanging or panicking.
#[tokio::test]
async fn test_find_asset_after_pool_close_returns_error() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.insert_asset(&super::new_asset("assets", "home.svg"))
        .await
        .unwrap();

    db.pool().close().await;

    let result = db.find_asset("assets", "home.svg").await;
    assert!(
        result.is_err(),
        "find_asset after pool close should return an error, got: {:?}",
        result
    );
}

/// Verify that inserting an asset after closing the pool returns an error
#[tokio::test]
async fn test_insert_asset_after_pool_close_returns_error() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.pool().close().await;

    let result = db.insert_asset(&super::new_asset("assets", "home.svg")).await;
    assert!(
        result.is_err(),
        "insert_asset after pool close should return an error, got: {:?}",
        result
    );
}
