mod common;

use cinematika::db::Store;
use common::test_config;
use std::collections::HashSet;

const CONCURRENT_LOGINS: u32 = 8;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_logins_share_one_token() {
    let path = std::env::temp_dir().join(format!("cinematika-{}.db", uuid::Uuid::new_v4()));
    let db_url = format!("sqlite:{}?mode=rwc", path.display());

    let store = Store::with_pool_options(&db_url, CONCURRENT_LOGINS, 1)
        .await
        .expect("Failed to open file-backed store");
    let user = store
        .create_user("director", "secret", &test_config().security)
        .await
        .unwrap();

    let handles: Vec<_> = (0..CONCURRENT_LOGINS)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.ensure_user_token(user.id).await })
        })
        .collect();

    let mut keys = HashSet::new();
    for handle in handles {
        keys.insert(handle.await.unwrap().unwrap());
    }

    assert_eq!(keys.len(), 1, "{keys:?}");
    let key = keys.into_iter().next().unwrap();
    assert_eq!(key.len(), 40);
    assert_eq!(store.ensure_user_token(user.id).await.unwrap(), key);

    store.conn.close().await.ok();
    for suffix in ["", "-wal", "-shm"] {
        std::fs::remove_file(format!("{}{suffix}", path.display())).ok();
    }
}
