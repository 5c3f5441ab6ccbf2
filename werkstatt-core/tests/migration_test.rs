use std::path::PathBuf;

use uuid::Uuid;
use werkstatt_config::DatabaseConfig;
use werkstatt_core::domain::entities::Setting;
use werkstatt_core::domain::repositories::SettingRepository;
use werkstatt_core::infrastructure::persistence::{
    database, MigrationManager, SqliteSettingRepository,
};

fn temp_db_path() -> PathBuf {
    std::env::temp_dir().join(format!("werkstatt-test-{}.db", Uuid::new_v4()))
}

fn file_config(path: &PathBuf) -> DatabaseConfig {
    DatabaseConfig {
        path: path.display().to_string(),
        max_connections: 1,
    }
}

#[tokio::test]
async fn test_fresh_file_gets_full_schema() {
    let path = temp_db_path();
    let pool = database::open(&file_config(&path))
        .await
        .expect("Failed to open database");

    let manager = MigrationManager::new(pool.clone());
    let version = manager
        .current_version()
        .await
        .expect("Failed to read schema version");
    assert_eq!(version, 5);

    let tables: Vec<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(&pool)
            .await
            .expect("Failed to list tables");
    let names: Vec<&str> = tables.iter().map(|(name,)| name.as_str()).collect();
    for expected in [
        "customers",
        "expenses",
        "invoice_lines",
        "invoices",
        "order_lines",
        "orders",
        "parts",
        "settings",
        "stock_movements",
        "vehicles",
    ] {
        assert!(names.contains(&expected), "missing table {}", expected);
    }

    pool.close().await;
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_reopen_applies_nothing_and_keeps_data() {
    let path = temp_db_path();

    // First open: full migration run, then one write
    let pool = database::open(&file_config(&path))
        .await
        .expect("Failed to open database");
    let repo = SqliteSettingRepository::new(pool.clone());
    repo.set(&Setting::new("company_name", "Garage Keller GmbH"))
        .await
        .expect("Failed to write setting");
    pool.close().await;

    // Second open: same file, nothing to migrate, data still there
    let pool = database::open(&file_config(&path))
        .await
        .expect("Failed to reopen database");

    let manager = MigrationManager::new(pool.clone());
    let applied = manager.run().await.expect("Failed to run migrations");
    assert_eq!(applied, 0);

    let repo = SqliteSettingRepository::new(pool.clone());
    let stored = repo
        .get("company_name")
        .await
        .expect("Failed to read setting")
        .expect("Setting lost on reopen");
    assert_eq!(stored.value, "Garage Keller GmbH");

    pool.close().await;
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_in_memory_databases_are_isolated() {
    let first = database::in_memory()
        .await
        .expect("Failed to open in-memory database");
    let second = database::in_memory()
        .await
        .expect("Failed to open in-memory database");

    let repo = SqliteSettingRepository::new(first.clone());
    repo.set(&Setting::new("company_name", "Garage Keller GmbH"))
        .await
        .expect("Failed to write setting");

    let other = SqliteSettingRepository::new(second.clone());
    let missing = other
        .get("company_name")
        .await
        .expect("Failed to read setting");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_in_memory_data_survives_pool_idle() {
    let pool = database::in_memory()
        .await
        .expect("Failed to open in-memory database");

    let repo = SqliteSettingRepository::new(pool.clone());
    repo.set(&Setting::new("company_name", "Garage Keller GmbH"))
        .await
        .expect("Failed to write setting");

    // Several checkouts later the same connection must still serve the data
    for _ in 0..5 {
        let stored = repo
            .get("company_name")
            .await
            .expect("Failed to read setting")
            .expect("Setting lost between checkouts");
        assert_eq!(stored.value, "Garage Keller GmbH");
    }
}
