//! Settings store interface

use async_trait::async_trait;
use werkstatt_errors::AppResult;

use crate::domain::entities::Setting;

/// Settings store interface. `set` and `set_blob` upsert on the key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingRepository: Send + Sync {
    /// Read one entry
    async fn get(&self, key: &str) -> AppResult<Option<Setting>>;

    /// Write one entry, inserting or overwriting
    async fn set(&self, setting: &Setting) -> AppResult<()>;

    /// Read the binary payload stored under a key
    async fn get_blob(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Write a binary payload, inserting or overwriting
    async fn set_blob(&self, key: &str, payload: &[u8]) -> AppResult<()>;

    /// All text entries, ordered by key
    async fn list(&self) -> AppResult<Vec<Setting>>;
}
