use crate::errors::StoreError;
use crate::models::{AppData, DayPlan};
use crate::store::DayStore;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error};

/// Keeps every day in memory and rewrites the whole file on each change.
pub struct LocalStore {
    data_path: PathBuf,
    data: Mutex<AppData>,
}

impl LocalStore {
    pub async fn open(data_path: PathBuf) -> Self {
        let data = load_data(&data_path).await;
        Self::with_data(data_path, data)
    }

    pub fn with_data(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Mutex::new(data),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

#[async_trait]
impl DayStore for LocalStore {
    async fn load_day(&self, date: &str) -> Result<Option<DayPlan>, StoreError> {
        let data = self.data.lock().await;
        Ok(data.days.get(date).cloned())
    }

    async fn set_day(&self, date: &str, list: DayPlan) -> Result<(), StoreError> {
        let mut data = self.data.lock().await;
        let records = list.len();
        let mut next = data.clone();
        next.days.insert(date.to_string(), list);
        persist_data(&self.data_path, &next).await?;
        *data = next;
        debug!(date, records, "saved day to data file");
        Ok(())
    }

    async fn dates_with_prefix(&self, prefix: &str) -> Result<BTreeSet<String>, StoreError> {
        let data = self.data.lock().await;
        Ok(data
            .days
            .keys()
            .filter(|date| date.starts_with(prefix))
            .cloned()
            .collect())
    }
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeliveryRecord;

    fn unique_data_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("plan_fletes_{tag}_{}_{nanos}.json", std::process::id()));
        path
    }

    fn sample() -> DayPlan {
        vec![DeliveryRecord {
            id: "r1".to_string(),
            client: "Acme".to_string(),
            planned: 1,
            ticks: vec![true],
            notes: String::new(),
        }]
    }

    #[tokio::test]
    async fn saved_days_survive_reopen() {
        let path = unique_data_path("reopen");
        let store = LocalStore::open(path.clone()).await;
        store.set_day("2024-03-01", sample()).await.unwrap();

        let reopened = LocalStore::open(path.clone()).await;
        assert_eq!(reopened.get_day("2024-03-01").await.unwrap(), sample());
        assert!(reopened.get_day("2024-03-02").await.unwrap().is_empty());

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn corrupt_file_starts_empty() {
        let path = unique_data_path("corrupt");
        std::fs::write(&path, b"not json").unwrap();

        let store = LocalStore::open(path.clone()).await;
        assert!(store.load_day("2024-03-01").await.unwrap().is_none());

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_untouched() {
        let blocker = unique_data_path("blocker");
        std::fs::write(&blocker, b"file, not a directory").unwrap();
        let store = LocalStore::with_data(blocker.join("planner.json"), AppData::default());

        assert!(store.set_day("2024-03-01", sample()).await.is_err());
        assert!(store.load_day("2024-03-01").await.unwrap().is_none());

        let _ = std::fs::remove_file(blocker);
    }

    #[tokio::test]
    async fn prefix_lookup_only_matches_stored_dates() {
        let store = LocalStore::with_data(unique_data_path("prefix"), AppData::default());
        store.set_day("2024-03-01", Vec::new()).await.unwrap();
        store.set_day("2024-03-09", sample()).await.unwrap();
        store.set_day("2024-04-01", sample()).await.unwrap();

        let dates = store.dates_with_prefix("2024-03").await.unwrap();
        assert_eq!(
            dates.into_iter().collect::<Vec<_>>(),
            vec!["2024-03-01".to_string(), "2024-03-09".to_string()]
        );

        let _ = std::fs::remove_file(store.data_path());
    }
}
