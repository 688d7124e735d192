//! The planning store: the only way day plans are read or replaced.

use crate::errors::StoreError;
use crate::kv::KvClient;
use crate::models::{DayPlan, DeliveryRecord, RecordPatch};
use crate::plan;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// A backend holding one list of records per date.
#[async_trait]
pub trait DayStore: Send + Sync {
    /// `None` when nothing was ever stored for `date`.
    async fn load_day(&self, date: &str) -> Result<Option<DayPlan>, StoreError>;

    /// Replaces the whole list for `date`.
    async fn set_day(&self, date: &str, list: DayPlan) -> Result<(), StoreError>;

    async fn dates_with_prefix(&self, prefix: &str) -> Result<BTreeSet<String>, StoreError>;

    async fn get_day(&self, date: &str) -> Result<DayPlan, StoreError> {
        Ok(self.load_day(date).await?.unwrap_or_default())
    }
}

#[async_trait]
impl DayStore for KvClient {
    async fn load_day(&self, date: &str) -> Result<Option<DayPlan>, StoreError> {
        self.load(date).await
    }

    async fn set_day(&self, date: &str, list: DayPlan) -> Result<(), StoreError> {
        self.set(date, &list).await
    }

    async fn dates_with_prefix(&self, prefix: &str) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.keys(prefix).await?.into_iter().collect())
    }
}

/// Record-level operations on top of a [`DayStore`]. Each one reads the day,
/// builds the new list and writes it back whole. Mutations from this process
/// are serialized; writers elsewhere are not coordinated with.
#[derive(Clone)]
pub struct PlanningStore {
    backend: Arc<dyn DayStore>,
    write_lock: Arc<Mutex<()>>,
}

impl PlanningStore {
    pub fn new(backend: Arc<dyn DayStore>) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn get_day(&self, date: &str) -> Result<DayPlan, StoreError> {
        self.backend.get_day(date).await
    }

    pub async fn set_day(&self, date: &str, list: DayPlan) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.backend.set_day(date, list).await
    }

    pub async fn list_dates_with_prefix(
        &self,
        prefix: &str,
    ) -> Result<BTreeSet<String>, StoreError> {
        self.backend.dates_with_prefix(prefix).await
    }

    async fn update_day<F>(&self, date: &str, apply: F) -> Result<DayPlan, StoreError>
    where
        F: FnOnce(&[DeliveryRecord]) -> DayPlan + Send,
    {
        let _guard = self.write_lock.lock().await;
        let current = self.backend.get_day(date).await?;
        let next = apply(&current);
        self.backend.set_day(date, next.clone()).await?;
        Ok(next)
    }

    pub async fn add_record(&self, date: &str) -> Result<DayPlan, StoreError> {
        self.update_day(date, plan::add_record).await
    }

    pub async fn remove_record(&self, date: &str, id: &str) -> Result<DayPlan, StoreError> {
        self.update_day(date, |list| plan::remove_record(list, id))
            .await
    }

    pub async fn update_fields(
        &self,
        date: &str,
        id: &str,
        patch: &RecordPatch,
    ) -> Result<DayPlan, StoreError> {
        self.update_day(date, |list| plan::update_fields(list, id, patch))
            .await
    }

    pub async fn set_planned(
        &self,
        date: &str,
        id: &str,
        planned: u32,
    ) -> Result<DayPlan, StoreError> {
        self.update_day(date, |list| plan::set_planned(list, id, planned))
            .await
    }

    /// Returns `None` without writing when `index` is not a tick of `id`.
    pub async fn toggle_tick(
        &self,
        date: &str,
        id: &str,
        index: usize,
    ) -> Result<Option<DayPlan>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let current = self.backend.get_day(date).await?;
        if !plan::tick_in_range(&current, id, index) {
            return Ok(None);
        }
        let next = plan::toggle_tick(&current, id, index);
        self.backend.set_day(date, next.clone()).await?;
        Ok(Some(next))
    }

    /// Replaces `date` with a tick-free copy of `source`. Returns `None`
    /// without writing when `source` has nothing stored.
    pub async fn duplicate_from(
        &self,
        date: &str,
        source: &str,
    ) -> Result<Option<DayPlan>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let Some(source_list) = self.backend.load_day(source).await? else {
            return Ok(None);
        };
        let copy = plan::duplicate_list(&source_list);
        self.backend.set_day(date, copy.clone()).await?;
        info!(date, source, records = copy.len(), "duplicated day plan");
        Ok(Some(copy))
    }

    pub async fn duplicate_candidates(&self, date: &str) -> Result<Vec<String>, StoreError> {
        let dates = self
            .list_dates_with_prefix(plan::month_prefix(date))
            .await?;
        Ok(plan::same_month_candidates(dates, date))
    }
}
