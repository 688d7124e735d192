//! Client for the REST key-value backend. One JSON-encoded list per date,
//! stored under `planfletes:<date>`.

use crate::errors::StoreError;
use crate::models::{DayPlan, StoredRow, rows_into_plan};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

pub const KEY_PREFIX: &str = "planfletes:";

#[derive(Debug, Deserialize)]
struct KvResult<T> {
    result: Option<T>,
}

#[derive(Debug, Serialize)]
struct SetBody<'a> {
    value: &'a str,
}

#[derive(Clone)]
pub struct KvClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl KvClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn key(date: &str) -> String {
        format!("{KEY_PREFIX}{date}")
    }

    /// Raw stored string for `date`, `None` when the key was never written.
    pub async fn get_raw(&self, date: &str) -> Result<Option<String>, StoreError> {
        let url = format!("{}/get/{}", self.base_url, Self::key(date));
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Upstream(response.status()));
        }
        let body: KvResult<Value> = response.json().await?;
        Ok(match body.result {
            Some(Value::String(raw)) => Some(raw),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
    }

    /// Stored list for `date`. Never-written keys and unparseable values are
    /// both treated as "nothing stored".
    pub async fn load(&self, date: &str) -> Result<Option<DayPlan>, StoreError> {
        let Some(raw) = self.get_raw(date).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<Vec<StoredRow>>(&raw) {
            Ok(rows) => Ok(Some(rows_into_plan(rows))),
            Err(err) => {
                warn!(date, "ignoring malformed stored value: {err}");
                Ok(None)
            }
        }
    }

    pub async fn get(&self, date: &str) -> Result<DayPlan, StoreError> {
        Ok(self.load(date).await?.unwrap_or_default())
    }

    pub async fn set(&self, date: &str, list: &DayPlan) -> Result<(), StoreError> {
        let value = serde_json::to_string(list)?;
        let url = format!("{}/set/{}", self.base_url, Self::key(date));
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&SetBody { value: &value })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::Upstream(response.status()));
        }
        debug!(date, records = list.len(), "stored day");
        Ok(())
    }

    /// Dates with a stored list whose key starts with `planfletes:<prefix>`.
    pub async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let url = format!("{}/keys/{}{}*", self.base_url, KEY_PREFIX, prefix);
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Upstream(response.status()));
        }
        let body: KvResult<Vec<String>> = response.json().await?;
        Ok(body
            .result
            .unwrap_or_default()
            .into_iter()
            .filter_map(|key| key.strip_prefix(KEY_PREFIX).map(str::to_string))
            .collect())
    }
}
