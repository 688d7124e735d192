use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One client's delivery plan for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client: String,
    pub planned: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ticks: Vec<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

impl DeliveryRecord {
    pub fn blank() -> Self {
        Self {
            id: new_record_id(),
            client: String::new(),
            planned: 1,
            ticks: vec![false],
            notes: String::new(),
        }
    }
}

pub type DayPlan = Vec<DeliveryRecord>;

/// Every stored day, keyed by `YYYY-MM-DD`. Serialized as a flat JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct AppData {
    pub days: BTreeMap<String, DayPlan>,
}

/// A row as found in storage or on the wire. Older writers stored `{name, done}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredRow {
    Record(DeliveryRecord),
    Legacy {
        name: String,
        #[serde(default)]
        done: bool,
    },
    Draft {
        #[serde(default)]
        id: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        client: String,
        #[serde(default)]
        planned: Option<u32>,
        #[serde(default, deserialize_with = "null_as_default")]
        ticks: Vec<bool>,
        #[serde(default, deserialize_with = "null_as_default")]
        notes: String,
    },
}

impl From<StoredRow> for DeliveryRecord {
    fn from(row: StoredRow) -> Self {
        match row {
            StoredRow::Record(record) => record,
            StoredRow::Draft {
                id,
                client,
                planned,
                ticks,
                notes,
            } => DeliveryRecord {
                id: id
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(new_record_id),
                planned: planned.unwrap_or(ticks.len() as u32),
                client,
                ticks,
                notes,
            },
            StoredRow::Legacy { name, done } => DeliveryRecord {
                id: new_record_id(),
                client: name,
                planned: 1,
                ticks: vec![done],
                notes: String::new(),
            },
        }
    }
}

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn rows_into_plan(rows: Vec<StoredRow>) -> DayPlan {
    rows.into_iter().map(DeliveryRecord::from).collect()
}

pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotals {
    pub planned: u64,
    pub delivered: u64,
    pub remaining: u64,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    pub date: String,
    pub list: DayPlan,
    pub totals: DayTotals,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Write body for `/api/day`: either `{list: [...]}` or the bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SaveDayRequest {
    Wrapped {
        #[serde(default)]
        list: Option<Vec<StoredRow>>,
    },
    Bare(Vec<StoredRow>),
}

impl SaveDayRequest {
    pub fn into_plan(self) -> DayPlan {
        let rows = match self {
            SaveDayRequest::Wrapped { list } => list.unwrap_or_default(),
            SaveDayRequest::Bare(rows) => rows,
        };
        rows_into_plan(rows)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPatch {
    pub client: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlannedRequest {
    #[serde(default)]
    pub planned: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct DuplicateRequest {
    pub from: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub date: String,
    pub candidates: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_rows_become_single_delivery_records() {
        let rows: Vec<StoredRow> =
            serde_json::from_str(r#"[{"name":"Panedile","done":true},{"name":"Acme"}]"#).unwrap();
        let plan = rows_into_plan(rows);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].client, "Panedile");
        assert_eq!(plan[0].planned, 1);
        assert_eq!(plan[0].ticks, vec![true]);
        assert_eq!(plan[1].ticks, vec![false]);
        assert_ne!(plan[0].id, plan[1].id);
    }

    #[test]
    fn current_rows_keep_their_id() {
        let rows: Vec<StoredRow> = serde_json::from_str(
            r#"[{"id":"abc","client":"A","planned":2,"ticks":[true,false],"notes":"n"}]"#,
        )
        .unwrap();
        let plan = rows_into_plan(rows);

        assert_eq!(plan[0].id, "abc");
        assert_eq!(plan[0].ticks, vec![true, false]);
        assert_eq!(plan[0].notes, "n");
    }

    #[test]
    fn null_text_fields_read_as_empty() {
        let rows: Vec<StoredRow> = serde_json::from_str(
            r#"[{"id":"a","client":null,"planned":1,"ticks":[true],"notes":null},
                {"id":"b","client":"B","planned":2,"ticks":null,"notes":"x"}]"#,
        )
        .unwrap();
        let plan = rows_into_plan(rows);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].id, "a");
        assert_eq!(plan[0].client, "");
        assert_eq!(plan[0].notes, "");
        assert_eq!(plan[0].ticks, vec![true]);
        assert_eq!(plan[1].id, "b");
        assert!(plan[1].ticks.is_empty());
    }

    #[test]
    fn rows_without_planned_keep_id_and_ticks() {
        let rows: Vec<StoredRow> =
            serde_json::from_str(r#"[{"id":"keep-me","client":"A","ticks":[true]}]"#).unwrap();
        let plan = rows_into_plan(rows);

        assert_eq!(plan[0].id, "keep-me");
        assert_eq!(plan[0].planned, 1);
        assert_eq!(plan[0].ticks, vec![true]);
        assert_eq!(crate::plan::normalize(plan.clone()), plan);
    }

    #[test]
    fn rows_without_id_get_a_fresh_one() {
        let rows: Vec<StoredRow> =
            serde_json::from_str(r#"[{"client":"A","planned":2}]"#).unwrap();
        let plan = rows_into_plan(rows);

        assert!(!plan[0].id.is_empty());
        assert_eq!(plan[0].planned, 2);
    }

    #[test]
    fn save_request_accepts_wrapped_and_bare_lists() {
        let wrapped: SaveDayRequest =
            serde_json::from_str(r#"{"list":[{"id":"x","planned":0}]}"#).unwrap();
        assert_eq!(wrapped.into_plan().len(), 1);

        let bare: SaveDayRequest = serde_json::from_str(r#"[{"id":"x","planned":0}]"#).unwrap();
        assert_eq!(bare.into_plan()[0].id, "x");

        let empty: SaveDayRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.into_plan().is_empty());
    }

    #[test]
    fn app_data_serializes_as_flat_date_map() {
        let mut data = AppData::default();
        data.days.insert("2024-01-05".to_string(), Vec::new());
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"2024-01-05":[]}"#);
    }
}
