//! Pure list transformations over a day's records.
//!
//! Every function takes the current list and returns the replacement list; the
//! caller writes the result back as a whole.

use crate::models::{DayPlan, DayTotals, DeliveryRecord, RecordPatch, new_record_id};
use serde_json::Value;

pub fn delivered(record: &DeliveryRecord) -> u64 {
    record.ticks.iter().filter(|tick| **tick).count() as u64
}

pub fn remaining(record: &DeliveryRecord) -> u64 {
    u64::from(record.planned).saturating_sub(delivered(record))
}

pub fn day_totals(list: &[DeliveryRecord]) -> DayTotals {
    let planned = list.iter().map(|record| u64::from(record.planned)).sum::<u64>();
    let delivered = list.iter().map(delivered).sum::<u64>();
    DayTotals {
        planned,
        delivered,
        remaining: planned.saturating_sub(delivered),
    }
}

/// Parses a loosely typed planned count: numbers are floored, numeric strings
/// are accepted, anything else is 0. Negative values clamp to 0 and values
/// past `u32::MAX` saturate.
pub fn clamp_planned(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.floor() as u32
}

fn resize_ticks(ticks: &mut Vec<bool>, planned: u32) {
    ticks.resize(planned as usize, false);
}

pub fn add_record(list: &[DeliveryRecord]) -> DayPlan {
    let mut next = list.to_vec();
    next.push(DeliveryRecord::blank());
    next
}

pub fn remove_record(list: &[DeliveryRecord], id: &str) -> DayPlan {
    list.iter().filter(|record| record.id != id).cloned().collect()
}

pub fn update_fields(list: &[DeliveryRecord], id: &str, patch: &RecordPatch) -> DayPlan {
    list.iter()
        .map(|record| {
            if record.id != id {
                return record.clone();
            }
            let mut record = record.clone();
            if let Some(client) = &patch.client {
                record.client = client.clone();
            }
            if let Some(notes) = &patch.notes {
                record.notes = notes.clone();
            }
            record
        })
        .collect()
}

/// Truncation discards delivered state past the new count; it is not
/// restored if the count grows again.
pub fn set_planned(list: &[DeliveryRecord], id: &str, planned: u32) -> DayPlan {
    list.iter()
        .map(|record| {
            if record.id != id {
                return record.clone();
            }
            let mut record = record.clone();
            record.planned = planned;
            resize_ticks(&mut record.ticks, planned);
            record
        })
        .collect()
}

/// Flips one tick. Indices past the end leave the record untouched; callers
/// are expected to check with [`tick_in_range`] first.
pub fn toggle_tick(list: &[DeliveryRecord], id: &str, index: usize) -> DayPlan {
    list.iter()
        .map(|record| {
            if record.id != id {
                return record.clone();
            }
            let mut record = record.clone();
            if let Some(tick) = record.ticks.get_mut(index) {
                *tick = !*tick;
            }
            record
        })
        .collect()
}

pub fn tick_in_range(list: &[DeliveryRecord], id: &str, index: usize) -> bool {
    list.iter()
        .find(|record| record.id == id)
        .is_some_and(|record| index < record.ticks.len())
}

/// Copies a day for reuse: fresh ids, every tick cleared, everything else kept.
pub fn duplicate_list(source: &[DeliveryRecord]) -> DayPlan {
    source
        .iter()
        .map(|record| DeliveryRecord {
            id: new_record_id(),
            client: record.client.clone(),
            planned: record.planned,
            ticks: vec![false; record.planned as usize],
            notes: record.notes.clone(),
        })
        .collect()
}

/// Restores `len(ticks) == planned` and fills in missing ids on externally
/// supplied lists.
pub fn normalize(list: DayPlan) -> DayPlan {
    list.into_iter()
        .map(|mut record| {
            if record.id.trim().is_empty() {
                record.id = new_record_id();
            }
            resize_ticks(&mut record.ticks, record.planned);
            record
        })
        .collect()
}

/// Dates sharing `current`'s year-month, excluding `current`, newest first.
pub fn same_month_candidates<I>(dates: I, current: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let prefix = month_prefix(current);
    let mut candidates: Vec<String> = dates
        .into_iter()
        .filter(|date| date.starts_with(prefix) && date != current)
        .collect();
    candidates.sort_unstable_by(|a, b| b.cmp(a));
    candidates.dedup();
    candidates
}

pub fn month_prefix(date: &str) -> &str {
    date.get(..7).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, client: &str, ticks: &[bool]) -> DeliveryRecord {
        DeliveryRecord {
            id: id.to_string(),
            client: client.to_string(),
            planned: ticks.len() as u32,
            ticks: ticks.to_vec(),
            notes: String::new(),
        }
    }

    #[test]
    fn add_record_appends_one_pending_delivery() {
        let list = add_record(&[record("a", "A", &[true])]);
        assert_eq!(list.len(), 2);
        let added = &list[1];
        assert_eq!(added.planned, 1);
        assert_eq!(added.ticks, vec![false]);
        assert!(added.client.is_empty());
        assert!(added.notes.is_empty());
        assert_ne!(added.id, "a");
    }

    #[test]
    fn remove_record_ignores_unknown_ids() {
        let list = vec![record("a", "A", &[false]), record("b", "B", &[true])];
        assert_eq!(remove_record(&list, "zzz"), list);
        let removed = remove_record(&list, "a");
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, "b");
    }

    #[test]
    fn update_fields_merges_only_given_fields() {
        let list = vec![record("a", "A", &[false])];
        let patch = RecordPatch {
            client: None,
            notes: Some("obra norte".to_string()),
        };
        let updated = update_fields(&list, "a", &patch);
        assert_eq!(updated[0].client, "A");
        assert_eq!(updated[0].notes, "obra norte");
    }

    #[test]
    fn set_planned_keeps_ticks_in_step_with_count() {
        let list = vec![record("a", "A", &[true, false, true])];
        for planned in [0u32, 1, 2, 3, 5, 8] {
            let next = set_planned(&list, "a", planned);
            assert_eq!(next[0].ticks.len(), planned as usize);
            assert_eq!(next[0].planned, planned);
            let kept = planned.min(3) as usize;
            assert_eq!(next[0].ticks[..kept], list[0].ticks[..kept]);
            assert!(next[0].ticks[kept..].iter().all(|tick| !tick));
        }
    }

    #[test]
    fn set_planned_has_no_upper_cap() {
        let list = vec![record("a", "A", &[true])];
        let next = set_planned(&list, "a", clamp_planned(&json!(1500)));
        assert_eq!(next[0].planned, 1500);
        assert_eq!(next[0].ticks.len(), 1500);
        assert!(next[0].ticks[0]);

        let mut big = record("b", "B", &[]);
        big.planned = 1500;
        assert_eq!(normalize(vec![big])[0].ticks.len(), 1500);
    }

    #[test]
    fn set_planned_through_zero_drops_tick_state() {
        let list = vec![record("a", "A", &[true, true])];
        let cleared = set_planned(&list, "a", 0);
        let regrown = set_planned(&cleared, "a", 2);
        assert_eq!(regrown[0].ticks, vec![false, false]);
    }

    #[test]
    fn clamp_planned_floors_and_rejects_garbage() {
        assert_eq!(clamp_planned(&json!(3)), 3);
        assert_eq!(clamp_planned(&json!(2.9)), 2);
        assert_eq!(clamp_planned(&json!(-4)), 0);
        assert_eq!(clamp_planned(&json!("7")), 7);
        assert_eq!(clamp_planned(&json!("abc")), 0);
        assert_eq!(clamp_planned(&json!(null)), 0);
        assert_eq!(clamp_planned(&json!(1500)), 1500);
        assert_eq!(clamp_planned(&json!(1e12)), u32::MAX);
    }

    #[test]
    fn toggle_tick_flips_only_the_target() {
        let list = vec![record("a", "A", &[false, false]), record("b", "B", &[false])];
        let next = toggle_tick(&list, "a", 1);
        assert_eq!(next[0].ticks, vec![false, true]);
        assert_eq!(next[1].ticks, vec![false]);
        assert_eq!(toggle_tick(&next, "a", 1)[0].ticks, vec![false, false]);
        assert!(tick_in_range(&list, "a", 1));
        assert!(!tick_in_range(&list, "a", 2));
        assert!(!tick_in_range(&list, "missing", 0));
    }

    #[test]
    fn counts_add_up_and_never_underflow() {
        let ok = record("a", "A", &[true, false, false]);
        assert_eq!(delivered(&ok) + remaining(&ok), u64::from(ok.planned));

        let mut inconsistent = record("b", "B", &[true, true, true]);
        inconsistent.planned = 1;
        assert_eq!(delivered(&inconsistent), 3);
        assert_eq!(remaining(&inconsistent), 0);
    }

    #[test]
    fn totals_are_pointwise_sums() {
        let list = vec![
            record("a", "A", &[true, false, true]),
            record("b", "B", &[false]),
            record("c", "C", &[]),
        ];
        let totals = day_totals(&list);
        assert_eq!(totals.planned, 4);
        assert_eq!(totals.delivered, 2);
        assert_eq!(totals.remaining, 2);
        assert_eq!(day_totals(&[]), DayTotals::default());
    }

    #[test]
    fn duplicate_resets_ticks_and_ids() {
        let mut source = record("a", "A", &[true, true, false]);
        source.notes = "patente AB123".to_string();
        let copy = duplicate_list(&[source.clone()]);
        assert_eq!(copy.len(), 1);
        assert_eq!(copy[0].client, "A");
        assert_eq!(copy[0].planned, 3);
        assert_eq!(copy[0].ticks, vec![false, false, false]);
        assert_eq!(copy[0].notes, source.notes);
        assert_ne!(copy[0].id, source.id);
    }

    #[test]
    fn normalize_repairs_tick_length_and_ids() {
        let mut short = record("", "A", &[true]);
        short.planned = 3;
        let mut long = record("b", "B", &[true, true, true]);
        long.planned = 1;
        let fixed = normalize(vec![short, long]);
        assert_eq!(fixed[0].ticks, vec![true, false, false]);
        assert!(!fixed[0].id.is_empty());
        assert_eq!(fixed[1].ticks, vec![true]);
    }

    #[test]
    fn candidates_are_same_month_newest_first() {
        let dates = ["2024-01-02", "2024-01-20", "2024-02-01", "2024-01-15", "2023-12-31"]
            .into_iter()
            .map(String::from);
        assert_eq!(
            same_month_candidates(dates, "2024-01-15"),
            vec!["2024-01-20".to_string(), "2024-01-02".to_string()]
        );
    }
}
