//! Duplicate-dish collapsing.
//!
//! Independent ingestion paths can produce several records for one logical
//! dish. Records are grouped by trimmed, lower-cased name and exactly one
//! survivor per group is kept; fields are never merged.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::types::{DishRecord, HasDish};

/// Grouping key for a dish name.
pub fn dedup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Keep one record per distinct dish name.
///
/// The survivor is the record with the latest `updated_at`. Records without
/// a timestamp never displace one that has it, and among equally recent (or
/// undated) records the first encountered wins. Output order is the order in
/// which each name was first seen.
pub fn deduplicate<T: HasDish>(items: Vec<T>) -> Vec<T> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut survivors: Vec<T> = Vec::with_capacity(items.len());

    for item in items {
        match slots.entry(dedup_key(&item.dish().name)) {
            Entry::Occupied(slot) => {
                let current = &mut survivors[*slot.get()];
                if is_more_recent(item.dish(), current.dish()) {
                    log::debug!(
                        "dedup: '{}' ({}) replaces {}",
                        item.dish().name,
                        item.dish().id,
                        current.dish().id
                    );
                    *current = item;
                } else {
                    log::debug!(
                        "dedup: dropping '{}' ({}) in favour of {}",
                        item.dish().name,
                        item.dish().id,
                        current.dish().id
                    );
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(survivors.len());
                survivors.push(item);
            }
        }
    }

    survivors
}

fn is_more_recent(candidate: &DishRecord, current: &DishRecord) -> bool {
    match (candidate.updated_at, current.updated_at) {
        (Some(candidate_at), Some(current_at)) => candidate_at > current_at,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn dish(id: &str, name: &str, updated_day: Option<u32>) -> DishRecord {
        DishRecord {
            updated_at: updated_day.map(|d| Utc.with_ymd_and_hms(2025, 1, d, 9, 0, 0).unwrap()),
            ..DishRecord::new(id, name)
        }
    }

    fn ids(dishes: &[DishRecord]) -> Vec<&str> {
        dishes.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn key_ignores_case_and_surrounding_whitespace() {
        assert_eq!(dedup_key("  Eggs Benedict "), dedup_key("eggs benedict"));
        assert_ne!(dedup_key("Eggs Benedict"), dedup_key("Eggs  Benedict"));
    }

    #[test]
    fn distinct_names_pass_through_in_order() {
        let out = deduplicate(vec![
            dish("1", "Latte", None),
            dish("2", "Mocha", None),
            dish("3", "Chai", None),
        ]);
        assert_eq!(ids(&out), vec!["1", "2", "3"]);
    }

    #[test]
    fn most_recently_updated_survives() {
        let out = deduplicate(vec![
            dish("old", "Latte", Some(1)),
            dish("other", "Mocha", None),
            dish("new", " latte ", Some(5)),
        ]);
        // survivor takes the slot of the first occurrence
        assert_eq!(ids(&out), vec!["new", "other"]);
    }

    #[test]
    fn undated_duplicates_keep_first_encountered() {
        let out = deduplicate(vec![dish("a", "Toast", None), dish("b", "TOAST", None)]);
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn dated_record_beats_undated() {
        let out = deduplicate(vec![dish("a", "Toast", None), dish("b", "toast", Some(2))]);
        assert_eq!(ids(&out), vec!["b"]);

        let out = deduplicate(vec![dish("a", "Toast", Some(2)), dish("b", "toast", None)]);
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn equal_timestamps_keep_first_encountered() {
        let out = deduplicate(vec![dish("a", "Soup", Some(3)), dish("b", "soup", Some(3))]);
        assert_eq!(ids(&out), vec!["a"]);
    }

    #[test]
    fn empty_input() {
        assert!(deduplicate::<DishRecord>(Vec::new()).is_empty());
    }
}
