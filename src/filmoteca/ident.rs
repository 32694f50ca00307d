//! Identifier maintenance for the two catalog generations.
//!
//! The legacy layout keeps a gapless `1..N` integer sequence in column 0 and
//! closes the gap after every delete by shifting later ids down. The current
//! layout keys rows on the IMDb const, which may legitimately repeat, so a
//! delete removes every match and renumbers nothing.
//!
//! `remove_and_reindex` assumes the id space is already contiguous before the
//! call. That precondition is deliberately not checked: the shift-by-count
//! arithmetic is what the catalog has always used, and its behavior on a
//! hand-edited file with gaps or duplicates is preserved as-is.

use crate::model::Record;

/// Which identity strategy applies to a catalog instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScheme {
    ContiguousNumeric,
    NaturalKey,
}

/// Counts reported after a delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub removed: usize,
    pub updated: usize,
}

/// Next id for a new row: `max + 1` over every parseable column-0 value,
/// or 1 when none parse. Non-numeric and empty fields are skipped, never fatal.
pub fn next_id(records: &[Record]) -> u64 {
    records
        .iter()
        .filter_map(Record::numeric_id)
        .max()
        .unwrap_or(0)
        + 1
}

/// Remove every record whose column 0 equals `target` and shift each
/// surviving id greater than `target` down by the number removed, keeping
/// the `1..N` sequence gapless.
///
/// Rows with a non-numeric column 0 pass through untouched and count toward
/// neither removal nor update. Relative order is preserved.
pub fn remove_and_reindex(records: Vec<Record>, target: u64) -> (RemovalOutcome, Vec<Record>) {
    let removed = records
        .iter()
        .filter(|r| r.numeric_id() == Some(target))
        .count();
    if removed == 0 {
        return (RemovalOutcome::default(), records);
    }

    let mut outcome = RemovalOutcome {
        removed,
        updated: 0,
    };
    let mut rest = Vec::with_capacity(records.len() - removed);
    for mut record in records {
        match record.numeric_id() {
            Some(id) if id == target => continue,
            Some(id) if id > target => {
                record.set(0, (id - removed as u64).to_string());
                outcome.updated += 1;
                rest.push(record);
            }
            _ => rest.push(record),
        }
    }
    (outcome, rest)
}

/// Remove every record whose column 0 equals `key` exactly. No renumbering.
pub fn remove_by_key(records: Vec<Record>, key: &str) -> (usize, Vec<Record>) {
    let before = records.len();
    let rest: Vec<Record> = records.into_iter().filter(|r| r.key() != key).collect();
    (before - rest.len(), rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, title: &str) -> Record {
        Record::new(vec![id.to_string(), title.to_string()])
    }

    fn ids(records: &[Record]) -> Vec<String> {
        records.iter().map(|r| r.key().to_string()).collect()
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn next_id_is_max_plus_one() {
        let records = vec![rec("3", "a"), rec("1", "b"), rec("7", "c")];
        assert_eq!(next_id(&records), 8);
    }

    #[test]
    fn next_id_skips_non_numeric() {
        let records = vec![rec("tt0133093", "a"), rec("2", "b"), rec("", "c")];
        assert_eq!(next_id(&records), 3);
    }

    #[test]
    fn reindex_shifts_later_ids_down() {
        let records = vec![rec("1", "a"), rec("2", "b"), rec("3", "c"), rec("4", "d")];
        let (outcome, rest) = remove_and_reindex(records, 2);
        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.updated, 2);
        assert_eq!(ids(&rest), vec!["1", "2", "3"]);
        // rows kept their own data, only ids moved
        assert_eq!(rest[1].field(1), "c");
        assert_eq!(rest[2].field(1), "d");
    }

    #[test]
    fn reindex_handles_duplicate_target_ids() {
        // ids 1,2,3,3 with a duplicate; deleting 2 shifts both 3s down by one
        let records = vec![rec("1", "a"), rec("2", "b"), rec("3", "c"), rec("3", "d")];
        let (outcome, rest) = remove_and_reindex(records, 2);
        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.updated, 2);
        assert_eq!(ids(&rest), vec!["1", "2", "2"]);
    }

    #[test]
    fn reindex_removes_all_rows_sharing_the_id() {
        let records = vec![rec("1", "a"), rec("2", "b"), rec("2", "c"), rec("3", "d")];
        let (outcome, rest) = remove_and_reindex(records, 2);
        assert_eq!(outcome.removed, 2);
        assert_eq!(outcome.updated, 1);
        assert_eq!(ids(&rest), vec!["1", "1"]);
        assert_eq!(rest[1].field(1), "d");
    }

    #[test]
    fn reindex_zero_matches_is_a_no_op() {
        let records = vec![rec("1", "a"), rec("2", "b")];
        let (outcome, rest) = remove_and_reindex(records.clone(), 9);
        assert_eq!(outcome.removed, 0);
        assert_eq!(outcome.updated, 0);
        assert_eq!(rest, records);
    }

    #[test]
    fn reindex_passes_non_numeric_rows_through() {
        let records = vec![rec("1", "a"), rec("not-a-number", "b"), rec("2", "c")];
        let (outcome, rest) = remove_and_reindex(records, 1);
        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.updated, 1);
        assert_eq!(ids(&rest), vec!["not-a-number", "1"]);
    }

    #[test]
    fn remove_by_key_drops_every_duplicate() {
        let records = vec![
            rec("tt0133093", "The Matrix"),
            rec("tt0234215", "Reloaded"),
            rec("tt0133093", "The Matrix (dvd)"),
        ];
        let (removed, rest) = remove_by_key(records, "tt0133093");
        assert_eq!(removed, 2);
        assert_eq!(ids(&rest), vec!["tt0234215"]);
    }

    #[test]
    fn remove_by_key_never_renumbers() {
        let records = vec![rec("tt1", "a"), rec("tt2", "b"), rec("tt3", "c")];
        let (removed, rest) = remove_by_key(records, "tt2");
        assert_eq!(removed, 1);
        assert_eq!(ids(&rest), vec!["tt1", "tt3"]);
    }

    #[test]
    fn remove_by_key_zero_matches() {
        let records = vec![rec("tt1", "a")];
        let (removed, rest) = remove_by_key(records.clone(), "tt9");
        assert_eq!(removed, 0);
        assert_eq!(rest, records);
    }
}
