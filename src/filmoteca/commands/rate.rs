use crate::backup::BackupTag;
use crate::commands::{CmdMessage, CmdResult, WriteOptions, PREVIEW_LIMIT};
use crate::error::Result;
use crate::model::Schema;
use crate::store::CatalogStore;

/// What to do with the two rating columns of every matched record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingChange {
    /// Overwrite with an already-validated rating and date.
    Set { rating: String, date: String },
    /// Blank both columns.
    Clear,
}

/// Overwrite the personal-rating and date-rated columns of every record
/// whose column 0 equals `target`, leaving every other column untouched.
/// Short rows are padded to schema width first.
pub fn run<S: CatalogStore>(
    store: &mut S,
    schema: Schema,
    target: &str,
    change: &RatingChange,
    opts: &WriteOptions,
) -> Result<CmdResult> {
    let records = store.read_required()?;

    let (rating, date) = match change {
        RatingChange::Set { rating, date } => (rating.clone(), date.clone()),
        RatingChange::Clear => (String::new(), String::new()),
    };

    let mut updated = Vec::new();
    let mut matched = 0usize;
    let mut preview = Vec::new();
    for record in records {
        if record.key() != target {
            updated.push(record);
            continue;
        }
        matched += 1;
        let mut changed = record.clone();
        changed.pad_to(schema.width());
        changed.set(schema.col_rating(), rating.clone());
        changed.set(schema.col_rated(), date.clone());
        if matched <= PREVIEW_LIMIT {
            preview.push(record.to_csv_line()?);
            preview.push(changed.to_csv_line()?);
        }
        updated.push(changed);
    }

    let mut result = CmdResult::default();
    result.updated = matched;

    if matched == 0 {
        result.add_message(CmdMessage::info(format!(
            "No record found with id {}. Nothing to do.",
            target
        )));
        return Ok(result);
    }

    if opts.dry_run {
        result.add_message(CmdMessage::info(format!(
            "DRY RUN: would update {} record(s) with id {} (before/after pairs below).",
            matched, target
        )));
        result.preview = preview;
        return Ok(result);
    }

    if opts.backup {
        if let Some(path) = store.snapshot(BackupTag::Bak)? {
            result.add_message(CmdMessage::info(format!(
                "Backup created: {}",
                path.display()
            )));
        }
    }

    store.write(&updated)?;
    result.written = true;
    result.add_message(CmdMessage::success(format!(
        "Updated {} record(s) with id {}.",
        matched, target
    )));
    Ok(result)
}

/// Titles and current ratings of every record matching `target`; the CLI
/// uses this to phrase its rating prompt.
pub fn current_ratings<S: CatalogStore>(
    store: &S,
    schema: Schema,
    target: &str,
) -> Result<Vec<(String, String)>> {
    let records = store.read_required()?;
    Ok(records
        .iter()
        .filter(|r| r.key() == target)
        .map(|r| {
            (
                r.field(schema.col_title()).to_string(),
                r.field(schema.col_rating()).to_string(),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::model::Record;
    use crate::store::memory::MemoryStore;

    fn full_row(key: &str, title: &str, rating: &str, rated: &str) -> Record {
        let mut rec = Record::blank(11);
        rec.set(0, key);
        rec.set(1, "2020-01-01");
        rec.set(3, title);
        rec.set(7, "Sci-Fi");
        rec.set(8, rating);
        rec.set(9, rated);
        rec.set(10, "br");
        rec
    }

    fn set(rating: &str, date: &str) -> RatingChange {
        RatingChange::Set {
            rating: rating.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn updates_only_the_two_rating_columns() {
        let before = full_row("tt0133093", "The Matrix", "7", "2020-02-02");
        let mut store = MemoryStore::with_records(vec![before.clone()]);

        run(
            &mut store,
            Schema::Current,
            "tt0133093",
            &set("9.5", "2026-08-29"),
            &WriteOptions::default(),
        )
        .unwrap();

        let after = &store.records().unwrap()[0];
        assert_eq!(after.field(8), "9.5");
        assert_eq!(after.field(9), "2026-08-29");
        for col in [0, 1, 2, 3, 4, 5, 6, 7, 10] {
            assert_eq!(after.field(col), before.field(col), "column {} changed", col);
        }
    }

    #[test]
    fn updates_every_duplicate_match() {
        let mut store = MemoryStore::with_records(vec![
            full_row("tt0133093", "The Matrix", "", ""),
            full_row("tt0078748", "Alien", "8", "2021-01-01"),
            full_row("tt0133093", "The Matrix (dvd)", "6", "2019-05-05"),
        ]);

        let result = run(
            &mut store,
            Schema::Current,
            "tt0133093",
            &set("9", "2026-08-29"),
            &WriteOptions::default(),
        )
        .unwrap();

        assert_eq!(result.updated, 2);
        let records = store.records().unwrap();
        assert_eq!(records[0].field(8), "9");
        assert_eq!(records[1].field(8), "8");
        assert_eq!(records[2].field(8), "9");
    }

    #[test]
    fn pads_short_rows_before_writing_columns() {
        let short = Record::new(vec!["tt0133093".into(), "2020-01-01".into()]);
        let mut store = MemoryStore::with_records(vec![short]);

        run(
            &mut store,
            Schema::Current,
            "tt0133093",
            &set("7", "2026-08-29"),
            &WriteOptions::default(),
        )
        .unwrap();

        let rec = &store.records().unwrap()[0];
        assert_eq!(rec.fields.len(), 11);
        assert_eq!(rec.field(8), "7");
        assert_eq!(rec.field(9), "2026-08-29");
    }

    #[test]
    fn clear_blanks_both_columns() {
        let mut store =
            MemoryStore::with_records(vec![full_row("tt0133093", "The Matrix", "7", "2020-02-02")]);

        run(
            &mut store,
            Schema::Current,
            "tt0133093",
            &RatingChange::Clear,
            &WriteOptions::default(),
        )
        .unwrap();

        let rec = &store.records().unwrap()[0];
        assert_eq!(rec.field(8), "");
        assert_eq!(rec.field(9), "");
        assert_eq!(rec.field(3), "The Matrix");
    }

    #[test]
    fn zero_matches_reports_and_skips_write() {
        let mut store =
            MemoryStore::with_records(vec![full_row("tt0133093", "The Matrix", "7", "")]);
        let result = run(
            &mut store,
            Schema::Current,
            "tt9999999",
            &set("5", "2026-08-29"),
            &WriteOptions::default(),
        )
        .unwrap();

        assert_eq!(result.updated, 0);
        assert!(!result.written);
        assert!(store.snapshots.is_empty());
    }

    #[test]
    fn missing_catalog_is_fatal() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            run(
                &mut store,
                Schema::Current,
                "tt1",
                &RatingChange::Clear,
                &WriteOptions::default()
            ),
            Err(CatalogError::CatalogMissing(_))
        ));
    }

    #[test]
    fn dry_run_pairs_before_and_after() {
        let mut store =
            MemoryStore::with_records(vec![full_row("tt0133093", "The Matrix", "7", "2020-02-02")]);
        let result = run(
            &mut store,
            Schema::Current,
            "tt0133093",
            &set("9", "2026-08-29"),
            &WriteOptions {
                dry_run: true,
                backup: true,
            },
        )
        .unwrap();

        assert_eq!(result.preview.len(), 2);
        assert!(result.preview[0].contains(",7,"));
        assert!(result.preview[1].contains(",9,"));
        assert!(!result.written);
        assert_eq!(store.records().unwrap()[0].field(8), "7");
    }

    #[test]
    fn current_ratings_lists_matches_for_prompting() {
        let store = MemoryStore::with_records(vec![
            full_row("tt0133093", "The Matrix", "7", ""),
            full_row("tt0133093", "The Matrix (dvd)", "", ""),
            full_row("tt0078748", "Alien", "8", ""),
        ]);

        let current = current_ratings(&store, Schema::Current, "tt0133093").unwrap();
        assert_eq!(
            current,
            vec![
                ("The Matrix".to_string(), "7".to_string()),
                ("The Matrix (dvd)".to_string(), "".to_string()),
            ]
        );
    }
}
