use crate::backup::BackupTag;
use crate::commands::{today, CmdMessage, CmdResult, WriteOptions};
use crate::error::{CatalogError, Result};
use crate::ident::{next_id, IdScheme};
use crate::model::{Record, Schema};
use crate::store::CatalogStore;
use crate::validate;

/// Field values for one new catalog entry. Everything but the title is
/// optional and defaults to the empty string.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub title: String,
    /// IMDb const, e.g. `tt0133093`.
    pub key: String,
    /// Inclusion date, `YYYY-MM-DD`.
    pub created: String,
    pub original_title: String,
    /// "Película" or "Serie"; defaults to "Película".
    pub kind: String,
    pub genres: String,
    pub rating: String,
    pub notes: String,
    /// Only stored under the legacy layout.
    pub imdb_rating: String,
    /// Physical format (br/dvd); only stored under the current layout.
    pub format: String,
}

pub fn run<S: CatalogStore>(
    store: &mut S,
    schema: Schema,
    entry: &NewEntry,
    opts: &WriteOptions,
) -> Result<CmdResult> {
    if entry.title.is_empty() {
        return Err(CatalogError::Input("a title is required".to_string()));
    }
    if !validate::valid_key(&entry.key) {
        return Err(CatalogError::InvalidKey(entry.key.clone()));
    }
    if !entry.created.is_empty() && !validate::valid_date(&entry.created) {
        return Err(CatalogError::InvalidDate(entry.created.clone()));
    }
    let rating = validate::parse_rating(&entry.rating)
        .ok_or_else(|| CatalogError::InvalidRating(entry.rating.clone()))?;

    let mut records = store.read()?;
    let record = build_record(schema, entry, &rating, &records);

    let mut result = CmdResult::default();
    if opts.dry_run {
        result.preview.push(record.to_csv_line()?);
        result.add_message(CmdMessage::info(
            "DRY RUN: the row above would be appended to the catalog.",
        ));
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

    records.push(record);
    store.write(&records)?;
    result.written = true;
    result.add_message(CmdMessage::success(format!(
        "Added \"{}\" to the catalog.",
        entry.title
    )));
    Ok(result)
}

fn build_record(schema: Schema, entry: &NewEntry, rating: &str, existing: &[Record]) -> Record {
    let mut record = Record::blank(schema.width());

    if schema.id_scheme() == IdScheme::ContiguousNumeric {
        record.set(0, next_id(existing).to_string());
    }

    let created = match (schema, entry.created.as_str()) {
        // the legacy tooling stamped the inclusion date by default; the
        // current one leaves it blank unless given
        (Schema::Legacy, "") => today(),
        (_, given) => given.to_string(),
    };

    let url = if entry.key.is_empty() {
        String::new()
    } else {
        format!("https://www.imdb.com/title/{}/", entry.key)
    };

    let kind = if entry.kind.is_empty() {
        "Película".to_string()
    } else {
        entry.kind.clone()
    };

    record.set(schema.col_key(), entry.key.clone());
    record.set(schema.col_created(), created);
    record.set(schema.col_notes(), entry.notes.clone());
    record.set(schema.col_title(), entry.title.clone());
    record.set(schema.col_original_title(), entry.original_title.clone());
    record.set(schema.col_url(), url);
    record.set(schema.col_type(), kind);
    record.set(schema.col_genres(), entry.genres.clone());
    record.set(schema.col_rating(), rating);
    // date-recorded is always stamped, whatever the layout
    record.set(schema.col_rated(), today());
    if let Some(col) = schema.col_imdb_rating() {
        record.set(col, entry.imdb_rating.clone());
    }
    if let Some(col) = schema.col_format() {
        record.set(col, entry.format.clone());
    }
    record
}
