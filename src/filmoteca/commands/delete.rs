use crate::backup::BackupTag;
use crate::commands::{CmdMessage, CmdResult, WriteOptions, PREVIEW_LIMIT};
use crate::error::{CatalogError, Result};
use crate::ident::{remove_and_reindex, remove_by_key, IdScheme};
use crate::model::Schema;
use crate::store::CatalogStore;

/// Remove every record matching `target` — a numeric id under the legacy
/// layout, an IMDb const under the current one — closing the id gap where
/// the layout demands it.
pub fn run<S: CatalogStore>(
    store: &mut S,
    schema: Schema,
    target: &str,
    opts: &WriteOptions,
) -> Result<CmdResult> {
    let records = store.read_required()?;

    let (removed, updated, rest) = match schema.id_scheme() {
        IdScheme::ContiguousNumeric => {
            let id: u64 = target
                .trim()
                .parse()
                .map_err(|_| CatalogError::InvalidId(target.to_string()))?;
            let (outcome, rest) = remove_and_reindex(records, id);
            (outcome.removed, outcome.updated, rest)
        }
        IdScheme::NaturalKey => {
            let (removed, rest) = remove_by_key(records, target);
            (removed, 0, rest)
        }
    };

    let mut result = CmdResult::default();
    result.removed = removed;
    result.updated = updated;

    if removed == 0 {
        result.add_message(CmdMessage::info(format!(
            "No record found with id {}. Nothing to do.",
            target
        )));
        return Ok(result);
    }

    if opts.dry_run {
        result.add_message(CmdMessage::info(format!(
            "DRY RUN: would remove {} record(s) with id {}.",
            removed, target
        )));
        if updated > 0 {
            result.add_message(CmdMessage::info(format!(
                "DRY RUN: would renumber {} record(s).",
                updated
            )));
        }
        for record in rest.iter().take(PREVIEW_LIMIT) {
            result.preview.push(record.to_csv_line()?);
        }
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

    store.write(&rest)?;
    result.written = true;
    result.add_message(CmdMessage::success(format!(
        "Removed {} record(s) with id {}.",
        removed, target
    )));
    if updated > 0 {
        result.add_message(CmdMessage::success(format!(
            "Renumbered {} record(s) to keep the sequence gapless.",
            updated
        )));
    }
    Ok(result)
}
