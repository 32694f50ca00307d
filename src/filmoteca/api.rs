//! Thin facade over the command layer.
//!
//! The CLI (or any other front end) talks to [`CatalogApi`] only. The facade
//! normalizes raw user input — rating strings, optional dates — into the
//! typed values commands expect, and dispatches. No business logic and no
//! terminal I/O live here.

use crate::commands::{self, CmdResult, WriteOptions};
use crate::error::{CatalogError, Result};
use crate::model::Schema;
use crate::store::CatalogStore;
use crate::validate;

pub struct CatalogApi<S: CatalogStore> {
    store: S,
    schema: Schema,
}

impl<S: CatalogStore> CatalogApi<S> {
    pub fn new(store: S, schema: Schema) -> Self {
        Self { store, schema }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn add_entry(
        &mut self,
        entry: &commands::add::NewEntry,
        opts: &WriteOptions,
    ) -> Result<CmdResult> {
        commands::add::run(&mut self.store, self.schema, entry, opts)
    }

    pub fn delete_entry(&mut self, target: &str, opts: &WriteOptions) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, self.schema, target, opts)
    }

    /// `rating: None` with `clear: false` is rejected here; the CLI resolves
    /// the rating interactively before calling. A blank rating string also
    /// means clear, mirroring the prompt's "empty to erase" convention.
    pub fn rate_entry(
        &mut self,
        target: &str,
        rating: Option<&str>,
        date: Option<&str>,
        clear: bool,
        opts: &WriteOptions,
    ) -> Result<CmdResult> {
        let change = if clear {
            commands::rate::RatingChange::Clear
        } else {
            let raw = rating.ok_or_else(|| {
                CatalogError::Input("a rating is required (or pass --clear)".to_string())
            })?;
            let normalized = validate::parse_rating(raw)
                .ok_or_else(|| CatalogError::InvalidRating(raw.to_string()))?;
            if normalized.is_empty() {
                commands::rate::RatingChange::Clear
            } else {
                let date = match date {
                    Some(d) if validate::valid_date(d) => d.to_string(),
                    Some(d) => return Err(CatalogError::InvalidDate(d.to_string())),
                    None => commands::today(),
                };
                commands::rate::RatingChange::Set {
                    rating: normalized,
                    date,
                }
            }
        };
        commands::rate::run(&mut self.store, self.schema, target, &change, opts)
    }

    /// Matched titles with their current ratings, for prompt phrasing.
    pub fn current_ratings(&self, target: &str) -> Result<Vec<(String, String)>> {
        commands::rate::current_ratings(&self.store, self.schema, target)
    }
}
