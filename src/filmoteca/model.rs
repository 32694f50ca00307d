use crate::error::{CatalogError, Result};
use crate::ident::IdScheme;
use serde::{Deserialize, Serialize};

/// The two column layouts the catalog file has had over its life.
///
/// `Legacy` keeps a gapless numeric id in column 0; `Current` dropped the
/// numeric id and leads with the IMDb const, which may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Legacy,
    Current,
}

impl Schema {
    pub fn width(self) -> usize {
        match self {
            Schema::Legacy => 12,
            Schema::Current => 11,
        }
    }

    pub fn id_scheme(self) -> IdScheme {
        match self {
            Schema::Legacy => IdScheme::ContiguousNumeric,
            Schema::Current => IdScheme::NaturalKey,
        }
    }

    /// Column holding the IMDb const.
    pub fn col_key(self) -> usize {
        match self {
            Schema::Legacy => 1,
            Schema::Current => 0,
        }
    }

    pub fn col_created(self) -> usize {
        match self {
            Schema::Legacy => 2,
            Schema::Current => 1,
        }
    }

    pub fn col_notes(self) -> usize {
        match self {
            Schema::Legacy => 3,
            Schema::Current => 2,
        }
    }

    pub fn col_title(self) -> usize {
        match self {
            Schema::Legacy => 4,
            Schema::Current => 3,
        }
    }

    pub fn col_original_title(self) -> usize {
        match self {
            Schema::Legacy => 5,
            Schema::Current => 4,
        }
    }

    pub fn col_url(self) -> usize {
        match self {
            Schema::Legacy => 6,
            Schema::Current => 5,
        }
    }

    pub fn col_type(self) -> usize {
        match self {
            Schema::Legacy => 7,
            Schema::Current => 6,
        }
    }

    /// IMDb's own rating; only the legacy layout keeps it.
    pub fn col_imdb_rating(self) -> Option<usize> {
        match self {
            Schema::Legacy => Some(8),
            Schema::Current => None,
        }
    }

    pub fn col_genres(self) -> usize {
        match self {
            Schema::Legacy => 9,
            Schema::Current => 7,
        }
    }

    pub fn col_rating(self) -> usize {
        match self {
            Schema::Legacy => 10,
            Schema::Current => 8,
        }
    }

    pub fn col_rated(self) -> usize {
        match self {
            Schema::Legacy => 11,
            Schema::Current => 9,
        }
    }

    /// Physical format (br/dvd); only the current layout keeps it.
    pub fn col_format(self) -> Option<usize> {
        match self {
            Schema::Legacy => None,
            Schema::Current => Some(10),
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::Current
    }
}

/// One row of the catalog: an ordered sequence of text fields.
///
/// Rows read from disk may be shorter or longer than the schema width;
/// they are preserved as-is until a mutation needs to touch them, at which
/// point they are padded to full width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<String>,
}

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// An all-empty record of the given width.
    pub fn blank(width: usize) -> Self {
        Self {
            fields: vec![String::new(); width],
        }
    }

    /// Field at `i`, or the empty string when the row is too short.
    pub fn field(&self, i: usize) -> &str {
        self.fields.get(i).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, i: usize, value: impl Into<String>) {
        if self.fields.len() <= i {
            self.fields.resize(i + 1, String::new());
        }
        self.fields[i] = value.into();
    }

    pub fn pad_to(&mut self, width: usize) {
        if self.fields.len() < width {
            self.fields.resize(width, String::new());
        }
    }

    /// The identity field (column 0): numeric id under the legacy layout,
    /// IMDb const under the current one.
    pub fn key(&self) -> &str {
        self.field(0)
    }

    /// Column 0 parsed as an integer id, if it is one.
    pub fn numeric_id(&self) -> Option<u64> {
        self.field(0).trim().parse().ok()
    }

    /// Render the record as a single CSV line, quoting the same way the
    /// catalog file does.
    pub fn to_csv_line(&self) -> Result<String> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(Vec::new());
        wtr.write_record(&self.fields)?;
        let buf = wtr
            .into_inner()
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let line = String::from_utf8(buf).map_err(|e| CatalogError::Store(e.to_string()))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
