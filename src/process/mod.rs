// src/process/mod.rs
use std::collections::HashSet;

pub mod raw_table;
pub mod utils;

pub use raw_table::{parse_first_table, RawTable};

pub const CONFERENCE_COLUMN: &str = "Conference";
pub const YEAR_COLUMN: &str = "Year";

/// Columns added to every tagged batch, always last and in this order.
pub const DERIVED_COLUMNS: [&str; 2] = [CONFERENCE_COLUMN, YEAR_COLUMN];

/// One page worth of rows, tagged with where they came from.
///
/// Either empty (a skipped page) or `columns` ends with [`DERIVED_COLUMNS`]
/// and every row is exactly `columns.len()` wide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Batch {
    /// Append conference and year to every row of `raw`.
    ///
    /// A source column that already uses a derived name is renamed
    /// (`Year` -> `Year.1`) so the tags never overwrite page data.
    pub fn tagged(raw: RawTable, conference: &str, year: i32) -> Self {
        let RawTable { headers, rows } = raw;

        let mut taken: HashSet<String> = headers.iter().cloned().collect();
        taken.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

        let mut columns = Vec::with_capacity(headers.len() + DERIVED_COLUMNS.len());
        for h in headers {
            if DERIVED_COLUMNS.contains(&h.as_str()) {
                let renamed = utils::unique_name(&h, &taken);
                taken.insert(renamed.clone());
                columns.push(renamed);
            } else {
                columns.push(h);
            }
        }
        columns.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

        let year = year.to_string();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.push(conference.to_string());
                row.push(year.clone());
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns that came from the page, without the derived tags.
    pub fn source_columns(&self) -> &[String] {
        let n = self.columns.len().saturating_sub(DERIVED_COLUMNS.len());
        &self.columns[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_tagged_appends_derived_columns() {
        let b = Batch::tagged(
            raw(&["Rk", "School"], &[&["1", "Alabama"], &["2", "Auburn"]]),
            "SEC",
            2016,
        );
        assert_eq!(b.columns, vec!["Rk", "School", "Conference", "Year"]);
        assert_eq!(b.source_columns(), ["Rk", "School"]);
        assert_eq!(b.rows[0], vec!["1", "Alabama", "SEC", "2016"]);
        assert_eq!(b.rows[1], vec!["2", "Auburn", "SEC", "2016"]);
    }

    #[test]
    fn test_tagged_renames_clashing_source_columns() {
        let b = Batch::tagged(raw(&["Year", "Year.1", "W"], &[&["1999", "x", "9"]]), "ACC", 2020);
        assert_eq!(b.columns, vec!["Year.2", "Year.1", "W", "Conference", "Year"]);
        assert_eq!(b.rows[0], vec!["1999", "x", "9", "ACC", "2020"]);
    }

    #[test]
    fn test_header_only_table_tags_to_empty_batch() {
        let b = Batch::tagged(raw(&["Rk"], &[]), "SEC", 2016);
        assert!(b.is_empty());
        assert_eq!(b.columns.len(), 3);
        assert!(Batch::default().source_columns().is_empty());
    }
}
