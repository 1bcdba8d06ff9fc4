// src/dataset.rs

use anyhow::{Context, Result};
use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

use crate::process::{Batch, DERIVED_COLUMNS};

/// Every non-empty batch of a run, kept in request order. Rows are only
/// flattened into one table when written out.
#[derive(Debug, Default)]
pub struct Dataset {
    batches: Vec<Batch>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `batch`, returning how many rows it contributed.
    /// Batches without rows are dropped.
    pub fn push(&mut self, batch: Batch) -> usize {
        let n = batch.len();
        if n > 0 {
            self.batches.push(batch);
        }
        n
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn row_count(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Union of all page columns in first-seen order, then the derived tags.
    pub fn columns(&self) -> Vec<String> {
        if self.batches.is_empty() {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for col in self.batches.iter().flat_map(|b| b.source_columns()) {
            if seen.insert(col.as_str()) {
                out.push(col.clone());
            }
        }
        out.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));
        out
    }

    /// Write every row as CSV with a header line and no index column.
    /// A batch missing one of the union columns gets an empty cell there.
    /// An empty dataset writes nothing at all.
    pub fn write_to<W: Write>(&self, w: W) -> Result<()> {
        let columns = self.columns();
        let mut wtr = csv::Writer::from_writer(w);

        if !columns.is_empty() {
            wtr.write_record(&columns).context("writing CSV header")?;

            let slot_of: HashMap<&str, usize> = columns
                .iter()
                .enumerate()
                .map(|(i, c)| (c.as_str(), i))
                .collect();

            for batch in &self.batches {
                let slots: Vec<Option<usize>> = batch
                    .columns
                    .iter()
                    .map(|c| slot_of.get(c.as_str()).copied())
                    .collect();
                let mut record = vec![""; columns.len()];
                for row in &batch.rows {
                    record.fill("");
                    for (slot, value) in slots.iter().zip(row) {
                        if let Some(i) = slot {
                            record[*i] = value.as_str();
                        }
                    }
                    wtr.write_record(&record).context("writing CSV row")?;
                }
            }
        }

        wtr.flush().context("flushing CSV output")?;
        Ok(())
    }

    /// Create (or truncate) `path` and write the dataset to it.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file =
            File::create(path).with_context(|| format!("creating output file {:?}", path))?;
        self.write_to(BufWriter::new(file))
            .with_context(|| format!("writing {:?}", path))?;
        info!(path = %path.display(), rows = self.row_count(), "wrote dataset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RawTable;
    use std::fs;
    use tempfile::tempdir;

    fn batch(headers: &[&str], rows: &[&[&str]], conf: &str, year: i32) -> Batch {
        let raw = RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        };
        Batch::tagged(raw, conf, year)
    }

    fn to_string(ds: &Dataset) -> String {
        let mut buf = Vec::new();
        ds.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_push_skips_empty_batches() {
        let mut ds = Dataset::new();
        assert_eq!(ds.push(Batch::default()), 0);
        assert_eq!(ds.push(batch(&["Rk"], &[], "ACC", 2014)), 0);
        assert!(ds.is_empty());

        assert_eq!(ds.push(batch(&["Rk"], &[&["1"], &["2"]], "ACC", 2014)), 2);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.batches().len(), 1);
    }

    #[test]
    fn test_rows_keep_push_order() {
        let mut ds = Dataset::new();
        ds.push(batch(&["School"], &[&["Clemson"]], "ACC", 2015));
        ds.push(batch(&["School"], &[&["Alabama"], &["LSU"]], "SEC", 2015));
        ds.push(batch(&["School"], &[&["Duke"]], "ACC", 2016));

        assert_eq!(
            to_string(&ds),
            "School,Conference,Year\n\
             Clemson,ACC,2015\n\
             Alabama,SEC,2015\n\
             LSU,SEC,2015\n\
             Duke,ACC,2016\n"
        );
    }

    #[test]
    fn test_union_columns_fill_blanks() {
        let mut ds = Dataset::new();
        ds.push(batch(&["Rk", "School"], &[&["1", "Oregon"]], "PAC-12", 2014));
        ds.push(batch(&["Rk", "SRS", "School"], &[&["1", "20.5", "Ohio State"]], "BIG-TEN", 2014));

        assert_eq!(
            ds.columns(),
            vec!["Rk", "School", "SRS", "Conference", "Year"]
        );
        assert_eq!(
            to_string(&ds),
            "Rk,School,SRS,Conference,Year\n\
             1,Oregon,,PAC-12,2014\n\
             1,Ohio State,20.5,BIG-TEN,2014\n"
        );
    }

    #[test]
    fn test_values_are_quoted_when_needed() {
        let mut ds = Dataset::new();
        ds.push(batch(&["School", "Notes"], &[&["Miami (FL)", "won, then lost"]], "ACC", 2017));
        assert_eq!(
            to_string(&ds),
            "School,Notes,Conference,Year\nMiami (FL),\"won, then lost\",ACC,2017\n"
        );
    }

    #[test]
    fn test_empty_dataset_writes_empty_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale")?;

        Dataset::new().write_csv(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "");
        Ok(())
    }
}
