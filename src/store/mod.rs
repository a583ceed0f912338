//! # Tabular Store
//!
//! Single authoritative in-memory view of the product analytics dataset.
//! The backing CSV is read at most once per process; after the first load the
//! store is immutable and can be shared across request handlers without
//! locking.

pub mod csv;
pub mod errors;
pub mod record;

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

pub use errors::{DataResult, DataSourceError};
pub use record::ProductRecord;

/// The "not applicable" placeholder excluded from brand listings.
pub const BRAND_SENTINEL: &str = "No Aplica";

/// Descriptive columns exposed for distinct-value listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptiveColumn {
    Brand,
    Category,
}

/// Load-once tabular store over the backing CSV file.
pub struct TabularStore {
    path: PathBuf,
    records: OnceCell<Vec<ProductRecord>>,
}

impl TabularStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: OnceCell::new(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached records, loading the file on first access.
    ///
    /// The `OnceCell` guard guarantees a single successful load even under
    /// concurrent first requests. A failed load is not cached, so a fixed
    /// file can be picked up by a later request.
    pub fn records(&self) -> DataResult<&[ProductRecord]> {
        self.records
            .get_or_try_init(|| self.load())
            .map(Vec::as_slice)
    }

    fn load(&self) -> DataResult<Vec<ProductRecord>> {
        let path = self.path.display().to_string();
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| DataSourceError::unreadable(&path, e.to_string()))?;

        let records = csv::parse_content(&content, &path)?;
        tracing::info!(path = %path, rows = records.len(), "dataset loaded");
        Ok(records)
    }

    /// Total record count.
    pub fn row_count(&self) -> DataResult<usize> {
        Ok(self.records()?.len())
    }

    /// Sorted, de-duplicated non-null values of a descriptive column.
    ///
    /// Brand listings exclude the `"No Aplica"` sentinel.
    pub fn distinct(&self, column: DescriptiveColumn) -> DataResult<Vec<String>> {
        let records = self.records()?;

        let mut values: Vec<String> = records
            .iter()
            .filter_map(|r| match column {
                DescriptiveColumn::Brand => r.desc_ga_marca_producto.clone(),
                DescriptiveColumn::Category => r.desc_categoria_prod_principal.clone(),
            })
            .filter(|v| column != DescriptiveColumn::Brand || v != BRAND_SENTINEL)
            .collect();

        values.sort();
        values.dedup();
        Ok(values)
    }
}
