//! # Filter/Query Engine
//!
//! Predicate filtering, pagination, and aggregate stats over the tabular
//! store. All predicates are conjunctive; an absent predicate imposes no
//! constraint. Empty results are valid, never an error.

pub mod sanitize;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::{DataResult, DescriptiveColumn, ProductRecord, TabularStore};

pub use sanitize::sanitize;

/// Upper bound for a single page of results.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Clamp raw pagination values into the valid range.
///
/// Limit lands in `[1, MAX_PAGE_SIZE]`; a negative offset becomes 0.
pub fn clamp_pagination(limit: i64, offset: i64) -> (usize, usize) {
    let limit = limit.clamp(1, MAX_PAGE_SIZE as i64) as usize;
    let offset = offset.max(0) as usize;
    (limit, offset)
}

/// Filter parameters for a product search.
///
/// Exact-match: date, client_id, sku. Case-insensitive substring: brand,
/// category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub date: Option<String>,
    pub client_id: Option<i64>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Filter {
    /// Build a filter from raw caller input: free-text predicates are
    /// sanitized, pagination is clamped. Sanitized-to-empty predicates are
    /// dropped rather than matched against the empty string.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        date: Option<String>,
        client_id: Option<i64>,
        brand: Option<String>,
        sku: Option<String>,
        category: Option<String>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Self {
        let (limit, offset) = clamp_pagination(
            limit.unwrap_or(DEFAULT_PAGE_SIZE as i64),
            offset.unwrap_or(0),
        );

        let clean = |value: Option<String>| {
            value
                .map(|v| sanitize(&v))
                .filter(|v| !v.is_empty())
        };

        Self {
            date: clean(date),
            client_id,
            brand: clean(brand),
            sku: clean(sku),
            category: clean(category),
            limit: Some(limit as i64),
            offset: Some(offset as i64),
        }
    }

    fn matches(&self, record: &ProductRecord) -> bool {
        if let Some(date) = &self.date {
            if record.id_tie_fecha_valor.as_deref() != Some(date.as_str()) {
                return false;
            }
        }
        if let Some(client_id) = self.client_id {
            if record.id_cli_cliente != Some(client_id) {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !contains_ci(record.desc_ga_marca_producto.as_deref(), brand) {
                return false;
            }
        }
        if let Some(sku) = &self.sku {
            if record.desc_ga_sku_producto.as_deref() != Some(sku.as_str()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !contains_ci(record.desc_categoria_prod_principal.as_deref(), category) {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive "contains"; a null field never matches.
fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(h) => h.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}

/// Aggregate statistics over the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_records: usize,
    pub brands_count: usize,
    pub categories_count: usize,
}

/// Read-only query engine over a shared tabular store.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<TabularStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<TabularStore>) -> Self {
        Self { store }
    }

    /// Records in file order starting at `offset`, at most `limit` of them.
    ///
    /// An offset past the end of the dataset yields an empty page.
    pub fn page(&self, limit: i64, offset: i64) -> DataResult<Vec<ProductRecord>> {
        let (limit, offset) = clamp_pagination(limit, offset);
        let records = self.store.records()?;
        Ok(records.iter().skip(offset).take(limit).cloned().collect())
    }

    /// Apply all present predicates conjunctively, then paginate.
    pub fn search(&self, filter: &Filter) -> DataResult<Vec<ProductRecord>> {
        let (limit, offset) = clamp_pagination(
            filter.limit.unwrap_or(DEFAULT_PAGE_SIZE as i64),
            filter.offset.unwrap_or(0),
        );
        let records = self.store.records()?;

        Ok(records
            .iter()
            .filter(|r| filter.matches(r))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    /// Sorted distinct brands (sentinel-excluded).
    pub fn brands(&self) -> DataResult<Vec<String>> {
        self.store.distinct(DescriptiveColumn::Brand)
    }

    /// Sorted distinct main categories.
    pub fn categories(&self) -> DataResult<Vec<String>> {
        self.store.distinct(DescriptiveColumn::Category)
    }

    /// Row count plus distinct brand/category counts.
    pub fn stats(&self) -> DataResult<DatasetStats> {
        Ok(DatasetStats {
            total_records: self.store.row_count()?,
            brands_count: self.brands()?.len(),
            categories_count: self.categories()?.len(),
        })
    }
}
