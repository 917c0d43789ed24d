//! CSV batch importers.
//!
//! Both importers walk the file row by row, get-or-creating the
//! Location → Department → Category → SubCategory chain each row names.
//! A bad row is recorded and skipped; rows already written stay written.

use catalog_core::FieldErrors;
use catalog_core::validation::check_name;
use catalog_metadata::models::NewSku;
use catalog_metadata::{CatalogStore, MetadataError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::io::Read;

/// Why a single row was skipped.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("malformed row: {0}")]
    Malformed(#[from] csv::Error),

    #[error("missing value for column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid value: {0}")]
    Invalid(FieldErrors),

    #[error("store error: {0}")]
    Store(#[from] MetadataError),
}

/// A skipped row and its 1-based data row number.
#[derive(Debug)]
pub struct RowFailure {
    pub row: usize,
    pub error: RowError,
}

/// Outcome of one import run.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    fn record(&mut self, row: usize, result: Result<(), RowError>) {
        match result {
            Ok(()) => self.imported += 1,
            Err(error) => {
                tracing::warn!(row, error = %error, "Skipping row");
                self.failures.push(RowFailure { row, error });
            }
        }
    }
}

/// The four names one row places in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNames {
    pub location: String,
    pub department: String,
    pub category: String,
    pub subcategory: String,
}

/// Ids of the chain a row resolved to.
#[derive(Debug, Clone, Copy)]
struct ChainIds {
    location: i64,
    department: i64,
    category: i64,
    subcategory: i64,
}

/// A CSV record that names a hierarchy path.
pub trait HierarchyRecord: DeserializeOwned {
    fn into_names(self) -> Result<HierarchyNames, RowError>;
}

fn required(value: Option<String>, column: &'static str) -> Result<String, RowError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RowError::MissingColumn(column)),
    }
}

/// Row of a hierarchy file: `Location,Department,Category,SubCategory`.
#[derive(Debug, Deserialize)]
pub struct HierarchyRow {
    #[serde(rename = "Location")]
    location: Option<String>,
    #[serde(rename = "Department")]
    department: Option<String>,
    #[serde(rename = "Category")]
    category: Option<String>,
    #[serde(rename = "SubCategory")]
    subcategory: Option<String>,
}

impl HierarchyRecord for HierarchyRow {
    fn into_names(self) -> Result<HierarchyNames, RowError> {
        Ok(HierarchyNames {
            location: required(self.location, "Location")?,
            department: required(self.department, "Department")?,
            category: required(self.category, "Category")?,
            subcategory: required(self.subcategory, "SubCategory")?,
        })
    }
}

/// Row of a SKU file: `LOCATION,DEPARTMENT,CATEGORY,SUBCATEGORY`.
#[derive(Debug, Deserialize)]
pub struct SkuFileRow {
    #[serde(rename = "LOCATION")]
    location: Option<String>,
    #[serde(rename = "DEPARTMENT")]
    department: Option<String>,
    #[serde(rename = "CATEGORY")]
    category: Option<String>,
    #[serde(rename = "SUBCATEGORY")]
    subcategory: Option<String>,
}

impl HierarchyRecord for SkuFileRow {
    fn into_names(self) -> Result<HierarchyNames, RowError> {
        Ok(HierarchyNames {
            location: required(self.location, "LOCATION")?,
            department: required(self.department, "DEPARTMENT")?,
            category: required(self.category, "CATEGORY")?,
            subcategory: required(self.subcategory, "SUBCATEGORY")?,
        })
    }
}

fn check_names(names: &HierarchyNames) -> Result<(), RowError> {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, "location", &names.location);
    check_name(&mut errors, "department", &names.department);
    check_name(&mut errors, "category", &names.category);
    check_name(&mut errors, "subcategory", &names.subcategory);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(RowError::Invalid(errors))
    }
}

async fn ensure_chain(
    store: &dyn CatalogStore,
    names: &HierarchyNames,
) -> Result<ChainIds, RowError> {
    let (location, _) = store.get_or_create_location(&names.location).await?;
    let (department, _) = store
        .get_or_create_department(&names.department, location.id)
        .await?;
    let (category, _) = store
        .get_or_create_category(&names.category, department.id)
        .await?;
    let (subcategory, created) = store
        .get_or_create_subcategory(&names.subcategory, category.id)
        .await?;

    if created {
        tracing::debug!(
            location = %names.location,
            department = %names.department,
            category = %names.category,
            subcategory = %names.subcategory,
            "New hierarchy path"
        );
    }

    Ok(ChainIds {
        location: location.id,
        department: department.id,
        category: category.id,
        subcategory: subcategory.id,
    })
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Parse every row of `input`, numbering data rows from 1.
fn parse_rows<T: HierarchyRecord, R: Read>(
    input: R,
) -> impl Iterator<Item = (usize, Result<HierarchyNames, RowError>)> {
    reader(input)
        .into_deserialize::<T>()
        .enumerate()
        .map(|(index, record)| {
            let names = record
                .map_err(RowError::from)
                .and_then(T::into_names)
                .and_then(|names| check_names(&names).map(|()| names));
            (index + 1, names)
        })
}

/// Import a `Location,Department,Category,SubCategory` file into the hierarchy.
///
/// Does not touch the SKU index.
pub async fn import_hierarchy<R: Read>(store: &dyn CatalogStore, input: R) -> ImportReport {
    let mut report = ImportReport::default();
    for (row, names) in parse_rows::<HierarchyRow, _>(input) {
        let result = match names {
            Ok(names) => ensure_chain(store, &names).await.map(|_| ()),
            Err(e) => Err(e),
        };
        report.record(row, result);
    }
    report
}

/// Import a `LOCATION,DEPARTMENT,CATEGORY,SUBCATEGORY` file, adding one SKU
/// index row per data row with description `SKUDESC<n>`.
pub async fn import_skus<R: Read>(store: &dyn CatalogStore, input: R) -> ImportReport {
    let mut report = ImportReport::default();
    for (row, names) in parse_rows::<SkuFileRow, _>(input) {
        let result = match names {
            Ok(names) => index_sku(store, row, &names).await,
            Err(e) => Err(e),
        };
        report.record(row, result);
    }
    report
}

async fn index_sku(
    store: &dyn CatalogStore,
    row: usize,
    names: &HierarchyNames,
) -> Result<(), RowError> {
    let chain = ensure_chain(store, names).await?;
    store
        .create_sku(&NewSku {
            description: format!("SKUDESC{row}"),
            location_id: chain.location,
            department_id: chain.department,
            category_id: chain.category,
            subcategory_id: chain.subcategory,
        })
        .await?;
    Ok(())
}
