//! Database models mapping to the catalog schema.

use catalog_core::ResolvedLevel;
use sqlx::FromRow;

// =============================================================================
// Hierarchy
// =============================================================================

/// Root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
    pub location_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SubCategoryRow {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
}

/// Level-agnostic projection returned by hierarchical lookups.
///
/// `parent_id` is `None` only for locations.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct NodeRow {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Result of a hierarchical lookup: the level that was resolved and its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNodes {
    pub level: ResolvedLevel,
    pub nodes: Vec<NodeRow>,
}

// =============================================================================
// SKU index
// =============================================================================

/// Denormalized SKU record referencing one node per level.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SkuRow {
    pub sku: i64,
    pub description: String,
    pub location_id: i64,
    pub department_id: i64,
    pub category_id: i64,
    pub subcategory_id: i64,
}

/// SKU index write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSku {
    pub description: String,
    pub location_id: i64,
    pub department_id: i64,
    pub category_id: i64,
    pub subcategory_id: i64,
}

/// SKU with the names of the nodes it references.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SkuLookupRow {
    pub sku: i64,
    pub location: String,
    pub department: String,
    pub category: String,
    pub subcategory: String,
}

/// Exact-match name filter over the SKU index. `None` leaves a dimension open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkuFilter {
    pub location: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}
