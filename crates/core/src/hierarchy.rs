//! Hierarchy paths and level resolution.
//!
//! A lookup names zero to four ancestors, e.g.
//! `/location/1/department/2/category/` carries a location and a department.
//! [`ResolvedLevel::from_path`] decides once which entity level the caller is
//! asking for; query construction and output shaping dispatch on that value.

use serde::Serialize;
use std::fmt;

/// Entity levels of the catalog, root first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedLevel {
    Location,
    Department,
    Category,
    SubCategory,
}

impl ResolvedLevel {
    pub const ALL: [ResolvedLevel; 4] = [
        ResolvedLevel::Location,
        ResolvedLevel::Department,
        ResolvedLevel::Category,
        ResolvedLevel::SubCategory,
    ];

    /// Select the level a path refers to.
    ///
    /// Precedence, first match wins:
    /// 1. a subcategory id, or location + department + category ids → SubCategory
    /// 2. location + department ids → Category
    /// 3. a location id → Department
    /// 4. nothing → Location
    pub fn from_path(path: &HierarchyPath) -> Self {
        let HierarchyPath {
            location_id,
            department_id,
            category_id,
            subcategory_id,
        } = path;

        if subcategory_id.is_some()
            || (location_id.is_some() && department_id.is_some() && category_id.is_some())
        {
            Self::SubCategory
        } else if location_id.is_some() && department_id.is_some() {
            Self::Category
        } else if location_id.is_some() {
            Self::Department
        } else {
            Self::Location
        }
    }

    /// Name of the parent reference field in this level's output, if any.
    pub fn parent_field(self) -> Option<&'static str> {
        match self {
            Self::Location => None,
            Self::Department => Some("location"),
            Self::Category => Some("department"),
            Self::SubCategory => Some("category"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Department => "department",
            Self::Category => "category",
            Self::SubCategory => "subcategory",
        }
    }
}

impl fmt::Display for ResolvedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partially specified position in the hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HierarchyPath {
    pub location_id: Option<i64>,
    pub department_id: Option<i64>,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
}

impl HierarchyPath {
    /// Path naming no ancestors (all locations).
    pub fn root() -> Self {
        Self::default()
    }

    pub fn location(location_id: i64) -> Self {
        Self {
            location_id: Some(location_id),
            ..Self::default()
        }
    }

    pub fn department(location_id: i64, department_id: i64) -> Self {
        Self {
            department_id: Some(department_id),
            ..Self::location(location_id)
        }
    }

    pub fn category(location_id: i64, department_id: i64, category_id: i64) -> Self {
        Self {
            category_id: Some(category_id),
            ..Self::department(location_id, department_id)
        }
    }

    pub fn subcategory(
        location_id: i64,
        department_id: i64,
        category_id: i64,
        subcategory_id: i64,
    ) -> Self {
        Self {
            subcategory_id: Some(subcategory_id),
            ..Self::category(location_id, department_id, category_id)
        }
    }

    pub fn level(&self) -> ResolvedLevel {
        ResolvedLevel::from_path(self)
    }
}
