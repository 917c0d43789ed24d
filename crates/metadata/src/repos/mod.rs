//! Repository traits for catalog operations.

pub mod categories;
pub mod departments;
pub mod hierarchy;
pub mod locations;
pub mod skus;
pub mod subcategories;

pub use categories::CategoryRepo;
pub use departments::DepartmentRepo;
pub use hierarchy::HierarchyRepo;
pub use locations::LocationRepo;
pub use skus::SkuRepo;
pub use subcategories::SubCategoryRepo;
