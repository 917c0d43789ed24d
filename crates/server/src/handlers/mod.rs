//! HTTP request handlers.

pub mod categories;
pub mod common;
pub mod departments;
pub mod health;
pub mod hierarchy;
pub mod locations;
pub mod skus;
pub mod subcategories;

pub use categories::*;
pub use departments::*;
pub use health::*;
pub use hierarchy::*;
pub use locations::*;
pub use skus::*;
pub use subcategories::*;
