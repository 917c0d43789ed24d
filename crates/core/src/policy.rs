//! Category naming and placement policy.

use crate::config::CategoryPolicyConfig;
use crate::validation::FieldErrors;

/// Business rules applied to category writes on top of the generic field checks.
#[derive(Debug, Clone)]
pub struct CategoryPolicy {
    max_name_len: usize,
    reserved_departments: Vec<String>,
}

impl CategoryPolicy {
    pub fn new(config: &CategoryPolicyConfig) -> Self {
        Self {
            max_name_len: config.max_name_len,
            reserved_departments: config.reserved_departments.clone(),
        }
    }

    /// Category names are letters only and short.
    pub fn check_name(&self, errors: &mut FieldErrors, name: &str) {
        if !name.chars().all(char::is_alphabetic) {
            errors.add("name", "Category name must contain only alphabetic characters.");
        }
        if name.chars().count() > self.max_name_len {
            errors.add(
                "name",
                format!(
                    "Category name must be at most {} characters.",
                    self.max_name_len
                ),
            );
        }
    }

    /// Reject placement under a department whose name is on the deny-list.
    pub fn check_department(&self, errors: &mut FieldErrors, department_name: &str) {
        if self.is_reserved(department_name) {
            errors.add(
                "department",
                format!("Categories cannot be created under the '{department_name}' department."),
            );
        }
    }

    pub fn is_reserved(&self, department_name: &str) -> bool {
        self.reserved_departments
            .iter()
            .any(|reserved| reserved == department_name)
    }
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self::new(&CategoryPolicyConfig::default())
    }
}
