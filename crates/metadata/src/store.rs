//! Catalog store trait and the SQLite implementation.

use crate::error::{MetadataError, MetadataResult};
use crate::repos::{
    CategoryRepo, DepartmentRepo, HierarchyRepo, LocationRepo, SkuRepo, SubCategoryRepo,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined catalog store trait.
#[async_trait]
pub trait CatalogStore:
    LocationRepo
    + DepartmentRepo
    + CategoryRepo
    + SubCategoryRepo
    + SkuRepo
    + HierarchyRepo
    + Send
    + Sync
{
    /// Create the schema if it does not exist.
    async fn migrate(&self) -> MetadataResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;
}

/// SQLite-based catalog store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (creating if needed) a SQLite catalog at `path` and apply the schema.
    pub async fn new(
        path: impl AsRef<Path>,
        query_timeout_secs: Option<u64>,
    ) -> MetadataResult<Self> {
        let path = path.as_ref();
        let query_timeout_secs = query_timeout_secs.unwrap_or(600);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            // Cascading deletes depend on this being set on every connection.
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        tracing::debug!(
            path = %path.display(),
            query_timeout_secs,
            "SQLite catalog store opened (query timeout is advisory only)"
        );

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn migrate(&self) -> MetadataResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Turn a foreign key failure into a constraint error; pass everything else through.
fn map_write_error(err: sqlx::Error, context: impl FnOnce() -> String) -> MetadataError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            MetadataError::Constraint(context())
        }
        _ => MetadataError::Database(err),
    }
}

/// Refuse to move a node while SKU index rows pin it under a different parent.
///
/// `column` names the moved node's SKU column and `parent_column` the SKU
/// column its new parent must match.
async fn ensure_skus_follow(
    pool: &Pool<Sqlite>,
    what: &str,
    column: &str,
    id: i64,
    parent_column: &str,
    parent_id: i64,
) -> MetadataResult<()> {
    let stranded: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM sku_index WHERE {column} = ? AND {parent_column} <> ?"
    ))
    .bind(id)
    .bind(parent_id)
    .fetch_one(pool)
    .await?;

    if stranded > 0 {
        return Err(MetadataError::Constraint(format!(
            "{what} {id} is referenced by {stranded} sku rows under its current parent"
        )));
    }
    Ok(())
}

fn ensure_affected(rows_affected: u64, what: &str, id: i64) -> MetadataResult<()> {
    if rows_affected == 0 {
        return Err(MetadataError::NotFound(format!("{what} {id}")));
    }
    Ok(())
}

// Implement all the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::*;
    use catalog_core::{HierarchyPath, ResolvedLevel, SKU_DESCRIPTION_MAX_LEN};

    #[async_trait]
    impl LocationRepo for SqliteStore {
        async fn create_location(&self, name: &str) -> MetadataResult<LocationRow> {
            let result = sqlx::query("INSERT INTO locations (name) VALUES (?)")
                .bind(name)
                .execute(&self.pool)
                .await?;
            Ok(LocationRow {
                id: result.last_insert_rowid(),
                name: name.to_string(),
            })
        }

        async fn list_locations(&self) -> MetadataResult<Vec<LocationRow>> {
            let rows = sqlx::query_as::<_, LocationRow>(
                "SELECT id, name FROM locations ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn get_location(&self, id: i64) -> MetadataResult<Option<LocationRow>> {
            let row =
                sqlx::query_as::<_, LocationRow>("SELECT id, name FROM locations WHERE id = ?")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(row)
        }

        async fn update_location(&self, location: &LocationRow) -> MetadataResult<()> {
            let result = sqlx::query("UPDATE locations SET name = ? WHERE id = ?")
                .bind(&location.name)
                .bind(location.id)
                .execute(&self.pool)
                .await?;
            ensure_affected(result.rows_affected(), "location", location.id)
        }

        async fn delete_location(&self, id: i64) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM locations WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;
            ensure_affected(result.rows_affected(), "location", id)
        }

        async fn get_or_create_location(&self, name: &str) -> MetadataResult<(LocationRow, bool)> {
            let existing = sqlx::query_as::<_, LocationRow>(
                "SELECT id, name FROM locations WHERE name = ? ORDER BY id LIMIT 1",
            )
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

            match existing {
                Some(row) => Ok((row, false)),
                None => Ok((self.create_location(name).await?, true)),
            }
        }
    }

    #[async_trait]
    impl DepartmentRepo for SqliteStore {
        async fn create_department(
            &self,
            name: &str,
            location_id: i64,
        ) -> MetadataResult<DepartmentRow> {
            let result = sqlx::query("INSERT INTO departments (name, location_id) VALUES (?, ?)")
                .bind(name)
                .bind(location_id)
                .execute(&self.pool)
                .await
                .map_err(|e| map_write_error(e, || format!("location {location_id} does not exist")))?;
            Ok(DepartmentRow {
                id: result.last_insert_rowid(),
                name: name.to_string(),
                location_id,
            })
        }

        async fn list_departments(&self) -> MetadataResult<Vec<DepartmentRow>> {
            let rows = sqlx::query_as::<_, DepartmentRow>(
                "SELECT id, name, location_id FROM departments ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn get_department(&self, id: i64) -> MetadataResult<Option<DepartmentRow>> {
            let row = sqlx::query_as::<_, DepartmentRow>(
                "SELECT id, name, location_id FROM departments WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn update_department(&self, department: &DepartmentRow) -> MetadataResult<()> {
            ensure_skus_follow(
                &self.pool,
                "department",
                "department_id",
                department.id,
                "location_id",
                department.location_id,
            )
            .await?;
            let result =
                sqlx::query("UPDATE departments SET name = ?, location_id = ? WHERE id = ?")
                    .bind(&department.name)
                    .bind(department.location_id)
                    .bind(department.id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        map_write_error(e, || {
                            format!("location {} does not exist", department.location_id)
                        })
                    })?;
            ensure_affected(result.rows_affected(), "department", department.id)
        }

        async fn delete_department(&self, id: i64) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM departments WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;
            ensure_affected(result.rows_affected(), "department", id)
        }

        async fn get_or_create_department(
            &self,
            name: &str,
            location_id: i64,
        ) -> MetadataResult<(DepartmentRow, bool)> {
            let existing = sqlx::query_as::<_, DepartmentRow>(
                "SELECT id, name, location_id FROM departments \
                 WHERE name = ? AND location_id = ? ORDER BY id LIMIT 1",
            )
            .bind(name)
            .bind(location_id)
            .fetch_optional(&self.pool)
            .await?;

            match existing {
                Some(row) => Ok((row, false)),
                None => Ok((self.create_department(name, location_id).await?, true)),
            }
        }
    }

    #[async_trait]
    impl CategoryRepo for SqliteStore {
        async fn create_category(
            &self,
            name: &str,
            department_id: i64,
        ) -> MetadataResult<CategoryRow> {
            let result = sqlx::query("INSERT INTO categories (name, department_id) VALUES (?, ?)")
                .bind(name)
                .bind(department_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    map_write_error(e, || format!("department {department_id} does not exist"))
                })?;
            Ok(CategoryRow {
                id: result.last_insert_rowid(),
                name: name.to_string(),
                department_id,
            })
        }

        async fn list_categories(&self) -> MetadataResult<Vec<CategoryRow>> {
            let rows = sqlx::query_as::<_, CategoryRow>(
                "SELECT id, name, department_id FROM categories ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn get_category(&self, id: i64) -> MetadataResult<Option<CategoryRow>> {
            let row = sqlx::query_as::<_, CategoryRow>(
                "SELECT id, name, department_id FROM categories WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn update_category(&self, category: &CategoryRow) -> MetadataResult<()> {
            ensure_skus_follow(
                &self.pool,
                "category",
                "category_id",
                category.id,
                "department_id",
                category.department_id,
            )
            .await?;
            let result =
                sqlx::query("UPDATE categories SET name = ?, department_id = ? WHERE id = ?")
                    .bind(&category.name)
                    .bind(category.department_id)
                    .bind(category.id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        map_write_error(e, || {
                            format!("department {} does not exist", category.department_id)
                        })
                    })?;
            ensure_affected(result.rows_affected(), "category", category.id)
        }

        async fn delete_category(&self, id: i64) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM categories WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;
            ensure_affected(result.rows_affected(), "category", id)
        }

        async fn get_or_create_category(
            &self,
            name: &str,
            department_id: i64,
        ) -> MetadataResult<(CategoryRow, bool)> {
            let existing = sqlx::query_as::<_, CategoryRow>(
                "SELECT id, name, department_id FROM categories \
                 WHERE name = ? AND department_id = ? ORDER BY id LIMIT 1",
            )
            .bind(name)
            .bind(department_id)
            .fetch_optional(&self.pool)
            .await?;

            match existing {
                Some(row) => Ok((row, false)),
                None => Ok((self.create_category(name, department_id).await?, true)),
            }
        }
    }

    #[async_trait]
    impl SubCategoryRepo for SqliteStore {
        async fn create_subcategory(
            &self,
            name: &str,
            category_id: i64,
        ) -> MetadataResult<SubCategoryRow> {
            let result =
                sqlx::query("INSERT INTO subcategories (name, category_id) VALUES (?, ?)")
                    .bind(name)
                    .bind(category_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        map_write_error(e, || format!("category {category_id} does not exist"))
                    })?;
            Ok(SubCategoryRow {
                id: result.last_insert_rowid(),
                name: name.to_string(),
                category_id,
            })
        }

        async fn list_subcategories(&self) -> MetadataResult<Vec<SubCategoryRow>> {
            let rows = sqlx::query_as::<_, SubCategoryRow>(
                "SELECT id, name, category_id FROM subcategories ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn get_subcategory(&self, id: i64) -> MetadataResult<Option<SubCategoryRow>> {
            let row = sqlx::query_as::<_, SubCategoryRow>(
                "SELECT id, name, category_id FROM subcategories WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn update_subcategory(&self, subcategory: &SubCategoryRow) -> MetadataResult<()> {
            ensure_skus_follow(
                &self.pool,
                "subcategory",
                "subcategory_id",
                subcategory.id,
                "category_id",
                subcategory.category_id,
            )
            .await?;
            let result =
                sqlx::query("UPDATE subcategories SET name = ?, category_id = ? WHERE id = ?")
                    .bind(&subcategory.name)
                    .bind(subcategory.category_id)
                    .bind(subcategory.id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        map_write_error(e, || {
                            format!("category {} does not exist", subcategory.category_id)
                        })
                    })?;
            ensure_affected(result.rows_affected(), "subcategory", subcategory.id)
        }

        async fn delete_subcategory(&self, id: i64) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM subcategories WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;
            ensure_affected(result.rows_affected(), "subcategory", id)
        }

        async fn get_or_create_subcategory(
            &self,
            name: &str,
            category_id: i64,
        ) -> MetadataResult<(SubCategoryRow, bool)> {
            let existing = sqlx::query_as::<_, SubCategoryRow>(
                "SELECT id, name, category_id FROM subcategories \
                 WHERE name = ? AND category_id = ? ORDER BY id LIMIT 1",
            )
            .bind(name)
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

            match existing {
                Some(row) => Ok((row, false)),
                None => Ok((self.create_subcategory(name, category_id).await?, true)),
            }
        }
    }

    #[async_trait]
    impl SkuRepo for SqliteStore {
        async fn create_sku(&self, sku: &NewSku) -> MetadataResult<SkuRow> {
            if sku.description.chars().count() > SKU_DESCRIPTION_MAX_LEN {
                return Err(MetadataError::Constraint(format!(
                    "sku description exceeds {SKU_DESCRIPTION_MAX_LEN} characters"
                )));
            }

            let chained: bool = sqlx::query_scalar(
                "SELECT EXISTS(
                    SELECT 1 FROM subcategories s
                    JOIN categories c ON c.id = s.category_id
                    JOIN departments d ON d.id = c.department_id
                    WHERE s.id = ? AND c.id = ? AND d.id = ? AND d.location_id = ?
                )",
            )
            .bind(sku.subcategory_id)
            .bind(sku.category_id)
            .bind(sku.department_id)
            .bind(sku.location_id)
            .fetch_one(&self.pool)
            .await?;

            if !chained {
                return Err(MetadataError::Constraint(format!(
                    "sku references do not form a chain: location {} / department {} / category {} / subcategory {}",
                    sku.location_id, sku.department_id, sku.category_id, sku.subcategory_id
                )));
            }

            let result = sqlx::query(
                "INSERT INTO sku_index (description, location_id, department_id, category_id, subcategory_id) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&sku.description)
            .bind(sku.location_id)
            .bind(sku.department_id)
            .bind(sku.category_id)
            .bind(sku.subcategory_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, || "sku references a missing node".to_string()))?;

            Ok(SkuRow {
                sku: result.last_insert_rowid(),
                description: sku.description.clone(),
                location_id: sku.location_id,
                department_id: sku.department_id,
                category_id: sku.category_id,
                subcategory_id: sku.subcategory_id,
            })
        }

        async fn get_sku(&self, sku: i64) -> MetadataResult<Option<SkuRow>> {
            let row = sqlx::query_as::<_, SkuRow>(
                "SELECT sku, description, location_id, department_id, category_id, subcategory_id \
                 FROM sku_index WHERE sku = ?",
            )
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn count_skus(&self) -> MetadataResult<u64> {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sku_index")
                .fetch_one(&self.pool)
                .await?;
            Ok(count as u64)
        }

        async fn find_skus(&self, filter: &SkuFilter) -> MetadataResult<Vec<SkuLookupRow>> {
            // Each dimension is bound twice: once for the IS NULL escape, once for the match.
            let rows = sqlx::query_as::<_, SkuLookupRow>(
                "SELECT k.sku, l.name AS location, d.name AS department, \
                        c.name AS category, s.name AS subcategory
                 FROM sku_index k
                 JOIN locations l ON l.id = k.location_id
                 JOIN departments d ON d.id = k.department_id
                 JOIN categories c ON c.id = k.category_id
                 JOIN subcategories s ON s.id = k.subcategory_id
                 WHERE (? IS NULL OR l.name = ?)
                   AND (? IS NULL OR d.name = ?)
                   AND (? IS NULL OR c.name = ?)
                   AND (? IS NULL OR s.name = ?)
                 ORDER BY k.sku",
            )
            .bind(filter.location.as_deref())
            .bind(filter.location.as_deref())
            .bind(filter.department.as_deref())
            .bind(filter.department.as_deref())
            .bind(filter.category.as_deref())
            .bind(filter.category.as_deref())
            .bind(filter.subcategory.as_deref())
            .bind(filter.subcategory.as_deref())
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }
    }

    /// Query plan for one hierarchy level: the SQL and how to bind a path into it.
    ///
    /// Every plan projects `(id, name, parent_id)` so one row type serves all levels.
    struct LevelPlan {
        sql: &'static str,
        binds: fn(&HierarchyPath) -> Vec<Option<i64>>,
    }

    fn no_binds(_: &HierarchyPath) -> Vec<Option<i64>> {
        Vec::new()
    }

    fn department_binds(path: &HierarchyPath) -> Vec<Option<i64>> {
        vec![path.location_id]
    }

    fn category_binds(path: &HierarchyPath) -> Vec<Option<i64>> {
        vec![path.department_id, path.location_id]
    }

    fn subcategory_binds(path: &HierarchyPath) -> Vec<Option<i64>> {
        vec![
            path.category_id,
            path.department_id,
            path.location_id,
            path.subcategory_id,
            path.subcategory_id,
        ]
    }

    static LOCATION_PLAN: LevelPlan = LevelPlan {
        sql: "SELECT id, name, NULL AS parent_id FROM locations ORDER BY id",
        binds: no_binds,
    };

    static DEPARTMENT_PLAN: LevelPlan = LevelPlan {
        sql: "SELECT id, name, location_id AS parent_id FROM departments \
              WHERE location_id = ? ORDER BY id",
        binds: department_binds,
    };

    // Both ancestors are checked: a department id that exists under another
    // location must not leak its categories.
    static CATEGORY_PLAN: LevelPlan = LevelPlan {
        sql: "SELECT c.id, c.name, c.department_id AS parent_id
              FROM categories c
              JOIN departments d ON d.id = c.department_id
              WHERE c.department_id = ? AND d.location_id = ?
              ORDER BY c.id",
        binds: category_binds,
    };

    // An absent ancestor binds NULL, which never compares equal, so a bare
    // subcategory id yields nothing.
    static SUBCATEGORY_PLAN: LevelPlan = LevelPlan {
        sql: "SELECT s.id, s.name, s.category_id AS parent_id
              FROM subcategories s
              JOIN categories c ON c.id = s.category_id
              JOIN departments d ON d.id = c.department_id
              WHERE s.category_id = ? AND c.department_id = ? AND d.location_id = ?
                AND (? IS NULL OR s.id = ?)
              ORDER BY s.id",
        binds: subcategory_binds,
    };

    fn plan_for(level: ResolvedLevel) -> &'static LevelPlan {
        match level {
            ResolvedLevel::Location => &LOCATION_PLAN,
            ResolvedLevel::Department => &DEPARTMENT_PLAN,
            ResolvedLevel::Category => &CATEGORY_PLAN,
            ResolvedLevel::SubCategory => &SUBCATEGORY_PLAN,
        }
    }

    #[async_trait]
    impl HierarchyRepo for SqliteStore {
        async fn resolve_hierarchy(&self, path: &HierarchyPath) -> MetadataResult<HierarchyNodes> {
            let level = path.level();
            let plan = plan_for(level);

            let mut query = sqlx::query_as::<_, NodeRow>(plan.sql);
            for value in (plan.binds)(path) {
                query = query.bind(value);
            }
            let nodes = query.fetch_all(&self.pool).await?;

            tracing::debug!(level = %level, rows = nodes.len(), "hierarchy resolved");
            Ok(HierarchyNodes { level, nodes })
        }
    }
}

/// SQL schema for SQLite.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_locations_name ON locations(name);

CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    location_id INTEGER NOT NULL REFERENCES locations(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_departments_location ON departments(location_id, name);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    department_id INTEGER NOT NULL REFERENCES departments(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_categories_department ON categories(department_id, name);

CREATE TABLE IF NOT EXISTS subcategories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_subcategories_category ON subcategories(category_id, name);

-- Denormalized SKU index. Ancestry consistency is checked on insert and on node moves.
CREATE TABLE IF NOT EXISTS sku_index (
    sku INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    location_id INTEGER NOT NULL REFERENCES locations(id) ON DELETE CASCADE,
    department_id INTEGER NOT NULL REFERENCES departments(id) ON DELETE CASCADE,
    category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    subcategory_id INTEGER NOT NULL REFERENCES subcategories(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_sku_index_location ON sku_index(location_id);
CREATE INDEX IF NOT EXISTS idx_sku_index_department ON sku_index(department_id);
CREATE INDEX IF NOT EXISTS idx_sku_index_category ON sku_index(category_id);
CREATE INDEX IF NOT EXISTS idx_sku_index_subcategory ON sku_index(subcategory_id);
"#;
