//! In-memory database for testing.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use sitekit_core::{
    application::ports::{Database, QueryResult},
    error::SitekitResult,
};

/// Test double that understands just the statements the pipeline issues:
/// `SHOW DATABASES LIKE '<name>'`, `CREATE DATABASE`, and `GRANT`.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    databases: HashSet<String>,
    statements: Vec<String>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create a database (testing helper).
    pub fn with_database(name: impl Into<String>) -> Self {
        let db = Self::new();
        db.inner.lock().unwrap().databases.insert(name.into());
        db
    }

    /// Every statement issued so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.inner.lock().unwrap().statements.clone()
    }

    /// Whether a database with this name exists.
    pub fn has_database(&self, name: &str) -> bool {
        self.inner.lock().unwrap().databases.contains(name)
    }
}

impl Database for MemoryDatabase {
    fn query(&self, sql: &str) -> SitekitResult<QueryResult> {
        let mut inner = self.inner.lock().unwrap();
        inner.statements.push(sql.to_string());

        if let Some(rest) = sql.strip_prefix("SHOW DATABASES LIKE '") {
            let name = rest.trim_end_matches('\'');
            let rows = usize::from(inner.databases.contains(name));
            return Ok(QueryResult::with_rows(rows));
        }

        if let Some(rest) = sql.strip_prefix("CREATE DATABASE `") {
            let name = rest.split('`').next().unwrap_or(rest).to_string();
            inner.databases.insert(name);
        }

        Ok(QueryResult::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_databases_reports_presence() {
        let db = MemoryDatabase::with_database("mysite");
        let hit = db.query("SHOW DATABASES LIKE 'mysite'").unwrap();
        assert_eq!(hit.row_count(), 1);
        let miss = db.query("SHOW DATABASES LIKE 'other'").unwrap();
        assert_eq!(miss.row_count(), 0);
    }

    #[test]
    fn create_database_registers_name() {
        let db = MemoryDatabase::new();
        db.query("CREATE DATABASE `mysite`;").unwrap();
        assert!(db.has_database("mysite"));
    }

    #[test]
    fn statements_recorded_in_order() {
        let db = MemoryDatabase::new();
        db.query("SHOW DATABASES LIKE 'a'").unwrap();
        db.query("CREATE DATABASE `a`;").unwrap();
        assert_eq!(db.statements().len(), 2);
    }
}
