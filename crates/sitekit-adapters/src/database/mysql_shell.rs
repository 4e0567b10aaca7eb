//! Database adapter driving the `mysql` client binary.
//!
//! The raw connection handshake stays outside the core: this adapter owns
//! the credentials and turns each statement into one `mysql -e` invocation.
//! Row counts come from the tabular output line count, which is all the
//! pipeline needs (`SHOW DATABASES LIKE` existence checks).

use std::process::Command;

use tracing::debug;

use sitekit_core::{
    application::{
        ApplicationError,
        ports::{Database, QueryResult},
    },
    domain::DbCredentials,
    error::SitekitResult,
};

/// Production database client.
#[derive(Debug, Clone)]
pub struct MysqlShell {
    creds: DbCredentials,
}

impl MysqlShell {
    /// Connect with the given credentials, verifying the server is reachable.
    pub fn connect(creds: DbCredentials) -> SitekitResult<Self> {
        let shell = Self { creds };
        shell.execute("SELECT 1").map_err(|e| {
            sitekit_core::error::SitekitError::from(ApplicationError::DatabaseConnection {
                reason: e.to_string(),
            })
        })?;
        Ok(shell)
    }

    fn execute(&self, sql: &str) -> Result<String, String> {
        let output = Command::new("mysql")
            .arg(format!("--host={}", self.creds.host))
            .arg(format!("--user={}", self.creds.user))
            .arg(format!("--password={}", self.creds.pass))
            .arg("--batch")
            .arg("--skip-column-names")
            .arg("-e")
            .arg(sql)
            .output()
            .map_err(|e| e.to_string())?;

        if !output.status.success() {
            return Err(String::from_utf8_lossy(&output.stderr).into_owned());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Database for MysqlShell {
    fn query(&self, sql: &str) -> SitekitResult<QueryResult> {
        debug!(sql, "executing statement");
        let stdout = self.execute(sql).map_err(|reason| {
            sitekit_core::error::SitekitError::from(ApplicationError::Database { reason })
        })?;

        let rows = stdout.lines().filter(|l| !l.is_empty()).count();
        Ok(QueryResult::with_rows(rows))
    }
}
