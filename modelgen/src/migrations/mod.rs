//! Migration script generation
//!
//! Writes one create/drop script pair per table, numbered so that the
//! on-disk order matches the planned order.

pub mod emitter;
pub mod planner;

use std::fs;
use std::path::PathBuf;

use chrono::Utc;

use crate::config::MigrationsConfig;
use crate::db::source::SchemaSource;
use crate::error::Result;
use crate::output::{self, GenerationReport};
use crate::schema::analyzer::SchemaAnalyzer;

pub use emitter::{emit, MigrationScript};
pub use planner::{plan, OrderedMigration};

/// Writes migration scripts for every table in a schema
pub struct MigrationWriter {
    directory: PathBuf,
    base_sequence: Option<i64>,
}

impl MigrationWriter {
    /// Create a writer for the configured migrations directory
    pub fn new(config: &MigrationsConfig) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            base_sequence: None,
        }
    }

    /// Number scripts from a fixed value instead of the current time
    pub fn with_base_sequence(mut self, base_sequence: i64) -> Self {
        self.base_sequence = Some(base_sequence);
        self
    }

    /// Introspect the schema and write its migration scripts
    pub async fn run<S>(&self, source: &S) -> Result<GenerationReport>
    where
        S: SchemaSource + Sync + ?Sized,
    {
        let tables = SchemaAnalyzer::new(source).analyze().await?;
        let planned = plan(&tables);

        let base = self.base_sequence.unwrap_or_else(|| Utc::now().timestamp());
        let scripts = emit(&planned, base);

        let archived_to = output::archive(&self.directory)?;
        fs::create_dir_all(&self.directory)?;

        let mut files = Vec::with_capacity(scripts.len() * 2);
        for script in &scripts {
            files.push(output::write_file(&self.directory, &script.up_file_name(), &script.up)?);
            files.push(output::write_file(
                &self.directory,
                &script.down_file_name(),
                &script.down,
            )?);
        }

        tracing::info!(
            directory = %self.directory.display(),
            tables = scripts.len(),
            "Wrote migrations"
        );

        Ok(GenerationReport { archived_to, files })
    }
}
