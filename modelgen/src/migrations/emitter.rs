//! Up/down script generation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::migrations::planner::OrderedMigration;

// The table option only, never a column's AUTO_INCREMENT attribute
static AUTO_INCREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms) AUTO_INCREMENT=[0-9]*\b").expect("valid AUTO_INCREMENT pattern")
});

/// A create/drop script pair for one table
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationScript {
    pub sequence: i64,
    pub table: String,
    pub up: String,
    pub down: String,
}

impl MigrationScript {
    fn stem(&self) -> String {
        format!("{}_create_{}", self.sequence, self.table)
    }

    pub fn up_file_name(&self) -> String {
        format!("{}.up.sql", self.stem())
    }

    pub fn down_file_name(&self) -> String {
        format!("{}.down.sql", self.stem())
    }
}

/// Remove the run-specific auto-increment start value from creation DDL
pub fn strip_auto_increment(create_statement: &str) -> String {
    AUTO_INCREMENT.replace_all(create_statement, "").into_owned()
}

/// Build script pairs, numbering them from `base_sequence` in planned order
pub fn emit(planned: &[OrderedMigration], base_sequence: i64) -> Vec<MigrationScript> {
    planned
        .iter()
        .enumerate()
        .map(|(index, migration)| MigrationScript {
            sequence: base_sequence + index as i64,
            table: migration.table.clone(),
            up: format!("{};", strip_auto_increment(&migration.create_statement)),
            down: format!("DROP TABLE IF EXISTS {};", migration.table),
        })
        .collect()
}
