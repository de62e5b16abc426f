//! modelgen command line
//!
//! ```bash
//! modelgen generate -c user:pass@localhost:3306 -d shop -o models -p models
//! modelgen migrate -c user:pass@localhost:3306 -d shop -o migrations
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use modelgen::config::{self, Config};
use modelgen::utils::init_logging;
use modelgen::{GenerationReport, ModelgenClient};

#[derive(Parser)]
#[command(name = "modelgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate sqlx models and migrations from a MySQL schema", long_about = None)]
struct Cli {
    /// Package name written into generated files
    #[arg(short, long, global = true)]
    package: Option<String>,

    /// Output directory
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Name of the database to inspect
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Connection string, user:pass@host:port
    #[arg(short, long, global = true)]
    connection: Option<String>,

    /// TOML configuration file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate models from a database connection
    Generate,
    /// Generate migration files from a database connection
    Migrate,
    /// Print the current version
    Version,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let path = path.to_string_lossy();
                config::load_from_file(&path)
                    .with_context(|| format!("Failed to load configuration from {}", path))?
            }
            None => Config::default(),
        };

        if let Some(package) = &self.package {
            config.output.package = package.clone();
        }
        if let Some(output) = &self.output {
            config.output.directory = output.clone();
            config.migrations.directory = output.clone();
        }
        if let Some(database) = &self.database {
            config.database.name = database.clone();
        }
        if let Some(connection) = &self.connection {
            config.database.connection = connection.clone();
        }

        Ok(config)
    }
}

fn print_report(report: &GenerationReport) {
    if let Some(archived) = &report.archived_to {
        println!("Archived previous output to {}", archived.display());
    }
    for file in &report.files {
        println!("{}", file.display());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let migrate = match cli.command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Generate => false,
        Commands::Migrate => true,
    };

    let config = cli.resolve_config()?;
    init_logging(&config.logging.clone().unwrap_or_default())
        .context("Failed to initialize logging")?;
    config.validate()?;

    let client = ModelgenClient::new(config)
        .await
        .context("Failed to connect to database")?;

    let result = if migrate {
        client.generate_migrations().await
    } else {
        client.generate_models().await
    };
    client.close().await;

    let report = result?;
    print_report(&report);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_fill_an_empty_config() {
        let cli = Cli::parse_from([
            "modelgen", "generate", "-c", "root:pw@localhost:3306", "-d", "shop", "-o", "out",
        ]);
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.database.connection, "root:pw@localhost:3306");
        assert_eq!(config.database.name, "shop");
        assert_eq!(config.output.directory, "out");
        assert_eq!(config.migrations.directory, "out");
        assert_eq!(config.output.package, "generated_models");
    }

    #[test]
    fn test_flags_override_file_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nconnection = \"app:secret@db:3306\"\nname = \"shop\"\n\n[output]\npackage = \"models\""
        )
        .unwrap();

        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from(["modelgen", "migrate", "--config", path.as_str(), "-d", "shop_test"]);
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.database.connection, "app:secret@db:3306");
        assert_eq!(config.database.name, "shop_test");
        assert_eq!(config.output.package, "models");
    }

    #[test]
    fn test_version_subcommand_parses() {
        let cli = Cli::parse_from(["modelgen", "version"]);
        assert!(matches!(cli.command, Commands::Version));
    }
}
