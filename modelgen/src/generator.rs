//! Model generation pipeline
//!
//! Every table is introspected, assembled and rendered before anything is
//! written, so a bad column type aborts the run with the previous output still
//! in place.

use std::fs;
use std::path::PathBuf;

use crate::config::OutputConfig;
use crate::db::source::SchemaSource;
use crate::error::Result;
use crate::models::assembler::{assemble, TableModel};
use crate::output::{self, GenerationReport};
use crate::render::{file_name, Renderer, MOD_FILE};
use crate::schema::analyzer::SchemaAnalyzer;
use crate::support;

/// A file ready to be written
struct RenderedFile {
    name: String,
    contents: String,
}

/// Generates one model source file per table
pub struct ModelGenerator {
    directory: PathBuf,
    renderer: Renderer,
}

impl ModelGenerator {
    /// Create a generator with the built-in table template
    pub fn new(config: &OutputConfig) -> Result<Self> {
        Ok(Self {
            directory: PathBuf::from(&config.directory),
            renderer: Renderer::new(&config.package)?,
        })
    }

    /// Create a generator with a custom renderer
    pub fn with_renderer(config: &OutputConfig, renderer: Renderer) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            renderer,
        }
    }

    /// Introspect the schema and write the generated package
    pub async fn run<S>(&self, source: &S) -> Result<GenerationReport>
    where
        S: SchemaSource + Sync + ?Sized,
    {
        let tables = SchemaAnalyzer::new(source).analyze().await?;

        let models = tables
            .iter()
            .map(assemble)
            .collect::<Result<Vec<TableModel>>>()?;

        let rendered = self.render_all(&models);

        let archived_to = output::archive(&self.directory)?;
        fs::create_dir_all(&self.directory)?;

        let mut files = Vec::with_capacity(rendered.len());
        for file in &rendered {
            files.push(output::write_file(&self.directory, &file.name, &file.contents)?);
        }

        tracing::info!(
            directory = %self.directory.display(),
            package = self.renderer.package(),
            tables = models.len(),
            "Generated models"
        );

        Ok(GenerationReport { archived_to, files })
    }

    fn render_all(&self, models: &[TableModel]) -> Vec<RenderedFile> {
        let mut rendered: Vec<RenderedFile> = models
            .iter()
            .map(|model| {
                tracing::debug!(table = model.table_name.as_str(), "Rendering table");
                RenderedFile {
                    name: file_name(&model.table_name),
                    contents: self.renderer.render(model),
                }
            })
            .collect();

        rendered.push(RenderedFile {
            name: support::HELPERS_FILE.to_string(),
            contents: support::HELPERS_SOURCE.to_string(),
        });
        rendered.push(RenderedFile {
            name: support::HELPERS_TEST_FILE.to_string(),
            contents: support::HELPERS_TEST_SOURCE.to_string(),
        });
        rendered.push(RenderedFile {
            name: MOD_FILE.to_string(),
            contents: self.renderer.render_mod_file(models),
        });

        rendered
    }
}
