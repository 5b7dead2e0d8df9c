mod error;
mod info;
pub mod output;
mod result;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::{RenderPreferences, RuntimeConfig};
use crate::documentation::{self, AssemblyOptions, DocumentSet};
use crate::file_processor::FileProcessor;
use crate::logging::{self, codes};
use crate::render::{self, PageMap};
use crate::{log_error, log_info, log_success};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Process a single export through the pipeline (file -> extraction -> decode -> assembly)
pub fn process_file(file_path: &Path, config: &RuntimeConfig) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(file_path.to_path_buf(), 0, || {
        log_info!("Starting documentation pipeline",
            "file" => file_path.display(),
            "root_namespace" => &config.decoder.root_namespace
        );

        // Stage 1: File processing
        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;

        // Stages 2-3: Extraction and assembly
        let entries = crate::extraction::extract_entries(&file_result.source)?;
        let entry_count = entries.len();
        let documents = assemble_entries(entries, config)?;

        let result = PipelineResult::new(
            documents,
            file_result.metadata,
            entry_count,
            start_time.elapsed(),
        );

        result.log_success(&file_path.display().to_string());

        Ok(result)
    })
}

/// Run extraction and assembly over export text already in memory
pub fn process_source(source: &str, config: &RuntimeConfig) -> Result<DocumentSet, PipelineError> {
    let entries = crate::extraction::extract_entries(source)?;
    assemble_entries(entries, config)
}

fn assemble_entries(
    entries: Vec<crate::extraction::DocEntry>,
    config: &RuntimeConfig,
) -> Result<DocumentSet, PipelineError> {
    let decoder = crate::identifier::create_decoder(&config.decoder)?;
    Ok(documentation::assemble_with_options(
        entries,
        &decoder,
        AssemblyOptions::from(&config.decoder),
    ))
}

/// Render every namespace page without touching the file system
pub fn render_pages(documents: &DocumentSet, preferences: &RenderPreferences) -> Result<PageMap, PipelineError> {
    Ok(render::create_writer(preferences).render_pages(documents)?)
}

/// Stage 4: render and write every namespace page into the configured output directory
pub fn write_pages(documents: &DocumentSet, preferences: &RenderPreferences) -> Result<Vec<PathBuf>, PipelineError> {
    let start_time = Instant::now();
    let written = render::create_writer(preferences).render(documents)?;

    crate::log_performance!(codes::success::RENDERING_COMPLETE, "Page rendering timed",
        duration = start_time.elapsed(),
        "pages" => written.len()
    );

    Ok(written)
}

/// Write the assembled document set as pretty-printed JSON
pub fn export_json(result: &PipelineResult, output_path: &Path) -> Result<(), PipelineError> {
    let output = PipelineOutput::new(result.file_metadata.path.clone(), result.documents.clone());

    let json = output.to_json().map_err(|e| {
        log_error!(codes::output::JSON_EXPORT_FAILURE, "Failed to serialize documentation",
            "error" => &e
        );
        PipelineError::from(e)
    })?;

    fs::write(output_path, json).map_err(|e| {
        log_error!(codes::output::JSON_EXPORT_FAILURE, "Failed to write JSON export",
            "path" => output_path.display(),
            "io_error" => &e
        );
        PipelineError::Json {
            message: format!("{}: {}", output_path.display(), e),
        }
    })?;

    log_success!(codes::success::JSON_EXPORT_COMPLETE, "Documentation exported as JSON",
        "path" => output_path.display(),
        "members" => result.documents.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    const EXPORT: &str = r#"<?xml version="1.0"?>
<doc>
    <assembly><name>Assembly-CSharp</name></assembly>
    <members>
        <member name="T:MW.Math.Vector2">
            <summary>A two component vector.</summary>
        </member>
        <member name="M:MW.Math.Vector2.Dot(MW.Math.Vector2,MW.Math.Vector2)">
            <summary>Dot product.</summary>
            <param name="a">First operand.</param>
            <param name="b">Second operand.</param>
            <returns>The scalar product.</returns>
        </member>
        <member name="P:MW.Physics.Body.Mass">
            <summary>Mass in kilograms.</summary>
        </member>
    </members>
</doc>
"#;

    fn config_for(output_dir: PathBuf) -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.decoder.root_namespace = "MW".to_string();
        config.decoder.translations_file = None;
        config.file_processor.require_xml_extension = false;
        config.render.output_dir = output_dir;
        config
    }

    #[test]
    fn test_validate_pipeline() {
        let _ = crate::logging::init_global_logging();
        let result = validate_pipeline();
        assert!(result.is_ok());
    }

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        assert_matches!(error, PipelineError::Pipeline { ref message } if message == "Test error");
        assert_eq!(error.error_code().as_str(), "ERR001");
    }

    #[test]
    fn test_process_file_end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Assembly-CSharp.xml");
        fs::write(&input, EXPORT).unwrap();
        let config = config_for(dir.path().join("html"));

        let result = process_file(&input, &config).unwrap();

        assert_eq!(result.entry_count, 3);
        assert_eq!(result.documents.len(), 3);
        assert_eq!(result.namespace_count(), 2);
        assert_eq!(result.type_count(), 1);

        let dot = &result.documents.members()[1];
        assert_eq!(dot.record.class_name, "Vector2");
        assert_eq!(dot.record.member_name, "Dot");
        assert_eq!(dot.record.parameters.len(), 2);
        assert_eq!(dot.record.parameters[0].name, "a");
        assert_eq!(dot.record.parameters[1].description, "Second operand.");
        assert_eq!(dot.returns, "The scalar product.");

        let written = write_pages(&result.documents, &config.render).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|path| path.exists()));
    }

    #[test]
    fn test_process_file_propagates_stage_errors() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path().join("html"));

        let missing = process_file(&dir.path().join("missing.xml"), &config);
        assert_matches!(missing, Err(PipelineError::FileProcessing(_)));

        let broken = dir.path().join("broken.xml");
        fs::write(&broken, "<doc><members><member name=\"T:MW.A\"></doc>").unwrap();
        assert_matches!(process_file(&broken, &config), Err(PipelineError::Extraction(_)));
    }

    #[test]
    fn test_process_source_and_render_pages() {
        let config = config_for(PathBuf::from("unused"));
        let documents = process_source(EXPORT, &config).unwrap();

        let pages = render_pages(&documents, &config.render).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages.values().any(|html| html.contains("Dot (Vector2 a, Vector2 b)")));
    }

    #[test]
    fn test_export_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Assembly-CSharp.xml");
        fs::write(&input, EXPORT).unwrap();
        let config = config_for(dir.path().join("html"));
        let result = process_file(&input, &config).unwrap();

        let json_path = dir.path().join("members.json");
        export_json(&result, &json_path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert!(parsed["generated_at"].is_string());
        assert_eq!(parsed["members"]["members"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_export_json_unwritable_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Assembly-CSharp.xml");
        fs::write(&input, EXPORT).unwrap();
        let config = config_for(dir.path().join("html"));
        let result = process_file(&input, &config).unwrap();

        let target = dir.path().join("no_such_dir").join("members.json");
        assert_matches!(export_json(&result, &target), Err(PipelineError::Json { .. }));
    }
}
