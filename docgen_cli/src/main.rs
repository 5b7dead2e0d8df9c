//! # MW Docs
//!
//! Turns an XML documentation export into one HTML page per namespace.

use clap::Parser;
use docgen::config::runtime::RuntimeConfig;
use docgen::{log_error, log_info, logging, pipeline};
use docgen_cli::cli::Cli;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.info {
        let info = pipeline::get_pipeline_info();
        println!("MW Docs v{}", env!("CARGO_PKG_VERSION"));
        println!("{}\n", info.summary());
        println!("{}", info.report());
        return ExitCode::SUCCESS;
    }

    let config = cli.runtime_config();

    if let Err(e) = logging::config::init_runtime_preferences(config.logging.clone())
        .and_then(|()| logging::init_global_logging())
    {
        eprintln!("Error: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = pipeline::validate_pipeline() {
        eprintln!("Error: pipeline configuration is invalid: {}", e);
        return ExitCode::FAILURE;
    }

    let status = match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!(e.error_code(), "Documentation generation failed", "error" => &e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    };

    logging::print_cargo_style_summary();
    status
}

fn run(cli: &Cli, config: &RuntimeConfig) -> Result<(), pipeline::PipelineError> {
    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| pipeline::PipelineError::pipeline_error("No input file given"))?;
    let start_time = Instant::now();

    log_info!("MW Docs starting", "input" => input.display());

    let result = pipeline::process_file(input, config)?;

    if let Some(json_path) = &cli.json {
        pipeline::export_json(&result, json_path)?;
    }

    if cli.dry_run {
        let pages = pipeline::render_pages(&result.documents, &config.render)?;
        if !cli.quiet {
            println!("Dry run: {} page(s) rendered, nothing written", pages.len());
            for name in pages.keys() {
                println!("  {}", config.render.output_dir.join(name).display());
            }
        }
    } else {
        let written = pipeline::write_pages(&result.documents, &config.render)?;
        if !cli.quiet {
            println!(
                "Wrote {} page(s) to {}",
                written.len(),
                config.render.output_dir.display()
            );
        }
    }

    if !cli.quiet {
        print_summary(&result, start_time.elapsed());
    }

    Ok(())
}

fn print_summary(result: &pipeline::PipelineResult, elapsed: std::time::Duration) {
    println!("\n=== Documentation Summary ===");
    println!("Source: {}", result.file_metadata.path.display());
    println!("Size: {}", result.file_metadata.human_readable_size());
    println!("Members: {}", result.documents.len());
    println!("Types: {}", result.type_count());
    println!("Namespaces: {}", result.namespace_count());
    println!("Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    let summary = logging::get_processing_summary();
    if summary.has_warnings() {
        println!("Warnings: {}", summary.total_warnings);
    }
}
