use folio::{DocumentPipelineBuilder, DocumentSpec, PipelineError, ReportCatalog};
use itertools::Itertools;
use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn usage(program: &str) {
    eprintln!("Generates a branded PDF from a JSON document spec.");
    eprintln!();
    eprintln!(
        "Usage: {} <path/to/document.json> <output-dir> [path/to/branding.json] [path/to/config.json]",
        program
    );
    eprintln!("       {} --list-reports", program);
    eprintln!();
    eprintln!("Logo paths in the branding profile are resolved relative to the document's directory.");
    eprintln!("Set RUST_LOG=info (or debug) for progress output.");
}

fn run(args: &[String]) -> Result<(), PipelineError> {
    let document_path = Path::new(&args[1]);
    let output_dir = Path::new(&args[2]);
    let asset_root = document_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = DocumentPipelineBuilder::new().with_asset_dir(asset_root);
    if let Some(branding) = args.get(3) {
        builder = builder.with_branding_files(Path::new(branding), None);
    }
    if let Some(config) = args.get(4) {
        builder = builder.with_config_file(config)?;
    }
    let pipeline = builder.build()?;

    let spec = DocumentSpec::from_json(&fs::read_to_string(document_path)?)?;
    let document = pipeline.generate(&spec)?;
    let path = document.save_to_dir(output_dir)?;
    println!("{} ({} pages)", path.display(), document.page_count);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("folio");
    if args.get(1).map(String::as_str) == Some("--list-reports") {
        let catalog = ReportCatalog::builtin();
        println!("Registered reports: {}", catalog.ids().join(", "));
        return ExitCode::SUCCESS;
    }
    if !(3..=5).contains(&args.len()) {
        usage(program);
        return ExitCode::from(2);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_request_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
