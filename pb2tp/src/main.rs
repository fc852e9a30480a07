//! Pathbuilder 2e to Tableplop converter.
//!
//! ```bash
//! pb2tp convert --id 182461 --out sheets/
//! pb2tp convert --file build.json --stdout
//! pb2tp renumber old_export.json renumbered.json
//! ```

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Command, ConvertArgs};
use pathbuilder::{Build, Pathbuilder};
use pb2tp_core::{convert, export_file_name, load_json, renumber, save_json, Document};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if args.verbose {
        EnvFilter::new("pb2tp=debug,pb2tp_core=debug,pathbuilder=debug")
    } else {
        EnvFilter::new("pb2tp=info,pb2tp_core=warn,pathbuilder=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Convert(convert_args) => run_convert(convert_args).await,
        Command::Renumber { input, output } => run_renumber(&input, &output).await,
    }
}

async fn run_convert(args: ConvertArgs) -> Result<()> {
    let build = match (&args.id, &args.file) {
        (Some(id), _) => {
            let client = Pathbuilder::from_env().context("Failed to configure Pathbuilder client")?;
            client
                .fetch_build(id)
                .await
                .with_context(|| format!("Failed to fetch Pathbuilder build {id}"))?
        }
        (None, Some(path)) => read_build_file(path).await?,
        (None, None) => anyhow::bail!("either --id or --file is required"),
    };

    let doc = convert(&build);

    if let Some(count) = args.preview {
        preview(&doc, count)?;
    }

    if args.stdout {
        println!("{}", doc.to_json_pretty()?);
        return Ok(());
    }

    let path = output_path(&doc, args.out.as_deref(), args.id.as_deref());
    save_json(&doc, &path)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!(
        "Wrote {} properties for {} to {}",
        doc.properties.len(),
        if build.name.is_empty() { "unnamed character" } else { build.name.as_str() },
        path.display()
    );
    Ok(())
}

/// Read a local build, accepting either a `json.php` response or a bare build object.
async fn read_build_file(path: &Path) -> Result<Build> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    match pathbuilder::unwrap_build(&body) {
        Ok(build) => Ok(build),
        Err(pathbuilder::Error::MissingBuild) => {
            let value: Value = serde_json::from_str(&body)?;
            tracing::debug!("no build wrapper, reading file as a bare build");
            Ok(Build::from_value(value))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to parse {}", path.display())),
    }
}

fn output_path(doc: &Document, out: Option<&Path>, id: Option<&str>) -> PathBuf {
    let file_name = export_file_name(doc, id);
    match out {
        Some(dir) if dir.is_dir() => dir.join(file_name),
        Some(file) => file.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

fn preview(doc: &Document, count: usize) -> Result<()> {
    let head = &doc.properties[..count.min(doc.properties.len())];
    println!("{}", serde_json::to_string_pretty(head)?);
    if doc.properties.len() > head.len() {
        println!("... {} more properties", doc.properties.len() - head.len());
    }
    Ok(())
}

async fn run_renumber(input: &Path, output: &Path) -> Result<()> {
    let mut doc = load_json(input)
        .await
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let stats = renumber(&mut doc);
    for issue in doc.integrity_issues() {
        tracing::warn!(%issue, "renumbered document has an integrity problem");
    }
    save_json(&doc, output)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    eprintln!(
        "Renumbered {} properties ({} left unchanged) into {}",
        stats.renumbered,
        stats.untouched,
        output.display()
    );
    Ok(())
}
