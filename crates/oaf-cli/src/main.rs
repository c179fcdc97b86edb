use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use oaf_core::parse::spec::OpenApiSpec;
use oaf_core::{parse, validate, FilterOptions};

#[derive(Parser)]
#[command(
    name = "oaf",
    about = "Filter and validate OpenAPI 3.x specifications",
    long_about = "Loads an OpenAPI spec, validates it, filters it down to the \
selected paths, operations and tags, carries along only the referenced \
components, and writes the result as JSON or YAML.",
    version
)]
struct Cli {
    /// Input spec: a file path or an http(s) URL
    #[arg(short, long)]
    input: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "yaml")]
    format: OutputFormat,

    /// Path prefixes to keep (e.g. /users,/orders)
    #[arg(short, long, value_delimiter = ',')]
    paths: Vec<String>,

    /// HTTP methods and/or operationIds to keep (e.g. get,createUser)
    #[arg(long, value_delimiter = ',')]
    operations: Vec<String>,

    /// Tag names to keep
    #[arg(short, long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Only validate the spec, without filtering
    #[arg(long)]
    validate_only: bool,

    /// Delete components left unreachable from the kept operations
    #[arg(long)]
    prune_components: bool,

    /// Print a summary of what would be kept instead of the document
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let spec = load_spec(&cli.input)?;
    validate::validate(&spec).context("spec validation failed")?;

    if cli.validate_only {
        println!("OpenAPI spec is valid");
        return Ok(());
    }

    let options = FilterOptions {
        paths: cli.paths,
        operations: cli.operations,
        tags: cli.tags,
        prune_components: cli.prune_components,
    };
    let filtered = oaf_core::filter(&spec, &options).context("failed to filter spec")?;

    if cli.dry_run {
        print_summary(&filtered);
        return Ok(());
    }

    // Serialize fully before touching the output file, so a failure never
    // leaves partial output behind.
    let rendered = render(&filtered, cli.format)?;
    match cli.output {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            std::io::stdout().write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}

fn load_spec(input: &str) -> Result<OpenApiSpec> {
    let content = if input.starts_with("http://") || input.starts_with("https://") {
        log::debug!("fetching spec from {input}");
        reqwest::blocking::get(input)
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("failed to fetch {input}"))?
            .text()
            .with_context(|| format!("failed to read response body from {input}"))?
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?
    };

    let spec = match Path::new(input).extension().and_then(|e| e.to_str()) {
        Some("json") => parse::from_json(&content),
        Some("yaml" | "yml") => parse::from_yaml(&content),
        // URLs and extension-less inputs: sniff the content.
        _ => parse::from_str(&content),
    }
    .with_context(|| format!("failed to parse {input}"))?;

    log::debug!(
        "loaded OpenAPI {} spec with {} paths",
        spec.openapi,
        spec.paths.len()
    );
    Ok(spec)
}

fn render(spec: &OpenApiSpec, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(spec).context("failed to serialize JSON")
        }
        OutputFormat::Yaml => serde_yaml_ng::to_string(spec).context("failed to serialize YAML"),
    }
}

fn print_summary(spec: &OpenApiSpec) {
    println!("{} {}", spec.info.title, spec.info.version);
    println!("Paths: {}", spec.paths.len());
    for (path, item) in &spec.paths {
        for (method, operation) in item.operations() {
            match &operation.operation_id {
                Some(id) => println!("  {} {}  ({})", method.as_str().to_uppercase(), path, id),
                None => println!("  {} {}", method.as_str().to_uppercase(), path),
            }
        }
    }
    if let Some(components) = &spec.components {
        println!(
            "Components: {} schemas, {} parameters, {} request bodies, {} responses",
            components.schemas.len(),
            components.parameters.len(),
            components.request_bodies.len(),
            components.responses.len()
        );
    }
    println!("Tags: {}", spec.tags.len());
}
