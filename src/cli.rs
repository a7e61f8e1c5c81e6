//! Command-line interface for shelldoc.

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::{self, Config};
use crate::construct::{Construct, ConstructKind, Span};
use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::docs::DocumentationChain;
use crate::inspections::{enabled_inspections, InspectionContext};
use crate::report::{self, DocResolution, SourceListing};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SHELLDOC_LOG";

/// Shell command documentation and inspection registry.
///
/// Looks up documentation for shell builtins and external commands from a
/// bundled documentation pack, and lists the inspections available to
/// analysis runs.
#[derive(Parser)]
#[command(name = "shelldoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log diagnostics (unreadable pages, configuration discovery) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show documentation for one or more names
    #[command(visible_alias = "show")]
    Doc(DocArgs),
    /// List the inspections enabled for a context
    Inspections(InspectionsArgs),
    /// Create a new shelldoc.yaml from the template
    Init(InitArgs),
}

/// Arguments for the doc command.
#[derive(Parser)]
pub struct DocArgs {
    /// Names to look up (e.g. echo, grep)
    pub names: Vec<String>,

    /// Construct kind: command, keyword, operator, variable or other
    #[arg(short, long, default_value = "command")]
    pub kind: String,

    /// The name as originally written, when it was resolved from an alias
    #[arg(long)]
    pub original: Option<String>,

    /// Directory with documentation pages (overrides the configuration)
    #[arg(short, long)]
    pub docs_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// List the documented names of every source instead
    #[arg(short, long)]
    pub list: bool,
}

/// Arguments for the inspections command.
#[derive(Parser)]
pub struct InspectionsArgs {
    /// Context: test (complete list) or project (configuration applied)
    #[arg(long, default_value = "test")]
    pub context: String,

    /// Path to configuration file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "shelldoc.yaml")]
    pub output: PathBuf,
}

/// Install the `tracing` subscriber.
///
/// `SHELLDOC_LOG` takes precedence; otherwise `--verbose` selects `debug` and
/// the default is `warn`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "shelldoc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn validate_format(format: &str) -> bool {
    if format != "pretty" && format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            format
        );
        return false;
    }
    true
}

/// Load the explicit configuration, or a discovered one, or defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => config::discover(&std::env::current_dir()?),
    };

    let config = match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "using configuration");
            Config::parse_file(&p)
                .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", p.display(), e))?
        }
        None => {
            tracing::debug!("no configuration found, using defaults");
            Config::default()
        }
    };

    config::validate(&config)?;
    Ok(config)
}

/// Look up every name against `chain`, in parallel, keeping input order.
pub fn resolve_names(
    chain: &DocumentationChain,
    names: &[String],
    kind: ConstructKind,
    original: Option<&str>,
) -> Vec<DocResolution> {
    let original = original.map(|o| Construct::new(kind, o, Span::new(0, o.len())));

    names
        .par_iter()
        .map(|name| {
            let element = Construct::new(kind, name.as_str(), Span::new(0, name.len()));
            let found = chain.resolve_with_source(&element, original.as_ref());
            DocResolution {
                name: name.clone(),
                kind,
                source: found.as_ref().map(|(source, _)| source.to_string()),
                documentation: found.map(|(_, text)| text),
            }
        })
        .collect()
}

/// Run the doc command.
pub fn run_doc(args: &DocArgs) -> anyhow::Result<i32> {
    if !validate_format(&args.format) {
        return Ok(EXIT_ERROR);
    }

    let kind: ConstructKind = match args.kind.parse() {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if args.names.is_empty() && !args.list {
        eprintln!("Error: no names given");
        eprintln!("Run 'shelldoc doc --list' to see documented names");
        return Ok(EXIT_ERROR);
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if let Some(dir) = &args.docs_dir {
        if !dir.is_dir() {
            eprintln!("Error: docs directory {:?} does not exist", dir);
            return Ok(EXIT_ERROR);
        }
        config.docs.root = Some(dir.clone());
    }

    let sink: Arc<dyn DiagnosticsSink> = Arc::new(TracingSink);
    let chain = config.build_chain(sink);

    for name in chain.duplicate_source_names() {
        tracing::warn!(source = %name, "documentation source name is configured more than once");
    }

    if args.list {
        return list_pages(&config, &args.format);
    }

    let results = resolve_names(&chain, &args.names, kind, args.original.as_deref());

    match args.format.as_str() {
        "json" => report::write_doc_json(&results)?,
        _ => report::write_doc_pretty(&results),
    }

    if results.iter().all(DocResolution::is_found) {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Pages available to each configured source.
pub fn source_listings(config: &Config) -> Vec<SourceListing> {
    let store = config.store();
    let sources: Vec<(String, String)> = if config.docs.sources.is_empty() {
        vec![
            ("builtin".to_string(), config::SourceKind::Builtin.default_prefix().to_string()),
            ("external".to_string(), config::SourceKind::External.default_prefix().to_string()),
        ]
    } else {
        config
            .docs
            .sources
            .iter()
            .map(|s| (s.name.clone(), s.prefix().to_string()))
            .collect()
    };

    sources
        .into_iter()
        .map(|(source, prefix)| SourceListing {
            keys: store.keys(&prefix),
            source,
            prefix,
        })
        .collect()
}

fn list_pages(config: &Config, format: &str) -> anyhow::Result<i32> {
    let listings = source_listings(config);
    match format {
        "json" => report::write_listing_json(&listings)?,
        _ => report::write_listing_pretty(&listings),
    }
    Ok(EXIT_SUCCESS)
}

/// Run the inspections command.
pub fn run_inspections(args: &InspectionsArgs) -> anyhow::Result<i32> {
    if !validate_format(&args.format) {
        return Ok(EXIT_ERROR);
    }

    let inspections = match args.context.as_str() {
        "test" => enabled_inspections(InspectionContext::TestHarness),
        "project" => {
            let config = match load_config(args.config.as_deref()) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: invalid configuration: {}", e);
                    return Ok(EXIT_ERROR);
                }
            };
            enabled_inspections(InspectionContext::Project(&config.inspections))
        }
        other => {
            eprintln!(
                "Error: invalid context {:?}, must be 'test' or 'project'",
                other
            );
            return Ok(EXIT_ERROR);
        }
    };

    match args.format.as_str() {
        "json" => report::write_inspections_json(&args.context, &inspections)?,
        _ => report::write_inspections_pretty(&args.context, &inspections),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::TEMPLATE) {
        eprintln!("Error: failed to write configuration: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to point at your documentation pages", args.output.display());
    println!("  2. Run: shelldoc doc echo --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullSink;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_names_keeps_order() {
        let chain = Config::default().build_chain(Arc::new(NullSink));
        let names: Vec<String> = ["grep", "nope", "echo", "cd"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let results = resolve_names(&chain, &names, ConstructKind::Command, None);
        let got: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(got, vec!["grep", "nope", "echo", "cd"]);

        assert_eq!(results[0].source.as_deref(), Some("external"));
        assert!(!results[1].is_found());
        assert!(results[1].source.is_none());
        assert_eq!(results[2].source.as_deref(), Some("builtin"));
    }

    #[test]
    fn test_non_command_kinds_are_not_documented() {
        let chain = Config::default().build_chain(Arc::new(NullSink));
        let results = resolve_names(&chain, &["echo".to_string()], ConstructKind::Keyword, None);
        assert!(!results[0].is_found());
    }

    #[test]
    fn test_source_listings_default() {
        let listings = source_listings(&Config::default());
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].source, "builtin");
        assert!(listings[0].keys.contains(&"echo".to_string()));
        assert!(listings[1].keys.contains(&"grep".to_string()));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("shelldoc.yaml");
        std::fs::write(&output, "keep me").unwrap();

        let code = run_init(&InitArgs { output: output.clone() }).unwrap();
        assert_eq!(code, EXIT_ERROR);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
    }

    #[test]
    fn test_init_writes_template() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("nested/shelldoc.yaml");

        let code = run_init(&InitArgs { output: output.clone() }).unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        assert!(Config::parse_file(&output).is_ok());
    }

    #[test]
    fn test_cli_parses_doc_command() {
        let cli = Cli::try_parse_from(["shelldoc", "doc", "echo", "grep", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Doc(args) => {
                assert_eq!(args.names, vec!["echo", "grep"]);
                assert_eq!(args.format, "json");
                assert_eq!(args.kind, "command");
            }
            _ => panic!("expected doc command"),
        }
    }
}
