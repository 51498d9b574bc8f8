//! CLI command definitions, routing, and tracing setup.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::info;

use adrindex_core::pipeline::{self, IndexResult};
use adrindex_shared::{
    AdrIndexError, AppConfig, IndexConfig, init_config, load_config, load_config_from, to_toml,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// adrindex: index Architecture Decision Records by tag.
#[derive(Parser)]
#[command(
    name = "adrindex",
    version,
    about = "Validate ADR metadata and render a cross-referenced index grouped by tag.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./adrindex.toml, then ~/.adrindex/adrindex.toml).
    #[arg(long, global = true, env = "ADRINDEX_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Index output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Rendered through the layout template.
    Text,
    /// Tag groups as JSON.
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the index and print it to stdout.
    Render {
        /// Directory holding the ADR documents.
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Layout template file (defaults to the built-in layout).
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate every ADR without rendering (for pre-commit and CI).
    Check {
        /// Directory holding the ADR documents.
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default adrindex.toml into the current directory.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Crates whose events are shown at the requested verbosity.
const LOG_TARGETS: [&str; 4] = [
    "adrindex",
    "adrindex_core",
    "adrindex_asciidoc",
    "adrindex_shared",
];

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout is the index.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render {
            dir,
            template,
            format,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            cmd_render(config.index, dir, template, format)
        }
        Command::Check { dir } => {
            let config = resolve_config(cli.config.as_deref())?;
            cmd_check(config.index, dir)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Apply CLI overrides on top of the file config.
fn with_overrides(
    mut index: IndexConfig,
    dir: Option<PathBuf>,
    template: Option<PathBuf>,
) -> IndexConfig {
    if let Some(dir) = dir {
        index.adr_dir = dir;
    }
    if template.is_some() {
        index.template = template;
    }
    index
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_render(
    index: IndexConfig,
    dir: Option<PathBuf>,
    template: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let index = with_overrides(index, dir, template);
    info!(dir = %index.adr_dir.display(), ?format, "rendering ADR index");

    let result = build(&index)?;
    let output = match format {
        OutputFormat::Text => pipeline::render_text(&index, &result)?,
        OutputFormat::Json => pipeline::render_json_index(&result)?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .wrap_err("failed to write index to stdout")?;

    Ok(())
}

fn cmd_check(index: IndexConfig, dir: Option<PathBuf>) -> Result<()> {
    let index = with_overrides(index, dir, None);
    info!(dir = %index.adr_dir.display(), "checking ADR metadata");

    let result = build(&index)?;
    println!(
        "  {} ADRs, {} tags, all valid ({:.1}s)",
        result.records.len(),
        result.groups.len(),
        result.elapsed.as_secs_f64()
    );
    Ok(())
}

fn build(index: &IndexConfig) -> Result<IndexResult> {
    pipeline::build_index(index).map_err(|err| {
        let context = failure_context(&err, &index.adr_dir);
        Report::new(err).wrap_err(context)
    })
}

/// One-line summary naming the offending document when there is one.
fn failure_context(err: &AdrIndexError, adr_dir: &Path) -> String {
    match err.document_path() {
        Some(path) => format!(
            "failed to index ADRs in {}: fix {}",
            adr_dir.display(),
            path.display()
        ),
        None => format!("failed to index ADRs in {}", adr_dir.display()),
    }
}

fn cmd_config_init() -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| eyre!("cannot determine working directory: {e}"))?;
    let path = init_config(&cwd)?;
    println!("  Created {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    print!("{}", to_toml(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_flags() {
        let cli = Cli::parse_from([
            "adrindex", "-vv", "render", "--dir", "docs/adr", "--format", "json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Render { dir, template, format } => {
                assert_eq!(dir, Some(PathBuf::from("docs/adr")));
                assert!(template.is_none());
                assert!(matches!(format, OutputFormat::Json));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn failure_context_names_offending_document() {
        let err = AdrIndexError::MissingTags {
            path: PathBuf::from("adr/4-x.adoc"),
        };
        let msg = failure_context(&err, Path::new("adr"));
        assert_eq!(msg, "failed to index ADRs in adr: fix adr/4-x.adoc");

        let err = AdrIndexError::Render("bad layout".into());
        assert_eq!(failure_context(&err, Path::new("adr")), "failed to index ADRs in adr");
    }

    #[test]
    fn overrides_replace_file_values() {
        let base = IndexConfig {
            template: Some(PathBuf::from(".readme.templ")),
            ..IndexConfig::default()
        };

        let kept = with_overrides(base.clone(), None, None);
        assert_eq!(kept.adr_dir, PathBuf::from("adr"));
        assert_eq!(kept.template, Some(PathBuf::from(".readme.templ")));

        let replaced = with_overrides(base, Some("decisions".into()), Some("x.j2".into()));
        assert_eq!(replaced.adr_dir, PathBuf::from("decisions"));
        assert_eq!(replaced.template, Some(PathBuf::from("x.j2")));
    }
}
