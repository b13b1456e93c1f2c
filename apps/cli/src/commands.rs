//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use ordliste_core::pipeline::{build_dictionary, formatter_for};
use ordliste_shared::{
    AppConfig, BuildConfig, CONFIG_FILE_NAME, FormatterKind, init_config, load_config,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Ordliste: build the English/Norwegian course dictionary.
#[derive(Parser)]
#[command(
    name = "ordliste",
    version,
    about = "Render an English/Norwegian word list into a Markdown dictionary page.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Path to the project config file.
    #[arg(long, default_value = CONFIG_FILE_NAME, global = true)]
    pub config: PathBuf,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `build` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the dictionary document and run the formatter pass.
    Build(BuildArgs),

    /// Exit non-zero if the dictionary document is not canonically formatted.
    Check {
        /// Document to check (defaults to the configured output path).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Formatter to check against: native or command.
        #[arg(short, long)]
        formatter: Option<FormatterKind>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Flags for `build`. Each one overrides the config file.
#[derive(Args, Debug, Default)]
pub(crate) struct BuildArgs {
    /// CSV word list to read.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Markdown document to write.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Formatter pass: native, command, or none.
    #[arg(short, long)]
    pub formatter: Option<FormatterKind>,

    /// Emit term values verbatim, without escaping `|`.
    #[arg(long)]
    pub raw: bool,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["ordliste", "ordliste_core", "ordliste_markdown", "ordliste_shared"]
        .map(|target| format!("{target}={level}"))
        .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

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
        None => cmd_build(&cli.config, &BuildArgs::default()),
        Some(Command::Build(args)) => cmd_build(&cli.config, &args),
        Some(Command::Check { output, formatter }) => {
            cmd_check(&cli.config, output.as_deref(), formatter)
        }
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(&cli.config),
            ConfigAction::Show => cmd_config_show(&cli.config),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_build(config_path: &Path, args: &BuildArgs) -> Result<()> {
    let config = load_config(Some(config_path))?;
    let build = resolve_build_config(&config, args);

    let mut formatter_config = config.formatter.clone();
    if let Some(kind) = args.formatter {
        formatter_config.kind = kind;
    }
    let formatter = formatter_for(&formatter_config);

    info!(
        input = %build.input.display(),
        output = %build.output.display(),
        formatter = formatter.name(),
        "building dictionary"
    );

    let result = build_dictionary(&build, formatter.as_ref())?;

    println!();
    println!("  Dictionary written!");
    println!("  Words:     {}", result.record_count);
    println!("  Formatter: {}", result.formatter);
    println!("  Path:      {}", result.output.display());
    println!("  Time:      {:.2}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

/// Merge `build` flags over the loaded config.
fn resolve_build_config(config: &AppConfig, args: &BuildArgs) -> BuildConfig {
    let mut build = BuildConfig::from(config);
    if let Some(input) = &args.input {
        build.input = input.clone();
    }
    if let Some(output) = &args.output {
        build.output = output.clone();
    }
    if args.raw {
        build.escape_delimiters = false;
    }
    build
}

fn cmd_check(
    config_path: &Path,
    output: Option<&Path>,
    kind: Option<FormatterKind>,
) -> Result<()> {
    let config = load_config(Some(config_path))?;
    let path = output.map_or_else(|| config.output.path.clone(), Path::to_path_buf);

    let mut formatter_config = config.formatter.clone();
    if let Some(kind) = kind {
        formatter_config.kind = kind;
    }
    let formatter = formatter_for(&formatter_config);

    info!(
        path = %path.display(),
        formatter = formatter.name(),
        "checking dictionary formatting"
    );

    if formatter.check_file(&path, &formatter_config.extensions)? {
        println!("{} is canonically formatted", path.display());
        Ok(())
    } else {
        Err(eyre!(
            "{} is not formatted as `{}` would write it. Run `ordliste build` to regenerate it.",
            path.display(),
            formatter.name()
        ))
    }
}

fn cmd_config_init(config_path: &Path) -> Result<()> {
    let path = init_config(config_path)?;
    println!("Config file created at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: &Path) -> Result<()> {
    let config = load_config(Some(config_path))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
