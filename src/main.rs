// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use langtree::app_config::{self, Config, TranslationProvider};
use langtree::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "openai")]
    OpenAI,
    Google,
    Azure,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Azure => TranslationProvider::Azure,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare all translation files of a folder
    Compare(CompareArgs),

    /// Translate missing values and write the updated files
    Translate(TranslateArgs),

    /// Generate shell completions for langtree
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command that reads a folder
#[derive(Args, Debug)]
struct CommonArgs {
    /// Folder holding one JSON file or sub-folder per language
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "langtree.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Only show paths that are not Ok
    #[arg(short, long)]
    issues_only: bool,

    /// Also report intermediate mappings
    #[arg(long)]
    all_paths: bool,

    /// Left language of a pairwise comparison
    #[arg(long, requires = "right")]
    left: Option<String>,

    /// Right language of a pairwise comparison
    #[arg(long, requires = "left")]
    right: Option<String>,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Source language id (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language id, repeatable (defaults to every other loaded language)
    #[arg(short, long)]
    target_language: Vec<String>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// API key for the selected provider
    #[arg(long, env = "LANGTREE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Folder to write updated files to (defaults to DIR)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// langtree - reconcile per-language translation files
///
/// Compares nested JSON translation files across languages and fills missing
/// values through OpenAI, Google Translate or Azure Translator.
#[derive(Parser, Debug)]
#[command(name = "langtree")]
#[command(version)]
#[command(about = "Translation tree reconciliation tool")]
#[command(long_about = "langtree compares nested JSON translation files across languages and fills missing values using remote translation services.

EXAMPLES:
    langtree compare locales/                      # N-way report of every language
    langtree compare -i locales/                   # Only show missing keys and type mismatches
    langtree compare --left en --right fr locales/ # Pairwise report
    langtree translate -s en -t fr -t de locales/  # Fill French and German from English
    langtree translate -p google locales/          # Use Google Translate
    langtree completions bash > langtree.bash      # Generate bash completions

LAYOUT:
    locales/en.json, locales/fr.json               # language id = file stem
    locales/en/translate.json                      # language id = folder name

CONFIGURATION:
    Configuration is stored in langtree.json by default. You can specify a
    different config file with --config-path. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger with the most verbose level; the effective
    // level is lowered once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "langtree", &mut std::io::stdout());
            Ok(())
        }
        Commands::Compare(args) => run_compare(args),
        Commands::Translate(args) => run_translate(args).await,
    }
}

/// Load the config file, or create it with defaults when absent
fn load_config(common: &CommonArgs) -> Result<Config> {
    let config_path = &common.config_path;
    let mut config: Config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    if let Some(log_level) = &common.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(level_filter(&config.log_level));

    Ok(config)
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let mut config = load_config(&args.common)?;

    if args.issues_only {
        config.comparison.issues_only = true;
    }
    if args.all_paths {
        config.comparison.include_intermediate = true;
    }

    let controller = Controller::with_config(config)?;
    controller.run_compare(&args.common.dir, args.left.as_deref(), args.right.as_deref())?;
    Ok(())
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let mut config = load_config(&args.common)?;

    // Override config with CLI options if provided
    if let Some(provider) = &args.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(source_lang) = &args.source_language {
        config.source_language = source_lang.clone();
    }

    if !args.target_language.is_empty() {
        config.target_languages = args.target_language.clone();
    }

    if let Some(api_key) = &args.api_key {
        let provider = config.translation.provider;
        config.translation.provider_config_mut(provider).api_key = api_key.clone();
    }

    let controller = Controller::with_config(config)?;
    let summary = controller
        .run_translate(&args.common.dir, args.output_dir.as_deref())
        .await?;

    if summary.outcome.failed_count > 0 {
        warn!(
            "{} value(s) could not be translated",
            summary.outcome.failed_count
        );
    }

    Ok(())
}
