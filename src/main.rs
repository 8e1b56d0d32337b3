#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use polytable::app_config::{self, Config, TranslationProvider};
use polytable::language_utils::parse_target_list;
use polytable::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
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
    /// Generate shell completions for polytable
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// PNG or JPEG image to read the strings from
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Comma separated target codes (ID,JA,KO,MS,TH,VI,ZH)
    #[arg(short, long, value_name = "CODES")]
    target: Option<String>,

    /// Glossary CSV with per-language overrides
    #[arg(short, long, value_name = "CSV")]
    glossary: Option<String>,

    /// Directory the exports are written to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Also write timestamped copies to the storage directory
    #[arg(short, long)]
    save_copy: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// API key for the Anthropic provider
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// polytable - image to multilingual translation table
///
/// Reads the text of a screenshot and builds an aligned translation table,
/// preferring glossary overrides over machine translation.
#[derive(Parser, Debug)]
#[command(name = "polytable")]
#[command(version)]
#[command(about = "Turn the text of an image into a multilingual translation table")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "polytable extracts the text of a PNG/JPEG image and translates every string into the selected languages.

EXAMPLES:
    polytable screen.png                        # EN-only table using the default config
    polytable -t ID,JA,ZH screen.png            # Translate to Indonesian, Japanese and Chinese
    polytable -t TH -g glossary.csv screen.png  # Prefer glossary overrides
    polytable -t KO -s -o out screen.png        # Write to out/ and keep timestamped copies
    polytable -p anthropic -t VI screen.png     # Use the Anthropic provider
    polytable completions bash > polytable.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    google    - Public Google Translate endpoint (default)
    anthropic - Anthropic Claude API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    args: TranslateArgs,
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

    // @returns: Emoji and ANSI colour for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, colour) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The global filter is narrowed once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "polytable", &mut std::io::stdout());
            Ok(())
        }
        None => run_translate(cli.args).await,
    }
}

/// Load the config file, or write and return the defaults when it is missing
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

/// Override config values with the command line options that were given
fn apply_overrides(config: &mut Config, options: &TranslateArgs) -> Result<()> {
    if let Some(target) = &options.target {
        config.target_languages = parse_target_list(target)?;
    }

    if let Some(glossary) = &options.glossary {
        config.glossary.path = Some(glossary.clone());
    }

    if let Some(output_dir) = &options.output_dir {
        config.export.output_dir = output_dir.clone();
    }

    if options.save_copy {
        config.export.save_copy = true;
    }

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(api_key) = &options.api_key {
        if config.translation.provider == TranslationProvider::Anthropic {
            config.translation.active_provider_config_mut().api_key = api_key.clone();
        }
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(())
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let image = options
        .image
        .clone()
        .ok_or_else(|| anyhow!("IMAGE is required when no subcommand is specified"))?;

    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path)?;
    apply_overrides(&mut config, &options)?;
    config.dedup_target_languages();

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    if !image.is_file() {
        return Err(anyhow!("Input image does not exist: {:?}", image));
    }

    let controller = Controller::with_config(config)?;
    if let Some(output) = controller.run(&image).await? {
        info!(
            "Exported {} string(s) in {} column(s)",
            output.table.rows().len(),
            output.table.headers().len()
        );
    }

    Ok(())
}
