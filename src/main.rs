use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use datepick::commands::{grid::GridArgs, parse::ParseArgs, pick::PickArgs};
use datepick::{commands, config};

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "datepick")]
#[command(about = "Terminal date and date-range picker", long_about = "Terminal date and date-range picker\n\nIf no command is specified, the program starts the interactive picker and prints the chosen value on exit.")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags shared by every command that honours selection limits
#[derive(Args, Default)]
struct ConstraintFlags {
    /// Earliest selectable day, YYYY-MM-DD
    #[arg(long)]
    min: Option<String>,

    /// Latest selectable day, YYYY-MM-DD
    #[arg(long)]
    max: Option<String>,

    /// Day that cannot be picked, YYYY-MM-DD (repeatable)
    #[arg(long)]
    disable: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a date (or a range) interactively
    Pick {
        /// Pick a start and end day instead of a single day
        #[arg(short, long)]
        range: bool,

        /// Starting value in the configured date format
        #[arg(short, long)]
        value: Option<String>,

        /// Open the calendar immediately
        #[arg(short, long)]
        open: bool,

        #[command(flatten)]
        limits: ConstraintFlags,
    },
    /// Print the calendar grid for a month
    Grid {
        /// Any day of the first month shown, YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Number of consecutive months
        #[arg(short, long)]
        months: Option<usize>,

        /// First day of the week, 0=Sunday through 6=Saturday
        #[arg(short, long)]
        first_day: Option<u8>,

        /// Locale for month and weekday names (e.g. fr_FR)
        #[arg(short, long)]
        locale: Option<String>,

        /// Leave days of neighbouring months blank
        #[arg(long)]
        hide_outside: bool,

        /// Use ASCII instead of box-drawing characters
        #[arg(long)]
        ascii: bool,

        #[command(flatten)]
        limits: ConstraintFlags,
    },
    /// Parse text with a date pattern and check it against limits
    Parse {
        /// Text to parse
        text: String,

        /// Pattern such as yyyy-MM-dd (defaults to the configured one)
        #[arg(short, long)]
        format: Option<String>,

        /// Parse "start - end"
        #[arg(short, long)]
        range: bool,

        #[command(flatten)]
        limits: ConstraintFlags,
    },
    /// List month and weekday names for a locale
    Labels {
        /// Locale (e.g. de_DE); defaults to the configured one
        #[arg(short, long)]
        locale: Option<String>,
    },
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!("date_format: {}", cfg.date_format);
    println!("locale: {}", cfg.locale.as_deref().unwrap_or("(default)"));
    println!("first_day_of_week: {}", cfg.first_day_of_week);
    println!("months_to_display: {}", cfg.months_to_display);
    println!("show_outside_days: {}", cfg.show_outside_days);
    println!("close_on_select: {}", cfg.close_on_select);
    println!("range_close_on_start: {}", cfg.range_close_on_start);
    println!("range_close_on_complete: {}", cfg.range_close_on_complete);
    println!("trigger: {:?}", cfg.trigger);
    println!("use_unicode: {}", cfg.use_unicode);
    if let Some(names) = &cfg.month_names {
        println!("month_names: {}", names.join(", "));
    }
    if let Some(names) = &cfg.weekday_names {
        println!("weekday_names: {}", names.join(", "));
    }
    println!();
    println!("[theme]");
    println!("selection_fg: {:?}", cfg.theme.selection_fg);
    println!("range_fg: {:?}{}",
        cfg.theme.range_fg(),
        if cfg.theme.range_fg.is_none() { " (auto: 50% darker)" } else { "" }
    );
    println!("disabled_fg: {:?}", cfg.theme.disabled_fg);
    println!("today_fg: {:?}", cfg.theme.today_fg);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

/// Execute a CLI command by routing it to the appropriate command handler
fn execute_command(config: &config::Config, command: Commands) -> anyhow::Result<()> {
    let display = config.display();
    match command {
        Commands::Config => unreachable!("Config command should be handled before execute_command"),
        Commands::Pick { range, value, open, limits } => {
            let args = PickArgs {
                range,
                value,
                open,
                min: limits.min,
                max: limits.max,
                disable: limits.disable,
            };
            commands::pick::run(config, args, &display)
        }
        Commands::Grid { date, months, first_day, locale, hide_outside, ascii, limits } => {
            let args = GridArgs {
                date,
                months,
                first_day,
                locale,
                min: limits.min,
                max: limits.max,
                disable: limits.disable,
                hide_outside,
            };
            let display = if ascii {
                config::Config { use_unicode: false, ..config.clone() }.display()
            } else {
                display
            };
            commands::grid::run(config, args, &display)
        }
        Commands::Parse { text, format, range, limits } => {
            let args = ParseArgs {
                text,
                format,
                range,
                min: limits.min,
                max: limits.max,
                disable: limits.disable,
            };
            commands::parse::run(config, &args)
        }
        Commands::Labels { locale } => commands::labels::run(config, locale.as_deref(), &display),
    }
}

fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // If no subcommand, run the interactive picker
    let command = cli.command.unwrap_or(Commands::Pick {
        range: false,
        value: None,
        open: false,
        limits: ConstraintFlags::default(),
    });

    // Handle Config command separately
    if let Commands::Config = command {
        handle_config_command();
        return;
    }

    if let Err(e) = execute_command(&config, command) {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
