use anyhow::Result;
use clap::{Parser, Subcommand};

use buzzpay::cli::{handle_export_command, handle_request_command, ExportArgs, RequestCommands};
use buzzpay::config::{BuzzPayPaths, Settings, StoreBackend};
use buzzpay::logging::{init_tracing, log_env_set};
use buzzpay::storage::Storage;

#[derive(Parser)]
#[command(
    name = "buzzpay",
    version,
    about = "Payment requests you can share over WhatsApp",
    long_about = "BuzzPay guides you through a short form to request money from \
                  someone, stores the request and shares a link to it. The \
                  recipient verifies their phone number, pays, and both of you \
                  get a receipt."
)]
struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a request with the interactive wizard
    #[command(alias = "tui")]
    New,

    /// Payment request commands
    #[command(subcommand, alias = "req")]
    Request(RequestCommands),

    /// Export all requests
    Export(ExportArgs),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics would draw over the TUI unless explicitly requested.
    let interactive = matches!(cli.command, Some(Commands::New));
    if !interactive || log_env_set() {
        init_tracing(cli.verbose);
    }

    let paths = BuzzPayPaths::new()?;
    let file_settings = Settings::load_or_create(&paths)?;
    let mut settings = file_settings.clone();
    settings.apply_env_overrides();

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("BuzzPay is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing BuzzPay at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            file_settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
            println!();
            println!("Run 'buzzpay new' to create your first payment request.");
        }
        Some(Commands::Config) => {
            println!("BuzzPay Configuration");
            println!("=====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Requests file:  {}", paths.requests_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            match settings.store.backend {
                StoreBackend::Local => println!("  Store:          local"),
                StoreBackend::Remote => println!(
                    "  Store:          remote ({})",
                    settings.store.url.as_deref().unwrap_or("no URL")
                ),
            }
            println!("  Share host:     {}", settings.share_host);
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Step delay:     {} ms", settings.wizard.step_delay_ms);
            println!("  Verify delay:   {} ms", settings.wizard.verify_delay_ms);
            println!("  Idle timeout:   {} ms", settings.wizard.idle_timeout_ms);
        }
        Some(Commands::New) => {
            let storage = Storage::open(&paths, &settings)?;
            buzzpay::tui::run_tui(&storage, &settings)?;
        }
        Some(Commands::Request(cmd)) => {
            let storage = Storage::open(&paths, &settings)?;
            handle_request_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            let storage = Storage::open(&paths, &settings)?;
            handle_export_command(&storage, args)?;
        }
        Some(Commands::Audit { limit }) => {
            let storage = Storage::open(&paths, &settings)?;
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("BuzzPay - payment requests from the terminal");
            println!();
            println!("Run 'buzzpay --help' for usage information.");
            println!("Run 'buzzpay new' to create a request interactively.");
        }
    }

    Ok(())
}
