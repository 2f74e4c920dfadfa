use std::fs::OpenOptions;

use anyhow::Result;
use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use rental_cli::builder::build_menu;
use rental_cli::config::{RentalPaths, Settings};
use rental_cli::console::TerminalConsole;
use rental_cli::error::RentalError;
use rental_cli::menu::{Navigator, Session};
use rental_cli::storage::{seed_demo_data, Storage};

#[derive(Parser)]
#[command(
    name = "rental",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based rental property manager",
    long_about = "RentalCLI keeps track of rental units, their tenants, the rent \
                  those tenants pay and the expenses each unit incurs, through \
                  nested menus in the terminal. Run without arguments to start."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a demo data set (three units with tenants, rent and mortgage payments)
    Seed {
        /// Replace existing data
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Show the most recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },
}

/// Send `log` records to rental.log; stdout belongs to the menus
fn init_logging(paths: &RentalPaths) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file());
    if let Ok(log_file) = file {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

fn run_menus(storage: &Storage, settings: &Settings) -> Result<()> {
    let mut navigator = Navigator::new(build_menu()?)?;
    let mut console = TerminalConsole::new();
    let mut session = Session::new(&mut console, storage, settings);

    match session.welcome().and_then(|_| navigator.run(&mut session)) {
        Ok(()) => {}
        Err(RentalError::Interrupted) => log::info!("Session interrupted by user"),
        Err(e) => {
            log::error!("Session ended with error: {}", e);
            return Err(e.into());
        }
    }

    session.goodbye()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = RentalPaths::new()?;
    paths.ensure_directories()?;
    init_logging(&paths);
    let settings = Settings::load_or_create(&paths)?;

    log::info!("RentalCLI starting with data in {}", paths.base_dir().display());
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Seed { force }) => {
            let summary = seed_demo_data(&storage, force)?;
            settings.save(&paths)?;
            println!("Demo data written to: {}", paths.data_dir().display());
            println!("  Units:    {}", summary.units);
            println!("  Tenants:  {}", summary.tenants);
            println!("  Payments: {}", summary.payments);
            println!("  Expenses: {}", summary.expenses);
        }
        Some(Commands::Config) => {
            println!("RentalCLI Configuration");
            println!("=======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Outputs directory: {}", paths.outputs_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!("Log file:          {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Rent grace days:     {}", settings.rent_grace_days);
            println!("  Active tenants only: {}", settings.active_tenants_only);
        }
        Some(Commands::Audit { count }) => {
            let entries = storage.audit().read_recent(count)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => run_menus(&storage, &settings)?,
    }

    Ok(())
}
