use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stripboard::{project, util, App, BudgetStore, Config, Database, ScheduleStore, StateStore};

#[derive(Parser)]
#[command(name = "stripboard", version, about = "Shooting schedule and budget tracker")]
struct Cli {
    /// Override the data directory (default: ~/.stripboard)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the current project to a .filmproj file
    Export {
        /// Output path (default: "<project name>.filmproj")
        path: Option<PathBuf>,
    },
    /// Load a .filmproj file, replacing the current project data
    Import {
        /// Project file to load
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    // Initialize logging to file (~/.stripboard/logs/stripboard.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    let config = Config::load();
    let db = Database::open_default()?;

    match cli.command {
        Some(Command::Export { path }) => run_export(&config, &db, path),
        Some(Command::Import { path }) => run_import(&db, &path),
        None => {
            let mut app = App::new(config, &db)?;
            app.run().await
        }
    }
}

fn load_stores(db: &Database) -> Result<(ScheduleStore, BudgetStore)> {
    let mut schedule = ScheduleStore::new(StateStore::new(db.connection()));
    let mut budget = BudgetStore::new(StateStore::new(db.connection()));
    schedule.load()?;
    budget.load()?;
    Ok((schedule, budget))
}

fn run_export(config: &Config, db: &Database, path: Option<PathBuf>) -> Result<()> {
    let (schedule, budget) = load_stores(db)?;
    let path = path.unwrap_or_else(|| project::default_export_path(&config.project_name));
    project::export_project(&path, &config.project_name, &schedule, &budget)?;
    println!("Saved {}", path.display());
    Ok(())
}

fn run_import(db: &Database, path: &PathBuf) -> Result<()> {
    let (mut schedule, mut budget) = load_stores(db)?;
    let bundle = project::import_project(path, &mut schedule, &mut budget)?;
    println!(
        "Loaded \"{}\" ({} scenes, {} budget items)",
        bundle.project_name,
        bundle.schedule_data.len(),
        bundle.budget_data.len()
    );
    Ok(())
}
