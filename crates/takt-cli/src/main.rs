use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod export;
mod schedule;

/// Takt CLI - combination-ticket scheduling for linear assembly lines
#[derive(Parser)]
#[command(name = "takt")]
#[command(about = "Simulate and export assembly-line combination tickets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the line and print the timeline with wait totals
    Schedule {
        /// Step definitions JSON file (array of step objects)
        defs: PathBuf,
        /// Number of vehicles to feed through the line
        #[arg(short, long, default_value_t = 1)]
        cars: u32,
        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run the scheduler and export a ticket sheet
    Export {
        /// Step definitions JSON file (array of step objects)
        defs: PathBuf,
        /// Number of vehicles to feed through the line
        #[arg(short, long, default_value_t = 1)]
        cars: u32,
        /// Seconds per grid column
        #[arg(long, default_value_t = 1.0)]
        grid_step: f64,
        /// Where entry-wait bars are drawn: before | after
        #[arg(long, default_value = "before")]
        wait_policy: String,
        /// Project name shown in the ticket title
        #[arg(long, default_value = "")]
        project: String,
        /// Destination: a .csv path, or - for the terminal.
        /// Defaults to a timestamped ticket_*.csv in the working directory.
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule { defs, cars, json } => {
            schedule::run(&defs, cars, json)?;
        }
        Commands::Export {
            defs,
            cars,
            grid_step,
            wait_policy,
            project,
            out,
        } => {
            export::run(&defs, cars, grid_step, &wait_policy, &project, out.as_deref())?;
        }
    }

    Ok(())
}
