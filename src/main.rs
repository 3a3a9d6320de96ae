mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data_dir = args.data_dir;

    match args.command {
        Commands::Checkin {
            mood,
            note,
            date,
            goals,
            new_goals,
            media,
        } => cli::handle_checkin(data_dir, mood, note, date, goals, new_goals, media).await,
        Commands::Show { date } => cli::handle_show(data_dir, date),
        Commands::Year { year } => cli::handle_year(data_dir, year),
        Commands::Month { year, month } => cli::handle_month(data_dir, year, month),
        Commands::Garden { year } => cli::handle_garden(data_dir, year),
        Commands::Mix { months, year } => cli::handle_mix(data_dir, months, year),
        Commands::Goals { command } => cli::handle_goals(data_dir, command),
        Commands::Settings { command } => cli::handle_settings(data_dir, command),
    }
}
