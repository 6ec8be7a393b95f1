use anyhow::Context;
use clap::{Parser, Subcommand};
use goalbook::goal::parse_goal_date;
use goalbook::{Goal, JsonFileProvider};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "goalbook", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Goals file to use instead of the default data location
    #[arg(short = 'f', long, global = true)]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// List goals with the day each one marks on the clock
    List,
    /// Print the goals file location
    Path,
    /// Add a dated goal to the file
    Add {
        /// Goal title
        title: String,
        /// Due date, e.g. 2024-03-15
        date: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let provider = cli
        .file
        .map(JsonFileProvider::new)
        .unwrap_or_else(JsonFileProvider::at_default_path);

    match cli.command {
        Some(Commands::List) => list(&provider),
        Some(Commands::Path) => {
            println!("{}", provider.path().display());
            Ok(())
        }
        Some(Commands::Add { title, date }) => add(&provider, &title, &date),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn list(provider: &JsonFileProvider) -> anyhow::Result<()> {
    let goals = provider
        .try_read()
        .with_context(|| format!("Failed to read goals from {}", provider.path().display()))?;

    for goal in &goals {
        let id = goal.id.as_ref().map(ToString::to_string).unwrap_or_default();
        let day = goal
            .day_of_month()
            .map(|d| format!("{d:>2}"))
            .unwrap_or_else(|| " -".to_string());
        println!("{id:<16} {day}  {}", goal.display_title());
    }
    Ok(())
}

fn add(provider: &JsonFileProvider, title: &str, date: &str) -> anyhow::Result<()> {
    anyhow::ensure!(parse_goal_date(date).is_some(), "Unrecognised date '{}'", date);

    let mut goals = provider
        .try_read()
        .with_context(|| format!("Failed to read goals from {}", provider.path().display()))?;

    // the board keys goals by creation time in milliseconds
    let id = chrono::Local::now().timestamp_millis();
    goals.push(Goal::new(id, title, date));

    provider
        .save_goals(&goals)
        .with_context(|| format!("Failed to write goals to {}", provider.path().display()))?;
    println!("{id}");
    Ok(())
}
