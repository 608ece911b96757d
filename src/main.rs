use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use rando_picker::{Picker, PickerConfig, TeamSummary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rando-picker")]
#[command(about = "Add items, group them into teams, and pick one at random")]
struct Cli {
    /// Directory holding the persisted state
    #[arg(long, default_value = ".rando-picker")]
    data_dir: PathBuf,

    #[arg(long)]
    max_item_length: Option<usize>,

    #[arg(long)]
    max_team_name_length: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add an item to the active team
    Add { text: String },
    /// Remove an item by id or 1-based position
    Remove { item: String },
    /// List items of the active team
    List,
    /// Pick a random item from the active team
    Pick,
    /// Remove every item of the active team
    Clear,
    Team {
        #[command(subcommand)]
        action: TeamAction,
    },
}

#[derive(Subcommand)]
enum TeamAction {
    List,
    Add { name: String },
    /// Rename a team given by id or name
    Rename { team: String, name: String },
    Delete { team: String },
    Switch { team: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = PickerConfig::default();
    if let Some(max) = cli.max_item_length {
        config = config.max_item_length(max);
    }
    if let Some(max) = cli.max_team_name_length {
        config = config.max_team_name_length(max);
    }

    let mut picker = rando_picker::open_dir(&cli.data_dir, config).with_context(|| {
        format!("Failed to open picker state in '{}'", cli.data_dir.display())
    })?;

    match cli.command {
        Command::Add { text } => {
            if let Some(item) = picker.add_item(&text)? {
                println!("Added '{}' ({})", item.text, item.id);
            }
        }
        Command::Remove { item } => {
            let id = resolve_item(&picker, &item)?;
            picker.remove_item(&id);
        }
        Command::List => print_items(&picker),
        Command::Pick => {
            let item = picker.pick_random()?;
            println!("Random Pick: {}", item.text);
        }
        Command::Clear => picker.clear_all(),
        Command::Team { action } => run_team(&mut picker, action)?,
    }
    Ok(())
}

fn run_team(picker: &mut Picker, action: TeamAction) -> Result<()> {
    match action {
        TeamAction::List => {
            for team in picker.teams() {
                print_team(&team);
            }
        }
        TeamAction::Add { name } => picker.add_team(&name)?,
        TeamAction::Rename { team, name } => {
            let id = resolve_team(picker, &team)?;
            picker.rename_team(&id, &name)?;
        }
        TeamAction::Delete { team } => {
            let id = resolve_team(picker, &team)?;
            picker.delete_team(&id)?;
        }
        TeamAction::Switch { team } => {
            let id = resolve_team(picker, &team)?;
            picker.switch_active_team(&id);
        }
    }
    Ok(())
}

fn print_items(picker: &Picker) {
    let items = picker.items();
    if items.is_empty() {
        println!("No items added yet");
        return;
    }
    for (position, item) in items.iter().enumerate() {
        println!("{:>3}. {}  [{}]", position + 1, item.text, item.id);
    }
}

fn print_team(team: &TeamSummary) {
    let marker = if team.active { "*" } else { " " };
    println!("{} {} ({})  [{}]", marker, team.name, team.item_count, team.id);
}

fn resolve_item(picker: &Picker, reference: &str) -> Result<String> {
    let items = picker.items();
    if let Some(item) = items.iter().find(|item| item.id == reference) {
        return Ok(item.id.clone());
    }
    reference
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| items.get(index))
        .map(|item| item.id.clone())
        .ok_or_else(|| anyhow!("No item '{}' in the active team", reference))
}

fn resolve_team(picker: &Picker, reference: &str) -> Result<String> {
    let teams = picker.teams();
    teams
        .iter()
        .find(|team| team.id == reference)
        .or_else(|| teams.iter().find(|team| team.name == reference))
        .map(|team| team.id.clone())
        .ok_or_else(|| anyhow!("No team '{}'", reference))
}
