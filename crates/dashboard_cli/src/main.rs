//! Dashboard command-line front end.
//!
//! # Responsibility
//! - Drive the core `Dashboard` facade against a SQLite-backed store.
//! - Render panel state as plain text and print queued notices.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use dashboard_core::calc::format_number;
use dashboard_core::game::Cell;
use dashboard_core::{
    default_log_level, init_logging, open_store, CalcKey, Dashboard, EventDraft, GameStatus,
    ItemId, SearchKind, SearchQuery, SettingKey, SqliteStore, TodoFilter, YearMonth,
};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DEFAULT_DB_FILE: &str = "dashboard.sqlite3";
const SHORT_ID_LEN: usize = 8;

/// Personal dashboard: todos, notes, calendar, search, settings and games.
#[derive(Parser)]
#[command(name = "dashboard")]
#[command(version)]
struct Cli {
    /// SQLite database file (defaults to the system temp directory)
    #[arg(long, global = true, env = "DASHBOARD_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "DASHBOARD_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "DASHBOARD_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the todo list
    #[command(subcommand)]
    Todo(TodoCommand),

    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),

    /// Manage calendar events
    #[command(subcommand)]
    Event(EventCommand),

    /// Search todos, notes and events
    Search {
        query: String,

        /// Only return hits of this kind (todo|note|event)
        #[arg(long)]
        kind: Option<String>,

        /// Maximum number of hits
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show or change preferences
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Evaluate an arithmetic expression
    Calc {
        expression: String,

        /// Treat the input as button presses (`C`, `←`, `=`) instead
        #[arg(long)]
        keys: bool,
    },

    /// Play tic-tac-toe interactively (cells 0-8, `r` resets, `q` quits)
    Game,
}

#[derive(Subcommand)]
enum TodoCommand {
    /// Add a todo
    Add { text: String },
    /// Toggle completion by id (unique prefix accepted)
    Toggle { id: String },
    /// Delete by id (unique prefix accepted)
    Delete { id: String },
    /// List todos
    List {
        /// all|active|completed
        #[arg(long, default_value = "all")]
        filter: String,
    },
}

#[derive(Subcommand)]
enum NoteCommand {
    /// Add a note
    Add { text: String },
    /// Delete by id (unique prefix accepted)
    Delete { id: String },
    /// List notes, newest first
    List,
}

#[derive(Subcommand)]
enum EventCommand {
    /// Add an event
    Add {
        title: String,
        /// YYYY-MM-DD
        date: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List events, optionally for one day
    List {
        #[arg(long)]
        date: Option<String>,
    },
    /// Show a month grid with event days marked
    Month(MonthArgs),
}

#[derive(Args)]
struct MonthArgs {
    /// Defaults to the current year
    #[arg(long)]
    year: Option<i32>,
    /// 1-12, defaults to the current month
    #[arg(long)]
    month: Option<u32>,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print every preference
    Show,
    /// Change one preference (darkMode|notifications|theme|fontSize)
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE));
    let store = open_store(&db_path)
        .with_context(|| format!("failed to open dashboard store at {}", db_path.display()))?;
    let mut dashboard = Dashboard::load(store);

    let outcome = run(&mut dashboard, cli.command);
    print_notices(&mut dashboard);
    outcome
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let Some(log_dir) = cli.log_dir.as_ref() else {
        return Ok(());
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let dir = log_dir
        .to_str()
        .context("log directory must be valid UTF-8")?;
    init_logging(level, dir).context("failed to initialize logging")?;
    info!("event=cli_start module=cli status=ok");
    Ok(())
}

fn run(dashboard: &mut Dashboard<SqliteStore>, command: Commands) -> Result<()> {
    match command {
        Commands::Todo(command) => run_todo(dashboard, command),
        Commands::Note(command) => run_note(dashboard, command),
        Commands::Event(command) => run_event(dashboard, command),
        Commands::Search { query, kind, limit } => {
            let kind = kind.as_deref().map(parse_search_kind).transpose()?;
            let query = SearchQuery {
                kind,
                limit,
                ..SearchQuery::new(query)
            };
            let hits = dashboard.search_with(&query)?;
            if hits.is_empty() {
                println!("No results found.");
            }
            for hit in hits {
                println!(
                    "[{}] {}  ({})",
                    hit.kind.label(),
                    hit.excerpt,
                    hit.target.anchor()
                );
            }
            Ok(())
        }
        Commands::Settings(command) => run_settings(dashboard, command),
        Commands::Calc { expression, keys } => {
            if keys {
                for key in expression.chars().filter_map(CalcKey::from_char) {
                    dashboard.press_calculator(key);
                }
                println!("{}", dashboard.calculator().text());
                if let Some(err) = dashboard.calculator().last_error() {
                    bail!("calculation failed: {err}");
                }
            } else {
                println!("{}", format_number(dashboard.calculate(&expression)?));
            }
            Ok(())
        }
        Commands::Game => run_game(dashboard),
    }
}

fn run_todo(dashboard: &mut Dashboard<SqliteStore>, command: TodoCommand) -> Result<()> {
    match command {
        TodoCommand::Add { text } => {
            let id = dashboard.add_todo(&text)?;
            println!("added {}", short_id(id));
        }
        TodoCommand::Toggle { id } => {
            let id = resolve_id(dashboard.todos().iter().map(|todo| todo.id), &id, "todo")?;
            if let Some(completed) = dashboard.toggle_todo(id)? {
                let state = if completed { "completed" } else { "active" };
                println!("{} is now {state}", short_id(id));
            }
        }
        TodoCommand::Delete { id } => {
            let id = resolve_id(dashboard.todos().iter().map(|todo| todo.id), &id, "todo")?;
            dashboard.delete_todo(id)?;
        }
        TodoCommand::List { filter } => {
            let Some(filter) = TodoFilter::parse(&filter) else {
                bail!("unknown filter `{filter}`; expected all|active|completed");
            };
            for todo in dashboard.filter_todos(filter) {
                let mark = if todo.completed { 'x' } else { ' ' };
                println!("[{mark}] {}  {}", short_id(todo.id), todo.text);
            }
            let stats = dashboard.todo_stats();
            println!(
                "{} total, {} active, {} completed",
                stats.total, stats.active, stats.completed
            );
        }
    }
    Ok(())
}

fn run_note(dashboard: &mut Dashboard<SqliteStore>, command: NoteCommand) -> Result<()> {
    match command {
        NoteCommand::Add { text } => {
            let id = dashboard.add_note(&text)?;
            println!("added {}", short_id(id));
        }
        NoteCommand::Delete { id } => {
            let id = resolve_id(dashboard.notes().iter().map(|note| note.id), &id, "note")?;
            dashboard.delete_note(id)?;
        }
        NoteCommand::List => {
            for note in dashboard.notes_newest_first() {
                println!(
                    "{}  {}  {}",
                    short_id(note.id),
                    note.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    note.text
                );
            }
        }
    }
    Ok(())
}

fn run_event(dashboard: &mut Dashboard<SqliteStore>, command: EventCommand) -> Result<()> {
    match command {
        EventCommand::Add {
            title,
            date,
            description,
        } => {
            let event = dashboard.add_event(EventDraft::new(title, date, description))?;
            println!("added {} on {}", event.title, event.date);
        }
        EventCommand::List { date } => {
            let events: Vec<_> = match date {
                Some(raw) => dashboard.events_on(parse_date(&raw)?),
                None => dashboard.events().iter().collect(),
            };
            for event in events {
                if event.description.is_empty() {
                    println!("{}  {}", event.date, event.title);
                } else {
                    println!("{}  {}: {}", event.date, event.title, event.description);
                }
            }
        }
        EventCommand::Month(args) => {
            let today = YearMonth::of(Local::now().date_naive());
            let year = args.year.unwrap_or(today.year());
            let month = args.month.unwrap_or(today.month());
            let Some(year_month) = YearMonth::new(year, month) else {
                bail!("invalid month {year}-{month}");
            };
            print_month(dashboard, year_month);
        }
    }
    Ok(())
}

fn run_settings(dashboard: &mut Dashboard<SqliteStore>, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            for key in SettingKey::ALL {
                println!("{key} = {}", dashboard.settings().value_of(key));
            }
        }
        SettingsCommand::Set { key, value } => {
            let key = SettingKey::parse(&key)?;
            dashboard.apply_setting(key, &value)?;
            println!("{key} = {}", dashboard.settings().value_of(key));
        }
    }
    Ok(())
}

fn run_game(dashboard: &mut Dashboard<SqliteStore>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_board(dashboard);

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        match line.trim() {
            "" => {}
            "q" | "quit" => break,
            "r" | "reset" => dashboard.reset_game(),
            input => match input.parse::<usize>() {
                Ok(cell) => {
                    if let Err(err) = dashboard.play(cell) {
                        println!("{err}");
                    }
                }
                Err(_) => println!("enter a cell 0-8, `r` to reset or `q` to quit"),
            },
        }
        print_notices(dashboard);
        print_board(dashboard);
        stdout.flush().context("failed to flush stdout")?;
    }
    Ok(())
}

fn print_board(dashboard: &Dashboard<SqliteStore>) {
    let game = dashboard.game();
    for row in game.board().chunks(3) {
        let symbols: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Cell::Empty => ".".to_string(),
                Cell::X => "X".to_string(),
                Cell::O => "O".to_string(),
            })
            .collect();
        println!(" {}", symbols.join(" "));
    }
    match game.status() {
        GameStatus::InProgress => println!("{} to play", game.current_player()),
        status => println!("{status}"),
    }
}

fn print_month(dashboard: &Dashboard<SqliteStore>, year_month: YearMonth) {
    let view = dashboard.month_view(year_month);
    println!("{}", view.year_month);
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");

    let mut line = "    ".repeat(view.leading_blank_days as usize);
    let mut column = view.leading_blank_days;
    for cell in &view.days {
        let marker = if cell.has_events { '*' } else { ' ' };
        line.push_str(&format!("{:>3}{marker}", cell.day));
        column += 1;
        if column % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }

    for event in dashboard.events_in_month(year_month.year(), year_month.month()) {
        println!("{}  {}", event.date, event.title);
    }
}

fn print_notices(dashboard: &mut Dashboard<SqliteStore>) {
    for notice in dashboard.take_notices() {
        println!("» {notice}");
    }
}

fn resolve_id(ids: impl IntoIterator<Item = ItemId>, prefix: &str, what: &str) -> Result<ItemId> {
    let prefix = prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        bail!("{what} id cannot be empty");
    }
    let matches: Vec<ItemId> = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(prefix.as_str()))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no {what} matches id `{prefix}`"),
        _ => bail!("id `{prefix}` matches {} {what}s", matches.len()),
    }
}

fn short_id(id: ItemId) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    dashboard_core::model::event::parse_event_date(raw)
        .with_context(|| format!("invalid date `{raw}`; expected YYYY-MM-DD"))
}

fn parse_search_kind(raw: &str) -> Result<SearchKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "todo" | "todos" => Ok(SearchKind::Todo),
        "note" | "notes" => Ok(SearchKind::Note),
        "event" | "events" => Ok(SearchKind::Event),
        other => bail!("unknown search kind `{other}`; expected todo|note|event"),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_search_kind, resolve_id, short_id, Cli};
    use clap::CommandFactory;
    use dashboard_core::{ItemId, SearchKind};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resolve_id_accepts_unique_prefix_only() {
        let first = ItemId::parse_str("aaaa1111-0000-4000-8000-000000000000").unwrap();
        let second = ItemId::parse_str("aaaa2222-0000-4000-8000-000000000000").unwrap();
        let ids = [first, second];

        assert_eq!(resolve_id(ids, "AAAA1", "todo").unwrap(), first);
        assert!(resolve_id(ids, "aaaa", "todo").is_err());
        assert!(resolve_id(ids, "bbbb", "todo").is_err());
        assert!(resolve_id(ids, " ", "todo").is_err());
    }

    #[test]
    fn short_id_is_eight_chars() {
        let id = ItemId::parse_str("12345678-0000-4000-8000-000000000000").unwrap();
        assert_eq!(short_id(id), "12345678");
    }

    #[test]
    fn search_kind_accepts_plural() {
        assert_eq!(parse_search_kind("Notes").unwrap(), SearchKind::Note);
        assert!(parse_search_kind("games").is_err());
    }
}
