mod app;
mod clipboard;
mod config;
mod quotes;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup, Section};
use config::AppConfig;
use quotes::QuoteBook;

#[derive(Parser, Debug)]
#[command(name = "quotidian")]
#[command(author = "Arham Affan")]
#[command(version = "0.1.0")]
#[command(about = "A terminal quote-of-the-day browser with topic search")]
struct Args {
    /// Print quotes matching a topic and exit
    #[arg(short, long)]
    search: Option<String>,

    /// List every topic in the dataset and exit
    #[arg(short, long)]
    topics: bool,

    /// Emit JSON instead of plain text (with --search or --topics)
    #[arg(short, long)]
    json: bool,

    /// Load quotes from a JSON file instead of the bundled dataset
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let book = match &args.dataset {
        Some(path) => QuoteBook::from_path(path)?,
        None => QuoteBook::bundled()?,
    };

    // Handle CLI-only commands
    if args.topics {
        return print_topics(&book, args.json);
    }

    if let Some(query) = &args.search {
        return print_search(&book, query, args.json);
    }

    // Run TUI
    run_tui(book)
}

fn print_search(book: &QuoteBook, query: &str, json: bool) -> Result<()> {
    let matched = book.filter_by_topic(query);

    if json {
        let output = serde_json::json!({
            "query": query,
            "count": matched.len(),
            "quotes": matched,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else if matched.is_empty() {
        println!("No quotes for '{}'", query.trim());
    } else {
        for quote in matched {
            println!("\u{201c}{}\u{201d} — {} ({})", quote.text, quote.author, quote.topic);
        }
    }
    Ok(())
}

fn print_topics(book: &QuoteBook, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(book.topics())?);
    } else {
        for topic in book.topics() {
            println!("{}", topic);
        }
    }
    Ok(())
}

fn run_tui(book: QuoteBook) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state (theme restored from the saved preference)
    let config = AppConfig::load().unwrap_or_default();
    let mut app = App::new(book, config);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match key.code {
                        // 'q' is ordinary input while typing a topic
                        KeyCode::Char('q')
                            if app.popup == Popup::None && app.section == Section::Results =>
                        {
                            return Ok(())
                        }
                        KeyCode::Char('c')
                            if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                        {
                            return Ok(())
                        }
                        _ => {
                            if let Err(e) = app.handle_key(key) {
                                app.set_status(format!("Error: {}", e));
                            }
                        }
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        app.tick();
    }
}
