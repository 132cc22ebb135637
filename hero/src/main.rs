use clap::Parser;
use hero::registry::Outcome;
use hero::{repl, HistoryStore, LineEditor, Session, Shell};
use hero_config::{HeroConfig, LoggingConfig};
use std::path::PathBuf;

mod editor;

/// hero - Command Line Hero, an interactive file and text utility shell
#[derive(Parser, Debug)]
#[command(name = "hero", version, about)]
struct Args {
    /// Execute command and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Configuration file (replaces the default search path)
    #[arg(long)]
    config: Option<String>,

    /// Directory the prompt is shown relative to (defaults to the current directory)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Do not load or save the history file
    #[arg(long)]
    no_history: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => hero_config::load_from_file(path)?,
        None => hero_config::load().unwrap_or_else(|e| {
            eprintln!("hero: {e}; using default configuration");
            HeroConfig::default()
        }),
    };

    init_logging(&config.logging, args.debug);

    let base_dir = match args.base_dir {
        Some(dir) => std::fs::canonicalize(&dir)
            .map_err(|e| format!("cannot use {} as base directory: {e}", dir.display()))?,
        None => std::env::current_dir().and_then(std::fs::canonicalize)?,
    };
    tracing::debug!(base_dir = %base_dir.display(), "starting");

    let mut session = Session::new(base_dir).with_color(config.shell.color);
    session.editor = config.shell.editor.clone();
    for (name, expansion) in &config.shell.aliases {
        session.aliases.set(name.as_str(), expansion.as_str());
    }
    let mut shell = Shell::new(session).with_prompt(config.shell.prompt.clone());

    if let Some(command) = args.command {
        let code = match shell.execute_line(&command) {
            None | Some(Outcome::Completed) => 0,
            Some(Outcome::Failed(_)) => 1,
            Some(Outcome::Unknown) => 127,
        };
        std::process::exit(code);
    }

    let history = (config.history.enabled && !args.no_history)
        .then(|| HistoryStore::new(config.history.path(), config.history.max_entries));

    let mut line_editor = editor::RustylineEditor::new(config.history.max_entries)?;
    if let Some(store) = &history {
        let entries = store.load();
        for entry in &entries {
            line_editor.add_history(entry);
        }
        shell.session_mut().extend_history(entries);
    }

    repl::run(&mut shell, &mut line_editor, history.as_ref());
    Ok(())
}

/// RUST_LOG wins, then the configured filter; `--debug` forces debug.
fn init_logging(logging: &LoggingConfig, debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(logging.directive()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
