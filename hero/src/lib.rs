//! hero - Command Line Hero, an interactive shell for everyday file and text work
//!
//! This crate provides:
//! - A read-eval-print loop with alias expansion, POSIX-style quoting and tab completion
//! - A fixed catalog of builtin commands (ls, cat, grep, tree, diff, ...) implemented natively
//! - Per-session state: history, aliases, environment overrides and working directory

pub mod alias;
pub mod commands;
pub mod completion;
pub mod env;
pub mod error;
pub mod help;
pub mod history;
pub mod lexer;
pub mod prompt;
pub mod registry;
pub mod repl;
pub mod session;
pub mod shell;
pub mod style;

pub use alias::AliasTable;
pub use completion::Completer;
pub use env::Environment;
pub use error::{ErrorKind, HeroError, HeroResult};
pub use history::HistoryStore;
pub use lexer::tokenize;
pub use registry::{CommandName, Outcome, Registry};
pub use repl::{ExitReason, Input, LineEditor};
pub use session::Session;
pub use shell::Shell;
