//! Command names, the immutable handler registry and the dispatch boundary.

use crate::commands::{self, Command, ExecContext, Output};
use crate::error::{ErrorKind, HeroError};
use crate::help;
use crate::session::Session;
use crate::style::{paint, Style};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandName {
    Help,
    Ls,
    Pwd,
    Cd,
    Cat,
    Echo,
    Clear,
    History,
    Touch,
    Rm,
    Mkdir,
    Rmdir,
    Mv,
    Cp,
    Head,
    Tail,
    Grep,
    Wc,
    Find,
    Tree,
    Du,
    Diff,
    Edit,
    Vim,
    Nano,
    Sort,
    Env,
    Which,
    Alias,
    Unalias,
    Exit,
    Quit,
}

impl CommandName {
    pub const ALL: [CommandName; 32] = [
        CommandName::Help,
        CommandName::Ls,
        CommandName::Pwd,
        CommandName::Cd,
        CommandName::Cat,
        CommandName::Echo,
        CommandName::Clear,
        CommandName::History,
        CommandName::Touch,
        CommandName::Rm,
        CommandName::Mkdir,
        CommandName::Rmdir,
        CommandName::Mv,
        CommandName::Cp,
        CommandName::Head,
        CommandName::Tail,
        CommandName::Grep,
        CommandName::Wc,
        CommandName::Find,
        CommandName::Tree,
        CommandName::Du,
        CommandName::Diff,
        CommandName::Edit,
        CommandName::Vim,
        CommandName::Nano,
        CommandName::Sort,
        CommandName::Env,
        CommandName::Which,
        CommandName::Alias,
        CommandName::Unalias,
        CommandName::Exit,
        CommandName::Quit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Help => "help",
            CommandName::Ls => "ls",
            CommandName::Pwd => "pwd",
            CommandName::Cd => "cd",
            CommandName::Cat => "cat",
            CommandName::Echo => "echo",
            CommandName::Clear => "clear",
            CommandName::History => "history",
            CommandName::Touch => "touch",
            CommandName::Rm => "rm",
            CommandName::Mkdir => "mkdir",
            CommandName::Rmdir => "rmdir",
            CommandName::Mv => "mv",
            CommandName::Cp => "cp",
            CommandName::Head => "head",
            CommandName::Tail => "tail",
            CommandName::Grep => "grep",
            CommandName::Wc => "wc",
            CommandName::Find => "find",
            CommandName::Tree => "tree",
            CommandName::Du => "du",
            CommandName::Diff => "diff",
            CommandName::Edit => "edit",
            CommandName::Vim => "vim",
            CommandName::Nano => "nano",
            CommandName::Sort => "sort",
            CommandName::Env => "env",
            CommandName::Which => "which",
            CommandName::Alias => "alias",
            CommandName::Unalias => "unalias",
            CommandName::Exit => "exit",
            CommandName::Quit => "quit",
        }
    }

    pub fn category(self) -> Category {
        match self {
            CommandName::Cd | CommandName::Pwd | CommandName::Ls | CommandName::Tree => {
                Category::Navigation
            }
            CommandName::Cat
            | CommandName::Touch
            | CommandName::Mkdir
            | CommandName::Rm
            | CommandName::Rmdir
            | CommandName::Mv
            | CommandName::Cp
            | CommandName::Edit
            | CommandName::Vim
            | CommandName::Nano => Category::FileOperations,
            CommandName::Echo
            | CommandName::Head
            | CommandName::Tail
            | CommandName::Grep
            | CommandName::Wc
            | CommandName::Sort
            | CommandName::Diff => Category::TextProcessing,
            CommandName::Find | CommandName::Which => Category::Search,
            CommandName::Clear | CommandName::History | CommandName::Du | CommandName::Env => {
                Category::System
            }
            CommandName::Alias | CommandName::Unalias => Category::Aliases,
            CommandName::Help | CommandName::Exit | CommandName::Quit => Category::Control,
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = HeroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| HeroError::UnknownCommand(s.to_string()))
    }
}

/// Sections of the `help` listing, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Navigation,
    FileOperations,
    TextProcessing,
    Search,
    System,
    Aliases,
    Control,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Navigation,
        Category::FileOperations,
        Category::TextProcessing,
        Category::Search,
        Category::System,
        Category::Aliases,
        Category::Control,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Navigation => "Navigation",
            Category::FileOperations => "File Operations",
            Category::TextProcessing => "Text Processing",
            Category::Search => "Search",
            Category::System => "System",
            Category::Aliases => "Aliases",
            Category::Control => "Control",
        }
    }
}

/// How a dispatched line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Failed(ErrorKind),
    Unknown,
}

/// Fixed mapping from command name to handler. Built once, never mutated.
pub struct Registry {
    handlers: BTreeMap<CommandName, Box<dyn Command>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Every builtin command.
    pub fn builtin() -> Self {
        use commands::{
            Alias, Cat, Cd, Clear, Cp, Diff, Du, Echo, Edit, Env, Exit, Find, Grep, Head, Help,
            History, Ls, Mkdir, Mv, Pwd, Rm, Rmdir, Sort, Tail, Touch, Tree, Unalias, Wc, Which,
        };

        Self::empty()
            .with(CommandName::Help, Help)
            .with(CommandName::Ls, Ls)
            .with(CommandName::Pwd, Pwd)
            .with(CommandName::Cd, Cd)
            .with(CommandName::Cat, Cat)
            .with(CommandName::Echo, Echo)
            .with(CommandName::Clear, Clear)
            .with(CommandName::History, History)
            .with(CommandName::Touch, Touch)
            .with(CommandName::Rm, Rm)
            .with(CommandName::Mkdir, Mkdir)
            .with(CommandName::Rmdir, Rmdir)
            .with(CommandName::Mv, Mv)
            .with(CommandName::Cp, Cp)
            .with(CommandName::Head, Head)
            .with(CommandName::Tail, Tail)
            .with(CommandName::Grep, Grep)
            .with(CommandName::Wc, Wc)
            .with(CommandName::Find, Find)
            .with(CommandName::Tree, Tree)
            .with(CommandName::Du, Du)
            .with(CommandName::Diff, Diff)
            .with(CommandName::Edit, Edit::configured())
            .with(CommandName::Vim, Edit::program("vim"))
            .with(CommandName::Nano, Edit::program("nano"))
            .with(CommandName::Sort, Sort)
            .with(CommandName::Env, Env)
            .with(CommandName::Which, Which)
            .with(CommandName::Alias, Alias)
            .with(CommandName::Unalias, Unalias)
            .with(CommandName::Exit, Exit)
            .with(CommandName::Quit, Exit)
    }

    /// Bind `name` to `handler`, replacing any earlier binding.
    pub fn with(mut self, name: CommandName, handler: impl Command + 'static) -> Self {
        self.handlers.insert(name, Box::new(handler));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        let name = name.parse::<CommandName>().ok()?;
        self.handlers.get(&name).map(|handler| &**handler)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = CommandName> + '_ {
        self.handlers.keys().copied()
    }

    /// Run one parsed command. Handler failures are rendered here and never
    /// propagate further.
    pub fn dispatch(
        &self,
        name: &str,
        args: &[String],
        session: &mut Session,
        stdout: &mut Output,
        stderr: &mut Output,
    ) -> Outcome {
        let Some(handler) = self.get(name) else {
            tracing::debug!(command = name, "unknown command");
            let unknown = HeroError::UnknownCommand(name.to_string()).to_string();
            let lines = [
                paint(session.color, &[Style::Red], &unknown),
                "Type 'help' for available commands.".to_string(),
            ];
            for line in lines {
                if let Err(e) = stderr.writeln(&line) {
                    tracing::warn!(error = %e, "failed to write error line");
                }
            }
            return Outcome::Unknown;
        };

        tracing::debug!(command = name, ?args, "dispatch");
        let mut ctx = ExecContext {
            session,
            registry: self,
            command: name,
            stdout,
            stderr,
        };

        let result = if help::wants_help(args) {
            help::get_help(name)
                .map_or(Ok(()), |entry| ctx.out_raw(help::format_help(entry).as_bytes()))
        } else {
            handler.execute(args, &mut ctx)
        };

        match result {
            Ok(()) => Outcome::Completed,
            Err(e) => {
                tracing::debug!(command = name, error = %e, "command failed");
                ctx.report(&e);
                Outcome::Failed(e.kind())
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeroResult;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fails;

    impl Command for Fails {
        fn execute(&self, _args: &[String], _ctx: &mut ExecContext<'_>) -> HeroResult<()> {
            Err(HeroError::InvalidArgument("bad".into()))
        }
    }

    struct Counts(Rc<Cell<usize>>);

    impl Command for Counts {
        fn execute(&self, _args: &[String], _ctx: &mut ExecContext<'_>) -> HeroResult<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    fn run(registry: &Registry, name: &str, args: &[&str]) -> (Outcome, String, String) {
        let mut session = Session::new("/").with_color(false);
        let mut out = Output::Buffer(Vec::new());
        let mut err = Output::Buffer(Vec::new());
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let outcome = registry.dispatch(name, &args, &mut session, &mut out, &mut err);
        (outcome, out.take_string(), err.take_string())
    }

    #[test]
    fn test_names_round_trip() {
        for name in CommandName::ALL {
            assert_eq!(name.as_str().parse::<CommandName>().unwrap(), name);
        }
        assert!("frobnicate".parse::<CommandName>().is_err());
    }

    #[test]
    fn test_builtin_registers_every_name() {
        let registry = Registry::builtin();
        assert_eq!(registry.names().count(), CommandName::ALL.len());
        assert!(registry.contains("quit"));
        assert!(!registry.contains("ll"));
    }

    #[test]
    fn test_unknown_command_is_reported() {
        let (outcome, out, err) = run(&Registry::empty(), "frobnicate", &[]);
        assert_eq!(outcome, Outcome::Unknown);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "Unknown command: frobnicate\nType 'help' for available commands.\n"
        );
    }

    #[test]
    fn test_handler_error_is_caught_and_prefixed() {
        let registry = Registry::empty().with(CommandName::Echo, Fails);
        let (outcome, _, err) = run(&registry, "echo", &["x"]);
        assert_eq!(outcome, Outcome::Failed(ErrorKind::Usage));
        assert_eq!(err, "echo: Invalid argument: bad\n");
    }

    #[test]
    fn test_help_flag_skips_handler() {
        let calls = Rc::new(Cell::new(0));
        let registry = Registry::empty().with(CommandName::Grep, Counts(Rc::clone(&calls)));

        let (outcome, out, _) = run(&registry, "grep", &["--help"]);
        assert_eq!(outcome, Outcome::Completed);
        assert!(out.starts_with("grep - "));
        assert_eq!(calls.get(), 0);

        run(&registry, "grep", &["-h", "x"]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_categories_cover_help_listing() {
        let nav: Vec<&str> = CommandName::ALL
            .into_iter()
            .filter(|n| n.category() == Category::Navigation)
            .map(CommandName::as_str)
            .collect();
        assert_eq!(nav, vec!["ls", "pwd", "cd", "tree"]);
    }
}
