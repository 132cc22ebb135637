use super::utils::is_executable;
use super::{Command, ExecContext};
use crate::error::{HeroError, HeroResult};
use crate::help::{format_help, format_help_list, get_help};
use crate::style::Style;
use std::fs;
use std::process;

pub struct Help;

impl Command for Help {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let text = match args.first() {
            None => format_help_list(ctx.registry, ctx.session.color),
            Some(name) => {
                let entry =
                    get_help(name).ok_or_else(|| HeroError::UnknownCommand(name.clone()))?;
                format_help(entry)
            }
        };
        ctx.out_raw(text.as_bytes())
    }
}

pub struct Clear;

impl Command for Clear {
    fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        ctx.out_raw(b"\x1b[2J\x1b[H")
    }
}

pub struct History;

impl Command for History {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let count = match args.first() {
            None => 200,
            Some(n) => n
                .parse::<usize>()
                .map_err(|_| HeroError::InvalidArgument(format!("'{n}' is not a count")))?,
        };

        let entries = ctx.session.history().to_vec();
        let start = entries.len().saturating_sub(count);
        for (i, entry) in entries.iter().enumerate().skip(start) {
            let number = ctx.paint(&[Style::Dim], &format!("{:>4}", i + 1));
            ctx.out(&format!("{number} {entry}"))?;
        }
        Ok(())
    }
}

/// Drop one layer of matching surrounding quotes.
fn unquote(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

pub struct Alias;

impl Command for Alias {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let Some(first) = args.first() else {
            let listing: Vec<String> = ctx
                .session
                .aliases
                .iter()
                .map(|(name, expansion)| format!("{}='{expansion}'", ctx.paint(&[Style::Cyan], name)))
                .collect();
            for line in listing {
                ctx.out(&line)?;
            }
            return Ok(());
        };

        match first.split_once('=') {
            Some((name, head)) => {
                if name.is_empty() {
                    return Err(HeroError::InvalidArgument(format!("bad alias '{first}'")));
                }
                // `alias gs=git status` arrives as two tokens
                let joined = std::iter::once(head)
                    .chain(args[1..].iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ");
                let expansion = unquote(joined.trim()).to_string();
                tracing::debug!(name, expansion = %expansion, "alias set");
                ctx.session.aliases.set(name, expansion.clone());
                ctx.out(&format!("Alias created: {name}='{expansion}'"))
            }
            None => {
                let expansion = ctx
                    .session
                    .aliases
                    .get(first)
                    .ok_or_else(|| HeroError::AliasNotFound(first.clone()))?
                    .to_string();
                ctx.out(&format!("{first}='{expansion}'"))
            }
        }
    }
}

pub struct Unalias;

impl Command for Unalias {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        if args.is_empty() {
            return Err(HeroError::Usage("unalias <name> [name...]"));
        }
        for name in args {
            if ctx.session.aliases.remove(name).is_some() {
                ctx.out(&format!("Removed alias: {name}"))?;
            } else {
                ctx.report(&HeroError::AliasNotFound(name.clone()));
            }
        }
        Ok(())
    }
}

pub struct Env;

impl Command for Env {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let Some(first) = args.first() else {
            let listing: Vec<String> = ctx
                .session
                .env
                .merged()
                .into_iter()
                .map(|(key, value)| format!("{}={value}", ctx.paint(&[Style::Cyan], key)))
                .collect();
            for line in listing {
                ctx.out(&line)?;
            }
            return Ok(());
        };

        match first.split_once('=') {
            Some(("", _)) => Err(HeroError::InvalidArgument(format!(
                "bad assignment '{first}'"
            ))),
            Some((key, value)) => {
                ctx.session.env.set(key, value);
                ctx.out(&format!("Set: {key}={value}"))
            }
            None => {
                let value = ctx
                    .session
                    .env
                    .get(first)
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| HeroError::VariableNotFound(first.clone()))?
                    .to_string();
                ctx.out(&format!("{first}={value}"))
            }
        }
    }
}

pub struct Which;

impl Command for Which {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let Some(name) = args.first() else {
            return Err(HeroError::Usage("which <command>"));
        };

        if ctx.registry.contains(name) {
            return ctx.out(&format!("{name}: built-in command"));
        }
        if let Some(expansion) = ctx.session.aliases.get(name) {
            let line = format!("{name}: aliased to '{expansion}'");
            return ctx.out(&line);
        }

        let path_var = ctx.session.env.get("PATH").unwrap_or_default().to_string();
        let found = std::env::split_paths(&path_var)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(name))
            .find(|candidate| fs::metadata(candidate).is_ok_and(|m| is_executable(&m)));

        match found {
            Some(path) => ctx.out(&path.display().to_string()),
            None => Err(HeroError::NotFound(name.clone())),
        }
    }
}

/// Hands the terminal to an external editor until it exits.
pub struct Edit {
    program: Option<&'static str>,
}

impl Edit {
    /// `$EDITOR`, then the configured editor, then vim.
    pub fn configured() -> Self {
        Self { program: None }
    }

    pub fn program(name: &'static str) -> Self {
        Self {
            program: Some(name),
        }
    }

    fn editor(&self, ctx: &ExecContext<'_>) -> String {
        if let Some(program) = self.program {
            return program.to_string();
        }
        ctx.session
            .env
            .get("EDITOR")
            .filter(|e| !e.trim().is_empty())
            .map(str::to_string)
            .or_else(|| ctx.session.editor.clone())
            .unwrap_or_else(|| "vim".to_string())
    }
}

impl Command for Edit {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let editor = self.editor(ctx);
        // EDITOR may carry its own flags, e.g. "code --wait"
        let mut words = editor.split_whitespace();
        let program = words.next().unwrap_or("vim").to_string();

        tracing::debug!(program = %program, ?args, "launching editor");
        let status = process::Command::new(&program)
            .args(words)
            .args(args)
            .current_dir(&ctx.session.cwd)
            .envs(ctx.session.env.overrides())
            .status()
            .map_err(|source| HeroError::Editor {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            tracing::debug!(program = %program, %status, "editor exited with failure");
        }
        Ok(())
    }
}

pub struct Exit;

impl Command for Exit {
    fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        ctx.session.stop();
        let farewell = ctx.paint(&[Style::Cyan], "Goodbye! 👋");
        ctx.out(&format!("\n{farewell}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use tempfile::TempDir;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'git status'"), "git status");
        assert_eq!(unquote("\"x\""), "x");
        assert_eq!(unquote("'x\""), "'x\"");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_alias_create_show_and_remove() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());

        let (out, _) = h.run("alias", &["gs=git", "status"]);
        assert_eq!(out, "Alias created: gs='git status'\n");
        assert_eq!(h.session.aliases.get("gs"), Some("git status"));

        let (out, _) = h.run("alias", &["gs"]);
        assert_eq!(out, "gs='git status'\n");

        let (out, _) = h.run("unalias", &["gs"]);
        assert_eq!(out, "Removed alias: gs\n");

        let (_, err) = h.run("alias", &["gs"]);
        assert_eq!(err, "alias: Alias not found: gs\n");
    }

    #[test]
    fn test_alias_listing_is_sorted() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());
        let (out, _) = h.run("alias", &[]);
        let names: Vec<&str> = out.lines().map(|l| l.split('=').next().unwrap()).collect();
        assert_eq!(names, vec!["..", "...", "la", "ll", "~"]);
    }

    #[test]
    fn test_unalias_missing_reports_and_continues() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());
        let (out, err) = h.run("unalias", &["nope", "ll"]);
        assert_eq!(out, "Removed alias: ll\n");
        assert_eq!(err, "unalias: Alias not found: nope\n");
    }

    #[test]
    fn test_env_set_get_and_missing() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());

        let (out, _) = h.run("env", &["GREETING=hi=there"]);
        assert_eq!(out, "Set: GREETING=hi=there\n");
        let (out, _) = h.run("env", &["GREETING"]);
        assert_eq!(out, "GREETING=hi=there\n");

        let (out, _) = h.run("env", &[]);
        assert!(out.contains("GREETING=hi=there\n"));

        let (_, err) = h.run("env", &["MISSING_VAR"]);
        assert_eq!(err, "env: Variable not found: MISSING_VAR\n");

        h.run("env", &["BLANK="]);
        let (out, err) = h.run("env", &["BLANK"]);
        assert!(out.is_empty());
        assert_eq!(err, "env: Variable not found: BLANK\n");
    }

    #[test]
    fn test_which_alias_builtin_and_missing() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());

        let (out, _) = h.run("which", &["ll"]);
        assert_eq!(out, "ll: aliased to 'ls -l'\n");
        let (out, _) = h.run("which", &["grep"]);
        assert_eq!(out, "grep: built-in command\n");

        h.session.aliases.set("ls", "ls -la");
        let (out, _) = h.run("which", &["ls"]);
        assert_eq!(out, "ls: built-in command\n");
        let (_, err) = h.run("which", &["no-such-tool"]);
        assert_eq!(err, "which: no-such-tool not found\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_which_searches_session_path() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("bin");
        fs::create_dir(&bin).unwrap();
        let tool = bin.join("mytool");
        fs::write(&tool, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(bin.join("plain"), "").unwrap();

        let mut h = Harness::new(tmp.path());
        h.session.env.set("PATH", bin.display().to_string());

        let (out, _) = h.run("which", &["mytool"]);
        assert_eq!(out, format!("{}\n", tool.display()));
        let (_, err) = h.run("which", &["plain"]);
        assert_eq!(err, "which: plain not found\n");
    }

    #[test]
    fn test_history_numbers_whole_history() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());
        for line in ["ls", "pwd", "echo hi"] {
            h.session.push_history(line);
        }
        let (out, _) = h.run("history", &["2"]);
        assert_eq!(out, "   2 pwd\n   3 echo hi\n");

        let (_, err) = h.run("history", &["lots"]);
        assert_eq!(err, "history: Invalid argument: 'lots' is not a count\n");
    }

    #[test]
    fn test_help_for_single_command() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());
        let (out, _) = h.run("help", &["tree"]);
        assert!(out.starts_with("tree - Display a directory tree\n"));
        let (_, err) = h.run("help", &["bogus"]);
        assert_eq!(err, "help: Unknown command: bogus\n");
    }

    #[test]
    fn test_exit_stops_session() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());
        let (out, _) = h.run("quit", &[]);
        assert_eq!(out, "\nGoodbye! 👋\n");
        assert!(!h.session.is_running());
    }

    #[cfg(unix)]
    #[test]
    fn test_edit_uses_session_editor_variable() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());
        h.session.env.set("PATH", "/usr/bin:/bin");
        h.session.env.set("EDITOR", "true");
        let (_, err) = h.run("edit", &["notes.txt"]);
        assert_eq!(err, "");
    }

    #[test]
    fn test_edit_missing_editor_is_reported() {
        let tmp = TempDir::new().unwrap();
        let mut h = Harness::new(tmp.path());
        h.session.editor = Some("hero-no-such-editor".to_string());
        let (_, err) = h.run("edit", &[]);
        assert_eq!(
            err,
            "edit: Failed to launch hero-no-such-editor: No such file or directory\n"
        );
    }
}
