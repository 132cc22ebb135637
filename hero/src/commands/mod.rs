//! Command catalog: output plumbing, the handler capability and the
//! concrete builtins.

use crate::error::{HeroError, HeroResult};
use crate::registry::Registry;
use crate::session::Session;
use crate::style::{paint, Style};
use std::io::Write;

mod builtins_fs;
mod builtins_shell;
mod builtins_text;
mod diff;
mod utils;

pub use builtins_fs::{Cd, Cp, Du, Find, Ls, Mkdir, Mv, Pwd, Rm, Rmdir, Touch, Tree};
pub use builtins_shell::{Alias, Clear, Edit, Env, Exit, Help, History, Unalias, Which};
pub use builtins_text::{Cat, Diff, Echo, Grep, Head, Sort, Tail, Wc};
pub use utils::human_size;

pub enum Output {
    Stdout,
    Stderr,
    Buffer(Vec<u8>),
}

impl Output {
    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        match self {
            Output::Stdout => {
                let mut out = std::io::stdout();
                out.write_all(data)?;
                out.flush()
            }
            Output::Stderr => std::io::stderr().write_all(data),
            Output::Buffer(buf) => {
                buf.extend_from_slice(data);
                Ok(())
            }
        }
    }

    pub fn writeln(&mut self, s: &str) -> std::io::Result<()> {
        self.write(s.as_bytes())?;
        self.write(b"\n")
    }

    /// Drain a buffered output as text. Terminal outputs yield nothing.
    pub fn take_string(&mut self) -> String {
        match self {
            Output::Buffer(buf) => String::from_utf8_lossy(&std::mem::take(buf)).into_owned(),
            Output::Stdout | Output::Stderr => String::new(),
        }
    }
}

/// Everything a handler may touch while it runs.
pub struct ExecContext<'a> {
    pub session: &'a mut Session,
    pub registry: &'a Registry,
    /// Name the command was invoked under, used to prefix error lines.
    pub command: &'a str,
    pub stdout: &'a mut Output,
    pub stderr: &'a mut Output,
}

impl ExecContext<'_> {
    pub fn out(&mut self, line: &str) -> HeroResult<()> {
        self.stdout
            .writeln(line)
            .map_err(|e| HeroError::io("<stdout>", e))
    }

    pub fn out_raw(&mut self, data: &[u8]) -> HeroResult<()> {
        self.stdout
            .write(data)
            .map_err(|e| HeroError::io("<stdout>", e))
    }

    pub fn paint(&self, styles: &[Style], text: &str) -> String {
        paint(self.session.color, styles, text)
    }

    /// Render an error as one command-prefixed line on the error stream.
    pub fn report(&mut self, err: &HeroError) {
        let line = self.paint(&[Style::Red], &format!("{}: {}", self.command, err));
        if let Err(e) = self.stderr.writeln(&line) {
            tracing::warn!(error = %e, "failed to write error line");
        }
    }

    /// Non-fatal notice on the error stream, e.g. a skipped item.
    pub fn warn(&mut self, msg: &str) {
        let line = self.paint(&[Style::Yellow], msg);
        if let Err(e) = self.stderr.writeln(&line) {
            tracing::warn!(error = %e, "failed to write warning line");
        }
    }
}

/// A handler bound to one or more command names.
pub trait Command {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()>;
}

/// Split `-x` style flags from positional arguments.
pub(crate) fn split_flags(args: &[String]) -> (Vec<&str>, Vec<&str>) {
    args.iter()
        .map(String::as_str)
        .partition(|a| a.starts_with('-') && a.len() > 1)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_output() {
        let mut out = Output::Buffer(Vec::new());
        out.writeln("hello").unwrap();
        out.write(b"x").unwrap();
        assert_eq!(out.take_string(), "hello\nx");
        assert_eq!(out.take_string(), "");
    }

    #[test]
    fn test_split_flags() {
        let args: Vec<String> = ["-l", "src", "-", "-a"].iter().map(|s| s.to_string()).collect();
        let (flags, rest) = split_flags(&args);
        assert_eq!(flags, vec!["-l", "-a"]);
        assert_eq!(rest, vec!["src", "-"]);
    }
}
