use super::diff::unified_diff;
use super::utils::{line_count, read_text};
use super::{Command, ExecContext};
use crate::error::{HeroError, HeroResult};
use crate::style::Style;
use std::fs;

pub struct Echo;

impl Command for Echo {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        ctx.out(&args.join(" "))
    }
}

pub struct Cat;

impl Command for Cat {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        if args.is_empty() {
            return Err(HeroError::Usage("cat <file> [file...]"));
        }
        for arg in args {
            match fs::read(ctx.session.resolve(arg)) {
                Ok(data) => ctx.out_raw(&data)?,
                Err(e) => ctx.report(&HeroError::io(arg, e)),
            }
        }
        Ok(())
    }
}

pub struct Head;

impl Command for Head {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let Some(file) = args.first() else {
            return Err(HeroError::Usage("head <file> [n]"));
        };
        let n = line_count(args.get(1))?;
        let content = read_text(&ctx.session.resolve(file), file)?;
        let head: String = content.split_inclusive('\n').take(n).collect();
        ctx.out_raw(head.as_bytes())
    }
}

pub struct Tail;

impl Command for Tail {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let Some(file) = args.first() else {
            return Err(HeroError::Usage("tail <file> [n]"));
        };
        let n = line_count(args.get(1))?;
        let content = read_text(&ctx.session.resolve(file), file)?;
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let tail = lines[lines.len().saturating_sub(n)..].concat();
        ctx.out_raw(tail.as_bytes())
    }
}

pub struct Grep;

impl Command for Grep {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let [pattern, files @ ..] = args else {
            return Err(HeroError::Usage("grep <pattern> <file> [file...]"));
        };
        if files.is_empty() {
            return Err(HeroError::Usage("grep <pattern> <file> [file...]"));
        }

        for file in files {
            let content = match read_text(&ctx.session.resolve(file), file) {
                Ok(content) => content,
                Err(e) => {
                    ctx.report(&e);
                    continue;
                }
            };
            for (i, line) in content.lines().enumerate() {
                if line.contains(pattern.as_str()) {
                    let record = format!(
                        "{}:{}:{}",
                        ctx.paint(&[Style::Green], file),
                        ctx.paint(&[Style::Cyan], &(i + 1).to_string()),
                        line.trim_end()
                    );
                    ctx.out(&record)?;
                }
            }
        }
        Ok(())
    }
}

pub struct Wc;

impl Command for Wc {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        if args.is_empty() {
            return Err(HeroError::Usage("wc <file> [file...]"));
        }
        for file in args {
            match read_text(&ctx.session.resolve(file), file) {
                Ok(content) => {
                    let lines = content.matches('\n').count();
                    let words = content.split_whitespace().count();
                    let chars = content.chars().count();
                    ctx.out(&format!("{lines:>8} {words:>8} {chars:>8} {file}"))?;
                }
                Err(e) => ctx.report(&e),
            }
        }
        Ok(())
    }
}

pub struct Sort;

impl Command for Sort {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let Some(file) = args.first() else {
            return Err(HeroError::Usage("sort <file>"));
        };
        let content = read_text(&ctx.session.resolve(file), file)?;
        let mut lines: Vec<&str> = content.lines().collect();
        lines.sort_unstable();
        for line in lines {
            ctx.out(line)?;
        }
        Ok(())
    }
}

pub struct Diff;

impl Command for Diff {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let [first, second, ..] = args else {
            return Err(HeroError::Usage("diff <file1> <file2>"));
        };
        let old = read_text(&ctx.session.resolve(first), first)?;
        let new = read_text(&ctx.session.resolve(second), second)?;
        let old: Vec<&str> = old.lines().collect();
        let new: Vec<&str> = new.lines().collect();

        for line in unified_diff(&old, &new, first, second, 3) {
            let styled = match line.as_bytes().first() {
                Some(b'+') => ctx.paint(&[Style::Green], &line),
                Some(b'-') => ctx.paint(&[Style::Red], &line),
                Some(b'@') => ctx.paint(&[Style::Cyan], &line),
                _ => line,
            };
            ctx.out(&styled)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::testing::Harness;
    use std::fs;
    use tempfile::TempDir;

    fn setup(files: &[(&str, &str)]) -> (TempDir, Harness) {
        let tmp = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(tmp.path().join(name), content).unwrap();
        }
        let h = Harness::new(tmp.path());
        (tmp, h)
    }

    #[test]
    fn test_echo_joins_args() {
        let (_tmp, mut h) = setup(&[]);
        let (out, _) = h.run("echo", &["hello", "big world"]);
        assert_eq!(out, "hello big world\n");

        let (out, _) = h.run("echo", &["use", "--help", "for", "more"]);
        assert_eq!(out, "use --help for more\n");
        let (out, _) = h.run("echo", &["--help"]);
        assert!(out.starts_with("echo - "));
    }

    #[test]
    fn test_cat_verbatim_and_per_file_errors() {
        let (_tmp, mut h) = setup(&[("a.txt", "one\n"), ("b.txt", "two")]);
        let (out, err) = h.run("cat", &["a.txt", "missing.txt", "b.txt"]);
        assert_eq!(out, "one\ntwo");
        assert_eq!(err, "cat: missing.txt: No such file or directory\n");
    }

    #[test]
    fn test_head_and_tail() {
        let content: String = (1..=15).map(|n| format!("{n}\n")).collect();
        let (_tmp, mut h) = setup(&[("n.txt", content.as_str())]);

        let (out, _) = h.run("head", &["n.txt", "2"]);
        assert_eq!(out, "1\n2\n");
        let (out, _) = h.run("tail", &["n.txt", "2"]);
        assert_eq!(out, "14\n15\n");
        let (out, _) = h.run("head", &["n.txt"]);
        assert_eq!(out.lines().count(), 10);

        let (_, err) = h.run("tail", &["n.txt", "two"]);
        assert_eq!(err, "tail: Invalid argument: 'two' is not a line count\n");
    }

    #[test]
    fn test_grep_reports_line_numbers() {
        let (_tmp, mut h) = setup(&[("g.txt", "hello\nworld\nhello again\n")]);
        let (out, _) = h.run("grep", &["hello", "g.txt"]);
        assert_eq!(out, "g.txt:1:hello\ng.txt:3:hello again\n");

        let (_, err) = h.run("grep", &["hello"]);
        assert_eq!(err, "grep: Usage: grep <pattern> <file> [file...]\n");
    }

    #[test]
    fn test_grep_searches_for_help_flag_text() {
        let (_tmp, mut h) = setup(&[("f.txt", "run with --help\nplain\n")]);
        let (out, err) = h.run("grep", &["--help", "f.txt"]);
        assert_eq!(out, "f.txt:1:run with --help\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_wc_counts() {
        let (_tmp, mut h) = setup(&[("w.txt", "line1\nline2\nline3\n")]);
        let (out, _) = h.run("wc", &["w.txt"]);
        assert_eq!(out, format!("{:>8} {:>8} {:>8} w.txt\n", 3, 3, 18));
    }

    #[test]
    fn test_sort_lines() {
        let (_tmp, mut h) = setup(&[("s.txt", "pear\napple\nfig")]);
        let (out, _) = h.run("sort", &["s.txt"]);
        assert_eq!(out, "apple\nfig\npear\n");
    }

    #[test]
    fn test_diff_output() {
        let (_tmp, mut h) = setup(&[("a", "x\ny\n"), ("b", "x\nz\n")]);
        let (out, _) = h.run("diff", &["a", "b"]);
        assert_eq!(out, "--- a\n+++ b\n@@ -1,2 +1,2 @@\n x\n-y\n+z\n");

        let (out, _) = h.run("diff", &["a", "a"]);
        assert_eq!(out, "");

        let (_, err) = h.run("diff", &["a", "nope"]);
        assert_eq!(err, "diff: nope: No such file or directory\n");
    }
}
