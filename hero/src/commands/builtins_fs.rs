use super::utils::{format_mtime, human_size, is_executable, mode_string};
use super::{split_flags, Command, ExecContext};
use crate::error::{HeroError, HeroResult};
use crate::style::Style;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(unix)]
const EXDEV: i32 = 18;

/// Sorted entry names of a directory.
fn sorted_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    Ok(names)
}

pub struct Pwd;

impl Command for Pwd {
    fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let cwd = ctx.session.cwd.display().to_string();
        ctx.out(&cwd)
    }
}

pub struct Cd;

impl Command for Cd {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let (display, target) = match args.first().map(String::as_str) {
            None | Some("~") => {
                let home = ctx.session.home_dir().ok_or_else(|| {
                    HeroError::VariableNotFound("HOME".to_string())
                })?;
                (home.display().to_string(), home)
            }
            Some(path) => (path.to_string(), ctx.session.resolve(path)),
        };

        let canonical = fs::canonicalize(&target).map_err(|e| HeroError::io(&display, e))?;
        if !canonical.is_dir() {
            return Err(HeroError::io(display, io::Error::other("Not a directory")));
        }
        fs::read_dir(&canonical).map_err(|e| HeroError::io(&display, e))?;

        tracing::debug!(from = %ctx.session.cwd.display(), to = %canonical.display(), "cd");
        ctx.session.cwd = canonical;
        Ok(())
    }
}

pub struct Ls;

impl Ls {
    fn decorate(ctx: &ExecContext<'_>, name: &str, meta: Option<&fs::Metadata>) -> String {
        match meta {
            Some(m) if m.is_dir() => ctx.paint(&[Style::Blue, Style::Bold], &format!("{name}/")),
            Some(m) if is_executable(m) => ctx.paint(&[Style::Green], &format!("{name}*")),
            _ => name.to_string(),
        }
    }
}

impl Command for Ls {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let (flags, paths) = split_flags(args);
        let long_format = flags.iter().any(|f| matches!(*f, "-l" | "-la" | "-al"));
        let show_hidden = flags.iter().any(|f| matches!(*f, "-a" | "-la" | "-al"));
        let path = paths.first().copied().unwrap_or(".");
        let dir = ctx.session.resolve(path);

        let names = sorted_names(&dir).map_err(|e| HeroError::io(path, e))?;
        for name in names.iter().filter(|n| show_hidden || !n.starts_with('.')) {
            let meta = fs::metadata(dir.join(name)).ok();
            let shown = Self::decorate(ctx, name, meta.as_ref());
            let line = match (&meta, long_format) {
                (Some(meta), true) => format!(
                    "{} {:>8} {} {}",
                    mode_string(meta),
                    meta.len(),
                    format_mtime(meta.modified().unwrap_or(UNIX_EPOCH)),
                    shown
                ),
                _ => shown,
            };
            ctx.out(&line)?;
        }
        Ok(())
    }
}

pub struct Touch;

impl Touch {
    fn touch(path: &Path) -> io::Result<()> {
        let file = if path.is_dir() {
            fs::File::open(path)?
        } else {
            fs::OpenOptions::new().create(true).append(true).open(path)?
        };
        file.set_modified(SystemTime::now())
    }
}

impl Command for Touch {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        if args.is_empty() {
            return Err(HeroError::Usage("touch <file> [file...]"));
        }
        for arg in args {
            let path = ctx.session.resolve(arg);
            if let Err(e) = Self::touch(&path) {
                ctx.report(&HeroError::io(arg, e));
            }
        }
        Ok(())
    }
}

pub struct Rm;

impl Command for Rm {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        if args.is_empty() {
            return Err(HeroError::Usage("rm <file> [file...]"));
        }
        for arg in args {
            let path = ctx.session.resolve(arg);
            if path.is_dir() {
                ctx.warn(&format!("Skipping directory {arg} (use rmdir)"));
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => ctx.out(&format!("Removed: {arg}"))?,
                Err(e) => ctx.report(&HeroError::io(arg, e)),
            }
        }
        Ok(())
    }
}

pub struct Mkdir;

impl Command for Mkdir {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        if args.is_empty() {
            return Err(HeroError::Usage("mkdir <dir> [dir...]"));
        }
        for arg in args {
            let path = ctx.session.resolve(arg);
            match fs::create_dir_all(&path) {
                Ok(()) => ctx.out(&format!("Created: {arg}"))?,
                Err(e) => ctx.report(&HeroError::io(arg, e)),
            }
        }
        Ok(())
    }
}

pub struct Rmdir;

impl Command for Rmdir {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let (flags, dirs) = split_flags(args);
        if dirs.is_empty() {
            return Err(HeroError::Usage("rmdir [-r] <dir> [dir...]"));
        }
        let recursive = flags.contains(&"-r");
        for dir in dirs {
            let path = ctx.session.resolve(dir);
            let result = if recursive {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_dir(&path)
            };
            match result {
                Ok(()) => ctx.out(&format!("Removed: {dir}"))?,
                Err(e) => ctx.report(&HeroError::io(dir, e)),
            }
        }
        Ok(())
    }
}

/// Destination for `mv`/`cp`: inside `dst` when it is an existing directory.
fn destination(src: &Path, dst: PathBuf) -> PathBuf {
    match src.file_name() {
        Some(name) if dst.is_dir() => dst.join(name),
        _ => dst,
    }
}

/// Compared on canonical paths so `..` and symlinks cannot hide the overlap.
fn copies_into_itself(src: &Path, dst: &Path) -> bool {
    let Ok(src) = fs::canonicalize(src) else {
        return false;
    };
    let dst = match (dst.parent(), dst.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map_or_else(|_| dst.to_path_buf(), |parent| parent.join(name)),
        _ => dst.to_path_buf(),
    };
    dst.starts_with(&src)
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

pub struct Mv;

impl Command for Mv {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let [src_arg, dst_arg, ..] = args else {
            return Err(HeroError::Usage("mv <source> <dest>"));
        };
        let src = ctx.session.resolve(src_arg);
        let dst = destination(&src, ctx.session.resolve(dst_arg));

        match fs::rename(&src, &dst) {
            Ok(()) => {}
            #[cfg(unix)]
            Err(e) if e.raw_os_error() == Some(EXDEV) => {
                // Different filesystems: copy, then remove the original
                if src.is_dir() {
                    copy_tree(&src, &dst).map_err(|e| HeroError::io(src_arg, e))?;
                    fs::remove_dir_all(&src).map_err(|e| HeroError::io(src_arg, e))?;
                } else {
                    fs::copy(&src, &dst).map_err(|e| HeroError::io(src_arg, e))?;
                    fs::remove_file(&src).map_err(|e| HeroError::io(src_arg, e))?;
                }
            }
            Err(e) => return Err(HeroError::io(src_arg, e)),
        }
        ctx.out(&format!("Moved: {src_arg} -> {dst_arg}"))
    }
}

pub struct Cp;

impl Command for Cp {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let [src_arg, dst_arg, ..] = args else {
            return Err(HeroError::Usage("cp <source> <dest>"));
        };
        let src = ctx.session.resolve(src_arg);
        let dst = destination(&src, ctx.session.resolve(dst_arg));

        let meta = fs::metadata(&src).map_err(|e| HeroError::io(src_arg, e))?;
        if meta.is_dir() {
            if copies_into_itself(&src, &dst) {
                return Err(HeroError::InvalidArgument(format!(
                    "cannot copy directory {src_arg} into itself"
                )));
            }
            copy_tree(&src, &dst).map_err(|e| HeroError::io(dst_arg, e))?;
        } else {
            fs::copy(&src, &dst).map_err(|e| HeroError::io(dst_arg, e))?;
        }
        ctx.out(&format!("Copied: {src_arg} -> {dst_arg}"))
    }
}

pub struct Find;

impl Find {
    fn walk(ctx: &mut ExecContext<'_>, dir: &Path, shown: &Path, pattern: &str) -> HeroResult<()> {
        let names = match sorted_names(dir) {
            Ok(names) => names,
            Err(e) => {
                ctx.report(&HeroError::io(shown.display().to_string(), e));
                return Ok(());
            }
        };

        let (dirs, files): (Vec<&String>, Vec<&String>) =
            names.iter().partition(|n| dir.join(n).is_dir());

        for name in files.iter().filter(|n| n.contains(pattern)) {
            let line = shown.join(name).display().to_string();
            ctx.out(&line)?;
        }
        for name in dirs.iter().filter(|n| n.contains(pattern)) {
            let line = ctx.paint(&[Style::Blue], &format!("{}/", shown.join(name).display()));
            ctx.out(&line)?;
        }
        for name in dirs {
            let path = dir.join(name);
            // Do not follow symlinked directories
            if fs::symlink_metadata(&path).is_ok_and(|m| m.is_dir()) {
                Self::walk(ctx, &path, &shown.join(name), pattern)?;
            }
        }
        Ok(())
    }
}

impl Command for Find {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let Some(pattern) = args.first() else {
            return Err(HeroError::Usage("find <pattern> [path]"));
        };
        let start = args.get(1).map_or(".", String::as_str);
        let root = ctx.session.resolve(start);
        fs::metadata(&root).map_err(|e| HeroError::io(start, e))?;
        Self::walk(ctx, &root, Path::new(start), pattern)
    }
}

pub struct Tree;

impl Tree {
    fn render(
        ctx: &mut ExecContext<'_>,
        dir: &Path,
        prefix: &str,
        depth: usize,
        max_depth: usize,
    ) -> HeroResult<()> {
        if depth > max_depth {
            return Ok(());
        }

        let names = match sorted_names(dir) {
            Ok(names) => names,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return ctx.out(&format!("{prefix}[Permission Denied]"));
            }
            Err(e) => {
                ctx.report(&HeroError::io(dir.display().to_string(), e));
                return Ok(());
            }
        };
        let visible: Vec<&String> = names.iter().filter(|n| !n.starts_with('.')).collect();

        for (i, name) in visible.iter().enumerate() {
            let path = dir.join(name);
            let is_last = i == visible.len() - 1;
            let connector = if is_last { "└── " } else { "├── " };

            if path.is_dir() {
                let shown = ctx.paint(&[Style::Blue], &format!("{name}/"));
                ctx.out(&format!("{prefix}{connector}{shown}"))?;
                let extension = if is_last { "    " } else { "│   " };
                Self::render(ctx, &path, &format!("{prefix}{extension}"), depth + 1, max_depth)?;
            } else {
                ctx.out(&format!("{prefix}{connector}{name}"))?;
            }
        }
        Ok(())
    }
}

impl Command for Tree {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let path = args.first().map_or(".", String::as_str);
        let max_depth = match args.get(1) {
            None => 3,
            Some(d) => d
                .parse()
                .map_err(|_| HeroError::InvalidArgument(format!("'{d}' is not a depth")))?,
        };
        let root = ctx.session.resolve(path);
        let meta = fs::metadata(&root).map_err(|e| HeroError::io(path, e))?;
        if !meta.is_dir() {
            return Err(HeroError::io(path, io::Error::other("Not a directory")));
        }

        let header = ctx.paint(&[Style::Blue], &format!("{path}/"));
        ctx.out(&header)?;
        Self::render(ctx, &root, "", 0, max_depth)
    }
}

pub struct Du;

impl Du {
    /// Regular files count, and symlinks only when they point at one.
    fn total_size(path: &Path) -> u64 {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => Self::dir_size(path),
            Ok(meta) if meta.file_type().is_symlink() => fs::metadata(path)
                .ok()
                .filter(fs::Metadata::is_file)
                .map_or(0, |m| m.len()),
            Ok(meta) => meta.len(),
            Err(_) => 0,
        }
    }

    fn dir_size(path: &Path) -> u64 {
        fs::read_dir(path)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| Self::total_size(&e.path()))
                    .sum()
            })
            .unwrap_or(0)
    }
}

impl Command for Du {
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> HeroResult<()> {
        let path = args.first().map_or(".", String::as_str);
        let root = ctx.session.resolve(path);
        let meta = fs::metadata(&root).map_err(|e| HeroError::io(path, e))?;
        let total = if meta.is_dir() {
            Self::dir_size(&root)
        } else {
            Self::total_size(&root)
        };
        ctx.out(&format!("{}\t{}", human_size(total), path))
    }
}
