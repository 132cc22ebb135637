use crate::error::{HeroError, HeroResult};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// `Mon dd HH:MM` in the local time zone.
pub(crate) fn format_mtime(mtime: SystemTime) -> String {
    format_mtime_in(mtime, &Local)
}

fn format_mtime_in<Tz: TimeZone>(mtime: SystemTime, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    DateTime::<Utc>::from(mtime)
        .with_timezone(tz)
        .format("%b %d %H:%M")
        .to_string()
}

/// `drwxr-xr-x` style mode string.
pub(crate) fn mode_string(meta: &fs::Metadata) -> String {
    let type_char = if meta.is_dir() {
        'd'
    } else if meta.file_type().is_symlink() {
        'l'
    } else {
        '-'
    };
    let mode = permission_bits(meta);
    format!(
        "{}{}{}{}{}{}{}{}{}{}",
        type_char,
        if mode & 0o400 != 0 { 'r' } else { '-' },
        if mode & 0o200 != 0 { 'w' } else { '-' },
        if mode & 0o100 != 0 { 'x' } else { '-' },
        if mode & 0o040 != 0 { 'r' } else { '-' },
        if mode & 0o020 != 0 { 'w' } else { '-' },
        if mode & 0o010 != 0 { 'x' } else { '-' },
        if mode & 0o004 != 0 { 'r' } else { '-' },
        if mode & 0o002 != 0 { 'w' } else { '-' },
        if mode & 0o001 != 0 { 'x' } else { '-' },
    )
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    meta.permissions().mode()
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

/// Regular file with any execute bit set.
pub(crate) fn is_executable(meta: &fs::Metadata) -> bool {
    meta.is_file() && permission_bits(meta) & 0o111 != 0
}

/// Size with binary scaling: `0.0B`, `1.5KB`, ... up to `TB`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1}{}", UNITS[unit])
}

/// Read a whole file as text; `display` is the name used in errors.
pub(crate) fn read_text(path: &Path, display: &str) -> HeroResult<String> {
    let bytes = fs::read(path).map_err(|e| HeroError::io(display, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse an optional line count argument, defaulting to 10.
pub(crate) fn line_count(arg: Option<&String>) -> HeroResult<usize> {
    match arg {
        None => Ok(10),
        Some(n) => n
            .parse()
            .map_err(|_| HeroError::InvalidArgument(format!("'{n}' is not a line count"))),
    }
}
