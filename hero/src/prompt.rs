//! Prompt rendering.

use crate::style::expand_tokens;
use std::path::{Component, Path};

pub const DEFAULT_TEMPLATE: &str = "{green}{bold}hero{reset}:{blue}{cwd}{reset}$ ";

/// Marker shown while the shell sits in its base directory.
pub const HOME_MARKER: &str = "~";

/// `cwd` relative to `base`, climbing with `..` where needed.
pub fn relative_dir(cwd: &Path, base: &Path) -> String {
    let cwd: Vec<Component<'_>> = cwd.components().collect();
    let base: Vec<Component<'_>> = base.components().collect();
    let common = cwd
        .iter()
        .zip(&base)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); base.len() - common];
    parts.extend(
        cwd[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        HOME_MARKER.to_string()
    } else {
        parts.join("/")
    }
}

/// Fill `{cwd}` and the color tokens of `template`.
pub fn render(template: &str, cwd: &Path, base: &Path, color: bool) -> String {
    expand_tokens(template, color).replace("{cwd}", &relative_dir(cwd, base))
}
