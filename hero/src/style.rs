//! ANSI styling for command output and prompt templates

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Reset,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Bold,
    Dim,
}

impl Style {
    const ALL: [Style; 9] = [
        Style::Reset,
        Style::Red,
        Style::Green,
        Style::Yellow,
        Style::Blue,
        Style::Magenta,
        Style::Cyan,
        Style::Bold,
        Style::Dim,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Style::Reset => "\x1b[0m",
            Style::Red => "\x1b[91m",
            Style::Green => "\x1b[92m",
            Style::Yellow => "\x1b[93m",
            Style::Blue => "\x1b[94m",
            Style::Magenta => "\x1b[95m",
            Style::Cyan => "\x1b[96m",
            Style::Bold => "\x1b[1m",
            Style::Dim => "\x1b[2m",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Style::Reset => "{reset}",
            Style::Red => "{red}",
            Style::Green => "{green}",
            Style::Yellow => "{yellow}",
            Style::Blue => "{blue}",
            Style::Magenta => "{magenta}",
            Style::Cyan => "{cyan}",
            Style::Bold => "{bold}",
            Style::Dim => "{dim}",
        }
    }
}

/// Wrap `text` in `styles`, or return it untouched when color is off.
pub fn paint(enabled: bool, styles: &[Style], text: &str) -> String {
    if !enabled || styles.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 16);
    for style in styles {
        out.push_str(style.code());
    }
    out.push_str(text);
    out.push_str(Style::Reset.code());
    out
}

/// Replace `{red}`, `{bold}`, `{reset}`... in a template with ANSI codes,
/// or with nothing when color is off.
pub fn expand_tokens(template: &str, enabled: bool) -> String {
    let mut out = template.to_string();
    for style in Style::ALL {
        let replacement = if enabled { style.code() } else { "" };
        out = out.replace(style.token(), replacement);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_disabled_is_plain() {
        assert_eq!(paint(false, &[Style::Red], "oops"), "oops");
    }

    #[test]
    fn test_paint_enabled_wraps() {
        assert_eq!(
            paint(true, &[Style::Blue, Style::Bold], "dir/"),
            "\x1b[94m\x1b[1mdir/\x1b[0m"
        );
    }

    #[test]
    fn test_expand_tokens() {
        assert_eq!(expand_tokens("{green}hero{reset}$ ", false), "hero$ ");
        assert_eq!(expand_tokens("{red}x", true), "\x1b[91mx");
    }
}
