use crate::registry::{Category, Registry};
use crate::style::{paint, Style};

pub struct CommandHelp {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub options: &'static [(&'static str, &'static str)],
}

pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "alias",
        summary: "Define or display aliases",
        usage: "alias [name[=expansion]]",
        options: &[],
    },
    CommandHelp {
        name: "cat",
        summary: "Print file contents",
        usage: "cat FILE...",
        options: &[],
    },
    CommandHelp {
        name: "cd",
        summary: "Change the current directory",
        usage: "cd [DIR|~]",
        options: &[],
    },
    CommandHelp {
        name: "clear",
        summary: "Clear the terminal screen",
        usage: "clear",
        options: &[],
    },
    CommandHelp {
        name: "cp",
        summary: "Copy files and directories",
        usage: "cp SOURCE DEST",
        options: &[],
    },
    CommandHelp {
        name: "diff",
        summary: "Compare two files line by line",
        usage: "diff FILE1 FILE2",
        options: &[],
    },
    CommandHelp {
        name: "du",
        summary: "Estimate disk usage",
        usage: "du [PATH]",
        options: &[],
    },
    CommandHelp {
        name: "echo",
        summary: "Display a line of text",
        usage: "echo [STRING]...",
        options: &[],
    },
    CommandHelp {
        name: "edit",
        summary: "Open files in $EDITOR",
        usage: "edit [FILE]...",
        options: &[],
    },
    CommandHelp {
        name: "env",
        summary: "Display or set environment variables",
        usage: "env [KEY[=VALUE]]",
        options: &[],
    },
    CommandHelp {
        name: "exit",
        summary: "Exit the shell",
        usage: "exit",
        options: &[],
    },
    CommandHelp {
        name: "find",
        summary: "Search for files by name",
        usage: "find PATTERN [PATH]",
        options: &[],
    },
    CommandHelp {
        name: "grep",
        summary: "Print lines containing a pattern",
        usage: "grep PATTERN FILE...",
        options: &[],
    },
    CommandHelp {
        name: "head",
        summary: "Output the first part of a file",
        usage: "head FILE [N]",
        options: &[],
    },
    CommandHelp {
        name: "help",
        summary: "Display help for commands",
        usage: "help [COMMAND]",
        options: &[],
    },
    CommandHelp {
        name: "history",
        summary: "Show command history",
        usage: "history [N]",
        options: &[],
    },
    CommandHelp {
        name: "ls",
        summary: "List directory contents",
        usage: "ls [-l] [-a] [PATH]",
        options: &[
            ("-l", "Use long listing format"),
            ("-a", "Show hidden entries"),
            ("-la, -al", "Both of the above"),
        ],
    },
    CommandHelp {
        name: "mkdir",
        summary: "Create directories, parents included",
        usage: "mkdir DIR...",
        options: &[],
    },
    CommandHelp {
        name: "mv",
        summary: "Move or rename files",
        usage: "mv SOURCE DEST",
        options: &[],
    },
    CommandHelp {
        name: "nano",
        summary: "Open files in nano",
        usage: "nano [FILE]...",
        options: &[],
    },
    CommandHelp {
        name: "pwd",
        summary: "Print the current directory",
        usage: "pwd",
        options: &[],
    },
    CommandHelp {
        name: "quit",
        summary: "Exit the shell",
        usage: "quit",
        options: &[],
    },
    CommandHelp {
        name: "rm",
        summary: "Remove files",
        usage: "rm FILE...",
        options: &[],
    },
    CommandHelp {
        name: "rmdir",
        summary: "Remove directories",
        usage: "rmdir [-r] DIR...",
        options: &[("-r", "Remove directories and their contents")],
    },
    CommandHelp {
        name: "sort",
        summary: "Print the lines of a file in sorted order",
        usage: "sort FILE",
        options: &[],
    },
    CommandHelp {
        name: "tail",
        summary: "Output the last part of a file",
        usage: "tail FILE [N]",
        options: &[],
    },
    CommandHelp {
        name: "touch",
        summary: "Create files or update their timestamps",
        usage: "touch FILE...",
        options: &[],
    },
    CommandHelp {
        name: "tree",
        summary: "Display a directory tree",
        usage: "tree [PATH] [DEPTH]",
        options: &[],
    },
    CommandHelp {
        name: "unalias",
        summary: "Remove an alias",
        usage: "unalias NAME",
        options: &[],
    },
    CommandHelp {
        name: "vim",
        summary: "Open files in vim",
        usage: "vim [FILE]...",
        options: &[],
    },
    CommandHelp {
        name: "wc",
        summary: "Count lines, words and characters",
        usage: "wc FILE...",
        options: &[],
    },
    CommandHelp {
        name: "which",
        summary: "Locate a command",
        usage: "which COMMAND",
        options: &[],
    },
];

pub fn get_help(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS.iter().find(|c| c.name == name)
}

pub fn format_help(cmd: &CommandHelp) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} - {}\n\n", cmd.name, cmd.summary));
    out.push_str(&format!("Usage: {}\n", cmd.usage));
    if !cmd.options.is_empty() {
        out.push_str("\nOptions:\n");
        for (opt, desc) in cmd.options {
            out.push_str(&format!("  {opt:16} {desc}\n"));
        }
    }
    out
}

/// Categorized listing of the registered commands, followed by tips.
pub fn format_help_list(registry: &Registry, color: bool) -> String {
    let mut out = format!("\n{}\n\n", paint(color, &[Style::Bold], "Available Commands:"));

    for category in Category::ALL {
        out.push_str(&paint(color, &[Style::Cyan], &format!("{}:", category.label())));
        out.push('\n');
        for name in registry.names().filter(|n| n.category() == category) {
            let summary = get_help(name.as_str()).map_or("", |h| h.summary);
            let shown = paint(color, &[Style::Green], &format!("{:10}", name.as_str()));
            out.push_str(format!("  {shown} {summary}").trim_end());
            out.push('\n');
        }
        out.push('\n');
    }

    let bold = |s: &str| paint(color, &[Style::Bold], s);
    out.push_str(&paint(color, &[Style::Yellow], "Tips:"));
    out.push('\n');
    out.push_str(&format!("  • Press {} for auto-completion\n", bold("Tab")));
    out.push_str(&format!("  • Press {} for reverse search\n", bold("Ctrl+R")));
    out.push_str(&format!("  • Use {} to create shortcuts\n", bold("alias")));
    out.push_str("  • Built-in aliases: ll, la, .., ..., ~\n");
    out.push_str("  • Use 'help COMMAND' or 'COMMAND --help' for more information\n");
    out
}

/// `--help` as the only argument. Anywhere else it is data (`echo a --help`),
/// and `-h` is always an ordinary argument.
pub fn wants_help(args: &[String]) -> bool {
    matches!(args, [only] if only == "--help")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CommandName;

    #[test]
    fn test_every_command_has_help() {
        for name in CommandName::ALL {
            assert!(get_help(name.as_str()).is_some(), "no help for {name}");
        }
    }

    #[test]
    fn test_format_help_with_options() {
        let text = format_help(get_help("rmdir").unwrap());
        assert!(text.starts_with("rmdir - Remove directories\n\nUsage: rmdir [-r] DIR...\n"));
        assert!(text.contains("\nOptions:\n  -r "));
    }

    #[test]
    fn test_help_list_is_categorized() {
        let text = format_help_list(&Registry::builtin(), false);
        let nav = text.find("Navigation:").unwrap();
        let files = text.find("File Operations:").unwrap();
        let control = text.find("Control:").unwrap();
        assert!(nav < files && files < control);
        assert!(text.contains("  ls         List directory contents\n"));
        assert!(text.contains("Built-in aliases: ll, la, .., ..., ~"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_wants_help() {
        assert!(wants_help(&["--help".to_string()]));
        assert!(!wants_help(&["x".to_string(), "--help".to_string()]));
        assert!(!wants_help(&["--help".to_string(), "f.txt".to_string()]));
        assert!(!wants_help(&["-h".to_string()]));
        assert!(!wants_help(&[]));
    }
}
