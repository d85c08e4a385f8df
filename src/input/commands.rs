use thiserror::Error;

pub struct CommandDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "go",
        aliases: &["g"],
        description: "Navigate to a URL (e.g. go /acme/apps/system/access)",
    },
    CommandDef {
        name: "up",
        aliases: &["u"],
        description: "Navigate to the logical parent",
    },
    CommandDef {
        name: "cancel",
        aliases: &["c"],
        description: "Leave the current page, replacing it if it is an add/edit/delete page",
    },
    CommandDef {
        name: "back",
        aliases: &["b"],
        description: "Return to the previous page, or the logical parent",
    },
    CommandDef {
        name: "context",
        aliases: &["ctx"],
        description: "Print the navigation context",
    },
    CommandDef {
        name: "parent",
        aliases: &["p"],
        description: "Print the logical parent",
    },
    CommandDef {
        name: "crumbs",
        aliases: &["bc"],
        description: "Print the breadcrumb trail",
    },
    CommandDef {
        name: "history",
        aliases: &["h"],
        description: "Print recorded history",
    },
    CommandDef {
        name: "help",
        aliases: &["?"],
        description: "List replay commands",
    },
    CommandDef {
        name: "quit",
        aliases: &["q"],
        description: "Stop replaying",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayCommand {
    Go(String),
    Up,
    Cancel,
    Back,
    Context,
    Parent,
    Crumbs,
    History,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("ambiguous command: {0}")]
    Ambiguous(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
}

/// Commands whose name or any alias starts with `input`, case-insensitively.
/// An alias prefix counts as a match for its command, so `b` finds both
/// `back` and `crumbs` (alias `bc`).
pub fn matching_commands(input: &str) -> Vec<&'static CommandDef> {
    let input_lower = input.to_lowercase();
    COMMANDS
        .iter()
        .filter(|cmd| {
            cmd.name.starts_with(&input_lower)
                || cmd.aliases.iter().any(|a| a.starts_with(&input_lower))
        })
        .collect()
}

fn lookup(word: &str) -> Result<&'static CommandDef, CommandError> {
    let word_lower = word.to_lowercase();
    if let Some(exact) = COMMANDS
        .iter()
        .find(|cmd| cmd.name == word_lower || cmd.aliases.iter().any(|a| *a == word_lower))
    {
        return Ok(exact);
    }

    match matching_commands(word).as_slice() {
        [] => Err(CommandError::Unknown(word.to_string())),
        [only] => Ok(*only),
        _ => Err(CommandError::Ambiguous(word.to_string())),
    }
}

pub fn parse_command(line: &str) -> Result<ReplayCommand, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Err(CommandError::Unknown(String::new()));
    };

    let command = match lookup(word)?.name {
        "go" => {
            let url = parts.next().ok_or(CommandError::MissingArgument("go"))?;
            ReplayCommand::Go(url.to_string())
        }
        "up" => ReplayCommand::Up,
        "cancel" => ReplayCommand::Cancel,
        "back" => ReplayCommand::Back,
        "context" => ReplayCommand::Context,
        "parent" => ReplayCommand::Parent,
        "crumbs" => ReplayCommand::Crumbs,
        "history" => ReplayCommand::History,
        "help" => ReplayCommand::Help,
        "quit" => ReplayCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// One line per command: name, aliases and description.
pub fn help_lines() -> Vec<String> {
    COMMANDS
        .iter()
        .map(|cmd| {
            let names = std::iter::once(cmd.name)
                .chain(cmd.aliases.iter().copied())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{:<14} {}", names, cmd.description)
        })
        .collect()
}
