//! Slash commands typed in the input line.

/// What the submitted input line asks for.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum InputCommand<'a> {
    /// Nothing but whitespace.
    Empty,
    /// A math question.
    Ask(&'a str),
    /// `/image <path>`
    Image(&'a str),
    /// `/admin <password>`
    Admin(&'a str),
    /// `/clear`
    Clear,
    /// A known command without its required argument.
    Usage(&'static str),
    Unknown(&'a str),
}

/// Classify a submitted input line.
pub(crate) fn parse_input(input: &str) -> InputCommand<'_> {
    let input = input.trim();
    if input.is_empty() {
        return InputCommand::Empty;
    }
    let Some(command) = input.strip_prefix('/') else {
        return InputCommand::Ask(input);
    };
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "image" if arg.is_empty() => InputCommand::Usage("Usage: /image <path>"),
        "image" => InputCommand::Image(arg),
        "admin" if arg.is_empty() => InputCommand::Usage("Usage: /admin <password>"),
        "admin" => InputCommand::Admin(arg),
        "clear" => InputCommand::Clear,
        _ => InputCommand::Unknown(name),
    }
}
