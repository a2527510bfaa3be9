/// One line of input to the text protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Position(Vec<String>),
    Move(String),
    Legal,
    Status,
    Undo,
    Fen,
    Board,
    History,
    SetOption(Vec<String>),
    Options,
    Quit,
    /// Recognized keyword with missing or extra arguments
    Malformed(String),
    Unknown(String),
}

pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let parts: Vec<&str> = trimmed.split_whitespace().collect();

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<String>>();
    let bare = |cmd: Command| {
        if parts.len() == 1 {
            cmd
        } else {
            Command::Malformed(trimmed.to_string())
        }
    };

    let cmd = match parts[0] {
        "new" => bare(Command::New),
        "position" => Command::Position(owned_parts()),
        "move" => match parts.as_slice() {
            [_, mv] => Command::Move((*mv).to_string()),
            _ => Command::Malformed(trimmed.to_string()),
        },
        "legal" => bare(Command::Legal),
        "status" => bare(Command::Status),
        "undo" => bare(Command::Undo),
        "fen" => bare(Command::Fen),
        "board" | "d" => bare(Command::Board),
        "history" => bare(Command::History),
        "setoption" => Command::SetOption(owned_parts()),
        "options" => bare(Command::Options),
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}
