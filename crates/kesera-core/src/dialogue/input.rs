//! Classify an incoming chat message.

use crate::fetcher::FetchRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Start,
    Help,
    Cancel,
    /// `/result <reg> <first name>` or a two-line message.
    Query(FetchRequest),
    /// `/result` with missing arguments.
    ResultUsage,
    UnknownCommand,
    Text(&'a str),
}

pub fn parse(text: &str) -> Input<'_> {
    let trimmed = text.trim();
    if let Some(command_line) = trimmed.strip_prefix('/') {
        let (command, args) = command_line
            .split_once(char::is_whitespace)
            .unwrap_or((command_line, ""));
        // Group chats address commands as `/result@some_bot`.
        let command = command.split('@').next().unwrap_or("");
        return match command.to_ascii_lowercase().as_str() {
            "start" => Input::Start,
            "help" => Input::Help,
            "cancel" => Input::Cancel,
            "result" => parse_result_args(args),
            _ => Input::UnknownCommand,
        };
    }

    let lines: Vec<&str> = trimmed
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if let [registration_number, first_name] = lines.as_slice() {
        if let Ok(request) = FetchRequest::new(registration_number, first_name) {
            return Input::Query(request);
        }
    }
    Input::Text(trimmed)
}

fn parse_result_args(args: &str) -> Input<'static> {
    let args = args.trim();
    let Some((registration_number, first_name)) = args.split_once(char::is_whitespace) else {
        return Input::ResultUsage;
    };
    match FetchRequest::new(registration_number, first_name) {
        Ok(request) => Input::Query(request),
        Err(_) => Input::ResultUsage,
    }
}
