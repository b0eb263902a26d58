//! Line commands accepted by the interactive console.

use relief_core::error::ParseError;
use relief_core::intake::IntakeMessage;
use relief_core::map::MapMessage;
use relief_core::roster::RosterMessage;
use relief_core::sos::SosMessage;
use relief_core::Message;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  tab <report|dashboard|map>   switch tab
  type <medical|food|shelter|rescue>
  urgency <critical|high|medium|low>
  location <text>              name <text>        phone <text>
  people <n>                   describe <text>
  submit                       submit the report form
  assign <id>                  resolve <id>
  sos                          press the SOS control
  token <text>                 init-map
  show                         print the dashboard snapshot
  help                         quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineCommand {
    Dispatch(Message),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Parses one console line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<LineCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let arg = |name: &'static str| -> Result<String, CommandError> {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(name))
        } else {
            Ok(rest.to_string())
        }
    };

    let message: Message = match verb {
        "show" => return Ok(Some(LineCommand::Show)),
        "help" | "?" => return Ok(Some(LineCommand::Help)),
        "quit" | "exit" => return Ok(Some(LineCommand::Quit)),
        "tab" => Message::SelectTab(arg("tab")?.parse()?),
        "type" => IntakeMessage::SelectType(arg("type")?.parse()?).into(),
        "urgency" => IntakeMessage::SelectUrgency(arg("urgency")?.parse()?).into(),
        // Free-text fields may be cleared with an empty argument.
        "location" => IntakeMessage::LocationChanged(rest.to_string()).into(),
        "name" => IntakeMessage::ContactNameChanged(rest.to_string()).into(),
        "phone" => IntakeMessage::ContactPhoneChanged(rest.to_string()).into(),
        "people" => IntakeMessage::PeopleAffectedChanged(rest.to_string()).into(),
        "describe" => IntakeMessage::DescriptionChanged(rest.to_string()).into(),
        "submit" => IntakeMessage::Submit.into(),
        "assign" => RosterMessage::Assign(arg("assign")?).into(),
        "resolve" => RosterMessage::Resolve(arg("resolve")?).into(),
        "sos" => SosMessage::Press.into(),
        "token" => MapMessage::TokenChanged(rest.to_string()).into(),
        "init-map" => MapMessage::Initialize.into(),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(LineCommand::Dispatch(message)))
}
