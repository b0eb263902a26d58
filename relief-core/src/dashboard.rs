//! Page shell: the dashboard model, its messages, and the update function.
//!
//! `update` is the only place the model changes. It never performs side
//! effects itself; it returns [`Command`]s for the runtime to carry out.

use crate::config::DashboardConfig;
use crate::error::ParseError;
use crate::intake::{IntakeForm, IntakeMessage};
use crate::map::{MapMessage, MapPanel};
use crate::notify::Notification;
use crate::roster::{Roster, RosterMessage};
use crate::sos::{SosMessage, SosTrigger};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Report,
    Dashboard,
    Map,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Self::Report, Self::Dashboard, Self::Map];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Dashboard => "dashboard",
            Self::Map => "map",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Report => "Report",
            Self::Dashboard => "Dashboard",
            Self::Map => "Map",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "dashboard" => Ok(Self::Dashboard),
            "map" => Ok(Self::Map),
            _ => Err(ParseError::unknown("tab", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    SelectTab(Tab),
    Intake(IntakeMessage),
    Roster(RosterMessage),
    Sos(SosMessage),
    Map(MapMessage),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectTab(_) => "Shell::SelectTab",
            Self::Intake(IntakeMessage::Submit) => "Intake::Submit",
            Self::Intake(_) => "Intake::Edit",
            Self::Roster(RosterMessage::Assign(_)) => "Roster::Assign",
            Self::Roster(RosterMessage::Resolve(_)) => "Roster::Resolve",
            Self::Sos(SosMessage::Press) => "Sos::Press",
            Self::Sos(SosMessage::Reset { .. }) => "Sos::Reset",
            Self::Map(MapMessage::TokenChanged(_)) => "Map::TokenChanged",
            Self::Map(MapMessage::Initialize) => "Map::Initialize",
        }
    }
}

/// Side effects requested by `update`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Notify(Notification),
    Schedule { after: Duration, message: Message },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardModel {
    pub tab: Tab,
    pub intake: IntakeForm,
    pub roster: Roster,
    pub sos: SosTrigger,
    pub map: MapPanel,
}

impl DashboardModel {
    pub fn new(config: &DashboardConfig) -> Self {
        let map = match config.map_token() {
            Some(token) => MapPanel::with_token(token),
            None => MapPanel::new(),
        };
        Self {
            tab: Tab::default(),
            intake: IntakeForm::new(),
            roster: Roster::seeded(),
            sos: SosTrigger::new(config.sos_reset_after()),
            map,
        }
    }
}

impl Default for DashboardModel {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

pub fn update(model: &mut DashboardModel, message: Message) -> Vec<Command> {
    tracing::debug!(message = message.name(), "update");

    match message {
        Message::SelectTab(tab) => {
            model.tab = tab;
            Vec::new()
        }
        Message::Intake(msg) => model.intake.update(msg),
        Message::Roster(msg) => model.roster.update(msg),
        Message::Sos(msg) => model.sos.update(msg),
        Message::Map(msg) => model.map.update(msg),
    }
}
