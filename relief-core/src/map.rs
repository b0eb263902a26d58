//! Map panel. Shows a token prompt until a token is supplied, then a static
//! placeholder with fixed counts.

use crate::dashboard::{Command, Message};
use crate::notify::Notification;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapMessage {
    TokenChanged(String),
    Initialize,
}

impl From<MapMessage> for Message {
    fn from(msg: MapMessage) -> Self {
        Message::Map(msg)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapStats {
    pub active: u32,
    pub critical: u32,
    pub resolved_today: u32,
}

pub const PLACEHOLDER_STATS: MapStats = MapStats {
    active: 12,
    critical: 3,
    resolved_today: 8,
};

pub const LEGEND: [&str; 4] = ["Critical", "High Priority", "Medium", "Resolved"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum MapView {
    Prompt { token: String },
    Placeholder { stats: MapStats, legend: Vec<String> },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapPanel {
    token: String,
    initialized: bool,
}

impl MapPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel that skips the prompt because a token was configured up front.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let initialized = !token.trim().is_empty();
        Self { token, initialized }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn view(&self) -> MapView {
        if self.initialized {
            MapView::Placeholder {
                stats: PLACEHOLDER_STATS,
                legend: LEGEND.iter().map(ToString::to_string).collect(),
            }
        } else {
            MapView::Prompt {
                token: self.token.clone(),
            }
        }
    }

    pub fn update(&mut self, msg: MapMessage) -> Vec<Command> {
        match msg {
            MapMessage::TokenChanged(token) => {
                self.token = token;
                Vec::new()
            }
            MapMessage::Initialize => {
                if self.token.trim().is_empty() {
                    tracing::debug!("map initialize without token ignored");
                    return Vec::new();
                }
                self.initialized = true;
                tracing::info!("map panel initialized");
                vec![Command::Notify(Notification::new(
                    "🗺️ Map Initialized",
                    "Mapbox integration is now active. Heatmap will display incident locations.",
                ))]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_keeps_prompt() {
        let mut map = MapPanel::new();
        assert!(map.update(MapMessage::Initialize).is_empty());
        map.update(MapMessage::TokenChanged("   ".into()));
        assert!(map.update(MapMessage::Initialize).is_empty());
        assert!(matches!(map.view(), MapView::Prompt { .. }));
    }

    #[test]
    fn token_switches_to_placeholder_stats() {
        let mut map = MapPanel::new();
        map.update(MapMessage::TokenChanged("pk.eyJ1".into()));
        assert!(matches!(map.view(), MapView::Prompt { ref token } if token == "pk.eyJ1"));

        let commands = map.update(MapMessage::Initialize);
        assert_eq!(commands.len(), 1);
        let MapView::Placeholder { stats, legend } = map.view() else {
            panic!("expected placeholder view");
        };
        assert_eq!(stats, PLACEHOLDER_STATS);
        assert_eq!((stats.active, stats.critical, stats.resolved_today), (12, 3, 8));
        assert_eq!(legend.len(), 4);
    }

    #[test]
    fn preset_token_starts_initialized() {
        assert!(MapPanel::with_token("pk.preset").is_initialized());
        assert!(!MapPanel::with_token("").is_initialized());
    }
}
