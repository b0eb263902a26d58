//! Request roster and the responder actions on it.
//!
//! Assign and resolve only acknowledge the action; the listed status is left
//! as seeded.

use crate::dashboard::{Command, Message};
use crate::error::RosterError;
use crate::notify::Notification;
use crate::request::{Contact, IncidentRequest, RequestStatus, RequestType, Urgency};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterMessage {
    Assign(String),
    Resolve(String),
}

impl From<RosterMessage> for Message {
    fn from(msg: RosterMessage) -> Self {
        Message::Roster(msg)
    }
}

/// Actions a responder can take on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterAction {
    Assign,
    Resolve,
}

impl fmt::Display for RosterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign => f.write_str("assign"),
            Self::Resolve => f.write_str("resolve"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeTone {
    Destructive,
    Warning,
    Secondary,
    Outline,
    OutlinePrimary,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub tone: BadgeTone,
}

pub fn urgency_badge(urgency: Urgency) -> Badge {
    let tone = match urgency {
        Urgency::Critical => BadgeTone::Destructive,
        Urgency::High => BadgeTone::Warning,
        Urgency::Medium => BadgeTone::Secondary,
        Urgency::Low => BadgeTone::Outline,
    };
    Badge {
        label: format!("{} {}", urgency.marker(), urgency.label()),
        tone,
    }
}

pub fn status_badge(status: RequestStatus) -> Badge {
    let tone = match status {
        RequestStatus::Pending => BadgeTone::OutlinePrimary,
        RequestStatus::InProgress => BadgeTone::Secondary,
        RequestStatus::Resolved => BadgeTone::Success,
    };
    Badge {
        label: status.label().to_string(),
        tone,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    requests: Vec<IncidentRequest>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Roster {
    pub fn seeded() -> Self {
        Self {
            requests: seed_requests(),
        }
    }

    pub fn requests(&self) -> &[IncidentRequest] {
        &self.requests
    }

    pub fn get(&self, id: &str) -> Option<&IncidentRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn available_actions(request: &IncidentRequest) -> Vec<RosterAction> {
        let mut actions = Vec::new();
        if request.can_assign() {
            actions.push(RosterAction::Assign);
        }
        if request.can_resolve() {
            actions.push(RosterAction::Resolve);
        }
        actions
    }

    pub fn assign(&self, id: &str) -> Result<Notification, RosterError> {
        self.check(id, RosterAction::Assign)?;
        Ok(Notification::new(
            "👤 Request Assigned",
            format!("Request {id} has been assigned to your team."),
        ))
    }

    pub fn resolve(&self, id: &str) -> Result<Notification, RosterError> {
        self.check(id, RosterAction::Resolve)?;
        Ok(Notification::new(
            "✅ Request Resolved",
            format!("Request {id} has been marked as resolved."),
        ))
    }

    fn check(&self, id: &str, action: RosterAction) -> Result<(), RosterError> {
        let request = self
            .get(id)
            .ok_or_else(|| RosterError::UnknownRequest(id.to_string()))?;
        if Self::available_actions(request).contains(&action) {
            Ok(())
        } else {
            Err(RosterError::ActionUnavailable {
                id: id.to_string(),
                action,
                status: request.status,
            })
        }
    }

    pub fn update(&mut self, msg: RosterMessage) -> Vec<Command> {
        let (id, result) = match msg {
            RosterMessage::Assign(id) => {
                let r = self.assign(&id);
                (id, r)
            }
            RosterMessage::Resolve(id) => {
                let r = self.resolve(&id);
                (id, r)
            }
        };
        match result {
            Ok(notification) => {
                tracing::info!(%id, title = %notification.title, "roster action acknowledged");
                vec![Command::Notify(notification)]
            }
            Err(err) => {
                tracing::warn!(%id, %err, "roster action rejected");
                Vec::new()
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn request(
    id: &str,
    request_type: RequestType,
    urgency: Urgency,
    location: &str,
    contact: (&str, &str),
    people_affected: u32,
    description: &str,
    status: RequestStatus,
    timestamp: &str,
) -> IncidentRequest {
    IncidentRequest {
        id: id.into(),
        request_type,
        urgency,
        location: location.into(),
        contact: Contact {
            name: contact.0.into(),
            phone: contact.1.into(),
        },
        people_affected,
        description: description.into(),
        status,
        timestamp: timestamp.into(),
    }
}

fn seed_requests() -> Vec<IncidentRequest> {
    vec![
        request(
            "DR-2024-001",
            RequestType::Medical,
            Urgency::Critical,
            "123 Main St, Downtown",
            ("Sarah Johnson", "+1 (555) 123-4567"),
            3,
            "Injured people trapped in collapsed building",
            RequestStatus::Pending,
            "10 minutes ago",
        ),
        request(
            "DR-2024-002",
            RequestType::Food,
            Urgency::High,
            "Community Center, Oak Avenue",
            ("Mike Chen", "+1 (555) 234-5678"),
            25,
            "Families need emergency food supplies",
            RequestStatus::InProgress,
            "25 minutes ago",
        ),
        request(
            "DR-2024-003",
            RequestType::Shelter,
            Urgency::Medium,
            "Pine Street Bridge",
            ("Emergency Coordinator", "+1 (555) 345-6789"),
            12,
            "Temporary shelter needed for displaced families",
            RequestStatus::Resolved,
            "2 hours ago",
        ),
        request(
            "DR-2024-004",
            RequestType::Rescue,
            Urgency::Critical,
            "River Road, Mile Marker 15",
            ("Local Fire Dept", "+1 (555) 456-7890"),
            8,
            "Vehicle accident, people trapped",
            RequestStatus::Pending,
            "5 minutes ago",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_four_requests_in_order() {
        let roster = Roster::seeded();
        let ids: Vec<_> = roster.requests().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["DR-2024-001", "DR-2024-002", "DR-2024-003", "DR-2024-004"]
        );
        assert_eq!(roster.get("DR-2024-002").map(|r| r.people_affected), Some(25));
    }

    #[test]
    fn roster_action_names_match_wire_form() {
        assert_eq!(RosterAction::Assign.to_string(), "assign");
        let json = serde_json::to_string(&RosterAction::Resolve).expect("serialize");
        assert_eq!(json, "\"resolve\"");
    }

    #[test]
    fn badges_follow_enumeration_values() {
        assert_eq!(
            urgency_badge(Urgency::Critical),
            Badge {
                label: "🔴 Critical".into(),
                tone: BadgeTone::Destructive
            }
        );
        assert_eq!(urgency_badge(Urgency::Low).tone, BadgeTone::Outline);
        assert_eq!(status_badge(RequestStatus::InProgress).label, "In Progress");
        assert_eq!(status_badge(RequestStatus::Resolved).tone, BadgeTone::Success);
    }

    #[test]
    fn actions_depend_on_status() {
        let roster = Roster::seeded();
        let actions = |id: &str| Roster::available_actions(roster.get(id).expect("seeded"));
        assert_eq!(
            actions("DR-2024-001"),
            vec![RosterAction::Assign, RosterAction::Resolve]
        );
        assert_eq!(actions("DR-2024-002"), vec![RosterAction::Resolve]);
        assert!(actions("DR-2024-003").is_empty());
    }

    #[test]
    fn assign_and_resolve_leave_status_untouched() {
        let mut roster = Roster::seeded();
        let before = roster.clone();

        let assigned = roster.update(RosterMessage::Assign("DR-2024-001".into()));
        let resolved = roster.update(RosterMessage::Resolve("DR-2024-004".into()));

        assert_eq!(assigned.len(), 1);
        assert_eq!(resolved.len(), 1);
        assert_eq!(roster, before);
    }

    #[test]
    fn resolve_notification_names_request() {
        let n = Roster::seeded().resolve("DR-2024-002").expect("resolve");
        assert_eq!(n.title, "✅ Request Resolved");
        assert_eq!(n.description, "Request DR-2024-002 has been marked as resolved.");
    }

    #[test]
    fn unavailable_or_unknown_actions_are_rejected() {
        let mut roster = Roster::seeded();
        assert!(matches!(
            roster.assign("DR-2024-002"),
            Err(RosterError::ActionUnavailable { action: RosterAction::Assign, .. })
        ));
        assert_eq!(
            roster.resolve("DR-9999"),
            Err(RosterError::UnknownRequest("DR-9999".into()))
        );
        assert!(roster
            .update(RosterMessage::Resolve("DR-2024-003".into()))
            .is_empty());
    }
}
