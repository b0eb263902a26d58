//! Serializable snapshots of each dashboard panel.

use crate::dashboard::{DashboardModel, Tab};
use crate::error::RequiredField;
use crate::intake::{ButtonTone, IntakeForm};
use crate::map::MapView;
use crate::notify::{Severity, Toast};
use crate::request::{IncidentRequest, RequestType};
use crate::roster::{status_badge, urgency_badge, Badge, Roster, RosterAction};
use crate::sos::{SosState, SosTrigger};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardDto {
    pub tab: Tab,
    pub sos: SosDto,
    pub intake: IntakeDto,
    pub roster: Vec<RosterRowDto>,
    pub map: MapView,
    pub toasts: Vec<ToastDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SosDto {
    pub state: SosState,
    pub enabled: bool,
    pub reset_after_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeOptionDto {
    pub value: RequestType,
    pub label: String,
    pub icon: String,
    pub tone: ButtonTone,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntakeDto {
    pub types: Vec<TypeOptionDto>,
    pub urgency: Option<String>,
    pub location: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub people_affected: String,
    pub description: String,
    pub can_submit: bool,
    pub missing: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RosterRowDto {
    pub id: String,
    pub type_label: String,
    pub type_icon: String,
    pub urgency: Badge,
    pub location: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub people_affected: u32,
    pub status: Badge,
    pub timestamp: String,
    pub actions: Vec<RosterAction>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToastDto {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

pub fn dashboard(model: &DashboardModel, toasts: &[Toast]) -> DashboardDto {
    DashboardDto {
        tab: model.tab,
        sos: sos(&model.sos),
        intake: intake(&model.intake),
        roster: roster(&model.roster),
        map: model.map.view(),
        toasts: toasts.iter().map(toast).collect(),
    }
}

pub fn sos(trigger: &SosTrigger) -> SosDto {
    SosDto {
        state: trigger.state(),
        enabled: trigger.is_enabled(),
        reset_after_ms: u64::try_from(trigger.reset_after().as_millis()).unwrap_or(u64::MAX),
    }
}

pub fn intake(form: &IntakeForm) -> IntakeDto {
    IntakeDto {
        types: RequestType::ALL
            .iter()
            .map(|t| TypeOptionDto {
                value: *t,
                label: t.label().to_string(),
                icon: t.icon().to_string(),
                tone: form.button_tone(*t),
            })
            .collect(),
        urgency: form.urgency.map(|u| u.to_string()),
        location: form.location.clone(),
        contact_name: form.contact_name.clone(),
        contact_phone: form.contact_phone.clone(),
        people_affected: form.people_affected.clone(),
        description: form.description.clone(),
        can_submit: form.can_submit(),
        missing: form
            .missing_fields()
            .iter()
            .map(RequiredField::to_string)
            .collect(),
    }
}

pub fn roster(roster: &Roster) -> Vec<RosterRowDto> {
    roster.requests().iter().map(row).collect()
}

fn row(r: &IncidentRequest) -> RosterRowDto {
    RosterRowDto {
        id: r.id.clone(),
        type_label: r.request_type.label().to_string(),
        type_icon: r.request_type.icon().to_string(),
        urgency: urgency_badge(r.urgency),
        location: r.location.clone(),
        contact_name: r.contact.name.clone(),
        contact_phone: r.contact.phone.clone(),
        people_affected: r.people_affected,
        status: status_badge(r.status),
        timestamp: r.timestamp.clone(),
        actions: Roster::available_actions(r),
    }
}

fn toast(t: &Toast) -> ToastDto {
    ToastDto {
        id: t.id.0,
        title: t.notification.title.clone(),
        description: t.notification.description.clone(),
        severity: t.notification.severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::BadgeTone;

    #[test]
    fn roster_rows_carry_badges_and_actions() {
        let rows = roster(&Roster::seeded());
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].type_icon, "🏥");
        assert_eq!(rows[0].urgency.tone, BadgeTone::Destructive);
        assert_eq!(rows[1].status.label, "In Progress");
        assert_eq!(rows[1].actions, vec![RosterAction::Resolve]);
        assert!(rows[2].actions.is_empty());
    }

    #[test]
    fn snapshot_serializes_map_view_tag() {
        let dto = dashboard(&DashboardModel::default(), &[]);
        let value = serde_json::to_value(&dto).expect("serialize");
        assert_eq!(value["tab"], "report");
        assert_eq!(value["map"]["view"], "prompt");
        assert_eq!(value["sos"]["enabled"], true);
        assert_eq!(value["intake"]["can_submit"], false);
        assert_eq!(value["intake"]["missing"].as_array().map(Vec::len), Some(3));
    }
}
