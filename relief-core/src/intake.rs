//! Incident report form.

use crate::dashboard::{Command, Message};
use crate::error::{IntakeError, RequiredField};
use crate::notify::Notification;
use crate::request::{Contact, IncidentReport, RequestType, Urgency};
use serde::{Deserialize, Serialize};

/// Identifier handed back for every submitted report.
pub const SUBMITTED_REPORT_ID: &str = "DR-2024-001";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntakeMessage {
    SelectType(RequestType),
    SelectUrgency(Urgency),
    LocationChanged(String),
    ContactNameChanged(String),
    ContactPhoneChanged(String),
    PeopleAffectedChanged(String),
    DescriptionChanged(String),
    Submit,
}

impl From<IntakeMessage> for Message {
    fn from(msg: IntakeMessage) -> Self {
        Message::Intake(msg)
    }
}

/// Visual tone of a type selector button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonTone {
    Outline,
    Medical,
    Warning,
    Secondary,
    Emergency,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntakeForm {
    pub request_type: Option<RequestType>,
    pub urgency: Option<Urgency>,
    pub location: String,
    pub contact_name: String,
    pub contact_phone: String,
    /// Raw text of the people-affected input; always empty or a whole number.
    pub people_affected: String,
    pub description: String,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.request_type.is_none() {
            missing.push(RequiredField::Type);
        }
        if self.location.is_empty() {
            missing.push(RequiredField::Location);
        }
        if self.description.is_empty() {
            missing.push(RequiredField::Description);
        }
        missing
    }

    pub fn can_submit(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Tone for the selector button of `candidate`; only the chosen type is highlighted.
    pub fn button_tone(&self, candidate: RequestType) -> ButtonTone {
        if self.request_type != Some(candidate) {
            return ButtonTone::Outline;
        }
        match candidate {
            RequestType::Medical => ButtonTone::Medical,
            RequestType::Food => ButtonTone::Warning,
            RequestType::Shelter => ButtonTone::Secondary,
            RequestType::Rescue => ButtonTone::Emergency,
        }
    }

    /// Accepts the input like a numeric field would: empty or digits only.
    pub fn set_people_affected(&mut self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() || raw.parse::<u32>().is_ok() {
            self.people_affected = raw.to_string();
            true
        } else {
            false
        }
    }

    /// Builds the report and clears the form. Leaves the form untouched on error.
    pub fn submit(&mut self) -> Result<IncidentReport, IntakeError> {
        let missing = self.missing_fields();
        let Some(request_type) = self.request_type.filter(|_| missing.is_empty()) else {
            return Err(IntakeError::MissingFields(missing));
        };

        let form = std::mem::take(self);
        Ok(IncidentReport {
            id: SUBMITTED_REPORT_ID.to_string(),
            request_type,
            urgency: form.urgency,
            location: form.location,
            contact: Contact {
                name: form.contact_name,
                phone: form.contact_phone,
            },
            people_affected: form.people_affected.parse().unwrap_or(0),
            description: form.description,
        })
    }

    pub fn update(&mut self, msg: IntakeMessage) -> Vec<Command> {
        match msg {
            IntakeMessage::SelectType(t) => self.request_type = Some(t),
            IntakeMessage::SelectUrgency(u) => self.urgency = Some(u),
            IntakeMessage::LocationChanged(v) => self.location = v,
            IntakeMessage::ContactNameChanged(v) => self.contact_name = v,
            IntakeMessage::ContactPhoneChanged(v) => self.contact_phone = v,
            IntakeMessage::PeopleAffectedChanged(v) => {
                if !self.set_people_affected(&v) {
                    tracing::debug!(input = %v, "ignoring non-numeric people count");
                }
            }
            IntakeMessage::DescriptionChanged(v) => self.description = v,
            IntakeMessage::Submit => match self.submit() {
                Ok(report) => {
                    tracing::info!(
                        id = %report.id,
                        request_type = %report.request_type,
                        people = report.people_affected,
                        "incident report submitted"
                    );
                    return vec![Command::Notify(submitted_notification(&report.id))];
                }
                Err(err) => tracing::warn!(%err, "report submission rejected"),
            },
        }
        Vec::new()
    }
}

fn submitted_notification(id: &str) -> Notification {
    Notification::new(
        "✅ Report Submitted",
        format!("Your incident report has been received and assigned ID #{id}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> IntakeForm {
        IntakeForm {
            request_type: Some(RequestType::Rescue),
            urgency: Some(Urgency::High),
            location: "River Road".into(),
            contact_name: "Ana".into(),
            contact_phone: "+1 (555) 000-0000".into(),
            people_affected: "4".into(),
            description: "Car in water".into(),
        }
    }

    #[test]
    fn submit_requires_type_location_and_description() {
        let mut form = IntakeForm::new();
        assert_eq!(
            form.missing_fields(),
            vec![
                RequiredField::Type,
                RequiredField::Location,
                RequiredField::Description
            ]
        );
        assert!(!form.can_submit());

        form.request_type = Some(RequestType::Food);
        form.location = "x".into();
        assert!(!form.can_submit());
        form.description = "y".into();
        assert!(form.can_submit());
    }

    #[test]
    fn optional_fields_do_not_gate_submission() {
        let mut form = filled();
        form.urgency = None;
        form.contact_name.clear();
        form.contact_phone.clear();
        form.people_affected.clear();
        assert!(form.can_submit());
    }

    #[test]
    fn whitespace_counts_as_filled() {
        let mut form = filled();
        form.location = " ".into();
        assert!(form.can_submit());
    }

    #[test]
    fn submit_clears_form_and_returns_report() {
        let mut form = filled();
        let report = form.submit().expect("submit");
        assert_eq!(report.id, SUBMITTED_REPORT_ID);
        assert_eq!(report.request_type, RequestType::Rescue);
        assert_eq!(report.people_affected, 4);
        assert_eq!(report.contact.name, "Ana");
        assert_eq!(form, IntakeForm::default());
    }

    #[test]
    fn rejected_submit_keeps_fields() {
        let mut form = filled();
        form.description.clear();
        let before = form.clone();
        let err = form.submit().unwrap_err();
        assert_eq!(err, IntakeError::MissingFields(vec![RequiredField::Description]));
        assert_eq!(form, before);
    }

    #[test]
    fn people_affected_accepts_only_whole_numbers() {
        let mut form = IntakeForm::new();
        assert!(form.set_people_affected("12"));
        assert!(!form.set_people_affected("twelve"));
        assert!(!form.set_people_affected("-3"));
        assert_eq!(form.people_affected, "12");
        assert!(form.set_people_affected(""));
        assert_eq!(form.people_affected, "");
    }

    #[test]
    fn update_emits_one_notification_on_submit() {
        let mut form = filled();
        let commands = form.update(IntakeMessage::Submit);
        assert_eq!(commands.len(), 1);
        let Command::Notify(n) = &commands[0] else {
            panic!("expected notification, got {commands:?}");
        };
        assert_eq!(n.title, "✅ Report Submitted");
        assert!(n.description.ends_with("#DR-2024-001"));

        assert!(form.update(IntakeMessage::Submit).is_empty());
    }

    #[test]
    fn only_selected_type_is_highlighted() {
        let mut form = IntakeForm::new();
        assert_eq!(form.button_tone(RequestType::Food), ButtonTone::Outline);
        form.update(IntakeMessage::SelectType(RequestType::Food));
        assert_eq!(form.button_tone(RequestType::Food), ButtonTone::Warning);
        assert_eq!(form.button_tone(RequestType::Rescue), ButtonTone::Outline);
    }
}
