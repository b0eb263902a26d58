use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Medical,
    Food,
    Shelter,
    Rescue,
}

impl RequestType {
    pub const ALL: [RequestType; 4] = [Self::Medical, Self::Food, Self::Shelter, Self::Rescue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Medical => "medical",
            Self::Food => "food",
            Self::Shelter => "shelter",
            Self::Rescue => "rescue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Medical => "Medical",
            Self::Food => "Food",
            Self::Shelter => "Shelter",
            Self::Rescue => "Rescue",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Medical => "🏥",
            Self::Food => "🍎",
            Self::Shelter => "🏠",
            Self::Rescue => "🚁",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "medical" => Ok(Self::Medical),
            "food" => Ok(Self::Food),
            "shelter" => Ok(Self::Shelter),
            "rescue" => Ok(Self::Rescue),
            _ => Err(ParseError::unknown("request type", s)),
        }
    }
}

/// Triage ranking. Ordered most to least severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::Critical => "🔴",
            Self::High => "🟠",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }

    /// Hint shown next to the level in the report form.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Critical => "Life threatening",
            Self::High => "Urgent attention needed",
            Self::Medium => "Important but not urgent",
            Self::Low => "Can wait for resources",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseError::unknown("urgency", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Resolved,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            _ => Err(ParseError::unknown("request status", s)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

/// A reported emergency need as listed on the response dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncidentRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub urgency: Urgency,
    pub location: String,
    pub contact: Contact,
    pub people_affected: u32,
    pub description: String,
    pub status: RequestStatus,
    pub timestamp: String,
}

impl IncidentRequest {
    pub fn can_assign(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn can_resolve(&self) -> bool {
        self.status != RequestStatus::Resolved
    }
}

/// What a successful form submission produces. Never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub id: String,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub urgency: Option<Urgency>,
    pub location: String,
    pub contact: Contact,
    pub people_affected: u32,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&RequestStatus::InProgress).expect("serialize");
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(
            "in-progress".parse::<RequestStatus>(),
            Ok(RequestStatus::InProgress)
        );
    }

    #[test]
    fn type_parsing_ignores_case() {
        assert_eq!("Medical".parse::<RequestType>(), Ok(RequestType::Medical));
        assert!("flood".parse::<RequestType>().is_err());
    }

    #[test]
    fn urgency_orders_critical_first() {
        let mut levels = vec![Urgency::Low, Urgency::Critical, Urgency::Medium, Urgency::High];
        levels.sort();
        assert_eq!(levels, Urgency::ALL.to_vec());
    }

    #[test]
    fn request_serializes_type_field_name() {
        let request = IncidentRequest {
            id: "x".into(),
            request_type: RequestType::Food,
            urgency: Urgency::Low,
            location: "here".into(),
            contact: Contact::default(),
            people_affected: 0,
            description: "d".into(),
            status: RequestStatus::Pending,
            timestamp: "now".into(),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value.get("type").and_then(serde_json::Value::as_str), Some("food"));
        assert!(request.can_assign());
        assert!(request.can_resolve());
    }
}
