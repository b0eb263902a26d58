use crate::request::RequestStatus;
use crate::roster::RosterAction;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for the dashboard core.
#[derive(Debug, Error)]
pub enum ReliefError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ReliefError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

impl ParseError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}

/// Form fields that must be filled before a report can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Type,
    Location,
    Description,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => f.write_str("type"),
            Self::Location => f.write_str("location"),
            Self::Description => f.write_str("description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("no request with id '{0}'")]
    UnknownRequest(String),

    #[error("cannot {action} request {id} while it is {status}")]
    ActionUnavailable {
        id: String,
        action: RosterAction,
        status: RequestStatus,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
