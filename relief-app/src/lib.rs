pub mod commands;
pub mod runtime;
pub mod state;

use crate::state::AppState;
use relief_core::dto::{self, DashboardDto};
use relief_core::intake::IntakeMessage;
use relief_core::map::MapMessage;
use relief_core::request::{RequestType, Urgency};
use relief_core::roster::RosterMessage;
use relief_core::sos::SosMessage;
use relief_core::{Message, Tab};
use serde::Serialize;
use std::time::Duration;

#[derive(Clone, Debug, Serialize)]
pub struct DemoStep {
    pub label: String,
    pub snapshot: DashboardDto,
}

struct Scene {
    label: &'static str,
    messages: Vec<Message>,
    then_wait: Duration,
}

fn demo_script() -> Vec<Scene> {
    vec![
        Scene {
            label: "fill in a rescue report",
            messages: vec![
                IntakeMessage::SelectType(RequestType::Rescue).into(),
                IntakeMessage::SelectUrgency(Urgency::Critical).into(),
                IntakeMessage::LocationChanged("Harbor Road underpass".into()).into(),
                IntakeMessage::ContactNameChanged("Dana Ruiz".into()).into(),
                IntakeMessage::ContactPhoneChanged("+1 (555) 987-6543".into()).into(),
                IntakeMessage::PeopleAffectedChanged("6".into()).into(),
                IntakeMessage::DescriptionChanged("Flooded underpass, car stranded".into()).into(),
            ],
            then_wait: Duration::ZERO,
        },
        Scene {
            label: "submit the report",
            messages: vec![IntakeMessage::Submit.into()],
            then_wait: Duration::ZERO,
        },
        Scene {
            label: "press SOS",
            messages: vec![SosMessage::Press.into()],
            then_wait: Duration::from_secs(1),
        },
        Scene {
            label: "review and act on the roster",
            messages: vec![
                Message::SelectTab(Tab::Dashboard),
                RosterMessage::Assign("DR-2024-001".into()).into(),
                RosterMessage::Resolve("DR-2024-004".into()).into(),
            ],
            then_wait: Duration::from_secs(2),
        },
        Scene {
            label: "initialize the map",
            messages: vec![
                Message::SelectTab(Tab::Map),
                MapMessage::TokenChanged("pk.demo-token".into()).into(),
                MapMessage::Initialize.into(),
            ],
            then_wait: Duration::from_secs(5),
        },
    ]
}

/// Plays a fixed walkthrough on a manual clock and snapshots after each scene.
pub fn run_demo(state: &AppState) -> Vec<DemoStep> {
    let mut rt = state.scripted_runtime();
    let mut steps = Vec::new();

    for scene in demo_script() {
        tracing::info!(scene = scene.label, "demo scene");
        for message in scene.messages {
            rt.dispatch(message);
        }
        steps.push(DemoStep {
            label: scene.label.to_string(),
            snapshot: dto::dashboard(rt.model(), &rt.notifier().visible()),
        });
        if !scene.then_wait.is_zero() {
            rt.advance(scene.then_wait);
        }
    }

    steps.push(DemoStep {
        label: "settled".to_string(),
        snapshot: dto::dashboard(rt.model(), &rt.notifier().visible()),
    });
    rt.shutdown();
    steps
}

pub fn run_snapshot(state: &AppState, tab: Tab) -> DashboardDto {
    let mut rt = state.scripted_runtime();
    rt.dispatch(Message::SelectTab(tab));
    dto::dashboard(rt.model(), &rt.notifier().visible())
}
