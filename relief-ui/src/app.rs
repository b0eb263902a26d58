use crate::bridge::{self, BrowserClock};
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::*;
use relief_core::dto;
use relief_core::intake::{ButtonTone, IntakeMessage};
use relief_core::map::{MapMessage, MapView};
use relief_core::request::{RequestType, Urgency};
use relief_core::roster::{BadgeTone, RosterAction, RosterMessage};
use relief_core::sos::SosMessage;
use relief_core::{
    Command, DashboardConfig, DashboardModel, Message, Notifier, Severity, Tab, Toast, ToastTray,
};
use std::time::Duration;

#[derive(Clone, Copy)]
struct Ui {
    model: RwSignal<DashboardModel>,
    toasts: RwSignal<Vec<Toast>>,
    tray: StoredValue<ToastTray<BrowserClock>>,
    toast_timer: StoredValue<Option<TimeoutHandle>>,
}

fn dispatch(ui: Ui, message: Message) {
    let mut commands = Vec::new();
    ui.model
        .update(|model| commands = relief_core::update(model, message));

    for command in commands {
        match command {
            Command::Notify(notification) => {
                ui.tray.with_value(|tray| tray.notify(notification));
                refresh_toasts(ui);
            }
            Command::Schedule { after, message } => {
                set_timeout(move || dispatch(ui, message), after);
            }
        }
    }
}

/// Publishes the visible toasts and re-arms a single timer for the next expiry.
fn refresh_toasts(ui: Ui) {
    ui.toasts.set(ui.tray.with_value(|tray| tray.visible()));

    if let Some(handle) = ui.toast_timer.get_value() {
        handle.clear();
    }
    // Date.now() can trail the timer by a tick; overshoot so the toast is gone.
    let next = ui
        .tray
        .with_value(|tray| tray.next_expiry())
        .map(|wait| wait + Duration::from_millis(1));
    let handle =
        next.and_then(|wait| set_timeout_with_handle(move || refresh_toasts(ui), wait).ok());
    ui.toast_timer.set_value(handle);
}

fn button_class(tone: ButtonTone) -> &'static str {
    match tone {
        ButtonTone::Outline => "type-btn outline",
        ButtonTone::Medical => "type-btn medical",
        ButtonTone::Warning => "type-btn warning",
        ButtonTone::Secondary => "type-btn secondary",
        ButtonTone::Emergency => "type-btn emergency",
    }
}

fn badge_class(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Destructive => "badge destructive",
        BadgeTone::Warning => "badge warning",
        BadgeTone::Secondary => "badge secondary",
        BadgeTone::Outline => "badge outline",
        BadgeTone::OutlinePrimary => "badge outline primary",
        BadgeTone::Success => "badge success",
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::default();
    let ui = Ui {
        model: create_rw_signal(DashboardModel::new(&config)),
        toasts: create_rw_signal(Vec::<Toast>::new()),
        tray: store_value(ToastTray::new(
            BrowserClock::new(),
            config.toast.limit,
            config.toast_ttl(),
        )),
        toast_timer: store_value(None),
    };
    let model = ui.model;
    let tab = create_memo(move |_| model.with(|m| m.tab));

    view! {
      <div class="page">
        <header class="header">
          <h1>"Disaster Relief Network"</h1>
          <p class="meta">"Emergency Response & Coordination Platform"</p>
        </header>

        <section class="panel sos-panel">
          <h2>"Emergency Response"</h2>
          <p class="meta">"Immediate assistance available 24/7"</p>
          <button
            class=move || if model.with(|m| m.sos.is_enabled()) { "sos" } else { "sos pressed" }
            disabled=move || !model.with(|m| m.sos.is_enabled())
            on:click=move |_| dispatch(ui, SosMessage::Press.into())
          >"SOS"</button>
          <p class="meta">"Press to send immediate SOS signal with your location to emergency responders"</p>
          <button type="button" class="outline small">"📞 Call 911"</button>
        </section>

        <nav class="tabs">
          {Tab::ALL
            .into_iter()
            .map(|tab| view! {
              <button
                class=move || if model.with(|m| m.tab == tab) { "tab active" } else { "tab" }
                on:click=move |_| dispatch(ui, Message::SelectTab(tab))
              >{tab.label()}</button>
            })
            .collect_view()}
        </nav>

        {move || match tab.get() {
          Tab::Report => report_panel(ui),
          Tab::Dashboard => roster_panel(ui),
          Tab::Map => map_panel(ui),
        }}

        <div class="toasts">
          <For
            each=move || ui.toasts.get()
            key=|t| t.id.0
            children=move |t| {
              let id = t.id;
              let class = match t.notification.severity {
                Severity::Destructive => "toast destructive",
                Severity::Default => "toast",
              };
              view! {
                <div class=class>
                  <b>{t.notification.title.clone()}</b>
                  <div>{t.notification.description.clone()}</div>
                  <button on:click=move |_| {
                    ui.tray.with_value(|tray| tray.dismiss(id));
                    refresh_toasts(ui);
                  }>"×"</button>
                </div>
              }
            }
          />
        </div>

        <footer class="footer meta">
          "Emergency Hotline: 911 • Crisis Text Line: Text HOME to 741741"
        </footer>
      </div>
    }
}

fn report_panel(ui: Ui) -> View {
    let model = ui.model;
    let text_input = move |read: fn(&DashboardModel) -> String,
                           write: fn(String) -> IntakeMessage,
                           placeholder: &'static str| {
        view! {
          <input
            prop:value=move || model.with(read)
            on:input=move |ev| dispatch(ui, write(event_target_value(&ev)).into())
            placeholder=placeholder
          />
        }
    };

    view! {
      <section class="panel">
        <h2>"Report an Incident"</h2>
        <form
          class="stack"
          on:submit=move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            dispatch(ui, IntakeMessage::Submit.into());
          }
        >
          <div class="type-grid">
            {RequestType::ALL
              .into_iter()
              .map(|t| view! {
                <button
                  type="button"
                  class=move || button_class(model.with(|m| m.intake.button_tone(t)))
                  on:click=move |_| dispatch(ui, IntakeMessage::SelectType(t).into())
                >
                  <span class="icon">{t.icon()}</span>
                  <span>{t.label()}</span>
                </button>
              })
              .collect_view()}
          </div>

          <label>"Urgency Level"</label>
          <select
            prop:value=move || model.with(|m| m.intake.urgency.map(|u| u.as_str()).unwrap_or("").to_string())
            on:change=move |ev| {
              if let Ok(urgency) = event_target_value(&ev).parse::<Urgency>() {
                dispatch(ui, IntakeMessage::SelectUrgency(urgency).into());
              }
            }
          >
            <option value="" disabled=true>"Select urgency level"</option>
            {Urgency::ALL
              .into_iter()
              .map(|u| view! {
                <option value=u.as_str()>
                  {format!("{} {} - {}", u.marker(), u.label(), u.guidance())}
                </option>
              })
              .collect_view()}
          </select>

          <label>"Location"</label>
          {text_input(|m| m.intake.location.clone(), IntakeMessage::LocationChanged, "Street address, landmarks, or coordinates")}

          <div class="row">
            {text_input(|m| m.intake.contact_name.clone(), IntakeMessage::ContactNameChanged, "Your name")}
            {text_input(|m| m.intake.contact_phone.clone(), IntakeMessage::ContactPhoneChanged, "+1 (555) 123-4567")}
          </div>

          <label>"Number of People Affected"</label>
          {text_input(|m| m.intake.people_affected.clone(), IntakeMessage::PeopleAffectedChanged, "e.g., 5")}

          <label>"Description"</label>
          <textarea
            rows=4
            prop:value=move || model.with(|m| m.intake.description.clone())
            on:input=move |ev| dispatch(ui, IntakeMessage::DescriptionChanged(event_target_value(&ev)).into())
            placeholder="Provide details about the situation, resources needed, and any other relevant information..."
          ></textarea>

          <button type="submit" disabled=move || !model.with(|m| m.intake.can_submit())>
            "Submit Report"
          </button>
        </form>
      </section>
    }
    .into_view()
}

fn roster_panel(ui: Ui) -> View {
    let model = ui.model;

    view! {
      <section class="panel">
        <h2>"Active Requests"</h2>
        <table>
          <thead>
            <tr>
              <th>"Request"</th><th>"Type"</th><th>"Urgency"</th><th>"Location"</th>
              <th>"Contact"</th><th>"People"</th><th>"Status"</th><th>"Time"</th><th>"Actions"</th>
            </tr>
          </thead>
          <tbody>
            <For
              each=move || model.with(|m| dto::roster(&m.roster))
              key=|row| row.id.clone()
              children=move |row| {
                let assign = row.actions.contains(&RosterAction::Assign).then(|| {
                  let id = row.id.clone();
                  view! {
                    <button on:click=move |_| dispatch(ui, RosterMessage::Assign(id.clone()).into())>"Assign"</button>
                  }
                });
                let resolve = row.actions.contains(&RosterAction::Resolve).then(|| {
                  let id = row.id.clone();
                  view! {
                    <button class="success" on:click=move |_| dispatch(ui, RosterMessage::Resolve(id.clone()).into())>"✔"</button>
                  }
                });
                view! {
                  <tr>
                    <td><b>{row.id.clone()}</b></td>
                    <td>{format!("{} {}", row.type_icon, row.type_label)}</td>
                    <td><span class=badge_class(row.urgency.tone)>{row.urgency.label.clone()}</span></td>
                    <td>{row.location.clone()}</td>
                    <td>
                      <div>{row.contact_name.clone()}</div>
                      <div class="meta">{row.contact_phone.clone()}</div>
                    </td>
                    <td>{row.people_affected}</td>
                    <td><span class=badge_class(row.status.tone)>{row.status.label.clone()}</span></td>
                    <td class="meta">{row.timestamp.clone()}</td>
                    <td class="row">{assign}{resolve}</td>
                  </tr>
                }
              }
            />
          </tbody>
        </table>
        <p class="meta center">
          {format!("🔄 Real-time updates • Last updated: {}", bridge::local_time_string())}
        </p>
      </section>
    }
    .into_view()
}

fn map_panel(ui: Ui) -> View {
    let model = ui.model;
    let map_ready = create_memo(move |_| model.with(|m| m.map.is_initialized()));

    let prompt = move || {
        view! {
          <form
            class="stack"
            on:submit=move |ev: ev::SubmitEvent| {
              ev.prevent_default();
              dispatch(ui, MapMessage::Initialize.into());
            }
          >
            <p class="meta">"To display the interactive heatmap, please provide your Mapbox public token."</p>
            <input
              prop:value=move || model.with(|m| m.map.token().to_string())
              on:input=move |ev| dispatch(ui, MapMessage::TokenChanged(event_target_value(&ev)).into())
              placeholder="pk.eyJ1IjoieW91cnVzZXJuYW1lIiwi..."
            />
            <button type="submit">"Initialize Map"</button>
          </form>
        }
        .into_view()
    };

    let placeholder = move || {
        let MapView::Placeholder { stats, legend } = model.with_untracked(|m| m.map.view()) else {
            return ().into_view();
        };
        view! {
          <div class="stack">
            <div class="map-placeholder">"Interactive Map"</div>
            <ul class="legend">
              {legend.into_iter().map(|entry| view! { <li>{entry}</li> }).collect_view()}
            </ul>
            <div class="row stats">
              <div><b>{stats.active}</b>" Active Requests"</div>
              <div><b>{stats.critical}</b>" Critical Cases"</div>
              <div><b>{stats.resolved_today}</b>" Resolved Today"</div>
            </div>
          </div>
        }
        .into_view()
    };

    view! {
      <section class="panel">
        <h2>"Incident Heatmap"</h2>
        {move || if map_ready.get() { placeholder() } else { prompt() }}
      </section>
    }
    .into_view()
}
