use anyhow::Context;
use relief_core::{
    Clock, DashboardConfig, DashboardModel, ManualClock, ManualTimer, Message, Runtime, ToastTray,
};
use std::path::Path;

pub type ScriptedRuntime = Runtime<ToastTray<ManualClock>, ManualTimer<Message>>;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: DashboardConfig,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    /// A missing map token is then taken from the configured env variable.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            DashboardConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?
        } else {
            tracing::info!(path = %path.display(), "no config file; using defaults");
            DashboardConfig::default()
        };
        config.resolve_token_env(|name| std::env::var(name).ok());
        Ok(Self::new(config))
    }

    pub fn tray<C: Clock>(&self, clock: C) -> ToastTray<C> {
        ToastTray::new(clock, self.config.toast.limit, self.config.toast_ttl())
    }

    /// Runtime on a manual clock, for scripted sessions.
    pub fn scripted_runtime(&self) -> ScriptedRuntime {
        let clock = ManualClock::new();
        Runtime::new(
            DashboardModel::new(&self.config),
            self.tray(clock.clone()),
            ManualTimer::new(clock),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_core::map::MapView;

    #[test]
    fn load_without_file_uses_defaults() {
        let state = AppState::load(Path::new("/nonexistent/relief.toml")).expect("defaults");
        assert_eq!(state.config.sos, DashboardConfig::default().sos);
        assert_eq!(state.config.toast, DashboardConfig::default().toast);
    }

    #[test]
    fn configured_token_starts_map_initialized() {
        let mut config = DashboardConfig::default();
        config.map.token = Some("pk.preset".into());
        let rt = AppState::new(config).scripted_runtime();
        assert!(matches!(rt.model().map.view(), MapView::Placeholder { .. }));
    }
}
