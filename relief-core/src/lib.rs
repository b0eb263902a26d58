//! Headless core of the disaster relief dashboard.
//!
//! The page is a single [`DashboardModel`] changed only through
//! [`dashboard::update`]. Notifications and delayed messages leave the core as
//! [`Command`]s and are carried out by a [`Runtime`] against injected
//! [`Notifier`] and [`Timer`] implementations.

pub mod clock;
pub mod config;
pub mod dashboard;
pub mod dto;
pub mod error;
pub mod intake;
pub mod map;
pub mod notify;
pub mod request;
pub mod roster;
pub mod runtime;
pub mod sos;

pub use clock::{Clock, ManualClock, ManualTimer, SystemClock, Timer, TimerId};
pub use config::DashboardConfig;
pub use dashboard::{update, Command, DashboardModel, Message, Tab};
pub use error::{ReliefError, Result};
pub use notify::{Notification, Notifier, Severity, Toast, ToastTray};
pub use runtime::Runtime;
