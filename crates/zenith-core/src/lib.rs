//! # Zenith Core Library
//!
//! This library provides the core logic for Zenith, a campus wellness
//! companion: a focus timer, a read-only wellness content catalog with an
//! RSVP roster and a goal list, and the router that turns state into a
//! complete view model. The `zenith` binary is a thin terminal layer over the
//! same library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A wall-clock-based state machine. The caller passes
//!   `now` to every query and periodically calls `poll()` to commit completions
//! - **Overlays**: At most one full-screen sub-view or dialog, last writer wins
//! - **Content**: Seeded events and resources plus the in-memory roster
//! - **Router**: A pure `render()` from session state to [`View`]
//!
//! ## Key Components
//!
//! - [`Session`]: Owns all mutable state and applies [`Action`]s
//! - [`TimerEngine`]: Core timer state machine
//! - [`ContentStore`]: Catalog lookups, schedule and goals
//! - [`Config`]: Application configuration

pub mod breathing;
pub mod checkin;
pub mod clock;
pub mod coach;
pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod nav;
pub mod overlay;
pub mod router;
pub mod session;
pub mod settings;
pub mod sleep;
pub mod timer;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use content::{Catalog, ContentStore, Event, Resource};
pub use error::{ConfigError, ContentError, CoreError, TimerError, ValidationError};
pub use events::TimerEvent;
pub use nav::Tab;
pub use overlay::{Overlay, OverlayCoordinator, OverlayKind, PlaceholderKind};
pub use session::{Action, Notice, NoticeLevel, Session};
pub use settings::{ProfileSettings, SettingKey};
pub use timer::{Phase, TimerEngine, TimerLimits, TimerSnapshot};
pub use view::View;
