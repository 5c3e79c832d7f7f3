//! Overlay coordinator.
//!
//! At most one full-screen sub-view or dialog is active. Opening a new one
//! replaces whatever was showing (last writer wins, no stack); closing hands
//! control back to whichever tab is selected at that moment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Static dialogs reachable from the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    PrivacyPolicy,
    HelpSupport,
    Logout,
}

impl PlaceholderKind {
    pub const ALL: [PlaceholderKind; 3] = [
        PlaceholderKind::PrivacyPolicy,
        PlaceholderKind::HelpSupport,
        PlaceholderKind::Logout,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PlaceholderKind::PrivacyPolicy => "Privacy Policy",
            PlaceholderKind::HelpSupport => "Help & Support",
            PlaceholderKind::Logout => "Logout",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceholderKind::PrivacyPolicy => {
                "Your data is anonymized and used only for campus wellness research. We never sell your data."
            }
            PlaceholderKind::HelpSupport => "Please contact zenith-support@campus.edu for any issues.",
            PlaceholderKind::Logout => "Are you sure you want to log out?",
        }
    }
}

/// What an overlay shows. Event details carry only the id; the event is
/// looked up in the content store each render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    Breathing,
    WindDown,
    EventDetails { event_id: String },
    Placeholder { placeholder: PlaceholderKind },
}

/// Payload-free discriminant of [`Overlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Breathing,
    WindDown,
    EventDetails,
    Placeholder,
}

impl Overlay {
    pub fn kind(&self) -> OverlayKind {
        match self {
            Overlay::Breathing => OverlayKind::Breathing,
            Overlay::WindDown => OverlayKind::WindDown,
            Overlay::EventDetails { .. } => OverlayKind::EventDetails,
            Overlay::Placeholder { .. } => OverlayKind::Placeholder,
        }
    }

    pub fn event_details(event_id: impl Into<String>) -> Self {
        Overlay::EventDetails {
            event_id: event_id.into(),
        }
    }

    pub fn placeholder(placeholder: PlaceholderKind) -> Self {
        Overlay::Placeholder { placeholder }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ActiveOverlay {
    overlay: Overlay,
    opened_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OverlayCoordinator {
    active: Option<ActiveOverlay>,
}

impl OverlayCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `overlay`, replacing any active one. Returns the replaced overlay.
    pub fn open(&mut self, overlay: Overlay, now: DateTime<Utc>) -> Option<Overlay> {
        debug!(?overlay, "overlay opened");
        self.active
            .replace(ActiveOverlay {
                overlay,
                opened_at: now,
            })
            .map(|prev| prev.overlay)
    }

    /// Dismiss the active overlay, if any.
    pub fn close(&mut self) -> Option<Overlay> {
        self.active.take().map(|prev| prev.overlay)
    }

    pub fn current(&self) -> Option<&Overlay> {
        self.active.as_ref().map(|a| &a.overlay)
    }

    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.current().is_some_and(|o| o.kind() == kind)
    }

    /// When the active overlay was opened.
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        self.active.as_ref().map(|a| a.opened_at)
    }
}
