//! Shared contract types between the desktop window manager runtime and hosted panels.
//!
//! A panel receives an [`AppMountContext`] when the runtime mounts it into its window. The context
//! carries the panel's [`AppHost`] (commands back to the runtime) and the shared analytics backend.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{cell::Cell, rc::Rc};

use leptos::{on_cleanup, Callable, Callback, View};
use market_api::MarketDataService;
use serde::{Deserialize, Serialize};

/// Stable identifier for a registered panel and the one window that hosts it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` conforms to the `segment.segment...` policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected namespaced dotted segments"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 120 {
        return false;
    }

    let mut count = 0usize;
    for part in raw.split('.') {
        count += 1;
        if part.is_empty() || part.len() > 32 {
            return false;
        }
        let bytes = part.as_bytes();
        if !bytes[0].is_ascii_lowercase() {
            return false;
        }
        if !bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        {
            return false;
        }
        if part.ends_with('-') {
            return false;
        }
    }

    count >= 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Closed set of audio feedback cues.
pub enum SoundCue {
    /// A window opened.
    Open,
    /// A window closed.
    Close,
    /// A window went to the dock.
    Minimize,
    /// A window filled the desktop.
    Maximize,
    /// A window came back from the dock or from maximized.
    Restore,
    /// A remote call failed.
    Error,
    /// A menu item or panel button was activated.
    Click,
    /// Informational ping.
    Notification,
}

impl SoundCue {
    /// Every cue, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Open,
        Self::Close,
        Self::Minimize,
        Self::Maximize,
        Self::Restore,
        Self::Error,
        Self::Click,
        Self::Notification,
    ];

    /// Returns a stable string token for logging.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Restore => "restore",
            Self::Error => "error",
            Self::Click => "click",
            Self::Notification => "notification",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Commands a mounted panel sends to the desktop runtime.
pub enum AppCommand {
    /// Play a feedback cue through the shared dispatcher.
    PlayCue {
        /// Cue to play.
        cue: SoundCue,
    },
    /// Replace the hosting window's title.
    SetWindowTitle {
        /// New title text.
        title: String,
    },
}

#[derive(Clone, Copy)]
/// Window-scoped handle a panel uses to talk back to the runtime.
pub struct AppHost {
    sender: Callback<AppCommand>,
}

impl AppHost {
    /// Creates a host handle from the runtime command callback.
    pub fn new(sender: Callback<AppCommand>) -> Self {
        Self { sender }
    }

    /// Plays `cue` (best effort).
    pub fn play_cue(&self, cue: SoundCue) {
        self.sender.call(AppCommand::PlayCue { cue });
    }

    /// Requests a title change for the hosting window.
    pub fn set_window_title(&self, title: impl Into<String>) {
        self.sender.call(AppCommand::SetWindowTitle {
            title: title.into(),
        });
    }
}

#[derive(Debug, Clone)]
/// Liveness flag for a mounted panel.
///
/// Async completions check [`MountGuard::is_mounted`] before writing panel signals and drop
/// their result otherwise.
pub struct MountGuard {
    alive: Rc<Cell<bool>>,
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl MountGuard {
    /// Creates a guard in the mounted state, not tied to any reactive scope.
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    /// Creates a guard that flips to unmounted when the current reactive owner is cleaned up.
    pub fn install() -> Self {
        let guard = Self::new();
        let alive = guard.alive.clone();
        on_cleanup(move || alive.set(false));
        guard
    }

    /// Whether the owning panel is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.alive.get()
    }

    /// Marks the owning panel as unmounted.
    pub fn unmount(&self) {
        self.alive.set(false);
    }
}

#[derive(Clone)]
/// App mount context injected by the desktop runtime per window.
pub struct AppMountContext {
    /// Id of the hosting window (one window per registered panel).
    pub window_id: ApplicationId,
    /// Command handle back to the runtime.
    pub host: AppHost,
    /// Shared analytics backend.
    pub market: Rc<dyn MarketDataService>,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mounted app module descriptor used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn application_id_requires_dotted_namespaces() {
        assert!(ApplicationId::new("pqdca.dca-strategy").is_ok());
        assert!(ApplicationId::new("system.about").is_ok());
        assert!(ApplicationId::new("chart").is_err());
        assert!(ApplicationId::new("Pqdca.chart").is_err());
        assert!(ApplicationId::new("pqdca..chart").is_err());
        assert!(ApplicationId::new("pqdca.chart-").is_err());
    }

    #[test]
    fn host_forwards_commands_to_runtime_callback() {
        let _ = leptos::create_runtime();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        let host = AppHost::new(Callback::new(move |command| sink.borrow_mut().push(command)));

        host.play_cue(SoundCue::Error);
        host.set_window_title("Market Chart - BTC");

        assert_eq!(
            *received.borrow(),
            vec![
                AppCommand::PlayCue {
                    cue: SoundCue::Error
                },
                AppCommand::SetWindowTitle {
                    title: "Market Chart - BTC".to_string()
                },
            ]
        );
    }

    #[test]
    fn mount_guard_clones_share_liveness() {
        let guard = MountGuard::new();
        let pending = guard.clone();
        assert!(pending.is_mounted());
        guard.unmount();
        assert!(!pending.is_mounted());
    }

    #[test]
    fn cue_tokens_match_serde_names() {
        for cue in SoundCue::ALL {
            let encoded = serde_json::to_string(&cue).unwrap();
            assert_eq!(encoded, format!("\"{}\"", cue.token()));
        }
    }
}
