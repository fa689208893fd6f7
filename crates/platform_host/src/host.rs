//! Shared host-bundle model for runtime composition.

use std::rc::Rc;

use market_api::{MarketDataService, UnavailableMarketDataService};

use crate::audio::{AudioCueService, NoopAudioCueService};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// Composition with no-op adapters (tests, native builds).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host service bundle injected into the desktop runtime.
///
/// Environment-specific adapter selection happens before this bundle crosses into
/// `desktop_runtime`, keeping the runtime and panel crates free of browser details.
#[derive(Clone)]
pub struct HostServices {
    /// Audio cue playback.
    pub audio: Rc<dyn AudioCueService>,
    /// Analytics backend shared by all panels.
    pub market: Rc<dyn MarketDataService>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Bundle with silent audio and an analytics backend that rejects every call.
    pub fn headless() -> Self {
        Self {
            audio: Rc::new(NoopAudioCueService),
            market: Rc::new(UnavailableMarketDataService::new(
                "no analytics backend configured for this host",
            )),
            host_strategy: HostStrategy::Headless,
        }
    }
}
