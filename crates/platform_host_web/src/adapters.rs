use std::rc::Rc;

use market_api::{MarketApiClient, MarketDataService, UnavailableMarketDataService};
use platform_host::{AudioCueService, HostServices, HostStrategy, NoopAudioCueService};

use crate::WebAudioCueService;

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete audio backend behind [`AudioCueService`].
#[derive(Debug)]
pub enum AudioCueServiceAdapter {
    /// `HTMLAudioElement`-backed playback.
    Browser(WebAudioCueService),
    /// Silent fallback used when the host is stubbed.
    Headless(NoopAudioCueService),
}

impl AudioCueService for AudioCueServiceAdapter {
    fn prepare(&self, resource: &str) -> Result<(), String> {
        match self {
            Self::Browser(service) => service.prepare(resource),
            Self::Headless(service) => service.prepare(resource),
        }
    }

    fn play_from_start(&self, resource: &str) -> Result<(), String> {
        match self {
            Self::Browser(service) => service.play_from_start(resource),
            Self::Headless(service) => service.play_from_start(resource),
        }
    }

    fn release_all(&self) {
        match self {
            Self::Browser(service) => service.release_all(),
            Self::Headless(service) => service.release_all(),
        }
    }
}

/// Builds the audio adapter for the selected host strategy.
pub fn audio_cue_service() -> AudioCueServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => AudioCueServiceAdapter::Browser(WebAudioCueService::default()),
        HostStrategy::Headless => AudioCueServiceAdapter::Headless(NoopAudioCueService),
    }
}

/// Builds the analytics backend handle for the selected host strategy.
pub fn market_data_service() -> Rc<dyn MarketDataService> {
    match selected_host_strategy() {
        HostStrategy::Browser => Rc::new(MarketApiClient::default()),
        HostStrategy::Headless => Rc::new(UnavailableMarketDataService::new(
            "analytics backend disabled in stub host builds",
        )),
    }
}

/// Builds the host service bundle injected into `desktop_runtime`.
pub fn build_host_services() -> HostServices {
    HostServices {
        audio: Rc::new(audio_cue_service()),
        market: market_data_service(),
        host_strategy: selected_host_strategy(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_build_selects_browser_adapters() {
        if cfg!(feature = "desktop-host-stub") {
            return;
        }
        assert_eq!(host_strategy_name(), "browser");
        assert!(matches!(
            audio_cue_service(),
            AudioCueServiceAdapter::Browser(_)
        ));
        assert_eq!(build_host_services().host_strategy, HostStrategy::Browser);
    }
}
