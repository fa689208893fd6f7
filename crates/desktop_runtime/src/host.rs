//! Host-side runtime helpers for executing reducer effects and querying browser environment state.

mod host_ui;

use std::{cell::RefCell, rc::Rc};

use leptos::{leptos_dom::helpers::TimeoutHandle, logging, SignalSet};
use market_api::MarketDataService;
use platform_host::{HostServices, HostStrategy};

use crate::{
    model::Viewport, reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext,
    sound::SoundDispatcher,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
///
/// Built once by the desktop provider; owns the application's single [`SoundDispatcher`].
pub struct DesktopHostContext {
    sound: Rc<SoundDispatcher>,
    market: Rc<dyn MarketDataService>,
    host_strategy: HostStrategy,
    rainbow_timer: Rc<RefCell<Option<TimeoutHandle>>>,
}

impl DesktopHostContext {
    pub fn new(services: HostServices) -> Self {
        Self {
            sound: Rc::new(SoundDispatcher::new(services.audio)),
            market: services.market,
            host_strategy: services.host_strategy,
            rainbow_timer: Rc::new(RefCell::new(None)),
        }
    }

    pub fn sound(&self) -> Rc<SoundDispatcher> {
        self.sound.clone()
    }

    /// Analytics backend handed to every mounted panel.
    pub fn market_data_service(&self) -> Rc<dyn MarketDataService> {
        self.market.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy.as_str()
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PlaySound(cue) => self.sound.play(cue),
            RuntimeEffect::ToggleSound => runtime.sound_enabled.set(self.sound.toggle()),
            RuntimeEffect::ScheduleRainbowExpiry { duration_ms } => {
                host_ui::schedule_rainbow_expiry(self.rainbow_timer.clone(), runtime, duration_ms)
            }
        }
    }

    /// Returns the current browser viewport available to the window manager.
    pub fn viewport(&self) -> Viewport {
        host_ui::viewport()
    }

    /// Cancels pending timers and releases audio resources.
    pub fn teardown(&self) {
        if let Some(timer) = self.rainbow_timer.borrow_mut().take() {
            timer.clear();
        }
        self.sound.teardown();
        logging::log!("desktop host `{}` torn down", self.host_strategy_name());
    }
}
