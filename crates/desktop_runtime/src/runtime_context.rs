//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue and the host
//! bundle. UI composition stays in [`crate::components`].

use desktop_app_contract::{AppCommand, AppHost, SoundCue};
use leptos::*;
use platform_host::HostServices;

use crate::{
    effect_executor,
    host::DesktopHostContext,
    menu_bar::MenuBarState,
    model::{AppId, DesktopState, Viewport},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Window collection, z-order counter and dock order.
    pub state: RwSignal<DesktopState>,
    /// Open menu and rainbow easter-egg state.
    pub menu_bar: RwSignal<MenuBarState>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Last measured browser viewport.
    pub viewport: RwSignal<Viewport>,
    /// Mirror of the sound dispatcher's enable flag for menu labels.
    pub sound_enabled: RwSignal<bool>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Plays a cue outside the reducer (window-controller feedback).
    pub fn play_cue(&self, cue: SoundCue) {
        self.host.with_value(|host| host.sound().play(cue));
    }

    /// Command handle a panel mounted in `app_id` uses to reach the runtime.
    pub fn app_host(&self, app_id: AppId) -> AppHost {
        let dispatch = self.dispatch;
        AppHost::new(Callback::new(move |command: AppCommand| {
            dispatch.call(DesktopAction::HandleAppCommand {
                app_id: app_id.clone(),
                command,
            });
        }))
    }

    /// Re-reads the browser viewport into [`Self::viewport`].
    pub fn refresh_viewport(&self) {
        let measured = self.host.with_value(|host| host.viewport());
        if self.viewport.get_untracked() != measured {
            self.viewport.set(measured);
        }
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Injected browser or headless host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host_context = DesktopHostContext::new(host_services);
    let sound_enabled = create_rw_signal(host_context.sound().is_enabled());
    let viewport = create_rw_signal(host_context.viewport());
    logging::log!(
        "desktop runtime starting with `{}` host",
        host_context.host_strategy_name()
    );
    let host = store_value(host_context);
    let state = create_rw_signal(DesktopState::default());
    let menu_bar = create_rw_signal(MenuBarState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut menus = menu_bar.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_menus = menus;

        match reduce_desktop(&mut desktop, &mut menus, action) {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if menus != previous_menus {
                    menu_bar.set(menus);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        menu_bar,
        effects,
        viewport,
        sound_enabled,
        dispatch,
    };

    provide_context(runtime);
    effect_executor::install(runtime);
    on_cleanup(move || host.with_value(|host| host.teardown()));

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
