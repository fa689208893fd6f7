//! Desktop shell UI composition and interaction surfaces.

mod menu_bar;
mod window;

use std::time::Duration;

use leptos::*;

use self::{menu_bar::MenuBar, window::DesktopWindow};

use crate::{
    apps,
    model::{AppId, Position, WindowRecord},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell UI: menu bar, desktop icons, windows and the dock.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let resize_listener = window_event_listener(ev::resize, move |_| runtime.refresh_viewport());
    on_cleanup(move || resize_listener.remove());

    view! {
        <div id="desktop-shell-root" class="desktop-shell">
            <MenuBar />
            <div class="desktop">
                <div class="desktop-icons">
                    {apps::desktop_icon_apps()
                        .into_iter()
                        .map(|app| {
                            let app_id = app.app_id.clone();
                            view! {
                                <DesktopIcon
                                    app_id
                                    icon_id=app.icon_id.clone()
                                    label=app.desktop_icon_label.clone()
                                />
                            }
                        })
                        .collect_view()}
                </div>
                <div class="window-layer">
                    <For
                        each=move || state.get().windows
                        key=|window| window.id.clone()
                        let:window
                    >
                        <DesktopWindow window />
                    </For>
                </div>
            </div>
            <Dock />
        </div>
    }
}

#[component]
fn DesktopIcon(app_id: AppId, icon_id: String, label: String) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app_id);

    view! {
        <button
            type="button"
            class="desktop-icon"
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::Open {
                    app_id: app_id.get_value(),
                });
            }
        >
            <img class="pixelated" src=apps::icon_src(&icon_id) alt="" width="32" height="32" />
            <span class="desktop-icon-label">{label}</span>
        </button>
    }
}

#[component]
fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let docked = move || {
        runtime.state.with(|desktop| {
            desktop
                .minimized_windows()
                .into_iter()
                .cloned()
                .collect::<Vec<WindowRecord>>()
        })
    };

    view! {
        <Show when=move || !docked().is_empty() fallback=|| ()>
            <div class="dock" role="toolbar" aria-label="Minimized windows">
                <For each=docked key=|window| (window.id.clone(), window.title.clone()) let:window>
                    <DockTile window />
                </For>
            </div>
        </Show>
    }
}

#[component]
fn DockTile(window: WindowRecord) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(window.id);

    view! {
        <button
            type="button"
            class="dock-tile"
            title=window.title.clone()
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::Restore {
                    app_id: app_id.get_value(),
                });
            }
        >
            <img class="pixelated" src=apps::icon_src(&window.icon_id) alt="" width="24" height="24" />
            <span class="dock-tile-label">{window.title}</span>
        </button>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> Position {
    Position::new(ev.client_x(), ev.client_y())
}
