use super::*;
use crate::menu_bar::{format_clock, item_label, menu_items, ClockSnapshot, MenuKey};

#[component]
pub(super) fn MenuBar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let menu_bar = runtime.menu_bar;
    let clock_now = create_rw_signal(ClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let outside_click_listener = window_event_listener(ev::pointerdown, move |_| {
        if menu_bar.get_untracked().open.is_some() {
            runtime.dispatch_action(DesktopAction::CloseMenu);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    view! {
        <nav
            class="menu-bar"
            class:rainbow=move || menu_bar.get().rainbow
            aria-label="Menu bar"
            on:pointerdown=move |ev| ev.stop_propagation()
        >
            <div class="menu-bar-menus">
                {MenuKey::ALL
                    .into_iter()
                    .map(|menu| view! { <MenuHeader menu /> })
                    .collect_view()}
            </div>
            <div class="menu-bar-clock">{move || format_clock(clock_now.get())}</div>
        </nav>
    }
}

#[component]
fn MenuHeader(menu: MenuKey) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let is_open = move || runtime.menu_bar.get().open == Some(menu);
    let header = match menu.header_label() {
        Some(label) => view! { <span>{label}</span> }.into_view(),
        None => view! {
            <img class="pixelated" src="/apple-logo.png" alt="System" width="16" height="16" />
        }
        .into_view(),
    };

    view! {
        <div class="menu" class:open=is_open id=menu.dom_id()>
            <button
                type="button"
                class="menu-header"
                aria-haspopup="menu"
                aria-expanded=move || is_open().to_string()
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::ToggleMenu { menu });
                }
            >
                {header}
            </button>
            <Show when=is_open fallback=|| ()>
                <div class="menu-dropdown" role="menu">
                    {menu_items(menu)
                        .iter()
                        .map(|item| {
                            let item = *item;
                            view! {
                                <button
                                    type="button"
                                    role="menuitem"
                                    class="menu-item"
                                    on:click=move |ev| {
                                        stop_mouse_event(&ev);
                                        runtime.dispatch_action(DesktopAction::ActivateMenuItem {
                                            command: item.command,
                                        });
                                    }
                                >
                                    {move || item_label(&item, runtime.sound_enabled.get())}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}
