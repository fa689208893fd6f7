use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use desktop_app_contract::AppMountContext;
use leptos::leptos_dom::helpers::{IntervalHandle, WindowListenerHandle};
use platform_host::unix_time_ms_now;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::*;
use crate::{
    animation::{is_settled, transition_frame, AnimationFrame, WindowPresence},
    window_controller::{ControllerOutput, WindowController, WindowIntent, WindowPart},
};

const ANIMATION_TICK: Duration = Duration::from_millis(16);

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

/// Global pointer listeners that live exactly as long as one drag or resize.
struct PointerSession {
    moves: Option<WindowListenerHandle>,
    ups: Option<WindowListenerHandle>,
    cancels: Option<WindowListenerHandle>,
}

impl PointerSession {
    fn start(controller: RwSignal<WindowController>, slot: SessionSlot) -> Self {
        let moves = window_event_listener(ev::pointermove, move |ev| {
            if !controller.with_untracked(WindowController::is_tracking_pointer) {
                return;
            }
            let pointer = pointer_from_pointer_event(&ev);
            controller.update(|window| {
                window.pointer_move(pointer);
            });
        });
        let ups = {
            let slot = Rc::clone(&slot);
            window_event_listener(ev::pointerup, move |_| end_pointer_session(controller, &slot))
        };
        let cancels =
            window_event_listener(ev::pointercancel, move |_| end_pointer_session(controller, &slot));
        Self {
            moves: Some(moves),
            ups: Some(ups),
            cancels: Some(cancels),
        }
    }
}

/// A cancelled pointer ends the interaction the same way a release does.
fn end_pointer_session(controller: RwSignal<WindowController>, slot: &SessionSlot) {
    controller.update(|window| {
        window.pointer_up();
    });
    let ended = slot.borrow_mut().take();
    drop(ended);
}

impl Drop for PointerSession {
    fn drop(&mut self) {
        for handle in [self.moves.take(), self.ups.take(), self.cancels.take()]
            .into_iter()
            .flatten()
        {
            handle.remove();
        }
    }
}

type SessionSlot = Rc<RefCell<Option<PointerSession>>>;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: WindowPresence,
    to: WindowPresence,
    started_ms: u64,
}

fn apply_output(runtime: DesktopRuntimeContext, app_id: &AppId, output: ControllerOutput) {
    for intent in output.intents {
        let app_id = app_id.clone();
        runtime.dispatch_action(match intent {
            WindowIntent::Focus => DesktopAction::Focus { app_id },
            WindowIntent::Close => DesktopAction::Close { app_id },
            WindowIntent::Minimize => DesktopAction::Minimize { app_id },
        });
    }
    if let Some(cue) = output.cue {
        runtime.play_cue(cue);
    }
}

#[component]
pub(super) fn DesktopWindow(window: WindowRecord) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let initial_frame = window.initial_frame;
    let app_id = store_value(window.id);

    let record = create_memo(move |_| {
        runtime
            .state
            .with(|desktop| app_id.with_value(|id| desktop.window(id).cloned()))
    });
    let is_open = move || record.with(|w| w.as_ref().is_some_and(|w| w.is_open));
    let presence = move || {
        record.with(|w| {
            w.as_ref()
                .map(|w| WindowPresence::of(w.is_open, w.is_minimized))
                .unwrap_or(WindowPresence::Hidden)
        })
    };

    let controller = create_rw_signal(WindowController::new(initial_frame));
    let session: SessionSlot = Rc::new(RefCell::new(None));

    create_effect(move |was_open: Option<bool>| {
        let open = is_open();
        if open && was_open == Some(false) {
            controller.update(|window| window.reset(initial_frame));
        }
        open
    });

    create_effect(move |_| {
        let viewport = runtime.viewport.get();
        if controller.with_untracked(WindowController::is_maximized) {
            controller.update(|window| {
                window.fit_viewport(viewport);
            });
        }
    });

    let start_presence = presence_untracked(record);
    let transition = create_rw_signal(Transition {
        from: start_presence,
        to: start_presence,
        started_ms: 0,
    });
    let animation = create_rw_signal(transition_frame(start_presence, start_presence, 0.0));
    let animating = create_rw_signal(false);
    let ticker: Rc<Cell<Option<IntervalHandle>>> = Rc::new(Cell::new(None));

    {
        let ticker = ticker.clone();
        create_effect(move |previous: Option<WindowPresence>| {
            let next = presence();
            let Some(previous) = previous else {
                return next;
            };
            if previous == next {
                return next;
            }
            transition.set(Transition {
                from: previous,
                to: next,
                started_ms: unix_time_ms_now(),
            });
            start_animation(transition, animation, animating, ticker.clone());
            next
        });
    }

    {
        let session = session.clone();
        on_cleanup(move || {
            if let Some(handle) = ticker.take() {
                handle.clear();
            }
            let ended = session.borrow_mut().take();
            drop(ended);
        });
    }

    let press = {
        let session = session.clone();
        move |part: WindowPart, ev: &web_sys::PointerEvent| {
            let output = controller
                .try_update(|window| window.pointer_down(part, pointer_from_pointer_event(ev)))
                .unwrap_or_default();
            apply_output(runtime, &app_id.get_value(), output);
            if controller.with_untracked(WindowController::is_tracking_pointer) {
                try_set_pointer_capture(ev);
                let next = PointerSession::start(controller, session.clone());
                let replaced = session.borrow_mut().replace(next);
                drop(replaced);
            }
        }
    };
    let press_body = press.clone();
    let press_title = press.clone();
    let press_resize = press.clone();
    let press_chrome = Callback::new(move |ev: web_sys::PointerEvent| {
        press(WindowPart::Chrome, &ev);
    });

    let on_title_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        let viewport = runtime.viewport.get_untracked();
        let output = controller
            .try_update(|window| window.double_click_title_bar(viewport))
            .unwrap_or_default();
        apply_output(runtime, &app_id.get_value(), output);
    };
    let on_maximize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        let viewport = runtime.viewport.get_untracked();
        let output = controller
            .try_update(|window| window.maximize_button(viewport))
            .unwrap_or_default();
        apply_output(runtime, &app_id.get_value(), output);
    };
    let on_minimize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        let output = controller.with_untracked(WindowController::minimize_button);
        apply_output(runtime, &app_id.get_value(), output);
    };
    let on_close = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        let output = controller.with_untracked(WindowController::close_button);
        apply_output(runtime, &app_id.get_value(), output);
    };

    let style = move || {
        let z_index = record.with(|w| w.as_ref().and_then(|w| w.z_index).unwrap_or(0));
        let mut css = controller.with(|window| window.frame().css(z_index));
        css.push_str(&animation.get().css());
        if presence() != WindowPresence::Shown && !animating.get() {
            css.push_str("display:none;");
        }
        css
    };
    let class = move || {
        let mut class = String::from("window");
        if controller.with(WindowController::is_maximized) {
            class.push_str(" maximized");
        }
        if record.with(|w| w.as_ref().is_some_and(|w| w.is_minimized)) {
            class.push_str(" minimized");
        }
        class
    };
    let title = move || record.with(|w| w.as_ref().map(|w| w.title.clone()).unwrap_or_default());

    view! {
        <section
            class=class
            style=style
            role="dialog"
            aria-label=title
            on:pointerdown=move |ev: web_sys::PointerEvent| {
                if is_primary_press(&ev) {
                    press_body(WindowPart::Body, &ev);
                }
            }
        >
            <header
                class="window-title-bar"
                on:pointerdown=move |ev: web_sys::PointerEvent| {
                    if !is_primary_press(&ev) {
                        return;
                    }
                    ev.prevent_default();
                    ev.stop_propagation();
                    press_title(WindowPart::TitleBar, &ev);
                }
                on:dblclick=on_title_double_click
            >
                <WindowButton
                    class_name="window-close-box"
                    label="Close window"
                    on_chrome_press=press_chrome
                    on_press=on_close
                />
                <span class="window-title">{title}</span>
                <WindowButton
                    class_name="window-zoom-box"
                    label="Maximize window"
                    on_chrome_press=press_chrome
                    on_press=on_maximize
                />
                <WindowButton
                    class_name="window-collapse-box"
                    label="Minimize window"
                    on_chrome_press=press_chrome
                    on_press=on_minimize
                />
            </header>
            <div class="window-body">
                <Show when=is_open fallback=|| ()>
                    <WindowBody app_id=app_id.get_value() />
                </Show>
            </div>
            <Show when=move || !controller.with(WindowController::is_maximized) fallback=|| ()>
                {
                    let press_resize = press_resize.clone();
                    view! {
                        <div
                            class="window-resize-handle"
                            aria-hidden="true"
                            on:pointerdown=move |ev: web_sys::PointerEvent| {
                                if !is_primary_press(&ev) {
                                    return;
                                }
                                ev.prevent_default();
                                ev.stop_propagation();
                                press_resize(WindowPart::ResizeHandle, &ev);
                            }
                        />
                    }
                }
            </Show>
        </section>
    }
}

fn presence_untracked(record: Memo<Option<WindowRecord>>) -> WindowPresence {
    record.with_untracked(|w| {
        w.as_ref()
            .map(|w| WindowPresence::of(w.is_open, w.is_minimized))
            .unwrap_or(WindowPresence::Hidden)
    })
}

fn start_animation(
    transition: RwSignal<Transition>,
    animation: RwSignal<AnimationFrame>,
    animating: RwSignal<bool>,
    ticker: Rc<Cell<Option<IntervalHandle>>>,
) {
    if let Some(previous) = ticker.take() {
        previous.clear();
    }

    let sample = move || {
        let current = transition.get_untracked();
        let elapsed = unix_time_ms_now().saturating_sub(current.started_ms) as f64;
        animation.set(transition_frame(current.from, current.to, elapsed));
        is_settled(elapsed)
    };

    animating.set(true);
    let slot = ticker.clone();
    match set_interval_with_handle(
        move || {
            if sample() {
                if let Some(handle) = slot.take() {
                    handle.clear();
                }
                animating.set(false);
            }
        },
        ANIMATION_TICK,
    ) {
        Ok(handle) => ticker.set(Some(handle)),
        Err(_) => {
            let target = transition.get_untracked().to;
            animation.set(transition_frame(target, target, 0.0));
            animating.set(false);
        }
    }
}

#[component]
fn WindowButton<F>(
    class_name: &'static str,
    label: &'static str,
    on_chrome_press: Callback<web_sys::PointerEvent>,
    on_press: F,
) -> impl IntoView
where
    F: Fn(web_sys::MouseEvent) + 'static,
{
    view! {
        <button
            type="button"
            class=class_name
            aria-label=label
            on:pointerdown=move |ev: web_sys::PointerEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                if is_primary_press(&ev) {
                    on_chrome_press.call(ev);
                }
            }
            on:mousedown=move |ev| stop_mouse_event(&ev)
            on:click=move |ev| on_press(ev)
        />
    }
}

#[component]
fn WindowBody(app_id: AppId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let contents = match apps::module_for(&app_id) {
        Some(module) => module.mount(AppMountContext {
            window_id: app_id.clone(),
            host: runtime.app_host(app_id),
            market: runtime.host.with_value(|host| host.market_data_service()),
        }),
        None => view! { <p class="window-missing">"This panel is not available."</p> }.into_view(),
    };

    view! { <div class="window-body-content">{contents}</div> }
}
