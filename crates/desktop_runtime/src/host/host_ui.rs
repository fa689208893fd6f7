use std::{cell::RefCell, rc::Rc, time::Duration};

use leptos::{leptos_dom::helpers::TimeoutHandle, logging, set_timeout_with_handle};

use crate::{model::Viewport, reducer::DesktopAction, runtime_context::DesktopRuntimeContext};

pub(super) fn schedule_rainbow_expiry(
    timer: Rc<RefCell<Option<TimeoutHandle>>>,
    runtime: DesktopRuntimeContext,
    duration_ms: u32,
) {
    if let Some(pending) = timer.borrow_mut().take() {
        pending.clear();
    }

    let slot = timer.clone();
    match set_timeout_with_handle(
        move || {
            slot.borrow_mut().take();
            runtime.dispatch_action(DesktopAction::EndRainbow);
        },
        Duration::from_millis(u64::from(duration_ms)),
    ) {
        Ok(handle) => *timer.borrow_mut() = Some(handle),
        Err(err) => {
            logging::warn!("rainbow timer could not be armed: {err:?}");
            runtime.dispatch_action(DesktopAction::EndRainbow);
        }
    }
}

pub(super) fn viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let fallback = Viewport::default();
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(fallback.width);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(fallback.height);

            return Viewport { width, height };
        }
    }

    Viewport::default()
}
