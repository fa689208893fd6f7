//! Shared window-manager transition helpers used by the desktop reducer.
//!
//! Helpers assume the caller already validated the target index; they never fail.

use crate::model::DesktopState;

/// Raises window `index` above every other window.
pub fn focus_window_internal(state: &mut DesktopState, index: usize) {
    state.top_z_index += 1;
    state.windows[index].z_index = Some(state.top_z_index);
}

/// Opens a closed window (or returns a minimized one to the desktop) and raises it.
pub fn open_window_internal(state: &mut DesktopState, index: usize) {
    state.windows[index].is_open = true;
    undock(state, index);
    focus_window_internal(state, index);
}

/// Closes window `index`, dropping its z-order and dock tile.
pub fn close_window_internal(state: &mut DesktopState, index: usize) {
    undock(state, index);
    let window = &mut state.windows[index];
    window.is_open = false;
    window.z_index = None;
}

/// Moves window `index` into the dock. Returns `false` when it was already there.
pub fn minimize_window_internal(state: &mut DesktopState, index: usize) -> bool {
    let window = &mut state.windows[index];
    if window.is_minimized {
        return false;
    }
    window.is_minimized = true;
    let id = window.id.clone();
    state.dock_order.push(id);
    true
}

/// Brings window `index` back from the dock and raises it. Returns whether it was minimized.
pub fn restore_window_internal(state: &mut DesktopState, index: usize) -> bool {
    let was_minimized = state.windows[index].is_minimized;
    undock(state, index);
    focus_window_internal(state, index);
    was_minimized
}

fn undock(state: &mut DesktopState, index: usize) {
    let window = &mut state.windows[index];
    window.is_minimized = false;
    let id = &window.id;
    state.dock_order.retain(|docked| docked != id);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AppId, WindowFrame, WindowRecord};

    fn state() -> DesktopState {
        DesktopState::new(
            ["t.a", "t.b"]
                .into_iter()
                .map(|id| {
                    WindowRecord::new(AppId::trusted(id), id, id, WindowFrame::new(0, 0, 320, 240))
                })
                .collect(),
        )
    }

    #[test]
    fn focus_hands_out_increasing_z_values() {
        let mut state = state();
        open_window_internal(&mut state, 0);
        open_window_internal(&mut state, 1);
        focus_window_internal(&mut state, 1);
        assert_eq!(state.windows[0].z_index, Some(1));
        assert_eq!(state.windows[1].z_index, Some(3));
        assert_eq!(state.top_z_index, 3);
    }

    #[test]
    fn minimize_twice_keeps_single_dock_tile() {
        let mut state = state();
        open_window_internal(&mut state, 0);
        assert!(minimize_window_internal(&mut state, 0));
        assert!(!minimize_window_internal(&mut state, 0));
        assert_eq!(state.dock_order, vec![AppId::trusted("t.a")]);
        assert_eq!(state.windows[0].z_index, Some(1));
    }

    #[test]
    fn close_clears_dock_and_z_order() {
        let mut state = state();
        open_window_internal(&mut state, 0);
        minimize_window_internal(&mut state, 0);
        close_window_internal(&mut state, 0);
        let window = &state.windows[0];
        assert!(!window.is_open && !window.is_minimized);
        assert_eq!(window.z_index, None);
        assert!(state.dock_order.is_empty());
    }
}
