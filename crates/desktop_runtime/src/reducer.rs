//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::{AppCommand, SoundCue};
use thiserror::Error;

use crate::{
    apps,
    menu_bar::{MenuBarState, MenuCommand, MenuKey, RAINBOW_DURATION_MS},
    model::{AppId, DesktopState},
    window_manager::{
        close_window_internal, focus_window_internal, minimize_window_internal,
        open_window_internal, restore_window_internal,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`] and [`MenuBarState`].
pub enum DesktopAction {
    /// Open a closed window, or close an open one.
    ToggleOpen {
        /// Target window.
        app_id: AppId,
    },
    /// Desktop-icon activation: open, restore from the dock, or just raise.
    Open {
        /// Target window.
        app_id: AppId,
    },
    /// Close an open window.
    Close {
        /// Target window.
        app_id: AppId,
    },
    /// Move an open window into the dock.
    Minimize {
        /// Target window.
        app_id: AppId,
    },
    /// Bring a window back from the dock and raise it.
    Restore {
        /// Target window.
        app_id: AppId,
    },
    /// Raise an open window above every other window. A press on a window also dismisses the
    /// open menu.
    Focus {
        /// Target window.
        app_id: AppId,
    },
    /// Header click on the menu bar.
    ToggleMenu {
        /// Menu whose header was clicked.
        menu: MenuKey,
    },
    /// Dismiss the open menu, if any.
    CloseMenu,
    /// Menu item click.
    ActivateMenuItem {
        /// Command bound to the clicked item.
        command: MenuCommand,
    },
    /// The rainbow timer expired.
    EndRainbow,
    /// A mounted panel talked back to the runtime.
    HandleAppCommand {
        /// Window hosting the panel.
        app_id: AppId,
        /// Panel request.
        command: AppCommand,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    /// Play a UI sound cue.
    PlaySound(SoundCue),
    /// Arm (or re-arm) the timer that turns the rainbow effect off.
    ScheduleRainbowExpiry {
        /// Delay before [`DesktopAction::EndRainbow`] is dispatched.
        duration_ms: u32,
    },
    /// Flip the sound dispatcher's enable flag.
    ToggleSound,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions. State is left untouched when one is returned.
pub enum ReducerError {
    /// The id does not name a registered window.
    #[error("window `{0}` is not registered")]
    UnknownWindow(AppId),
    /// The action needs an open window.
    #[error("window `{0}` is not open")]
    WindowClosed(AppId),
}

/// Applies a [`DesktopAction`] to the desktop and menu-bar state and collects resulting effects.
///
/// # Errors
///
/// Returns [`ReducerError::UnknownWindow`] for ids missing from the registry and
/// [`ReducerError::WindowClosed`] when an action needs an open window. Validation happens before
/// any mutation.
pub fn reduce_desktop(
    state: &mut DesktopState,
    menu_bar: &mut MenuBarState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::ToggleOpen { app_id } => {
            let index = window_index(state, &app_id)?;
            if state.windows[index].is_open {
                close_window_internal(state, index);
                effects.push(RuntimeEffect::PlaySound(SoundCue::Close));
            } else {
                open_window_internal(state, index);
                effects.push(RuntimeEffect::PlaySound(SoundCue::Open));
            }
        }
        DesktopAction::Open { app_id } => open_or_raise(state, &app_id, &mut effects)?,
        DesktopAction::Close { app_id } => {
            let index = open_window_index(state, &app_id)?;
            close_window_internal(state, index);
        }
        DesktopAction::Minimize { app_id } => {
            let index = open_window_index(state, &app_id)?;
            minimize_window_internal(state, index);
        }
        DesktopAction::Restore { app_id } => {
            let index = open_window_index(state, &app_id)?;
            if restore_window_internal(state, index) {
                effects.push(RuntimeEffect::PlaySound(SoundCue::Restore));
            }
        }
        DesktopAction::Focus { app_id } => {
            let index = open_window_index(state, &app_id)?;
            focus_window_internal(state, index);
            menu_bar.close();
        }
        DesktopAction::ToggleMenu { menu } => {
            if menu_bar.click_header(menu) {
                effects.push(RuntimeEffect::ScheduleRainbowExpiry {
                    duration_ms: RAINBOW_DURATION_MS,
                });
            }
        }
        DesktopAction::CloseMenu => {
            menu_bar.close();
        }
        DesktopAction::ActivateMenuItem { command } => {
            run_menu_command(state, command, &mut effects)?;
            effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
            menu_bar.close();
        }
        DesktopAction::EndRainbow => menu_bar.end_rainbow(),
        DesktopAction::HandleAppCommand { app_id, command } => {
            let index = window_index(state, &app_id)?;
            match command {
                AppCommand::PlayCue { cue } => effects.push(RuntimeEffect::PlaySound(cue)),
                AppCommand::SetWindowTitle { title } => state.windows[index].title = title,
            }
        }
    }
    Ok(effects)
}

fn window_index(state: &DesktopState, app_id: &AppId) -> Result<usize, ReducerError> {
    state
        .windows
        .iter()
        .position(|window| &window.id == app_id)
        .ok_or_else(|| ReducerError::UnknownWindow(app_id.clone()))
}

fn open_window_index(state: &DesktopState, app_id: &AppId) -> Result<usize, ReducerError> {
    let index = window_index(state, app_id)?;
    if state.windows[index].is_open {
        Ok(index)
    } else {
        Err(ReducerError::WindowClosed(app_id.clone()))
    }
}

fn open_or_raise(
    state: &mut DesktopState,
    app_id: &AppId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let index = window_index(state, app_id)?;
    let window = &state.windows[index];
    if !window.is_open {
        open_window_internal(state, index);
        effects.push(RuntimeEffect::PlaySound(SoundCue::Open));
    } else if window.is_minimized {
        restore_window_internal(state, index);
        effects.push(RuntimeEffect::PlaySound(SoundCue::Restore));
    } else {
        focus_window_internal(state, index);
    }
    Ok(())
}

fn front_window_index(state: &DesktopState) -> Option<usize> {
    let front = state.front_window()?;
    state.windows.iter().position(|window| window.id == front.id)
}

fn run_menu_command(
    state: &mut DesktopState,
    command: MenuCommand,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    match command {
        MenuCommand::AboutThisComputer => open_or_raise(state, &apps::about_id(), effects)?,
        MenuCommand::OpenDcaStrategy => open_or_raise(state, &apps::dca_strategy_id(), effects)?,
        MenuCommand::OpenMarketChart => open_or_raise(state, &apps::market_chart_id(), effects)?,
        MenuCommand::CloseFrontWindow => {
            if let Some(index) = front_window_index(state) {
                close_window_internal(state, index);
                effects.push(RuntimeEffect::PlaySound(SoundCue::Close));
            }
        }
        MenuCommand::MinimizeFrontWindow => {
            if let Some(index) = front_window_index(state) {
                minimize_window_internal(state, index);
                effects.push(RuntimeEffect::PlaySound(SoundCue::Minimize));
            }
        }
        MenuCommand::RestoreAllWindows => {
            let docked = state
                .dock_order
                .iter()
                .map(|app_id| window_index(state, app_id))
                .collect::<Result<Vec<_>, _>>()?;
            let mut restored = false;
            for index in docked {
                restored |= restore_window_internal(state, index);
            }
            if restored {
                effects.push(RuntimeEffect::PlaySound(SoundCue::Restore));
            }
        }
        MenuCommand::ToggleSound => effects.push(RuntimeEffect::ToggleSound),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{WindowFrame, WindowRecord};

    fn id(raw: &str) -> AppId {
        AppId::trusted(raw)
    }

    fn state() -> DesktopState {
        DesktopState::new(
            ["test.alpha", "test.beta"]
                .into_iter()
                .map(|raw| WindowRecord::new(id(raw), raw, "icon", WindowFrame::new(0, 0, 400, 300)))
                .collect(),
        )
    }

    fn reduce(
        state: &mut DesktopState,
        menu_bar: &mut MenuBarState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, menu_bar, action).expect("reduce")
    }

    #[test]
    fn toggle_open_opens_then_closes_with_cues() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        let effects = reduce(
            &mut state,
            &mut bar,
            DesktopAction::ToggleOpen {
                app_id: id("test.alpha"),
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PlaySound(SoundCue::Open)]);
        assert_eq!(state.windows[0].z_index, Some(1));

        let effects = reduce(
            &mut state,
            &mut bar,
            DesktopAction::ToggleOpen {
                app_id: id("test.alpha"),
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PlaySound(SoundCue::Close)]);
        assert!(!state.windows[0].is_open);
        assert_eq!(state.windows[0].z_index, None);
    }

    #[test]
    fn open_restores_minimized_window_and_raises_open_one() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        let alpha = id("test.alpha");
        reduce(&mut state, &mut bar, DesktopAction::Open { app_id: alpha.clone() });
        reduce(&mut state, &mut bar, DesktopAction::Minimize { app_id: alpha.clone() });

        let effects = reduce(&mut state, &mut bar, DesktopAction::Open { app_id: alpha.clone() });
        assert_eq!(effects, vec![RuntimeEffect::PlaySound(SoundCue::Restore)]);
        assert!(state.dock_order.is_empty());
        assert_eq!(state.windows[0].z_index, Some(2));

        let effects = reduce(&mut state, &mut bar, DesktopAction::Open { app_id: alpha });
        assert!(effects.is_empty());
        assert_eq!(state.windows[0].z_index, Some(3));
    }

    #[test]
    fn close_and_minimize_are_silent() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        let alpha = id("test.alpha");
        reduce(&mut state, &mut bar, DesktopAction::Open { app_id: alpha.clone() });
        assert!(reduce(&mut state, &mut bar, DesktopAction::Minimize { app_id: alpha.clone() })
            .is_empty());
        assert!(reduce(&mut state, &mut bar, DesktopAction::Close { app_id: alpha }).is_empty());
    }

    #[test]
    fn actions_on_closed_or_unknown_windows_are_rejected_without_mutation() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        let before = state.clone();

        assert_eq!(
            reduce_desktop(&mut state, &mut bar, DesktopAction::Focus { app_id: id("test.alpha") }),
            Err(ReducerError::WindowClosed(id("test.alpha")))
        );
        assert_eq!(
            reduce_desktop(&mut state, &mut bar, DesktopAction::Open { app_id: id("test.nope") }),
            Err(ReducerError::UnknownWindow(id("test.nope")))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn menu_item_runs_command_then_clicks_then_closes_menu() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        let alpha = id("test.alpha");
        reduce(&mut state, &mut bar, DesktopAction::Open { app_id: alpha.clone() });
        reduce(&mut state, &mut bar, DesktopAction::ToggleMenu { menu: MenuKey::File });
        assert_eq!(bar.open, Some(MenuKey::File));

        let effects = reduce(
            &mut state,
            &mut bar,
            DesktopAction::ActivateMenuItem {
                command: MenuCommand::CloseFrontWindow,
            },
        );
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PlaySound(SoundCue::Close),
                RuntimeEffect::PlaySound(SoundCue::Click),
            ]
        );
        assert!(!state.window(&alpha).expect("alpha").is_open);
        assert_eq!(bar.open, None);
    }

    #[test]
    fn pressing_a_window_dismisses_the_open_menu() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        let alpha = id("test.alpha");
        reduce(&mut state, &mut bar, DesktopAction::Open { app_id: alpha.clone() });
        reduce(&mut state, &mut bar, DesktopAction::ToggleMenu { menu: MenuKey::View });
        assert_eq!(bar.open, Some(MenuKey::View));

        let effects = reduce(&mut state, &mut bar, DesktopAction::Focus { app_id: alpha.clone() });
        assert!(effects.is_empty());
        assert_eq!(bar.open, None);
        assert_eq!(state.window(&alpha).expect("alpha").z_index, Some(2));
    }

    #[test]
    fn rejected_focus_leaves_the_menu_open() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        reduce(&mut state, &mut bar, DesktopAction::ToggleMenu { menu: MenuKey::File });
        assert!(reduce_desktop(
            &mut state,
            &mut bar,
            DesktopAction::Focus {
                app_id: id("test.alpha"),
            },
        )
        .is_err());
        assert_eq!(bar.open, Some(MenuKey::File));
    }

    #[test]
    fn front_window_commands_without_front_window_only_click() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        let effects = reduce(
            &mut state,
            &mut bar,
            DesktopAction::ActivateMenuItem {
                command: MenuCommand::MinimizeFrontWindow,
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PlaySound(SoundCue::Click)]);
    }

    #[test]
    fn restore_all_restores_in_dock_order_with_single_cue() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        for raw in ["test.alpha", "test.beta"] {
            reduce(&mut state, &mut bar, DesktopAction::Open { app_id: id(raw) });
        }
        reduce(&mut state, &mut bar, DesktopAction::Minimize { app_id: id("test.beta") });
        reduce(&mut state, &mut bar, DesktopAction::Minimize { app_id: id("test.alpha") });

        let effects = reduce(
            &mut state,
            &mut bar,
            DesktopAction::ActivateMenuItem {
                command: MenuCommand::RestoreAllWindows,
            },
        );
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PlaySound(SoundCue::Restore),
                RuntimeEffect::PlaySound(SoundCue::Click),
            ]
        );
        assert!(state.dock_order.is_empty());
        assert_eq!(
            state.front_window().map(|window| window.id.as_str()),
            Some("test.alpha")
        );
    }

    #[test]
    fn seventh_header_click_schedules_rainbow_expiry() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        let mut scheduled = Vec::new();
        for _ in 0..7 {
            scheduled.extend(reduce(
                &mut state,
                &mut bar,
                DesktopAction::ToggleMenu {
                    menu: MenuKey::System,
                },
            ));
        }
        assert_eq!(
            scheduled,
            vec![RuntimeEffect::ScheduleRainbowExpiry { duration_ms: 3_000 }]
        );
        assert!(bar.rainbow);
        reduce(&mut state, &mut bar, DesktopAction::EndRainbow);
        assert!(!bar.rainbow);
    }

    #[test]
    fn app_commands_retitle_and_request_cues() {
        let mut state = state();
        let mut bar = MenuBarState::default();
        let alpha = id("test.alpha");
        let effects = reduce(
            &mut state,
            &mut bar,
            DesktopAction::HandleAppCommand {
                app_id: alpha.clone(),
                command: AppCommand::PlayCue {
                    cue: SoundCue::Error,
                },
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PlaySound(SoundCue::Error)]);

        reduce(
            &mut state,
            &mut bar,
            DesktopAction::HandleAppCommand {
                app_id: alpha.clone(),
                command: AppCommand::SetWindowTitle {
                    title: "Alpha - BTC".to_string(),
                },
            },
        );
        assert_eq!(state.window(&alpha).expect("alpha").title, "Alpha - BTC");
    }
}
