//! Retro desktop window manager: window state reducer, per-window interaction controller, menu
//! bar, sound cues and the Leptos shell that renders them.

pub mod animation;
pub mod apps;
pub mod components;
mod effect_executor;
mod host;
pub mod menu_bar;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod sound;
pub mod window_controller;
mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::DesktopHostContext;
pub use menu_bar::{MenuBarState, MenuCommand, MenuKey};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use sound::SoundDispatcher;
pub use window_controller::{WindowController, WindowIntent, WindowMode, WindowPart};
