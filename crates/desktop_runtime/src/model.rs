//! Window-manager data model: geometry value types, window records and desktop state.

use serde::{Deserialize, Serialize};

pub use desktop_app_contract::ApplicationId as AppId;

/// Smallest window width the controller will produce.
pub const MIN_WINDOW_WIDTH: i32 = 320;
/// Smallest window height the controller will produce.
pub const MIN_WINDOW_HEIGHT: i32 = 240;
/// Height of the top menu bar; maximized windows start below it.
pub const MENU_BAR_HEIGHT: i32 = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Top-left corner in viewport pixels.
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    pub const fn offset_from(self, other: Position) -> Position {
        Position {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Window content size in pixels.
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Applies the minimum window size.
    pub fn clamped_min(self) -> Self {
        Self {
            width: self.width.max(MIN_WINDOW_WIDTH),
            height: self.height.max(MIN_WINDOW_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Position plus size of one window.
pub struct WindowFrame {
    pub position: Position,
    pub size: Size,
}

impl WindowFrame {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height).clamped_min(),
        }
    }

    /// Inline CSS placing the frame at `z_index`.
    pub fn css(self, z_index: u32) -> String {
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
            self.position.x, self.position.y, self.size.width, self.size.height, z_index
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Browser viewport dimensions.
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Identity plus visibility and stacking state of one registered panel window.
pub struct WindowRecord {
    pub id: AppId,
    pub title: String,
    pub icon_id: String,
    pub is_open: bool,
    pub is_minimized: bool,
    /// `None` while closed.
    pub z_index: Option<u32>,
    /// Frame the window controller starts from each time the window opens.
    pub initial_frame: WindowFrame,
}

impl WindowRecord {
    /// Closed record for a registered panel.
    pub fn new(
        id: AppId,
        title: impl Into<String>,
        icon_id: impl Into<String>,
        initial_frame: WindowFrame,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            icon_id: icon_id.into(),
            is_open: false,
            is_minimized: false,
            z_index: None,
            initial_frame,
        }
    }

    /// Open and not in the dock.
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Window collection shared by the desktop, the dock and the menu bar.
pub struct DesktopState {
    pub windows: Vec<WindowRecord>,
    /// Last z-index handed out; only ever grows.
    pub top_z_index: u32,
    /// Minimized windows in the order they were minimized.
    pub dock_order: Vec<AppId>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(crate::apps::initial_window_records())
    }
}

impl DesktopState {
    pub fn new(windows: Vec<WindowRecord>) -> Self {
        Self {
            windows,
            top_z_index: 0,
            dock_order: Vec::new(),
        }
    }

    pub fn window(&self, id: &AppId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == id)
    }

    /// Open windows ordered bottom to top; minimized ones included with their bodies hidden.
    pub fn visible_windows(&self) -> Vec<&WindowRecord> {
        let mut open: Vec<_> = self.windows.iter().filter(|w| w.is_open).collect();
        open.sort_by_key(|w| w.z_index.unwrap_or(0));
        open
    }

    /// Dock tiles in minimize order.
    pub fn minimized_windows(&self) -> Vec<&WindowRecord> {
        self.dock_order
            .iter()
            .filter_map(|id| self.window(id))
            .filter(|w| w.is_open && w.is_minimized)
            .collect()
    }

    /// The open, non-minimized window with the highest z-order.
    pub fn front_window(&self) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index.unwrap_or(0))
    }
}
