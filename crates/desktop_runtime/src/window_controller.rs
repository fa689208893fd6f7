//! Per-window pointer interaction state machine.
//!
//! Each mounted window owns one [`WindowController`]. The controller moves and sizes its own
//! frame, and reports what the window manager should do (focus, close, minimize) plus the cue to
//! play. It never touches the shared window collection.

use desktop_app_contract::SoundCue;

use crate::model::{
    Position, Size, Viewport, WindowFrame, MENU_BAR_HEIGHT, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Interaction mode of one window.
pub enum WindowMode {
    Normal,
    Dragging {
        /// Pointer position relative to the window's top-left corner at drag start.
        drag_offset: Position,
    },
    Resizing,
    Maximized {
        /// Frame to return to when leaving maximize.
        restore_frame: WindowFrame,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Region of the window that received a pointer-down.
pub enum WindowPart {
    TitleBar,
    ResizeHandle,
    Body,
    /// Borders and title-bar buttons.
    Chrome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Requests the controller raises to the window manager.
pub enum WindowIntent {
    Focus,
    Close,
    Minimize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Outcome of one controller input.
pub struct ControllerOutput {
    pub intents: Vec<WindowIntent>,
    pub cue: Option<SoundCue>,
}

impl ControllerOutput {
    fn intent(intent: WindowIntent) -> Self {
        Self {
            intents: vec![intent],
            cue: None,
        }
    }

    fn with_cue(mut self, cue: SoundCue) -> Self {
        self.cue = Some(cue);
        self
    }
}

/// Frame a maximized window occupies in `viewport`.
pub fn maximized_frame(viewport: Viewport) -> WindowFrame {
    WindowFrame {
        position: Position::new(0, MENU_BAR_HEIGHT),
        size: Size::new(viewport.width, viewport.height - MENU_BAR_HEIGHT).clamped_min(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Geometry and interaction mode for one window.
pub struct WindowController {
    frame: WindowFrame,
    mode: WindowMode,
}

impl WindowController {
    pub fn new(frame: WindowFrame) -> Self {
        Self {
            frame: WindowFrame {
                size: frame.size.clamped_min(),
                ..frame
            },
            mode: WindowMode::Normal,
        }
    }

    pub fn frame(&self) -> WindowFrame {
        self.frame
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn is_maximized(&self) -> bool {
        matches!(self.mode, WindowMode::Maximized { .. })
    }

    /// Whether pointer moves are currently consumed (drag or resize in progress).
    pub fn is_tracking_pointer(&self) -> bool {
        matches!(self.mode, WindowMode::Dragging { .. } | WindowMode::Resizing)
    }

    /// Pointer-down anywhere on the window.
    ///
    /// Always emits [`WindowIntent::Focus`]. Title-bar and resize-handle presses start a drag or
    /// resize only from [`WindowMode::Normal`].
    pub fn pointer_down(&mut self, part: WindowPart, pointer: Position) -> ControllerOutput {
        if self.mode == WindowMode::Normal {
            match part {
                WindowPart::TitleBar => {
                    self.mode = WindowMode::Dragging {
                        drag_offset: pointer.offset_from(self.frame.position),
                    };
                }
                WindowPart::ResizeHandle => self.mode = WindowMode::Resizing,
                WindowPart::Body | WindowPart::Chrome => {}
            }
        }
        ControllerOutput::intent(WindowIntent::Focus)
    }

    /// Returns `true` when the frame changed.
    pub fn pointer_move(&mut self, pointer: Position) -> bool {
        let next = match self.mode {
            WindowMode::Dragging { drag_offset } => WindowFrame {
                position: pointer.offset_from(drag_offset),
                ..self.frame
            },
            WindowMode::Resizing => WindowFrame {
                size: Size {
                    width: (pointer.x - self.frame.position.x).max(MIN_WINDOW_WIDTH),
                    height: (pointer.y - self.frame.position.y).max(MIN_WINDOW_HEIGHT),
                },
                ..self.frame
            },
            WindowMode::Normal | WindowMode::Maximized { .. } => return false,
        };
        let changed = next != self.frame;
        self.frame = next;
        changed
    }

    /// Ends a drag or resize. Returns `true` when one was active.
    pub fn pointer_up(&mut self) -> bool {
        if self.is_tracking_pointer() {
            self.mode = WindowMode::Normal;
            true
        } else {
            false
        }
    }

    /// Title-bar double-click: maximizes, or re-asserts the maximized frame if already maximized.
    pub fn double_click_title_bar(&mut self, viewport: Viewport) -> ControllerOutput {
        match self.mode {
            WindowMode::Maximized { .. } => {
                self.frame = maximized_frame(viewport);
                ControllerOutput::default()
            }
            WindowMode::Normal => self.maximize(viewport),
            WindowMode::Dragging { .. } | WindowMode::Resizing => ControllerOutput::default(),
        }
    }

    /// Maximize button: maximizes from normal, restores the snapshot when maximized.
    pub fn maximize_button(&mut self, viewport: Viewport) -> ControllerOutput {
        match self.mode {
            WindowMode::Maximized { restore_frame } => {
                self.frame = restore_frame;
                self.mode = WindowMode::Normal;
                ControllerOutput::default().with_cue(SoundCue::Restore)
            }
            WindowMode::Normal => self.maximize(viewport),
            WindowMode::Dragging { .. } | WindowMode::Resizing => ControllerOutput::default(),
        }
    }

    pub fn close_button(&self) -> ControllerOutput {
        ControllerOutput::intent(WindowIntent::Close).with_cue(SoundCue::Close)
    }

    pub fn minimize_button(&self) -> ControllerOutput {
        ControllerOutput::intent(WindowIntent::Minimize).with_cue(SoundCue::Minimize)
    }

    /// Keeps a maximized frame in step with a resized viewport. Returns `true` when it moved.
    pub fn fit_viewport(&mut self, viewport: Viewport) -> bool {
        if !self.is_maximized() {
            return false;
        }
        let next = maximized_frame(viewport);
        let changed = next != self.frame;
        self.frame = next;
        changed
    }

    /// Drops any interaction and starts over from `frame` (used when a closed window reopens).
    pub fn reset(&mut self, frame: WindowFrame) {
        *self = Self::new(frame);
    }

    fn maximize(&mut self, viewport: Viewport) -> ControllerOutput {
        self.mode = WindowMode::Maximized {
            restore_frame: self.frame,
        };
        self.frame = maximized_frame(viewport);
        ControllerOutput::default().with_cue(SoundCue::Maximize)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1280,
        height: 800,
    };

    fn controller() -> WindowController {
        WindowController::new(WindowFrame::new(100, 100, 320, 240))
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let mut window = controller();
        let out = window.pointer_down(WindowPart::TitleBar, Position::new(110, 110));
        assert_eq!(out.intents, vec![WindowIntent::Focus]);
        assert_eq!(
            window.mode(),
            WindowMode::Dragging {
                drag_offset: Position::new(10, 10)
            }
        );

        assert!(window.pointer_move(Position::new(200, 150)));
        assert_eq!(window.frame().position, Position::new(190, 140));
        assert_eq!(window.frame().size, Size::new(320, 240));

        assert!(window.pointer_up());
        assert_eq!(window.mode(), WindowMode::Normal);
        assert!(!window.pointer_move(Position::new(0, 0)));
    }

    #[test]
    fn resize_anchors_top_left_and_clamps() {
        let mut window = controller();
        window.pointer_down(WindowPart::ResizeHandle, Position::new(420, 340));
        window.pointer_move(Position::new(700, 500));
        assert_eq!(window.frame().size, Size::new(600, 400));
        assert_eq!(window.frame().position, Position::new(100, 100));

        window.pointer_move(Position::new(-50, 120));
        assert_eq!(window.frame().size, Size::new(320, 240));
    }

    #[test]
    fn body_press_only_focuses() {
        let mut window = controller();
        let out = window.pointer_down(WindowPart::Body, Position::new(150, 150));
        assert_eq!(out.intents, vec![WindowIntent::Focus]);
        assert_eq!(out.cue, None);
        assert_eq!(window.mode(), WindowMode::Normal);
        assert!(!window.pointer_up());
    }

    #[test]
    fn maximize_then_restore_round_trips_geometry() {
        let mut window = controller();
        let before = window.frame();

        let out = window.maximize_button(VIEWPORT);
        assert_eq!(out.cue, Some(SoundCue::Maximize));
        assert_eq!(window.frame(), WindowFrame::new(0, 33, 1280, 767));

        let out = window.maximize_button(VIEWPORT);
        assert_eq!(out.cue, Some(SoundCue::Restore));
        assert_eq!(window.frame(), before);
        assert_eq!(window.mode(), WindowMode::Normal);
    }

    #[test]
    fn second_maximize_keeps_first_snapshot() {
        let mut window = controller();
        let before = window.frame();

        window.double_click_title_bar(VIEWPORT);
        let smaller = Viewport {
            width: 900,
            height: 600,
        };
        let out = window.double_click_title_bar(smaller);
        assert_eq!(out, ControllerOutput::default());
        assert_eq!(window.frame(), maximized_frame(smaller));
        assert_eq!(
            window.mode(),
            WindowMode::Maximized {
                restore_frame: before
            }
        );

        window.maximize_button(smaller);
        assert_eq!(window.frame(), before);
    }

    #[test]
    fn drag_and_resize_are_ignored_while_maximized_but_focus_still_fires() {
        let mut window = controller();
        window.maximize_button(VIEWPORT);
        let frame = window.frame();

        let out = window.pointer_down(WindowPart::TitleBar, Position::new(40, 40));
        assert_eq!(out.intents, vec![WindowIntent::Focus]);
        window.pointer_down(WindowPart::ResizeHandle, Position::new(40, 40));
        assert!(!window.pointer_move(Position::new(400, 400)));
        assert_eq!(window.frame(), frame);
        assert!(window.is_maximized());
    }

    #[test]
    fn tiny_viewport_still_respects_minimum_size() {
        let mut window = controller();
        window.maximize_button(Viewport {
            width: 200,
            height: 100,
        });
        assert_eq!(window.frame().size, Size::new(320, 240));
    }

    #[test]
    fn buttons_raise_intents_with_cues() {
        let window = controller();
        assert_eq!(
            window.close_button(),
            ControllerOutput {
                intents: vec![WindowIntent::Close],
                cue: Some(SoundCue::Close),
            }
        );
        assert_eq!(
            window.minimize_button(),
            ControllerOutput {
                intents: vec![WindowIntent::Minimize],
                cue: Some(SoundCue::Minimize),
            }
        );
    }

    #[test]
    fn fit_viewport_only_moves_maximized_windows() {
        let mut window = controller();
        assert!(!window.fit_viewport(VIEWPORT));

        window.maximize_button(VIEWPORT);
        let wider = Viewport {
            width: 1600,
            height: 900,
        };
        assert!(window.fit_viewport(wider));
        assert_eq!(window.frame(), maximized_frame(wider));
    }

    #[test]
    fn reset_drops_maximize_snapshot() {
        let mut window = controller();
        window.maximize_button(VIEWPORT);
        window.reset(WindowFrame::new(10, 20, 500, 400));
        assert_eq!(window.mode(), WindowMode::Normal);
        assert_eq!(window.frame(), WindowFrame::new(10, 20, 500, 400));
    }
}
