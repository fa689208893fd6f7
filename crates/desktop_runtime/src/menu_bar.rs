//! Menu bar model: menus, their items, header-click easter egg, and clock formatting.

/// Header clicks needed to start the rainbow effect.
pub const RAINBOW_CLICK_THRESHOLD: u32 = 7;
/// How long the rainbow effect stays on.
pub const RAINBOW_DURATION_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Pulldown menus in header order.
pub enum MenuKey {
    /// The logo menu.
    System,
    File,
    View,
    Special,
}

impl MenuKey {
    pub const ALL: [MenuKey; 4] = [
        MenuKey::System,
        MenuKey::File,
        MenuKey::View,
        MenuKey::Special,
    ];

    /// Header text; `None` for the logo menu, which renders an image.
    pub const fn header_label(self) -> Option<&'static str> {
        match self {
            MenuKey::System => None,
            MenuKey::File => Some("File"),
            MenuKey::View => Some("View"),
            MenuKey::Special => Some("Special"),
        }
    }

    pub const fn dom_id(self) -> &'static str {
        match self {
            MenuKey::System => "menu-system",
            MenuKey::File => "menu-file",
            MenuKey::View => "menu-view",
            MenuKey::Special => "menu-special",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Commands reachable from menu items.
pub enum MenuCommand {
    AboutThisComputer,
    OpenDcaStrategy,
    OpenMarketChart,
    CloseFrontWindow,
    MinimizeFrontWindow,
    RestoreAllWindows,
    ToggleSound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub command: MenuCommand,
}

const fn item(label: &'static str, command: MenuCommand) -> MenuItem {
    MenuItem { label, command }
}

const SYSTEM_ITEMS: &[MenuItem] = &[item("About This Computer", MenuCommand::AboutThisComputer)];
const FILE_ITEMS: &[MenuItem] = &[
    item("Open DCA Strategy", MenuCommand::OpenDcaStrategy),
    item("Open Market Chart", MenuCommand::OpenMarketChart),
    item("Close Front Window", MenuCommand::CloseFrontWindow),
];
const VIEW_ITEMS: &[MenuItem] = &[
    item("Minimize Front Window", MenuCommand::MinimizeFrontWindow),
    item("Restore All Windows", MenuCommand::RestoreAllWindows),
];
const SPECIAL_ITEMS: &[MenuItem] = &[item("Sound", MenuCommand::ToggleSound)];

/// Items of `menu`, top to bottom.
pub fn menu_items(menu: MenuKey) -> &'static [MenuItem] {
    match menu {
        MenuKey::System => SYSTEM_ITEMS,
        MenuKey::File => FILE_ITEMS,
        MenuKey::View => VIEW_ITEMS,
        MenuKey::Special => SPECIAL_ITEMS,
    }
}

/// Label shown for `item`; the sound toggle reflects the current dispatcher flag.
pub fn item_label(item: &MenuItem, sound_enabled: bool) -> String {
    match item.command {
        MenuCommand::ToggleSound if sound_enabled => "Sound: On".to_string(),
        MenuCommand::ToggleSound => "Sound: Off".to_string(),
        _ => item.label.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Open menu plus rainbow easter-egg bookkeeping.
pub struct MenuBarState {
    pub open: Option<MenuKey>,
    pub header_clicks: u32,
    pub rainbow: bool,
}

impl MenuBarState {
    /// Toggles `menu` (closing any other) and counts the click.
    ///
    /// Returns `true` when this click started the rainbow effect.
    pub fn click_header(&mut self, menu: MenuKey) -> bool {
        self.open = if self.open == Some(menu) {
            None
        } else {
            Some(menu)
        };
        self.header_clicks += 1;
        if self.header_clicks >= RAINBOW_CLICK_THRESHOLD {
            self.header_clicks = 0;
            self.rainbow = true;
            return true;
        }
        false
    }

    /// Returns `true` when a menu was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn end_rainbow(&mut self) {
        self.rainbow = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Wall-clock time shown in the menu bar.
pub struct ClockSnapshot {
    pub hour: u32,
    pub minute: u32,
}

impl ClockSnapshot {
    pub fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self { hour: 0, minute: 0 }
        }
    }
}

/// 12-hour `h:MM AM` rendering.
pub fn format_clock(snapshot: ClockSnapshot) -> String {
    let mut hour = snapshot.hour % 12;
    if hour == 0 {
        hour = 12;
    }
    let suffix = if snapshot.hour >= 12 { "PM" } else { "AM" };
    format!("{hour}:{:02} {suffix}", snapshot.minute)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn header_click_toggles_and_switches_menus() {
        let mut bar = MenuBarState::default();
        bar.click_header(MenuKey::File);
        assert_eq!(bar.open, Some(MenuKey::File));
        bar.click_header(MenuKey::View);
        assert_eq!(bar.open, Some(MenuKey::View));
        bar.click_header(MenuKey::View);
        assert_eq!(bar.open, None);
        assert!(!bar.close());
    }

    #[test]
    fn seventh_click_starts_rainbow_and_eighth_starts_new_cycle() {
        let mut bar = MenuBarState::default();
        for _ in 0..6 {
            assert!(!bar.click_header(MenuKey::Special));
        }
        assert!(!bar.rainbow);
        assert!(bar.click_header(MenuKey::Special));
        assert!(bar.rainbow);
        assert_eq!(bar.header_clicks, 0);

        assert!(!bar.click_header(MenuKey::File));
        assert_eq!(bar.header_clicks, 1);

        bar.end_rainbow();
        assert!(!bar.rainbow);
    }

    #[test]
    fn clock_uses_twelve_hour_format() {
        let at = |hour, minute| format_clock(ClockSnapshot { hour, minute });
        assert_eq!(at(0, 5), "12:05 AM");
        assert_eq!(at(9, 30), "9:30 AM");
        assert_eq!(at(12, 0), "12:00 PM");
        assert_eq!(at(23, 59), "11:59 PM");
    }

    #[test]
    fn sound_item_label_tracks_flag() {
        let sound = menu_items(MenuKey::Special)[0];
        assert_eq!(item_label(&sound, true), "Sound: On");
        assert_eq!(item_label(&sound, false), "Sound: Off");
        let about = menu_items(MenuKey::System)[0];
        assert_eq!(item_label(&about, false), "About This Computer");
    }
}
