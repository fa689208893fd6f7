//! Compiled-in panel registry.
//!
//! `build.rs` validates each panel crate's `app.manifest.toml` and embeds the set as JSON; this
//! module turns it into window records and pairs each id with the panel's mount function.

use std::sync::OnceLock;

use desktop_app_contract::{AppModule, ApplicationId};
use leptos::logging;
use serde::Deserialize;

use crate::model::{AppId, WindowFrame, WindowRecord};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

const DCA_STRATEGY_APP_ID: &str = "pqdca.dca-strategy";
const MARKET_CHART_APP_ID: &str = "pqdca.market-chart";
const ABOUT_APP_ID: &str = "system.about";

#[derive(Debug, Clone, Copy, Deserialize)]
struct ManifestWindowDefaults {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct ManifestEntry {
    app_id: String,
    display_name: String,
    icon_id: String,
    desktop_icon_label: String,
    show_on_desktop: bool,
    window_defaults: ManifestWindowDefaults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Registry entry for one panel.
pub struct AppDescriptor {
    pub app_id: AppId,
    pub display_name: String,
    pub icon_id: String,
    pub desktop_icon_label: String,
    pub show_on_desktop: bool,
    pub window_defaults: WindowFrame,
}

fn parse_catalog(raw: &str) -> Vec<AppDescriptor> {
    let entries: Vec<ManifestEntry> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            logging::warn!("app catalog is unreadable: {err}");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| {
            let app_id = match ApplicationId::new(entry.app_id) {
                Ok(app_id) => app_id,
                Err(err) => {
                    logging::warn!("skipping app catalog entry: {err}");
                    return None;
                }
            };
            if module_for(&app_id).is_none() {
                logging::warn!("skipping app `{app_id}`: no panel is linked for it");
                return None;
            }
            let defaults = entry.window_defaults;
            Some(AppDescriptor {
                app_id,
                display_name: entry.display_name,
                icon_id: entry.icon_id,
                desktop_icon_label: entry.desktop_icon_label,
                show_on_desktop: entry.show_on_desktop,
                window_defaults: WindowFrame::new(
                    defaults.x,
                    defaults.y,
                    defaults.width,
                    defaults.height,
                ),
            })
        })
        .collect()
}

/// Every registered panel, sorted by app id.
pub fn app_registry() -> &'static [AppDescriptor] {
    static REGISTRY: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(|| parse_catalog(APP_MANIFEST_CATALOG_JSON))
}

pub fn desktop_icon_apps() -> Vec<&'static AppDescriptor> {
    app_registry()
        .iter()
        .filter(|entry| entry.show_on_desktop)
        .collect()
}

/// Closed window records for every registered panel.
pub fn initial_window_records() -> Vec<WindowRecord> {
    app_registry()
        .iter()
        .map(|entry| {
            WindowRecord::new(
                entry.app_id.clone(),
                entry.display_name.clone(),
                entry.icon_id.clone(),
                entry.window_defaults,
            )
        })
        .collect()
}

/// Mount function for the panel registered under `app_id`.
pub fn module_for(app_id: &AppId) -> Option<AppModule> {
    match app_id.as_str() {
        DCA_STRATEGY_APP_ID => Some(AppModule::new(desktop_app_dca_strategy::mount)),
        MARKET_CHART_APP_ID => Some(AppModule::new(desktop_app_market_chart::mount)),
        ABOUT_APP_ID => Some(AppModule::new(desktop_app_about::mount)),
        _ => None,
    }
}

pub fn dca_strategy_id() -> AppId {
    ApplicationId::trusted(DCA_STRATEGY_APP_ID)
}

pub fn market_chart_id() -> AppId {
    ApplicationId::trusted(MARKET_CHART_APP_ID)
}

pub fn about_id() -> AppId {
    ApplicationId::trusted(ABOUT_APP_ID)
}

/// Image shown for `icon_id` on desktop icons and dock tiles.
pub fn icon_src(icon_id: &str) -> String {
    format!("/{icon_id}.png")
}
