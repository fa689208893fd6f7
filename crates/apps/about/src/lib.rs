//! "About This Computer" panel.

use desktop_app_contract::AppMountContext;
use leptos::*;

const MEMORY_FACTS: [(&str, &str); 3] = [
    ("Built-in Memory", "21MB"),
    ("Virtual Memory", "Off"),
    ("Largest Unused Block", "17.8MB"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct UsageBar {
    label: &'static str,
    percent: f64,
    caption: &'static str,
}

const SYSTEM_USAGE: UsageBar = UsageBar {
    label: "System",
    percent: 35.0,
    caption: "8.5 MB",
};

fn bar_width_style(percent: f64) -> String {
    format!("width: {:.0}%", percent.clamp(0.0, 100.0))
}

fn version_line() -> String {
    format!("pqDCA Desktop {}", env!("CARGO_PKG_VERSION"))
}

/// Mounts the panel into a runtime-managed window.
pub fn mount(_context: AppMountContext) -> View {
    view! { <AboutApp /> }.into_view()
}

#[component]
fn AboutApp() -> impl IntoView {
    view! {
        <div class="app app-about">
            <div class="about-header">
                <img class="pixelated" src="/about-computer.png" alt="" width="64" height="64" />
                <div>
                    <p><strong>{version_line()}</strong></p>
                    {MEMORY_FACTS
                        .into_iter()
                        .map(|(label, value)| view! { <p>{format!("{label}: {value}")}</p> })
                        .collect_view()}
                    <p class="muted">"\u{a9} Peiqing Ye. 1998-2025"</p>
                </div>
            </div>
            <div class="about-usage">
                <span class="usage-label">{SYSTEM_USAGE.label}</span>
                <div class="usage-track">
                    <div class="usage-fill" style=bar_width_style(SYSTEM_USAGE.percent)></div>
                </div>
                <span>{SYSTEM_USAGE.caption}</span>
            </div>
        </div>
    }
}
