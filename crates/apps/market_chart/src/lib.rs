//! Market overview panel: asset list, range selector and price chart with moving averages.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod chart;

use desktop_app_contract::{AppHost, AppMountContext, MountGuard, SoundCue};
use leptos::*;
use market_api::{ApiError, Asset, ChartPoint, ChartRange};

use chart::{format_change, polyline, price_bounds, window_title, Series, CHART_HEIGHT, CHART_WIDTH};

/// Mounts the panel into a runtime-managed window.
pub fn mount(context: AppMountContext) -> View {
    view! { <MarketChartApp context=context /> }.into_view()
}

fn report_failure(host: AppHost, error: RwSignal<Option<String>>, err: &ApiError) {
    logging::warn!("market chart: {err}");
    error.set(Some(err.user_message().to_string()));
    host.play_cue(SoundCue::Error);
}

#[component]
/// Asset table plus chart for the selected symbol.
pub fn MarketChartApp(
    /// Window id, host bridge and market service for this mount.
    context: AppMountContext,
) -> impl IntoView {
    let AppMountContext { host, market, .. } = context;
    let guard = MountGuard::install();

    let assets = create_rw_signal(Vec::<Asset>::new());
    let selected = create_rw_signal::<Option<String>>(None);
    let range = create_rw_signal(ChartRange::default());
    let series = create_rw_signal(Vec::<ChartPoint>::new());
    let loading = create_rw_signal(false);
    let error = create_rw_signal::<Option<String>>(None);

    {
        let market = market.clone();
        let guard = guard.clone();
        spawn_local(async move {
            let result = market.list_assets().await;
            if !guard.is_mounted() {
                return;
            }
            match result {
                Ok(listed) => {
                    if selected.get_untracked().is_none() {
                        selected.set(listed.first().map(|asset| asset.symbol.clone()));
                    }
                    assets.set(listed);
                }
                Err(err) => report_failure(host, error, &err),
            }
        });
    }

    create_effect(move |_| {
        host.set_window_title(window_title(selected.get().as_deref()));
    });

    create_effect(move |_| {
        let Some(symbol) = selected.get() else {
            series.set(Vec::new());
            return;
        };
        let requested_range = range.get();
        loading.set(true);
        error.set(None);

        let market = market.clone();
        let guard = guard.clone();
        spawn_local(async move {
            let result = market.chart_series(&symbol, requested_range).await;
            if !guard.is_mounted() {
                return;
            }
            // A newer selection superseded this request.
            if selected.get_untracked().as_deref() != Some(symbol.as_str())
                || range.get_untracked() != requested_range
            {
                return;
            }
            loading.set(false);
            match result {
                Ok(points) => series.set(points),
                Err(err) => {
                    series.set(Vec::new());
                    report_failure(host, error, &err);
                }
            }
        });
    });

    view! {
        <div class="app app-market-chart">
            <table class="asset-table" role="grid" aria-label="Assets">
                <thead>
                    <tr>
                        <th>"Asset"</th>
                        <th>"Price"</th>
                        <th>"24h"</th>
                    </tr>
                </thead>
                <tbody>
                    <For each=move || assets.get() key=|asset| asset.symbol.clone() let:asset>
                        <AssetRow asset=asset selected=selected />
                    </For>
                </tbody>
            </table>

            <div class="app-toolbar" role="group" aria-label="Chart range">
                {ChartRange::ALL
                    .into_iter()
                    .map(|option| {
                        view! {
                            <button
                                type="button"
                                class=move || if range.get() == option { "range-button selected" } else { "range-button" }
                                on:click=move |_| range.set(option)
                            >
                                {option.as_query()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="chart-frame">
                {move || {
                    if selected.get().is_none() {
                        return view! { <p class="muted">"Please select an asset to view chart"</p> }.into_view();
                    }
                    if loading.get() {
                        return view! { <p class="muted">"Loading chart..."</p> }.into_view();
                    }
                    if let Some(message) = error.get() {
                        return view! { <p class="inline-error" role="alert">{message}</p> }.into_view();
                    }
                    let points = series.get();
                    match price_bounds(&points) {
                        Some(bounds) => view! {
                            <svg
                                class="price-chart"
                                viewBox=format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}")
                                preserveAspectRatio="none"
                            >
                                {Series::ALL
                                    .into_iter()
                                    .map(|line| view! {
                                        <polyline
                                            fill="none"
                                            stroke=line.stroke()
                                            stroke-width="1.5"
                                            points=polyline(&points, line, bounds)
                                        />
                                    })
                                    .collect_view()}
                            </svg>
                            <div class="chart-legend">
                                {Series::ALL
                                    .into_iter()
                                    .rev()
                                    .map(|line| view! {
                                        <span style=format!("color: {}", line.stroke())>{line.label()}</span>
                                    })
                                    .collect_view()}
                            </div>
                        }
                        .into_view(),
                        None => view! { <p class="muted">"No data available for this time range"</p> }.into_view(),
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn AssetRow(asset: Asset, selected: RwSignal<Option<String>>) -> impl IntoView {
    let symbol = asset.symbol.clone();
    let is_selected = {
        let symbol = symbol.clone();
        Signal::derive(move || selected.get().as_deref() == Some(symbol.as_str()))
    };
    let change_class = if asset.change_24h >= 0.0 { "change-up" } else { "change-down" };

    view! {
        <tr
            class=move || if is_selected.get() { "selected" } else { "" }
            on:click=move |_| selected.set(Some(symbol.clone()))
        >
            <td>{format!("{} ({})", asset.name, asset.symbol)}</td>
            <td>{format!("${:.2}", asset.current_price)}</td>
            <td class=change_class>{format_change(asset.change_24h)}</td>
        </tr>
    }
}
