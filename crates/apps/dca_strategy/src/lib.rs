//! DCA strategy analysis panel.
//!
//! Loads the asset list on mount, submits the form to the analytics service, renders the
//! returned recommendation, and keeps a history of strategies saved on the service.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod form;

use std::rc::Rc;

use chrono::Utc;
use desktop_app_contract::{AppHost, AppMountContext, MountGuard, SoundCue};
use leptos::*;
use market_api::{ApiError, Asset, DcaFrequency, DcaRecommendation, MarketDataService, SavedStrategy};

pub use form::{FormError, StrategyForm, MIN_AMOUNT};
use form::{format_confidence, format_date, format_usd};

/// Mounts the panel into a runtime-managed window.
pub fn mount(context: AppMountContext) -> View {
    view! { <DcaStrategyApp context=context /> }.into_view()
}

fn report_failure(host: AppHost, error: RwSignal<Option<String>>, err: &ApiError) {
    logging::warn!("dca strategy: {err}");
    error.set(Some(err.user_message().to_string()));
    host.play_cue(SoundCue::Error);
}

fn load_history(
    market: Rc<dyn MarketDataService>,
    guard: MountGuard,
    host: AppHost,
    history: RwSignal<Vec<SavedStrategy>>,
    error: RwSignal<Option<String>>,
) {
    spawn_local(async move {
        let result = market.saved_strategies().await;
        if !guard.is_mounted() {
            return;
        }
        match result {
            Ok(mut saved) => {
                saved.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                history.set(saved);
            }
            Err(err) => report_failure(host, error, &err),
        }
    });
}

#[component]
/// Strategy form, recommendation card and saved-strategy history.
pub fn DcaStrategyApp(
    /// Window id, host bridge and market service for this mount.
    context: AppMountContext,
) -> impl IntoView {
    let AppMountContext { host, market, .. } = context;
    let guard = MountGuard::install();

    let assets = create_rw_signal(Vec::<Asset>::new());
    let form = create_rw_signal(StrategyForm::default());
    let busy = create_rw_signal(false);
    let error = create_rw_signal::<Option<String>>(None);
    let recommendation = create_rw_signal::<Option<DcaRecommendation>>(None);
    let history = create_rw_signal(Vec::<SavedStrategy>::new());

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
                    form.update(|f| f.preselect(&listed));
                    assets.set(listed);
                }
                Err(err) => report_failure(host, error, &err),
            }
        });
    }
    load_history(market.clone(), guard.clone(), host, history, error);

    let market = store_value(market);
    let guard = store_value(guard);

    let submit = move |save: bool| {
        if busy.get_untracked() {
            return;
        }
        let strategy = match form.get_untracked().to_strategy(Utc::now()) {
            Ok(strategy) => strategy,
            Err(err) => {
                error.set(Some(err.to_string()));
                host.play_cue(SoundCue::Error);
                return;
            }
        };
        host.play_cue(SoundCue::Click);
        busy.set(true);
        error.set(None);

        let market = market.get_value();
        let guard = guard.get_value();
        spawn_local(async move {
            let result = if save {
                market
                    .save_strategy(&strategy)
                    .await
                    .map(|saved| saved.recommendation)
            } else {
                market.analyze_strategy(&strategy).await
            };
            if !guard.is_mounted() {
                return;
            }
            busy.set(false);
            match result {
                Ok(found) => {
                    recommendation.set(Some(found));
                    host.play_cue(SoundCue::Open);
                    if save {
                        load_history(market, guard, host, history, error);
                    }
                }
                Err(err) => report_failure(host, error, &err),
            }
        });
    };

    view! {
        <div class="app app-dca-strategy">
            <section class="mac-panel">
                <h2 class="mac-panel-title">"DCA Strategy Analysis"</h2>

                <label class="field">
                    <span>"Asset"</span>
                    <select
                        prop:value=move || form.get().asset
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.asset = value);
                        }
                    >
                        <For each=move || assets.get() key=|asset| asset.symbol.clone() let:asset>
                            <option value=asset.symbol.clone()>
                                {format!("{} ({})", asset.name, asset.symbol)}
                            </option>
                        </For>
                    </select>
                </label>

                <label class="field">
                    <span>"Amount ($)"</span>
                    <input
                        type="number"
                        min="1"
                        prop:value=move || form.get().amount
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.amount = value);
                        }
                    />
                </label>

                <label class="field">
                    <span>"Frequency"</span>
                    <select
                        prop:value=move || form.get().frequency.as_str()
                        on:change=move |ev| {
                            if let Some(frequency) = DcaFrequency::from_token(&event_target_value(&ev)) {
                                form.update(|f| f.frequency = frequency);
                            }
                        }
                    >
                        {DcaFrequency::ALL
                            .into_iter()
                            .map(|frequency| view! { <option value=frequency.as_str()>{frequency.label()}</option> })
                            .collect_view()}
                    </select>
                </label>

                <label class="field field-inline">
                    <input
                        type="checkbox"
                        prop:checked=move || form.get().ai_enhanced
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| f.ai_enhanced = checked);
                        }
                    />
                    <span>"AI Enhanced Strategy"</span>
                </label>

                <div class="app-toolbar">
                    <button type="button" disabled=move || busy.get() on:click=move |_| submit(false)>
                        {move || if busy.get() { "Analyzing..." } else { "Analyze Strategy" }}
                    </button>
                    <button type="button" disabled=move || busy.get() on:click=move |_| submit(true)>
                        "Save Strategy"
                    </button>
                </div>

                <Show when=move || error.get().is_some() fallback=|| ()>
                    <p class="inline-error" role="alert">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </section>

            {move || recommendation.get().map(|rec| view! { <RecommendationCard recommendation=rec /> })}

            <section class="mac-panel">
                <h2 class="mac-panel-title">"Saved Strategies"</h2>
                <Show
                    when=move || !history.get().is_empty()
                    fallback=|| view! { <p class="muted">"No saved strategies yet."</p> }
                >
                    <ul class="strategy-history">
                        <For each=move || history.get() key=|saved| saved.id.clone() let:saved>
                            <li>
                                {format!(
                                    "{} | {} {} {} | entry {} | {}",
                                    format_date(saved.created_at),
                                    format_usd(saved.strategy.amount),
                                    saved.strategy.frequency.label(),
                                    saved.strategy.asset,
                                    format_usd(saved.recommendation.optimal_entry_price),
                                    saved.recommendation.sentiment,
                                )}
                            </li>
                        </For>
                    </ul>
                </Show>
            </section>
        </div>
    }
}

#[component]
fn RecommendationCard(recommendation: DcaRecommendation) -> impl IntoView {
    view! {
        <section class="mac-panel">
            <h2 class="mac-panel-title">"Strategy Recommendation"</h2>
            <dl class="details-grid">
                <dt>"Optimal Entry Price"</dt>
                <dd>{format_usd(recommendation.optimal_entry_price)}</dd>
                <dt>"Market Sentiment"</dt>
                <dd>{recommendation.sentiment.clone()}</dd>
                <dt>"Confidence"</dt>
                <dd>{format_confidence(recommendation.confidence)}</dd>
                <dt>"Next DCA Date"</dt>
                <dd>{format_date(recommendation.next_dca_date)}</dd>
                <dt>"Suggested Amount"</dt>
                <dd>{format_usd(recommendation.suggested_amount)}</dd>
            </dl>
            <strong>"Market Conditions"</strong>
            <ul>
                {recommendation
                    .market_conditions
                    .iter()
                    .map(|condition| view! { <li>{condition.clone()}</li> })
                    .collect_view()}
            </ul>
        </section>
    }
}
