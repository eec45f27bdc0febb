//! Dashboard Filters - Demo Entry Point
//!
//! Loads the filter config, replays a short filter session against a
//! dashboard's stores and logs what each card would display.

use anyhow::Context as _;
use dashboard_filters::domain::{DragHandle, FilterConfig};
use dashboard_filters::states::FilterContext;
use tracing::info;

const CARDS: &[(&str, u64)] = &[("ticket-types", 1200), ("regions", 860), ("sessions", 430)];

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting dashboard filters demo...");

    let config = match std::env::args().nth(1) {
        Some(path) => FilterConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => FilterConfig::try_load_default().context("loading default config")?,
    };

    let mut ctx = FilterContext::new(&config)?;
    ctx.categories_mut()
        .subscribe(|event| info!(?event, "Category filter changed"));
    ctx.range_mut()
        .subscribe(|event| info!(?event, "Range filter changed"));

    log_cards(&ctx, "initial");

    ctx.categories_mut()
        .toggle_filter("ticket-types", "VIP", "#d4af37", 0.12)?;
    ctx.categories_mut()
        .toggle_filter("regions", "Europe", "#2f6fdf", 0.45)?;
    log_cards(&ctx, "category filters");

    let last = ctx.range().last_index() as i64;
    ctx.range_mut().set_dragging(true, Some(DragHandle::Start));
    ctx.range_mut().drag_to(last / 2);
    ctx.range_mut().set_dragging(false, None);
    log_cards(&ctx, "second half of timeline");

    let snapshot = serde_json::to_string_pretty(&ctx.snapshot())?;
    info!("Snapshot:\n{snapshot}");

    ctx.reset();
    log_cards(&ctx, "reset");

    Ok(())
}

fn log_cards(ctx: &FilterContext, stage: &str) {
    let (from, to) = ctx.range().date_range();
    info!(
        stage,
        %from,
        %to,
        registrations = ctx.range().total_registrations(),
        "Timeline"
    );
    for (card, raw) in CARDS {
        info!(
            stage,
            card,
            raw,
            displayed = ctx.scaled_value(card, *raw),
            scale = ctx.display_scale(card),
            "Card"
        );
    }
}
