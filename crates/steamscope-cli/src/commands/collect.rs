use crate::output::{Output, OutputFormat};
use crate::CollectArgs;
use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use review_harvest_config::{AppConfig, PathManager, RunConfig};
use review_harvest_core::{Collector, ReviewSummary};
use review_harvest_core::aggregate::Highlight;
use review_harvest_core::export::write_csv_file;
use review_harvest_source::SteamClient;
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

pub async fn run_collect(args: CollectArgs, output: &Output) -> Result<()> {
    tracing::debug!("Collect command started");

    let paths = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to resolve config paths: {}", e))?;
    let config = AppConfig::load(&paths.config_file())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;

    // Resolve the target: a preset name from config, or a raw app id
    let (app_id, game_name) = match (&args.game, &args.app_id) {
        (Some(name), _) => {
            let preset = config.resolve_game(name).map_err(|e| {
                color_eyre::eyre::eyre!("{}. See `steamscope games` for configured presets", e)
            })?;
            (preset.app_id.clone(), Some(preset.name.clone()))
        }
        (None, Some(app_id)) => (app_id.clone(), None),
        (None, None) => unreachable!("clap enforces the target group"),
    };

    let run = RunConfig {
        app_id: app_id.clone(),
        game_name: game_name.clone(),
        language: args.language.unwrap_or_else(|| config.defaults.language.clone()),
        start_date: args.from,
        end_date: args.to.unwrap_or_else(RunConfig::default_end_date),
        sentiment: args.sentiment,
        min_playtime: args.min_playtime,
        purchase_required: args.purchased_only,
        min_votes_up: args.min_votes.unwrap_or(config.defaults.min_votes_up),
        page_delay: Duration::from_millis(
            args.delay_ms.unwrap_or(config.defaults.page_delay_ms),
        ),
    };
    run.validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid run configuration: {}", e))?;

    let client = SteamClient::new(&run.app_id, &run.language)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to build HTTP client: {}", e))?;

    let collector = Collector::new(&run);

    // Ctrl-c aborts the run but keeps everything admitted so far
    let cancel = collector.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let progress = if output.format() == OutputFormat::Human && !output.is_quiet() {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_message("Collecting reviews...");
        Some(bar)
    } else {
        None
    };

    let outcome = {
        let progress = progress.as_ref();
        collector
            .run(&client, |page| {
                if let Some(bar) = progress {
                    bar.set_message(format!(
                        "Collecting reviews... {} pages, {} seen, {} admitted",
                        page.pages_fetched, page.reviews_seen, page.admitted
                    ));
                }
            })
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Review collection failed: {}", e))?
    };

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    if outcome.cancelled {
        output.warn("Collection cancelled; summarizing partial results");
    }

    let summary = ReviewSummary::compute(&outcome.reviews);

    let export_path = args.out.map(|path| {
        if path.as_os_str().is_empty() {
            // Bare --out: fall back to the managed export directory
            paths.export_dir().join(export_file_name(game_name.as_deref(), &app_id))
        } else {
            resolve_export_path(path, game_name.as_deref(), &app_id)
        }
    });
    if let Some(path) = &export_path {
        write_csv_file(path, &outcome.reviews)
            .map_err(|e| color_eyre::eyre::eyre!("CSV export failed: {}", e))?;
    }

    match output.format() {
        OutputFormat::Human => render_human(output, &outcome, &summary, export_path.as_deref()),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "app_id": app_id,
                "game": game_name,
                "pages_fetched": outcome.pages_fetched,
                "reviews_seen": outcome.reviews_seen,
                "duplicates": outcome.duplicates,
                "filtered_out": outcome.filtered_out,
                "cancelled": outcome.cancelled,
                "elapsed_secs": outcome.duration.as_secs_f64(),
                "export": export_path.as_ref().map(|p| p.display().to_string()),
                "summary": serde_json::to_value(&summary)?,
            }));
        }
    }

    Ok(())
}

/// A directory destination gets a "<game>_reviews.csv" file inside it.
fn resolve_export_path(path: PathBuf, game_name: Option<&str>, app_id: &str) -> PathBuf {
    if path.is_dir() {
        path.join(export_file_name(game_name, app_id))
    } else {
        path
    }
}

fn export_file_name(game_name: Option<&str>, app_id: &str) -> String {
    let stem = game_name.unwrap_or(app_id).replace([' ', ':', '/'], "_");
    format!("{}_reviews.csv", stem)
}

fn render_human(
    output: &Output,
    outcome: &review_harvest_core::CollectOutcome,
    summary: &ReviewSummary,
    export_path: Option<&std::path::Path>,
) {
    output.success(format!(
        "Collected {} reviews ({} seen, {} duplicates, {} filtered) in {:.1}s",
        summary.total,
        outcome.reviews_seen,
        outcome.duplicates,
        outcome.filtered_out,
        outcome.duration.as_secs_f64()
    ));

    if let Some(grade) = summary.grade {
        output.println(format!("Rating: {}", grade.to_string().bold()));
    }

    let mut counts = Table::new();
    counts.load_preset(UTF8_FULL_CONDENSED);
    counts.set_header(vec!["Total", "Positive", "Negative", "Purchased", "Avg playtime", "< 1 hr"]);
    counts.add_row(vec![
        summary.total.to_string(),
        summary.positive.to_string(),
        summary.negative.to_string(),
        format!("{} ({:.1}%)", summary.purchased, summary.purchased_pct),
        format!("{:.1} hrs", summary.average_playtime_hours),
        format!("{} ({:.1}%)", summary.under_one_hour, summary.under_one_hour_pct),
    ]);
    output.println(counts.to_string());

    if !summary.languages.is_empty() {
        let mut langs = Table::new();
        langs.load_preset(UTF8_FULL_CONDENSED);
        langs.set_header(vec!["Language", "Reviews"]);
        for (language, count) in &summary.languages {
            langs.add_row(vec![language.clone(), count.to_string()]);
        }
        output.println(langs.to_string());
    }

    if !summary.reviews_per_day.is_empty() {
        let mut days = Table::new();
        days.load_preset(UTF8_FULL_CONDENSED);
        days.set_header(vec!["Date", "Reviews"]);
        for (date, count) in &summary.reviews_per_day {
            days.add_row(vec![date.to_string(), count.to_string()]);
        }
        output.println(days.to_string());
    }

    render_highlights(output, "Most notable positive reviews", &summary.top_positive);
    render_highlights(output, "Most notable negative reviews", &summary.top_negative);

    if let Some(path) = export_path {
        output.success(format!("Wrote CSV export to {}", path.display()));
    }
}

fn render_highlights(output: &Output, title: &str, highlights: &[Highlight]) {
    if highlights.is_empty() {
        return;
    }
    output.println(format!("{}:", title.bold()));
    for highlight in highlights {
        output.println(format!(
            "  [{} votes] {}",
            highlight.votes_up.to_string().cyan(),
            highlight.excerpt
        ));
    }
}
