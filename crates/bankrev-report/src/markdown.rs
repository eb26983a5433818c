//! Markdown report generation.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::charts::ChartPaths;
use crate::stats::{format_average_rating, BankStats};

/// Renders the summary report: an overview table, the chart artifacts, and
/// one section per bank with its sentiment split and top themes.
#[must_use]
pub fn render_markdown(
    stats: &[BankStats],
    charts: &ChartPaths,
    generated_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Bank App Review Analysis");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "**Generated**: {}",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "**Banks**: {}", stats.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "---");
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "| Bank | Reviews | Avg rating | Positive | Neutral | Negative |"
    );
    let _ = writeln!(
        out,
        "|------|---------|------------|----------|---------|----------|"
    );
    for s in stats {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {:.1}% | {:.1}% | {:.1}% |",
            s.code,
            s.review_count,
            format_average_rating(s.average_rating),
            s.percent(s.positive),
            s.percent(s.neutral),
            s.percent(s.negative),
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "![Sentiment distribution]({})",
        file_name(&charts.sentiment)
    );
    let _ = writeln!(out, "![Average rating]({})", file_name(&charts.ratings));
    let _ = writeln!(out, "![Top themes]({})", file_name(&charts.themes));
    let _ = writeln!(out);

    for s in stats {
        let _ = writeln!(out, "## {} ({})", s.name, s.code);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "- Reviews analyzed: {} ({} unclassified)",
            s.review_count, s.unclassified
        );
        let _ = writeln!(
            out,
            "- Average rating: {}",
            format_average_rating(s.average_rating)
        );
        let _ = writeln!(
            out,
            "- Sentiment: {:.1}% positive / {:.1}% neutral / {:.1}% negative",
            s.percent(s.positive),
            s.percent(s.neutral),
            s.percent(s.negative),
        );
        if s.top_themes.is_empty() {
            let _ = writeln!(out, "- Top themes: none tagged");
        } else {
            let _ = writeln!(out, "- Top themes:");
            for (theme, count) in &s.top_themes {
                let _ = writeln!(out, "  - {theme} ({count})");
            }
        }
        let _ = writeln!(out);
    }

    out
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
