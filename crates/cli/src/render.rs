//! Plain text rendering of reports, comments and feed stats.

use civic_client::FeedStats;
use civic_database::VoteState;
use civic_models::v0::{Comment, Report, Timestamp};

/// "2024-05-01T08:00:00.000Z" as "2024-05-01 08:00"
fn when(timestamp: &Timestamp) -> String {
    let formatted = timestamp.format().to_string();
    formatted
        .get(..16)
        .unwrap_or(formatted.as_str())
        .replacen('T', " ", 1)
}

pub fn report(report: &Report) -> String {
    let mut lines = vec![format!("[{}] {}", report.category, report.title)];
    if report.is_disputed {
        lines[0].push_str(" (disputed)");
    }

    lines.push(format!(
        "  by {} on {} at {}",
        report.author_name(),
        when(&report.created_at),
        report.location
    ));
    lines.push(format!("  {}", report.description));
    if let Some(url) = &report.image_url {
        lines.push(format!("  image: {url}"));
    }
    lines.push(format!(
        "  true: {}  false: {}  id: {}",
        report.true_votes, report.false_votes, report.id
    ));

    lines.join("\n")
}

pub fn comment(comment: &Comment) -> String {
    format!(
        "{} ({}): {}",
        comment.author_name(),
        when(&comment.created_at),
        comment.content
    )
}

pub fn stats(stats: FeedStats) -> String {
    format!(
        "Total: {}  Verified: {}  Disputed: {}",
        stats.total, stats.verified, stats.disputed
    )
}

pub fn vote(state: VoteState) -> &'static str {
    match state.direction() {
        None => "no vote",
        Some(direction) if direction.is_true() => "voted true",
        Some(_) => "voted false",
    }
}
