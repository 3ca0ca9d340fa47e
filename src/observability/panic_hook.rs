//! Panic hook that prints a structured crash report.
//!
//! The report names the recompute phase, the row being processed, and how far
//! the run got. A crash mid-run is safe to recover from by rerunning, so the
//! footer says so.

use super::context::{get_current_context, get_progress, RunContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str =
    "══════════════════════════════════════════════════════════════════════════════";

/// Install the crash-report hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", crash_report(info));
    }));
}

fn crash_report(info: &PanicHookInfo<'_>) -> String {
    let context = get_current_context();
    let (processed, total) = get_progress();

    let mut lines = header_lines();
    lines.push(format!("  PANIC: {}", truncate(&extract_panic_message(info), 68)));
    if let Some(location) = info.location() {
        lines.push(format!(
            "  Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }
    lines.push(RULE.to_string());
    lines.extend(context_lines(&context, processed, total));
    if let Some(metadata) = Span::current().metadata() {
        lines.push(format!("    Span: {}", truncate(metadata.name(), 67)));
    }
    lines.push(RULE.to_string());

    if std::env::var("RUST_BACKTRACE").is_ok() {
        lines.push("  STACK TRACE:".to_string());
        lines.push(std::backtrace::Backtrace::capture().to_string());
    } else {
        lines.push("  Run with RUST_BACKTRACE=1 for stack trace".to_string());
    }
    lines.push(RULE.to_string());
    lines.push("Stored scores may be partially updated. Rerun `recompute` to restore them.".to_string());

    lines.join("\n")
}

fn header_lines() -> Vec<String> {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    vec![
        String::new(),
        RULE.to_string(),
        "  ASSEMBLYSCORE CRASH REPORT".to_string(),
        RULE.to_string(),
        format!("  Version: {}", VERSION),
        format!("  Platform: {}", std::env::consts::OS),
        format!("  Time: {}", timestamp),
        RULE.to_string(),
    ]
}

fn context_lines(context: &RunContext, processed: usize, total: usize) -> Vec<String> {
    let mut lines = vec!["  RUN CONTEXT:".to_string()];

    match &context.phase {
        Some(phase) => lines.push(format!("    Phase: {}", phase)),
        None => lines.push("    Phase: (not set, crash occurred before a run started)".to_string()),
    }

    if let Some(entity) = &context.current_entity {
        lines.push(format!("    Row: {}", truncate(entity, 68)));
    }

    if total > 0 {
        let pct = (processed as f64 / total as f64 * 100.0) as usize;
        lines.push(format!("    Progress: {} / {} rows ({}%)", processed, total, pct));
    }

    lines
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Truncate on a char boundary; names are frequently Hangul.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
