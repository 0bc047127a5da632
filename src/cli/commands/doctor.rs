//! irank doctor - Configuration and connectivity checks

use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;

use crate::api::RankingService;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::{ErrorKind, IrError, Result};

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Skip the network checks
    #[arg(long)]
    pub offline: bool,
}

#[derive(Serialize)]
struct Check {
    name: &'static str,
    ok: bool,
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
    elapsed_ms: u128,
}

#[derive(Serialize)]
struct DoctorReport {
    config_path: Option<String>,
    base_url: String,
    health_url: String,
    api_url: String,
    request_timeout_secs: u64,
    probe_timeout_ms: u64,
    poll_interval_secs: u64,
    page_size: usize,
    checks: Vec<Check>,
}

/// Reachability checks are advisory: a down backend is reported, never
/// turned into a failing exit status.
pub async fn run(ctx: &AppContext, args: &DoctorArgs) -> Result<()> {
    let mut checks = Vec::new();
    if !args.offline {
        checks.push(check_health(ctx).await);
        checks.push(check_categories(ctx).await);
    }

    let report = DoctorReport {
        config_path: ctx
            .config
            .source
            .as_ref()
            .map(|path| path.display().to_string()),
        base_url: ctx.client.base_url().to_string(),
        health_url: ctx.client.health_url(),
        api_url: ctx.client.api_url("/"),
        request_timeout_secs: ctx.config.api.request_timeout_secs,
        probe_timeout_ms: ctx.config.health.probe_timeout_ms,
        poll_interval_secs: ctx.config.health.poll_interval_secs,
        page_size: ctx.settings.page_size,
        checks,
    };

    if ctx.robot_mode {
        return emit_robot(&robot_ok(report));
    }

    let mut layout = HumanLayout::new();
    layout.title("irank doctor").section("Configuration");
    layout
        .kv(
            "Config file",
            report.config_path.as_deref().unwrap_or("(defaults)"),
        )
        .kv("Base URL", &report.base_url)
        .kv("Health URL", &report.health_url)
        .kv("API URL", &report.api_url)
        .kv(
            "Request timeout",
            &format!("{}s", report.request_timeout_secs),
        )
        .kv("Probe timeout", &format!("{}ms", report.probe_timeout_ms))
        .kv("Poll interval", &format!("{}s", report.poll_interval_secs))
        .kv("Page size", &report.page_size.to_string())
        .blank();

    if !report.checks.is_empty() {
        layout.section("Checks");
        for check in &report.checks {
            let marker = if check.ok {
                style("✓").green()
            } else {
                style("✗").red()
            };
            layout.push_line(format!(
                "{marker} {:<12} {} {}",
                check.name,
                check.detail,
                style(format!("({}ms)", check.elapsed_ms)).dim()
            ));
            if let Some(hint) = check.hint {
                layout.push_line(format!("  {:<12} {}", "", style(hint).yellow()));
            }
        }
    }
    emit_human(layout);
    Ok(())
}

async fn check_health(ctx: &AppContext) -> Check {
    let started = Instant::now();
    let (ok, detail) = match ctx.client.health().await {
        Ok(report) if report.is_ok() => (
            true,
            report.document_count.map_or_else(
                || "engine ready".to_string(),
                |count| format!("engine ready, {count} documents"),
            ),
        ),
        Ok(report) => (false, format!("status {:?}", report.status)),
        Err(err) => return failed("health", &err, started),
    };
    Check {
        name: "health",
        ok,
        detail,
        hint: None,
        elapsed_ms: started.elapsed().as_millis(),
    }
}

async fn check_categories(ctx: &AppContext) -> Check {
    let started = Instant::now();
    match ctx.client.categories().await {
        Ok(categories) => Check {
            name: "categories",
            ok: true,
            detail: format!("{} categories", categories.len()),
            hint: None,
            elapsed_ms: started.elapsed().as_millis(),
        },
        Err(err) => failed("categories", &err, started),
    }
}

fn failed(name: &'static str, err: &IrError, started: Instant) -> Check {
    Check {
        name,
        ok: false,
        detail: err.to_string(),
        hint: hint_for(err.kind()),
        elapsed_ms: started.elapsed().as_millis(),
    }
}

const fn hint_for(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::Unavailable => Some("start the ranking service or check api.base_url"),
        ErrorKind::Server => Some("the service is up but returned an error status"),
        ErrorKind::Malformed => {
            Some("the endpoint did not answer like a ranking service; check api.api_prefix")
        }
        ErrorKind::Local => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_check_carries_hint_for_kind() {
        let check = failed(
            "health",
            &IrError::Timeout("probe exceeded 3000ms".to_string()),
            Instant::now(),
        );
        assert!(!check.ok);
        assert!(check.detail.contains("3000ms"));
        assert_eq!(check.hint, hint_for(ErrorKind::Unavailable));
        assert!(check.hint.is_some());
    }

    #[test]
    fn test_hint_per_kind() {
        assert!(hint_for(ErrorKind::Server).unwrap().contains("error status"));
        assert!(hint_for(ErrorKind::Malformed).unwrap().contains("api_prefix"));
        assert!(hint_for(ErrorKind::Local).is_none());
    }
}
