//! irank health - Probe the ranking service

use std::sync::Arc;

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::{IrError, Result};
use crate::session::{self, ConnectivityMonitor, ConnectivityState, Phase, SessionEvent};

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Probe this many times, one poll interval apart
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub watch: Option<u32>,
}

#[derive(Serialize)]
struct ProbeLine {
    seq: u64,
    state: ConnectivityState,
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn run(ctx: &AppContext, args: &HealthArgs) -> Result<()> {
    let probes = args.watch.unwrap_or(1);
    let (dispatcher, mut events) = session::channel(Arc::clone(&ctx.client));
    let mut monitor = ConnectivityMonitor::new();
    let poller = dispatcher.spawn_poller(ctx.settings.poll, monitor.epoch());
    let mut lines = Vec::new();

    while lines.len() < probes as usize {
        let report = match events.next().await {
            Some(SessionEvent::Probe(report)) => report,
            Some(_) => continue,
            None => break,
        };
        let seq = report.seq;
        let error = report.outcome.as_ref().err().map(ToString::to_string);
        monitor.apply(report);
        let line = ProbeLine {
            seq,
            state: monitor.state(),
            label: monitor.indicator().map(|indicator| indicator.label),
            error,
        };
        if !ctx.robot_mode {
            print_probe(&line);
        }
        lines.push(line);
    }
    poller.cancel();

    let state = monitor.state();
    if ctx.robot_mode {
        emit_robot(&robot_ok(&lines))?;
    } else if probes > 1 {
        let mut layout = HumanLayout::new();
        layout
            .blank()
            .kv("Final phase", state.phase.as_str())
            .kv("Documents", &state.document_count.to_string());
        emit_human(layout);
    }

    if state.phase == Phase::Online {
        Ok(())
    } else {
        Err(IrError::Unreachable(format!(
            "health check failed at {}",
            ctx.client.health_url()
        )))
    }
}

fn print_probe(line: &ProbeLine) {
    let label = line.label.as_deref().unwrap_or("Checking");
    let marker = if line.state.phase == Phase::Online {
        style("●").green()
    } else {
        style("●").red()
    };
    match &line.error {
        Some(error) => println!("{marker} {label} {}", style(format!("({error})")).dim()),
        None => println!("{marker} {label}"),
    }
}
