//! Batch findings report.
//!
//! Runs the analysis engine over every client in a roster document
//! and writes `{name, scenario, findings}` per client to a JSON
//! report, with a per-client summary on stdout. Reporting glue only:
//! the engine guarantees the findings and their order, this binary
//! just moves them.
//!
//! Usage: `estate-report [roster.json] [findings.json]`

use std::env;
use std::fs;

use anyhow::{Context, Result};
use estate_engine::EstateEngine;
use estate_types::{ClientRoster, Finding};
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct ClientReport {
    name: String,
    scenario: String,
    findings: Vec<Finding>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "estate_report=info,estate_engine=info".into()),
        )
        .init();

    let mut args = env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "clients.json".to_string());
    let output = args.next().unwrap_or_else(|| "findings.json".to_string());

    let roster = ClientRoster::from_file(&input)
        .with_context(|| format!("failed to load client roster from {input}"))?;
    info!(clients = roster.clients.len(), roster = %input, "roster loaded");

    let engine = EstateEngine::new();
    let mut reports = Vec::with_capacity(roster.clients.len());

    for entry in &roster.clients {
        let findings = engine.analyze(&entry.client);

        println!("\n{}", "=".repeat(50));
        println!("  {} — {}", entry.client.name, entry.scenario);
        println!("{}", "=".repeat(50));
        for finding in &findings {
            println!("  [{}] {} — {}", finding.severity, finding.rule, finding.issue);
        }

        reports.push(ClientReport {
            name: entry.client.name.clone(),
            scenario: entry.scenario.clone(),
            findings,
        });
    }

    let json = serde_json::to_string_pretty(&reports)?;
    fs::write(&output, json).with_context(|| format!("failed to write report to {output}"))?;
    info!(report = %output, clients = reports.len(), "findings report written");

    Ok(())
}
