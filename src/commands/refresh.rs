//! `refresh` - re-read managed resources into state

use anyhow::{Context as AnyhowContext, Result, bail};
use colored::Colorize;
use declarative::{Address, Diagnostic, State, StateStore, apply_refresh, refresh};

use super::Session;
use crate::Context;
use crate::cli::{FileArgs, ProviderArgs, RefreshArgs};
use crate::ui;

pub fn run(
    ctx: &Context,
    provider: &ProviderArgs,
    files: &FileArgs,
    args: &RefreshArgs,
) -> Result<()> {
    let mut session = Session::open(provider, files)?;
    if session.state.is_empty() {
        ui::info("Nothing recorded in state, nothing to refresh");
        return Ok(());
    }

    if !ctx.quiet {
        ui::header("GFW Refresh");
    }
    let diagnostics = refresh_state(&mut session, args.target.as_deref(), args.jobs)?;

    for (address, diagnostic) in &diagnostics {
        print_diagnostic(address, diagnostic);
    }

    let failed = diagnostics.iter().filter(|(_, d)| d.is_error()).count();
    if failed > 0 {
        bail!("{failed} resource(s) could not be read; their previous state was kept");
    }
    if !ctx.quiet {
        println!();
        ui::success("State refreshed");
    }
    Ok(())
}

/// Read the targeted entries in parallel and store what came back
pub(crate) fn refresh_state(
    session: &mut Session,
    target: Option<&str>,
    jobs: usize,
) -> Result<Vec<(Address, Diagnostic)>> {
    let selected = select(&session.state, target);
    log::info!(
        "Refreshing {} resource(s) with {} job(s)",
        selected.len(),
        jobs
    );

    let results = refresh(&session.registry, &selected, jobs)?;
    let diagnostics = apply_refresh(&mut session.state, results);
    session
        .store
        .persist(&session.state)
        .context("Failed to save refreshed state")?;
    Ok(diagnostics)
}

/// Entries matching a type (`gfw_role`) or an address (`gfw_role.analyst`)
fn select(state: &State, target: Option<&str>) -> State {
    let resources = state
        .resources
        .iter()
        .filter(|r| match target {
            None => true,
            Some(target) => match Address::parse(target) {
                Some(address) => r.address == address,
                None => r.address.type_name == target,
            },
        })
        .cloned()
        .collect();
    State { resources }
}

fn print_diagnostic(address: &Address, diagnostic: &Diagnostic) {
    let symbol = if diagnostic.is_error() {
        "✗".red()
    } else {
        "⚠".yellow()
    };
    println!("  {} {}: {}", symbol, address.to_string().bold(), diagnostic.summary);
    if !diagnostic.detail.is_empty() {
        ui::dim(&diagnostic.detail);
    }
}
