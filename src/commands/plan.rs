//! `plan`, `apply` and `destroy`

use anyhow::{Result, bail};
use declarative::{DesiredResource, ExecuteOptions, ExecuteSummary, Plan, execute};

use super::{Session, load_manifest};
use crate::Context;
use crate::cli::{ApplyArgs, DestroyArgs, FileArgs, ProviderArgs, TargetArgs};
use crate::engine::{DialoguerConfirm, UiProgress, display_plan, print_summary};
use crate::ui;

/// Show what apply would change
pub fn plan(
    _ctx: &Context,
    provider: &ProviderArgs,
    files: &FileArgs,
    args: &TargetArgs,
) -> Result<()> {
    let manifest = load_manifest(files)?;
    let session = Session::open(provider, files)?;
    let plan = build(&session, &manifest.desired(), args.target.as_deref())?;

    ui::header("GFW Plan");
    display_plan(&plan);
    Ok(())
}

/// Make the remote configuration match the manifest
pub fn apply(
    ctx: &Context,
    provider: &ProviderArgs,
    files: &FileArgs,
    args: &ApplyArgs,
) -> Result<()> {
    let manifest = load_manifest(files)?;
    let mut session = Session::open(provider, files)?;
    let plan = build(&session, &manifest.desired(), args.target.as_deref())?;

    if !ctx.quiet {
        ui::header("GFW Apply");
    }
    let summary = run(ctx, &mut session, &plan, args.dry_run, args.yes)?;
    finish(&summary)
}

/// Delete every managed resource
pub fn destroy(
    ctx: &Context,
    provider: &ProviderArgs,
    files: &FileArgs,
    args: &DestroyArgs,
) -> Result<()> {
    let mut session = Session::open(provider, files)?;
    if session.state.is_empty() {
        ui::info("Nothing recorded in state, nothing to destroy");
        return Ok(());
    }

    let plan = Plan::destroy(&session.state).filter_by_target(args.target.as_deref());
    if !ctx.quiet {
        ui::header("GFW Destroy");
    }
    let summary = run(ctx, &mut session, &plan, false, args.yes)?;
    finish(&summary)
}

/// Compare the manifest with recorded state
pub(crate) fn build(
    session: &Session,
    desired: &[DesiredResource],
    target: Option<&str>,
) -> Result<Plan> {
    let plan = Plan::build(desired, &session.state, &session.registry)?;
    log::debug!("Planned {} change(s)", plan.changes.len());
    Ok(plan.filter_by_target(target))
}

/// Display, confirm and execute a plan, persisting state as it goes
pub(crate) fn run(
    ctx: &Context,
    session: &mut Session,
    plan: &Plan,
    dry_run: bool,
    yes: bool,
) -> Result<ExecuteSummary> {
    if !ctx.quiet {
        display_plan(plan);
    }
    if plan.is_empty() {
        return Ok(ExecuteSummary::default());
    }

    println!();
    let opts = ExecuteOptions {
        dry_run,
        ..Default::default()
    };
    let summary = execute(
        plan,
        &opts,
        &session.registry,
        &mut session.state,
        &session.store,
        &mut UiProgress::new(ctx.verbose > 0),
        &mut DialoguerConfirm::new(yes),
    )?;

    print_summary(&summary, dry_run);
    Ok(summary)
}

fn finish(summary: &ExecuteSummary) -> Result<()> {
    if !summary.is_success() {
        bail!(
            "{} change(s) failed, {} not attempted",
            summary.failed,
            summary.skipped
        );
    }
    Ok(())
}
