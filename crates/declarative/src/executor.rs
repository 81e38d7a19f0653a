//! Execution engine - applies a plan one change at a time

use crate::context::{ConfirmCallback, ProgressCallback};
use crate::planner::{Action, Plan, PlannedChange};
use crate::reference::resolve;
use crate::resource::{DynResource, Registry, Response};
use crate::state::{Address, RecordedResource, State, StateStore};
use crate::types::{ApplyResult, Diagnostic, ExecuteOptions, ExecuteSummary};
use anyhow::{Context, Result};
use rayon::prelude::*;

/// Execute a plan with the given options and callbacks
///
/// Changes run sequentially in plan order. References are resolved against
/// the live state right before each change, so ids recorded by earlier
/// steps are visible to later ones. State is persisted after every
/// successful change and execution stops at the first failure; the
/// remaining changes are counted as skipped.
///
/// # Arguments
/// * `plan` - The plan to run
/// * `opts` - Execution options (dry_run, jobs)
/// * `registry` - Resource types by name
/// * `state` - Recorded state, updated in place
/// * `store` - Where state is persisted
/// * `progress` - Progress callback
/// * `confirm` - Confirmation callback
///
/// # Errors
///
/// Returns an error when confirmation or persisting state fails. Failed
/// operations are reported in the summary instead.
pub fn execute<P, C>(
    plan: &Plan,
    opts: &ExecuteOptions,
    registry: &Registry,
    state: &mut State,
    store: &dyn StateStore,
    progress: &mut P,
    confirm: &mut C,
) -> Result<ExecuteSummary>
where
    P: ProgressCallback,
    C: ConfirmCallback,
{
    let mut summary = ExecuteSummary {
        no_change: plan.count(Action::NoChange),
        ..Default::default()
    };
    let pending: Vec<&PlannedChange> = plan
        .changes
        .iter()
        .filter(|c| c.action != Action::NoChange)
        .collect();

    if pending.is_empty() {
        return Ok(summary);
    }

    if opts.dry_run {
        for change in &pending {
            let result = ApplyResult::Skipped {
                reason: "dry run".into(),
            };
            progress.on_complete(&change.address, &result);
            summary.add_result(&result);
        }
        return Ok(summary);
    }

    let prompt = format!("Apply {} change(s)?", pending.len());
    if !confirm.confirm(&prompt)? {
        summary.skipped += pending.len();
        return Ok(summary);
    }

    for (index, change) in pending.iter().enumerate() {
        progress.on_start(&change.address, change.action);

        let handler = registry.require(&change.address.type_name)?;
        let response = apply_change(handler, change, state);

        for diagnostic in &response.diagnostics {
            progress.on_diagnostic(&change.address, diagnostic);
            if !diagnostic.is_error() {
                summary.warnings += 1;
            }
        }

        let result = match response.first_error() {
            Some(error) => ApplyResult::Failed {
                error: error.to_string(),
            },
            None => {
                record(change, response, state);
                store
                    .persist(state)
                    .with_context(|| format!("failed to save state after {}", change.address))?;
                match change.action {
                    Action::Create => ApplyResult::Created,
                    Action::Update => ApplyResult::Updated,
                    Action::Delete => ApplyResult::Deleted,
                    Action::NoChange => ApplyResult::NoChange,
                }
            }
        };

        progress.on_complete(&change.address, &result);
        summary.add_result(&result);

        if !result.is_success() {
            let remaining = pending.len() - index - 1;
            if remaining > 0 {
                log::warn!("stopping after failure, {remaining} change(s) not applied");
            }
            summary.skipped += remaining;
            break;
        }
    }

    Ok(summary)
}

/// Run one change against its resource type
fn apply_change(handler: &dyn DynResource, change: &PlannedChange, state: &State) -> Response {
    let prior = state.get(&change.address);

    let desired = match change.desired.as_ref().map(|d| resolve(d, state)) {
        Some(Ok(resolved)) => Some(resolved),
        Some(Err(unresolved)) => return Response::failure(&anyhow::Error::new(unresolved)),
        None => None,
    };

    match (change.action, prior, desired) {
        (Action::Create, _, Some(desired)) => handler.create_value(&desired),
        (Action::Update, Some(prior), Some(desired)) => {
            handler.update_value(&prior.id, &prior.config, &desired)
        }
        (Action::Delete, Some(prior), _) => handler.delete_value(&prior.id, &prior.config),
        _ => Response::failure(&anyhow::anyhow!(
            "{} cannot be applied: {} has no recorded state",
            change.action,
            change.address
        )),
    }
}

/// Store the outcome of a successful change
fn record(change: &PlannedChange, response: Response, state: &mut State) {
    if change.action == Action::Delete {
        state.remove(&change.address);
        return;
    }
    if let (Some(id), Some(config)) = (response.id, response.state) {
        state.upsert(RecordedResource {
            address: change.address.clone(),
            id,
            config,
        });
    }
}

/// Read every recorded resource, running up to `jobs` reads at once
///
/// Results come back in state order.
pub fn refresh(registry: &Registry, state: &State, jobs: usize) -> Result<Vec<(Address, Response)>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create thread pool: {}", e))?;

    let results = pool.install(|| {
        state
            .resources
            .par_iter()
            .map(|record| {
                let response = match registry.require(&record.address.type_name) {
                    Ok(handler) => handler.read_value(&record.id),
                    Err(err) => Response::failure(&err),
                };
                (record.address.clone(), response)
            })
            .collect()
    });

    Ok(results)
}

/// Store refreshed reads, returning the diagnostics that were reported
///
/// Entries whose read failed keep their previous recorded state.
pub fn apply_refresh(state: &mut State, results: Vec<(Address, Response)>) -> Vec<(Address, Diagnostic)> {
    let mut diagnostics = Vec::new();
    for (address, response) in results {
        let failed = response.has_errors();
        diagnostics.extend(
            response
                .diagnostics
                .into_iter()
                .map(|d| (address.clone(), d)),
        );
        if failed {
            continue;
        }
        if let (Some(id), Some(config)) = (response.id, response.state) {
            state.upsert(RecordedResource {
                address,
                id,
                config,
            });
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AutoConfirm, AutoDecline, NoProgress};
    use crate::planner::DesiredResource;
    use crate::resource::tests::Notes;
    use crate::state::NoStore;
    use serde_json::{Value, json};
    use std::cell::RefCell;

    fn registry(notes: Notes) -> Registry {
        let mut registry = Registry::new();
        registry.register(notes);
        registry
    }

    fn desired(name: &str, config: Value) -> DesiredResource {
        DesiredResource {
            address: Address::new("note", name),
            config,
        }
    }

    /// Counts persist calls
    #[derive(Default)]
    struct CountingStore {
        saves: RefCell<usize>,
    }

    impl StateStore for CountingStore {
        fn persist(&self, _state: &State) -> Result<()> {
            *self.saves.borrow_mut() += 1;
            Ok(())
        }
    }

    /// Records the order of callbacks
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ProgressCallback for Recorder {
        fn on_start(&mut self, address: &Address, action: Action) {
            self.events.push(format!("start {address} {action}"));
        }
        fn on_diagnostic(&mut self, address: &Address, diagnostic: &Diagnostic) {
            self.events.push(format!("diag {address} {}", diagnostic.summary));
        }
        fn on_complete(&mut self, address: &Address, _result: &ApplyResult) {
            self.events.push(format!("done {address}"));
        }
    }

    #[test]
    fn test_execute_empty_plan() {
        let registry = registry(Notes::default());
        let mut state = State::new();
        let summary = execute(
            &Plan::default(),
            &ExecuteOptions::default(),
            &registry,
            &mut state,
            &NoStore,
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_execute_creates_and_resolves_references() {
        let registry = registry(Notes::default());
        let mut state = State::new();
        let manifest = vec![
            desired("a", json!({"text": "first"})),
            desired("b", json!({"text": "${note.a.id}"})),
        ];
        let plan = Plan::build(&manifest, &state, &registry).unwrap();
        let store = CountingStore::default();

        let summary = execute(
            &plan,
            &ExecuteOptions::default(),
            &registry,
            &mut state,
            &store,
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();

        assert_eq!(summary.created, 2);
        assert_eq!(*store.saves.borrow(), 2);
        let b = state.get(&Address::new("note", "b")).unwrap();
        assert_eq!(b.config["text"], "1");
        assert_eq!(b.config["created_at"], "now");
    }

    #[test]
    fn test_second_run_has_no_changes() {
        let registry = registry(Notes::default());
        let mut state = State::new();
        let manifest = vec![desired("a", json!({"text": "first"}))];

        let plan = Plan::build(&manifest, &state, &registry).unwrap();
        execute(
            &plan,
            &ExecuteOptions::default(),
            &registry,
            &mut state,
            &NoStore,
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();

        let plan = Plan::build(&manifest, &state, &registry).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_stops_at_first_failure() {
        let notes = Notes {
            fail_on: Some("bad".into()),
            ..Default::default()
        };
        let registry = registry(notes);
        let mut state = State::new();
        let manifest = vec![
            desired("a", json!({"text": "ok"})),
            desired("b", json!({"text": "bad"})),
            desired("c", json!({"text": "never"})),
        ];
        let plan = Plan::build(&manifest, &state, &registry).unwrap();
        let mut recorder = Recorder::default();

        let summary = execute(
            &plan,
            &ExecuteOptions::default(),
            &registry,
            &mut state,
            &NoStore,
            &mut recorder,
            &mut AutoConfirm,
        )
        .unwrap();

        assert_eq!(summary.created, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(state.len(), 1);
        assert!(recorder.events.iter().any(|e| e.starts_with("diag note.b")));
        assert!(!recorder.events.iter().any(|e| e.contains("note.c")));
    }

    #[test]
    fn test_update_warnings_and_delete() {
        let registry = registry(Notes::default());
        let mut state = State::new();
        let plan = Plan::build(
            &[desired("a", json!({"text": "one"})), desired("b", json!({"text": "two"}))],
            &state,
            &registry,
        )
        .unwrap();
        execute(
            &plan,
            &ExecuteOptions::default(),
            &registry,
            &mut state,
            &NoStore,
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();

        let plan = Plan::build(&[desired("a", json!({"text": "uno"}))], &state, &registry).unwrap();
        let summary = execute(
            &plan,
            &ExecuteOptions::default(),
            &registry,
            &mut state,
            &NoStore,
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();

        assert_eq!(summary.updated, 1);
        assert_eq!(summary.deleted, 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(state.len(), 1);
        assert_eq!(state.resources[0].config["text"], "uno");
    }

    #[test]
    fn test_dry_run_and_decline_change_nothing() {
        let registry = registry(Notes::default());
        let mut state = State::new();
        let plan = Plan::build(&[desired("a", json!({"text": "x"}))], &state, &registry).unwrap();

        let opts = ExecuteOptions {
            dry_run: true,
            ..Default::default()
        };
        let summary = execute(
            &plan,
            &opts,
            &registry,
            &mut state,
            &NoStore,
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();
        assert_eq!(summary.skipped, 1);

        let summary = execute(
            &plan,
            &ExecuteOptions::default(),
            &registry,
            &mut state,
            &NoStore,
            &mut NoProgress,
            &mut AutoDecline,
        )
        .unwrap();
        assert_eq!(summary.skipped, 1);
        assert!(state.is_empty());
    }

    #[test]
    fn test_refresh_reads_in_state_order() {
        let registry = registry(Notes::default());
        let mut state = State::new();
        let plan = Plan::build(
            &[desired("a", json!({"text": "one"})), desired("b", json!({"text": "two"}))],
            &state,
            &registry,
        )
        .unwrap();
        execute(
            &plan,
            &ExecuteOptions::default(),
            &registry,
            &mut state,
            &NoStore,
            &mut NoProgress,
            &mut AutoConfirm,
        )
        .unwrap();

        state.resources[0].config = json!({"text": "stale"});
        state.upsert(RecordedResource {
            address: Address::new("note", "ghost"),
            id: "99".into(),
            config: json!({"text": "ghost"}),
        });

        let results = refresh(&registry, &state, 2).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0.name, "a");

        let diagnostics = apply_refresh(&mut state, results);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].0.name, "ghost");
        assert_eq!(state.resources[0].config["text"], "one");
        assert_eq!(state.resources[2].config["text"], "ghost");
    }
}
