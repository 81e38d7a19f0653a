//! # Declarative
//!
//! A framework for declarative management of remote entities.
//!
//! A host runtime reads the desired configuration of each resource from a
//! manifest, compares it with the state it recorded after the last
//! successful operation, and converges the remote system one change at a
//! time.
//!
//! ## Core Concepts
//!
//! - **Resource**: A remote entity type with create/read/update/delete
//! - **DynResource**: The type-erased form the host works with, exchanging
//!   flat attribute trees as JSON and reporting failures as diagnostics
//! - **State**: What was last observed for each managed resource
//! - **Plan**: Ordered create/update/delete changes
//! - **Executor**: Applies a plan sequentially and refreshes state in parallel
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{
//!     AutoConfirm, DesiredResource, ExecuteOptions, NoProgress, NoStore, Plan,
//!     Registry, State, execute,
//! };
//!
//! let mut registry = Registry::new();
//! registry.register(TagResource::new(client));
//!
//! let mut state = State::new();
//! let plan = Plan::build(&manifest, &state, &registry)?;
//! let summary = execute(
//!     &plan,
//!     &ExecuteOptions::default(),
//!     &registry,
//!     &mut state,
//!     &NoStore,
//!     &mut NoProgress,
//!     &mut AutoConfirm,
//! )?;
//! ```
//!
//! ## Callback Traits
//!
//! - [`ProgressCallback`]: Receives progress updates
//! - [`ConfirmCallback`]: Handles user confirmations
//! - [`StateStore`]: Persists state after each change
//!
//! This allows the crate to be used without hard dependencies on
//! specific UI frameworks or storage formats.

pub mod context;
pub mod diff;
pub mod executor;
pub mod planner;
pub mod reference;
pub mod resource;
pub mod state;
pub mod types;

// Re-export main types at crate root
pub use context::{AutoConfirm, AutoDecline, ConfirmCallback, NoProgress, ProgressCallback};
pub use diff::{FieldChange, MembershipDiff, changed_fields};
pub use executor::{apply_refresh, execute, refresh};
pub use planner::{Action, DesiredResource, Plan, PlannedChange};
pub use reference::{UnresolvedReference, parse_reference, references, resolve};
pub use resource::{Applied, DynResource, Registry, Resource, Response};
pub use state::{Address, NoStore, RecordedResource, State, StateStore};
pub use types::{ApplyResult, Diagnostic, ExecuteOptions, ExecuteSummary, Severity};
