//! Terminal side of the plan/apply engine
//!
//! Planning and execution live in the `declarative` crate; this module
//! renders plans, reports progress and asks for confirmation.

pub mod differ;
pub mod executor;

pub use differ::display_plan;
pub use executor::{DialoguerConfirm, UiProgress, print_summary};
