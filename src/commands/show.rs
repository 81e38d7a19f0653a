//! `show` - print recorded state

use anyhow::Result;
use colored::Colorize;
use declarative::{Address, RecordedResource, State};
use serde_json::Value;

use super::state_store;
use crate::Context;
use crate::cli::{FileArgs, TargetArgs};
use crate::ui;

/// Longest value printed before it is shortened
const MAX_VALUE: usize = 72;

pub fn run(ctx: &Context, files: &FileArgs, args: &TargetArgs) -> Result<()> {
    let store = state_store(files);
    let state = store.load()?;
    let selected = select(&state, args.target.as_deref());

    if selected.is_empty() {
        match args.target.as_deref() {
            Some(target) => ui::info(&format!("No recorded resources match '{target}'")),
            None => ui::info(&format!(
                "No resources recorded in {}",
                store.path().display()
            )),
        }
        return Ok(());
    }

    ui::header("GFW State");
    for record in &selected {
        print_record(record, ctx.verbose > 0);
    }

    println!();
    ui::dim(&format!(
        "{} of {} recorded resource(s)",
        selected.len(),
        state.len()
    ));
    Ok(())
}

fn select<'a>(state: &'a State, target: Option<&str>) -> Vec<&'a RecordedResource> {
    let address = target.and_then(Address::parse);
    state
        .resources
        .iter()
        .filter(|r| match (target, &address) {
            (None, _) => true,
            (Some(_), Some(address)) => &r.address == address,
            (Some(type_name), None) => r.address.type_name == type_name,
        })
        .collect()
}

/// One resource; `full` prints complete values instead of shortened ones
fn print_record(record: &RecordedResource, full: bool) {
    ui::section(&record.address.to_string());
    ui::kv("id", &record.id);

    let Value::Object(fields) = &record.config else {
        ui::kv("config", &ui::format_value(&record.config));
        return;
    };
    for (field, value) in fields {
        if value.is_null() {
            continue;
        }
        let text = ui::format_value(value);
        if full {
            ui::kv(field, &text);
        } else {
            ui::kv(field, &ui::truncate(&text, MAX_VALUE));
        }
    }
    if fields.is_empty() {
        println!("  {}", "(no attributes)".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state() -> State {
        let mut state = State::new();
        for (type_name, name) in [
            ("gfw_role", "analyst"),
            ("gfw_role", "admin"),
            ("gfw_dataset", "effort"),
        ] {
            state.upsert(RecordedResource {
                address: Address::new(type_name, name),
                id: name.to_string(),
                config: json!({}),
            });
        }
        state
    }

    #[test]
    fn test_select_all() {
        assert_eq!(select(&state(), None).len(), 3);
    }

    #[test]
    fn test_select_by_type() {
        let state = state();
        let selected = select(&state, Some("gfw_role"));
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].address.name, "analyst");
    }

    #[test]
    fn test_select_by_address() {
        let state = state();
        let selected = select(&state, Some("gfw_dataset.effort"));
        assert_eq!(selected.len(), 1);
        assert!(select(&state, Some("gfw_dataset.other")).is_empty());
    }
}
