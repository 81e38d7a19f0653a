//! Plan display

use colored::Colorize;
use declarative::{Action, FieldChange, Plan, PlannedChange};
use serde_json::Value;
use similar::{ChangeTag, TextDiff};

use crate::ui;

/// Longest inline value before it is shortened
const MAX_INLINE: usize = 60;

/// Display a plan in a user-friendly format
pub fn display_plan(plan: &Plan) {
    if plan.is_empty() {
        println!();
        println!("  {} No changes needed", "✓".green());
        return;
    }

    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "Planned Changes".bold()
    );
    println!("│");

    for change in plan.changes.iter().filter(|c| c.action != Action::NoChange) {
        println!(
            "│ {} {} {}",
            symbol(change.action),
            change.address.to_string().bold(),
            format!("({})", change.action).dimmed()
        );
        for line in detail_lines(change) {
            println!("│     {line}");
        }
        println!("│");
    }

    println!("├─────────────────────────────────────────────────────┤");
    println!("│ {}", summary_line(plan));
    println!("└─────────────────────────────────────────────────────┘");
}

/// Colored symbol for an action
pub fn symbol(action: Action) -> colored::ColoredString {
    match action {
        Action::Create => action.symbol().green(),
        Action::Update => action.symbol().yellow(),
        Action::Delete => action.symbol().red(),
        Action::NoChange => action.symbol().dimmed(),
    }
}

/// `Plan: 1 to create, 2 to update, 0 to delete`
pub fn summary_line(plan: &Plan) -> String {
    format!(
        "Plan: {} to create, {} to update, {} to delete",
        plan.count(Action::Create),
        plan.count(Action::Update),
        plan.count(Action::Delete)
    )
}

/// Lines shown under one planned change
fn detail_lines(change: &PlannedChange) -> Vec<String> {
    match change.action {
        Action::Create => change
            .desired
            .as_ref()
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(field, value)| {
                        format!(
                            "{} = {}",
                            field,
                            ui::truncate(&ui::format_value(value), MAX_INLINE)
                        )
                    })
                    .collect()
            })
            .unwrap_or_default(),
        Action::Update => change.changes.iter().flat_map(field_lines).collect(),
        Action::Delete => vec!["(will delete)".dimmed().to_string()],
        Action::NoChange => Vec::new(),
    }
}

fn field_lines(change: &FieldChange) -> Vec<String> {
    let field = if change.field.is_empty() {
        "(value)"
    } else {
        change.field.as_str()
    };

    if !is_block(&change.from) && !is_block(&change.to) {
        return vec![format!(
            "{}: {} → {}",
            field,
            ui::truncate(&ui::format_value(&change.from), MAX_INLINE).dimmed(),
            ui::truncate(&ui::format_value(&change.to), MAX_INLINE)
        )];
    }

    let mut lines = vec![format!("{field}:")];
    for (tag, text) in text_diff(&block_text(&change.from), &block_text(&change.to)) {
        match tag {
            ChangeTag::Delete => lines.push(format!("  {}", format!("- {text}").red())),
            ChangeTag::Insert => lines.push(format!("  {}", format!("+ {text}").green())),
            ChangeTag::Equal => lines.push(format!("    {}", text.dimmed())),
        }
    }
    lines
}

/// Values that read better as a line diff than inline
fn is_block(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains('\n'),
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => items.iter().any(|v| v.is_object() || v.is_array()),
        _ => false,
    }
}

fn block_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Line diff of two texts, without trailing newlines
pub fn text_diff(from: &str, to: &str) -> Vec<(ChangeTag, String)> {
    TextDiff::from_lines(from, to)
        .iter_all_changes()
        .map(|change| {
            (
                change.tag(),
                change.value().trim_end_matches('\n').to_string(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarative::Address;
    use serde_json::json;

    fn planned(action: Action, changes: Vec<FieldChange>) -> PlannedChange {
        PlannedChange {
            address: Address::new("gfw_role", "analyst"),
            action,
            desired: Some(json!({"name": "analyst", "description": null})),
            changes,
        }
    }

    #[test]
    fn test_summary_line() {
        let plan = Plan {
            changes: vec![
                planned(Action::Create, vec![]),
                planned(Action::Create, vec![]),
                planned(Action::Delete, vec![]),
                planned(Action::NoChange, vec![]),
            ],
        };
        assert_eq!(
            summary_line(&plan),
            "Plan: 2 to create, 0 to update, 1 to delete"
        );
    }

    #[test]
    fn test_text_diff() {
        let diff = text_diff("a\nb\n", "a\nc\n");
        assert_eq!(
            diff,
            vec![
                (ChangeTag::Equal, "a".to_string()),
                (ChangeTag::Delete, "b".to_string()),
                (ChangeTag::Insert, "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_is_block() {
        assert!(is_block(&json!("line one\nline two")));
        assert!(is_block(&json!({"bucket": "x"})));
        assert!(is_block(&json!([{"zoom": 3}])));
        assert!(!is_block(&json!([1, 2, 3])));
        assert!(!is_block(&json!("single line")));
        assert!(!is_block(&json!({})));
    }

    #[test]
    fn test_create_lines_skip_nulls() {
        let lines = detail_lines(&planned(Action::Create, vec![]));
        assert_eq!(lines, vec!["name = analyst".to_string()]);
    }

    #[test]
    fn test_update_block_field_diffs_pretty_json() {
        let change = FieldChange {
            field: "configuration".into(),
            from: json!({"bucket": "a"}),
            to: json!({"bucket": "b"}),
        };
        let lines = field_lines(&change);
        assert_eq!(lines[0], "configuration:");
        assert!(lines.iter().any(|l| l.contains("\"bucket\": \"a\"")));
        assert!(lines.iter().any(|l| l.contains("\"bucket\": \"b\"")));
    }
}
