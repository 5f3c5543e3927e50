//! Plan display - gatesync-specific UI

use colored::{ColoredString, Colorize};
use reconcile::{Action, Attributes, EntityKind, PlanSummary, group_by_kind};

/// Display resolved actions grouped by kind
///
/// No-ops are only listed when `show_unchanged` is set.
pub fn display_plan(actions: &[Action], show_unchanged: bool) {
    let summary = PlanSummary::from_actions(actions);

    if !summary.has_changes() && !show_unchanged {
        println!();
        println!("  {} No changes needed", "✓".green());
        return;
    }

    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "Gateway Plan".bold()
    );
    println!("│");

    for (kind, kind_actions) in group_by_kind(actions) {
        let shown: Vec<_> = kind_actions
            .into_iter()
            .filter(|a| show_unchanged || a.is_change())
            .collect();
        if shown.is_empty() {
            continue;
        }

        println!("│ {}", kind_title(kind).bold());
        for action in shown {
            println!(
                "│   {} {:<36} {}",
                symbol(action),
                action.target().to_string(),
                describe(action).dimmed()
            );
        }
        println!("│");
    }

    println!("├─────────────────────────────────────────────────────┤");
    println!(
        "│ Summary: {} to create, {} to update, {} to remove, {} unchanged",
        summary.creates.to_string().green(),
        summary.updates.to_string().yellow(),
        summary.removals.to_string().red(),
        summary.unchanged.to_string().dimmed()
    );
    println!("└─────────────────────────────────────────────────────┘");
}

fn kind_title(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Consumer => "Consumers",
        EntityKind::Credential => "Credentials",
        EntityKind::Acl => "ACL groups",
    }
}

fn symbol(action: &Action) -> ColoredString {
    match action {
        Action::Create { .. } => "+".green(),
        Action::Update { .. } => "~".yellow(),
        Action::Remove { .. } => "-".red(),
        Action::NoOp { .. } => "=".dimmed(),
    }
}

/// Short description of what an action will do
pub fn describe(action: &Action) -> String {
    match action {
        Action::Create { attributes, .. } if attributes.is_empty() => "(will create)".to_string(),
        Action::Create { attributes, .. } => format!("(will create) {}", attribute_keys(attributes)),
        Action::Update { id, attributes, .. } => {
            format!("(will update {id}) {}", attribute_keys(attributes))
        }
        Action::Remove { id, .. } => format!("(will remove {id})"),
        Action::NoOp { .. } => "(up to date)".to_string(),
    }
}

/// Attribute names only; values may be secrets
fn attribute_keys(attributes: &Attributes) -> String {
    let keys: Vec<&str> = attributes.keys().map(String::as_str).collect();
    format!("[{}]", keys.join(", "))
}
