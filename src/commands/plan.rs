//! `gatesync plan` - resolve the config against captured live state

use anyhow::Result;
use chrono::Utc;
use reconcile::PlanSummary;

use crate::Context;
use crate::cli::{OutputFormat, PlanArgs};
use crate::config::{self, GatewayConfig};
use crate::engine::{ReconcilePlan, display_plan};
use crate::state::StateFile;
use crate::ui;

/// Run the plan command
///
/// Returns whether the plan contains changes.
pub fn run(ctx: &Context, args: &PlanArgs) -> Result<bool> {
    let config_path = config::config_path(args.config.config.as_deref())?;
    let config = GatewayConfig::load(&config_path)?;

    let plan = ReconcilePlan::build(&config)?.filter_by_target(args.target.as_deref())?;
    if plan.is_empty() {
        log::warn!("Nothing in {} matches the target", config_path.display());
    }

    let state = StateFile::load(args.state.as_deref())?;
    if let Some(age) = state.age(Utc::now()) {
        log::info!("Live state captured {} minutes ago", age.num_minutes());
    }

    let actions = plan.resolve(&state.snapshot)?;
    let summary = PlanSummary::from_actions(&actions);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&actions)?),
        OutputFormat::Text => {
            if !ctx.quiet {
                ui::header("Gateway Plan");
                ui::kv("Config", &config_path.display().to_string());
                match &args.state {
                    Some(path) => ui::kv("Live state", &path.display().to_string()),
                    None => ui::kv("Live state", "(empty gateway)"),
                }
            }
            display_plan(&actions, ctx.verbose > 0);
        }
    }

    Ok(summary.has_changes())
}
