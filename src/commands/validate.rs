//! `gatesync validate` - build the plan without looking at live state

use anyhow::Result;

use crate::Context;
use crate::cli::ConfigArgs;
use crate::config::{self, GatewayConfig};
use crate::engine::ReconcilePlan;
use crate::ui;

pub fn run(ctx: &Context, args: &ConfigArgs) -> Result<()> {
    let config_path = config::config_path(args.config.as_deref())?;
    let config = GatewayConfig::load(&config_path)?;
    let plan = ReconcilePlan::build(&config)?;

    if ctx.quiet {
        return Ok(());
    }

    ui::success(&format!("{} is valid", config_path.display()));
    ui::kv(
        "Consumers",
        &format!(
            "{} ({} present, {} removed)",
            config.consumers.len(),
            config.present_consumers().count(),
            config.consumers.len() - config.present_consumers().count()
        ),
    );
    ui::kv("Credentials", &plan.credentials.len().to_string());
    ui::kv("ACL memberships", &plan.acls.len().to_string());
    Ok(())
}
