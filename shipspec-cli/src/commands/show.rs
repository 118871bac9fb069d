//! Show command
//!
//! Renders every definition as pretty JSON in publish order. Useful for
//! inspecting exactly what `apply` would send.

use anyhow::Result;
use colored::*;

use crate::shipit;

pub fn handle_show() -> Result<()> {
    println!("{}", "Build plan:".bold());
    println!("{}", serde_json::to_string_pretty(&shipit::build_plan()?)?);

    println!();
    println!("{}", "Plan permissions:".bold());
    println!(
        "{}",
        serde_json::to_string_pretty(&shipit::plan_permissions()?)?
    );

    println!();
    println!("{}", "Deployment:".bold());
    println!("{}", serde_json::to_string_pretty(&shipit::deployment()?)?);

    println!();
    println!("{}", "Deployment permissions:".bold());
    println!(
        "{}",
        serde_json::to_string_pretty(&shipit::deployment_permissions()?)?
    );

    println!();
    println!("{}", "Environment permissions:".bold());
    println!(
        "{}",
        serde_json::to_string_pretty(&shipit::environment_permissions()?)?
    );

    Ok(())
}
