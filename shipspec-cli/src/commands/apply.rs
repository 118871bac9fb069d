//! Apply command
//!
//! Publishes the plan, its permissions, the deployment, and the deployment
//! and environment permissions, strictly in that order. Permission sets and
//! deployments reference their target by identity, so targets go first. The
//! run stops at the first error; resources already published stay applied.

use anyhow::{Context, Result};
use colored::*;
use shipspec_client::{
    Credentials, CredentialsProvider, EnvCredentials, FileCredentials, SpecsClient,
};

use crate::config::Config;
use crate::shipit;

pub async fn handle_apply(config: &Config) -> Result<()> {
    let credentials = resolve_credentials(config)?;
    let client = SpecsClient::new(&config.server_url, credentials);
    tracing::debug!(server_url = %config.server_url, "applying definitions");

    let plan = shipit::build_plan()?;
    let identity = plan.identifier().identity();
    client
        .publish_plan(&plan)
        .await
        .context("failed to publish build plan")?;
    println!("{} plan {}", "✓ Published".green().bold(), identity.cyan());

    let plan_permissions = shipit::plan_permissions()?;
    client
        .publish_plan_permissions(&plan_permissions)
        .await
        .context("failed to publish plan permissions")?;
    println!(
        "{} plan permissions for {}",
        "✓ Published".green().bold(),
        identity.cyan()
    );

    let deployment = shipit::deployment()?;
    client
        .publish_deployment(&deployment)
        .await
        .context("failed to publish deployment")?;
    println!(
        "{} deployment {}",
        "✓ Published".green().bold(),
        deployment.name.cyan()
    );

    let deployment_permissions = shipit::deployment_permissions()?;
    client
        .publish_deployment_permissions(&deployment_permissions)
        .await
        .context("failed to publish deployment permissions")?;
    println!(
        "{} deployment permissions for {}",
        "✓ Published".green().bold(),
        deployment.name.cyan()
    );

    let environment_permissions = shipit::environment_permissions()?;
    client
        .publish_environment_permissions(&environment_permissions)
        .await
        .context("failed to publish environment permissions")?;
    println!(
        "{} environment permissions for {}",
        "✓ Published".green().bold(),
        environment_permissions.environment_name.cyan()
    );

    println!();
    println!("{}", "All definitions applied.".green().bold());

    Ok(())
}

/// Environment credentials win; the credentials file is the fallback
fn resolve_credentials(config: &Config) -> Result<Credentials> {
    if let Ok(credentials) = EnvCredentials.credentials() {
        return Ok(credentials);
    }
    FileCredentials::new(&config.credentials_file)
        .credentials()
        .with_context(|| {
            format!(
                "no credentials in environment and none at {}",
                config.credentials_file.display()
            )
        })
}
