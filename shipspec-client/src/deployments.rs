//! Deployment publish endpoints

use shipspec_core::domain::deployment::Deployment;
use shipspec_core::domain::permission::{DeploymentPermissions, EnvironmentPermissions};

use crate::SpecsClient;
use crate::error::Result;

impl SpecsClient {
    // =============================================================================
    // Deployments
    // =============================================================================

    /// Upsert a deployment project
    ///
    /// The source plan referenced by the deployment must already exist
    /// server-side; publish the plan before its deployment.
    pub async fn publish_deployment(&self, deployment: &Deployment) -> Result<()> {
        deployment.validate()?;
        let url = format!(
            "{}/api/deployments/{}",
            self.base_url(),
            urlencoding::encode(&deployment.name)
        );
        tracing::info!(deployment = %deployment.name, "publishing deployment");
        self.put_json(&url, deployment).await
    }

    /// Upsert the permission set of a deployment project
    pub async fn publish_deployment_permissions(
        &self,
        permissions: &DeploymentPermissions,
    ) -> Result<()> {
        permissions.validate()?;
        let url = format!(
            "{}/api/deployments/{}/permissions",
            self.base_url(),
            urlencoding::encode(&permissions.target_identity)
        );
        tracing::info!(deployment = %permissions.target_identity, "publishing deployment permissions");
        self.put_json(&url, permissions).await
    }

    /// Upsert the permission set of one environment of a deployment
    pub async fn publish_environment_permissions(
        &self,
        permissions: &EnvironmentPermissions,
    ) -> Result<()> {
        permissions.validate()?;
        let url = format!(
            "{}/api/deployments/{}/environments/{}/permissions",
            self.base_url(),
            urlencoding::encode(&permissions.target_identity),
            urlencoding::encode(&permissions.environment_name)
        );
        tracing::info!(
            deployment = %permissions.target_identity,
            environment = %permissions.environment_name,
            "publishing environment permissions"
        );
        self.put_json(&url, permissions).await
    }
}

#[cfg(test)]
mod tests {
    use shipspec_core::domain::deployment::{Deployment, ReleaseNaming};
    use shipspec_core::domain::permission::{DeploymentPermissions, Grant};
    use shipspec_core::domain::plan::PlanIdentifier;
    use shipspec_core::ident::Key;

    use crate::{Credentials, PublishError, SpecsClient};

    fn client() -> SpecsClient {
        SpecsClient::new(
            "http://localhost:6990",
            Credentials::new("admin", "secret").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_invalid_deployment_fails_before_any_request() {
        let source = PlanIdentifier::new(Key::new("MYAP").unwrap(), Key::new("BUIL").unwrap());
        let mut deployment = Deployment::new(
            source,
            "DeployMyApp",
            ReleaseNaming::new("release-1").unwrap(),
        )
        .unwrap();
        deployment.release_naming.template = String::new();

        let result = client().publish_deployment(&deployment).await;
        assert!(matches!(result, Err(PublishError::Validation(_))));
    }

    #[tokio::test]
    async fn test_kindless_deployment_grant_fails_before_any_request() {
        let permissions = DeploymentPermissions::new("DeployMyApp")
            .unwrap()
            .grant(Grant::logged_in([]));
        let result = client().publish_deployment_permissions(&permissions).await;
        assert!(matches!(result, Err(PublishError::Validation(_))));
    }
}
