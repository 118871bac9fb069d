//! Build plan publish endpoints

use shipspec_core::domain::permission::PlanPermissions;
use shipspec_core::domain::plan::Plan;

use crate::SpecsClient;
use crate::error::Result;

impl SpecsClient {
    // =============================================================================
    // Build Plans
    // =============================================================================

    /// Upsert a build plan
    ///
    /// Creates the plan if its `PROJECT-PLAN` identity is unknown to the
    /// server, otherwise overwrites the stored plan in place. Publishing the
    /// same definition twice leaves the server unchanged on the second call.
    pub async fn publish_plan(&self, plan: &Plan) -> Result<()> {
        plan.validate()?;
        let identity = plan.identifier().identity();
        let url = format!("{}/api/plans/{}", self.base_url(), identity);
        tracing::info!(plan = %identity, "publishing build plan");
        self.put_json(&url, plan).await
    }

    /// Upsert the permission set of a build plan
    ///
    /// The plan must already exist server-side; the server answers with a
    /// reference error otherwise, so publish the plan first.
    pub async fn publish_plan_permissions(&self, permissions: &PlanPermissions) -> Result<()> {
        permissions.validate()?;
        let url = format!(
            "{}/api/plans/{}/permissions",
            self.base_url(),
            permissions.target_identity
        );
        tracing::info!(plan = %permissions.target_identity, "publishing plan permissions");
        self.put_json(&url, permissions).await
    }
}
