//! Ship-it definitions
//!
//! The MyApp build plan, the marketplace deployment that ships its artifact,
//! and the permission sets applied alongside them. `apply` publishes these
//! five objects in dependency order; `show` renders them.

use shipspec_core::ValidationError;
use shipspec_core::domain::deployment::{Deployment, Environment, ReleaseNaming};
use shipspec_core::domain::permission::{
    DeploymentPermissions, EnvironmentPermissions, Grant, PermissionKind, PlanPermissions,
};
use shipspec_core::domain::plan::{
    Artifact, BranchManagement, Job, Plan, PlanIdentifier, Project, Stage,
};
use shipspec_core::domain::task::{DownloadItem, Task};
use shipspec_core::ident::{Key, Oid};

/// Module key of the third-party marketplace publishing task
const MARKETPLACE_TASK_MODULE: &str = "ch.mibex.bamboo.shipit2mpac:shipit2marketplace.task";

/// The MyApp build plan
pub fn build_plan() -> Result<Plan, ValidationError> {
    let project = Project::new(Key::new("MYAP")?, "MyApp")?.oid(Oid::new("rnl8i5pnngu9")?);

    let job = Job::new("Default Job", Key::new("JOB1")?)?
        .artifact(
            Artifact::new("MyApp", "**.jar")?
                .shared(true)
                .required(true),
        )
        .task(Task::script("touch my-app.jar")?.described("Build app artifact"));

    Ok(Plan::new(project, "BuildApp", Key::new("BUIL")?)?
        .oid(Oid::new("rnbjakcftog1")?)
        .description("Builds app we want to publish to marketplace")
        .concurrent_builds(true)
        .stage(Stage::new("Default Stage")?.job(job))
        .branch_management(
            BranchManagement::new()
                .delete_inactive_branches(true)
                .notify_committers(true),
        ))
}

/// Identity of the build plan, shared by the deployment and the permissions
fn plan_identifier() -> Result<PlanIdentifier, ValidationError> {
    Ok(PlanIdentifier::new(Key::new("MYAP")?, Key::new("BUIL")?))
}

/// Grants on the build plan: full control for admin, view for everyone else
pub fn plan_permissions() -> Result<PlanPermissions, ValidationError> {
    Ok(PlanPermissions::new(&plan_identifier()?)
        .grant(Grant::user(
            "admin",
            [
                PermissionKind::Edit,
                PermissionKind::ViewConfiguration,
                PermissionKind::View,
                PermissionKind::Admin,
                PermissionKind::Clone,
                PermissionKind::Build,
            ],
        )?)
        .grant(Grant::logged_in([PermissionKind::View]))
        .grant(Grant::anonymous([PermissionKind::View])))
}

/// The marketplace deployment fed by the MyApp build plan
pub fn deployment() -> Result<Deployment, ValidationError> {
    let marketplace = Environment::new("Marketplace")?
        .task(Task::clean_working_directory())
        .task(
            Task::artifact_download(vec![DownloadItem::artifact("MyApp")?])
                .described("Download release contents"),
        )
        .task(
            Task::generic_plugin(
                MARKETPLACE_TASK_MODULE,
                [
                    ("publicVersion", "true"),
                    ("runOnBranchBuilds", "false"),
                    ("serverDeployment", "true"),
                    ("jql", "status in (resolved,closed,done)"),
                    ("artifactToDeployKey", "3440641:MyApp:2:0"),
                    ("jiraProjectKey", ""),
                    ("bambooUserId", "admin"),
                    ("createDcDeployment", "false"),
                    ("deduceBuildNrFromPluginVersion", "true"),
                    ("jiraReleasePanelDeploymentOnly", "true"),
                    ("jiraVersionPrefix", ""),
                ],
            )?
            .described("Ship my App"),
        );

    Ok(Deployment::new(
        plan_identifier()?.oid(Oid::new("rnbjakcftog1")?),
        "DeployMyApp",
        ReleaseNaming::new("release-1")?.auto_increment(true),
    )?
    .oid(Oid::new("rno0a1j5beo1")?)
    .environment(marketplace))
}

/// Grants on the deployment project
pub fn deployment_permissions() -> Result<DeploymentPermissions, ValidationError> {
    Ok(DeploymentPermissions::new("DeployMyApp")?.grant(Grant::user(
        "admin",
        [
            PermissionKind::Edit,
            PermissionKind::ViewConfiguration,
            PermissionKind::View,
        ],
    )?))
}

/// Grants on the Marketplace environment
pub fn environment_permissions() -> Result<EnvironmentPermissions, ValidationError> {
    Ok(
        EnvironmentPermissions::new("DeployMyApp", "Marketplace")?.grant(Grant::user(
            "admin",
            [
                PermissionKind::Edit,
                PermissionKind::ViewConfiguration,
                PermissionKind::View,
                PermissionKind::Build,
            ],
        )?),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_plan_has_one_of_everything() {
        let plan = build_plan().unwrap();
        assert!(plan.validate().is_ok());
        assert_eq!(plan.identifier().identity(), "MYAP-BUIL");
        assert_eq!(plan.stages.len(), 1);

        let job = &plan.stages[0].jobs[0];
        assert_eq!(job.tasks.len(), 1);
        assert_eq!(job.artifacts.len(), 1);
        assert_eq!(job.artifacts[0].name, "MyApp");
        assert_eq!(job.artifacts[0].copy_pattern, "**.jar");
        assert!(job.artifacts[0].shared);
        assert!(job.artifacts[0].required);

        let Task::Script { inline_body, .. } = &job.tasks[0] else {
            panic!("expected a script task");
        };
        assert_eq!(inline_body, "touch my-app.jar");
    }

    #[test]
    fn test_admin_holds_exactly_six_kinds_on_the_plan() {
        let permissions = plan_permissions().unwrap();
        assert!(permissions.validate().is_ok());
        assert_eq!(permissions.target_identity, "MYAP-BUIL");
        assert_eq!(permissions.grants.len(), 3);

        let admin = &permissions.grants[0];
        assert_eq!(admin.subject_name.as_deref(), Some("admin"));
        assert_eq!(admin.permissions.len(), 6);
        for kind in [
            PermissionKind::Edit,
            PermissionKind::ViewConfiguration,
            PermissionKind::View,
            PermissionKind::Admin,
            PermissionKind::Clone,
            PermissionKind::Build,
        ] {
            assert!(admin.permissions.contains(&kind));
        }
    }

    #[test]
    fn test_deployment_ships_marketplace_tasks_in_order() {
        let deployment = deployment().unwrap();
        assert!(deployment.validate().is_ok());
        assert_eq!(deployment.name, "DeployMyApp");
        assert_eq!(deployment.source_plan.identity(), "MYAP-BUIL");
        assert_eq!(deployment.release_naming.template, "release-1");
        assert!(deployment.release_naming.auto_increment);
        assert_eq!(deployment.environments.len(), 1);

        let tasks = &deployment.environments[0].tasks;
        assert_eq!(tasks.len(), 3);
        assert!(matches!(tasks[0], Task::CleanWorkingDirectory));

        let Task::ArtifactDownload { artifacts, .. } = &tasks[1] else {
            panic!("expected an artifact download task");
        };
        assert_eq!(artifacts[0].artifact_name, "MyApp");

        let Task::GenericPlugin {
            module_key, config, ..
        } = &tasks[2]
        else {
            panic!("expected a plugin task");
        };
        assert_eq!(module_key, MARKETPLACE_TASK_MODULE);
        assert_eq!(config.len(), 11);
        assert_eq!(config.get("publicVersion").map(String::as_str), Some("true"));
        assert_eq!(config.get("jiraProjectKey").map(String::as_str), Some(""));
        assert_eq!(
            config.get("jql").map(String::as_str),
            Some("status in (resolved,closed,done)")
        );

        // Entries stay in the order they were declared.
        let first_keys: Vec<&str> = config.keys().take(3).map(String::as_str).collect();
        assert_eq!(
            first_keys,
            ["publicVersion", "runOnBranchBuilds", "serverDeployment"]
        );
    }

    #[test]
    fn test_deployment_and_environment_grants() {
        let deployment_grants = deployment_permissions().unwrap();
        assert_eq!(deployment_grants.grants[0].permissions.len(), 3);

        let environment_grants = environment_permissions().unwrap();
        assert_eq!(environment_grants.environment_name, "Marketplace");
        assert_eq!(environment_grants.grants[0].permissions.len(), 4);
        assert!(
            environment_grants.grants[0]
                .permissions
                .contains(&PermissionKind::Build)
        );
    }
}
