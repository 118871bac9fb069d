//! Deployment definitions
//!
//! A deployment project consumes the shared artifacts of a source build plan
//! and ships them through one or more environments.

use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanIdentifier;
use crate::domain::task::Task;
use crate::error::ValidationError;
use crate::ident::Oid;

/// Release naming scheme for a deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNaming {
    pub template: String,
    pub auto_increment: bool,
}

impl ReleaseNaming {
    pub fn new(template: impl Into<String>) -> Result<Self, ValidationError> {
        let template = template.into();
        if template.is_empty() {
            return Err(ValidationError::Empty {
                field: "release naming template",
            });
        }
        Ok(Self {
            template,
            auto_increment: false,
        })
    }

    /// Bump the trailing number of the template for each new release
    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = auto_increment;
        self
    }
}

/// Named deployment target executing its own task sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "environment name",
            });
        }
        Ok(Self {
            name,
            tasks: Vec::new(),
        })
    }

    /// Append a task; tasks execute in the order they are added
    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::Empty {
                field: "environment name",
            });
        }
        for task in &self.tasks {
            task.validate()?;
        }
        Ok(())
    }
}

/// Deployment project fed by a source build plan
///
/// Identity is the deployment name. The source plan is referenced by its
/// identity and must exist server-side when the deployment is published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(rename = "sourcePlanIdentity")]
    pub source_plan: PlanIdentifier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<Oid>,
    #[serde(rename = "deploymentName")]
    pub name: String,
    pub release_naming: ReleaseNaming,
    pub environments: Vec<Environment>,
}

impl Deployment {
    pub fn new(
        source_plan: PlanIdentifier,
        name: impl Into<String>,
        release_naming: ReleaseNaming,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "deployment name",
            });
        }
        Ok(Self {
            source_plan,
            oid: None,
            name,
            release_naming,
            environments: Vec::new(),
        })
    }

    /// Pin the deployment to its server-stable object id
    pub fn oid(mut self, oid: Oid) -> Self {
        self.oid = Some(oid);
        self
    }

    /// Append an environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environments.push(environment);
        self
    }

    /// Check the whole tree for local well-formedness
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::Empty {
                field: "deployment name",
            });
        }
        if self.release_naming.template.is_empty() {
            return Err(ValidationError::Empty {
                field: "release naming template",
            });
        }
        for environment in &self.environments {
            environment.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::DownloadItem;
    use crate::ident::Key;

    fn deploy_myapp() -> Deployment {
        let source = PlanIdentifier::new(Key::new("MYAP").unwrap(), Key::new("BUIL").unwrap())
            .oid(Oid::new("rnbjakcftog1").unwrap());
        let marketplace = Environment::new("Marketplace")
            .unwrap()
            .task(Task::clean_working_directory())
            .task(
                Task::artifact_download(vec![DownloadItem::artifact("MyApp").unwrap()])
                    .described("Download release contents"),
            )
            .task(
                Task::generic_plugin("vendor:publish.task", [("publicVersion", "true")])
                    .unwrap()
                    .described("Ship my App"),
            );
        Deployment::new(
            source,
            "DeployMyApp",
            ReleaseNaming::new("release-1").unwrap().auto_increment(true),
        )
        .unwrap()
        .oid(Oid::new("rno0a1j5beo1").unwrap())
        .environment(marketplace)
    }

    #[test]
    fn test_environment_tasks_keep_their_order() {
        let deployment = deploy_myapp();
        assert_eq!(deployment.environments.len(), 1);

        let tasks = &deployment.environments[0].tasks;
        assert_eq!(tasks.len(), 3);
        assert!(matches!(tasks[0], Task::CleanWorkingDirectory));
        assert!(matches!(tasks[1], Task::ArtifactDownload { .. }));
        assert!(matches!(tasks[2], Task::GenericPlugin { .. }));
    }

    #[test]
    fn test_deployment_wire_shape() {
        let value = serde_json::to_value(deploy_myapp()).unwrap();
        assert_eq!(value["deploymentName"], "DeployMyApp");
        assert_eq!(value["oid"], "rno0a1j5beo1");
        assert_eq!(value["sourcePlanIdentity"]["projectKey"], "MYAP");
        assert_eq!(value["sourcePlanIdentity"]["planKey"], "BUIL");
        assert_eq!(value["sourcePlanIdentity"]["oid"], "rnbjakcftog1");
        assert_eq!(value["releaseNaming"]["template"], "release-1");
        assert_eq!(value["releaseNaming"]["autoIncrement"], true);
        assert_eq!(value["environments"][0]["name"], "Marketplace");
    }

    #[test]
    fn test_empty_identities_rejected() {
        let source = PlanIdentifier::new(Key::new("MYAP").unwrap(), Key::new("BUIL").unwrap());
        assert!(
            Deployment::new(
                source.clone(),
                "",
                ReleaseNaming::new("release-1").unwrap()
            )
            .is_err()
        );
        assert!(ReleaseNaming::new("").is_err());
        assert!(Environment::new("").is_err());
    }

    #[test]
    fn test_validate_walks_environments() {
        let mut deployment = deploy_myapp();
        assert!(deployment.validate().is_ok());

        deployment.environments[0].name = String::new();
        assert!(deployment.validate().is_err());
    }
}
