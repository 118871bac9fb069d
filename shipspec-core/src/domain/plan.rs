//! Build plan definitions
//!
//! A plan belongs to a project and owns its stages; stages own jobs; jobs
//! own tasks and artifact declarations. The whole tree is sent wholesale on
//! publish and reconciled server-side by identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::task::Task;
use crate::error::ValidationError;
use crate::ident::{Key, Oid};

/// Project a plan belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<Oid>,
    pub key: Key,
    pub name: String,
}

impl Project {
    pub fn new(key: Key, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "project name",
            });
        }
        Ok(Self {
            oid: None,
            key,
            name,
        })
    }

    /// Pin the project to its server-stable object id
    pub fn oid(mut self, oid: Oid) -> Self {
        self.oid = Some(oid);
        self
    }
}

/// Project and plan key pair addressing a plan on the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanIdentifier {
    pub project_key: Key,
    pub plan_key: Key,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<Oid>,
}

impl PlanIdentifier {
    pub fn new(project_key: Key, plan_key: Key) -> Self {
        Self {
            project_key,
            plan_key,
            oid: None,
        }
    }

    pub fn oid(mut self, oid: Oid) -> Self {
        self.oid = Some(oid);
        self
    }

    /// `PROJECT-PLAN` form used in permission targets and publish URLs
    pub fn identity(&self) -> String {
        format!("{}-{}", self.project_key, self.plan_key)
    }
}

impl fmt::Display for PlanIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.project_key, self.plan_key)
    }
}

/// Build plan definition
///
/// Identity is the project key plus the plan key; everything else is
/// overwritten in place when the plan is republished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub project: Project,
    #[serde(rename = "planKey")]
    pub key: Key,
    #[serde(rename = "planName")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<Oid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub concurrent_builds_allowed: bool,
    pub stages: Vec<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_management: Option<BranchManagement>,
}

impl Plan {
    pub fn new(
        project: Project,
        name: impl Into<String>,
        key: Key,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "plan name" });
        }
        Ok(Self {
            project,
            key,
            name,
            oid: None,
            description: None,
            concurrent_builds_allowed: false,
            stages: Vec::new(),
            branch_management: None,
        })
    }

    /// Pin the plan to its server-stable object id
    pub fn oid(mut self, oid: Oid) -> Self {
        self.oid = Some(oid);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Allow builds of this plan to run concurrently
    pub fn concurrent_builds(mut self, allowed: bool) -> Self {
        self.concurrent_builds_allowed = allowed;
        self
    }

    /// Append a stage; stages execute in the order they are added
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn branch_management(mut self, branch_management: BranchManagement) -> Self {
        self.branch_management = Some(branch_management);
        self
    }

    /// Identity used to address this plan on the server
    pub fn identifier(&self) -> PlanIdentifier {
        PlanIdentifier::new(self.project.key.clone(), self.key.clone())
    }

    /// Check the whole tree for local well-formedness
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project.name.is_empty() {
            return Err(ValidationError::Empty {
                field: "project name",
            });
        }
        if self.name.is_empty() {
            return Err(ValidationError::Empty { field: "plan name" });
        }
        for stage in &self.stages {
            stage.validate()?;
        }
        Ok(())
    }
}

/// Ordered phase of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub jobs: Vec<Job>,
}

impl Stage {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "stage name",
            });
        }
        Ok(Self {
            name,
            jobs: Vec::new(),
        })
    }

    /// Append a job to this stage
    pub fn job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::Empty {
                field: "stage name",
            });
        }
        for job in &self.jobs {
            job.validate()?;
        }
        Ok(())
    }
}

/// Unit of work within a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub name: String,
    pub key: Key,
    pub artifacts: Vec<Artifact>,
    pub tasks: Vec<Task>,
}

impl Job {
    pub fn new(name: impl Into<String>, key: Key) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "job name" });
        }
        Ok(Self {
            name,
            key,
            artifacts: Vec::new(),
            tasks: Vec::new(),
        })
    }

    /// Declare a build output this job retains
    pub fn artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Append a task; tasks execute in the order they are added
    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::Empty { field: "job name" });
        }
        for artifact in &self.artifacts {
            artifact.validate()?;
        }
        for task in &self.tasks {
            task.validate()?;
        }
        Ok(())
    }
}

/// Declared build output retained after a job completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub name: String,
    pub copy_pattern: String,
    pub shared: bool,
    pub required: bool,
}

impl Artifact {
    pub fn new(
        name: impl Into<String>,
        copy_pattern: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "artifact name",
            });
        }
        let copy_pattern = copy_pattern.into();
        if copy_pattern.is_empty() {
            return Err(ValidationError::Empty {
                field: "artifact copy pattern",
            });
        }
        Ok(Self {
            name,
            copy_pattern,
            shared: false,
            required: false,
        })
    }

    /// Make the artifact downloadable from other plans and deployments
    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Fail the job if the pattern matches nothing
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::Empty {
                field: "artifact name",
            });
        }
        if self.copy_pattern.is_empty() {
            return Err(ValidationError::Empty {
                field: "artifact copy pattern",
            });
        }
        Ok(())
    }
}

/// Cleanup policy for plan branches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchManagement {
    pub delete_inactive_branches: bool,
    pub notify_committers: bool,
}

impl BranchManagement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_inactive_branches(mut self, delete: bool) -> Self {
        self.delete_inactive_branches = delete;
        self
    }

    pub fn notify_committers(mut self, notify: bool) -> Self {
        self.notify_committers = notify;
        self
    }
}
