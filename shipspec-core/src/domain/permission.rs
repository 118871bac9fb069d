//! Permission grants
//!
//! A grant associates a subject (a named user, all logged-in users, or
//! anonymous visitors) with an exact set of permission kinds on a plan, a
//! deployment, or one of its environments. Grants reference their target by
//! identity; the server resolves the reference at publish time.

use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanIdentifier;
use crate::error::ValidationError;

/// Action a subject may perform on the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionKind {
    View,
    Edit,
    Build,
    Clone,
    Admin,
    ViewConfiguration,
}

/// Class of subject a grant applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubjectKind {
    User,
    LoggedIn,
    Anonymous,
}

/// One subject and the exact set of kinds granted to it
///
/// The kind set is deduplicated on construction, keeping first-seen order;
/// nothing is implied beyond the kinds listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub subject: SubjectKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    pub permissions: Vec<PermissionKind>,
}

impl Grant {
    /// Grant to a named user
    pub fn user(
        name: impl Into<String>,
        kinds: impl IntoIterator<Item = PermissionKind>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "user name" });
        }
        Ok(Self {
            subject: SubjectKind::User,
            subject_name: Some(name),
            permissions: dedup(kinds),
        })
    }

    /// Grant to every logged-in user
    pub fn logged_in(kinds: impl IntoIterator<Item = PermissionKind>) -> Self {
        Self {
            subject: SubjectKind::LoggedIn,
            subject_name: None,
            permissions: dedup(kinds),
        }
    }

    /// Grant to anonymous visitors
    pub fn anonymous(kinds: impl IntoIterator<Item = PermissionKind>) -> Self {
        Self {
            subject: SubjectKind::Anonymous,
            subject_name: None,
            permissions: dedup(kinds),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subject == SubjectKind::User
            && self.subject_name.as_deref().unwrap_or_default().is_empty()
        {
            return Err(ValidationError::Empty { field: "user name" });
        }
        if self.permissions.is_empty() {
            return Err(ValidationError::EmptyGrant {
                subject: self.subject_label(),
            });
        }
        Ok(())
    }

    fn subject_label(&self) -> String {
        match (&self.subject, &self.subject_name) {
            (SubjectKind::User, Some(name)) => format!("user {name}"),
            (SubjectKind::User, None) => "user".to_string(),
            (SubjectKind::LoggedIn, _) => "logged-in users".to_string(),
            (SubjectKind::Anonymous, _) => "anonymous users".to_string(),
        }
    }
}

fn dedup(kinds: impl IntoIterator<Item = PermissionKind>) -> Vec<PermissionKind> {
    let mut out = Vec::new();
    for kind in kinds {
        if !out.contains(&kind) {
            out.push(kind);
        }
    }
    out
}

/// Permission set for a build plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPermissions {
    /// `PROJECT-PLAN` identity of the plan the grants apply to
    pub target_identity: String,
    pub grants: Vec<Grant>,
}

impl PlanPermissions {
    pub fn new(plan: &PlanIdentifier) -> Self {
        Self {
            target_identity: plan.identity(),
            grants: Vec::new(),
        }
    }

    pub fn grant(mut self, grant: Grant) -> Self {
        self.grants.push(grant);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.target_identity.is_empty() {
            return Err(ValidationError::Empty {
                field: "target identity",
            });
        }
        for grant in &self.grants {
            grant.validate()?;
        }
        Ok(())
    }
}

/// Permission set for a deployment project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPermissions {
    /// Name of the deployment the grants apply to
    pub target_identity: String,
    pub grants: Vec<Grant>,
}

impl DeploymentPermissions {
    pub fn new(deployment_name: impl Into<String>) -> Result<Self, ValidationError> {
        let target_identity = deployment_name.into();
        if target_identity.is_empty() {
            return Err(ValidationError::Empty {
                field: "deployment name",
            });
        }
        Ok(Self {
            target_identity,
            grants: Vec::new(),
        })
    }

    pub fn grant(mut self, grant: Grant) -> Self {
        self.grants.push(grant);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.target_identity.is_empty() {
            return Err(ValidationError::Empty {
                field: "deployment name",
            });
        }
        for grant in &self.grants {
            grant.validate()?;
        }
        Ok(())
    }
}

/// Permission set for a single environment of a deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentPermissions {
    /// Name of the deployment owning the environment
    pub target_identity: String,
    pub environment_name: String,
    pub grants: Vec<Grant>,
}

impl EnvironmentPermissions {
    pub fn new(
        deployment_name: impl Into<String>,
        environment_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let target_identity = deployment_name.into();
        if target_identity.is_empty() {
            return Err(ValidationError::Empty {
                field: "deployment name",
            });
        }
        let environment_name = environment_name.into();
        if environment_name.is_empty() {
            return Err(ValidationError::Empty {
                field: "environment name",
            });
        }
        Ok(Self {
            target_identity,
            environment_name,
            grants: Vec::new(),
        })
    }

    pub fn grant(mut self, grant: Grant) -> Self {
        self.grants.push(grant);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.target_identity.is_empty() {
            return Err(ValidationError::Empty {
                field: "deployment name",
            });
        }
        if self.environment_name.is_empty() {
            return Err(ValidationError::Empty {
                field: "environment name",
            });
        }
        for grant in &self.grants {
            grant.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::Key;

    fn myap_buil() -> PlanIdentifier {
        PlanIdentifier::new(Key::new("MYAP").unwrap(), Key::new("BUIL").unwrap())
    }

    #[test]
    fn test_admin_grant_is_exactly_the_kinds_given() {
        let grant = Grant::user(
            "admin",
            [
                PermissionKind::Edit,
                PermissionKind::ViewConfiguration,
                PermissionKind::View,
                PermissionKind::Admin,
                PermissionKind::Clone,
                PermissionKind::Build,
            ],
        )
        .unwrap();
        assert_eq!(grant.permissions.len(), 6);
        assert_eq!(grant.permissions[0], PermissionKind::Edit);
        assert_eq!(grant.permissions[5], PermissionKind::Build);
    }

    #[test]
    fn test_duplicate_kinds_collapse() {
        let grant = Grant::user(
            "admin",
            [
                PermissionKind::View,
                PermissionKind::View,
                PermissionKind::Edit,
                PermissionKind::View,
            ],
        )
        .unwrap();
        assert_eq!(
            grant.permissions,
            vec![PermissionKind::View, PermissionKind::Edit]
        );
    }

    #[test]
    fn test_grant_wire_shape() {
        let set = PlanPermissions::new(&myap_buil())
            .grant(Grant::user("admin", [PermissionKind::ViewConfiguration]).unwrap())
            .grant(Grant::logged_in([PermissionKind::View]))
            .grant(Grant::anonymous([PermissionKind::View]));

        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["targetIdentity"], "MYAP-BUIL");

        let grants = value["grants"].as_array().unwrap();
        assert_eq!(grants.len(), 3);
        assert_eq!(grants[0]["subject"], "user");
        assert_eq!(grants[0]["subjectName"], "admin");
        assert_eq!(grants[0]["permissions"][0], "viewConfiguration");
        assert_eq!(grants[1]["subject"], "loggedIn");
        assert!(grants[1].get("subjectName").is_none());
        assert_eq!(grants[2]["subject"], "anonymous");
        assert!(grants[2].get("subjectName").is_none());
    }

    #[test]
    fn test_environment_permissions_carry_both_names() {
        let set = EnvironmentPermissions::new("DeployMyApp", "Marketplace")
            .unwrap()
            .grant(Grant::user("admin", [PermissionKind::Build]).unwrap());
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["targetIdentity"], "DeployMyApp");
        assert_eq!(value["environmentName"], "Marketplace");
    }

    #[test]
    fn test_empty_subjects_and_targets_rejected() {
        assert!(Grant::user("", [PermissionKind::View]).is_err());
        assert!(DeploymentPermissions::new("").is_err());
        assert!(EnvironmentPermissions::new("DeployMyApp", "").is_err());
        assert!(EnvironmentPermissions::new("", "Marketplace").is_err());
    }

    #[test]
    fn test_kindless_grant_fails_validation() {
        let set = PlanPermissions::new(&myap_buil()).grant(Grant::logged_in([]));
        assert!(matches!(
            set.validate(),
            Err(ValidationError::EmptyGrant { .. })
        ));
    }
}
