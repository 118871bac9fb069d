//! Task union
//!
//! A task is one executable step inside a build job or a deployment
//! environment. The `type` tag on the wire selects the variant the server
//! executes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Single executable step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Task {
    /// Inline shell script
    #[serde(rename_all = "camelCase")]
    Script {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        inline_body: String,
    },
    /// Wipe the working directory before anything else runs
    CleanWorkingDirectory,
    /// Fetch shared artifacts produced by the source plan
    #[serde(rename_all = "camelCase")]
    ArtifactDownload {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        artifacts: Vec<DownloadItem>,
    },
    /// Named server-side plugin task with free-form configuration
    ///
    /// The config map is interpreted entirely by the remote plugin: option
    /// names are passed through verbatim and insertion order is preserved.
    #[serde(rename_all = "camelCase")]
    GenericPlugin {
        module_key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        config: IndexMap<String, String>,
    },
}

impl Task {
    /// Inline script task
    pub fn script(inline_body: impl Into<String>) -> Result<Self, ValidationError> {
        let inline_body = inline_body.into();
        if inline_body.is_empty() {
            return Err(ValidationError::Empty {
                field: "script body",
            });
        }
        Ok(Self::Script {
            description: None,
            inline_body,
        })
    }

    /// Working-directory cleanup task
    pub fn clean_working_directory() -> Self {
        Self::CleanWorkingDirectory
    }

    /// Artifact download task fetching the given items
    pub fn artifact_download(artifacts: Vec<DownloadItem>) -> Self {
        Self::ArtifactDownload {
            description: None,
            artifacts,
        }
    }

    /// Plugin task addressed by its module key
    ///
    /// Config entries keep the order they are given in.
    pub fn generic_plugin<K, V, I>(
        module_key: impl Into<String>,
        config: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let module_key = module_key.into();
        if module_key.is_empty() {
            return Err(ValidationError::Empty {
                field: "plugin module key",
            });
        }
        Ok(Self::GenericPlugin {
            module_key,
            description: None,
            config: config
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        })
    }

    /// Attach a human-readable description
    ///
    /// `CleanWorkingDirectory` carries none and ignores this.
    pub fn described(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            Self::Script { description, .. }
            | Self::ArtifactDownload { description, .. }
            | Self::GenericPlugin { description, .. } => *description = Some(text.into()),
            Self::CleanWorkingDirectory => {}
        }
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Script { inline_body, .. } => {
                if inline_body.is_empty() {
                    return Err(ValidationError::Empty {
                        field: "script body",
                    });
                }
            }
            Self::CleanWorkingDirectory => {}
            Self::ArtifactDownload { artifacts, .. } => {
                for item in artifacts {
                    item.validate()?;
                }
            }
            Self::GenericPlugin { module_key, .. } => {
                if module_key.is_empty() {
                    return Err(ValidationError::Empty {
                        field: "plugin module key",
                    });
                }
            }
        }
        Ok(())
    }
}

/// Reference to a shared artifact by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadItem {
    pub artifact_name: String,
}

impl DownloadItem {
    pub fn artifact(name: impl Into<String>) -> Result<Self, ValidationError> {
        let artifact_name = name.into();
        if artifact_name.is_empty() {
            return Err(ValidationError::Empty {
                field: "artifact name",
            });
        }
        Ok(Self { artifact_name })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.artifact_name.is_empty() {
            return Err(ValidationError::Empty {
                field: "artifact name",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_task_wire_shape() {
        let task = Task::script("touch my-app.jar")
            .unwrap()
            .described("Build app artifact");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "script");
        assert_eq!(value["description"], "Build app artifact");
        assert_eq!(value["inlineBody"], "touch my-app.jar");
    }

    #[test]
    fn test_clean_task_wire_shape() {
        let value = serde_json::to_value(Task::clean_working_directory()).unwrap();
        assert_eq!(value["type"], "cleanWorkingDirectory");
    }

    #[test]
    fn test_artifact_download_wire_shape() {
        let task = Task::artifact_download(vec![DownloadItem::artifact("MyApp").unwrap()])
            .described("Download release contents");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "artifactDownload");
        assert_eq!(value["artifacts"][0]["artifactName"], "MyApp");
    }

    #[test]
    fn test_plugin_task_wire_shape() {
        let task = Task::generic_plugin("vendor:module", [("publicVersion", "true")]).unwrap();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "genericPlugin");
        assert_eq!(value["moduleKey"], "vendor:module");
        assert_eq!(value["config"]["publicVersion"], "true");
    }

    #[test]
    fn test_plugin_config_preserves_insertion_order() {
        let task = Task::generic_plugin(
            "vendor:module",
            [("zulu", "1"), ("alpha", "2"), ("mike", "3")],
        )
        .unwrap();

        let Task::GenericPlugin { config, .. } = &task else {
            panic!("expected plugin task");
        };
        let keys: Vec<&str> = config.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zulu", "alpha", "mike"]);

        // Serialized output keeps the same order, not alphabetical.
        let json = serde_json::to_string(&task).unwrap();
        let zulu = json.find("zulu").unwrap();
        let alpha = json.find("alpha").unwrap();
        let mike = json.find("mike").unwrap();
        assert!(zulu < alpha && alpha < mike);
    }

    #[test]
    fn test_described_is_noop_for_clean_task() {
        let task = Task::clean_working_directory().described("ignored");
        assert_eq!(task, Task::CleanWorkingDirectory);
    }

    #[test]
    fn test_empty_script_body_rejected() {
        assert!(Task::script("").is_err());
    }

    #[test]
    fn test_empty_module_key_rejected() {
        assert!(Task::generic_plugin("", [("a", "b")]).is_err());
    }

    #[test]
    fn test_validate_catches_blank_download_item() {
        let task = Task::ArtifactDownload {
            description: None,
            artifacts: vec![DownloadItem {
                artifact_name: String::new(),
            }],
        };
        assert!(task.validate().is_err());
    }
}
