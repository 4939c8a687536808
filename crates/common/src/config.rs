//! Persisted provider configuration
//!
//! The configuration file records which probed resources become provider
//! resources or data sources, and binds each of their actions to an exact
//! path and method. It is produced by `init`, edited by hand, and consumed
//! by `generate`.

use crate::{ActionBinding, Binding, GeneratorError, Pseudonym, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "rpg.yaml";

/// Root structure of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Path to the OpenAPI document, relative to the configuration file
    #[serde(rename = "specfile")]
    pub spec_file: String,
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Configured resources keyed by resource name
    #[serde(default)]
    pub output: BTreeMap<String, OutputResource>,
}

/// Provider identification
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// `<namespace>/<name>`, e.g. "example/widgets"
    #[serde(default)]
    pub name: String,
    /// Registry hostname
    #[serde(default)]
    pub registry: String,
    /// Repository of the generated provider module
    #[serde(default)]
    pub repository: String,
    /// Package name for generated code
    #[serde(default)]
    pub package_name: String,
}

/// Kind of provider entity a resource becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TfType {
    Resource,
    DataSource,
}

/// One configured resource or data source
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputResource {
    pub tf_type_name: String,
    pub tf_type: TfType,
    /// Content media type; resolved from the document when left blank
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub binding: BindingInfo,
}

/// Per-action path/method bindings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BindingInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<ActionBinding>,
    /// Binds the show action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<ActionBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<ActionBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<ActionBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<ActionBinding>,
}

impl BindingInfo {
    fn get(&self, pseudonym: Pseudonym) -> Option<&ActionBinding> {
        match pseudonym {
            Pseudonym::Create => self.create.as_ref(),
            Pseudonym::Show => self.read.as_ref(),
            Pseudonym::Update => self.update.as_ref(),
            Pseudonym::Delete => self.delete.as_ref(),
            Pseudonym::Index => self.index.as_ref(),
        }
    }

    /// Set the binding for a pseudonym
    pub fn set(&mut self, pseudonym: Pseudonym, binding: ActionBinding) {
        let slot = match pseudonym {
            Pseudonym::Create => &mut self.create,
            Pseudonym::Show => &mut self.read,
            Pseudonym::Update => &mut self.update,
            Pseudonym::Delete => &mut self.delete,
            Pseudonym::Index => &mut self.index,
        };
        *slot = Some(binding);
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::InvalidConfig(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            GeneratorError::InvalidConfig(format!(
                "Failed to parse config YAML from {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write configuration to a YAML file
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Location of the OpenAPI document for a config loaded from `config_path`
    pub fn spec_path(&self, config_path: &Path) -> PathBuf {
        let spec = Path::new(&self.spec_file);
        if spec.is_absolute() {
            return spec.to_path_buf();
        }
        match config_path.parent() {
            Some(dir) => dir.join(spec),
            None => spec.to_path_buf(),
        }
    }

    /// Validate the configured bindings and convert them, sorted by resource key
    pub fn as_bindings(&self) -> Result<Vec<Binding>> {
        let mut result = Vec::with_capacity(self.output.len());

        for (key, resource) in &self.output {
            let pseudonyms: &[Pseudonym] = match resource.tf_type {
                TfType::Resource => {
                    for pseudonym in [
                        Pseudonym::Create,
                        Pseudonym::Show,
                        Pseudonym::Update,
                        Pseudonym::Delete,
                    ] {
                        ensure_binding(key, pseudonym, resource.binding.get(pseudonym))?;
                    }
                    &[
                        Pseudonym::Create,
                        Pseudonym::Show,
                        Pseudonym::Update,
                        Pseudonym::Delete,
                        Pseudonym::Index,
                    ]
                }
                TfType::DataSource => {
                    match (&resource.binding.read, &resource.binding.index) {
                        (None, None) => {
                            return Err(GeneratorError::InvalidConfig(format!(
                                "resource {} is a data source but needs either a read or index binding",
                                key
                            )))
                        }
                        (Some(_), Some(_)) => {
                            return Err(GeneratorError::InvalidConfig(format!(
                                "resource {} is a data source but needs either a read or index binding (not both)",
                                key
                            )))
                        }
                        (Some(read), None) => ensure_binding(key, Pseudonym::Show, Some(read))?,
                        (None, Some(index)) => {
                            ensure_binding(key, Pseudonym::Index, Some(index))?
                        }
                    }
                    &[Pseudonym::Show, Pseudonym::Index]
                }
            };

            let mut binding = Binding::new(key.clone());
            for &pseudonym in pseudonyms {
                if let Some(action) = resource.binding.get(pseudonym) {
                    binding.actions.insert(pseudonym, action.clone());
                }
            }
            result.push(binding);
        }

        Ok(result)
    }
}

fn ensure_binding(key: &str, pseudonym: Pseudonym, binding: Option<&ActionBinding>) -> Result<()> {
    match binding {
        Some(b) if !b.path.is_empty() && !b.method.is_empty() => Ok(()),
        _ => Err(GeneratorError::InvalidConfig(format!(
            "resource {}, action {} is missing a binding",
            key, pseudonym
        ))),
    }
}

impl ProviderConfig {
    /// Namespace part of `name`
    pub fn namespace(&self) -> Result<&str> {
        self.split_name().map(|(namespace, _)| namespace)
    }

    /// Short name part of `name`
    pub fn short_name(&self) -> Result<&str> {
        self.split_name().map(|(_, name)| name)
    }

    fn split_name(&self) -> Result<(&str, &str)> {
        let mut parts = self.name.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some(name), None) if !namespace.is_empty() && !name.is_empty() => {
                Ok((namespace, name))
            }
            _ => Err(GeneratorError::InvalidConfig(format!(
                "invalid provider name \"{}\": expected <namespace>/<name>",
                self.name
            ))),
        }
    }
}
