use serde::Deserialize;

use super::ConfigError;

/// The package being built, as read from its package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    /// Entry file, relative to the package base path.
    pub entry_file: String,
    /// Module id consumers import the package by, e.g. `@my/lib`.
    pub full_package_name: String,
    /// Base name of the flat-module index, without extension.
    #[serde(default)]
    pub flat_module_file_name: String,
}

impl PackageDescriptor {
    /// Descriptor whose flat module is named after the last segment of the package name.
    pub fn new(entry_file: impl Into<String>, full_package_name: impl Into<String>) -> Self {
        let full_package_name = full_package_name.into();
        let flat_module_file_name = default_flat_module_file_name(&full_package_name);
        Self {
            entry_file: entry_file.into(),
            full_package_name,
            flat_module_file_name,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut descriptor: PackageDescriptor = serde_json::from_str(json)?;
        if descriptor.flat_module_file_name.is_empty() {
            descriptor.flat_module_file_name =
                default_flat_module_file_name(&descriptor.full_package_name);
        }
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entry_file.trim().is_empty() {
            return Err(ConfigError::InvalidDescriptor("entryFile is empty".to_string()));
        }
        if self.full_package_name.trim().is_empty() {
            return Err(ConfigError::InvalidDescriptor(
                "fullPackageName is empty".to_string(),
            ));
        }
        if self.flat_module_file_name.trim().is_empty() {
            return Err(ConfigError::InvalidDescriptor(
                "flatModuleFileName is empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_flat_module_file_name(full_package_name: &str) -> String {
    full_package_name
        .rsplit('/')
        .next()
        .unwrap_or(full_package_name)
        .to_string()
}
