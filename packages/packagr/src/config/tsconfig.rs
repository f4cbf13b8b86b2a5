// Compiler Configuration
//
// The bundled tsconfig document merged with package-specific overrides.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::Value;

use crate::transformers::api::{CompilerOptions, EmitFlags};

use super::descriptor::PackageDescriptor;
use super::ConfigError;

/// Default configuration shipped with the packager.
const BUNDLED_TSCONFIG: &str = include_str!("../../conf/tsconfig.ngc.json");

/// Directory under the base path receiving compiler output.
pub const BUILD_DIR: &str = ".ng_pkg_build";

/// String literals are matched first so comment markers inside them survive.
static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"("(?:\\.|[^"\\])*")|//[^\n]*|/\*(?s:.*?)\*/"#).unwrap());

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfigDocument {
    #[serde(default)]
    files: Vec<String>,
    #[serde(default)]
    compiler_options: IndexMap<String, Value>,
    #[serde(default)]
    angular_compiler_options: IndexMap<String, Value>,
}

/// Read-only after preparation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilerConfiguration {
    pub root_names: Vec<PathBuf>,
    pub options: CompilerOptions,
    pub emit_flags: EmitFlags,
}

impl CompilerConfiguration {
    /// The configuration document bundled with the packager.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(BUNDLED_TSCONFIG)
    }

    /// Parse a tsconfig document. `//` and `/* */` comments are allowed.
    ///
    /// `compilerOptions` and `angularCompilerOptions` are merged into one option set;
    /// the latter wins on conflicting keys.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let document: TsConfigDocument = serde_json::from_str(&strip_json_comments(json))?;

        let mut options = CompilerOptions::default();
        for (key, value) in document
            .compiler_options
            .into_iter()
            .chain(document.angular_compiler_options)
        {
            apply_option(&mut options, key, value);
        }

        let mut emit_flags = EmitFlags::DEFAULT;
        if !options.declaration {
            emit_flags.remove(EmitFlags::DTS);
        }

        Ok(Self {
            root_names: document.files.into_iter().map(PathBuf::from).collect(),
            options,
            emit_flags,
        })
    }

    /// `outDir/flatModuleOutFile`, resolved against the base path.
    pub fn flat_module_out_path(&self) -> PathBuf {
        let base = self.options.base_path.clone().unwrap_or_default();
        let out_dir = self
            .options
            .out_dir
            .as_ref()
            .map(|dir| base.join(dir))
            .unwrap_or(base);
        match &self.options.flat_module_out_file {
            Some(file) => out_dir.join(file),
            None => out_dir,
        }
    }
}

fn apply_option(options: &mut CompilerOptions, key: String, value: Value) {
    let as_path = |v: &Value| v.as_str().map(PathBuf::from);
    let as_string = |v: &Value| v.as_str().map(String::from);
    let as_bool = |v: &Value| v.as_bool().unwrap_or(false);

    match key.as_str() {
        "baseUrl" => options.base_url = as_path(&value),
        "basePath" => options.base_path = as_path(&value),
        "outDir" => options.out_dir = as_path(&value),
        "genDir" => options.gen_dir = as_path(&value),
        "flatModuleId" => options.flat_module_id = as_string(&value),
        "flatModuleOutFile" => options.flat_module_out_file = as_string(&value),
        "declaration" => options.declaration = as_bool(&value),
        "sourceMap" => options.source_map = as_bool(&value),
        "skipTemplateCodegen" => options.skip_template_codegen = as_bool(&value),
        "strictMetadataEmit" => options.strict_metadata_emit = as_bool(&value),
        _ => {
            options.extra.insert(key, value);
        }
    }
}

/// Bundled defaults with the package's entry file, flat module and output directories.
pub fn prepare_configuration(
    descriptor: &PackageDescriptor,
    base_path: &Path,
) -> Result<CompilerConfiguration, ConfigError> {
    descriptor.validate()?;
    let mut config = CompilerConfiguration::bundled()?;

    config.root_names = vec![base_path.join(&descriptor.entry_file)];
    config.options.flat_module_id = Some(descriptor.full_package_name.clone());
    config.options.flat_module_out_file = Some(format!("{}.js", descriptor.flat_module_file_name));
    config.options.base_path = Some(base_path.to_path_buf());
    config.options.base_url = Some(base_path.to_path_buf());
    config.options.out_dir = Some(base_path.join(BUILD_DIR));
    config.options.gen_dir = Some(base_path.join(BUILD_DIR));

    Ok(config)
}

/// Remove `//` and `/* */` comments outside string literals.
pub fn strip_json_comments(input: &str) -> String {
    COMMENT_RE
        .replace_all(input, |caps: &Captures| {
            caps.get(1)
                .map(|s| s.as_str().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}
