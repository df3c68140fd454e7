//! Generator settings

use crate::error::{CodegenError, CodegenResult};
use crate::shape::ShapeId;
use crate::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Target language profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[serde(alias = "c++")]
    Cpp,
    Python,
    #[serde(alias = "typescript", alias = "ts", alias = "js")]
    Javascript,
    Java,
}

impl Backend {
    pub const ALL: [Backend; 4] = [Backend::Cpp, Backend::Python, Backend::Javascript, Backend::Java];

    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Cpp => "cpp",
            Backend::Python => "python",
            Backend::Javascript => "javascript",
            Backend::Java => "java",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpp" | "c++" => Ok(Backend::Cpp),
            "python" | "py" => Ok(Backend::Python),
            "javascript" | "typescript" | "js" | "ts" => Ok(Backend::Javascript),
            "java" => Ok(Backend::Java),
            other => Err(CodegenError::SettingsError(format!(
                "unknown backend '{}'",
                other
            ))),
        }
    }
}

/// C++ output is split between headers and definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CppFileKind {
    Header,
    Source,
}

/// Settings bag for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorSettings {
    /// Absolute id of the service to generate
    #[serde(default)]
    pub service_shape_id: String,

    #[serde(default)]
    pub generate_client_stubs: bool,

    /// Recognized but unsupported; `validate` rejects `true`
    #[serde(default)]
    pub generate_server_stubs: bool,

    /// Missing operation input/output is fatal unless this is false
    #[serde(default = "default_require_operation_io")]
    pub require_operation_io: bool,

    /// Keep existing files instead of overwriting them
    #[serde(default)]
    pub no_clobber: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Base output directory; defaults to the service namespace as a path
    #[serde(default)]
    pub module_override_directory: Option<String>,

    #[serde(default = "default_source_subdirectory")]
    pub source_subdirectory: String,

    #[serde(default = "default_include_subdirectory")]
    pub include_subdirectory: String,

    #[serde(default = "default_java_base_package")]
    pub java_base_package: String,

    #[serde(default = "default_model_relative_package")]
    pub model_relative_package: String,

    #[serde(default = "default_backends")]
    pub backends: Vec<Backend>,

    /// Keys this crate does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_require_operation_io() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_source_subdirectory() -> String {
    "source".to_string()
}

fn default_include_subdirectory() -> String {
    "include/aws".to_string()
}

fn default_java_base_package() -> String {
    "software.amazon.awssdk.iot".to_string()
}

fn default_model_relative_package() -> String {
    "model".to_string()
}

fn default_backends() -> Vec<Backend> {
    Backend::ALL.to_vec()
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            service_shape_id: String::new(),
            generate_client_stubs: false,
            generate_server_stubs: false,
            require_operation_io: default_require_operation_io(),
            no_clobber: false,
            log_level: default_log_level(),
            module_override_directory: None,
            source_subdirectory: default_source_subdirectory(),
            include_subdirectory: default_include_subdirectory(),
            java_base_package: default_java_base_package(),
            model_relative_package: default_model_relative_package(),
            backends: default_backends(),
            extra: serde_json::Map::new(),
        }
    }
}

impl GeneratorSettings {
    /// Settings for a service with everything else defaulted
    pub fn new(service_shape_id: impl Into<String>) -> Self {
        Self {
            service_shape_id: service_shape_id.into(),
            ..Self::default()
        }
    }

    /// Parse settings from JSON bytes; empty input yields defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Parse settings from TOML
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load settings, choosing the format by file extension
    pub fn from_file(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CodegenError::Io(format!("failed to read settings {:?}: {}", path, e)))?;

        let settings = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content)?,
            _ => Self::from_json(content.as_bytes())
                .map_err(|e| CodegenError::SettingsError(e.to_string()))?,
        };
        Ok(settings)
    }

    /// Reject settings that cannot drive a run
    pub fn validate(&self) -> CodegenResult<()> {
        if self.service_shape_id.is_empty() {
            return Err(CodegenError::SettingsError(
                "serviceShapeId is required".to_string(),
            ));
        }
        self.service_id()?;

        if self.generate_server_stubs {
            return Err(CodegenError::NotImplemented(
                "server stub generation".to_string(),
            ));
        }

        if self.backends.is_empty() {
            return Err(CodegenError::SettingsError(
                "at least one backend must be selected".to_string(),
            ));
        }

        self.log_level()?;
        Ok(())
    }

    pub fn service_id(&self) -> CodegenResult<ShapeId> {
        ShapeId::parse(&self.service_shape_id)
    }

    pub fn log_level(&self) -> CodegenResult<LogLevel> {
        self.log_level.parse()
    }

    /// Get a typed value from the uninterpreted keys
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.extra
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Base directory: the override, or the namespace with dots as separators
    fn base_directory(&self, service: &ShapeId) -> String {
        self.module_override_directory
            .clone()
            .unwrap_or_else(|| namespace_to_path(service.namespace()))
    }

    /// Directory of the Python and TypeScript modules
    pub fn module_directory(&self, service: &ShapeId) -> PathBuf {
        let base = self.base_directory(service);
        let service_dir = service.name().to_lowercase();
        if base.is_empty() {
            PathBuf::from(service_dir)
        } else {
            Path::new(&base).join(service_dir)
        }
    }

    /// Directory of C++ headers or definitions
    pub fn cpp_directory(&self, service: &ShapeId, kind: CppFileKind) -> PathBuf {
        let sub = match kind {
            CppFileKind::Source => PathBuf::from(&self.source_subdirectory),
            CppFileKind::Header => Path::new(&self.include_subdirectory)
                .join(namespace_to_path(service.namespace())),
        };

        let base = self.base_directory(service);
        if base.is_empty() {
            sub
        } else {
            Path::new(&base).join(sub)
        }
    }

    /// Java package holding the service classes
    pub fn java_service_package(&self, service: &ShapeId) -> String {
        format!("{}.{}", self.java_base_package, service.namespace())
    }

    /// Java package holding the model classes
    pub fn java_model_package(&self, service: &ShapeId) -> String {
        format!(
            "{}.{}",
            self.java_service_package(service),
            self.model_relative_package
        )
    }
}

/// `a.b.c` becomes `a/b/c`
pub fn namespace_to_path(namespace: &str) -> String {
    namespace.replace('.', "/")
}

#[cfg(test)]
#[path = "settings/settings_tests.rs"]
mod settings_tests;

#[cfg(test)]
#[path = "settings/settings_parameterized_tests.rs"]
mod settings_parameterized_tests;
