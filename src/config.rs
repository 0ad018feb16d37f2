use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{DocPublishError, Result};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "docpublish.toml";

/// Represents the complete configuration for publish-docs.
///
/// Contains the release branch layout, the documentation build invocation and
/// the object-store destinations. Every field has a default matching the
/// Zephyr tree, so an absent file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

fn default_upstream_remote() -> String {
    "upstream".to_string()
}

fn default_release_branch() -> String {
    "v{release}-branch".to_string()
}

fn default_temp_branch_prefix() -> String {
    "docs-".to_string()
}

/// Where release branches live and how the throwaway local branch is named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_upstream_remote")]
    pub upstream_remote: String,

    /// Branch name pattern; `{release}` is replaced by the release identifier
    #[serde(default = "default_release_branch")]
    pub release_branch: String,

    #[serde(default = "default_temp_branch_prefix")]
    pub temp_branch_prefix: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            upstream_remote: default_upstream_remote(),
            release_branch: default_release_branch(),
            temp_branch_prefix: default_temp_branch_prefix(),
        }
    }
}

fn default_env_script() -> String {
    "zephyr-env.sh".to_string()
}

fn default_build_program() -> String {
    "make".to_string()
}

fn default_build_target() -> String {
    "htmldocs".to_string()
}

fn default_tag_variable() -> String {
    "DOC_TAG".to_string()
}

fn default_board_dir_selector() -> String {
    "boards/*/*/".to_string()
}

fn default_arch_selector() -> String {
    "*".to_string()
}

fn default_html_dir() -> String {
    "doc/_build/html".to_string()
}

fn default_api_dir() -> String {
    "doc/_build/doxygen/html".to_string()
}

fn default_warnings_file() -> String {
    "doc.warnings".to_string()
}

/// Configuration of the documentation build.
///
/// Paths are relative to the working directory the publisher operates in.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_env_script")]
    pub env_script: String,

    #[serde(default = "default_build_program")]
    pub program: String,

    #[serde(default = "default_build_target")]
    pub target: String,

    #[serde(default = "default_tag_variable")]
    pub tag_variable: String,

    #[serde(default = "default_board_dir_selector")]
    pub board_dir_selector: String,

    #[serde(default = "default_arch_selector")]
    pub arch_selector: String,

    #[serde(default = "default_html_dir")]
    pub html_dir: String,

    #[serde(default = "default_api_dir")]
    pub api_dir: String,

    #[serde(default = "default_warnings_file")]
    pub warnings_file: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            env_script: default_env_script(),
            program: default_build_program(),
            target: default_build_target(),
            tag_variable: default_tag_variable(),
            board_dir_selector: default_board_dir_selector(),
            arch_selector: default_arch_selector(),
            html_dir: default_html_dir(),
            api_dir: default_api_dir(),
            warnings_file: default_warnings_file(),
        }
    }
}

fn default_publish_program() -> String {
    "aws".to_string()
}

fn default_bucket() -> String {
    "s3://docs.zephyrproject.org".to_string()
}

fn default_latest() -> String {
    "latest".to_string()
}

fn default_api_prefix() -> String {
    "apidoc".to_string()
}

fn default_quiet() -> bool {
    true
}

/// Configuration of the object-store upload.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_publish_program")]
    pub program: String,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Remote prefix for daily docs
    #[serde(default = "default_latest")]
    pub latest: String,

    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default = "default_quiet")]
    pub quiet: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            program: default_publish_program(),
            bucket: default_bucket(),
            latest: default_latest(),
            api_prefix: default_api_prefix(),
            quiet: default_quiet(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `docpublish.toml` in the working directory
/// 3. `.docpublish.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, workspace: &Path) -> Result<Config> {
    let local = workspace.join(CONFIG_FILE_NAME);

    let source = if let Some(path) = config_path {
        path.to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user.exists() {
            user
        } else {
            tracing::debug!("No configuration file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let contents = fs::read_to_string(&source).map_err(|e| {
        DocPublishError::config(format!("Cannot read {}: {}", source.display(), e))
    })?;
    let config: Config = toml::from_str(&contents).map_err(|e| {
        DocPublishError::config(format!("Cannot parse {}: {}", source.display(), e))
    })?;

    tracing::debug!("Loaded configuration from {}", source.display());
    Ok(config)
}
