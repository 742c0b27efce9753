use flowmaster_editor::{EditorOptions, DEFAULT_JSON_FILE_NAME, DEFAULT_XML_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "flowmaster.config.json";

/// FlowMaster configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory exports are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_json_file_name")]
    pub json_file_name: String,

    #[serde(default = "default_xml_file_name")]
    pub xml_file_name: String,

    /// Maximum undo steps kept while replaying (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Name generated edge ids are seeded from
    #[serde(default = "default_id_seed")]
    pub id_seed: String,
}

fn default_out_dir() -> String {
    ".".to_string()
}

fn default_json_file_name() -> String {
    DEFAULT_JSON_FILE_NAME.to_string()
}

fn default_xml_file_name() -> String {
    DEFAULT_XML_FILE_NAME.to_string()
}

fn default_id_seed() -> String {
    EditorOptions::default().id_seed
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Output directory, with an optional command-line override
    pub fn get_out_dir(&self, cwd: &Path, override_dir: Option<&str>) -> PathBuf {
        cwd.join(override_dir.unwrap_or(&self.out_dir))
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            history_limit: self.history_limit,
            id_seed: self.id_seed.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            json_file_name: default_json_file_name(),
            xml_file_name: default_xml_file_name(),
            history_limit: 0,
            id_seed: default_id_seed(),
        }
    }
}
