use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AnneError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const CONFIG_ENV: &str = "ANNE_CONFIG";

/// Where the dataset lives and which fields the annotation screen works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub data_path: String,
    pub columns: ColumnPair,
    pub labels: ColumnPair,
    pub annotation_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnPair {
    pub left: String,
    pub right: String,
}

/// `config.yaml` in the working directory unless `ANNE_CONFIG` points elsewhere.
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load_config() -> Result<Config> {
    Config::load_from(config_path())
}

impl Config {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(AnneError::ConfigNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(err) => {
                return Err(AnneError::ConfigParse {
                    path: path.to_path_buf(),
                    message: format!("unreadable: {err}"),
                })
            }
        };
        Self::parse(path, &raw)
    }

    fn parse(path: &Path, raw: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(raw).map_err(|err| AnneError::ConfigParse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would make an annotation overwrite source text.
    pub fn validate(&self) -> Result<()> {
        if self.data_path.trim().is_empty() {
            return Err(AnneError::ConfigInvalid("dataPath is empty".to_string()));
        }
        for (key, value) in [
            ("columns.left", &self.columns.left),
            ("columns.right", &self.columns.right),
            ("annotationColumn", &self.annotation_column),
        ] {
            if value.is_empty() {
                return Err(AnneError::ConfigInvalid(format!("{key} is empty")));
            }
        }
        if self.annotation_column == self.columns.left
            || self.annotation_column == self.columns.right
        {
            return Err(AnneError::ConfigInvalid(format!(
                "annotationColumn {:?} collides with a content column",
                self.annotation_column
            )));
        }
        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
dataPath: data/pairs.jsonl
columns:
  left: input
  right: output
labels:
  left: Prompt
  right: Response
annotationColumn: label
";

    #[test]
    fn loads_yaml_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, SAMPLE).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_path(), Path::new("data/pairs.jsonl"));
        assert_eq!(config.columns.left, "input");
        assert_eq!(config.labels.right, "Response");
        assert_eq!(config.annotation_column, "label");
    }

    #[test]
    fn missing_file_is_config_not_found() {
        let dir = tempdir().unwrap();
        let err = Config::load_from(dir.path().join("config.yaml")).unwrap_err();
        assert!(matches!(err, AnneError::ConfigNotFound { .. }));
    }

    #[test]
    fn missing_key_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, SAMPLE.replace("annotationColumn: label\n", "")).unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AnneError::ConfigParse { .. }));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "dataPath: [unterminated\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert_eq!(err.kind(), "config_parse_error");
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, format!("{SAMPLE}extra: true\n")).unwrap();
        assert!(matches!(
            Config::load_from(&path).unwrap_err(),
            AnneError::ConfigParse { .. }
        ));
    }

    #[test]
    fn annotation_column_must_not_shadow_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, SAMPLE.replace("annotationColumn: label", "annotationColumn: output"))
            .unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, AnneError::ConfigInvalid(_)));
    }
}
