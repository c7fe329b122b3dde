use crate::templates::REWRITE_SYSTEM_PROMPT;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Prompt settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PromptConfig {
    pub system_prompt: String,
    /// Custom template file, used instead of the built-in template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: REWRITE_SYSTEM_PROMPT.to_string(),
            template_path: None,
        }
    }
}

/// How question and context are prepared before rendering
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub trim: bool,
    pub allow_empty_context: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_context_chars: Option<usize>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            trim: true,
            allow_empty_context: true,
            max_context_chars: None,
        }
    }
}

/// Reply parsing settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    pub strip_code_fences: bool,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self { strip_code_fences: true }
    }
}

/// Main configuration struct
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub prompt: PromptConfig,
    pub input: InputConfig,
    pub response: ResponseConfig,
}

impl Config {
    /// Get the global config directory path
    pub fn global_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("qrw"))
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|d| d.join("qrw.yml"))
    }

    /// Get the local config directory path (relative to work_dir)
    pub fn local_config_dir(work_dir: &Path) -> PathBuf {
        work_dir.join(".qrw")
    }

    /// Get the local config file path (relative to work_dir)
    pub fn local_config_path(work_dir: &Path) -> PathBuf {
        Self::local_config_dir(work_dir).join("qrw.yml")
    }

    /// Load configuration with the cascade: explicit -> local -> global -> defaults
    pub fn load(work_dir: &Path, config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try local config first (.qrw/qrw.yml)
        let local_config = Self::local_config_path(work_dir);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try global config (~/.config/qrw/qrw.yml)
        if let Some(global_config) = Self::global_config_path()
            && global_config.exists()
        {
            match Self::load_from_file(&global_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", global_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load global config from ~/.config/qrw/qrw.yml
    pub fn load_global() -> Result<Self> {
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            return Self::load_from_file(&global_path);
        }
        Ok(Self::default())
    }

    /// Load configuration from a file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        fs::write(&path, content).context("Failed to write config file")?;
        log::info!("Saved config to: {}", path.as_ref().display());
        Ok(())
    }

    /// Save to the local config path (.qrw/qrw.yml)
    pub fn save_local(&self, work_dir: &Path) -> Result<()> {
        let local_path = Self::local_config_path(work_dir);
        self.save(&local_path)
    }

    /// Configured template file, relative paths resolved against work_dir
    pub fn template_path(&self, work_dir: &Path) -> Option<PathBuf> {
        self.prompt.template_path.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                work_dir.join(p)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.prompt.system_prompt, REWRITE_SYSTEM_PROMPT);
        assert!(config.prompt.template_path.is_none());
        assert!(config.input.trim);
        assert!(config.input.allow_empty_context);
        assert!(config.input.max_context_chars.is_none());
        assert!(config.response.strip_code_fences);
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("test-config.yml");

        let mut config = Config::default();
        config.input.max_context_chars = Some(2000);
        config.save(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.input.max_context_chars, Some(2000));
        assert_eq!(loaded.prompt.system_prompt, config.prompt.system_prompt);
    }

    #[test]
    fn test_load_from_yaml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("test-config.yml");

        let yaml = r#"
prompt:
  system_prompt: "Rewrite questions."
  template_path: "prompts/rewrite.md"

input:
  trim: false
  allow_empty_context: false
  max_context_chars: 500

response:
  strip_code_fences: false
"#;

        let mut file = fs::File::create(&config_path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.prompt.system_prompt, "Rewrite questions.");
        assert_eq!(config.prompt.template_path, Some(PathBuf::from("prompts/rewrite.md")));
        assert!(!config.input.trim);
        assert!(!config.input.allow_empty_context);
        assert_eq!(config.input.max_context_chars, Some(500));
        assert!(!config.response.strip_code_fences);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("partial.yml");
        fs::write(&config_path, "input:\n  max_context_chars: 10\n").unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.input.max_context_chars, Some(10));
        assert!(config.input.trim);
        assert!(config.response.strip_code_fences);
        assert_eq!(config.prompt.system_prompt, REWRITE_SYSTEM_PROMPT);
    }

    #[test]
    fn test_load_prefers_local_config() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.prompt.system_prompt = "local".to_string();
        config.save_local(dir.path()).unwrap();

        let loaded = Config::load(dir.path(), None).unwrap();
        assert_eq!(loaded.prompt.system_prompt, "local");
    }

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yml");
        assert!(Config::load(dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_template_path_resolution() {
        let work_dir = Path::new("/work");
        let mut config = Config::default();
        assert!(config.template_path(work_dir).is_none());

        config.prompt.template_path = Some(PathBuf::from("t.md"));
        assert_eq!(config.template_path(work_dir), Some(PathBuf::from("/work/t.md")));

        config.prompt.template_path = Some(PathBuf::from("/abs/t.md"));
        assert_eq!(config.template_path(work_dir), Some(PathBuf::from("/abs/t.md")));
    }
}
