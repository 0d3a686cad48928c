use crate::core::shell::DEFAULT_PROMPT;
use crate::domain::model::ContactFields;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PhonebookError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional start-up configuration.
///
/// ```toml
/// [shell]
/// prompt = "phonebook> "
///
/// [[contacts]]
/// first_name = "Ann"
/// last_name = "Lee"
/// address = "1 Elm"
/// city = "Springfield"
/// phone_number = "555-1111"
/// ```
///
/// Contacts are appended to the directory in file order. Nothing is ever written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub contacts: Vec<ContactFields>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    pub prompt: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PhonebookError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn prompt(&self) -> &str {
        self.shell.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    fn seed_contacts(&self) -> &[ContactFields] {
        &self.contacts
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(prompt) = &self.shell.prompt {
            validate_non_empty_string("shell.prompt", prompt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[shell]
prompt = "pb> "

[[contacts]]
first_name = "Ann"
last_name = "Lee"
address = "1 Elm"
city = "Springfield"
phone_number = "555-1111"

[[contacts]]
first_name = "Bo"
last_name = "Lee"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.prompt(), "pb> ");
        assert_eq!(config.seed_contacts().len(), 2);
        assert_eq!(config.contacts[0].phone_number, "555-1111");
        // missing fields default to empty text
        assert_eq!(config.contacts[1].address, "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.prompt(), DEFAULT_PROMPT);
        assert!(config.seed_contacts().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PHONEBOOK_TEST_PHONE", "555-9999");

        let toml_content = r#"
[[contacts]]
first_name = "Env"
phone_number = "${PHONEBOOK_TEST_PHONE}"
city = "${PHONEBOOK_TEST_UNSET_CITY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.contacts[0].phone_number, "555-9999");
        assert_eq!(config.contacts[0].city, "${PHONEBOOK_TEST_UNSET_CITY}");

        std::env::remove_var("PHONEBOOK_TEST_PHONE");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[shell]\nprompt = \"   \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[[contacts]\nfirst_name = 1").unwrap_err();
        assert!(matches!(err, PhonebookError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[[contacts]]
first_name = "File"
last_name = "Test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.contacts[0].first_name, "File");
    }

    #[test]
    fn test_missing_file() {
        let err = TomlConfig::from_file("/nonexistent/phonebook.toml").unwrap_err();
        assert!(matches!(err, PhonebookError::IoError(_)));
    }
}
