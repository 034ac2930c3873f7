use crate::domain::model::Goals;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_positive_number, Validate};
use std::path::Path;

impl Goals {
    /// 從 YAML 檔案載入目標
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EtlError::ConfigError {
            message: format!("cannot read goals file {}: {}", path.display(), e),
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let goals: Goals = serde_yaml::from_str(content)?;
        goals.validate()?;
        Ok(goals)
    }
}

impl Validate for Goals {
    fn validate(&self) -> Result<()> {
        validate_positive_number("goals.weekly", self.weekly)?;
        validate_positive_number("goals.yearly", self.yearly)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_integer_and_float_goals() {
        let goals = Goals::from_yaml_str("weekly: 30\nyearly: 1500.5\n").unwrap();
        assert_eq!(goals.weekly, 30.0);
        assert_eq!(goals.yearly, 1500.5);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let err = Goals::from_yaml_str("weekly: 30\n").unwrap_err();
        assert!(matches!(err, EtlError::YamlError(_)));
    }

    #[test]
    fn test_non_positive_goal_is_rejected() {
        let err = Goals::from_yaml_str("weekly: 0\nyearly: 1000\n").unwrap_err();
        assert!(matches!(err, EtlError::InvalidConfigValueError { .. }));
        assert!(Goals::from_yaml_str("weekly: 20\nyearly: -1\n").is_err());
    }

    #[test]
    fn test_non_numeric_goal_is_rejected() {
        assert!(Goals::from_yaml_str("weekly: lots\nyearly: 1000\n").is_err());
    }

    #[test]
    fn test_goals_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"# running goals\nweekly: 25\nyearly: 1200\n")
            .unwrap();

        let goals = Goals::from_file(temp_file.path()).unwrap();
        assert_eq!(goals, Goals { weekly: 25.0, yearly: 1200.0 });
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Goals::from_file("/definitely/not/here/goals.yml").unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }
}
