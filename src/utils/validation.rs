use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Goals are kilometres, so anything that is not a finite value above zero is rejected.
pub fn validate_positive_number(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a positive number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_numeric_id(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.trim().parse::<u64>().is_err() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a numeric id".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("strava_api_url", "https://www.strava.com/api/v3").is_ok());
        assert!(validate_url("strava_api_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("strava_api_url", "").is_err());
        assert!(validate_url("strava_api_url", "invalid-url").is_err());
        assert!(validate_url("strava_api_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("weekly", 30.0).is_ok());
        assert!(validate_positive_number("weekly", 0.5).is_ok());
        assert!(validate_positive_number("weekly", 0.0).is_err());
        assert!(validate_positive_number("weekly", -5.0).is_err());
        assert!(validate_positive_number("weekly", f64::NAN).is_err());
        assert!(validate_positive_number("weekly", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_numeric_id() {
        assert!(validate_numeric_id("STRAVA_CLIENT_ID", "12345").is_ok());
        assert!(validate_numeric_id("STRAVA_CLIENT_ID", "abc").is_err());
        assert!(validate_numeric_id("STRAVA_CLIENT_ID", "  ").is_err());
    }
}
