use crate::utils::error::{AdminError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AdminError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Resource paths are single URL segments such as `companies`.
pub fn validate_resource_path(field_name: &str, path: &str) -> Result<()> {
    validate_non_empty_string(field_name, path)?;
    if path.contains('/') || path.contains('?') || path.contains(char::is_whitespace) {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Resource path must be a single URL segment".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdminError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Payload-side check; reports a validation error rather than a config error.
pub fn require_text(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdminError::validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(())
}
