use crate::utils::error::{PosError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> PosError {
    PosError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Endpoints must be absolute http(s) URLs; a relative path would only
/// fail later inside reqwest.
pub fn validate_endpoint(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(()),
        "http" | "https" => Err(invalid(field_name, url_str, "URL has no host")),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_timeout_seconds(field_name: &str, seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(invalid(field_name, seconds, "Timeout must be at least 1 second"));
    }
    Ok(())
}

/// Nominatim 要求可識別的 User-Agent；值也必須能放進 HTTP header
pub fn validate_user_agent(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "User-Agent cannot be empty"));
    }
    if !value.bytes().all(|b| b == b'\t' || (0x20..0x7f).contains(&b)) {
        return Err(invalid(
            field_name,
            value,
            "User-Agent may only contain visible ASCII characters",
        ));
    }
    Ok(())
}
