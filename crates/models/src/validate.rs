//! Field checks shared by every catalog entity.
use crate::errors::ModelError;

pub fn non_blank(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

/// Media references (crop images, category icons, article images) are absolute http(s) URLs.
pub fn media_url(field: &str, value: &str) -> Result<(), ModelError> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(|| ModelError::Validation(format!("{field} must be an http(s) url")))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || rest.chars().any(char::is_whitespace) {
        return Err(ModelError::Validation(format!("{field} must be an http(s) url")));
    }
    Ok(())
}

pub fn optional_media_url(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    match value {
        Some(v) => media_url(field, v),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_rejected() {
        assert!(non_blank("name", "Tomato").is_ok());
        assert_eq!(non_blank("name", "   "), Err(ModelError::Validation("name required".into())));
    }

    #[test]
    fn media_urls_need_scheme_and_host() {
        assert!(media_url("img", "https://cdn.example.com/a.png").is_ok());
        assert!(media_url("img", "http://localhost:9000/x").is_ok());
        assert!(media_url("img", "ftp://cdn.example.com/a.png").is_err());
        assert!(media_url("img", "https:///a.png").is_err());
        assert!(media_url("img", "https://cdn.example.com/a b.png").is_err());
        assert!(optional_media_url("icon", None).is_ok());
    }
}
