use crate::utils::error::{CartError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CartError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CartError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Directory names for a namespace must be a single path component.
pub fn validate_dir_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(CartError::InvalidConfigValue {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a single directory name".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CartError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CartError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Record ids become file names, so anything that could escape the
/// namespace directory is rejected.
pub fn validate_record_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CartError::validation("record id cannot be empty"));
    }
    if id.contains(['/', '\\', '\0']) || id == "." || id == ".." {
        return Err(CartError::validation(format!(
            "record id '{}' contains path characters",
            id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.root", "./content").is_ok());
        assert!(validate_path("storage.root", "").is_err());
        assert!(validate_path("storage.root", "a\0b").is_err());
    }

    #[test]
    fn test_validate_dir_name() {
        assert!(validate_dir_name("storage.carts_dir", "carts").is_ok());
        assert!(validate_dir_name("storage.carts_dir", "a/b").is_err());
        assert!(validate_dir_name("storage.carts_dir", "..").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("carts.max_id_attempts", 5, 1).is_ok());
        assert!(validate_positive_number("carts.max_id_attempts", 0, 1).is_err());
    }

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id("3f2a9c1e-0000-4000-8000-000000000000").is_ok());
        assert!(validate_record_id("../etc/passwd").is_err());
        assert!(validate_record_id("  ").is_err());
        assert!(validate_record_id("..").is_err());
    }
}
