//! Field-level validation helpers.
//!
//! Each helper returns a human-readable message on failure so the catalog can
//! collect every violation before reporting.

/// Validate that a string looks like an email address.
///
/// Shape check only: one `@`, non-empty local part, a dotted domain with no
/// empty labels, no whitespace.
pub fn validate_email(s: &str) -> Result<(), String> {
    let invalid = || Err(format!("invalid email address '{}'", s));

    if s.chars().any(char::is_whitespace) {
        return invalid();
    }
    let Some((local, domain)) = s.split_once('@') else {
        return invalid();
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return invalid();
    }
    if domain.split('.').any(str::is_empty) {
        return invalid();
    }
    Ok(())
}

/// Validate a string's length (in characters) against optional bounds.
pub fn validate_length(s: &str, min: Option<usize>, max: Option<usize>) -> Result<(), String> {
    let len = s.chars().count();
    if let Some(min) = min {
        if len < min {
            return Err(format!("must be at least {} characters, got {}", min, len));
        }
    }
    if let Some(max) = max {
        if len > max {
            return Err(format!("must be at most {} characters, got {}", max, len));
        }
    }
    Ok(())
}

/// Validate an integer against optional inclusive bounds.
pub fn validate_range(n: i64, min: Option<i64>, max: Option<i64>) -> Result<(), String> {
    if let Some(min) = min {
        if n < min {
            return Err(format!("must be >= {}, got {}", min, n));
        }
    }
    if let Some(max) = max {
        if n > max {
            return Err(format!("must be <= {}, got {}", max, n));
        }
    }
    Ok(())
}
