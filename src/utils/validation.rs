//! Centralized validation and helper functions.

/// Maximum number of records allowed in a single input file (DOS protection)
pub const MAX_RECORDS: usize = 1_000_000;

/// Longest file stem derived from a sequence id
pub const MAX_FILENAME_LENGTH: usize = 200;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_record_limit(records.len()).is_some() {
///     return Err(...);
/// }
/// records.push(new_record); // Safe to add
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Filename validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path traversal or no usable characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
}

/// Turn a sequence id into a file stem that is safe to join onto a directory.
///
/// Characters other than ASCII alphanumerics, `.`, `-` and `_` become `_`, so
/// ids like `sp|P12345|KAPCA_HUMAN` stay readable. Stems that would be hidden
/// files or refer to a parent directory are rejected.
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the id is blank,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if nothing usable remains.
///
/// # Examples
///
/// ```
/// use motif_scan::utils::validation::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("sp|P12345|KAPCA_HUMAN").unwrap(), "sp_P12345_KAPCA_HUMAN");
/// assert!(sanitize_file_stem("../etc/passwd").is_err());
/// ```
pub fn sanitize_file_stem(id: &str) -> Result<String, ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if id.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    // Prevent directory traversal
    if id.contains("..") {
        return Err(ValidationError::InvalidFilename);
    }

    let sanitized: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.starts_with('.') || sanitized.chars().all(|c| c == '_') {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}
