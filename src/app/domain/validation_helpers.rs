use validator::ValidationError;

/// Check that a screenshot path is a self-contained data URL.
///
/// Screenshots are embedded at upload time; external file references are not
/// accepted by any write surface.
pub fn check_data_url(path: &str) -> Result<(), ValidationError> {
    if path.starts_with("data:") {
        Ok(())
    } else {
        Err(ValidationError::new("data_url"))
    }
}
