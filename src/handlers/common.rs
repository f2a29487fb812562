use crate::errors::ServiceError;
use validator::Validate;

/// Validate request input at the boundary, converting validator detail into
/// the 400 taxonomy.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|e| ServiceError::ValidationError(format!("Validation failed: {}", e)))
}
