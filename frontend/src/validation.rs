use crate::error::ValidationError;

const PIN_LENGTH: usize = 6;

fn is_six_digits(value: &str) -> bool {
    value.len() == PIN_LENGTH && value.bytes().all(|b| b.is_ascii_digit())
}

/// PIN typed on the access screen; returns the trimmed value.
pub fn validate_pin(input: &str) -> Result<String, ValidationError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(ValidationError::PinRequired);
    }
    if !is_six_digits(value) {
        return Err(ValidationError::PinFormat);
    }
    Ok(value.to_string())
}

/// PIN set manually by an admin. An empty value points the admin at the
/// full reset instead.
pub fn validate_admin_pin(input: &str) -> Result<String, ValidationError> {
    match validate_pin(input) {
        Err(ValidationError::PinRequired) => Err(ValidationError::PinMissing),
        other => other,
    }
}

pub fn validate_token(input: &str) -> Result<String, ValidationError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(ValidationError::TokenEmpty);
    }
    Ok(value.to_string())
}

/// Reads the leading digits of the input, so `"12abc"` is client 12.
/// Zero and non-numeric input are rejected.
pub fn parse_client_id(input: &str) -> Result<u64, ValidationError> {
    let digits: String = input
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::ClientIdInvalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_must_be_six_digits() {
        assert_eq!(validate_pin(" 123456 "), Ok("123456".to_string()));
        assert_eq!(validate_pin(""), Err(ValidationError::PinRequired));
        assert_eq!(validate_pin("   "), Err(ValidationError::PinRequired));
        assert_eq!(validate_pin("12345"), Err(ValidationError::PinFormat));
        assert_eq!(validate_pin("1234567"), Err(ValidationError::PinFormat));
        assert_eq!(validate_pin("12a456"), Err(ValidationError::PinFormat));
        assert_eq!(validate_pin("١٢٣٤٥٦"), Err(ValidationError::PinFormat));
    }

    #[test]
    fn admin_pin_empty_has_own_message() {
        assert_eq!(validate_admin_pin(""), Err(ValidationError::PinMissing));
        assert_eq!(validate_admin_pin("99"), Err(ValidationError::PinFormat));
        assert_eq!(validate_admin_pin("000111"), Ok("000111".to_string()));
    }

    #[test]
    fn token_is_trimmed() {
        assert_eq!(validate_token("  abc "), Ok("abc".to_string()));
        assert_eq!(validate_token(" "), Err(ValidationError::TokenEmpty));
    }

    #[test]
    fn client_id_parses_leading_digits() {
        assert_eq!(parse_client_id(" 42 "), Ok(42));
        assert_eq!(parse_client_id("12abc"), Ok(12));
        assert_eq!(parse_client_id("0"), Err(ValidationError::ClientIdInvalid));
        assert_eq!(parse_client_id("-3"), Err(ValidationError::ClientIdInvalid));
        assert_eq!(parse_client_id(""), Err(ValidationError::ClientIdInvalid));
        assert_eq!(parse_client_id("abc"), Err(ValidationError::ClientIdInvalid));
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            ValidationError::PinFormat.to_string(),
            "קוד הגישה צריך להיות בן 6 ספרות."
        );
    }
}
