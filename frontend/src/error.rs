//! Error types for the client portal.
//!
//! Validation messages are shown inline next to the form that produced them,
//! so their `Display` text is the user-facing Hebrew copy.

use thiserror::Error;

/// Failures talking to the CRM backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request rejected as unauthorized")]
    Unauthorized,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Maps a non-success HTTP status to an error; 2xx passes through.
    pub fn check_status(status: u16) -> Result<(), ApiError> {
        match status {
            200..=299 => Ok(()),
            401 => Err(ApiError::Unauthorized),
            other => Err(ApiError::Status(other)),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("יש להזין קוד גישה.")]
    PinRequired,

    #[error("קוד הגישה צריך להיות בן 6 ספרות.")]
    PinFormat,

    #[error("יש להזין מספר לקוח תקין.")]
    ClientIdInvalid,

    #[error("טוקן לא יכול להיות ריק.")]
    TokenEmpty,

    #[error("יש להזין קוד גישה או להשתמש באיפוס מלא.")]
    PinMissing,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("browser window is not available")]
    NoWindow,

    #[error("download failed: {0}")]
    Browser(String),
}

impl From<wasm_bindgen::JsValue> for ExportError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        ExportError::Browser(format!("{value:?}"))
    }
}

/// Why the accounts page could not show data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// No client token configured for this deployment.
    MissingToken,
    /// Backend rejected the stored PIN.
    PinRejected,
    Fetch(ApiError),
}

impl LoadError {
    pub fn from_api(err: ApiError) -> Self {
        if err.is_unauthorized() {
            LoadError::PinRejected
        } else {
            LoadError::Fetch(err)
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            LoadError::MissingToken => "לא הוגדר token ללקוח באפליקציה. פנה למנהל המערכת.",
            LoadError::PinRejected => "קוד גישה שגוי. נסה שוב.",
            LoadError::Fetch(_) => "אירעה שגיאה בטעינת נתוני הקופות.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::check_status(200), Ok(()));
        assert_eq!(ApiError::check_status(204), Ok(()));
        assert_eq!(ApiError::check_status(401), Err(ApiError::Unauthorized));
        assert_eq!(ApiError::check_status(500), Err(ApiError::Status(500)));
        assert_eq!(ApiError::check_status(403), Err(ApiError::Status(403)));
    }

    #[test]
    fn only_unauthorized_becomes_pin_rejection() {
        assert_eq!(LoadError::from_api(ApiError::Unauthorized), LoadError::PinRejected);
        assert_eq!(
            LoadError::from_api(ApiError::Status(502)),
            LoadError::Fetch(ApiError::Status(502))
        );
        assert_eq!(
            LoadError::from_api(ApiError::Network("offline".into())).message(),
            "אירעה שגיאה בטעינת נתוני הקופות."
        );
    }
}
