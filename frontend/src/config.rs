use web_sys::UrlSearchParams;

pub const API_BASE_URL: &str = "https://ben-zvi.onrender.com";
pub const CRM_BASE_PATH: &str = "/api/v1/crm";
pub const ADMIN_BASE_PATH: &str = "/api/v1/admin";
pub const CLIENT_APP_URL: &str = "https://bzclient.onrender.com/";

pub const CLIENT_TOKEN_HEADER: &str = "X-Client-Token";
pub const CLIENT_PIN_HEADER: &str = "X-Client-Pin";

const ADMIN_PARAM: &str = "admin";
const ADMIN_PARAM_VALUE: &str = "client-access";
const TOKEN_PARAM: &str = "token";

// Token baked into this deployment. A build can override it with
// BZ_CLIENT_TOKEN; a `?token=` link overrides both at runtime.
const DEFAULT_CLIENT_TOKEN: &str = "trop5090";

fn build_client_token() -> Option<String> {
    resolve_build_token(option_env!("BZ_CLIENT_TOKEN"))
}

fn resolve_build_token(from_env: Option<&str>) -> Option<String> {
    from_env
        .and_then(non_blank)
        .or_else(|| non_blank(DEFAULT_CLIENT_TOKEN))
}

/// Runtime configuration, resolved once at startup and shared through context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub crm_base_path: String,
    pub admin_base_path: String,
    pub client_app_url: String,
    pub client_token: Option<String>,
    pub admin_mode: bool,
}

impl AppConfig {
    /// Builds the configuration from already decoded `token` and `admin`
    /// query parameters.
    pub fn from_params(token: Option<&str>, admin: Option<&str>) -> Self {
        let client_token = token.and_then(non_blank).or_else(build_client_token);

        AppConfig {
            api_base_url: API_BASE_URL.to_string(),
            crm_base_path: CRM_BASE_PATH.to_string(),
            admin_base_path: ADMIN_BASE_PATH.to_string(),
            client_app_url: CLIENT_APP_URL.to_string(),
            client_token,
            admin_mode: admin == Some(ADMIN_PARAM_VALUE),
        }
    }

    /// Reads the current page location. A location that cannot be read or
    /// parsed counts as having no query parameters.
    pub fn from_window() -> Self {
        let params = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| UrlSearchParams::new_with_str(&search).ok());
        let param = |name: &str| params.as_ref().and_then(|p| p.get(name));

        let token = param(TOKEN_PARAM);
        let admin = param(ADMIN_PARAM);
        Self::from_params(token.as_deref(), admin.as_deref())
    }

    pub fn has_client_token(&self) -> bool {
        self.client_token.is_some()
    }

    pub fn crm_url(&self, path: &str) -> String {
        format!("{}{}{}", self.api_base_url, self.crm_base_path, path)
    }

    pub fn admin_url(&self, path: &str) -> String {
        format!("{}{}{}", self.api_base_url, self.admin_base_path, path)
    }

    /// Link handed to a client after the admin issues a token.
    pub fn client_link(&self, token: &str) -> String {
        format!("{}?{}={}", self.client_app_url, TOKEN_PARAM, token)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
