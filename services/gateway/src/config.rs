/// Gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the backend CRM API requests are proxied to.
    pub backend_base_url: String,
    /// Base URL of the user-directory service.
    pub directory_url: String,
    /// HMAC secret for signing session cookies.
    pub session_secret: String,
    /// Skip OTP verification entirely. Development only. Env var: `BYPASS_OTP`.
    pub bypass_otp: bool,
    /// Production mode: secure cookies, no dev OTP logging. Env var: `PRODUCTION`.
    pub production: bool,
    /// TCP port to listen on (default 3120). Env var: `GATEWAY_PORT`.
    pub gateway_port: u16,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            backend_base_url: std::env::var("BACKEND_BASE_URL").expect("BACKEND_BASE_URL"),
            directory_url: std::env::var("DIRECTORY_URL").expect("DIRECTORY_URL"),
            session_secret: std::env::var("SESSION_SECRET").expect("SESSION_SECRET"),
            bypass_otp: env_flag("BYPASS_OTP"),
            production: env_flag("PRODUCTION"),
            gateway_port: std::env::var("GATEWAY_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
        }
    }
}
