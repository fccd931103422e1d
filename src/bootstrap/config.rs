use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub frontend_url: Option<String>,
    pub content_file: String,
    pub default_culture: String,
    pub content_reload_secs: u64,
    pub public_base_url: Option<String>,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let frontend_url = env::var("FRONTEND_URL").ok();
        let content_file =
            env::var("CONTENT_FILE").unwrap_or_else(|_| "./fixtures/site-content.json".into());
        let default_culture = env::var("DEFAULT_CULTURE").unwrap_or_else(|_| "en-US".into());
        // 0 disables the reload loop
        let content_reload_secs = env::var("CONTENT_RELOAD_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let public_base_url = env::var("PUBLIC_BASE_URL").ok().and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                Some(trimmed.trim_end_matches('/').to_string())
            } else {
                None
            }
        });
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );

        // Production hardening: require a proper FRONTEND_URL for CORS
        if is_production {
            if frontend_url
                .as_deref()
                .map(|u| u.starts_with("http"))
                .unwrap_or(false)
                == false
            {
                anyhow::bail!(
                    "FRONTEND_URL must be set to a full origin in production (e.g., https://www.example.com)"
                );
            }
        }

        Ok(Self {
            api_port,
            frontend_url,
            content_file,
            default_culture,
            content_reload_secs,
            public_base_url,
            is_production,
        })
    }
}
