use std::env;
use std::str::FromStr;

use anyhow::{Result, anyhow};

use crate::calendar::LayoutSelector;
use crate::calendar::locale::Language;

pub const DEFAULT_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
pub const DEFAULT_SLIDES_API_URL: &str = "https://slides.googleapis.com";
pub const DEFAULT_OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub presentation_id: Option<String>,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub google_refresh_token: Option<String>,
    pub google_redirect_uri: String,
    pub layout: LayoutSelector,
    pub language: Language,
    pub slides_api_url: String,
    pub oauth_token_url: String,
}

/// Client credentials plus the refresh token used to mint access tokens.
#[derive(Clone, Debug)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl AppConfig {
    pub fn presentation_id(&self) -> Result<&str> {
        self.presentation_id
            .as_deref()
            .ok_or_else(|| anyhow!("Missing env var SLIDECAL_PRESENTATION_ID"))
    }

    pub fn client_credentials(&self) -> Result<(&str, &str)> {
        let client_id = self
            .google_client_id
            .as_deref()
            .ok_or_else(|| anyhow!("Missing env var SLIDECAL_CLIENT_ID"))?;
        let client_secret = self
            .google_client_secret
            .as_deref()
            .ok_or_else(|| anyhow!("Missing env var SLIDECAL_CLIENT_SECRET"))?;
        Ok((client_id, client_secret))
    }

    pub fn google_credentials(&self) -> Result<GoogleCredentials> {
        let (client_id, client_secret) = self.client_credentials()?;
        let refresh_token = self.google_refresh_token.clone().ok_or_else(|| {
            anyhow!("Missing env var SLIDECAL_REFRESH_TOKEN (run `slidecal auth` to get one)")
        })?;
        Ok(GoogleCredentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            refresh_token,
        })
    }
}

/// Parse an env var, falling back to the default when it is unset or
/// does not parse.
fn parsed_var<T: FromStr + Default>(name: &str) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}={:?}: {}", name, value, e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let presentation_id = env::var("SLIDECAL_PRESENTATION_ID").ok();
        let google_client_id = env::var("SLIDECAL_CLIENT_ID").ok();
        let google_client_secret = env::var("SLIDECAL_CLIENT_SECRET").ok();
        let google_refresh_token = env::var("SLIDECAL_REFRESH_TOKEN").ok();
        let google_redirect_uri = env::var("SLIDECAL_REDIRECT_URI")
            .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string());
        let slides_api_url = env::var("SLIDECAL_SLIDES_API_URL")
            .unwrap_or_else(|_| DEFAULT_SLIDES_API_URL.to_string());
        let oauth_token_url = env::var("SLIDECAL_OAUTH_TOKEN_URL")
            .unwrap_or_else(|_| DEFAULT_OAUTH_TOKEN_URL.to_string());

        Self {
            presentation_id,
            google_client_id,
            google_client_secret,
            google_refresh_token,
            google_redirect_uri,
            layout: parsed_var("SLIDECAL_LAYOUT"),
            language: parsed_var("SLIDECAL_LANGUAGE"),
            slides_api_url,
            oauth_token_url,
        }
    }
}
