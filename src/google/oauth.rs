//! OAuth 2.0 helpers for the installed-app flow against Google.

use reqwest::Client;
use serde::Deserialize;

pub const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const SLIDES_SCOPE: &str = "https://www.googleapis.com/auth/presentations";

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    /// Only present on the first code exchange.
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

/// Consent page URL asking for offline access to presentations.
pub fn authorize_url(client_id: &str, redirect_uri: &str) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
        AUTHORIZE_URL,
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(SLIDES_SCOPE)
    )
}

async fn request_token(token_url: &str, form: &[(&str, &str)]) -> anyhow::Result<TokenResponse> {
    let res = Client::new().post(token_url).form(form).send().await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        anyhow::bail!("Token request failed: {} ({})", status, text);
    }
    let token: TokenResponse = serde_json::from_str(&text)?;
    Ok(token)
}

pub async fn exchange_code_for_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> anyhow::Result<TokenResponse> {
    request_token(
        token_url,
        &[
            ("code", code),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ],
    )
    .await
}

pub async fn refresh_access_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> anyhow::Result<TokenResponse> {
    request_token(
        token_url,
        &[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ],
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_authorize_url() {
        let url = authorize_url("my id", "urn:ietf:wg:oauth:2.0:oob");
        assert!(url.starts_with(AUTHORIZE_URL));
        assert!(url.contains("client_id=my%20id"));
        assert!(url.contains("redirect_uri=urn%3Aietf%3Awg%3Aoauth%3A2.0%3Aoob"));
        assert!(url.contains("presentations"));
        assert!(url.contains("access_type=offline"));
    }

    #[tokio::test]
    async fn test_refresh_access_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
                Matcher::UrlEncoded("refresh_token".into(), "refresh".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "access", "expires_in": 3599, "token_type": "Bearer"}"#)
            .create_async()
            .await;

        let url = format!("{}/token", server.url());
        let token = refresh_access_token(&url, "id", "secret", "refresh")
            .await
            .unwrap();
        assert_eq!(token.access_token, "access");
        assert_eq!(token.refresh_token, None);
    }

    #[tokio::test]
    async fn test_exchange_code_returns_refresh_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .match_body(Matcher::UrlEncoded("code".into(), "abc".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "access", "refresh_token": "refresh"}"#)
            .create_async()
            .await;

        let url = format!("{}/token", server.url());
        let token = exchange_code_for_token(&url, "id", "secret", "abc", "urn:ietf:wg:oauth:2.0:oob")
            .await
            .unwrap();
        assert_eq!(token.refresh_token.as_deref(), Some("refresh"));
    }

    #[tokio::test]
    async fn test_token_error_includes_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let url = format!("{}/token", server.url());
        let err = refresh_access_token(&url, "id", "secret", "expired")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid_grant"));
    }
}
