use anyhow::{Result, anyhow};
use std::io::{self, Write};

use crate::core::AppConfig;
use crate::google::oauth::{authorize_url, exchange_code_for_token};

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_owned())
}

/// Walk through the consent screen and print a refresh token to put in
/// SLIDECAL_REFRESH_TOKEN.
pub async fn run() -> Result<()> {
    let config = AppConfig::default();
    let (client_id, client_secret) = config.client_credentials()?;
    let redirect_uri = &config.google_redirect_uri;

    println!(
        "\nPlease open the following URL in your browser and authorize access:\n\n{}\n",
        authorize_url(client_id, redirect_uri)
    );
    let code = prompt("Paste the authorization code shown by Google here: ")?;

    let token = exchange_code_for_token(
        &config.oauth_token_url,
        client_id,
        client_secret,
        &code,
        redirect_uri,
    )
    .await?;
    let refresh_token = token
        .refresh_token
        .ok_or(anyhow!("No refresh token in response"))?;

    println!("\nexport SLIDECAL_REFRESH_TOKEN={}", refresh_token);
    Ok(())
}
