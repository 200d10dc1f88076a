use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    management::TokenManager,
    server::start_api_server,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long to wait for the browser to hit the callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 PKCE flow and persists the resulting token.
///
/// # Authentication Flow
///
/// 1. **PKCE Setup**: Generates a code verifier and its SHA256 challenge
/// 2. **Server Start**: Launches the local callback server
/// 3. **Browser Launch**: Opens the Spotify authorization URL
/// 4. **Callback Handling**: The callback exchanges the code for a token and
///    stores it in `shared_state`
/// 5. **Token Persistence**: The token is written to the local cache
///
/// If the browser cannot be opened the URL is printed instead.
///
/// # Errors
///
/// Fails on missing configuration, when no token arrives within 60 seconds,
/// or when the token cannot be written to the cache.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = config::spotify_apiauth_url()?,
        client_id = config::spotify_client_id()?,
        redirect_uri = config::spotify_redirect_uri()?,
        code_challenge = code_challenge,
        scope = config::spotify_scope()?
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state)
        .await
        .ok_or("Authentication failed or timed out.")?;

    TokenManager::new(token)
        .persist()
        .await
        .map_err(|e| format!("Failed to save token to cache: {}", e))?;
    Ok(())
}

/// Polls the shared state once a second until the callback stored a token,
/// giving up after [`CALLBACK_TIMEOUT`].
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges the refresh token of `current` for a fresh access token.
///
/// Values the response leaves out (refresh token, scope) are carried over
/// from `current`.
pub async fn refresh_token(current: &Token) -> Res<Token> {
    let client_id = config::spotify_client_id()?;

    let response = Client::new()
        .post(config::spotify_apitoken_url()?)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", current.refresh_token.as_str()),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<TokenResponse>().await?;
    Ok(into_token(json, Some(current)))
}

/// Exchanges an authorization code and its PKCE verifier for a token.
///
/// The verifier must be the one whose challenge was sent with the
/// authorization request.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let response = Client::new()
        .post(config::spotify_apitoken_url()?)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<TokenResponse>().await?;
    Ok(into_token(json, None))
}

fn into_token(response: TokenResponse, previous: Option<&Token>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous.map(|t| t.refresh_token.clone()))
            .unwrap_or_default(),
        scope: response
            .scope
            .or_else(|| previous.map(|t| t.scope.clone()))
            .unwrap_or_default(),
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
