//! HTTP side-channel: creating games and locating the socket endpoint

use shared::protocol::{Color, NewGameBody, NewGameResponse};
use tracing::info;
use url::Url;

use super::error::{NetworkError, NetworkResult};

/// Parse a server base URL such as `http://localhost:3000`
pub fn parse_server_url(raw: &str) -> NetworkResult<Url> {
    Url::parse(raw).map_err(|e| NetworkError::InvalidUrl {
        message: format!("{raw}: {e}"),
    })
}

/// Create a game on the server, reserving `color` for this client
pub async fn create_game(
    http: &reqwest::Client,
    server: &Url,
    color: Color,
) -> NetworkResult<String> {
    let endpoint = server.join("api/game").map_err(|e| NetworkError::InvalidUrl {
        message: e.to_string(),
    })?;
    info!("[LOBBY] Creating game as {:?} at {}", color, endpoint);

    let response = http
        .put(endpoint)
        .json(&NewGameBody { color })
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(NetworkError::Status {
            status: response.status().as_u16(),
        });
    }

    let created: NewGameResponse = response.json().await?;
    info!("[LOBBY] Game created: {}", created.game_id);
    Ok(created.game_id)
}

/// Socket endpoint for `game_id`: `ws(s)://host/ws?game_id=<id>`
pub fn socket_url(server: &Url, game_id: &str) -> NetworkResult<Url> {
    let scheme = match server.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(NetworkError::InvalidUrl {
                message: format!("unsupported scheme {other}"),
            })
        }
    };

    let mut url = server.join("ws").map_err(|e| NetworkError::InvalidUrl {
        message: e.to_string(),
    })?;
    url.set_scheme(scheme).map_err(|_| NetworkError::InvalidUrl {
        message: format!("cannot switch {server} to {scheme}"),
    })?;
    url.query_pairs_mut().clear().append_pair("game_id", game_id);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_url_switches_scheme_and_adds_game() {
        let server = parse_server_url("http://localhost:3000").unwrap();
        let url = socket_url(&server, "abc-123").unwrap();
        assert_eq!(url.as_str(), "ws://localhost:3000/ws?game_id=abc-123");
    }

    #[test]
    fn test_socket_url_uses_wss_for_https() {
        let server = parse_server_url("https://chess.example.org/").unwrap();
        let url = socket_url(&server, "g1").unwrap();
        assert_eq!(url.as_str(), "wss://chess.example.org/ws?game_id=g1");
    }

    #[test]
    fn test_socket_url_rejects_unknown_scheme() {
        let server = parse_server_url("ftp://localhost").unwrap();
        assert!(matches!(
            socket_url(&server, "g1"),
            Err(NetworkError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_parse_server_url_rejects_garbage() {
        assert!(parse_server_url("not a url").is_err());
    }
}
