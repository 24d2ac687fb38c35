use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use common::games::tictactoe::{BotType, ErrorBody, ErrorKind, GameError, GameSession, GameState};
use common::id_generator::generate_session_id;
use common::{SessionId, log};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::session_store::SessionStore;

pub const SESSION_COOKIE: &str = "tictactoe_session";
const MAX_SESSION_ID_LEN: usize = 64;

#[derive(Clone)]
pub struct WebServerState {
    pub session_store: SessionStore,
    pub bot_type: BotType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartGameRequest {
    human_unit: Option<String>,
    bot_unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    row: Option<i64>,
    column: Option<i64>,
}

/// Session resolved from the request cookie. `is_new` is set when the
/// response has to hand a fresh cookie to the browser.
struct RequestSession {
    id: SessionId,
    is_new: bool,
}

impl RequestSession {
    fn from_headers(headers: &HeaderMap) -> Self {
        match session_cookie(headers) {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: generate_session_id(),
                is_new: true,
            },
        }
    }

    fn respond(&self, status: StatusCode, body: Option<Response>) -> Response {
        let mut response = match body {
            Some(body) => (status, body).into_response(),
            None => status.into_response(),
        };

        if self.is_new {
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                SESSION_COOKIE, self.id
            );
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }

        response
    }

    fn respond_state(&self, status: StatusCode, state: GameState) -> Response {
        self.respond(status, Some(Json(state).into_response()))
    }

    fn respond_error(&self, operation: &str, err: &GameError) -> Response {
        log!("{} failed for session {}: {}", operation, self.id, err);
        self.respond(
            error_status(err),
            Some(Json(ErrorBody::from(err)).into_response()),
        )
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| is_valid_session_id(value))
        .map(|value| SessionId::new(value.to_string()))
}

fn is_valid_session_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_SESSION_ID_LEN
        && value.chars().all(|c| c.is_ascii_alphanumeric())
}

fn error_status(err: &GameError) -> StatusCode {
    match err.kind() {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::StateConflict => StatusCode::CONFLICT,
        ErrorKind::RuleViolation => StatusCode::BAD_REQUEST,
    }
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, GameError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(GameError::MissingBody);
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| GameError::InvalidBody(e.to_string()))?;
    if value.is_null() {
        return Err(GameError::MissingBody);
    }

    serde_json::from_value(value).map_err(|e| GameError::InvalidBody(e.to_string()))
}

fn parse_start_request(body: &Bytes) -> Result<(String, String), GameError> {
    let request: StartGameRequest = parse_body(body)?;

    let human_unit = request.human_unit.ok_or(GameError::MissingField("humanUnit"))?;
    let bot_unit = request.bot_unit.ok_or(GameError::MissingField("botUnit"))?;
    if human_unit.is_empty() {
        return Err(GameError::EmptyField("humanUnit"));
    }
    if bot_unit.is_empty() {
        return Err(GameError::EmptyField("botUnit"));
    }

    Ok((human_unit, bot_unit))
}

fn parse_move_request(body: &Bytes) -> Result<(i64, i64), GameError> {
    let request: MoveRequest = parse_body(body)?;

    let row = request.row.ok_or(GameError::EmptyField("row"))?;
    let column = request.column.ok_or(GameError::EmptyField("column"))?;
    Ok((row, column))
}

pub fn create_router(state: WebServerState, static_files_path: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new().route(
        "/api/board",
        get(get_board)
            .post(start_game)
            .put(make_move)
            .delete(delete_game),
    );

    let router = match static_files_path {
        Some(path) => router.fallback_service(ServeDir::new(path)),
        None => router,
    };

    router.layer(cors).with_state(state)
}

pub async fn run_web_server(
    address: SocketAddr,
    state: WebServerState,
    static_files_path: Option<PathBuf>,
) -> Result<(), String> {
    let app = create_router(state, static_files_path);

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|e| format!("Failed to bind web server address {}: {}", address, e))?;
    log!("Web server listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Web server error: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    log!("Shutdown signal received");
}

async fn get_board(State(state): State<WebServerState>, headers: HeaderMap) -> Response {
    let session = RequestSession::from_headers(&headers);
    let game_state = state
        .session_store
        .with_storage(&session.id, |storage| GameSession::state(&*storage))
        .await;
    session.respond_state(StatusCode::OK, game_state)
}

async fn start_game(
    State(state): State<WebServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let session = RequestSession::from_headers(&headers);
    let (human_unit, bot_unit) = match parse_start_request(&body) {
        Ok(units) => units,
        Err(err) => return session.respond_error("Start game", &err),
    };

    let game = GameSession::new(state.bot_type.create_strategy());
    let result = state
        .session_store
        .with_storage(&session.id, move |storage| {
            game.start_from_strs(storage, &human_unit, &bot_unit)
        })
        .await;

    match result {
        Ok(game_state) => {
            log!(
                "Session {} started a game against the {} bot",
                session.id,
                state.bot_type
            );
            session.respond_state(StatusCode::CREATED, game_state)
        }
        Err(err) => session.respond_error("Start game", &err),
    }
}

async fn make_move(
    State(state): State<WebServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let session = RequestSession::from_headers(&headers);
    let (row, column) = match parse_move_request(&body) {
        Ok(coordinates) => coordinates,
        Err(err) => return session.respond_error("Move", &err),
    };

    let mut game = GameSession::new(state.bot_type.create_strategy());
    let result = state
        .session_store
        .with_storage(&session.id, |storage| {
            game.apply_human_move(storage, row, column)
        })
        .await;

    match result {
        Ok(game_state) => session.respond_state(StatusCode::OK, game_state),
        Err(err) => session.respond_error("Move", &err),
    }
}

async fn delete_game(State(state): State<WebServerState>, headers: HeaderMap) -> Response {
    let session = RequestSession::from_headers(&headers);
    state
        .session_store
        .with_storage(&session.id, |storage| GameSession::delete(storage))
        .await;
    session.respond(StatusCode::NO_CONTENT, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const COOKIE: &str = "tictactoe_session=testsession";

    fn create_test_app(bot_type: BotType) -> Router {
        let state = WebServerState {
            session_store: SessionStore::new(),
            bot_type,
        };
        create_router(state, None)
    }

    async fn send(
        app: &Router,
        method: &str,
        cookie: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, HeaderMap, String) {
        let mut builder = Request::builder().method(method).uri("/api/board");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn detail(body: &str) -> String {
        let value: Value = serde_json::from_str(body).unwrap();
        assert_eq!(value["error"], json!(true));
        value["detail"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_get_without_game() {
        let app = create_test_app(BotType::FirstEmpty);
        let (status, _, body) = send(&app, "GET", Some(COOKIE), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "game": null }));
    }

    #[tokio::test]
    async fn test_new_visitor_gets_cookie() {
        let app = create_test_app(BotType::FirstEmpty);
        let (_, headers, _) = send(&app, "GET", None, None).await;

        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("tictactoe_session="));
        assert!(cookie.contains("HttpOnly"));

        let (_, headers, _) = send(&app, "GET", Some(COOKIE), None).await;
        assert!(headers.get(header::SET_COOKIE).is_none());

        let (_, headers, _) = send(&app, "GET", Some("tictactoe_session=../bad"), None).await;
        assert!(headers.get(header::SET_COOKIE).is_some());
    }

    #[tokio::test]
    async fn test_full_flow() {
        let app = create_test_app(BotType::FirstEmpty);

        let (status, _, body) = send(
            &app,
            "POST",
            Some(COOKIE),
            Some(r#"{"humanUnit": "X", "botUnit": "O"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({
                "game": {
                    "winner": null,
                    "board": [["", "", ""], ["", "", ""], ["", "", ""]],
                    "units": { "human": "X", "bot": "O" }
                }
            })
        );

        let (status, _, body) =
            send(&app, "PUT", Some(COOKIE), Some(r#"{"row": 1, "column": 1}"#)).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["game"]["board"], json!([["O", "", ""], ["", "X", ""], ["", "", ""]]));

        let (status, _, body) = send(&app, "GET", Some(COOKIE), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), value);

        let (status, _, body) = send(&app, "DELETE", Some(COOKIE), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (_, _, body) = send(&app, "GET", Some(COOKIE), None).await;
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "game": null }));
    }

    #[tokio::test]
    async fn test_start_validation_order() {
        let app = create_test_app(BotType::FirstEmpty);

        let (status, _, body) = send(&app, "POST", Some(COOKIE), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail(&body), "Missing body content.");

        let (status, _, body) = send(&app, "POST", Some(COOKIE), Some("{not json")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(detail(&body).starts_with("Invalid body content:"));

        let (_, _, body) = send(&app, "POST", Some(COOKIE), Some(r#"{"humanUnit": ""}"#)).await;
        assert_eq!(detail(&body), "Missing the \"botUnit\" attribute.");

        let (_, _, body) =
            send(&app, "POST", Some(COOKIE), Some(r#"{"humanUnit": "", "botUnit": ""}"#)).await;
        assert_eq!(detail(&body), "Please provide a value for the \"humanUnit\" attribute.");

        let (status, _, body) =
            send(&app, "POST", Some(COOKIE), Some(r#"{"humanUnit": "X", "botUnit": "X"}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!detail(&body).is_empty());
    }

    #[tokio::test]
    async fn test_start_twice_conflicts() {
        let app = create_test_app(BotType::Minimax);
        let start = r#"{"humanUnit": "O", "botUnit": "X"}"#;

        let (status, _, _) = send(&app, "POST", Some(COOKIE), Some(start)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _, body) = send(&app, "POST", Some(COOKIE), Some(start)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(detail(&body), GameError::GameAlreadyInProgress.to_string());

        let (status, _, _) = send(
            &app,
            "POST",
            Some("tictactoe_session=othersession"),
            Some(start),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_move_errors() {
        let app = create_test_app(BotType::FirstEmpty);

        let (status, _, body) =
            send(&app, "PUT", Some(COOKIE), Some(r#"{"row": 0, "column": 0}"#)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(detail(&body), "There is no game in progress.");

        let (status, _, body) = send(&app, "PUT", Some(COOKIE), Some(r#"{"column": 0}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail(&body), "Please provide a value for the \"row\" attribute.");

        send(
            &app,
            "POST",
            Some(COOKIE),
            Some(r#"{"humanUnit": "X", "botUnit": "O"}"#),
        )
        .await;

        let (status, _, body) =
            send(&app, "PUT", Some(COOKIE), Some(r#"{"row": 3, "column": 0}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail(&body), GameError::InvalidRow(3).to_string());

        send(&app, "PUT", Some(COOKIE), Some(r#"{"row": 2, "column": 2}"#)).await;
        let (status, _, body) =
            send(&app, "PUT", Some(COOKIE), Some(r#"{"row": 0, "column": 0}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail(&body), "The position \"0,0\" is already in use.");
    }

    #[tokio::test]
    async fn test_move_after_win_conflicts() {
        let app = create_test_app(BotType::FirstEmpty);
        send(
            &app,
            "POST",
            Some(COOKIE),
            Some(r#"{"humanUnit": "X", "botUnit": "O"}"#),
        )
        .await;

        // The first-empty bot fills the top row while X takes the middle row.
        for column in 0..3 {
            let body = format!(r#"{{"row": 1, "column": {}}}"#, column);
            let (status, _, _) = send(&app, "PUT", Some(COOKIE), Some(body.as_str())).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, _, body) = send(&app, "GET", Some(COOKIE), None).await;
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["game"]["winner"]["result"], json!("X"));
        assert_eq!(value["game"]["winner"]["coordinates"], json!([[1, 0], [1, 1], [1, 2]]));
        assert_eq!(value["game"]["board"][0], json!(["O", "O", ""]));

        let (status, _, body) =
            send(&app, "PUT", Some(COOKIE), Some(r#"{"row": 2, "column": 0}"#)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(detail(&body), "The game is already done. Delete it to start a new one.");
    }

    #[test]
    fn test_session_id_validation() {
        assert!(is_valid_session_id("abc123"));
        assert!(!is_valid_session_id(""));
        assert!(!is_valid_session_id("has space"));
        assert!(!is_valid_session_id(&"a".repeat(MAX_SESSION_ID_LEN + 1)));
    }
}
