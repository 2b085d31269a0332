//! Tests for the HTTP transport against an in-process game server.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ttt_client::{
    Cell, ControlAssignment, ControlMode, DispatchOutcome, GameClient, GameService,
    HttpGameService, Position, ServiceErrorKind, Side, TurnIndicator,
};

const INITIAL_WIRE: [i64; 11] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];

/// Minimal game server speaking the client's wire contract.
#[derive(Clone, Default)]
struct TestServer {
    game: Arc<Mutex<Option<[i64; 11]>>>,
    manual_bodies: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    fn play(&self, index: usize) {
        let mut game = self.game.lock().unwrap();
        if let Some(wire) = game.as_mut() {
            if wire[index] == 0 {
                wire[index] = wire[10];
                wire[10] = if wire[10] == 1 { 2 } else { 1 };
            }
        }
    }
}

async fn init(State(server): State<TestServer>) -> Json<&'static str> {
    *server.game.lock().unwrap() = Some(INITIAL_WIRE);
    Json("Game initiated")
}

async fn state(State(server): State<TestServer>) -> Response {
    let game = *server.game.lock().unwrap();
    match game {
        Some(wire) => Json(wire.to_vec()).into_response(),
        None => Json("Could not get state. Game does not exist").into_response(),
    }
}

async fn engine_move(State(server): State<TestServer>) -> StatusCode {
    let game = *server.game.lock().unwrap();
    match game {
        Some(wire) => {
            if let Some(index) = wire[..9].iter().position(|&c| c == 0) {
                server.play(index);
            }
            StatusCode::OK
        }
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn manual_move(State(server): State<TestServer>, body: String) -> StatusCode {
    server.manual_bodies.lock().unwrap().push(body.clone());
    match body.parse::<usize>() {
        Ok(index) if index < 9 => {
            server.play(index);
            StatusCode::OK
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

async fn spawn_server(server: TestServer) -> String {
    let app = Router::new()
        .route("/init", post(init))
        .route("/state", get(state))
        .route("/engine_move", post(engine_move))
        .route("/manual_move", post(manual_move))
        .with_state(server);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

fn service(url: &str) -> HttpGameService {
    HttpGameService::new(url, Duration::from_secs(2)).expect("client builds")
}

#[tokio::test]
async fn test_wire_contract_round_trip() {
    let server = TestServer::default();
    let url = spawn_server(server.clone()).await;
    let service = service(&url);
    assert!(!service.base_url().ends_with('/'));

    service.initialize().await.unwrap();
    let snapshot = service.state().await.unwrap();
    assert!(snapshot.cells().iter().all(|c| *c == Cell::Empty));
    assert_eq!(snapshot.side_to_move(), TurnIndicator::ToMove(Side::A));

    service.manual_move(Position::Center).await.unwrap();
    assert_eq!(server.manual_bodies.lock().unwrap().as_slice(), ["4"]);

    service.engine_move().await.unwrap();
    let snapshot = service.state().await.unwrap();
    assert_eq!(snapshot.cell(Position::Center), Cell::Marked(Side::A));
    assert_eq!(snapshot.cell(Position::TopLeft), Cell::Marked(Side::B));
    assert_eq!(snapshot.side_to_move(), TurnIndicator::ToMove(Side::A));
}

#[tokio::test]
async fn test_state_before_init_is_malformed() {
    let url = spawn_server(TestServer::default()).await;
    let err = service(&url).state().await.unwrap_err();
    assert!(matches!(err.kind, ServiceErrorKind::MalformedState(_)));
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let url = spawn_server(TestServer::default()).await;
    let err = service(&url).engine_move().await.unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::Status(500));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = service(&format!("http://{}", addr)).state().await.unwrap_err();
    assert!(matches!(err.kind, ServiceErrorKind::Transport(_)));
}

#[tokio::test]
async fn test_client_plays_against_engine_over_http() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let server = TestServer::default();
    let url = spawn_server(server.clone()).await;
    let client = GameClient::new(
        service(&url),
        ControlAssignment::new(ControlMode::Engine, ControlMode::Human),
        Duration::from_millis(10),
    );

    assert_eq!(client.initialize().await, DispatchOutcome::Completed);
    let _handle = client.start_polling();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !client.is_human_turn() {
        assert!(tokio::time::Instant::now() < deadline, "engine never moved");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(client.snapshot().cell(Position::TopLeft), Cell::Marked(Side::A));

    assert_eq!(
        client.submit_human_move(Position::Center).await,
        DispatchOutcome::Completed
    );
    assert_eq!(client.snapshot().cell(Position::Center), Cell::Marked(Side::B));
}
