//! Tests for move dispatch and turn guards.

mod common;

use common::{Call, ScriptedService};
use std::sync::Arc;
use std::time::Duration;
use ttt_client::{
    Cell, ControlAssignment, ControlMode, DispatchOutcome, GameClient, Operation, PendingMove,
    Position, Side, TurnIndicator,
};

fn client_with(
    service: Arc<ScriptedService>,
    side_a: ControlMode,
    side_b: ControlMode,
) -> GameClient<ScriptedService> {
    GameClient::with_shared_service(
        service,
        ControlAssignment::new(side_a, side_b),
        Duration::from_millis(100),
    )
}

#[tokio::test]
async fn test_initial_human_turn_against_engine() {
    let service = Arc::new(ScriptedService::new());
    let client = client_with(Arc::clone(&service), ControlMode::Human, ControlMode::Engine);

    client.refresh().await;

    assert!(client.is_human_turn());
    assert!(!client.is_engine_turn());
}

#[tokio::test]
async fn test_human_move_sends_then_refreshes() {
    let service = Arc::new(ScriptedService::new());
    let client = client_with(Arc::clone(&service), ControlMode::Human, ControlMode::Engine);
    client.refresh().await;

    let outcome = client.submit_human_move(Position::Center).await;

    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(service.calls()[1..], [Call::ManualMove(4), Call::State]);
    assert_eq!(client.snapshot().cell(Position::Center), Cell::Marked(Side::A));
    assert_eq!(client.side_to_move(), TurnIndicator::ToMove(Side::B));
    assert!(client.is_engine_turn());
    assert_eq!(client.view().in_flight(), None);
}

#[tokio::test]
async fn test_human_move_rejected_when_other_side_to_move() {
    let service = Arc::new(ScriptedService::new());
    let client = client_with(Arc::clone(&service), ControlMode::Human, ControlMode::Engine);
    service.set_wire([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2]);
    client.refresh().await;

    let outcome = client.submit_human_move(Position::Center).await;

    assert_eq!(outcome, DispatchOutcome::Rejected);
    assert_eq!(service.manual_calls(), 0);
    assert!(client.last_failure().is_none());
}

#[tokio::test]
async fn test_engine_move_rejected_on_human_turn() {
    let service = Arc::new(ScriptedService::new());
    let client = client_with(Arc::clone(&service), ControlMode::Human, ControlMode::Engine);
    client.refresh().await;

    assert_eq!(client.submit_engine_move().await, DispatchOutcome::Rejected);
    assert_eq!(service.engine_calls(), 0);
    assert_eq!(client.side_to_move(), TurnIndicator::ToMove(Side::A));
}

#[tokio::test]
async fn test_moves_are_noops_after_game_over() {
    let service = Arc::new(ScriptedService::new());
    let client = client_with(Arc::clone(&service), ControlMode::Human, ControlMode::Human);
    // X completes the top row.
    service.set_wire([1, 1, 0, 2, 2, 0, 0, 0, 0, 0, 1]);
    client.refresh().await;

    assert_eq!(
        client.submit_human_move(Position::TopRight).await,
        DispatchOutcome::Completed
    );
    assert!(client.game_over());
    assert!(!client.is_human_turn());
    assert!(!client.is_engine_turn());

    let calls_before = service.calls().len();
    assert_eq!(
        client.submit_human_move(Position::BottomLeft).await,
        DispatchOutcome::Rejected
    );
    client.set_control(Side::B, ControlMode::Engine);
    assert_eq!(client.submit_engine_move().await, DispatchOutcome::Rejected);
    assert_eq!(service.calls().len(), calls_before);
}

#[tokio::test]
async fn test_engine_move_suspends_turn_while_in_flight() {
    let service = Arc::new(ScriptedService::new());
    let client = client_with(Arc::clone(&service), ControlMode::Engine, ControlMode::Human);
    client.refresh().await;
    service.gate_moves();

    let in_flight = tokio::spawn({
        let client = client.clone();
        async move { client.submit_engine_move().await }
    });
    while service.engine_calls() == 0 {
        tokio::task::yield_now().await;
    }

    assert_eq!(client.side_to_move(), TurnIndicator::Suspended);
    assert_eq!(client.view().in_flight(), Some(PendingMove::Engine));
    assert!(!client.is_engine_turn());
    assert_eq!(client.submit_engine_move().await, DispatchOutcome::Rejected);

    service.release(1);
    assert_eq!(in_flight.await.unwrap(), DispatchOutcome::Completed);
    assert_eq!(service.engine_calls(), 1);
    assert_eq!(client.side_to_move(), TurnIndicator::ToMove(Side::B));
    assert!(client.is_human_turn());
}

#[tokio::test]
async fn test_double_click_sends_one_manual_move() {
    let service = Arc::new(ScriptedService::new());
    let client = client_with(Arc::clone(&service), ControlMode::Human, ControlMode::Human);
    client.refresh().await;
    service.gate_moves();

    let first = tokio::spawn({
        let client = client.clone();
        async move { client.submit_human_move(Position::TopLeft).await }
    });
    while service.manual_calls() == 0 {
        tokio::task::yield_now().await;
    }

    assert_eq!(
        client.submit_human_move(Position::Center).await,
        DispatchOutcome::Rejected
    );

    service.release(1);
    assert_eq!(first.await.unwrap(), DispatchOutcome::Completed);
    assert_eq!(service.manual_calls(), 1);
    assert_eq!(client.side_to_move(), TurnIndicator::ToMove(Side::B));
}

#[tokio::test]
async fn test_failed_engine_move_is_reported_not_returned() {
    let service = Arc::new(ScriptedService::new());
    let client = client_with(Arc::clone(&service), ControlMode::Engine, ControlMode::Human);
    client.refresh().await;
    service.fail_moves(true);

    assert_eq!(client.submit_engine_move().await, DispatchOutcome::Failed);

    let failure = client.last_failure().expect("failure recorded");
    assert_eq!(failure.operation, Operation::EngineMove);
    assert_eq!(client.view().in_flight(), None);
    assert_eq!(client.side_to_move(), TurnIndicator::Suspended);
    assert!(client.view().needs_resync());
    assert_eq!(service.count(|c| *c == Call::State), 1);
}

#[tokio::test]
async fn test_control_change_does_not_cancel_in_flight_move() {
    let service = Arc::new(ScriptedService::new());
    let client = client_with(Arc::clone(&service), ControlMode::Engine, ControlMode::Human);
    client.refresh().await;
    service.gate_moves();

    let in_flight = tokio::spawn({
        let client = client.clone();
        async move { client.submit_engine_move().await }
    });
    while service.engine_calls() == 0 {
        tokio::task::yield_now().await;
    }

    client.set_control(Side::A, ControlMode::Human);
    service.release(1);

    assert_eq!(in_flight.await.unwrap(), DispatchOutcome::Completed);
    assert_eq!(client.snapshot().cell(Position::TopLeft), Cell::Marked(Side::A));
    assert_eq!(client.controls().mode_for(Side::A), ControlMode::Human);
}
