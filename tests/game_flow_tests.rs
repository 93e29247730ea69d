//! Game Flow Integration Tests
//!
//! Full click flows through the session: select a piece, preview markers,
//! commit a move optimistically, then reconcile with the server's push.

use boardlink::game::{BoardStore, Cell, ClickOutcome};
use boardlink::networking::{ClientIdentity, NetworkResult, Session, Transport};
use shared::protocol::{ClientMessage, Color, GameState, Move, Piece, PieceKind, ServerMessage};

#[derive(Default)]
struct RecordingTransport {
    sent: Vec<ClientMessage>,
}

impl Transport for RecordingTransport {
    fn send(&mut self, message: &ClientMessage) -> NetworkResult<()> {
        self.sent.push(message.clone());
        Ok(())
    }

    fn close(&mut self) {}
}

fn state_from(board: &BoardStore, turn: Color) -> GameState {
    let mut squares = vec![None; 64];
    for (square, piece) in board.pieces() {
        squares[square as usize] = Some(piece);
    }
    GameState {
        board: squares,
        turn,
        move_history: Vec::new(),
        taken_pieces: Vec::new(),
    }
}

fn playing_as(role: Color, turn: Color) -> Session<RecordingTransport> {
    let mut session = Session::new(
        ClientIdentity {
            client_id: "me".to_string(),
            game_id: "g".to_string(),
        },
        RecordingTransport::default(),
    );
    session.on_open();
    session.apply(ServerMessage::ColorAssigned { color: role });
    session.apply(ServerMessage::GameStarted);
    session.apply(ServerMessage::GameState {
        state: state_from(&BoardStore::standard(), turn),
    });
    session
}

fn moves_sent(session: &Session<RecordingTransport>) -> Vec<Move> {
    session
        .transport()
        .sent
        .iter()
        .filter_map(|message| match message {
            ClientMessage::MakeMove { move_ } => Some(move_.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_white_selects_and_pushes_pawn() {
    let mut session = playing_as(Color::White, Color::White);

    // e2 pawn sits on visual row 6, column 4 for White.
    let outcome = session.click(6, 4);
    assert_eq!(
        outcome,
        ClickOutcome::Selected {
            origin: 52,
            candidates: 2
        }
    );
    assert_eq!(session.board().markers().collect::<Vec<_>>(), vec![36, 44]);

    let outcome = session.click(4, 4);
    assert!(matches!(outcome, ClickOutcome::Commit(_)));

    let expected = Move {
        from: 52,
        to: 36,
        promotion: None,
    };
    assert_eq!(moves_sent(&session), vec![expected]);
    assert_eq!(session.board().marker_count(), 0);
    assert!(session.board().is_empty(52));
    assert_eq!(
        session.board().get(36).piece(),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
}

#[test]
fn test_black_clicks_are_flipped() {
    let mut session = playing_as(Color::Black, Color::Black);

    // Black's d7 pawn (absolute 11) is drawn on visual row 6, column 4.
    let outcome = session.click(6, 4);
    assert_eq!(
        outcome,
        ClickOutcome::Selected {
            origin: 11,
            candidates: 2
        }
    );
    assert_eq!(session.board().markers().collect::<Vec<_>>(), vec![19, 27]);

    session.click(4, 4);
    assert_eq!(
        moves_sent(&session),
        vec![Move {
            from: 11,
            to: 27,
            promotion: None
        }]
    );
}

#[test]
fn test_board_is_read_only_until_move_is_confirmed() {
    let mut session = playing_as(Color::White, Color::White);
    session.click(6, 4);
    session.click(4, 4);

    // d2 pawn cannot be picked up while e2-e4 is in flight.
    assert_eq!(session.click(6, 3), ClickOutcome::Ignored);
    assert_eq!(session.board().marker_count(), 0);

    let mut pushed = BoardStore::standard();
    pushed.set(52, Cell::Empty);
    pushed.set(36, Cell::Piece(Piece::new(Color::White, PieceKind::Pawn)));
    session.apply(ServerMessage::GameState {
        state: state_from(&pushed, Color::Black),
    });

    assert!(!session.is_awaiting_push());
    assert_eq!(moves_sent(&session).len(), 1);
}

#[test]
fn test_clicks_out_of_turn_do_nothing() {
    let mut session = playing_as(Color::Black, Color::White);
    let before = session.board().clone();

    assert_eq!(session.click(6, 4), ClickOutcome::Ignored);
    assert_eq!(session.board(), &before);
    assert!(moves_sent(&session).is_empty());
}

#[test]
fn test_clicking_opponent_piece_does_nothing() {
    let mut session = playing_as(Color::White, Color::White);

    assert_eq!(session.click(1, 4), ClickOutcome::Ignored);
    assert_eq!(session.board().marker_count(), 0);
}

#[test]
fn test_non_marker_square_while_selected_is_ignored() {
    let mut session = playing_as(Color::White, Color::White);
    session.click(6, 4);

    // Empty square that is not a candidate.
    assert_eq!(session.click(3, 0), ClickOutcome::Ignored);
    assert_eq!(session.board().marker_count(), 2);
    assert!(moves_sent(&session).is_empty());

    // Clicking the selection again cancels it.
    assert_eq!(session.click(6, 4), ClickOutcome::Deselected);
    assert_eq!(session.board().marker_count(), 0);
}

#[test]
fn test_authoritative_push_discards_pending_markers() {
    let mut session = playing_as(Color::White, Color::White);
    session.click(7, 1);
    assert_eq!(session.board().marker_count(), 2);

    let mut pushed = BoardStore::standard();
    pushed.set(52, Cell::Empty);
    pushed.set(36, Cell::Piece(Piece::new(Color::White, PieceKind::Pawn)));
    session.apply(ServerMessage::GameState {
        state: state_from(&pushed, Color::Black),
    });

    assert_eq!(session.board().marker_count(), 0);
    assert!(!session.selection().is_active());
    assert_eq!(session.board().pieces().count(), 32);
    assert!(!session.can_move());
}

#[test]
fn test_optimistic_move_is_reconciled_by_server() {
    let mut session = playing_as(Color::White, Color::White);
    session.click(6, 4);
    session.click(4, 4);

    // Server rejected the move and re-sent the original position.
    session.apply(ServerMessage::Error {
        message: "Invalid move or not your turn".to_string(),
    });
    session.apply(ServerMessage::GameState {
        state: state_from(&BoardStore::standard(), Color::White),
    });

    assert_eq!(
        session.board().pieces().collect::<Vec<_>>(),
        BoardStore::standard().pieces().collect::<Vec<_>>()
    );
    assert!(session.can_move());
}

#[test]
fn test_board_version_changes_on_every_update() {
    let mut session = playing_as(Color::White, Color::White);
    let v0 = session.board().version();

    session.click(6, 4);
    let v1 = session.board().version();
    assert!(v1 > v0);

    session.click(6, 4);
    let v2 = session.board().version();
    assert!(v2 > v1);
}
