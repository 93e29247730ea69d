//! Session state machine
//!
//! Keeps the local board consistent with server-pushed state and decides
//! which local intents are allowed to reach the wire. Connection, lobby and
//! role live in one [`SessionState`] so that combinations such as "started
//! without a color" cannot be represented.

use shared::protocol::{ClientMessage, Color, GameState, Move, Piece, ServerMessage};
use tracing::{debug, info, warn};

use super::transport::Transport;
use crate::game::coordinates::to_absolute;
use crate::game::rules::{BoardStore, SQUARE_COUNT};
use crate::game::selection::{ClickOutcome, Selection};

/// Who this client is and which game it wants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub client_id: String,
    pub game_id: String,
}

/// Coarse transport status, derived from [`SessionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    /// Join sent, no lobby news yet
    Idle,
    WaitingForPeer(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Lobby { role: Option<Color>, room: RoomPhase },
    Started { role: Color },
    Closed,
}

impl SessionState {
    pub fn role(&self) -> Option<Color> {
        match *self {
            SessionState::Lobby { role, .. } => role,
            SessionState::Started { role } => Some(role),
            SessionState::Connecting | SessionState::Closed => None,
        }
    }
}

pub struct Session<T: Transport> {
    identity: ClientIdentity,
    transport: T,
    state: SessionState,
    /// Role survives a close so the board keeps its orientation.
    last_role: Option<Color>,
    turn: Option<Color>,
    /// A committed move has not been confirmed or rejected yet.
    awaiting_push: bool,
    board: BoardStore,
    selection: Selection,
    move_history: Vec<Move>,
    taken_pieces: Vec<Piece>,
    last_move: Option<Move>,
    notice: Option<String>,
}

impl<T: Transport> Session<T> {
    pub fn new(identity: ClientIdentity, transport: T) -> Self {
        Self {
            identity,
            transport,
            state: SessionState::Connecting,
            last_role: None,
            turn: None,
            awaiting_push: false,
            board: BoardStore::standard(),
            selection: Selection::default(),
            move_history: Vec::new(),
            taken_pieces: Vec::new(),
            last_move: None,
            notice: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn connection_state(&self) -> ConnectionState {
        match self.state {
            SessionState::Connecting => ConnectionState::Connecting,
            SessionState::Lobby { .. } | SessionState::Started { .. } => ConnectionState::Open,
            SessionState::Closed => ConnectionState::Closed,
        }
    }

    pub fn role(&self) -> Option<Color> {
        self.state.role()
    }

    /// Orientation the board is drawn in; White until a role is known
    pub fn perspective(&self) -> Color {
        self.role().or(self.last_role).unwrap_or(Color::White)
    }

    pub fn turn(&self) -> Option<Color> {
        self.turn
    }

    pub fn board(&self) -> &BoardStore {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn taken_pieces(&self) -> &[Piece] {
        &self.taken_pieces
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// Last non-fatal message from the server
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn identity(&self) -> &ClientIdentity {
        &self.identity
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_started(&self) -> bool {
        matches!(self.state, SessionState::Started { .. })
    }

    /// A move was sent and the server has not answered it yet
    pub fn is_awaiting_push(&self) -> bool {
        self.awaiting_push
    }

    /// Open, started, assigned, our turn, and no move in flight.
    pub fn can_move(&self) -> bool {
        match self.state {
            SessionState::Started { role } => self.turn == Some(role) && !self.awaiting_push,
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Transport lifecycle
    // ------------------------------------------------------------------

    /// Transport is up: identify, then join the configured game.
    pub fn on_open(&mut self) {
        info!("[NETWORK] Connected to game server");
        self.awaiting_push = false;
        self.state = SessionState::Lobby {
            role: None,
            room: RoomPhase::Idle,
        };
        let id = self.identity.client_id.clone();
        self.send(ClientMessage::Identify { id });
        let game_id = self.identity.game_id.clone();
        self.join(game_id);
    }

    /// Ask the server to join (or create) `game_id`.
    pub fn join(&mut self, game_id: String) {
        if self.connection_state() != ConnectionState::Open {
            return;
        }
        info!("[LOBBY] Joining game {}", game_id);
        self.identity.game_id = game_id.clone();
        self.send(ClientMessage::JoinGame { game_id });
    }

    /// Transport lost: the board becomes read-only until a reconnect.
    pub fn on_close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        warn!("[NETWORK] Disconnected from game server");
        if let Some(role) = self.role() {
            self.last_role = Some(role);
        }
        self.state = SessionState::Closed;
        self.awaiting_push = false;
        self.selection.cancel(&mut self.board);
        self.transport.close();
    }

    /// Install a fresh transport; call [`Session::on_open`] once it is up.
    pub fn reconnect(&mut self, transport: T) {
        self.transport.close();
        self.transport = transport;
        self.state = SessionState::Connecting;
    }

    /// Tear down for good, e.g. when the view goes away.
    pub fn shutdown(&mut self) {
        self.on_close();
        self.transport.close();
    }

    // ------------------------------------------------------------------
    // Inbound
    // ------------------------------------------------------------------

    /// Apply one raw text frame. Unparseable frames are logged and dropped.
    pub fn handle_frame(&mut self, frame: &str) {
        match serde_json::from_str::<ServerMessage>(frame) {
            Ok(message) => self.apply(message),
            Err(e) => warn!("[NETWORK] Failed to parse message: {} ({})", e, frame),
        }
    }

    pub fn apply(&mut self, message: ServerMessage) {
        debug!("[NETWORK] <- {:?}", message);
        match message {
            ServerMessage::ColorAssigned { color } => self.on_color_assigned(color),
            ServerMessage::WaitingForPlayers { connected_count } => {
                self.on_waiting(connected_count)
            }
            ServerMessage::GameStarted => self.on_game_started(),
            ServerMessage::GameState { state } => self.on_game_state(state),
            ServerMessage::MoveMade { move_ } => {
                info!("[GAME] Move made: {} -> {}", move_.from, move_.to);
                self.last_move = Some(move_);
            }
            ServerMessage::Error { message } => {
                warn!("[GAME] Server error: {}", message);
                self.awaiting_push = false;
                self.notice = Some(message);
            }
        }
    }

    fn on_color_assigned(&mut self, color: Color) {
        match self.state {
            SessionState::Lobby { role: None, room } => {
                info!("[LOBBY] Assigned color: {:?}", color);
                self.state = SessionState::Lobby {
                    role: Some(color),
                    room,
                };
                self.last_role = Some(color);
            }
            SessionState::Lobby {
                role: Some(current),
                ..
            }
            | SessionState::Started { role: current } => {
                if current != color {
                    warn!(
                        "[LOBBY] Ignoring conflicting color {:?}, already playing {:?}",
                        color, current
                    );
                }
            }
            SessionState::Connecting | SessionState::Closed => {
                warn!("[LOBBY] Ignoring color assignment while not connected");
            }
        }
    }

    fn on_waiting(&mut self, connected_count: u8) {
        let Some(role) = self.open_role() else {
            return;
        };
        info!("[LOBBY] Waiting for players: {}/2", connected_count);
        if self.is_started() {
            // A full room is re-announced when an extra connection is turned away.
            if connected_count >= 2 {
                return;
            }
            self.selection.cancel(&mut self.board);
        }
        self.state = SessionState::Lobby {
            role,
            room: RoomPhase::WaitingForPeer(connected_count),
        };
    }

    fn on_game_started(&mut self) {
        match self.state {
            SessionState::Lobby {
                role: Some(role), ..
            } => {
                info!("[LOBBY] Game started! You are {:?}", role);
                self.state = SessionState::Started { role };
            }
            SessionState::Started { .. } => {}
            _ => warn!("[LOBBY] Ignoring GameStarted without an assigned color"),
        }
    }

    fn on_game_state(&mut self, state: GameState) {
        let board: [Option<Piece>; SQUARE_COUNT] = match state.board.try_into() {
            Ok(board) => board,
            Err(rejected) => {
                let rejected: Vec<Option<Piece>> = rejected;
                warn!("[GAME] Dropping game state with {} squares", rejected.len());
                return;
            }
        };

        self.turn = Some(state.turn);
        self.awaiting_push = false;
        self.move_history = state.move_history;
        self.taken_pieces = state.taken_pieces;
        self.selection.clear();
        self.board.replace_all(&board);
        info!("[GAME] State update: turn={:?}", state.turn);
    }

    /// `Some(role)` while the transport is open
    fn open_role(&self) -> Option<Option<Color>> {
        match self.state {
            SessionState::Lobby { role, .. } => Some(role),
            SessionState::Started { role } => Some(Some(role)),
            SessionState::Connecting | SessionState::Closed => None,
        }
    }

    // ------------------------------------------------------------------
    // Local intents
    // ------------------------------------------------------------------

    /// Click on a visual square as drawn for [`Session::perspective`]
    ///
    /// Invariant: the render surface disables input whenever `can_move()`
    /// is false, so the early return is never hit from a correct view.
    pub fn click(&mut self, row: u8, col: u8) -> ClickOutcome {
        if !self.can_move() || row > 7 || col > 7 {
            return ClickOutcome::Ignored;
        }
        let Some(mover) = self.role() else {
            return ClickOutcome::Ignored;
        };

        let square = to_absolute(row, col, self.perspective());
        let outcome = self.selection.handle_click(&mut self.board, square, mover);
        if let ClickOutcome::Commit(mv) = &outcome {
            self.board.apply_move(mv);
            self.submit_move(mv.clone());
        }
        outcome
    }

    /// Send a move; a silent no-op unless [`Session::can_move`] holds.
    pub fn submit_move(&mut self, mv: Move) {
        if !self.can_move() {
            return;
        }
        info!("[GAME] Sending move {} -> {}", mv.from, mv.to);
        self.send(ClientMessage::MakeMove { move_: mv });
        self.awaiting_push = true;
    }

    pub fn resign(&mut self) {
        if !self.is_started() {
            return;
        }
        info!("[GAME] Resigning");
        self.selection.cancel(&mut self.board);
        self.send(ClientMessage::Resign);
    }

    fn send(&mut self, message: ClientMessage) {
        if let Err(e) = self.transport.send(&message) {
            warn!("[NETWORK] Failed to send {:?}: {}", message, e);
        }
    }
}
