use serde::{Deserialize, Serialize};

/// Board square index, `rank * 8 + file` in the server's absolute orientation.
pub type Square = u8;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Rook,
    Knight,
    Bishop,
    King,
    Queen,
    Pawn,
}

/// A piece as sent on the wire: `{"color": "White", "piece": "Rook"}`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    #[serde(rename = "piece")]
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

/// Full authoritative snapshot, always in absolute orientation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Vec<Option<Piece>>,
    pub turn: Color,
    #[serde(rename = "moveHistory", alias = "move_history", default)]
    pub move_history: Vec<Move>,
    #[serde(rename = "takenPieces", alias = "taken_pieces", default)]
    pub taken_pieces: Vec<Piece>,
}

/// Client → Server
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ClientMessage {
    Identify { id: String },
    JoinGame { game_id: String },
    MakeMove { move_: Move },
    Resign,
}

/// Server → Client
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ServerMessage {
    ColorAssigned { color: Color },
    WaitingForPlayers { connected_count: u8 },
    GameStarted,
    GameState { state: GameState },
    MoveMade { move_: Move },
    Error { message: String },
}

/// Body of the game-creation request (`PUT /api/game`)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewGameBody {
    pub color: Color,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewGameResponse {
    #[serde(rename = "gameId")]
    pub game_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_join_game_is_tagged() {
        let msg = ClientMessage::JoinGame {
            game_id: "default".to_string(),
        };
        let json = serde_json::to_value(&msg).expect("Should serialize");
        assert_eq!(json["type"], "JoinGame");
        assert_eq!(json["game_id"], "default");
    }

    #[test]
    fn test_client_message_resign_has_only_tag() {
        let json = serde_json::to_string(&ClientMessage::Resign).expect("Should serialize");
        assert_eq!(json, r#"{"type":"Resign"}"#);
    }

    #[test]
    fn test_make_move_omits_missing_promotion() {
        let msg = ClientMessage::MakeMove {
            move_: Move {
                from: 52,
                to: 36,
                promotion: None,
            },
        };
        let json = serde_json::to_value(&msg).expect("Should serialize");
        assert_eq!(json["type"], "MakeMove");
        assert_eq!(json["move_"]["from"], 52);
        assert_eq!(json["move_"]["to"], 36);
        assert!(json["move_"].get("promotion").is_none());
    }

    #[test]
    fn test_make_move_with_promotion() {
        let raw = r#"{"type":"MakeMove","move_":{"from":8,"to":0,"promotion":"Queen"}}"#;
        let decoded: ClientMessage = serde_json::from_str(raw).expect("Should deserialize");
        assert_eq!(
            decoded,
            ClientMessage::MakeMove {
                move_: Move {
                    from: 8,
                    to: 0,
                    promotion: Some(PieceKind::Queen)
                }
            }
        );
    }

    #[test]
    fn test_server_message_color_assigned() {
        let decoded: ServerMessage =
            serde_json::from_str(r#"{"type":"ColorAssigned","color":"Black"}"#)
                .expect("Should deserialize");
        assert_eq!(
            decoded,
            ServerMessage::ColorAssigned {
                color: Color::Black
            }
        );
    }

    #[test]
    fn test_server_message_waiting_and_started() {
        let waiting: ServerMessage =
            serde_json::from_str(r#"{"type":"WaitingForPlayers","connected_count":1}"#)
                .expect("Should deserialize");
        assert_eq!(
            waiting,
            ServerMessage::WaitingForPlayers { connected_count: 1 }
        );

        let started: ServerMessage =
            serde_json::from_str(r#"{"type":"GameStarted"}"#).expect("Should deserialize");
        assert_eq!(started, ServerMessage::GameStarted);
    }

    #[test]
    fn test_game_state_accepts_both_history_spellings() {
        let mut board = vec![serde_json::Value::Null; 64];
        board[0] = serde_json::json!({"color": "Black", "piece": "Rook"});

        let camel = serde_json::json!({
            "type": "GameState",
            "state": {
                "board": board,
                "turn": "White",
                "moveHistory": [{"from": 52, "to": 36}],
                "takenPieces": []
            }
        });
        let snake = serde_json::json!({
            "type": "GameState",
            "state": {
                "board": board,
                "turn": "White",
                "move_history": [{"from": 52, "to": 36}]
            }
        });

        let camel: ServerMessage = serde_json::from_value(camel).expect("Should deserialize");
        let snake: ServerMessage = serde_json::from_value(snake).expect("Should deserialize");
        assert_eq!(camel, snake);

        match camel {
            ServerMessage::GameState { state } => {
                assert_eq!(state.board.len(), 64);
                assert_eq!(
                    state.board[0],
                    Some(Piece::new(Color::Black, PieceKind::Rook))
                );
                assert_eq!(state.turn, Color::White);
                assert_eq!(state.move_history.len(), 1);
                assert!(state.taken_pieces.is_empty());
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_server_error_message() {
        let decoded: ServerMessage =
            serde_json::from_str(r#"{"type":"Error","message":"Game not found"}"#)
                .expect("Should deserialize");
        match decoded {
            ServerMessage::Error { message } => assert_eq!(message, "Game not found"),
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_unknown_message_type_is_rejected() {
        let result = serde_json::from_str::<ServerMessage>(r#"{"type":"Teleport"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_game_response_uses_camel_case() {
        let decoded: NewGameResponse =
            serde_json::from_str(r#"{"gameId":"6f1c"}"#).expect("Should deserialize");
        assert_eq!(decoded.game_id, "6f1c");

        let body = serde_json::to_string(&NewGameBody {
            color: Color::White,
        })
        .expect("Should serialize");
        assert_eq!(body, r#"{"color":"White"}"#);
    }

    #[test]
    fn test_color_opposite() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }
}
