//! Protocol module - JSON message types for host collaborators
//!
//! Implements a line-delimited JSON protocol: the host sends intent messages,
//! the adapter answers with ack/error plus an observation after every applied
//! transition. All messages have: type, seq (sequence number), ts (timestamp
//! in ms).

use serde::{Deserialize, Serialize};

use pentomino_core::{SessionSnapshot, ShapeState};
use pentomino_types::{Intent, ShapeId};

// ============== Host -> Engine Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentType {
    #[serde(rename = "intent")]
    Intent,
}

impl Default for IntentType {
    fn default() -> Self {
        Self::Intent
    }
}

/// Intent verbs accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentName {
    #[serde(rename = "pick")]
    Pick,
    #[serde(rename = "pointer")]
    Pointer,
    #[serde(rename = "rotate")]
    Rotate,
    #[serde(rename = "mirror")]
    Mirror,
    #[serde(rename = "place")]
    Place,
    #[serde(rename = "reset")]
    Reset,
    #[serde(rename = "ratio")]
    Ratio,
}

/// One player intent from the host.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: IntentType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub intent: IntentName,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub ratio: Option<f32>,
}

impl IntentMessage {
    /// Convert the wire message into a core intent. Missing or unknown
    /// fields are reported as `invalid_intent`.
    pub fn to_intent(&self) -> Result<Intent, ErrorCode> {
        let shape = || {
            self.shape
                .as_deref()
                .and_then(ShapeId::from_str)
                .ok_or(ErrorCode::InvalidIntent)
        };
        match self.intent {
            IntentName::Pick => Ok(Intent::Pick(shape()?)),
            IntentName::Rotate => Ok(Intent::Rotate(shape()?)),
            IntentName::Mirror => Ok(Intent::Mirror(shape()?)),
            IntentName::Reset => Ok(Intent::Reset(shape()?)),
            IntentName::Place => Ok(Intent::Place),
            IntentName::Pointer => match (self.x, self.y) {
                (Some(x), Some(y)) => Ok(Intent::PointerMove { x, y }),
                _ => Err(ErrorCode::InvalidIntent),
            },
            IntentName::Ratio => match self.ratio {
                Some(ratio) => Ok(Intent::SetRatio(ratio)),
                None => Err(ErrorCode::InvalidIntent),
            },
        }
    }
}

// ============== Engine -> Host Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

/// Stable error codes surfaced to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_intent")]
    InvalidIntent,
    #[serde(rename = "invalid_place")]
    InvalidPlace,
    #[serde(rename = "no_active")]
    NoActive,
    #[serde(rename = "no_board")]
    NoBoard,
    #[serde(rename = "duplicate_entity")]
    DuplicateEntity,
    #[serde(rename = "unknown_entity")]
    UnknownEntity,
    #[serde(rename = "malformed_level")]
    MalformedLevel,
}

/// Acknowledgment for an applied intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardObservation {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<u8>,
    pub position: [f32; 2],
    pub ratio: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeObservation {
    pub id: String,
    pub state: String,
    pub rows: usize,
    pub cells: Vec<u8>,
    pub position: [f32; 2],
    pub angle: u16,
    pub mirrored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouse: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<[i32; 2]>,
}

/// Full observable state (sent after every applied transition)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub solved: bool,
    pub board: BoardObservation,
    pub shapes: Vec<ShapeObservation>,
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Intent(IntentMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse a JSON message from a string. An unknown message type is not a hard
/// parse error; it is surfaced so the host can receive a targeted rejection.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    struct TypeOnly<'a> {
        #[serde(rename = "type")]
        #[serde(borrow)]
        msg_type: Option<&'a str>,
        seq: Option<u64>,
    }

    let head: TypeOnly = serde_json::from_str(json)?;
    match head.msg_type {
        Some("intent") => Ok(ParsedMessage::Intent(serde_json::from_str(json)?)),
        _ => Ok(ParsedMessage::Unknown(UnknownMessage {
            seq: head.seq.unwrap_or(0),
        })),
    }
}

// ============== Utility Functions ==============

/// Create an acknowledgment
pub fn create_ack(seq: u64) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Create an observation from a session snapshot
pub fn create_observation(seq: u64, snapshot: &SessionSnapshot) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        solved: snapshot.solved,
        board: BoardObservation {
            rows: snapshot.board.rows,
            columns: snapshot.board.columns,
            cells: snapshot.board.cells.clone(),
            position: [snapshot.board.position.0, snapshot.board.position.1],
            ratio: snapshot.board.ratio,
        },
        shapes: snapshot
            .shapes
            .iter()
            .map(|shape| ShapeObservation {
                id: shape.id.as_str().to_string(),
                state: match shape.state {
                    ShapeState::Pack => "pack",
                    ShapeState::Active => "active",
                    ShapeState::Placed => "placed",
                }
                .to_string(),
                rows: shape.rows,
                cells: shape.cells.clone(),
                position: [shape.position.0, shape.position.1],
                angle: shape.angle,
                mirrored: shape.mirrored,
                mouse: shape.mouse.map(|(x, y)| [x, y]),
                cell: shape.cell.map(|(x, y)| [x, y]),
            })
            .collect(),
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
