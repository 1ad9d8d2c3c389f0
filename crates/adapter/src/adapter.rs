//! Adapter integration - applies protocol messages to a session
//!
//! One adapter wraps one session. Every handled line yields the responses to
//! write back, in order; an observation follows every message that changed
//! state so observers never miss a transition.

use log::debug;

use pentomino_core::GameSession;
use pentomino_engine::{apply_intent, IntentOutcome};
use pentomino_types::{Intent, DEFAULT_CELL_SIZE};

use crate::protocol::{
    create_ack, create_error, create_observation, parse_message, AckMessage, ErrorCode,
    ErrorMessage, ObservationMessage, ParsedMessage,
};

/// A message queued for the host.
#[derive(Debug, Clone)]
pub enum Outbound {
    Ack(AckMessage),
    Error(ErrorMessage),
    Observation(ObservationMessage),
}

impl Outbound {
    /// Serialize for the line-delimited wire
    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Outbound::Ack(msg) => serde_json::to_string(msg),
            Outbound::Error(msg) => serde_json::to_string(msg),
            Outbound::Observation(msg) => serde_json::to_string(msg),
        }
    }
}

/// Protocol front end over one game session.
#[derive(Debug)]
pub struct GameAdapter {
    session: GameSession,
    cell_size: f32,
    seq: u64,
}

impl GameAdapter {
    pub fn new(session: GameSession) -> Self {
        Self::with_cell_size(session, DEFAULT_CELL_SIZE)
    }

    pub fn with_cell_size(session: GameSession, cell_size: f32) -> Self {
        Self {
            session,
            cell_size,
            seq: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn next_seq(&mut self) -> u64 {
        self.seq = self.seq.wrapping_add(1);
        self.seq
    }

    /// Current observable state as a protocol message
    pub fn observation(&mut self) -> ObservationMessage {
        let seq = self.next_seq();
        create_observation(seq, &self.session.snapshot())
    }

    /// Handle one line from the host and return the responses in order.
    pub fn handle_line(&mut self, line: &str) -> Vec<Outbound> {
        let message = match parse_message(line) {
            Ok(message) => message,
            Err(e) => {
                return vec![Outbound::Error(create_error(
                    0,
                    ErrorCode::InvalidIntent,
                    &format!("invalid json: {}", e),
                ))];
            }
        };

        let intent_msg = match message {
            ParsedMessage::Intent(msg) => msg,
            ParsedMessage::Unknown(unknown) => {
                return vec![Outbound::Error(create_error(
                    unknown.seq,
                    ErrorCode::InvalidIntent,
                    "unknown message type",
                ))];
            }
        };

        let intent = match intent_msg.to_intent() {
            Ok(intent) => intent,
            Err(code) => {
                return vec![Outbound::Error(create_error(
                    intent_msg.seq,
                    code,
                    "missing or unknown intent fields",
                ))];
            }
        };

        debug!("applying intent {:?}", intent);
        match apply_intent(&mut self.session, intent, self.cell_size) {
            IntentOutcome::Applied | IntentOutcome::Placed(_) => {
                let observation = self.observation();
                vec![
                    Outbound::Ack(create_ack(intent_msg.seq)),
                    Outbound::Observation(observation),
                ]
            }
            IntentOutcome::Returned(_) => {
                // The failed commit reset the shape, so state did change.
                let observation = self.observation();
                vec![
                    Outbound::Error(create_error(
                        intent_msg.seq,
                        ErrorCode::InvalidPlace,
                        "shape does not fit at the pointer position",
                    )),
                    Outbound::Observation(observation),
                ]
            }
            IntentOutcome::Ignored => {
                let code = match intent {
                    Intent::Place => ErrorCode::NoActive,
                    _ => ErrorCode::InvalidIntent,
                };
                vec![Outbound::Error(create_error(
                    intent_msg.seq,
                    code,
                    "intent not applicable in the current state",
                ))]
            }
        }
    }
}
