use serde_json::{json, Value as Json};
use tracing::{debug, error};

use gtp::{GtpError, LineStream, Move, Session, Value};

use crate::args::Game;

/// Sets up an empty board with the configured size, komi and handicap. Returns
/// `false`, with the rejection logged, if the engine refuses any of it.
pub fn configure<S: LineStream>(go: &mut Session<S>, game: &Game) -> Result<bool, GtpError> {
    debug!(?game, "Configuring the game.");

    if !go.boardsize(game.size)? || !go.clear_board()? || !go.komi(game.komi)? {
        error!(message = ?go.last_error(), "Engine rejected the game options.");
        return Ok(false);
    }

    if game.handicap > 0 {
        match go.fixed_handicap(game.handicap)? {
            Some(stones) => debug!(?stones, "Placed handicap stones."),
            None => {
                error!(message = ?go.last_error(), "Engine rejected the handicap.");
                return Ok(false);
            }
        }
    }

    Ok(true)
}

pub fn to_json(value: &Value) -> Json {
    match value {
        Value::None => Json::Null,
        Value::Bool(value) => json!(value),
        Value::Text(text) => json!(text),
        Value::Integer(value) => json!(value),
        Value::Point(point) => json!(point.to_string()),
        Value::Vertices(vertices) => {
            json!(vertices.iter().map(|v| v.to_string()).collect::<Vec<_>>())
        }
        Value::Lines(lines) => json!(lines),
        Value::Color(color) => json!(color.map(|c| c.to_string())),
        Value::Move(m) => move_json(m),
        Value::Moves(moves) => Json::Array(moves.iter().map(move_json).collect()),
        Value::Board(board) => json!({
            "diagram": board.as_str(),
            "rows": board
                .rows()
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|stone| stone.map(|c| c.to_string()))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>(),
        }),
    }
}

fn move_json(m: &Move) -> Json {
    json!({
        "color": m.color.map(|c| c.to_string()),
        "point": m.point.to_string(),
    })
}
