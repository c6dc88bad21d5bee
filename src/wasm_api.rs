use crate::{Move, Turns};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// JSON-serializable representation of one move entry
#[derive(Serialize, Deserialize)]
pub struct EntryJson {
    pub tile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
}

/// JSON-serializable representation of a move
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum MoveJson {
    #[serde(rename = "pass")]
    Pass,
    #[serde(rename = "play")]
    Play { entries: Vec<EntryJson> },
    #[serde(rename = "swap")]
    Swap { entries: Vec<EntryJson> },
    #[serde(rename = "resign")]
    Resign { entries: Vec<EntryJson> },
}

/// Result of a parse call
#[derive(Serialize, Deserialize)]
pub struct ParseResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moves: Option<Vec<MoveJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_last_play: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseResult {
    fn failure(error: String) -> Self {
        ParseResult {
            success: false,
            moves: None,
            canonical: None,
            index_last_play: None,
            error: Some(error),
        }
    }
}

/// Parse one move in its text form
///
/// # Arguments
/// * `text` - e.g. "{1:01@0,0 2:02@0,1}", "{}" or "resign{4:33@swap}"
/// * `remote` - require canonical entry order, as sent by a peer
///
/// # Returns
/// JSON string with ParseResult holding the move and its canonical text
#[wasm_bindgen]
pub fn parse_move(text: &str, remote: bool) -> String {
    let result = match Move::parse(text, remote) {
        Ok(m) => ParseResult {
            success: true,
            canonical: Some(m.to_string()),
            moves: Some(vec![move_to_json(&m)]),
            index_last_play: None,
            error: None,
        },
        Err(e) => ParseResult::failure(e.to_string()),
    };
    to_json(&result)
}

/// Parse a saved turn log ("turns{...}") and report where the last play sits
#[wasm_bindgen]
pub fn parse_turns(text: &str) -> String {
    let result = match text.parse::<Turns>() {
        Ok(turns) => ParseResult {
            success: true,
            canonical: Some(turns.to_string()),
            moves: Some(turns.iter().map(move_to_json).collect()),
            index_last_play: Some(turns.index_last_play()),
            error: None,
        },
        Err(e) => ParseResult::failure(e.to_string()),
    };
    to_json(&result)
}

fn to_json(result: &ParseResult) -> String {
    serde_json::to_string(result)
        .unwrap_or_else(|e| format!(r#"{{"success":false,"error":"Serialization error: {}"}}"#, e))
}

/// Convert an internal Move to its JSON representation
fn move_to_json(m: &Move) -> MoveJson {
    let entries = || {
        m.entries()
            .map(|e| EntryJson {
                tile: e.tile().to_string(),
                cell: e.try_cell().map(|c| c.to_string()),
            })
            .collect()
    };
    if m.is_resign() {
        MoveJson::Resign { entries: entries() }
    } else if m.is_play() {
        MoveJson::Play { entries: entries() }
    } else if m.is_pure_swap() {
        MoveJson::Swap { entries: entries() }
    } else {
        MoveJson::Pass
    }
}

/// Get the git commit hash that this WASM module was built from
///
/// Returns the first 8 characters of the commit hash, or "unknown" if not available
#[wasm_bindgen]
pub fn get_build_commit() -> String {
    env!("BUILD_COMMIT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_parse_move_json() {
        let json = parse_move("{2:02@0,1 1:01@0,0}", false);
        let result: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["canonical"], "{1:01@0,0 2:02@0,1}");
        assert_eq!(result["moves"][0]["kind"], "play");
    }

    #[wasm_bindgen_test]
    fn test_parse_turns_json() {
        let json = parse_turns("turns{{1:01@0,0} {} {}}");
        let result: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(result["index_last_play"], 1);
        assert_eq!(result["moves"][1]["kind"], "pass");

        let json = parse_turns("turns{");
        let result: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(result["success"], false);
    }
}
