//! JSON reporter
//!
//! Outputs the character sheet (login, raw metrics and derived state) as
//! pretty-printed JSON. Useful for piping to jq or feeding other tools.

use crate::models::{CharacterSheet, CharacterState, ProfileMetrics};
use anyhow::Result;

/// Render the sheet as JSON
pub fn render(state: &CharacterState, metrics: &ProfileMetrics) -> Result<String> {
    let sheet = CharacterSheet {
        login: &metrics.login,
        metrics,
        state,
    };
    Ok(serde_json::to_string_pretty(&sheet)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_sheet;

    #[test]
    fn test_json_render_valid() {
        let (metrics, state) = test_sheet();
        let json_str = render(&state, &metrics).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["login"], "octocat");
        assert_eq!(parsed["state"]["rank"], "D");
        assert_eq!(parsed["state"]["total_xp"], 1503);
        assert_eq!(parsed["metrics"]["repos"][0]["name"], "hello-world");
    }

    #[test]
    fn test_json_state_roundtrips() {
        let (metrics, state) = test_sheet();
        let json_str = render(&state, &metrics).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        let back: CharacterState =
            serde_json::from_value(parsed["state"].clone()).expect("state from JSON");
        assert_eq!(back, state);
    }
}
