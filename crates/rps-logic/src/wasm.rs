//! WASM bindings for a browser front end
//!
//! The page owns one [`WasmMatch`] per match and drives it from its move
//! buttons. Statistics persistence stays on the host side: it reads the
//! finished history through `history_json` and stores it however it likes.

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{describe_strategy, run_exhibition, Match, RuleSet, SeededRng, Strategy, StrategyBase};

fn parse_ruleset(key: &str) -> Result<RuleSet, JsError> {
    RuleSet::from_key(key).map_err(|e| JsError::new(&e.to_string()))
}

/// 32 bytes of seed material from `Math.random`
fn entropy_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    for chunk in seed.chunks_mut(8) {
        let bits = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
        chunk.copy_from_slice(&bits.to_le_bytes());
    }
    seed
}

/// A match in progress, held by the page
#[wasm_bindgen]
pub struct WasmMatch {
    inner: Match,
}

#[wasm_bindgen]
impl WasmMatch {
    /// Start a match. Unknown opponent keys fall back to Random.
    #[wasm_bindgen(constructor)]
    pub fn new(ruleset: &str, opponent: &str, rounds: u32) -> Result<WasmMatch, JsError> {
        let ruleset = parse_ruleset(ruleset)?;
        let base = StrategyBase::resolve_key(opponent);
        let strategy = Strategy::new(base, ruleset, SeededRng::new(&entropy_seed(), 0));
        Ok(WasmMatch {
            inner: Match::new(rounds, strategy),
        })
    }

    /// Play one round; returns the serialized `RoundReport`
    pub fn play_round(&mut self, mv: &str) -> Result<JsValue, JsError> {
        let mv = self
            .inner
            .ruleset()
            .parse_move(mv)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let report = self
            .inner
            .play_round(mv)
            .map_err(|e| JsError::new(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&report)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    pub fn is_over(&self) -> bool {
        self.inner.is_over()
    }

    pub fn score(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.score())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    pub fn summary(&self) -> String {
        self.inner.summary_line()
    }

    /// "win", "loss" or "tie" once the match is over
    pub fn result(&self) -> Option<String> {
        self.inner.result().map(|r| r.as_str().to_string())
    }

    pub fn opponent_name(&self) -> String {
        self.inner.opponent().name().to_string()
    }

    /// The rounds played so far as `[[player, opponent], ...]`
    pub fn history_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self.inner.history())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: String,
    name: String,
    description: String,
}

/// Get all available opponent strategies
#[wasm_bindgen]
pub fn list_strategies() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = StrategyBase::ALL
        .iter()
        .map(|base| StrategyInfo {
            id: base.key().to_string(),
            name: base.player_name().to_string(),
            description: describe_strategy(*base).to_string(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&types)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Get the move buttons for a rule set
#[wasm_bindgen]
pub fn list_moves(ruleset: &str) -> Result<JsValue, JsError> {
    let ruleset = parse_ruleset(ruleset)?;
    serde_wasm_bindgen::to_value(ruleset.moves())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Replay an AI-vs-AI exhibition with full round-by-round details
#[wasm_bindgen]
pub fn replay_exhibition(
    strategy_a: &str,
    strategy_b: &str,
    ruleset: &str,
    rounds: u32,
    seed: &[u8],
) -> Result<JsValue, JsError> {
    let ruleset = parse_ruleset(ruleset)?;
    let seed_arr: [u8; 32] = seed
        .try_into()
        .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))?;

    let result = run_exhibition(
        StrategyBase::resolve_key(strategy_a),
        StrategyBase::resolve_key(strategy_b),
        ruleset,
        rounds,
        &seed_arr,
    );

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
