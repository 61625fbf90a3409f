//! Static per-model rate table, USD per million tokens.

use refiner_llm_sdk::models::claude;

use crate::usage::UsageSnapshot;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelRate {
    pub input: f64,
    pub output: f64,
}

const HAIKU: ModelRate = ModelRate { input: 1.0, output: 5.0 };
const SONNET: ModelRate = ModelRate { input: 3.0, output: 15.0 };
const OPUS: ModelRate = ModelRate { input: 15.0, output: 75.0 };

const RATES: &[(&str, ModelRate)] = &[
    (claude::HAIKU_4_5_ID, HAIKU),
    (claude::SONNET_4_5_ID, SONNET),
    (claude::SONNET_4_5_ALT_ID, SONNET),
    (claude::OPUS_4_5_ID, OPUS),
];

/// Rate for a model id; unknown models are priced as Sonnet
pub fn rate_for(model: &str) -> ModelRate {
    RATES
        .iter()
        .find(|(id, _)| *id == model)
        .map(|(_, rate)| *rate)
        .unwrap_or(SONNET)
}

pub fn estimate_cost(model: &str, input_tokens: u64, output_tokens: u64) -> f64 {
    let rate = rate_for(model);
    (input_tokens as f64 / 1_000_000.0) * rate.input
        + (output_tokens as f64 / 1_000_000.0) * rate.output
}

pub fn snapshot_cost(model: &str, usage: UsageSnapshot) -> f64 {
    estimate_cost(model, usage.input_tokens, usage.output_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sonnet_cost() {
        let cost = estimate_cost(claude::SONNET_4_5_ID, 2_000_000, 100_000);
        assert!((cost - 7.5).abs() < 1e-9, "cost was {cost}");
    }

    #[test]
    fn test_known_rates() {
        assert_eq!(rate_for(claude::HAIKU_4_5_ID), HAIKU);
        assert_eq!(rate_for(claude::OPUS_4_5_ID), OPUS);
        assert_eq!(rate_for(claude::SONNET_4_5_ALT_ID), SONNET);
    }

    #[test]
    fn test_unknown_model_uses_default_rate() {
        assert_eq!(rate_for("gpt-4"), SONNET);
        assert_eq!(estimate_cost("mystery", 0, 0), 0.0);
    }
}
