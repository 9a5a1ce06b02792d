//! Engine configuration and configuration-time validation.

use serde::{Deserialize, Serialize};

use crate::error::{RandomizeError, RandomizeResult};
use crate::strategy::{LengthUnit, PaddingPolicy, RandomizationStrategy};

/// Configuration for one randomization run.
///
/// Invalid combinations are rejected by [`RandomizeConfig::validate`]
/// before any sampling begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomizeConfig {
    pub strategy: RandomizationStrategy,
    pub padding: PaddingPolicy,
    /// Unit used by the length-matching strategies.
    pub length_unit: LengthUnit,
    /// Require donor dialogues to share the source dialogue's genre.
    pub match_genre: bool,
    /// Reject donor speakers who are probably the same real person as a
    /// speaker already used in the synthetic dialogue.
    pub avoid_self: bool,
    /// Which speaker, by order of first appearance, is held fixed.
    pub fixed_speaker_offset: usize,
    /// Rejection window for the reshuffling strategies.
    pub window: usize,
    /// Seed for the run's random source. Equal seeds and equal inputs
    /// reproduce the output exactly.
    pub seed: u64,
}

impl Default for RandomizeConfig {
    fn default() -> Self {
        Self {
            strategy: RandomizationStrategy::OtherSpeakersFromOtherDialogue,
            padding: PaddingPolicy::Wrap,
            length_unit: LengthUnit::Turns,
            match_genre: false,
            avoid_self: false,
            fixed_speaker_offset: 0,
            window: 5,
            seed: 0,
        }
    }
}

impl RandomizeConfig {
    pub fn new(strategy: RandomizationStrategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    pub fn with_padding(mut self, padding: PaddingPolicy) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_length_unit(mut self, unit: LengthUnit) -> Self {
        self.length_unit = unit;
        self
    }

    pub fn match_genre(mut self, on: bool) -> Self {
        self.match_genre = on;
        self
    }

    pub fn avoid_self(mut self, on: bool) -> Self {
        self.avoid_self = on;
        self
    }

    pub fn with_fixed_speaker_offset(mut self, offset: usize) -> Self {
        self.fixed_speaker_offset = offset;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject combinations whose null model would be meaningless.
    pub fn validate(&self) -> RandomizeResult<()> {
        let traits = self.strategy.traits();
        if self.avoid_self && traits.same_dialogue_only {
            return Err(invalid(
                "avoid_self has no meaning when donors come from the source dialogue itself",
            ));
        }
        if self.fixed_speaker_offset > 0 && !traits.keeps_fixed_speaker {
            return Err(invalid(
                "fixed_speaker_offset is set but the strategy keeps no speaker fixed",
            ));
        }
        if self.window == 0 && traits.reshuffle_donor {
            return Err(invalid(
                "a reshuffling strategy requires a nonzero rejection window",
            ));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> RandomizeError {
    RandomizeError::InvalidConfiguration {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RandomizeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_avoid_self_with_same_dialogue_strategy_rejected() {
        let config =
            RandomizeConfig::new(RandomizationStrategy::SameSpeakerReorder).avoid_self(true);
        assert!(matches!(
            config.validate(),
            Err(RandomizeError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_offset_without_fixed_speaker_rejected() {
        let config = RandomizeConfig::new(RandomizationStrategy::AllTurnsIndependentlyRandom)
            .with_fixed_speaker_offset(1);
        assert!(matches!(
            config.validate(),
            Err(RandomizeError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_window_with_reshuffle_rejected() {
        let config =
            RandomizeConfig::new(RandomizationStrategy::BestLengthMatchShuffled).with_window(0);
        assert!(matches!(
            config.validate(),
            Err(RandomizeError::InvalidConfiguration { .. })
        ));
    }
}
