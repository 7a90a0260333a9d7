use crate::consts;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub(crate) fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                initial_speed: Speed::from_tenths(50),
                increment: Speed::from_tenths(5),
                bonus_interval: 150,
            },
            Difficulty::Normal => DifficultyProfile {
                initial_speed: Speed::from_tenths(70),
                increment: Speed::from_tenths(10),
                bonus_interval: 180,
            },
            Difficulty::Hard => DifficultyProfile {
                initial_speed: Speed::from_tenths(100),
                increment: Speed::from_tenths(15),
                bonus_interval: 220,
            },
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The parameters of a difficulty tier
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DifficultyProfile {
    /// Speed at the start of a run
    pub(crate) initial_speed: Speed,

    /// Added to the speed each time the score crosses a multiple of
    /// [`SPEED_UP_INTERVAL`][consts::SPEED_UP_INTERVAL]
    pub(crate) increment: Speed,

    /// Number of logic ticks between chances for bonus food to appear
    pub(crate) bonus_interval: u32,
}

impl DifficultyProfile {
    /// The speed a run on this tier has reached once it has scored `score`
    /// points
    pub(crate) fn speed_at(&self, score: u32) -> Speed {
        let steps = score / consts::SPEED_UP_INTERVAL;
        Speed(
            self.initial_speed
                .0
                .saturating_add(steps.saturating_mul(self.increment.0)),
        )
        .min(consts::MAX_SPEED)
    }
}

/// Snake speed in logic ticks per second, stored in tenths so that the
/// fractional increments of the easier tiers are exact
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Speed(u32);

impl Speed {
    pub(crate) const fn from_tenths(tenths: u32) -> Speed {
        Speed(tenths)
    }

    /// Time between logic ticks at this speed
    pub(crate) fn interval(self) -> Duration {
        Duration::from_secs(10) / self.0.max(1)
    }

    /// Speed up by `increment`, without exceeding
    /// [`MAX_SPEED`][consts::MAX_SPEED]
    pub(crate) fn accelerate(self, increment: Speed) -> Speed {
        Speed(self.0.saturating_add(increment.0)).min(consts::MAX_SPEED)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Tracks the tier chosen by the player separately from the tier the current
/// run is actually using, so that a change made while paused only takes
/// effect when the game resumes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DifficultySelection {
    selected: Difficulty,
    in_effect: Difficulty,
}

impl DifficultySelection {
    pub(crate) fn new(difficulty: Difficulty) -> DifficultySelection {
        DifficultySelection {
            selected: difficulty,
            in_effect: difficulty,
        }
    }

    pub(crate) fn selected(&self) -> Difficulty {
        self.selected
    }

    pub(crate) fn in_effect(&self) -> Difficulty {
        self.in_effect
    }

    /// Choose a new tier without applying it
    pub(crate) fn select(&mut self, difficulty: Difficulty) {
        self.selected = difficulty;
    }

    /// Choose a new tier and apply it at once
    pub(crate) fn apply(&mut self, difficulty: Difficulty) {
        self.selected = difficulty;
        self.in_effect = difficulty;
    }

    /// Put the selected tier into effect.  Returns the tier if it differs
    /// from the one previously in effect.
    pub(crate) fn reconcile(&mut self) -> Option<Difficulty> {
        if self.selected == self.in_effect {
            None
        } else {
            self.in_effect = self.selected;
            Some(self.selected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Difficulty::Normal, 0, 70)]
    #[case(Difficulty::Normal, 49, 70)]
    #[case(Difficulty::Normal, 50, 80)]
    #[case(Difficulty::Normal, 120, 90)]
    #[case(Difficulty::Easy, 120, 60)]
    #[case(Difficulty::Easy, 170, 65)]
    #[case(Difficulty::Hard, 120, 130)]
    #[case(Difficulty::Hard, 150, 145)]
    #[case(Difficulty::Hard, 200, 150)]
    #[case(Difficulty::Normal, 10_000, 150)]
    #[case(Difficulty::Normal, u32::MAX, 150)]
    fn test_speed_at(#[case] difficulty: Difficulty, #[case] score: u32, #[case] tenths: u32) {
        assert_eq!(
            difficulty.profile().speed_at(score),
            Speed::from_tenths(tenths)
        );
    }

    #[rstest]
    #[case(Speed::from_tenths(50), Duration::from_millis(200))]
    #[case(Speed::from_tenths(100), Duration::from_millis(100))]
    #[case(Speed::from_tenths(150), Duration::from_nanos(66_666_666))]
    #[case(Speed::from_tenths(0), Duration::from_secs(10))]
    fn test_interval(#[case] speed: Speed, #[case] interval: Duration) {
        assert_eq!(speed.interval(), interval);
    }

    #[test]
    fn accelerate_is_capped() {
        let speed = Speed::from_tenths(140).accelerate(Speed::from_tenths(15));
        assert_eq!(speed, consts::MAX_SPEED);
        let speed = Speed::from_tenths(70).accelerate(Speed::from_tenths(10));
        assert_eq!(speed, Speed::from_tenths(80));
    }

    #[rstest]
    #[case(Speed::from_tenths(70), "7.0")]
    #[case(Speed::from_tenths(55), "5.5")]
    #[case(Speed::from_tenths(150), "15.0")]
    fn test_display_speed(#[case] speed: Speed, #[case] s: &str) {
        assert_eq!(speed.to_string(), s);
    }

    #[test]
    fn reconcile() {
        let mut selection = DifficultySelection::new(Difficulty::Hard);
        assert_eq!(selection.reconcile(), None);
        selection.select(Difficulty::Easy);
        assert_eq!(selection.in_effect(), Difficulty::Hard);
        selection.select(Difficulty::Normal);
        assert_eq!(selection.reconcile(), Some(Difficulty::Normal));
        assert_eq!(selection.in_effect(), Difficulty::Normal);
        assert_eq!(selection.reconcile(), None);
    }

    #[test]
    fn selecting_original_tier_again_is_no_change() {
        let mut selection = DifficultySelection::new(Difficulty::Normal);
        selection.select(Difficulty::Hard);
        selection.select(Difficulty::Normal);
        assert_eq!(selection.reconcile(), None);
    }

    #[test]
    fn serde_names() {
        assert_eq!(
            serde_json::to_value(Difficulty::Hard).unwrap(),
            serde_json::json!("hard")
        );
        assert_eq!(
            serde_json::from_value::<Difficulty>(serde_json::json!("easy")).unwrap(),
            Difficulty::Easy
        );
    }
}
