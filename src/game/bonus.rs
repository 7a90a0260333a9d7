use super::grid::Position;
use crate::consts;
use std::time::Duration;

/// Bonus food: worth more than regular food, but only for a limited time, and
/// the longer it sits on the board, the less it's worth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum BonusFood {
    #[default]
    Inactive,
    Active(ActiveBonus),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ActiveBonus {
    pos: Position,
    remaining: Duration,
    value: u32,
    size: f64,
}

impl ActiveBonus {
    fn new(pos: Position) -> ActiveBonus {
        ActiveBonus {
            pos,
            remaining: consts::BONUS_LIFETIME,
            value: consts::BONUS_MAX_VALUE,
            size: consts::BONUS_MAX_SIZE,
        }
    }

    pub(crate) fn position(&self) -> Position {
        self.pos
    }

    /// Time left before the bonus disappears
    pub(crate) fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Points the bonus is currently worth
    pub(crate) fn value(&self) -> u32 {
        self.value
    }

    /// Current display size
    pub(crate) fn size(&self) -> f64 {
        self.size
    }

    /// Fraction of the bonus's lifetime still left, from 1.0 (just spawned)
    /// down to 0.0
    pub(crate) fn remaining_fraction(&self) -> f64 {
        self.remaining.as_secs_f64() / consts::BONUS_LIFETIME.as_secs_f64()
    }
}

impl BonusFood {
    pub(crate) fn is_active(&self) -> bool {
        matches!(self, BonusFood::Active(_))
    }

    pub(crate) fn active(&self) -> Option<&ActiveBonus> {
        match self {
            BonusFood::Active(bonus) => Some(bonus),
            BonusFood::Inactive => None,
        }
    }

    pub(crate) fn position(&self) -> Option<Position> {
        self.active().map(ActiveBonus::position)
    }

    /// Put fresh bonus food at `pos`.  Returns `false` and does nothing if
    /// bonus food is already active.
    pub(crate) fn spawn(&mut self, pos: Position) -> bool {
        if self.is_active() {
            return false;
        }
        *self = BonusFood::Active(ActiveBonus::new(pos));
        true
    }

    /// Let `elapsed` time pass, shrinking the bonus's value and size.
    /// Returns `true` if this made the bonus expire.
    pub(crate) fn decay(&mut self, elapsed: Duration) -> bool {
        let BonusFood::Active(bonus) = self else {
            return false;
        };
        bonus.remaining = bonus.remaining.saturating_sub(elapsed);
        if bonus.remaining.is_zero() {
            *self = BonusFood::Inactive;
            return true;
        }
        bonus.value = value_for(bonus.remaining);
        bonus.size = (consts::BONUS_MAX_SIZE - consts::BONUS_MIN_SIZE)
            .mul_add(bonus.remaining_fraction(), consts::BONUS_MIN_SIZE);
        false
    }

    /// Eat the bonus, returning its value, or `None` if it wasn't active
    pub(crate) fn consume(&mut self) -> Option<u32> {
        let value = self.active()?.value();
        *self = BonusFood::Inactive;
        Some(value)
    }

    pub(crate) fn clear(&mut self) {
        *self = BonusFood::Inactive;
    }
}

/// Compute the value of bonus food with `remaining` time left: a linear
/// interpolation between the minimum and maximum value, rounded to the nearest
/// multiple of [`BONUS_VALUE_STEP`][consts::BONUS_VALUE_STEP] (halves round
/// up)
fn value_for(remaining: Duration) -> u32 {
    let total = consts::BONUS_LIFETIME.as_millis();
    let left = remaining.as_millis().min(total);
    let min = u128::from(consts::BONUS_MIN_VALUE);
    let span = u128::from(consts::BONUS_MAX_VALUE - consts::BONUS_MIN_VALUE);
    let step = u128::from(consts::BONUS_VALUE_STEP);
    // `scaled` is the unrounded value multiplied by `total`
    let scaled = min * total + span * left;
    let steps = (2 * scaled + step * total) / (2 * step * total);
    u32::try_from(steps * step)
        .unwrap_or(consts::BONUS_MAX_VALUE)
        .clamp(consts::BONUS_MIN_VALUE, consts::BONUS_MAX_VALUE)
}

/// Counts logic ticks between chances for bonus food to appear
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct BonusTimer {
    ticks: u32,
}

impl BonusTimer {
    /// Count one logic tick.  Once `interval` ticks have been counted, the
    /// count starts over and `true` is returned.
    pub(crate) fn tick(&mut self, interval: u32) -> bool {
        self.ticks = self.ticks.saturating_add(1);
        if self.ticks >= interval {
            self.ticks = 0;
            true
        } else {
            false
        }
    }

    pub(crate) fn reset(&mut self) {
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn spawn() {
        let mut bonus = BonusFood::default();
        assert!(!bonus.is_active());
        assert!(bonus.spawn(Position::new(4, 7)));
        let active = bonus.active().copied().unwrap();
        assert_eq!(active.position(), Position::new(4, 7));
        assert_eq!(active.value(), 100);
        assert_close(active.size(), 30.0);
        assert_eq!(active.remaining(), Duration::from_secs(10));
    }

    #[test]
    fn spawn_while_active_is_refused() {
        let mut bonus = BonusFood::default();
        assert!(bonus.spawn(Position::new(4, 7)));
        assert!(!bonus.decay(Duration::from_secs(3)));
        assert!(!bonus.spawn(Position::new(9, 9)));
        let active = bonus.active().copied().unwrap();
        assert_eq!(active.position(), Position::new(4, 7));
        assert_eq!(active.remaining(), Duration::from_secs(7));
    }

    #[test]
    fn halfway() {
        let mut bonus = BonusFood::default();
        bonus.spawn(Position::new(4, 7));
        assert!(!bonus.decay(Duration::from_secs(5)));
        let active = bonus.active().copied().unwrap();
        assert_eq!(active.remaining(), Duration::from_secs(5));
        // 55 points, rounded half up
        assert_eq!(active.value(), 60);
        assert_close(active.size(), 20.0);
        assert_close(active.remaining_fraction(), 0.5);
    }

    #[test]
    fn decays_in_small_steps() {
        let mut bonus = BonusFood::default();
        bonus.spawn(Position::new(4, 7));
        let mut last = 100;
        for _ in 0..599 {
            assert!(!bonus.decay(Duration::from_micros(16_667)));
            let value = bonus.active().unwrap().value();
            assert!(value <= last, "value went up from {last} to {value}");
            assert_eq!(value % 10, 0);
            assert!((10..=100).contains(&value));
            last = value;
        }
    }

    #[test]
    fn expires() {
        let mut bonus = BonusFood::default();
        bonus.spawn(Position::new(4, 7));
        assert!(!bonus.decay(Duration::from_millis(9_999)));
        assert_eq!(bonus.active().unwrap().value(), 10);
        assert!(bonus.decay(Duration::from_millis(1)));
        assert_eq!(bonus, BonusFood::Inactive);
        assert!(!bonus.decay(Duration::from_secs(1)));
    }

    #[test]
    fn overshooting_expiry() {
        let mut bonus = BonusFood::default();
        bonus.spawn(Position::new(4, 7));
        assert!(bonus.decay(Duration::from_secs(60)));
        assert!(!bonus.is_active());
    }

    #[test]
    fn consume() {
        let mut bonus = BonusFood::default();
        assert_eq!(bonus.consume(), None);
        bonus.spawn(Position::new(4, 7));
        bonus.decay(Duration::from_secs(2));
        assert_eq!(bonus.consume(), Some(80));
        assert!(!bonus.is_active());
        assert_eq!(bonus.position(), None);
    }

    #[rstest]
    #[case(Duration::from_secs(10), 100)]
    #[case(Duration::from_millis(9_500), 100)]
    #[case(Duration::from_millis(9_400), 90)]
    #[case(Duration::from_secs(5), 60)]
    #[case(Duration::from_millis(4_999), 50)]
    #[case(Duration::from_secs(1), 20)]
    #[case(Duration::from_millis(500), 10)]
    #[case(Duration::ZERO, 10)]
    #[case(Duration::from_secs(20), 100)]
    fn test_value_for(#[case] remaining: Duration, #[case] value: u32) {
        assert_eq!(value_for(remaining), value);
    }

    #[test]
    fn timer_fires_on_interval() {
        let mut timer = BonusTimer::default();
        for _ in 0..179 {
            assert!(!timer.tick(180));
        }
        assert!(timer.tick(180));
        for _ in 0..179 {
            assert!(!timer.tick(180));
        }
        assert!(timer.tick(180));
    }

    #[test]
    fn timer_reset() {
        let mut timer = BonusTimer::default();
        for _ in 0..100 {
            assert!(!timer.tick(150));
        }
        timer.reset();
        for _ in 0..149 {
            assert!(!timer.tick(150));
        }
        assert!(timer.tick(150));
    }
}
