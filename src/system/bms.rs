//! Battery management
//!
//! Snapshot of the battery as reported by the platform

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeState {
    /// State of charge, 0 - 100
    pub percent: u8,
}

impl ChargeState {
    pub const fn new(percent: u8) -> Self {
        Self { percent }
    }

    /// The share of the battery already used, i.e `100 - percent`.
    ///
    /// Readings above 100% are treated as a full battery.
    pub fn drained(&self) -> u8 {
        100 - self.percent.min(100)
    }
}

impl Default for ChargeState {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn drained_inverts_percent() {
        assert_eq!(ChargeState::new(30).drained(), 70);
        assert_eq!(ChargeState::new(100).drained(), 0);
        assert_eq!(ChargeState::new(0).drained(), 100);
    }

    #[test]
    fn drained_clamps_bogus_readings() {
        // some fuel gauges overshoot when topping off
        assert_eq!(ChargeState::new(104).drained(), 0);
    }
}
