/// Time-windowed fault latch: a condition must hold continuously past a
/// timeout before it trips. A single nullable timestamp carries the whole
/// state; it is armed when the condition first appears, left alone while
/// the condition persists, and cleared the moment it goes away.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FaultTimer {
    condition_started_at: Option<f32>,
}

impl FaultTimer {
    pub const fn new() -> Self {
        Self {
            condition_started_at: None,
        }
    }

    /// Feeds one observation of the condition at time `now`. Returns true
    /// only once the condition has been present for strictly longer than
    /// `timeout_s`, so a condition observed at a single instant never
    /// trips.
    pub fn exceeded(&mut self, condition: bool, now: f32, timeout_s: f32) -> bool {
        if !condition {
            self.condition_started_at = None;
            return false;
        }

        match self.condition_started_at {
            None => {
                self.condition_started_at = Some(now);
                false
            }
            Some(started_at) => now - started_at > timeout_s,
        }
    }

    pub fn clear(&mut self) {
        self.condition_started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::FaultTimer;

    #[test]
    fn single_observation_never_trips() {
        let mut timer = FaultTimer::new();
        assert!(!timer.exceeded(true, 0.0, 0.1));
        assert!(!timer.exceeded(true, 0.0, 0.1));
    }

    #[test]
    fn trips_only_past_the_timeout() {
        let mut timer = FaultTimer::new();
        assert!(!timer.exceeded(true, 0.0, 0.1));
        assert!(!timer.exceeded(true, 0.05, 0.1));
        assert!(!timer.exceeded(true, 0.1, 0.1));
        assert!(timer.exceeded(true, 0.11, 0.1));
    }

    #[test]
    fn clears_when_condition_drops() {
        let mut timer = FaultTimer::new();
        assert!(!timer.exceeded(true, 0.0, 0.1));
        assert!(!timer.exceeded(false, 0.05, 0.1));

        // The window restarts from the second onset.
        assert!(!timer.exceeded(true, 0.06, 0.1));
        assert!(!timer.exceeded(true, 0.12, 0.1));
        assert!(timer.exceeded(true, 0.17, 0.1));
    }
}
