/// Fixed-rate scheduling helper: accumulates loop `dt` and fires once per
/// interval, carrying the remainder so the average rate stays exact.
#[derive(Debug, Clone)]
pub struct LoopTimer {
    elapsed_time_s: f32,
    interval_s: f32,
}

impl LoopTimer {
    pub const fn new(interval_s: f32) -> Self {
        Self {
            elapsed_time_s: 0.0,
            interval_s,
        }
    }

    pub fn should_update(&mut self, dt_s: f32) -> bool {
        self.elapsed_time_s += dt_s;

        if self.elapsed_time_s >= self.interval_s {
            self.elapsed_time_s -= self.interval_s;
            true
        } else {
            false
        }
    }
}
