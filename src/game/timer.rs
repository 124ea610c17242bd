/// Identifies one run of the timer. Ticks carrying an older token are dropped,
/// which is how a restarted timer cancels the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// One-tick-per-second counter. The host event loop owns the actual clock
/// source and calls [`GameTimer::tick`] once a second.
#[derive(Debug, Default)]
pub struct GameTimer {
    seconds_elapsed: u32,
    epoch: u64,
    running: bool,
}

impl GameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) -> TimerToken {
        self.epoch = self.epoch.wrapping_add(1);
        self.running = true;
        TimerToken(self.epoch)
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stops and zeroes the counter; outstanding tokens become stale.
    pub fn reset(&mut self) {
        self.stop();
        self.epoch = self.epoch.wrapping_add(1);
        self.seconds_elapsed = 0;
    }

    /// Returns the new count, or `None` if `token` no longer owns the timer.
    pub fn tick(&mut self, token: TimerToken) -> Option<u32> {
        if !self.running || token.0 != self.epoch {
            return None;
        }
        self.seconds_elapsed = self.seconds_elapsed.saturating_add(1);
        Some(self.seconds_elapsed)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn seconds_elapsed(&self) -> u32 {
        self.seconds_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_running() {
        let mut timer = GameTimer::new();
        let token = timer.start();
        assert_eq!(timer.tick(token), Some(1));
        assert_eq!(timer.tick(token), Some(2));
        timer.stop();
        assert_eq!(timer.tick(token), None);
        assert_eq!(timer.seconds_elapsed(), 2);
    }

    #[test]
    fn restart_cancels_previous_token() {
        let mut timer = GameTimer::new();
        let old = timer.start();
        let new = timer.start();
        assert_eq!(timer.tick(old), None);
        assert_eq!(timer.tick(new), Some(1));
    }

    #[test]
    fn reset_zeroes_and_invalidates() {
        let mut timer = GameTimer::new();
        let token = timer.start();
        timer.tick(token);
        timer.reset();
        assert_eq!(timer.seconds_elapsed(), 0);
        assert!(!timer.is_running());
        assert_eq!(timer.tick(token), None);
    }
}
