/// Radio link supervision counter S (TS 05.08 clause 5.2).
/// Decremented by one per lost SACCH block, incremented by two per good one.
#[derive(Debug, Clone, Copy)]
pub struct RadioLinkCounter {
    timeout: i32,
    s: i32,
}

impl RadioLinkCounter {
    /// A negative timeout disables the supervision
    pub fn new(timeout: i32) -> Self {
        Self { timeout, s: timeout }
    }

    pub fn value(&self) -> i32 {
        self.s
    }

    /// Feeds one SACCH block. Returns true exactly once, when the link is lost.
    pub fn input(&mut self, bad: bool) -> bool {
        if self.timeout < 0 || self.s <= 0 {
            return false;
        }
        if bad {
            self.s -= 1;
            tracing::debug!("radio link counter S={} after lost SACCH block", self.s);
            return self.s == 0;
        }
        if self.s < self.timeout {
            self.s = (self.s + 2).min(self.timeout);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reported_once() {
        let mut rl = RadioLinkCounter::new(4);
        assert!(!rl.input(true));
        assert!(!rl.input(true));
        assert!(!rl.input(true));
        assert!(rl.input(true));
        assert_eq!(rl.value(), 0);
        assert!(!rl.input(true));
        assert!(!rl.input(false));
        assert_eq!(rl.value(), 0);
    }

    #[test]
    fn test_recovery_capped() {
        let mut rl = RadioLinkCounter::new(5);
        rl.input(true);
        rl.input(true);
        assert_eq!(rl.value(), 3);
        rl.input(false);
        assert_eq!(rl.value(), 5);
        rl.input(false);
        assert_eq!(rl.value(), 5);
    }

    #[test]
    fn test_disabled() {
        let mut rl = RadioLinkCounter::new(-1);
        for _ in 0..100 {
            assert!(!rl.input(true));
        }
    }
}
