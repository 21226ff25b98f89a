use gsm_core::gsm_time::{fn_add, fn_diff};
use gsm_core::GSM_FRAME_DURATION_NS;

/// Converts a duration to TDMA frames, rounding up
pub fn ms_to_frames(ms: u32) -> u32 {
    let ns = ms as u64 * 1_000_000;
    ns.div_ceil(GSM_FRAME_DURATION_NS) as u32
}

/// Timers expiring at a frame number. Advanced by the owner on every frame;
/// expired timers are handed back as events instead of invoking callbacks.
#[derive(Debug)]
pub struct TimerQueue<K> {
    timers: Vec<(K, u32)>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self { timers: Vec::new() }
    }
}

impl<K: Copy + PartialEq + core::fmt::Debug> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts a timer to expire `frames` after `now`
    pub fn start(&mut self, key: K, now: u32, frames: u32) {
        self.cancel(key);
        let deadline = fn_add(now, frames as i32);
        tracing::trace!("timer {:?} started, expires at fn {}", key, deadline);
        self.timers.push((key, deadline));
    }

    pub fn cancel(&mut self, key: K) {
        self.timers.retain(|(k, _)| *k != key);
    }

    pub fn is_running(&self, key: K) -> bool {
        self.timers.iter().any(|(k, _)| *k == key)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Removes and returns all timers due at `now`, in order of expiry
    pub fn expire(&mut self, now: u32) -> Vec<K> {
        let mut due: Vec<(K, u32)> = Vec::new();
        self.timers.retain(|(k, deadline)| {
            if fn_diff(now, *deadline) >= 0 {
                due.push((*k, *deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, deadline)| fn_diff(*deadline, now));
        due.into_iter().map(|(k, _)| k).collect()
    }
}
