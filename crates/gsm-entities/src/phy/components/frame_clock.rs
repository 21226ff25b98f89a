use std::time::{Duration, Instant};

use gsm_core::GSM_FRAME_DURATION_NS;

/// Skew in frames after which the clock gives up catching up and restarts from now
pub const MAX_FN_SKEW: u32 = 50;

/// Number of whole TDMA frames in a duration
pub fn compute_elapsed_fn(elapsed: Duration) -> u32 {
    (elapsed.as_nanos() / GSM_FRAME_DURATION_NS as u128).min(u32::MAX as u128) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    /// Ahead of time, wait this long before starting the frame
    Sleep(Duration),
    /// Behind by this many whole frames, start the frame right away
    Late(u32),
    /// Skew exceeded, deadline restarted from the current instant
    Resync(u32),
}

/// Paces frame processing to the TDMA frame duration
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    deadline: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame: Duration::from_nanos(GSM_FRAME_DURATION_NS),
            deadline: None,
        }
    }

    /// Decides what to do before the next frame, given the current instant.
    /// The first call starts the clock and never sleeps
    pub fn next(&mut self, now: Instant) -> ClockAction {
        let Some(deadline) = self.deadline else {
            self.deadline = Some(now + self.frame);
            return ClockAction::Late(0);
        };

        if now < deadline {
            self.deadline = Some(deadline + self.frame);
            return ClockAction::Sleep(deadline - now);
        }

        let behind = compute_elapsed_fn(now - deadline);
        if behind > MAX_FN_SKEW {
            tracing::warn!("frame clock {} frames behind, resyncing", behind);
            self.deadline = Some(now + self.frame);
            return ClockAction::Resync(behind);
        }
        if behind > 0 {
            tracing::debug!("frame clock {} frames behind", behind);
        }
        self.deadline = Some(deadline + self.frame);
        ClockAction::Late(behind)
    }

    /// Blocks until the next frame is due
    pub fn wait(&mut self) -> ClockAction {
        let action = self.next(Instant::now());
        if let ClockAction::Sleep(d) = action {
            std::thread::sleep(d);
        }
        action
    }
}
