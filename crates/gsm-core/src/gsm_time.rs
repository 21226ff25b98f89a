use core::fmt;

/// Number of TDMA frames after which the frame number wraps back to 0 (26 * 51 * 2048).
pub const GSM_HYPERFRAME: u32 = 2_715_648;

/// Duration of one TDMA frame in nanoseconds (120ms / 26)
pub const GSM_FRAME_DURATION_NS: u64 = 4_615_384;

/// Difference between two frame numbers, handling wrap-around of the hyperframe.
/// Result lies in [-HYPERFRAME/2, HYPERFRAME/2).
pub fn fn_diff(a: u32, b: u32) -> i32 {
    let wrap = GSM_HYPERFRAME as i32;
    let mut diff = a as i32 - b as i32;
    while diff < -wrap / 2 { diff += wrap; }
    while diff >= wrap / 2 { diff -= wrap; }
    diff
}

/// Adds a (possibly negative) number of frames to a frame number, modulo the hyperframe.
#[inline]
pub fn fn_add(fn_num: u32, frames: i32) -> u32 {
    (fn_num as i64 + frames as i64).rem_euclid(GSM_HYPERFRAME as i64) as u32
}

/// Number of frames elapsed going forward from `last` to `now`, in [0, HYPERFRAME)
#[inline]
pub fn fn_elapsed(now: u32, last: u32) -> u32 {
    (now + GSM_HYPERFRAME - last % GSM_HYPERFRAME) % GSM_HYPERFRAME
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct GsmTime {
    /// Frame number, from 0 to GSM_HYPERFRAME - 1
    pub fn_num: u32,
}

impl GsmTime {
    pub fn new(fn_num: u32) -> Self {
        GsmTime { fn_num: fn_num % GSM_HYPERFRAME }
    }

    /// Superframe counter, fn / (26 * 51)
    pub fn t1(self) -> u32 {
        self.fn_num / (26 * 51)
    }

    /// Position within the 26-multiframe
    pub fn t2(self) -> u32 {
        self.fn_num % 26
    }

    /// Position within the 51-multiframe
    pub fn t3(self) -> u32 {
        self.fn_num % 51
    }

    /// Timeslot counter selecting the BCCH system information, (fn / 51) % 8
    pub fn tc(self) -> u32 {
        (self.fn_num / 51) % 8
    }

    /// Add a number of frames to a GsmTime
    pub fn add_frames(self, frames: i32) -> GsmTime {
        GsmTime { fn_num: fn_add(self.fn_num, frames) }
    }

    /// Difference between two GsmTimes in frames
    pub fn diff(self, b: Self) -> i32 {
        fn_diff(self.fn_num, b.fn_num)
    }
}

impl fmt::Display for GsmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:7}={:4}/{:02}/{:02}", self.fn_num, self.t1(), self.t2(), self.t3())
    }
}

impl fmt::Debug for GsmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:7}={:4}/{:02}/{:02}", self.fn_num, self.t1(), self.t2(), self.t3())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_frames_and_diff() {
        let initial_time = GsmTime::default();

        let mut time = initial_time;
        // Repeat add_frames enough times that the hyperframe wraps
        let iterations = 1000;
        let increment = 12345;
        for _ in 0..iterations {
            let time2 = time.add_frames(increment);
            assert_eq!(time2.diff(time), increment);
            assert_eq!(time.diff(time2), -increment);
            time = time2;
        }
        assert!(time.fn_num < GSM_HYPERFRAME);

        for _ in 0..iterations {
            time = time.add_frames(-increment);
        }
        assert_eq!(time, initial_time);
    }

    #[test]
    fn test_elapsed_wraps() {
        assert_eq!(fn_elapsed(3, GSM_HYPERFRAME - 2), 5);
        assert_eq!(fn_elapsed(10, 10), 0);
        assert_eq!(fn_diff(1, GSM_HYPERFRAME - 1), 2);
    }

    #[test]
    fn test_counters() {
        let t = GsmTime::new(26 * 51 + 51 * 4 + 7);
        assert_eq!(t.t1(), 1);
        assert_eq!(t.t3(), 7);
        assert_eq!(t.tc(), 4);
        assert_eq!(t.t2(), (26 * 51 + 51 * 4 + 7) % 26);
    }
}
