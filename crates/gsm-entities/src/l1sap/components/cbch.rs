//! Cell broadcast (SMSCB) segmentation onto the CBCH, TS 04.12

use std::collections::VecDeque;

use gsm_core::{GsmTime, GSM_MACBLOCK_LEN, GSM_MACBLOCK_PADDING};

/// Payload octets carried per CBCH block
pub const CBCH_BLOCK_PAYLOAD: usize = 22;
/// Largest message, four blocks
pub const CBCH_MAX_MSG_LEN: usize = 4 * CBCH_BLOCK_PAYLOAD;

/// Link protocol discriminator of SMSCB blocks
const LPD_SMSCB: u8 = 0x01;
/// Sequence number of the null message
const SEQ_NULL: u8 = 0x0f;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbchError {
    TooLong(usize),
    /// Segment count outside 1..=4
    BadSegmentCount(u8),
}

impl core::fmt::Display for CbchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CbchError::TooLong(len) => write!(f, "SMSCB message of {} bytes exceeds {}", len, CBCH_MAX_MSG_LEN),
            CbchError::BadSegmentCount(n) => write!(f, "invalid SMSCB segment count {}", n),
        }
    }
}

impl std::error::Error for CbchError {}

#[derive(Debug, Clone)]
struct SmscbMsg {
    payload: [u8; CBCH_MAX_MSG_LEN],
    next_seg: u8,
    num_segs: u8,
}

fn block_header(seq: u8, last: bool) -> u8 {
    (LPD_SMSCB << 5) | ((last as u8) << 4) | (seq & 0x0f)
}

/// Block sent while no message is being broadcast
pub fn null_block() -> [u8; GSM_MACBLOCK_LEN] {
    let mut out = [GSM_MACBLOCK_PADDING; GSM_MACBLOCK_LEN];
    out[0] = block_header(SEQ_NULL, false);
    out
}

/// FIFO of SMSCB messages and the message currently on air
#[derive(Debug, Default)]
pub struct CbchSegmenter {
    queue: VecDeque<SmscbMsg>,
    current: Option<SmscbMsg>,
}

impl CbchSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a message of `num_segs` blocks
    pub fn enqueue(&mut self, num_segs: u8, data: &[u8]) -> Result<(), CbchError> {
        if data.len() > CBCH_MAX_MSG_LEN {
            return Err(CbchError::TooLong(data.len()));
        }
        if !(1..=4).contains(&num_segs) {
            return Err(CbchError::BadSegmentCount(num_segs));
        }
        let mut payload = [0u8; CBCH_MAX_MSG_LEN];
        payload[..data.len()].copy_from_slice(data);
        self.queue.push_back(SmscbMsg { payload, next_seg: 0, num_segs });
        tracing::debug!("SMSCB message of {} segments queued, {} pending", num_segs, self.queue.len());
        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Block for the CBCH position starting at `fn_num`
    pub fn next_block(&mut self, fn_num: u32) -> [u8; GSM_MACBLOCK_LEN] {
        // tb counts the CBCH occurrences, one per 51-multiframe
        let tb = GsmTime::new(fn_num).tc();
        if tb == 0 {
            self.current = self.queue.pop_front();
        }
        if tb > 3 {
            // Extended CBCH is not used
            return null_block();
        }
        let Some(msg) = self.current.as_mut() else {
            return null_block();
        };

        let seq = msg.next_seg;
        let start = seq as usize * CBCH_BLOCK_PAYLOAD;
        let last = seq + 1 == msg.num_segs;
        let mut out = [0u8; GSM_MACBLOCK_LEN];
        out[0] = block_header(seq, last);
        out[1..].copy_from_slice(&msg.payload[start..start + CBCH_BLOCK_PAYLOAD]);
        msg.next_seg += 1;
        if last {
            self.current = None;
        }
        out
    }
}
