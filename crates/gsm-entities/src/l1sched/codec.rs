//! Channel coding seam between the scheduler and the burst buffers.
//!
//! The scheduler only moves coded bits between burst buffers and queues; the
//! actual block coding is behind [`ChannelCodec`]. [`LoopbackCodec`] is a
//! reversible framing used by the loopback PHY and the tests: it writes a tag,
//! a length, the payload and a parity octet into the data bits of the bursts,
//! and marks stolen blocks with the stealing flags.

use core::fmt;

use gsm_core::{BurstType, Sbit, Ubit};

use super::bursts::{BURST_CODED_BITS, EGPRS_BURST_CODED_BITS, RACH_CODED_BITS, SCH_CODED_BITS};

/// Coded bits of a signalling block over four normal bursts
pub const XCCH_CODED_BITS: usize = 4 * BURST_CODED_BITS;
/// Coded bits of a PDTCH block over four 8PSK bursts
pub const EGPRS_CODED_BITS: usize = 4 * EGPRS_BURST_CODED_BITS;

/// Block lengths of GPRS CS-1 to CS-4
const GPRS_CS_LEN: [usize; 4] = [23, 34, 40, 54];
/// Block lengths of EGPRS MCS-1 to MCS-9
const EGPRS_MCS_LEN: [usize; 9] = [27, 33, 42, 49, 60, 78, 118, 142, 154];

/// Data bits per normal burst, the stealing flags excluded
const BURST_DATA_BITS: usize = 114;

const TAG_XCCH: u8 = 0x10;
const TAG_FACCH: u8 = 0x20;
const TAG_SPEECH: u8 = 0x30;
const TAG_AMR: u8 = 0x40;
const TAG_PDTCH: u8 = 0x50;
const TAG_MASK: u8 = 0xf0;
const FILL_OCTET: u8 = 0x5a;

/// Bit error statistics of one decoded unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitErrors {
    pub n_errors: u32,
    pub n_bits_total: u32,
}

impl BitErrors {
    /// Bit error rate in units of 1/10000
    pub fn ber10k(&self) -> u16 {
        if self.n_bits_total == 0 {
            return 10000;
        }
        (10000 * self.n_errors as u64 / self.n_bits_total as u64) as u16
    }

    pub fn ratio(&self) -> f32 {
        if self.n_bits_total == 0 {
            return 1.0;
        }
        self.n_errors as f32 / self.n_bits_total as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Soft bits carrying no information, e.g. a burst that never arrived
    Erased,
    BadHeader,
    BadLength,
    BadParity,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Erased => write!(f, "erased bits"),
            DecodeError::BadHeader => write!(f, "unexpected block header"),
            DecodeError::BadLength => write!(f, "invalid block length"),
            DecodeError::BadParity => write!(f, "parity check failed"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// A traffic frame to encode
#[derive(Debug, Clone, Copy)]
pub enum TchPayload<'a> {
    Facch(&'a [u8]),
    /// FR, HR or EFR speech bits
    Speech(&'a [u8]),
    /// AMR speech bits with the in-band codec mode indication or request
    Amr { data: &'a [u8], is_cmr: bool, id: u8 },
}

/// A decoded traffic frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TchFrame {
    Facch(Vec<u8>),
    Speech(Vec<u8>),
    Amr { data: Vec<u8>, is_cmr: bool, id: u8 },
}

/// Block coding used by the scheduler.
///
/// Buffers passed in hold 116 coded bits per normal burst (both stealing flags
/// included) or 348 per 8PSK burst, in burst order.
pub trait ChannelCodec: Send {
    /// Encodes a 23 byte signalling block into 464 bits
    fn xcch_encode(&self, l2: &[u8], out: &mut [Ubit]);
    fn xcch_decode(&self, bits: &[Sbit]) -> Result<(Vec<u8>, BitErrors), DecodeError>;

    /// Encodes a packet data block. The block length selects the coding scheme and
    /// thereby the modulation. Returns None for a length matching no scheme.
    fn pdtch_encode(&self, l2: &[u8]) -> Option<(BurstType, Vec<Ubit>)>;
    fn pdtch_decode(&self, bits: &[Sbit], burst_type: BurstType) -> Result<(Vec<u8>, BitErrors), DecodeError>;

    /// Encodes a traffic frame. The buffer length selects full rate (464 bits),
    /// half rate speech (232 bits) or FACCH/H (464 bits, two half rate frames).
    fn tch_encode(&self, frame: TchPayload<'_>, out: &mut [Ubit]);
    fn tch_decode(&self, bits: &[Sbit], amr_codecs: u8) -> Result<(TchFrame, BitErrors), DecodeError>;
    /// True if the stealing flags mark the bursts as carrying FACCH
    fn tch_stolen(&self, bits: &[Sbit]) -> bool;

    /// Encodes the synchronisation information for a frame number
    fn sch_encode(&self, bsic: u8, fn_num: u32) -> [Ubit; SCH_CODED_BITS];
    /// Decodes the 36 coded bits of an access burst into the 8 bit RA
    fn rach_decode(&self, bits: &[Sbit], bsic: u8) -> Result<(u8, BitErrors), DecodeError>;
}

/// Position of the i-th data bit in a buffer of 116 bit normal burst chunks
#[inline]
fn gmsk_pos(i: usize) -> usize {
    let j = i % BURST_DATA_BITS;
    (i / BURST_DATA_BITS) * BURST_CODED_BITS + if j < 57 { j } else { j + 2 }
}

#[inline]
fn psk8_pos(i: usize) -> usize {
    i
}

#[inline]
fn hard_bit(s: Sbit) -> Option<Ubit> {
    match s {
        0 => None,
        s if s < 0 => Some(1),
        _ => Some(0),
    }
}

/// Framing of one coded unit with `capacity` data bits
struct Framer {
    capacity: usize,
    pos: fn(usize) -> usize,
}

impl Framer {
    fn gmsk(coded_len: usize) -> Self {
        Self { capacity: coded_len / BURST_CODED_BITS * BURST_DATA_BITS, pos: gmsk_pos }
    }

    fn psk8(coded_len: usize) -> Self {
        Self { capacity: coded_len, pos: psk8_pos }
    }

    fn max_payload(&self) -> usize {
        (self.capacity / 8).saturating_sub(3)
    }

    fn octets(&self, tag: u8, payload: &[u8]) -> Vec<u8> {
        let mut octets = Vec::with_capacity(self.capacity / 8);
        octets.push(tag);
        octets.push(payload.len() as u8);
        octets.extend_from_slice(payload);
        let parity = octets.iter().fold(0u8, |acc, b| acc ^ b);
        octets.push(parity);
        octets.resize(self.capacity / 8, FILL_OCTET);
        octets
    }

    fn put(&self, tag: u8, payload: &[u8], out: &mut [Ubit]) {
        let payload = &payload[..payload.len().min(self.max_payload())];
        let octets = self.octets(tag, payload);
        for i in 0..self.capacity {
            let bit = octets.get(i / 8).map(|o| (o >> (7 - i % 8)) & 1).unwrap_or(0);
            out[(self.pos)(i)] = bit;
        }
    }

    fn get(&self, bits: &[Sbit]) -> Result<(u8, Vec<u8>, BitErrors), DecodeError> {
        let read_octet = |idx: usize| -> Result<u8, DecodeError> {
            let mut octet = 0u8;
            for k in 0..8 {
                let bit = hard_bit(bits[(self.pos)(idx * 8 + k)]).ok_or(DecodeError::Erased)?;
                octet = (octet << 1) | bit;
            }
            Ok(octet)
        };

        let tag = read_octet(0)?;
        let len = read_octet(1)? as usize;
        if len > self.max_payload() {
            return Err(DecodeError::BadLength);
        }
        let mut payload = Vec::with_capacity(len);
        for idx in 2..2 + len {
            payload.push(read_octet(idx)?);
        }
        let parity = read_octet(2 + len)?;
        let expected = payload.iter().fold(tag ^ len as u8, |acc, b| acc ^ b);
        if parity != expected {
            return Err(DecodeError::BadParity);
        }

        // Count residual errors against the re-encoded unit
        let octets = self.octets(tag, &payload);
        let mut n_errors = 0;
        for i in 0..self.capacity {
            let want = octets.get(i / 8).map(|o| (o >> (7 - i % 8)) & 1).unwrap_or(0);
            if hard_bit(bits[(self.pos)(i)]) != Some(want) {
                n_errors += 1;
            }
        }
        Ok((tag, payload, BitErrors { n_errors, n_bits_total: self.capacity as u32 }))
    }
}

/// Sets or clears all stealing flags of a buffer of normal bursts
fn set_stealing_flags(out: &mut [Ubit], stolen: bool) {
    for chunk in out.chunks_mut(BURST_CODED_BITS) {
        if chunk.len() == BURST_CODED_BITS {
            chunk[57] = stolen as Ubit;
            chunk[58] = stolen as Ubit;
        }
    }
}

/// Shift register CRC over unpacked bits. `poly` excludes the x^len term.
fn crc_bits(bits: &[Ubit], poly: u16, len: u32) -> u16 {
    let mask = (1u16 << len) - 1;
    let mut reg: u16 = 0;
    for &b in bits {
        let feedback = (((reg >> (len - 1)) & 1) as u8) ^ (b & 1);
        reg = (reg << 1) & mask;
        if feedback == 1 {
            reg ^= poly & mask;
        }
    }
    reg
}

fn push_bits(out: &mut Vec<Ubit>, value: u32, n: u32) {
    for k in (0..n).rev() {
        out.push(((value >> k) & 1) as Ubit);
    }
}

/// SCH parity, x^10 + x^8 + x^6 + x^5 + x^4 + x^2 + 1 (TS 05.03 clause 4.7)
const SCH_CRC_POLY: u16 = 0x175;
/// RACH parity, x^6 + x^5 + x^3 + x^2 + x + 1 (TS 05.03 clause 4.6)
const RACH_CRC_POLY: u16 = 0x2f;

/// Builds the 18 bit RACH unit (RA, parity xor BSIC, tail) repeated twice.
/// Used by the loopback PHY and tests to originate access bursts.
pub fn rach_encode(ra: u8, bsic: u8) -> [Ubit; RACH_CODED_BITS] {
    let mut unit = Vec::with_capacity(18);
    push_bits(&mut unit, ra as u32, 8);
    let parity = crc_bits(&unit, RACH_CRC_POLY, 6) ^ 0x3f ^ (bsic as u16 & 0x3f);
    push_bits(&mut unit, parity as u32, 6);
    push_bits(&mut unit, 0, 4);

    let mut out = [0; RACH_CODED_BITS];
    out[..18].copy_from_slice(&unit);
    out[18..].copy_from_slice(&unit);
    out
}

/// Reversible framing codec for loopback operation
#[derive(Debug, Default, Clone, Copy)]
pub struct LoopbackCodec;

impl LoopbackCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ChannelCodec for LoopbackCodec {
    fn xcch_encode(&self, l2: &[u8], out: &mut [Ubit]) {
        Framer::gmsk(out.len()).put(TAG_XCCH, l2, out);
        set_stealing_flags(out, true);
    }

    fn xcch_decode(&self, bits: &[Sbit]) -> Result<(Vec<u8>, BitErrors), DecodeError> {
        let (tag, payload, errors) = Framer::gmsk(bits.len()).get(bits)?;
        if tag != TAG_XCCH {
            return Err(DecodeError::BadHeader);
        }
        Ok((payload, errors))
    }

    fn pdtch_encode(&self, l2: &[u8]) -> Option<(BurstType, Vec<Ubit>)> {
        let len = l2.len();
        // MCS-5 and up are 8PSK modulated
        if EGPRS_MCS_LEN[4..].contains(&len) {
            let mut out = vec![0; EGPRS_CODED_BITS];
            Framer::psk8(EGPRS_CODED_BITS).put(TAG_PDTCH, l2, &mut out);
            return Some((BurstType::Psk8, out));
        }
        if GPRS_CS_LEN.contains(&len) || EGPRS_MCS_LEN[..4].contains(&len) {
            let mut out = vec![0; XCCH_CODED_BITS];
            Framer::gmsk(XCCH_CODED_BITS).put(TAG_PDTCH, l2, &mut out);
            set_stealing_flags(&mut out, true);
            return Some((BurstType::Gmsk, out));
        }
        None
    }

    fn pdtch_decode(&self, bits: &[Sbit], burst_type: BurstType) -> Result<(Vec<u8>, BitErrors), DecodeError> {
        let framer = match burst_type {
            BurstType::Gmsk => Framer::gmsk(bits.len()),
            BurstType::Psk8 => Framer::psk8(bits.len()),
        };
        let (tag, payload, errors) = framer.get(bits)?;
        if tag != TAG_PDTCH {
            return Err(DecodeError::BadHeader);
        }
        Ok((payload, errors))
    }

    fn tch_encode(&self, frame: TchPayload<'_>, out: &mut [Ubit]) {
        let framer = Framer::gmsk(out.len());
        match frame {
            TchPayload::Facch(l2) => {
                framer.put(TAG_FACCH, l2, out);
                set_stealing_flags(out, true);
            }
            TchPayload::Speech(data) => {
                framer.put(TAG_SPEECH, data, out);
                set_stealing_flags(out, false);
            }
            TchPayload::Amr { data, is_cmr, id } => {
                framer.put(TAG_AMR | (is_cmr as u8) << 3 | (id & 0x03), data, out);
                set_stealing_flags(out, false);
            }
        }
    }

    fn tch_decode(&self, bits: &[Sbit], amr_codecs: u8) -> Result<(TchFrame, BitErrors), DecodeError> {
        let (tag, payload, errors) = Framer::gmsk(bits.len()).get(bits)?;
        let frame = match tag & TAG_MASK {
            TAG_FACCH => TchFrame::Facch(payload),
            TAG_SPEECH => TchFrame::Speech(payload),
            TAG_AMR => {
                let id = tag & 0x03;
                if id >= amr_codecs {
                    return Err(DecodeError::BadHeader);
                }
                TchFrame::Amr { data: payload, is_cmr: tag & 0x08 != 0, id }
            }
            _ => return Err(DecodeError::BadHeader),
        };
        Ok((frame, errors))
    }

    fn tch_stolen(&self, bits: &[Sbit]) -> bool {
        let sum: i32 = bits
            .chunks(BURST_CODED_BITS)
            .filter(|c| c.len() == BURST_CODED_BITS)
            .map(|c| c[57] as i32 + c[58] as i32)
            .sum();
        sum < 0
    }

    fn sch_encode(&self, bsic: u8, fn_num: u32) -> [Ubit; SCH_CODED_BITS] {
        let t1 = fn_num / (26 * 51);
        let t2 = fn_num % 26;
        let t3p = (fn_num % 51).saturating_sub(1) / 10;
        let info = ((bsic as u32 & 0x3f) << 19) | ((t1 & 0x7ff) << 8) | ((t2 & 0x1f) << 3) | (t3p & 0x07);

        let mut unit = Vec::with_capacity(39);
        push_bits(&mut unit, info, 25);
        let parity = crc_bits(&unit, SCH_CRC_POLY, 10) ^ 0x3ff;
        push_bits(&mut unit, parity as u32, 10);
        push_bits(&mut unit, 0, 4);

        let mut out = [0; SCH_CODED_BITS];
        out[..39].copy_from_slice(&unit);
        out[39..].copy_from_slice(&unit);
        out
    }

    fn rach_decode(&self, bits: &[Sbit], bsic: u8) -> Result<(u8, BitErrors), DecodeError> {
        if bits.len() < RACH_CODED_BITS {
            return Err(DecodeError::BadLength);
        }
        let mut unit = [0 as Ubit; 18];
        let mut n_errors = 0;
        for k in 0..18 {
            let a = bits[k];
            let b = bits[k + 18];
            let bit = hard_bit(a.saturating_add(b)).ok_or(DecodeError::Erased)?;
            if hard_bit(a) != Some(bit) {
                n_errors += 1;
            }
            if hard_bit(b) != Some(bit) {
                n_errors += 1;
            }
            unit[k] = bit;
        }
        let ra = unit[..8].iter().fold(0u8, |acc, b| (acc << 1) | b);
        let parity = unit[8..14].iter().fold(0u16, |acc, &b| (acc << 1) | b as u16);
        let expected = crc_bits(&unit[..8], RACH_CRC_POLY, 6) ^ 0x3f ^ (bsic as u16 & 0x3f);
        if parity != expected {
            return Err(DecodeError::BadParity);
        }
        Ok((ra, BitErrors { n_errors, n_bits_total: RACH_CODED_BITS as u32 }))
    }
}
