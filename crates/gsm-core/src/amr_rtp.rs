//! AMR payload framing in RTP octet-aligned mode (RFC 4867 clause 4.4)
//!
//! Byte 0 carries the codec mode request in its upper nibble, byte 1 the frame
//! type and the quality bit. Speech bits follow, padded to whole octets.

use crate::ParseErr;

/// Codec mode request value meaning "no request"
pub const AMR_CMR_NONE: u8 = 15;
/// Frame type of a silence descriptor
pub const AMR_FT_SID: u8 = 8;

/// Speech payload length in bytes for frame types 0 (4.75k) to 7 (12.2k)
const AMR_PAYLOAD_LEN: [usize; 8] = [12, 13, 15, 17, 19, 20, 26, 31];
const AMR_SID_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmrRtpHdr {
    /// Requested codec mode, AMR_CMR_NONE if none
    pub cmr: u8,
    pub ft: u8,
    /// Quality bit, false for a bad frame
    pub good: bool,
}

/// Speech payload length for a frame type, excluding the two header bytes
pub fn amr_payload_len(ft: u8) -> Option<usize> {
    match ft {
        0..=7 => Some(AMR_PAYLOAD_LEN[ft as usize]),
        AMR_FT_SID => Some(AMR_SID_LEN),
        _ => None,
    }
}

/// Builds an RTP AMR frame with a zeroed speech payload. Used for bad frame indications.
pub fn amr_rtp_encode(cmr: u8, ft: u8, good: bool) -> Option<Vec<u8>> {
    let len = amr_payload_len(ft)?;
    let mut out = vec![0u8; 2 + len];
    out[0] = (cmr & 0x0f) << 4;
    out[1] = ((ft & 0x0f) << 3) | ((good as u8) << 2);
    Some(out)
}

/// Parses the header of an RTP AMR frame and checks the total length
pub fn amr_rtp_decode(data: &[u8]) -> Result<AmrRtpHdr, ParseErr> {
    if data.len() < 2 {
        return Err(ParseErr::BufferEnded { field: Some("amr_rtp_hdr") });
    }
    let cmr = data[0] >> 4;
    let ft = (data[1] >> 3) & 0x0f;
    let good = (data[1] >> 2) & 1 == 1;

    let Some(len) = amr_payload_len(ft) else {
        return Err(ParseErr::InvalidValue { field: "amr_ft", value: ft as u64 });
    };
    if data.len() != 2 + len {
        return Err(ParseErr::InconsistentLength { expected: 2 + len, found: data.len() });
    }

    Ok(AmrRtpHdr { cmr, ft, good })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_header() {
        let frame = amr_rtp_encode(7, 4, false).unwrap();
        assert_eq!(frame.len(), 21);
        assert_eq!(frame[0], 0x70);
        assert_eq!(frame[1], 0x20);
        let hdr = amr_rtp_decode(&frame).unwrap();
        assert_eq!(hdr, AmrRtpHdr { cmr: 7, ft: 4, good: false });
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        let mut frame = amr_rtp_encode(AMR_CMR_NONE, 7, true).unwrap();
        frame.push(0);
        assert!(amr_rtp_decode(&frame).is_err());
        assert!(amr_rtp_decode(&[0x00]).is_err());
        assert!(amr_rtp_decode(&[0x00, 0x0f << 3]).is_err());
    }
}
