//! Downlink burst producers

use gsm_core::amr_rtp::amr_rtp_decode;
use gsm_core::{BurstType, Tn, Ubit, GSM_MACBLOCK_LEN};
use gsm_saps::control::enums::chan_mode::TchMode;

use super::bursts::{egprs_burst, fcch_burst, normal_burst, sch_burst, BURST_CODED_BITS, EGPRS_BURST_CODED_BITS};
use super::chan_desc::TrxChan;
use super::codec::{TchPayload, XCCH_CODED_BITS};
use super::queue::{dequeue_prim, DlPrim};
use super::rx::{bfi_payload, BfiKind};
use super::scheduler::L1Scheduler;

/// Coded bits held for TCH/F interleaving, two blocks
pub(super) const TCHF_BUF_BITS: usize = 2 * XCCH_CODED_BITS;
/// Coded bits held for TCH/H interleaving, three half rate frames
pub(super) const TCHH_BUF_BITS: usize = 3 * TCHH_FRAME_BITS;
pub(super) const TCHH_FRAME_BITS: usize = 2 * BURST_CODED_BITS;

/// Downlink traffic channel bursts are lost after this many frames without
/// an uplink frame, at which point a bad frame is indicated upwards
const MAX_LOST_TCH_FRAMES: u32 = 5;

pub(super) type DlOut = Option<(BurstType, Vec<Ubit>)>;

/// True on frames whose in-band AMR bits carry the codec mode request
/// rather than the codec mode indication
#[inline]
pub(super) fn fn_is_codec_mode_request(fn_num: u32) -> bool {
    (((fn_num + 4) % 26) >> 2) & 1 == 1
}

fn gmsk_from_buffer(buf: &[Ubit], bid: u8, tsc: u8) -> DlOut {
    let start = bid as usize * BURST_CODED_BITS;
    let coded = buf.get(start..start + BURST_CODED_BITS)?;
    Some((BurstType::Gmsk, normal_burst(coded, tsc)))
}

fn psk8_from_buffer(buf: &[Ubit], bid: u8, tsc: u8) -> DlOut {
    let start = bid as usize * EGPRS_BURST_CODED_BITS;
    let coded = buf.get(start..start + EGPRS_BURST_CODED_BITS)?;
    Some((BurstType::Psk8, egprs_burst(coded, tsc)))
}

/// Frames to put on a traffic channel block, as taken from the queue
#[derive(Debug, Default)]
pub(super) struct TchTx {
    pub tch: Option<Vec<u8>>,
    pub facch: Option<Vec<u8>>,
}

impl L1Scheduler {
    pub(super) fn tx_fcch(&self) -> DlOut {
        Some((BurstType::Gmsk, fcch_burst()))
    }

    pub(super) fn tx_sch(&self, fn_num: u32) -> DlOut {
        let coded = self.codec.sch_encode(self.params.bsic, fn_num);
        Some((BurstType::Gmsk, sch_burst(&coded)))
    }

    /// xCCH: one 23 byte block over four bursts
    pub(super) fn tx_data(&mut self, tn: Tn, fn_num: u32, chan: TrxChan, bid: u8) -> DlOut {
        let (idx, ci) = (tn as usize, chan.index());
        let tsc = self.params.tsc;
        if bid > 0 {
            return gmsk_from_buffer(&self.ts[idx].chans[ci].dl_bursts, bid, tsc);
        }

        let chan_nr = chan.desc().chan_nr | tn;
        if chan.is_sacch() {
            if let Some(step) = self.ts[idx].chans[ci].sacch_loop.clock(&self.params.loops) {
                self.report_loop(chan_nr, step);
            }
        }

        let prim = dequeue_prim(&mut self.dl_prims[idx], tn, fn_num, chan);
        let Some(prim) = prim.filter(|p| {
            if p.data().len() != GSM_MACBLOCK_LEN {
                tracing::error!("tn {} fn_num {}: {} block of {} bytes, dropping", tn, fn_num, chan, p.data().len());
                return false;
            }
            true
        }) else {
            tracing::debug!("tn {} fn_num {}: no prim for {}", tn, fn_num, chan);
            self.ts[idx].chans[ci].dl_bursts = Vec::new();
            return None;
        };

        if chan.is_sacch() {
            let cs = &mut self.ts[idx].chans[ci];
            cs.lost_frames += 1;
            if cs.lost_frames > 1 {
                tracing::warn!("tn {} fn_num {}: {} uplink block missing", tn, fn_num, chan);
                self.send_lost_sacch(tn, chan, fn_num);
            }
        }

        let cs = &mut self.ts[idx].chans[ci];
        cs.dl_bursts.resize(XCCH_CODED_BITS, 0);
        self.codec.xcch_encode(prim.data(), &mut cs.dl_bursts);
        gmsk_from_buffer(&cs.dl_bursts, 0, tsc)
    }

    /// PDTCH: coding scheme and modulation follow from the block length
    pub(super) fn tx_pdtch(&mut self, tn: Tn, fn_num: u32, chan: TrxChan, bid: u8) -> DlOut {
        let (idx, ci) = (tn as usize, chan.index());
        let tsc = self.params.tsc;
        if bid == 0 {
            let prim = dequeue_prim(&mut self.dl_prims[idx], tn, fn_num, chan);
            let encoded = match prim {
                None => {
                    tracing::debug!("tn {} fn_num {}: no prim for {}", tn, fn_num, chan);
                    None
                }
                Some(prim) => {
                    let encoded = self.codec.pdtch_encode(prim.data());
                    if encoded.is_none() {
                        tracing::error!("tn {} fn_num {}: no coding scheme for {} byte block", tn, fn_num, prim.data().len());
                    }
                    encoded
                }
            };
            let cs = &mut self.ts[idx].chans[ci];
            match encoded {
                Some((burst_type, bits)) => {
                    cs.dl_burst_type = burst_type;
                    cs.dl_bursts = bits;
                }
                None => {
                    cs.dl_bursts = Vec::new();
                    return None;
                }
            }
        }

        let cs = &self.ts[idx].chans[ci];
        match cs.dl_burst_type {
            BurstType::Gmsk => gmsk_from_buffer(&cs.dl_bursts, bid, tsc),
            BurstType::Psk8 => psk8_from_buffer(&cs.dl_bursts, bid, tsc),
        }
    }

    /// Loss detection and queue handling shared by TCH/F and TCH/H.
    /// Returns the validated frames for this block.
    fn tx_tch_common(&mut self, tn: Tn, fn_num: u32, chan: TrxChan) -> TchTx {
        let (idx, ci) = (tn as usize, chan.index());
        let half_rate = chan != TrxChan::TchF;

        let cs = &mut self.ts[idx].chans[ci];
        if cs.is_speech() {
            cs.lost_frames += 1;
            if cs.lost_frames > MAX_LOST_TCH_FRAMES {
                tracing::info!("tn {} fn_num {}: {} uplink frames missing, sending bfi", tn, fn_num, chan);
                if let Some(bfi) = bfi_payload(cs, half_rate, BfiKind::Lost) {
                    self.send_tch_ind(tn, chan, fn_num, bfi);
                }
            }
        }

        let mut out = TchTx::default();
        let first = dequeue_prim(&mut self.dl_prims[idx], tn, fn_num, chan);
        let second = dequeue_prim(&mut self.dl_prims[idx], tn, fn_num, chan);
        for prim in [first, second].into_iter().flatten() {
            match prim {
                DlPrim::Tch(req) if out.tch.is_none() => out.tch = Some(req.data),
                DlPrim::Data(req) if out.facch.is_none() => out.facch = Some(req.data),
                DlPrim::Tch(_) => tracing::error!("tn {} fn_num {}: two TCH frames for one block", tn, fn_num),
                DlPrim::Data(_) => tracing::error!("tn {} fn_num {}: two FACCH blocks for one block", tn, fn_num),
            }
        }

        if out.facch.as_ref().is_some_and(|f| f.len() != GSM_MACBLOCK_LEN) {
            tracing::error!("tn {} fn_num {}: FACCH block not {} bytes, dropping", tn, fn_num, GSM_MACBLOCK_LEN);
            out.facch = None;
        }
        if out.facch.is_none() {
            if let Some(tch) = out.tch.take() {
                out.tch = self.check_tch_frame(tn, fn_num, chan, tch);
            }
        }
        out
    }

    /// Validates a speech frame against the channel mode. AMR frames also
    /// update the downlink codec mode state.
    fn check_tch_frame(&mut self, tn: Tn, fn_num: u32, chan: TrxChan, tch: Vec<u8>) -> Option<Vec<u8>> {
        let cs = &mut self.ts[tn as usize].chans[chan.index()];
        let half_rate = chan != TrxChan::TchF;
        if !cs.is_speech() {
            tracing::info!("tn {} fn_num {}: dropping speech frame, {} not in speech mode", tn, fn_num, chan);
            return None;
        }

        let expected = match cs.tch_mode {
            TchMode::SpeechV1 if half_rate => HR_BYTES,
            TchMode::SpeechV1 => FR_BYTES,
            TchMode::SpeechEfr if !half_rate => EFR_BYTES,
            TchMode::SpeechAmr => {
                let hdr = match amr_rtp_decode(&tch) {
                    Ok(hdr) => hdr,
                    Err(e) => {
                        tracing::error!("tn {} fn_num {}: invalid AMR frame: {:?}", tn, fn_num, e);
                        return None;
                    }
                };
                let amr = &mut cs.amr;
                let codecs = &amr.codec[..amr.codecs as usize];
                let cmr = codecs.iter().position(|c| *c == hdr.cmr);
                let ft = codecs.iter().position(|c| *c == hdr.ft);
                match cmr {
                    Some(cmr) => {
                        amr.dl_cmr = cmr as u8;
                        amr.set_loop(false);
                    }
                    None => amr.set_loop(true),
                }
                let Some(ft) = ft else {
                    tracing::error!("tn {} fn_num {}: AMR mode {} not in active set", tn, fn_num, hdr.ft);
                    return None;
                };
                if fn_is_codec_mode_request(fn_num) && amr.dl_ft != ft as u8 {
                    tracing::info!("tn {} fn_num {}: AMR mode change deferred to next frame", tn, fn_num);
                    return None;
                }
                amr.dl_ft = ft as u8;
                if !hdr.good {
                    tracing::info!("tn {} fn_num {}: not transmitting bad AMR frame", tn, fn_num);
                    return None;
                }
                return Some(tch);
            }
            mode => {
                tracing::error!("tn {} fn_num {}: invalid tch mode {:?} on {}", tn, fn_num, mode, chan);
                return None;
            }
        };
        if tch.len() != expected {
            tracing::error!("tn {} fn_num {}: speech frame of {} bytes, expected {}", tn, fn_num, tch.len(), expected);
            return None;
        }
        Some(tch)
    }

    pub(super) fn tx_tchf(&mut self, tn: Tn, fn_num: u32, chan: TrxChan, bid: u8) -> DlOut {
        let (idx, ci) = (tn as usize, chan.index());
        let tsc = self.params.tsc;
        if bid > 0 {
            return gmsk_from_buffer(&self.ts[idx].chans[ci].dl_bursts, bid, tsc);
        }

        let frames = self.tx_tch_common(tn, fn_num, chan);

        let cs = &mut self.ts[idx].chans[ci];
        if cs.dl_bursts.len() != TCHF_BUF_BITS {
            cs.dl_bursts = vec![0; TCHF_BUF_BITS];
        } else {
            cs.dl_bursts.copy_within(XCCH_CODED_BITS.., 0);
            cs.dl_bursts[XCCH_CODED_BITS..].fill(0);
        }

        let is_amr = cs.tch_mode == TchMode::SpeechAmr;
        let cmr_frame = fn_is_codec_mode_request(fn_num);
        let id = if cmr_frame { cs.amr.dl_cmr } else { cs.amr.dl_ft };
        let buf = &mut cs.dl_bursts[..XCCH_CODED_BITS];
        if let Some(facch) = &frames.facch {
            self.codec.tch_encode(TchPayload::Facch(facch), buf);
        } else if let Some(tch) = &frames.tch {
            let payload = if is_amr {
                TchPayload::Amr { data: &tch[2..], is_cmr: cmr_frame, id }
            } else {
                TchPayload::Speech(tch)
            };
            self.codec.tch_encode(payload, buf);
        } else {
            tracing::debug!("tn {} fn_num {}: no TCH or FACCH prim for {}", tn, fn_num, chan);
        }
        gmsk_from_buffer(&cs.dl_bursts, 0, tsc)
    }

    pub(super) fn tx_tchh(&mut self, tn: Tn, fn_num: u32, chan: TrxChan, bid: u8) -> DlOut {
        let (idx, ci) = (tn as usize, chan.index());
        let tsc = self.params.tsc;
        if bid > 0 {
            return gmsk_from_buffer(&self.ts[idx].chans[ci].dl_bursts, bid, tsc);
        }

        let mut frames = self.tx_tch_common(tn, fn_num, chan);
        if frames.facch.is_some() && fn_is_codec_mode_request(fn_num) {
            tracing::error!("tn {} fn_num {}: FACCH/H cannot start on this frame, dropping", tn, fn_num);
            frames.facch = None;
        }

        let cs = &mut self.ts[idx].chans[ci];
        if cs.dl_bursts.len() != TCHH_BUF_BITS {
            cs.dl_bursts = vec![0; TCHH_BUF_BITS];
        } else {
            cs.dl_bursts.copy_within(TCHH_FRAME_BITS..2 * TCHH_FRAME_BITS, 0);
            if cs.dl_ongoing_facch {
                cs.dl_bursts.copy_within(2 * TCHH_FRAME_BITS.., TCHH_FRAME_BITS);
                cs.dl_bursts[2 * TCHH_FRAME_BITS..].fill(0);
            } else {
                cs.dl_bursts[TCHH_FRAME_BITS..].fill(0);
            }
        }

        let is_amr = cs.tch_mode == TchMode::SpeechAmr;
        let cmr_frame = fn_is_codec_mode_request(fn_num);
        let id = if cmr_frame { cs.amr.dl_cmr } else { cs.amr.dl_ft };
        if let Some(facch) = &frames.facch {
            self.codec.tch_encode(TchPayload::Facch(facch), &mut cs.dl_bursts[..2 * TCHH_FRAME_BITS]);
            cs.dl_ongoing_facch = true;
        } else if cs.dl_ongoing_facch {
            // Second half of the FACCH goes out now
            cs.dl_ongoing_facch = false;
        } else if let Some(tch) = &frames.tch {
            let payload = if is_amr {
                TchPayload::Amr { data: &tch[2..], is_cmr: cmr_frame, id }
            } else {
                TchPayload::Speech(tch)
            };
            self.codec.tch_encode(payload, &mut cs.dl_bursts[..TCHH_FRAME_BITS]);
        } else {
            tracing::debug!("tn {} fn_num {}: no TCH or FACCH prim for {}", tn, fn_num, chan);
        }
        gmsk_from_buffer(&cs.dl_bursts, 0, tsc)
    }
}

/// Speech frame lengths in bytes
pub(super) const FR_BYTES: usize = 33;
pub(super) const EFR_BYTES: usize = 31;
pub(super) const HR_BYTES: usize = 15;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_mode_request_frames() {
        let frames: Vec<u32> = (0..26).filter(|f| fn_is_codec_mode_request(*f)).collect();
        assert_eq!(frames, vec![0, 1, 2, 3, 8, 9, 10, 11, 16, 17, 18, 19]);
        assert!(fn_is_codec_mode_request(26 + 8));
    }
}
