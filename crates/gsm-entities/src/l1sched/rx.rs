//! Uplink burst consumers and the indications they produce

use gsm_core::amr_rtp::amr_rtp_encode;
use gsm_core::gsm_time::fn_add;
use gsm_core::{BurstType, Tn, GSM_MACBLOCK_LEN};
use gsm_saps::control::enums::chan_mode::TchMode;
use gsm_saps::mph::{MeasInd, MphInfo};
use gsm_saps::ph::{PhDataInd, PhRachInd, PresenceInfo, TchInd};
use gsm_saps::SapMsgInner;

use super::bursts::{egprs_burst_coded, normal_burst_coded, BURST_CODED_BITS, EGPRS_BURST_CODED_BITS, RACH_CODED_BITS, RACH_DATA_OFFSET};
use super::chan_desc::TrxChan;
use super::chan_state::ChanState;
use super::codec::{BitErrors, TchFrame, EGPRS_CODED_BITS, XCCH_CODED_BITS};
use super::scheduler::{L1Scheduler, UlBurst};
use super::tx::{EFR_BYTES, FR_BYTES, HR_BYTES, TCHF_BUF_BITS, TCHH_BUF_BITS, TCHH_FRAME_BITS};

/// RSSI reported for a SACCH block that was never received
const RSSI_LOST: i8 = -110;

/// Reason for a bad frame indication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BfiKind {
    /// No uplink frame at all for too long
    Lost,
    /// Frame received but undecodable or stolen
    Bad,
}

/// Codec specific payload of a bad frame indication
pub(super) fn bfi_payload(cs: &ChanState, half_rate: bool, kind: BfiKind) -> Option<Vec<u8>> {
    match cs.tch_mode {
        TchMode::SpeechV1 if half_rate => {
            let mut data = vec![0; HR_BYTES];
            data[0] = 0x70;
            Some(data)
        }
        TchMode::SpeechV1 => {
            let mut data = vec![0; FR_BYTES];
            if kind == BfiKind::Bad {
                data[0] = 0xd0;
            }
            Some(data)
        }
        TchMode::SpeechEfr if !half_rate => {
            let mut data = vec![0; EFR_BYTES];
            if kind == BfiKind::Bad {
                data[0] = 0xc0;
            }
            Some(data)
        }
        TchMode::SpeechAmr => {
            let amr = &cs.amr;
            amr_rtp_encode(amr.codec[amr.dl_cmr as usize & 3], amr.codec[amr.dl_ft as usize & 3], false)
        }
        mode => {
            tracing::error!("no bad frame payload for tch mode {:?}", mode);
            None
        }
    }
}

/// Prepends the RTP AMR header to decoded speech bits
fn amr_rtp_frame(cmr: u8, ft: u8, speech: &[u8]) -> Option<Vec<u8>> {
    let mut frame = amr_rtp_encode(cmr, ft, true)?;
    if frame.len() != 2 + speech.len() {
        return None;
    }
    frame[2..].copy_from_slice(speech);
    Some(frame)
}

impl L1Scheduler {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn send_data_ind(
        &mut self,
        tn: Tn,
        chan: TrxChan,
        fn_num: u32,
        data: Vec<u8>,
        rssi: i8,
        toa256: i16,
        ber10k: u16,
    ) {
        let desc = chan.desc();
        let presence = if data.is_empty() { PresenceInfo::Invalid } else { PresenceInfo::Valid };
        self.up.push(SapMsgInner::PhDataInd(PhDataInd {
            chan_nr: desc.chan_nr | tn,
            link_id: desc.link_id,
            fn_num,
            rssi,
            ber10k,
            ta_offs_256bits: toa256,
            lqual_cb: 0,
            presence,
            data,
        }));
    }

    pub(super) fn send_tch_ind(&mut self, tn: Tn, chan: TrxChan, fn_num: u32, data: Vec<u8>) {
        let cs = &mut self.ts[tn as usize].chans[chan.index()];
        cs.lost_frames = cs.lost_frames.saturating_sub(1);
        self.up.push(SapMsgInner::TchInd(TchInd { chan_nr: chan.desc().chan_nr | tn, fn_num, data }));
    }

    pub(super) fn send_meas(&mut self, tn: Tn, chan: TrxChan, fn_num: u32, errors: BitErrors, rssi: i8, toa256: i16) {
        self.up.push(SapMsgInner::MphInfo(MphInfo::MeasInd(MeasInd {
            chan_nr: chan.desc().chan_nr | tn,
            fn_num,
            ta_offs_256bits: toa256,
            ber10k: errors.ber10k(),
            inv_rssi: (-(rssi as i16)).clamp(0, u8::MAX as i16) as u8,
        })));
    }

    /// Reports a SACCH block as lost when nothing arrived for it
    pub(super) fn send_lost_sacch(&mut self, tn: Tn, chan: TrxChan, fn_num: u32) {
        let lost = BitErrors { n_errors: XCCH_CODED_BITS as u32, n_bits_total: XCCH_CODED_BITS as u32 };
        self.send_meas(tn, chan, fn_num, lost, RSSI_LOST, 0);
        self.send_data_ind(tn, chan, fn_num, Vec::new(), RSSI_LOST, 0, lost.ber10k());
    }

    pub(super) fn rx_rach(&mut self, tn: Tn, chan: TrxChan, burst: &UlBurst<'_>) {
        if burst.burst_type != BurstType::Gmsk {
            return;
        }
        let bits = &burst.bits[RACH_DATA_OFFSET..RACH_DATA_OFFSET + RACH_CODED_BITS];
        let (ra, errors) = match self.codec.rach_decode(bits, self.params.bsic) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::debug!("tn {} fn_num {}: bad access burst on {}: {}", tn, burst.fn_num, chan, e);
                return;
            }
        };
        tracing::debug!("tn {} fn_num {}: access burst on {} ra {:#04x} toa256 {}", tn, burst.fn_num, chan, ra, burst.toa256);
        self.up.push(SapMsgInner::PhRachInd(PhRachInd {
            chan_nr: chan.desc().chan_nr | tn,
            fn_num: burst.fn_num,
            ra: ra as u16,
            acc_delay: if burst.toa256 >= 0 { (burst.toa256 / 256) as u8 } else { 0 },
            rssi: burst.rssi,
            ber10k: errors.ber10k(),
            toa256: burst.toa256,
        }));
    }

    /// xCCH: four bursts reassembled into one block
    pub(super) fn rx_data(&mut self, tn: Tn, chan: TrxChan, burst: &UlBurst<'_>) {
        let (idx, ci) = (tn as usize, chan.index());
        if self.ts[idx].chans[ci].ho_rach_detect {
            return self.rx_rach(tn, chan, burst);
        }
        if burst.burst_type != BurstType::Gmsk {
            tracing::debug!("tn {} fn_num {}: 8PSK burst on {}, ignoring", tn, burst.fn_num, chan);
            return;
        }
        let bid = burst.bid as usize;

        let cs = &mut self.ts[idx].chans[ci];
        if bid == 0 {
            cs.ul_buffer(XCCH_CODED_BITS, BurstType::Gmsk).fill(0);
            cs.ul_mask = 0;
            cs.ul_first_fn = burst.fn_num;
            cs.ul_meas = Default::default();
        }
        cs.ul_mask |= 1 << bid;
        cs.ul_meas.add(burst.rssi, burst.toa256);
        let off = bid * BURST_CODED_BITS;
        normal_burst_coded(burst.bits, &mut cs.ul_buffer(XCCH_CODED_BITS, BurstType::Gmsk)[off..off + BURST_CODED_BITS]);

        let step = match chan.is_sacch() {
            true => cs.sacch_loop.input(burst.rssi, burst.toa256, &self.params.loops),
            false => None,
        };
        if let Some(step) = step {
            self.report_loop(chan.desc().chan_nr | tn, step);
        }

        let cs = &mut self.ts[idx].chans[ci];
        if bid != 3 {
            return;
        }
        if cs.ul_mask & 0xf != 0xf {
            tracing::info!("tn {} fn_num {}: incomplete block on {}, mask {:#x}", tn, burst.fn_num, chan, cs.ul_mask);
            // The first burst sets the frame number of the block
            if cs.ul_mask & 0x1 == 0 {
                cs.ul_mask = 0;
                return;
            }
        }
        cs.ul_mask = 0;

        let first_fn = cs.ul_first_fn;
        let rssi = cs.ul_meas.rssi_avg();
        let toa256 = cs.ul_meas.toa256_avg();
        let (data, errors) = match self.codec.xcch_decode(&cs.ul_bursts) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::info!("tn {} fn_num {}: bad block on {}: {}", tn, first_fn, chan, e);
                let all = XCCH_CODED_BITS as u32;
                (Vec::new(), BitErrors { n_errors: all, n_bits_total: all })
            }
        };
        if chan.is_sacch() {
            // Something arrived for this block, even if undecodable
            self.ts[idx].chans[ci].lost_frames = 0;
        }
        self.send_meas(tn, chan, first_fn, errors, rssi, toa256);
        self.send_data_ind(tn, chan, first_fn, data, rssi, toa256, errors.ber10k());
    }

    /// PDTCH: four GMSK or 8PSK bursts, only decoded blocks are forwarded
    pub(super) fn rx_pdtch(&mut self, tn: Tn, chan: TrxChan, burst: &UlBurst<'_>) {
        let (idx, ci) = (tn as usize, chan.index());
        let bid = burst.bid as usize;
        let (len, chunk) = match burst.burst_type {
            BurstType::Gmsk => (XCCH_CODED_BITS, BURST_CODED_BITS),
            BurstType::Psk8 => (EGPRS_CODED_BITS, EGPRS_BURST_CODED_BITS),
        };

        let cs = &mut self.ts[idx].chans[ci];
        if bid == 0 {
            cs.ul_buffer(len, burst.burst_type).fill(0);
            cs.ul_mask = 0;
            cs.ul_first_fn = burst.fn_num;
            cs.ul_meas = Default::default();
        }
        cs.ul_mask |= 1 << bid;
        cs.ul_meas.add(burst.rssi, burst.toa256);
        let out = &mut cs.ul_buffer(len, burst.burst_type)[bid * chunk..(bid + 1) * chunk];
        match burst.burst_type {
            BurstType::Gmsk => normal_burst_coded(burst.bits, out),
            BurstType::Psk8 => egprs_burst_coded(burst.bits, out),
        }

        if bid != 3 {
            return;
        }
        if cs.ul_mask & 0xf != 0xf {
            tracing::debug!("tn {} fn_num {}: incomplete PDTCH block, mask {:#x}", tn, burst.fn_num, cs.ul_mask);
        }
        cs.ul_mask = 0;

        let first_fn = cs.ul_first_fn;
        let rssi = cs.ul_meas.rssi_avg();
        let toa256 = cs.ul_meas.toa256_avg();
        let result = self.codec.pdtch_decode(&cs.ul_bursts, cs.ul_burst_type);
        let errors = match &result {
            Ok((_, errors)) => *errors,
            Err(_) => BitErrors { n_errors: len as u32, n_bits_total: len as u32 },
        };
        self.send_meas(tn, chan, first_fn, errors, rssi, toa256);
        match result {
            Ok((data, errors)) => {
                let ind_fn = fn_add(burst.fn_num, -3);
                self.send_data_ind(tn, chan, ind_fn, data, rssi, toa256, errors.ber10k());
            }
            Err(e) => tracing::debug!("tn {} fn_num {}: bad PDTCH block: {}", tn, burst.fn_num, e),
        }
    }

    pub(super) fn rx_tchf(&mut self, tn: Tn, chan: TrxChan, burst: &UlBurst<'_>) {
        let (idx, ci) = (tn as usize, chan.index());
        if self.ts[idx].chans[ci].ho_rach_detect {
            return self.rx_rach(tn, chan, burst);
        }
        if burst.burst_type != BurstType::Gmsk {
            return;
        }
        let bid = burst.bid as usize;
        let half = XCCH_CODED_BITS;

        let cs = &mut self.ts[idx].chans[ci];
        let buf = cs.ul_buffer(TCHF_BUF_BITS, BurstType::Gmsk);
        if bid == 0 {
            buf[half..].fill(0);
        }
        let off = half + bid * BURST_CODED_BITS;
        normal_burst_coded(burst.bits, &mut buf[off..off + BURST_CODED_BITS]);
        if bid == 0 {
            cs.ul_mask = 0;
            cs.ul_first_fn = burst.fn_num;
        }
        cs.ul_mask |= 1 << bid;

        if bid != 3 {
            return;
        }
        if cs.ul_mask & 0xf != 0xf {
            tracing::info!("tn {} fn_num {}: incomplete frame on {}, mask {:#x}", tn, burst.fn_num, chan, cs.ul_mask);
        }
        cs.ul_mask = 0;

        let result = self.codec.tch_decode(&cs.ul_bursts[half..], cs.amr.codecs);
        cs.ul_bursts.copy_within(half.., 0);

        let first_fn = cs.ul_first_fn;
        let ind_fn = fn_add(burst.fn_num, -7);
        self.tch_decoded(tn, chan, first_fn, ind_fn, ind_fn, result, burst);
    }

    pub(super) fn rx_tchh(&mut self, tn: Tn, chan: TrxChan, burst: &UlBurst<'_>) {
        let (idx, ci) = (tn as usize, chan.index());
        if self.ts[idx].chans[ci].ho_rach_detect {
            return self.rx_rach(tn, chan, burst);
        }
        if burst.burst_type != BurstType::Gmsk {
            return;
        }
        let bid = burst.bid as usize;
        let last = 2 * TCHH_FRAME_BITS;

        let cs = &mut self.ts[idx].chans[ci];
        let buf = cs.ul_buffer(TCHH_BUF_BITS, BurstType::Gmsk);
        if bid == 0 {
            buf[last..].fill(0);
        }
        let off = last + bid * BURST_CODED_BITS;
        normal_burst_coded(burst.bits, &mut buf[off..off + BURST_CODED_BITS]);
        if bid == 0 {
            cs.ul_mask = 0;
            cs.ul_first_fn = burst.fn_num;
        }
        cs.ul_mask |= 1 << bid;

        if bid != 1 {
            return;
        }
        if cs.ul_mask & 0x3 != 0x3 {
            tracing::info!("tn {} fn_num {}: incomplete frame on {}, mask {:#x}", tn, burst.fn_num, chan, cs.ul_mask);
        }
        cs.ul_mask = 0;

        // A frame ending on 19 or 20 started before the idle frame
        let fn_mod = burst.fn_num % 26;
        let tch_fn = fn_add(burst.fn_num, -10 - (fn_mod == 19) as i32 - (fn_mod == 20) as i32);
        let facch_fn = fn_add(burst.fn_num, -10 - (fn_mod >= 19) as i32);
        let first_fn = cs.ul_first_fn;

        if cs.ul_ongoing_facch {
            // Second half: the FACCH spans the last two frames
            cs.ul_ongoing_facch = false;
            let result = self.codec.tch_decode(&cs.ul_bursts[TCHH_FRAME_BITS..], cs.amr.codecs);
            cs.ul_bursts.copy_within(TCHH_FRAME_BITS.., 0);
            self.tch_decoded(tn, chan, first_fn, tch_fn, facch_fn, result, burst);
            return;
        }
        if self.codec.tch_stolen(&cs.ul_bursts[last..]) {
            tracing::debug!("tn {} fn_num {}: FACCH/H start on {}", tn, burst.fn_num, chan);
            cs.ul_ongoing_facch = true;
            cs.ul_bursts.copy_within(TCHH_FRAME_BITS.., 0);
            self.tch_bad(tn, chan, tch_fn);
            return;
        }

        let result = self.codec.tch_decode(&cs.ul_bursts[last..], cs.amr.codecs);
        cs.ul_bursts.copy_within(TCHH_FRAME_BITS.., 0);
        self.tch_decoded(tn, chan, first_fn, tch_fn, facch_fn, result, burst);
    }

    /// Indications for a decoded traffic frame, shared by TCH/F and TCH/H
    #[allow(clippy::too_many_arguments)]
    fn tch_decoded(
        &mut self,
        tn: Tn,
        chan: TrxChan,
        first_fn: u32,
        tch_fn: u32,
        facch_fn: u32,
        result: Result<(TchFrame, BitErrors), super::codec::DecodeError>,
        burst: &UlBurst<'_>,
    ) {
        let half_rate = chan != TrxChan::TchF;
        let errors = match &result {
            Ok((_, errors)) => *errors,
            Err(_) => {
                let all = (if half_rate { TCHH_FRAME_BITS } else { XCCH_CODED_BITS }) as u32;
                BitErrors { n_errors: all, n_bits_total: all }
            }
        };
        self.send_meas(tn, chan, first_fn, errors, burst.rssi, burst.toa256);

        let cs = &mut self.ts[tn as usize].chans[chan.index()];
        let speech = cs.is_speech();
        let amr_mode = speech && cs.tch_mode == TchMode::SpeechAmr;

        let frame = match result {
            Ok((frame, errors)) => {
                if amr_mode {
                    if let Some(cmr) = cs.amr.loop_input(errors.ratio(), half_rate) {
                        tracing::debug!("tn {}: {} requesting AMR mode index {}", tn, chan, cmr);
                    }
                }
                frame
            }
            Err(e) => {
                tracing::info!("tn {} fn_num {}: bad frame on {}: {}", tn, burst.fn_num, chan, e);
                return self.tch_bad(tn, chan, tch_fn);
            }
        };

        match frame {
            TchFrame::Facch(l2) if l2.len() == GSM_MACBLOCK_LEN => {
                self.send_data_ind(tn, chan, facch_fn, l2, burst.rssi, burst.toa256, errors.ber10k());
                self.tch_bad(tn, chan, tch_fn);
            }
            TchFrame::Speech(data) if speech && !amr_mode => self.send_tch_ind(tn, chan, tch_fn, data),
            TchFrame::Amr { data, is_cmr, id } if amr_mode => {
                let amr = &mut cs.amr;
                if is_cmr {
                    amr.ul_cmr = id;
                } else {
                    amr.ul_ft = id;
                }
                let cmr = amr.codec[amr.ul_cmr as usize & 3];
                let ft = amr.codec[amr.ul_ft as usize & 3];
                match amr_rtp_frame(cmr, ft, &data) {
                    Some(rtp) => self.send_tch_ind(tn, chan, tch_fn, rtp),
                    None => self.tch_bad(tn, chan, tch_fn),
                }
            }
            _ => {
                tracing::debug!("tn {} fn_num {}: unexpected frame type on {}", tn, burst.fn_num, chan);
                self.tch_bad(tn, chan, tch_fn);
            }
        }
    }

    /// Bad frame indication for a speech channel, nothing otherwise
    fn tch_bad(&mut self, tn: Tn, chan: TrxChan, tch_fn: u32) {
        let cs = &self.ts[tn as usize].chans[chan.index()];
        if !cs.is_speech() {
            return;
        }
        if let Some(bfi) = bfi_payload(cs, chan != TrxChan::TchF, BfiKind::Bad) {
            self.send_tch_ind(tn, chan, tch_fn, bfi);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfi_payloads() {
        let mut cs = ChanState::default();
        cs.tch_mode = TchMode::SpeechV1;
        let hr = bfi_payload(&cs, true, BfiKind::Bad).unwrap();
        assert_eq!(hr.len(), HR_BYTES);
        assert_eq!(hr[0], 0x70);
        let fr = bfi_payload(&cs, false, BfiKind::Bad).unwrap();
        assert_eq!(fr[0], 0xd0);
        assert!(bfi_payload(&cs, false, BfiKind::Lost).unwrap().iter().all(|b| *b == 0));

        cs.tch_mode = TchMode::SpeechEfr;
        assert!(bfi_payload(&cs, true, BfiKind::Bad).is_none());
        assert_eq!(bfi_payload(&cs, false, BfiKind::Bad).unwrap()[0], 0xc0);

        cs.tch_mode = TchMode::SpeechAmr;
        cs.amr.codec = [0, 2, 5, 7];
        cs.amr.dl_cmr = 2;
        cs.amr.dl_ft = 1;
        let amr = bfi_payload(&cs, false, BfiKind::Bad).unwrap();
        assert_eq!(amr[0] >> 4, 5);
        assert_eq!((amr[1] >> 3) & 0x0f, 2);
        assert_eq!(amr[1] & 0x04, 0);
    }

    #[test]
    fn test_amr_rtp_frame_length() {
        assert!(amr_rtp_frame(15, 7, &[0; 31]).is_some());
        assert!(amr_rtp_frame(15, 7, &[0; 30]).is_none());
    }
}
