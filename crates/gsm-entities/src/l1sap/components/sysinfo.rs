use std::collections::BTreeMap;

use gsm_config::CfgSysinfo;
use gsm_core::{GsmTime, SysinfoType, GSM_MACBLOCK_LEN};

/// Optional types sharing TC 4, in round-robin order
const TC4_TYPES: [SysinfoType; 4] = [SysinfoType::Si2ter, SysinfoType::Si2quater, SysinfoType::Si13, SysinfoType::Si9];

/// SACCH filling rotation
const SACCH_TYPES: [SysinfoType; 4] = [SysinfoType::Si5, SysinfoType::Si5bis, SysinfoType::Si5ter, SysinfoType::Si6];

/// Picks the system information block for each BCCH position and SACCH filling.
/// Round-robin counters are kept per selector.
#[derive(Debug, Default)]
pub struct SiSelector {
    buffers: BTreeMap<SysinfoType, Vec<u8>>,
    tc4_cnt: usize,
    tc5_cnt: usize,
}

impl SiSelector {
    pub fn from_config(cfg: &CfgSysinfo) -> Self {
        let mut sel = Self::default();
        for (si, buf) in cfg.iter() {
            sel.buffers.insert(si, buf.to_vec());
        }
        sel
    }

    /// Replaces or removes a buffer. Returns false for a buffer of the wrong size
    pub fn set(&mut self, si: SysinfoType, data: Option<Vec<u8>>) -> bool {
        match data {
            Some(buf) if buf.len() != GSM_MACBLOCK_LEN => false,
            Some(buf) => {
                self.buffers.insert(si, buf);
                true
            }
            None => {
                self.buffers.remove(&si);
                true
            }
        }
    }

    pub fn get(&self, si: SysinfoType) -> Option<&[u8]> {
        self.buffers.get(&si).map(|b| b.as_slice())
    }

    pub fn has(&self, si: SysinfoType) -> bool {
        self.buffers.contains_key(&si)
    }

    /// Type to broadcast on the BCCH block starting at `fn_num`, None if nothing is configured for it
    pub fn bcch_type(&mut self, fn_num: u32) -> Option<SysinfoType> {
        let tc = GsmTime::new(fn_num).tc();
        let si = match tc {
            0 => SysinfoType::Si1,
            1 => SysinfoType::Si2,
            2 | 6 => SysinfoType::Si3,
            3 | 7 => SysinfoType::Si4,
            4 => {
                let present: Vec<SysinfoType> = TC4_TYPES.iter().copied().filter(|t| self.has(*t)).collect();
                if present.is_empty() {
                    SysinfoType::Si3
                } else {
                    let si = present[self.tc4_cnt % present.len()];
                    self.tc4_cnt = self.tc4_cnt.wrapping_add(1);
                    si
                }
            }
            _ => {
                let bis = self.has(SysinfoType::Si2bis);
                let ter = self.has(SysinfoType::Si2ter);
                match (bis, ter) {
                    (true, true) => {
                        self.tc5_cnt = self.tc5_cnt.wrapping_add(1);
                        if self.tc5_cnt % 2 == 1 { SysinfoType::Si2bis } else { SysinfoType::Si2ter }
                    }
                    (true, false) => SysinfoType::Si2bis,
                    (false, true) => SysinfoType::Si2ter,
                    (false, false) => SysinfoType::Si4,
                }
            }
        };
        self.has(si).then_some(si)
    }

    /// Block to broadcast on the BCCH block starting at `fn_num`
    pub fn bcch_block(&mut self, fn_num: u32) -> Option<&[u8]> {
        let si = self.bcch_type(fn_num)?;
        self.get(si)
    }

    /// Next SACCH filling type. `cnt` is the rotation counter of the lchan
    pub fn sacch_type(&self, cnt: &mut usize) -> Option<SysinfoType> {
        let present: Vec<SysinfoType> = SACCH_TYPES.iter().copied().filter(|t| self.has(*t)).collect();
        if present.is_empty() {
            return None;
        }
        let si = present[*cnt % present.len()];
        *cnt = cnt.wrapping_add(1);
        Some(si)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(tag: u8) -> Vec<u8> {
        let mut b = vec![0x2b; GSM_MACBLOCK_LEN];
        b[0] = tag;
        b
    }

    /// First frame of the BCCH block with the given TC
    fn fn_for_tc(tc: u32, mf: u32) -> u32 {
        (mf * 8 + tc) * 51 + 2
    }

    #[test]
    fn test_baseline_rotation() {
        let mut sel = SiSelector::default();
        for si in [SysinfoType::Si1, SysinfoType::Si2, SysinfoType::Si3, SysinfoType::Si4] {
            assert!(sel.set(si, Some(block(si as u8))));
        }
        assert_eq!(sel.bcch_type(fn_for_tc(0, 0)), Some(SysinfoType::Si1));
        assert_eq!(sel.bcch_type(fn_for_tc(1, 0)), Some(SysinfoType::Si2));
        assert_eq!(sel.bcch_type(fn_for_tc(2, 0)), Some(SysinfoType::Si3));
        assert_eq!(sel.bcch_type(fn_for_tc(6, 0)), Some(SysinfoType::Si3));
        assert_eq!(sel.bcch_type(fn_for_tc(3, 0)), Some(SysinfoType::Si4));
        assert_eq!(sel.bcch_type(fn_for_tc(7, 0)), Some(SysinfoType::Si4));
        // Nothing optional configured
        assert_eq!(sel.bcch_type(fn_for_tc(4, 0)), Some(SysinfoType::Si3));
        assert_eq!(sel.bcch_type(fn_for_tc(5, 0)), Some(SysinfoType::Si4));
    }

    #[test]
    fn test_tc4_round_robin() {
        let mut sel = SiSelector::default();
        sel.set(SysinfoType::Si2quater, Some(block(1)));
        sel.set(SysinfoType::Si13, Some(block(2)));
        let seq: Vec<_> = (0..4).map(|mf| sel.bcch_type(fn_for_tc(4, mf))).collect();
        assert_eq!(
            seq,
            vec![
                Some(SysinfoType::Si2quater),
                Some(SysinfoType::Si13),
                Some(SysinfoType::Si2quater),
                Some(SysinfoType::Si13)
            ]
        );
    }

    #[test]
    fn test_tc5_alternates() {
        let mut sel = SiSelector::default();
        sel.set(SysinfoType::Si2bis, Some(block(1)));
        assert_eq!(sel.bcch_type(fn_for_tc(5, 0)), Some(SysinfoType::Si2bis));
        sel.set(SysinfoType::Si2ter, Some(block(2)));
        let a = sel.bcch_type(fn_for_tc(5, 1));
        let b = sel.bcch_type(fn_for_tc(5, 2));
        assert_ne!(a, b);
        assert!(a.is_some() && b.is_some());
    }

    #[test]
    fn test_missing_and_bad_size() {
        let mut sel = SiSelector::default();
        assert_eq!(sel.bcch_block(fn_for_tc(0, 0)), None);
        assert!(!sel.set(SysinfoType::Si1, Some(vec![0; 5])));
        assert!(sel.set(SysinfoType::Si1, Some(block(9))));
        assert_eq!(sel.bcch_block(fn_for_tc(0, 0)).map(|b| b[0]), Some(9));
        assert!(sel.set(SysinfoType::Si1, None));
        assert_eq!(sel.bcch_block(fn_for_tc(0, 0)), None);
    }

    #[test]
    fn test_sacch_rotation() {
        let mut sel = SiSelector::default();
        let mut cnt = 0;
        assert_eq!(sel.sacch_type(&mut cnt), None);
        sel.set(SysinfoType::Si5, Some(block(5)));
        sel.set(SysinfoType::Si6, Some(block(6)));
        let seq: Vec<_> = (0..3).filter_map(|_| sel.sacch_type(&mut cnt)).collect();
        assert_eq!(seq, vec![SysinfoType::Si5, SysinfoType::Si6, SysinfoType::Si5]);
    }
}
