//! MultiRate configuration IE (TS 04.08 clause 10.5.2.21aa), value part only

use gsm_saps::control::amr_conf::{AmrModeConf, AmrMultirateConf, AmrParseErr};

/// Number of bytes the IE needs for a given number of modes
fn required_len(num_modes: u8) -> usize {
    match num_modes {
        0 | 1 => 2,
        n => n as usize + 2,
    }
}

/// Parses the MultiRate configuration. Modes are listed in bitmap order, most robust first.
pub fn parse_mr_conf(bytes: &[u8]) -> Result<AmrMultirateConf, AmrParseErr> {
    if bytes.len() < 2 {
        return Err(AmrParseErr::TooShort { needed: 2, found: bytes.len() });
    }
    let version = bytes[0] >> 5;
    if version != 1 {
        return Err(AmrParseErr::Version(version));
    }

    let bitmap = bytes[1];
    let num_modes = bitmap.count_ones() as u8;
    if num_modes == 0 {
        return Err(AmrParseErr::NoModes);
    }
    if num_modes > 4 {
        return Err(AmrParseErr::TooManyModes(num_modes));
    }
    let needed = required_len(num_modes);
    if bytes.len() < needed {
        return Err(AmrParseErr::TooShort { needed, found: bytes.len() });
    }

    let mut conf = AmrMultirateConf {
        num_modes,
        icmi: (bytes[0] >> 4) & 1 == 1,
        start_mode: bytes[0] & 0x03,
        ..Default::default()
    };
    let mut n = 0;
    for mode in 0..8u8 {
        if bitmap & (1 << mode) != 0 {
            conf.modes[n] = AmrModeConf { mode, threshold: 0, hysteresis: 0 };
            n += 1;
        }
    }

    // Thresholds are 6 bits and hysteresis 4 bits, packed back to back from byte 2
    if num_modes >= 2 {
        conf.modes[0].threshold = bytes[2] & 0x3f;
        conf.modes[0].hysteresis = bytes[3] >> 4;
    }
    if num_modes >= 3 {
        conf.modes[1].threshold = ((bytes[3] & 0x0f) << 2) | (bytes[4] >> 6);
        conf.modes[1].hysteresis = (bytes[4] >> 2) & 0x0f;
    }
    if num_modes >= 4 {
        conf.modes[2].threshold = ((bytes[4] & 0x03) << 4) | (bytes[5] >> 4);
        conf.modes[2].hysteresis = bytes[5] & 0x0f;
    }
    Ok(conf)
}

/// Index of `mode` within the active set. Falls back to the most robust mode.
pub fn mode_index(conf: &AmrMultirateConf, mode: u8) -> u8 {
    match conf.active_modes().iter().position(|m| m.mode == mode) {
        Some(idx) => idx as u8,
        None => {
            tracing::warn!("AMR mode {} not in the active set, using index 0", mode);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode() {
        // Version 1, ICMI, start mode 0, 12.2k only
        let conf = parse_mr_conf(&[0x30, 0x80]).unwrap();
        assert_eq!(conf.num_modes, 1);
        assert!(conf.icmi);
        assert_eq!(conf.modes[0].mode, 7);
        assert_eq!(mode_index(&conf, 7), 0);
    }

    #[test]
    fn test_four_modes_thresholds() {
        // 4.75, 5.9, 7.4, 12.2 with thresholds 13, 20, 30 and hysteresis 4, 5, 6
        let t = [13u8, 20, 30];
        let h = [4u8, 5, 6];
        let b2 = t[0];
        let b3 = (h[0] << 4) | (t[1] >> 2);
        let b4 = ((t[1] & 0x03) << 6) | (h[1] << 2) | (t[2] >> 4);
        let b5 = ((t[2] & 0x0f) << 4) | h[2];
        let conf = parse_mr_conf(&[0x21, 0x95, b2, b3, b4, b5]).unwrap();

        assert_eq!(conf.num_modes, 4);
        assert!(!conf.icmi);
        assert_eq!(conf.start_mode, 1);
        let modes: Vec<u8> = conf.active_modes().iter().map(|m| m.mode).collect();
        assert_eq!(modes, vec![0, 2, 4, 7]);
        for i in 0..3 {
            assert_eq!(conf.modes[i].threshold, t[i]);
            assert_eq!(conf.modes[i].hysteresis, h[i]);
        }
        assert_eq!(mode_index(&conf, 4), 2);
        // Unknown mode falls back to the most robust one
        assert_eq!(mode_index(&conf, 5), 0);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_mr_conf(&[0x20]), Err(AmrParseErr::TooShort { needed: 2, found: 1 }));
        assert_eq!(parse_mr_conf(&[0x40, 0x01]), Err(AmrParseErr::Version(2)));
        assert_eq!(parse_mr_conf(&[0x20, 0x00]), Err(AmrParseErr::NoModes));
        assert_eq!(parse_mr_conf(&[0x20, 0x1f, 0, 0, 0, 0, 0]), Err(AmrParseErr::TooManyModes(5)));
        assert_eq!(parse_mr_conf(&[0x20, 0x03, 0]), Err(AmrParseErr::TooShort { needed: 4, found: 3 }));
        assert_eq!(parse_mr_conf(&[0x20, 0x07, 0, 0]), Err(AmrParseErr::TooShort { needed: 5, found: 4 }));
        assert_eq!(parse_mr_conf(&[0x20, 0x0f, 0, 0, 0]), Err(AmrParseErr::TooShort { needed: 6, found: 5 }));
    }
}
