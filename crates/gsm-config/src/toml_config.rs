use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use gsm_core::{PhysChanConfig, SysinfoType, NUM_TIMESLOTS};
use serde::Deserialize;
use toml::Value;

use super::stack_config::{CfgBts, CfgPhyIo, PhyBackend, SharedConfig, StackConfig, StackState};
use super::stack_config_sysinfo::{parse_hex, CfgSysinfo};

/// Build `SharedConfig` from a TOML configuration file
pub fn from_toml_str(toml_str: &str) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    // Various sanity checks
    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if let Some(ref phy) = root.phy_io {
        if !phy.extra.is_empty() {
            return Err(format!("Unrecognized fields: phy_io::{:?}", sorted_keys(&phy.extra)).into());
        }
    }
    if !root.bts.extra.is_empty() {
        return Err(format!("Unrecognized fields in bts: {:?}", sorted_keys(&root.bts.extra)).into());
    }
    if let Some(ref ts) = root.timeslots {
        if !ts.extra.is_empty() {
            return Err(format!("Unrecognized fields in timeslots: {:?}", sorted_keys(&ts.extra)).into());
        }
    }

    // Build config from required and optional values
    let mut cfg = StackConfig::new(root.bts.bsic);
    cfg.debug_log = root.debug_log;

    if let Some(phy) = root.phy_io {
        apply_phy_io_patch(&mut cfg.phy_io, phy);
    }
    apply_bts_patch(&mut cfg.bts, root.bts);
    if let Some(ts) = root.timeslots {
        apply_timeslots_patch(&mut cfg.timeslots, ts)?;
    }
    if let Some(si) = root.sysinfo {
        apply_sysinfo_patch(&mut cfg.sysinfo, si)?;
    }

    cfg.validate()?;

    Ok(SharedConfig::from_parts(cfg, StackState::default()))
}

/// Build `SharedConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SharedConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_phy_io_patch(dst: &mut CfgPhyIo, src: PhyIoDto) {
    dst.backend = src.backend;
    dst.dl_tx_file = src.dl_tx_file;

    if let Some(v) = src.clock_advance {
        dst.clock_advance = v;
    }
    if let Some(v) = src.rts_advance {
        dst.rts_advance = v;
    }
    if let Some(v) = src.realtime {
        dst.realtime = v;
    }
}

fn apply_bts_patch(dst: &mut CfgBts, src: BtsDto) {
    dst.bsic = src.bsic;
    dst.tsc = src.tsc;

    if let Some(v) = src.c0 {
        dst.c0 = v;
    }
    if let Some(v) = src.max_ta {
        dst.max_ta = v;
    }
    if let Some(v) = src.max_ber10k_rach {
        dst.max_ber10k_rach = v;
    }
    if let Some(v) = src.rach_busy_threshold {
        dst.rach_busy_threshold = v;
    }
    if let Some(v) = src.radio_link_timeout {
        dst.radio_link_timeout = v;
    }
    if let Some(v) = src.ny1 {
        dst.ny1 = v;
    }
    if let Some(v) = src.t3105_ms {
        dst.t3105_ms = v;
    }
    if let Some(v) = src.ms_power_target {
        dst.ms_power_target = v;
    }
    if let Some(v) = src.ms_power_ctrl {
        dst.ms_power_ctrl = v;
    }
    if let Some(v) = src.ta_ctrl {
        dst.ta_ctrl = v;
    }
}

fn apply_timeslots_patch(
    dst: &mut [PhysChanConfig; NUM_TIMESLOTS],
    src: TimeslotsDto,
) -> Result<(), Box<dyn std::error::Error>> {
    if src.pchan.len() > NUM_TIMESLOTS {
        return Err(format!("timeslots::pchan lists {} entries, at most {} allowed", src.pchan.len(), NUM_TIMESLOTS).into());
    }
    *dst = [PhysChanConfig::None; NUM_TIMESLOTS];
    for (tn, pchan) in src.pchan.into_iter().enumerate() {
        dst[tn] = pchan;
    }
    Ok(())
}

fn apply_sysinfo_patch(dst: &mut CfgSysinfo, src: HashMap<String, String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut keys: Vec<&String> = src.keys().collect();
    keys.sort_unstable();
    for key in keys {
        let Some(si) = SysinfoType::from_key(key) else {
            return Err(format!("Unrecognized fields in sysinfo: {}", key).into());
        };
        let buf = parse_hex(&src[key]).map_err(|e| format!("sysinfo::{}: {}", key, e))?;
        dst.set(si, buf);
    }
    Ok(())
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    #[serde(default)]
    phy_io: Option<PhyIoDto>,

    bts: BtsDto,

    #[serde(default)]
    timeslots: Option<TimeslotsDto>,

    #[serde(default)]
    sysinfo: Option<HashMap<String, String>>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct PhyIoDto {
    pub backend: PhyBackend,

    clock_advance: Option<u32>,
    rts_advance: Option<u32>,
    realtime: Option<bool>,
    dl_tx_file: Option<String>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct BtsDto {
    pub bsic: u8,
    pub tsc: Option<u8>,
    pub c0: Option<bool>,

    pub max_ta: Option<u8>,
    pub max_ber10k_rach: Option<u32>,
    pub rach_busy_threshold: Option<i8>,
    pub radio_link_timeout: Option<i32>,

    pub ny1: Option<u32>,
    pub t3105_ms: Option<u32>,

    pub ms_power_target: Option<i8>,
    pub ms_power_ctrl: Option<bool>,
    pub ta_ctrl: Option<bool>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct TimeslotsDto {
    pub pchan: Vec<PhysChanConfig>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        config_version = "0.1"

        [phy_io]
        backend = "Loopback"
        rts_advance = 3

        [bts]
        bsic = 10
        ny1 = 6

        [timeslots]
        pchan = ["CcchSdcch4", "TchF", "TchH", "Sdcch8", "Pdch"]

        [sysinfo]
        si3 = "49 06 1b 00 01 00 f1 10 00 01 c8 04 45 81 05 00 00 00 00 2b 2b 2b 2b"
    "#;

    #[test]
    fn test_parse_config() {
        let cfg = from_toml_str(CONFIG).unwrap();
        let c = cfg.config();
        assert_eq!(c.phy_io.backend, PhyBackend::Loopback);
        assert_eq!(c.phy_io.rts_advance, 3);
        assert_eq!(c.phy_io.clock_advance, 20);
        assert_eq!(c.bts.ny1, 6);
        assert_eq!(c.bts.tsc(), 2);
        assert_eq!(c.timeslots[2], PhysChanConfig::TchH);
        assert_eq!(c.timeslots[7], PhysChanConfig::None);
        assert_eq!(c.sysinfo.get(SysinfoType::Si3).map(|b| b.len()), Some(23));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let bad = CONFIG.replace("ny1 = 6", "ny1 = 6\nfoo = 1");
        assert!(from_toml_str(&bad).is_err());
    }

    #[test]
    fn test_short_sysinfo_rejected() {
        let bad = CONFIG.replace("2b 2b 2b 2b\"", "2b 2b\"");
        assert!(from_toml_str(&bad).is_err());
    }
}
