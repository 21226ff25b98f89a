use std::collections::BTreeMap;

use gsm_core::{ParseErr, SysinfoType, GSM_MACBLOCK_LEN};

/// System information buffers, each one complete 23 byte L2 frame
#[derive(Debug, Clone, Default)]
pub struct CfgSysinfo {
    buffers: BTreeMap<SysinfoType, Vec<u8>>,
}

impl CfgSysinfo {
    pub fn get(&self, si: SysinfoType) -> Option<&[u8]> {
        self.buffers.get(&si).map(|b| b.as_slice())
    }

    pub fn set(&mut self, si: SysinfoType, buf: Vec<u8>) {
        self.buffers.insert(si, buf);
    }

    pub fn iter(&self) -> impl Iterator<Item = (SysinfoType, &[u8])> {
        self.buffers.iter().map(|(t, b)| (*t, b.as_slice()))
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.buffers.values().any(|b| b.len() != GSM_MACBLOCK_LEN) {
            return Err("sysinfo buffers must be exactly 23 bytes");
        }
        Ok(())
    }
}

/// Decodes a hex string such as "55 06 19 8f" into bytes. Whitespace is ignored.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, ParseErr> {
    let digits: Vec<u8> = s.bytes().filter(|c| !c.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(ParseErr::Inconsistency { field: "hex", reason: "odd number of digits" });
    }
    digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_val(pair[0])?;
            let lo = hex_val(pair[1])?;
            Ok(hi << 4 | lo)
        })
        .collect()
}

fn hex_val(c: u8) -> Result<u8, ParseErr> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ParseErr::InvalidValue { field: "hex", value: c as u64 }),
    }
}
