use serde::Deserialize;

/// System information message types broadcast on BCCH or sent on SACCH
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SysinfoType {
    Si1,
    Si2,
    Si2bis,
    Si2ter,
    Si2quater,
    Si3,
    Si4,
    Si9,
    Si13,
    /// SACCH only
    Si5,
    /// SACCH only
    Si5bis,
    /// SACCH only
    Si5ter,
    /// SACCH only
    Si6,
}

impl SysinfoType {
    pub const ALL: [SysinfoType; 13] = [
        SysinfoType::Si1, SysinfoType::Si2, SysinfoType::Si2bis, SysinfoType::Si2ter,
        SysinfoType::Si2quater, SysinfoType::Si3, SysinfoType::Si4, SysinfoType::Si9,
        SysinfoType::Si13, SysinfoType::Si5, SysinfoType::Si5bis, SysinfoType::Si5ter,
        SysinfoType::Si6,
    ];

    /// True for the types sent on the SACCH of dedicated channels
    pub fn is_sacch(self) -> bool {
        matches!(self, SysinfoType::Si5 | SysinfoType::Si5bis | SysinfoType::Si5ter | SysinfoType::Si6)
    }

    /// Name as used in configuration files
    pub fn key(self) -> &'static str {
        match self {
            SysinfoType::Si1 => "si1",
            SysinfoType::Si2 => "si2",
            SysinfoType::Si2bis => "si2bis",
            SysinfoType::Si2ter => "si2ter",
            SysinfoType::Si2quater => "si2quater",
            SysinfoType::Si3 => "si3",
            SysinfoType::Si4 => "si4",
            SysinfoType::Si9 => "si9",
            SysinfoType::Si13 => "si13",
            SysinfoType::Si5 => "si5",
            SysinfoType::Si5bis => "si5bis",
            SysinfoType::Si5ter => "si5ter",
            SysinfoType::Si6 => "si6",
        }
    }

    pub fn from_key(key: &str) -> Option<SysinfoType> {
        SysinfoType::ALL.iter().copied().find(|t| t.key() == key)
    }
}
