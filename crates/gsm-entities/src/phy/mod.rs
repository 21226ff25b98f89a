pub mod components;
pub mod phy_bs;
