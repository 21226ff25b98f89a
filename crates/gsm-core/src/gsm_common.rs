// SAPs between the stack entities
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sap {
    /// Phy/L1sched, bursts and clock
    TrxdSap,

    /// L1sched/L1sap, data and ready-to-send primitives
    PhSap,
    /// L1sched/L1sap, measurement and management info
    MphSap,

    /// L1sap/Rsl
    RslSap,

    /// Custom SAP for inter-entity control messages
    Control
}
