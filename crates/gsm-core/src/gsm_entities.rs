// Entities of the BTS stack
#[derive(PartialEq, Eq, Hash, Clone, Debug, Copy)]
pub enum GsmEntity {
    /// Physical layer (radio front end or loopback)
    Phy,
    /// Layer 1 TDMA scheduler
    L1sched,
    /// Layer 1 service access point, the upper half of layer 1
    L1sap,
    /// Radio signalling link, boundary to the control plane
    Rsl,
}
