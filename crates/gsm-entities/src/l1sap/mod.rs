pub mod components;
pub mod l1sap_bs;
