pub mod frame_clock;
pub mod phy_io_file;
pub mod rxtx_dev;
