pub mod component_test;
pub mod sink;

#[allow(unused_imports)]
pub use component_test::{default_test_config, ComponentTest};
#[allow(unused_imports)]
pub use sink::Sink;
#[allow(unused_imports)]
pub use component_test::{decode_dl_block, dl_bursts_of};
