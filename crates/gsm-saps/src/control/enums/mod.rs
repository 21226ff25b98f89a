pub mod chan_mode;
