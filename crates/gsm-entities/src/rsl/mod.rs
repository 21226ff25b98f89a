pub mod rsl_bs;
