use clap::Parser;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gsm_config::{PhyBackend, SharedConfig, toml_config};
use gsm_core::{GsmTime, debug};
use gsm_entities::MessageRouter;
use gsm_entities::{
    l1sap::l1sap_bs::L1sapBs,
    l1sched::l1sched_bs::L1schedBs,
    phy::{
        components::rxtx_dev::{LoopbackDev, NoneDev},
        phy_bs::PhyBs,
    },
    rsl::rsl_bs::RslBs,
};

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> SharedConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

/// Builds the layer 1 stack of one transceiver
fn build_bts_stack(cfg: &SharedConfig) -> MessageRouter {
    let mut router = MessageRouter::new(cfg.clone());

    // Add suitable Phy component based on PhyIo type
    match cfg.config().phy_io.backend {
        PhyBackend::None => {
            router.register_entity(Box::new(PhyBs::new(cfg.clone(), NoneDev)));
        }
        PhyBackend::Loopback => {
            router.register_entity(Box::new(PhyBs::new(cfg.clone(), LoopbackDev::new())));
        }
        PhyBackend::Undefined => {
            eprintln!("No PHY backend configured, set phy_io.backend");
            std::process::exit(1);
        }
    }

    router.register_entity(Box::new(L1schedBs::new(cfg.clone())));
    router.register_entity(Box::new(L1sapBs::new(cfg.clone())));
    router.register_entity(Box::new(RslBs::new(cfg.clone())));

    router.set_dl_time(GsmTime::default());
    router
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "GSM BTS layer 1 stack",
    long_about = "Runs the GSM BTS layer 1 scheduler and its PHY using the provided TOML configuration file"
)]
struct Args {
    /// TOML config with cell and timeslot parameters
    #[arg(short, long)]
    config: String,
}

fn main() {
    let args = Args::parse();
    let cfg = load_config_from_toml(&args.config);
    let _log_guard = debug::setup_logging_default(cfg.config().debug_log.clone());

    {
        let c = cfg.config();
        tracing::info!("gsm-bts {}: bsic {} backend {:?}", env!("CARGO_PKG_VERSION"), c.bts.bsic, c.phy_io.backend);
        for (tn, pchan) in c.timeslots.iter().enumerate() {
            tracing::info!("  tn {}: {:?}", tn, pchan);
        }
    }

    let mut router = build_bts_stack(&cfg);

    // Set up Ctrl+C handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        tracing::warn!("cannot install Ctrl+C handler: {}", e);
    }

    router.run_stack(None, Some(running));

    let state = cfg.state_read().clone();
    tracing::info!(
        "stopped after {} frames, {} downlink bursts, RACH total {} busy {} access {}",
        state.frames, state.dl_bursts, state.rach_total, state.rach_busy, state.rach_access
    );
}
