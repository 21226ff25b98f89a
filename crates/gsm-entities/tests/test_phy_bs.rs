mod common;

use gsm_config::PhyBackend;
use gsm_core::chan_nr::LID_SACCH;
use gsm_core::debug;
use gsm_saps::control::enums::chan_mode::ConnFailCause;
use gsm_saps::rsl::{LchanParams, RslMsg};
use common::{default_test_config, ComponentTest};

/// Runs the stack, collecting indications in chunks so none fall out of the RSL history
fn run_collect(test: &mut ComponentTest, frames: usize) -> Vec<RslMsg> {
    let mut out = Vec::new();
    for _ in 0..frames / 50 {
        test.run_stack(50);
        out.extend(test.take_rsl());
    }
    out
}

fn conn_failures(msgs: &[RslMsg], chan_nr: u8) -> Vec<ConnFailCause> {
    msgs.iter()
        .filter_map(|m| match m {
            RslMsg::ConnFailInd { chan_nr: c, cause } if *c == chan_nr => Some(*cause),
            _ => None,
        })
        .collect()
}

#[test]
fn test_full_stack_idle() {
    debug::setup_logging_default(None);

    let mut test = ComponentTest::full_stack(default_test_config());
    test.run_stack(60);

    let state = test.get_shared_config().state_read().clone();
    assert_eq!(state.frames, 60);
    // C0 keeps all eight timeslots busy
    assert_eq!(state.dl_bursts, 60 * 8);
    assert!(state.rach_total > 0);
    // Nothing on the air, nothing to report
    assert_eq!(state.rach_access, 0);
    assert!(test.take_rsl().is_empty());
}

#[test]
fn test_radio_link_timeout_without_uplink() {
    debug::setup_logging_default(None);

    let mut cfg = default_test_config();
    cfg.bts.radio_link_timeout = 2;
    let mut test = ComponentTest::full_stack(cfg);

    test.submit_rsl(RslMsg::ChanActiv { chan_nr: 0x09, params: LchanParams::default() });
    test.deliver_all_messages();
    assert_eq!(test.take_rsl(), vec![RslMsg::ChanActivAck { chan_nr: 0x09 }]);

    let msgs = run_collect(&mut test, 600);
    assert_eq!(conn_failures(&msgs, 0x09), vec![ConnFailCause::RadioLinkFail]);
    assert_eq!(test.l1sap().lchans[&0x09].radio_link.value(), 0);
}

#[test]
fn test_loopback_keeps_link_alive() {
    debug::setup_logging_default(None);

    let mut cfg = default_test_config();
    cfg.phy_io.backend = PhyBackend::Loopback;
    cfg.bts.radio_link_timeout = 2;
    let mut test = ComponentTest::full_stack(cfg);

    test.submit_rsl(RslMsg::ChanActiv { chan_nr: 0x09, params: LchanParams::default() });
    test.deliver_all_messages();
    assert_eq!(test.take_rsl(), vec![RslMsg::ChanActivAck { chan_nr: 0x09 }]);

    let msgs = run_collect(&mut test, 600);
    assert!(conn_failures(&msgs, 0x09).is_empty());

    // The downlink SACCH comes back as uplink, minus the L1 header
    let sacch: Vec<&Vec<u8>> = msgs
        .iter()
        .filter_map(|m| match m {
            RslMsg::DataInd { chan_nr: 0x09, link_id: LID_SACCH, data } => Some(data),
            _ => None,
        })
        .collect();
    assert!(!sacch.is_empty());
    assert!(sacch.iter().all(|d| d.len() == 21));

    // Measurement reports are produced at the end of each SACCH period
    assert!(msgs.iter().any(|m| matches!(m, RslMsg::MeasResult { chan_nr: 0x09, .. })));
}
