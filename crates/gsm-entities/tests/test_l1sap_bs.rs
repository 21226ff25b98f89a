mod common;

use gsm_core::chan_nr::{LID_DEDIC, LID_SACCH};
use gsm_core::{debug, GsmEntity, PhysChanConfig, SysinfoType, GSM_MACBLOCK_LEN, GSM_MACBLOCK_PADDING};
use gsm_entities::l1sched::bursts::{dummy_burst, fcch_burst};
use gsm_entities::l1sched::chan_desc::TrxChan;
use gsm_entities::l1sched::mframe::resolve;
use gsm_saps::rsl::{LchanParams, RslMsg};
use common::{decode_dl_block, default_test_config, dl_bursts_of, ComponentTest};

fn block(tag: u8) -> Vec<u8> {
    let mut b = vec![GSM_MACBLOCK_PADDING; GSM_MACBLOCK_LEN];
    b[0] = tag;
    b
}

/// Scheduler, L1SAP and RSL boundary, with a sink collecting the downlink bursts
fn stack_with_phy_sink(test: &mut ComponentTest) {
    test.populate_entities(
        vec![GsmEntity::L1sched, GsmEntity::L1sap, GsmEntity::Rsl],
        vec![GsmEntity::Phy],
    );
}

#[test]
fn test_bcch_and_agch_blocks() {
    debug::setup_logging_verbose();

    let mut test = ComponentTest::new(default_test_config(), None);
    stack_with_phy_sink(&mut test);

    for (tag, si) in [(1, SysinfoType::Si1), (2, SysinfoType::Si2), (3, SysinfoType::Si3), (4, SysinfoType::Si4)] {
        test.submit_rsl(RslMsg::SetSysinfo { si, data: Some(block(tag)) });
    }
    let agch = {
        let mut b = block(0x2d);
        b[1] = 0x06;
        b[2] = 0x3f;
        b
    };
    test.submit_rsl(RslMsg::AgchEnqueue { data: agch.clone() });
    test.deliver_all_messages();

    for _ in 0..50 {
        test.clock_tick();
    }
    let msgs = test.dump_sinks();
    let ts0 = dl_bursts_of(&msgs, 0);
    // Clock starts at 0, the scheduler runs 20 frames ahead
    assert_eq!(ts0.keys().next(), Some(&20));
    assert_eq!(ts0.len(), 50);

    // FCCH and SCH open the second 51-multiframe
    assert!(ts0[&51].iter().all(|b| *b == 0));
    assert_ne!(ts0[&52], dummy_burst());
    assert!(ts0[&52].iter().any(|b| *b != 0));

    // TC 1 carries SI2
    assert_eq!(decode_dl_block(&ts0, 53), Some(block(2)));

    // First CCCH block after the start carries the queued AGCH message, the next one fill
    assert_eq!(decode_dl_block(&ts0, 57), Some(agch));
    let fill = decode_dl_block(&ts0, 63).unwrap();
    assert_eq!(&fill[..4], &[0x03, 0x03, 0x01, 0x2b]);

    // Every timeslot transmits on C0, unused ones with dummy bursts
    let ts5 = dl_bursts_of(&msgs, 5);
    assert_eq!(ts5.len(), 50);
    assert!(ts5.values().all(|b| *b == dummy_burst()));
}

/// Downlink channel of every frame of the combined TS0 51-multiframe
fn combined_ts0_sequence() -> Vec<TrxChan> {
    let mut seq = vec![TrxChan::Ccch; 51];
    for fcch in [0, 10, 20, 30, 40] {
        seq[fcch] = TrxChan::Fcch;
        seq[fcch + 1] = TrxChan::Sch;
    }
    let blocks = [
        (2, TrxChan::Bcch),
        (22, TrxChan::Sdcch4(0)),
        (26, TrxChan::Sdcch4(1)),
        (32, TrxChan::Sdcch4(2)),
        (36, TrxChan::Sdcch4(3)),
        (42, TrxChan::Sacch4(0)),
        (46, TrxChan::Sacch4(1)),
    ];
    for (start, chan) in blocks {
        seq[start..start + 4].fill(chan);
    }
    seq[50] = TrxChan::Idle;
    seq
}

#[test]
fn test_combined_ts0_frame_sequence() {
    debug::setup_logging_default(None);

    let expected = combined_ts0_sequence();
    let resolved: Vec<TrxChan> = (0..51).map(|fn_num| resolve(PhysChanConfig::CcchSdcch4, 0, fn_num).unwrap().0 .0).collect();
    assert_eq!(resolved, expected);

    let mut test = ComponentTest::new(default_test_config(), None);
    stack_with_phy_sink(&mut test);
    for (tag, si) in [(1, SysinfoType::Si1), (2, SysinfoType::Si2), (3, SysinfoType::Si3), (4, SysinfoType::Si4)] {
        test.submit_rsl(RslMsg::SetSysinfo { si, data: Some(block(tag)) });
    }
    test.deliver_all_messages();
    for _ in 0..102 {
        test.clock_tick();
    }
    let ts0 = dl_bursts_of(&test.dump_sinks(), 0);

    // One complete multiframe, every block of it scheduled after the start
    for fn_num in 51..102u32 {
        let (dl, _) = resolve(PhysChanConfig::CcchSdcch4, 0, fn_num).unwrap();
        let burst = &ts0[&fn_num];
        match dl {
            (TrxChan::Fcch, _) => assert_eq!(*burst, fcch_burst(), "fn {}", fn_num),
            (TrxChan::Sch, _) => {
                assert_ne!(*burst, dummy_burst(), "fn {}", fn_num);
                assert_ne!(*burst, fcch_burst(), "fn {}", fn_num);
            }
            (TrxChan::Bcch, 0) => assert_eq!(decode_dl_block(&ts0, fn_num), Some(block(2))),
            (TrxChan::Ccch, 0) => {
                let data = decode_dl_block(&ts0, fn_num);
                assert_eq!(data.map(|d| d.len()), Some(GSM_MACBLOCK_LEN), "fn {}", fn_num);
            }
            (TrxChan::Bcch, _) | (TrxChan::Ccch, _) => assert_ne!(*burst, dummy_burst(), "fn {}", fn_num),
            // Nothing active on the dedicated channels
            (chan, _) => {
                assert!(matches!(chan, TrxChan::Sdcch4(_) | TrxChan::Sacch4(_) | TrxChan::Idle), "fn {}: {:?}", fn_num, chan);
                assert_eq!(*burst, dummy_burst(), "fn {}", fn_num);
            }
        }
    }
}

#[test]
fn test_sdcch_activation_data_and_release() {
    debug::setup_logging_default(None);

    let mut test = ComponentTest::new(default_test_config(), None);
    stack_with_phy_sink(&mut test);

    test.submit_rsl(RslMsg::ChanActiv { chan_nr: 0x20, params: LchanParams::default() });
    test.deliver_all_messages();
    assert_eq!(test.take_rsl(), vec![RslMsg::ChanActivAck { chan_nr: 0x20 }]);
    assert!(test.l1sap().lchans.contains_key(&0x20));

    test.submit_rsl(RslMsg::DataReq { chan_nr: 0x20, link_id: LID_DEDIC, data: vec![0x01, 0x03, 0x01] });
    test.submit_rsl(RslMsg::DataReq { chan_nr: 0x20, link_id: LID_SACCH, data: vec![0x03, 0x03, 0x05] });
    test.deliver_all_messages();

    for _ in 0..60 {
        test.clock_tick();
    }
    let msgs = test.dump_sinks();
    let ts0 = dl_bursts_of(&msgs, 0);

    // SDCCH/4(0) occupies frames 22..25 of each 51-multiframe, padded to a MAC block
    let mut expected = block(0x01);
    expected[1] = 0x03;
    expected[2] = 0x01;
    assert_eq!(decode_dl_block(&ts0, 73), Some(expected));

    // SACCH/4(0) at frames 42..45: L1 header, then the queued L2 frame
    let sacch = decode_dl_block(&ts0, 42).unwrap();
    assert_eq!(&sacch[..6], &[0, 0, 0x03, 0x03, 0x05, 0x2b]);

    test.submit_rsl(RslMsg::RfChanRel { chan_nr: 0x20 });
    test.deliver_all_messages();
    let out = test.take_rsl();
    assert!(out.contains(&RslMsg::RfChanRelAck { chan_nr: 0x20 }));
    assert!(test.l1sap().lchans.is_empty());
}

#[test]
fn test_cbch_broadcast() {
    debug::setup_logging_default(None);

    let mut cfg = default_test_config();
    cfg.timeslots[0] = PhysChanConfig::CcchSdcch4Cbch;
    let mut test = ComponentTest::new(cfg, None);
    stack_with_phy_sink(&mut test);

    test.submit_rsl(RslMsg::SmsBcCmd { last_block: 1, data: vec![0x11; 22] });
    test.deliver_all_messages();
    assert!(test.take_rsl().is_empty());

    for _ in 0..20 {
        test.clock_tick();
    }
    let ts0 = dl_bursts_of(&test.dump_sinks(), 0);

    // Single segment: sequence 0, last block flag set
    let cbch = decode_dl_block(&ts0, 32).unwrap();
    assert_eq!(cbch[0], 0x30);
    assert!(cbch[1..].iter().all(|b| *b == 0x11));
}

#[test]
fn test_smscb_rejected_without_cbch() {
    debug::setup_logging_default(None);

    let mut test = ComponentTest::new(default_test_config(), None);
    stack_with_phy_sink(&mut test);

    test.submit_rsl(RslMsg::SmsBcCmd { last_block: 1, data: vec![0x11; 22] });
    test.deliver_all_messages();
    let out = test.take_rsl();
    assert!(matches!(&out[..], [RslMsg::SmsBcReject { .. }]));
}

#[test]
fn test_activation_of_unconfigured_channel_nacked() {
    debug::setup_logging_default(None);

    let mut test = ComponentTest::new(default_test_config(), None);
    stack_with_phy_sink(&mut test);

    // TS4 carries no configuration
    test.submit_rsl(RslMsg::ChanActiv { chan_nr: 0x0c, params: LchanParams::default() });
    test.deliver_all_messages();
    let out = test.take_rsl();
    assert!(matches!(&out[..], [RslMsg::ChanActivNack { chan_nr: 0x0c, .. }]));
    assert!(test.l1sap().lchans.is_empty());
}
