use tc358743::edid::{self, EDID_BASE_REGISTER, EDID_SIZE};
use tc358743::interpreter;
use tc358743::testing::{RecordingBus, RecordingDelay, Transaction};
use tc358743::{
    Access, BringUpState, Builder, Bus, ColorConversion, CommandTables, EdidProfile, RegisterOp,
    ResolutionClass, Tc358743,
};

const VI_STATUS: u16 = 0x8521;
const HPD_CTL: u16 = 0x8544;

fn push_writes(trace: &mut Vec<Transaction>, ops: &[RegisterOp]) {
    for op in ops {
        if let Some(width) = op.access.width() {
            trace.push(Transaction::write(
                op.address,
                &op.value.to_le_bytes()[..width],
            ));
        }
    }
}

/// Transactions a clean bring-up must produce, derived from the tables
fn expected_trace(tables: &CommandTables, class: ResolutionClass) -> Vec<Transaction> {
    let mut trace = vec![Transaction::read(VI_STATUS, 1)];
    push_writes(&mut trace, tables.core(class));
    for (index, block) in tables.edid_image().chunks(16).enumerate() {
        trace.push(Transaction::write(
            EDID_BASE_REGISTER + (index as u16) * 16,
            block,
        ));
    }
    push_writes(&mut trace, tables.tuning());
    push_writes(&mut trace, tables.buffer_enable());
    trace
}

#[test]
fn start_streaming_issues_tables_in_order() {
    for (status, class) in [
        (0x0B, ResolutionClass::SubHd),
        (0x0C, ResolutionClass::HdOrAbove),
    ] {
        let tables = CommandTables::new(&Builder::new().build());
        let mut recorder = RecordingBus::new();
        recorder.set_register(VI_STATUS, &[status]);
        let mut bridge = Tc358743::new(recorder, RecordingDelay::new());

        let report = bridge.start_streaming(&tables);

        assert_eq!(report.class, class);
        assert_eq!(report.warnings(), 0);
        assert_eq!(bridge.state(), BringUpState::TunedAndEnabled);
        let (recorder, _) = bridge.release();
        assert_eq!(recorder.transactions(), expected_trace(&tables, class).as_slice());
    }
}

#[test]
fn every_configuration_yields_a_valid_edid_upload() {
    let conversions = [
        ColorConversion::RgbPassthrough,
        ColorConversion::RgbToYuv422,
        ColorConversion::RgbToYuv444,
        ColorConversion::Yuv444ToYuv422,
        ColorConversion::Yuv422ToYuv444,
    ];
    for conversion in conversions {
        for profile in [EdidProfile::TwoLane, EdidProfile::FourLane] {
            let config = Builder::new()
                .color_conversion(conversion)
                .edid_profile(profile)
                .build();
            let tables = CommandTables::new(&config);
            let mut bridge = Tc358743::new(RecordingBus::new(), RecordingDelay::new());

            bridge.start_streaming(&tables);

            let (recorder, _) = bridge.release();
            let ram = recorder.register(EDID_BASE_REGISTER, EDID_SIZE);
            assert_eq!(ram, edid::default_image(profile));
            assert!(edid::half_sums_to_zero(&ram));
        }
    }
}

#[test]
fn bus_failure_in_twenty_entry_list_is_absorbed() {
    let ops: Vec<RegisterOp> = (0..20u16)
        .map(|i| RegisterOp::write16(0x0100 + 2 * i, i))
        .collect();
    let mut recorder = RecordingBus::new();
    recorder.fail_nth(9);
    let mut bus = Bus::new(recorder);
    let mut delay = RecordingDelay::new();

    let summary = interpreter::run(&mut bus, &mut delay, &ops);

    assert_eq!(summary.bus_failures, 1);
    assert_eq!(summary.executed, 20);
    let recorder = bus.release();
    assert_eq!(recorder.transactions().len(), 20);
    // the failed entry left its register untouched
    assert_eq!(recorder.register(0x0100 + 18, 2), [0, 0]);
    assert_eq!(recorder.register(0x0100 + 20, 2), [10, 0]);
}

#[test]
fn failures_throughout_bring_up_are_counted_not_fatal() {
    let tables = CommandTables::new(&Builder::new().build());
    let mut recorder = RecordingBus::new();
    recorder.set_register(VI_STATUS, &[0x0C]);
    for index in [3, 40, 60, 90] {
        recorder.fail_nth(index);
    }
    let mut bridge = Tc358743::new(recorder, RecordingDelay::new());

    let report = bridge.start_streaming(&tables);

    assert_eq!(report.bus_failures, 4);
    assert_eq!(bridge.state(), BringUpState::TunedAndEnabled);
    let (recorder, _) = bridge.release();
    assert_eq!(
        recorder.transactions().len(),
        expected_trace(&tables, ResolutionClass::HdOrAbove).len()
    );
}

#[test]
fn unsupported_entries_are_reported_and_skipped() {
    let ops = [
        RegisterOp::from_raw(0x0004, 0x0000, 2),
        RegisterOp::from_raw(0x0014, 0x8000, 0x12),
        RegisterOp::from_raw(0x0000, 10, 0xFFFF),
        RegisterOp::from_raw(0x0002, 0x0001, 8),
    ];
    let mut bus = Bus::new(RecordingBus::new());
    let mut delay = RecordingDelay::new();

    let summary = interpreter::run(&mut bus, &mut delay, &ops);

    assert_eq!(ops[3].access, Access::Unsupported(8));
    assert_eq!(summary.executed, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(delay.sleeps_ms(), &[10]);
    let registers: Vec<u16> = bus
        .release()
        .transactions()
        .iter()
        .map(Transaction::register)
        .collect();
    assert_eq!(registers, [0x0004, 0x0014, 0x0014]);
}

#[test]
fn stop_streaming_always_pulses_hpd_low() {
    for failing in [None, Some(0), Some(1)] {
        let tables = CommandTables::new(&Builder::new().build());
        let mut recorder = RecordingBus::new();
        if let Some(index) = failing {
            recorder.fail_nth(index);
        }
        let mut bridge = Tc358743::new(recorder, RecordingDelay::new());

        let summary = bridge.stop_streaming(&tables);

        assert_eq!(summary.bus_failures, usize::from(failing.is_some()));
        let (recorder, delay) = bridge.release();
        assert_eq!(
            recorder.transactions(),
            &[
                Transaction::write(HPD_CTL, &[0x01]),
                Transaction::write(HPD_CTL, &[0x00]),
            ]
        );
        assert!(delay.sleeps_ms().is_empty());
    }
}
