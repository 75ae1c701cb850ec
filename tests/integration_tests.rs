//! Integration Tests
//!
//! End-to-end checks of the recording and pulse-response QC gates.

use patchqc::qc::{pulse_response_qc_pass_with, QcThresholds};
use patchqc::{
    pulse_response_qc_pass, recording_qc_pass, ClampMode, PulseResponseVerdict, QcError,
    Recording, SpikeCount, Window,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

/// Current-clamp recording sitting flat at `level` volts
fn ic_recording(level: f64) -> Recording {
    Recording::new(ClampMode::CurrentClamp, -30e-12, level, 0.8e-3, vec![level; 1000])
}

/// Voltage-clamp recording with a flat current and command trace
fn vc_recording(holding: f64, command: f64) -> Recording {
    Recording::new(ClampMode::VoltageClamp, -30e-12, holding, 10e-12, vec![-30e-12; 1000])
        .with_command(vec![command; 1000])
}

fn window() -> Window {
    Window::new(200, 400).unwrap()
}

fn one_spike() -> SpikeCount {
    SpikeCount::Detected(1)
}

// === Recording QC ===

#[test]
fn test_recording_qc_passes_clean_data() {
    assert!(recording_qc_pass(&ic_recording(-65e-3)));
    assert!(recording_qc_pass(&vc_recording(-70e-3, -70e-3)));
}

#[test]
fn test_truncated_sweep_fails() {
    let mut rec = ic_recording(-65e-3);
    // Sweep stopped early; the tail was zero-filled
    rec.primary.data[700..].fill(0.0);
    assert!(!recording_qc_pass(&rec));
}

// === Pulse Response QC ===

#[test]
fn test_failed_recording_short_circuits() {
    let mut rec = ic_recording(-55e-3);
    rec.baseline_current = 800e-12;
    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap();
    assert_eq!(v, PulseResponseVerdict::FAIL);

    // Even an unsupported clamp mode is not reported once recording QC fails
    let mut rec = rec;
    rec.clamp_mode = ClampMode::Other("xyz".to_string());
    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap();
    assert_eq!(v, PulseResponseVerdict::FAIL);
}

#[test]
fn test_spike_count_gate() {
    let rec = ic_recording(-55e-3);
    let v = pulse_response_qc_pass(&rec, window(), SpikeCount::Detected(0), &[]).unwrap();
    assert_eq!(v.as_tuple(), (false, false));

    let v = pulse_response_qc_pass(&rec, window(), SpikeCount::NotApplicable, &[]).unwrap();
    assert_eq!(v.as_tuple(), (true, true));

    let v = pulse_response_qc_pass(&rec, window(), SpikeCount::Detected(3), &[]).unwrap();
    assert_eq!(v.as_tuple(), (true, true));
}

#[test_case(&[5e-3], false ; "pulse 5 ms after")]
#[test_case(&[-7.9e-3], false ; "pulse 7.9 ms before")]
#[test_case(&[8e-3, -9e-3], true ; "pulses at 8 ms and -9 ms")]
#[test_case(&[20e-3, 50e-3, -0.1], true ; "train at 50 Hz")]
#[test_case(&[], true ; "isolated pulse")]
fn test_adjacent_pulse_quiescence(adjacent: &[f64], expected: bool) {
    let rec = ic_recording(-55e-3);
    let v = pulse_response_qc_pass(&rec, window(), one_spike(), adjacent).unwrap();
    assert_eq!(v.any(), expected);
}

#[test_case(-70e-3, (true, false) ; "excitatory only")]
#[test_case(-55e-3, (true, true) ; "overlap passes both")]
#[test_case(-60e-3, (true, false) ; "inhibitory lower bound is exclusive")]
#[test_case(-84.9e-3, (true, false) ; "deep holding")]
fn test_ic_polarity_ranges(level: f64, expected: (bool, bool)) {
    let rec = ic_recording(level);
    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap();
    assert_eq!(v.as_tuple(), expected);
}

#[test]
fn test_baseline_potential_and_window_median_both_required() {
    // Window sits at -55 mV but the recording-wide baseline is -70 mV
    let mut rec = ic_recording(-55e-3);
    rec.baseline_potential = -70e-3;
    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap();
    assert_eq!(v.as_tuple(), (true, false));
}

#[test]
fn test_vc_base_tracks_command_median() {
    // Primary current is identical; only the command level differs
    let rec = vc_recording(-55e-3, -70e-3);
    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap();
    assert_eq!(v.as_tuple(), (true, false));

    let rec = vc_recording(-55e-3, -55e-3);
    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap();
    assert_eq!(v.as_tuple(), (true, true));
}

#[test]
fn test_vc_command_median_only_within_window() {
    let mut rec = vc_recording(-55e-3, -70e-3);
    if let Some(command) = rec.command.as_mut() {
        command.data[200..400].fill(-50e-3);
    }
    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap();
    assert_eq!(v.as_tuple(), (true, true));
}

#[test]
fn test_vc_noisy_window_fails() {
    let mut rec = vc_recording(-70e-3, -70e-3);
    for (i, sample) in rec.primary.data[200..400].iter_mut().enumerate() {
        *sample += if i % 2 == 0 { 20e-12 } else { -20e-12 };
    }
    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap();
    assert_eq!(v, PulseResponseVerdict::FAIL);
}

#[test]
fn test_dropped_samples_in_window_fail() {
    let mut rec = ic_recording(-55e-3);
    for sample in rec.primary.data[200..400].iter_mut().step_by(3) {
        *sample = f64::NAN;
    }
    assert!(recording_qc_pass(&rec));

    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap();
    assert_eq!(v, PulseResponseVerdict::FAIL);
}

#[test]
fn test_unsupported_clamp_mode_errors() {
    let mut rec = ic_recording(-55e-3);
    rec.clamp_mode = ClampMode::Other("xyz".to_string());
    assert!(recording_qc_pass(&rec));

    let err = pulse_response_qc_pass(&rec, window(), one_spike(), &[]).unwrap_err();
    match err {
        QcError::UnsupportedClampMode { mode } => assert_eq!(mode, "xyz"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_custom_quiescence_window() {
    let rec = ic_recording(-55e-3);
    let thresholds = QcThresholds {
        min_adjacent_pulse_interval: 15e-3,
        ..QcThresholds::default()
    };
    let v = pulse_response_qc_pass_with(&rec, window(), one_spike(), &[10e-3], &thresholds)
        .unwrap();
    assert_eq!(v, PulseResponseVerdict::FAIL);

    let v = pulse_response_qc_pass(&rec, window(), one_spike(), &[10e-3]).unwrap();
    assert_eq!(v.as_tuple(), (true, true));
}
