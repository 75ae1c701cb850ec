//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use walkdir::WalkDir;

use super::{PulseResponseRequest, QcDocument};
use crate::qc::{
    pulse_response_qc_pass_with, recording_qc_failures, PulseResponseVerdict, QcTally,
    QcThresholds, RecordingQcFailure,
};
use crate::recording::Recording;

/// Load thresholds from an optional override file.
pub fn load_thresholds(path: Option<&Path>) -> Result<QcThresholds> {
    match path {
        Some(path) => {
            info!("Loading thresholds: {}", path.display());
            QcThresholds::from_json_file(path)
                .with_context(|| format!("invalid thresholds file {}", path.display()))
        }
        None => Ok(QcThresholds::default()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("cannot parse {}", path.display()))
}

/// Run recording QC on one recording file.
pub fn check_recording(path: &Path, thresholds: &QcThresholds) -> Result<Vec<RecordingQcFailure>> {
    info!("Checking recording: {}", path.display());

    let rec: Recording = read_json(path)?;
    let failures = recording_qc_failures(&rec, thresholds);

    if failures.is_empty() {
        println!("PASS {}", path.display());
    } else {
        println!("FAIL {}", path.display());
        for failure in &failures {
            println!("  - {}", failure);
        }
    }

    Ok(failures)
}

/// Run pulse-response QC on one request file.
pub fn check_pulse_response(path: &Path, thresholds: &QcThresholds) -> Result<PulseResponseVerdict> {
    info!("Checking pulse response: {}", path.display());

    let request: PulseResponseRequest = read_json(path)?;
    let verdict = evaluate_request(&request, thresholds)
        .with_context(|| format!("cannot evaluate {}", path.display()))?;

    println!(
        "{} excitatory={} inhibitory={}",
        path.display(),
        verdict.excitatory,
        verdict.inhibitory
    );

    Ok(verdict)
}

fn evaluate_request(
    request: &PulseResponseRequest,
    thresholds: &QcThresholds,
) -> crate::Result<PulseResponseVerdict> {
    pulse_response_qc_pass_with(
        &request.recording,
        request.window()?,
        request.spike_count(),
        &request.adjacent_pulses,
        thresholds,
    )
}

/// Evaluate every `*.json` document under `dir` and print the tally.
///
/// Documents that cannot be parsed or evaluated are logged and counted as
/// errors; they never abort the scan.
pub fn scan(dir: &Path, thresholds: &QcThresholds) -> Result<QcTally> {
    info!("Scanning: {}", dir.display());

    let mut tally = QcTally::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("cannot walk {}", dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }

        let document: QcDocument = match read_json(path) {
            Ok(document) => document,
            Err(err) => {
                warn!("Skipping {}: {:#}", path.display(), err);
                tally.errors.push("UNREADABLE_DOCUMENT".to_string());
                continue;
            }
        };

        match document {
            QcDocument::Recording(rec) => {
                let passed = recording_qc_failures(&rec, thresholds).is_empty();
                tally.record_recording(passed);
            }
            QcDocument::PulseResponse(request) => match evaluate_request(&request, thresholds) {
                Ok(verdict) => tally.record_pulse_response(verdict),
                Err(err) => {
                    warn!("Cannot evaluate {}: {}", path.display(), err);
                    tally.record_error(&err);
                }
            },
        }
    }

    println!("{}", serde_json::to_string_pretty(&tally)?);

    Ok(tally)
}
