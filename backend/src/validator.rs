//! Per-field range validation for partial effect updates.
//!
//! Out-of-range fields are dropped from the update rather than
//! rejected; only the dedicated volume endpoint turns a bad value into
//! a request error. Everything here is pure so handlers can sanitize
//! before they touch the gateway or the shared state.

use std::ops::RangeInclusive;

use thiserror::Error;
use tonebridge_types::{DelayUpdate, GateUpdate, OverdriveUpdate};

use crate::config::LimitsProfile;

pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const THRESHOLD_RANGE: RangeInclusive<f32> = 0.1..=0.95;
pub const TONE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const MIX_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const MODE_MAX: u8 = 2;
pub const FEEDBACK_RANGE: RangeInclusive<f32> = 0.0..=0.95;
pub const GATE_THRESHOLD_RANGE: RangeInclusive<f32> = 0.001..=0.5;
pub const GATE_ATTACK_RANGE: RangeInclusive<f32> = 0.0001..=0.1;
pub const GATE_RELEASE_RANGE: RangeInclusive<f32> = 0.01..=1.0;

/// Deployment-dependent ranges. The standard profile matches the
/// shipped device firmware; the wide profile matches builds with the
/// larger delay line and extra gain headroom.
#[derive(Debug, Clone)]
pub struct Limits {
    pub gain: RangeInclusive<f32>,
    pub time_ms: RangeInclusive<u32>,
}

impl Limits {
    pub fn standard() -> Self {
        Self {
            gain: 1.0..=30.0,
            time_ms: 20..=100,
        }
    }

    pub fn wide() -> Self {
        Self {
            gain: 1.0..=100.0,
            time_ms: 20..=500,
        }
    }
}

impl From<LimitsProfile> for Limits {
    fn from(profile: LimitsProfile) -> Self {
        match profile {
            LimitsProfile::Standard => Limits::standard(),
            LimitsProfile::Wide => Limits::wide(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits::standard()
    }
}

/// Volume validation failure on the dedicated volume endpoint.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VolumeError {
    #[error("volume is required")]
    Missing,
    #[error("volume must be between 0 and 1")]
    OutOfRange,
}

/// Validate the required volume field of the dedicated endpoint.
pub fn validate_volume(volume: Option<f32>) -> Result<f32, VolumeError> {
    let volume = volume.ok_or(VolumeError::Missing)?;
    if VOLUME_RANGE.contains(&volume) {
        Ok(volume)
    } else {
        Err(VolumeError::OutOfRange)
    }
}

/// Volume inside a bulk update: silently dropped when out of range.
pub fn sanitize_volume(volume: Option<f32>) -> Option<f32> {
    keep(volume, &VOLUME_RANGE)
}

/// Drop out-of-range overdrive fields; `enabled` passes through.
pub fn sanitize_overdrive(update: &OverdriveUpdate, limits: &Limits) -> OverdriveUpdate {
    OverdriveUpdate {
        enabled: update.enabled,
        gain: keep(update.gain, &limits.gain),
        threshold: keep(update.threshold, &THRESHOLD_RANGE),
        tone: keep(update.tone, &TONE_RANGE),
        mix: keep(update.mix, &MIX_RANGE),
        mode: update.mode.filter(|m| *m <= MODE_MAX),
    }
}

/// Drop out-of-range delay fields; `enabled` passes through.
pub fn sanitize_delay(update: &DelayUpdate, limits: &Limits) -> DelayUpdate {
    DelayUpdate {
        enabled: update.enabled,
        time_ms: keep(update.time_ms, &limits.time_ms),
        feedback: keep(update.feedback, &FEEDBACK_RANGE),
        mix: keep(update.mix, &MIX_RANGE),
        tone: keep(update.tone, &TONE_RANGE),
    }
}

/// Drop out-of-range gate fields; `enabled` passes through.
pub fn sanitize_gate(update: &GateUpdate) -> GateUpdate {
    GateUpdate {
        enabled: update.enabled,
        threshold: keep(update.threshold, &GATE_THRESHOLD_RANGE),
        attack: keep(update.attack, &GATE_ATTACK_RANGE),
        release: keep(update.release, &GATE_RELEASE_RANGE),
    }
}

fn keep<T: PartialOrd>(value: Option<T>, range: &RangeInclusive<T>) -> Option<T> {
    value.filter(|v| range.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_volume_accepts_bounds() {
        assert_eq!(validate_volume(Some(0.0)), Ok(0.0));
        assert_eq!(validate_volume(Some(1.0)), Ok(1.0));
        assert_eq!(validate_volume(Some(0.7)), Ok(0.7));
    }

    #[test]
    fn validate_volume_rejects_missing_and_out_of_range() {
        assert_eq!(validate_volume(None), Err(VolumeError::Missing));
        assert_eq!(validate_volume(Some(-0.1)), Err(VolumeError::OutOfRange));
        assert_eq!(validate_volume(Some(1.5)), Err(VolumeError::OutOfRange));
    }

    #[test]
    fn sanitize_overdrive_drops_out_of_range_fields() {
        let update = OverdriveUpdate {
            enabled: Some(true),
            gain: Some(999.0),
            threshold: Some(0.5),
            tone: Some(-0.2),
            mix: Some(0.9),
            mode: Some(7),
        };
        let sanitized = sanitize_overdrive(&update, &Limits::standard());
        assert_eq!(sanitized.enabled, Some(true));
        assert_eq!(sanitized.gain, None);
        assert_eq!(sanitized.threshold, Some(0.5));
        assert_eq!(sanitized.tone, None);
        assert_eq!(sanitized.mix, Some(0.9));
        assert_eq!(sanitized.mode, None);
    }

    #[test]
    fn sanitize_overdrive_gain_depends_on_profile() {
        let update = OverdriveUpdate {
            gain: Some(60.0),
            ..Default::default()
        };
        assert_eq!(sanitize_overdrive(&update, &Limits::standard()).gain, None);
        assert_eq!(
            sanitize_overdrive(&update, &Limits::wide()).gain,
            Some(60.0)
        );
    }

    #[test]
    fn sanitize_delay_time_depends_on_profile() {
        let update = DelayUpdate {
            time_ms: Some(350),
            ..Default::default()
        };
        assert_eq!(sanitize_delay(&update, &Limits::standard()).time_ms, None);
        assert_eq!(sanitize_delay(&update, &Limits::wide()).time_ms, Some(350));
    }

    #[test]
    fn sanitize_delay_keeps_fields_at_bounds() {
        let update = DelayUpdate {
            enabled: Some(false),
            time_ms: Some(20),
            feedback: Some(0.95),
            mix: Some(1.0),
            tone: Some(0.0),
        };
        let sanitized = sanitize_delay(&update, &Limits::standard());
        assert_eq!(sanitized, update);
    }

    #[test]
    fn sanitize_delay_drops_excess_feedback() {
        let update = DelayUpdate {
            feedback: Some(0.96),
            ..Default::default()
        };
        let sanitized = sanitize_delay(&update, &Limits::standard());
        assert!(sanitized.is_empty());
    }

    #[test]
    fn sanitize_gate_drops_out_of_range_fields() {
        let update = GateUpdate {
            enabled: Some(true),
            threshold: Some(0.6),
            attack: Some(0.05),
            release: Some(0.005),
        };
        let sanitized = sanitize_gate(&update);
        assert_eq!(sanitized.enabled, Some(true));
        assert_eq!(sanitized.threshold, None);
        assert_eq!(sanitized.attack, Some(0.05));
        assert_eq!(sanitized.release, None);
    }

    #[test]
    fn empty_update_stays_empty() {
        assert!(sanitize_overdrive(&OverdriveUpdate::default(), &Limits::standard()).is_empty());
        assert!(sanitize_delay(&DelayUpdate::default(), &Limits::standard()).is_empty());
        assert!(sanitize_gate(&GateUpdate::default()).is_empty());
    }
}
