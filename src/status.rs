//! Status region lighting policy.
//!
//! Translates device signals (power, touch, OTA progress, BLE advertising)
//! into effect assignments on the `"status"` region. Pure: policy in,
//! parameters out; the compositor applies them while draining queues.

use crate::color::Rgb;
use crate::params::{ColorOption, EffectShape, LightingParameters, Name};
use crate::signal::{PowerLevel, PowerStatus, UpdateStatus};

/// Region carrying device status lighting.
pub const STATUS_REGION: &str = "status";

/// Layer for status lighting so it sits above region backgrounds.
const STATUS_LAYER: u8 = 10;

const ACCENT: Rgb = Rgb::new(255, 0, 127);
const ACCENT_TOUCH: Rgb = Rgb::new(127, 0, 255);
const CHARGING: Rgb = Rgb::new(255, 127, 0);
const CHARGED: Rgb = Rgb::new(0, 127, 0);
const CRITICAL: Rgb = Rgb::new(127, 0, 0);
const LOW: Rgb = Rgb::new(127, 127, 0);
const ADVERTISING: Rgb = Rgb::new(0, 0, 127);
const UPDATING: Rgb = Rgb::new(255, 127, 0);
const UPDATE_FAILED: Rgb = Rgb::new(127, 0, 0);

const ADVERTISING_BLINK_MS: u32 = 100;
const UPDATE_BLINK_MS: u32 = 200;

fn assignment(shape: EffectShape, color: Rgb, duration: u32) -> LightingParameters {
    // "status" always fits in a Name
    let region = Name::try_from(STATUS_REGION).unwrap_or_default();
    LightingParameters {
        region,
        shape,
        first: ColorOption::Fixed(color),
        second: ColorOption::default(),
        third: ColorOption::default(),
        duration,
        layer: STATUS_LAYER,
        limit: None,
    }
}

fn fill(color: Rgb) -> LightingParameters {
    assignment(EffectShape::Static, color, 0)
}

fn blink(color: Rgb, duration: u32) -> LightingParameters {
    assignment(EffectShape::Blink, color, duration)
}

/// Steady color reflecting the battery / charging state.
pub fn power_status(status: &PowerStatus) -> LightingParameters {
    if status.charging {
        if status.level == PowerLevel::Charged {
            return fill(CHARGED);
        }
        return fill(CHARGING);
    }
    match status.level {
        PowerLevel::Critical => fill(CRITICAL),
        PowerLevel::Low => fill(LOW),
        _ => fill(ACCENT),
    }
}

/// Touch acknowledgment shown while the pad is held.
pub fn touch_down() -> LightingParameters {
    fill(ACCENT_TOUCH)
}

/// BLE advertising indicator.
pub fn advertising() -> LightingParameters {
    blink(ADVERTISING, ADVERTISING_BLINK_MS)
}

/// Lighting for a firmware-update progress marker.
///
/// `None` means the update is over and the power status should be
/// re-applied by the caller.
pub fn update_status(status: UpdateStatus) -> Option<LightingParameters> {
    match status {
        UpdateStatus::Start => Some(fill(UPDATING)),
        UpdateStatus::Write => Some(blink(UPDATING, UPDATE_BLINK_MS)),
        UpdateStatus::ErrorStart | UpdateStatus::ErrorEnd | UpdateStatus::ErrorWrite => {
            Some(fill(UPDATE_FAILED))
        }
        UpdateStatus::End => None,
    }
}
