//! Hue-wheel effects driven by the step counter.

use embassy_time::Instant;

use super::{RenderStep, reschedule};
use crate::PixelDriver;
use crate::canvas::Canvas;
use crate::color::wheel;
use crate::params::LightingParameters;

/// Paint the whole region with one evolving hue.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn rainbow<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    now: Instant,
) {
    canvas.fill(wheel((step.step % 256) as u8));
    step.step = step.step.wrapping_add(1);
    step.next = reschedule(now, params.duration, 256);
}

/// Per-pixel hue gradient across the region, rotating each tick.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn rainbow_cycle<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    now: Instant,
) {
    let count = canvas.count();
    if count == 0 {
        step.next = None;
        return;
    }

    for i in 0..count {
        let hue = ((i * 256) / count).wrapping_add(step.step) % 256;
        canvas.set(i, wheel(hue as u8));
    }
    step.step = step.step.wrapping_add(1);
    step.next = reschedule(now, params.duration, 256);
}
