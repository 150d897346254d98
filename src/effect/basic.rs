//! Single-frame fills and the two-phase blinkers.

use embassy_time::{Duration, Instant};
use rand::rngs::SmallRng;

use super::{RenderStep, resolve};
use crate::PixelDriver;
use crate::canvas::Canvas;
use crate::color::{BLACK, Rgb};
use crate::params::LightingParameters;

/// Indicator color shown while battery visualization is unimplemented.
const BATTERY_INDICATOR: Rgb = Rgb::new(255, 0, 127);

/// Paint the whole region with the first color, then idle.
pub(super) fn static_fill<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
) {
    let color = resolve(params.first, step.step, rng);
    canvas.fill(color);
    step.next = None;
}

/// Force the region dark, then idle.
pub(super) fn off<D: PixelDriver>(step: &mut RenderStep, canvas: &mut Canvas<'_, D>) {
    canvas.fill(BLACK);
    step.next = None;
}

/// Reserved battery-level visualization; currently a fixed indicator fill.
pub(super) fn battery<D: PixelDriver>(step: &mut RenderStep, canvas: &mut Canvas<'_, D>) {
    canvas.fill(BATTERY_INDICATOR);
    step.next = None;
}

/// Whole-region two-color blink: first on even steps, second on odd.
pub(super) fn blink<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
    now: Instant,
) {
    let option = if step.step % 2 == 0 {
        params.first
    } else {
        params.second
    };
    canvas.fill(resolve(option, step.step, rng));
    step.step = step.step.wrapping_add(1);
    step.next = Some(now + Duration::from_millis(u64::from(params.duration)));
}

/// Per-pixel checkerboard whose phase flips each invocation.
pub(super) fn alternate<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
    now: Instant,
) {
    let first = resolve(params.first, step.step, rng);
    let second = resolve(params.second, step.step, rng);
    for i in 0..canvas.count() {
        let color = if i.wrapping_add(step.step) % 2 == 0 {
            first
        } else {
            second
        };
        canvas.set(i, color);
    }
    step.step = step.step.wrapping_add(1);
    step.next = Some(now + Duration::from_millis(u64::from(params.duration)));
}
