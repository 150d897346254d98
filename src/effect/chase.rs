//! Marquee-style chases.

use embassy_time::{Duration, Instant};
use rand::rngs::SmallRng;

use super::{RenderStep, reschedule, resolve};
use crate::PixelDriver;
use crate::canvas::Canvas;
use crate::color::{BLACK, wheel};
use crate::params::LightingParameters;

/// Round-robin the three colors across the region, rotating each tick.
pub(super) fn color_chase<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
    now: Instant,
) {
    let palette = [
        resolve(params.first, step.step, rng),
        resolve(params.second, step.step, rng),
        resolve(params.third, step.step, rng),
    ];
    for i in 0..canvas.count() {
        canvas.set(i, palette[(i.wrapping_add(step.step) % 3) as usize]);
    }
    step.step = step.step.wrapping_add(1);
    step.next = reschedule(now, params.duration, 3);
}

/// Light every third pixel with the first color against the second.
pub(super) fn theater_chase<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
    now: Instant,
) {
    let lit = resolve(params.first, step.step, rng);
    let background = resolve(params.second, step.step, rng);
    for i in 0..canvas.count() {
        let color = if i.wrapping_add(step.step) % 3 == 0 {
            lit
        } else {
            background
        };
        canvas.set(i, color);
    }
    step.step = step.step.wrapping_add(1);
    step.next = Some(now + Duration::from_millis(u64::from(params.duration)));
}

/// Theater chase whose lit color walks the hue wheel each tick.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn theater_chase_rainbow<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    now: Instant,
) {
    let lit = wheel((step.step % 256) as u8);
    for i in 0..canvas.count() {
        let color = if i.wrapping_add(step.step) % 3 == 0 {
            lit
        } else {
            BLACK
        };
        canvas.set(i, color);
    }
    step.step = step.step.wrapping_add(1);
    step.next = Some(now + Duration::from_millis(u64::from(params.duration)));
}
