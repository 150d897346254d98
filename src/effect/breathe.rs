//! Triangle-wave brightness effects.

use embassy_time::{Duration, Instant};
use rand::rngs::SmallRng;

use super::{RenderStep, resolve};
use crate::PixelDriver;
use crate::canvas::Canvas;
use crate::color::blend_colors;
use crate::math8::triangle512;
use crate::params::LightingParameters;

/// Per-luminance delay multipliers, indexed by `level >> 4`.
///
/// The table dwells near the extremes of the triangle wave to approximate a
/// natural breathing curve; kept as a tuned constant rather than a
/// closed-form function.
const BREATHE_DELAY: [u8; 16] = [8, 5, 3, 2, 2, 1, 1, 1, 1, 1, 1, 2, 2, 3, 5, 8];

/// Breathe between the second and first colors over a 512-step cycle.
pub(super) fn breathe<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
    now: Instant,
) {
    let level = triangle512(step.step);
    let from = resolve(params.second, step.step, rng);
    let to = resolve(params.first, step.step, rng);
    canvas.fill(blend_colors(from, to, level));

    step.step = step.step.wrapping_add(1);
    let base = (params.duration / 512).max(1);
    let factor = u32::from(BREATHE_DELAY[usize::from(level >> 4)]);
    step.next = Some(now + Duration::from_millis(u64::from(base * factor)));
}

/// Linear triangle-wave crossfade between the first and second colors.
///
/// Advances four steps per invocation, completing a cycle in 128 frames.
pub(super) fn fade<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
    now: Instant,
) {
    let level = triangle512(step.step);
    let from = resolve(params.first, step.step, rng);
    let to = resolve(params.second, step.step, rng);
    canvas.fill(blend_colors(from, to, level));

    step.step = step.step.wrapping_add(4);
    step.next = Some(now + Duration::from_millis(u64::from(params.duration / 128)));
}
