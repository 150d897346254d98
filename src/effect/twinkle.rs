//! Randomized per-pixel effects.
//!
//! Both effects keep their pixel bookkeeping inline in the step scratch:
//! sparkle restores the previously lit pixel before flashing the next one.

use embassy_time::Instant;
use rand::Rng;
use rand::rngs::SmallRng;

use super::{RenderStep, StepData, reschedule, resolve};
use crate::PixelDriver;
use crate::canvas::Canvas;
use crate::params::LightingParameters;

/// Extinguish one random pixel per tick until a randomized countdown
/// elapses, then relight the whole region and start over.
pub(super) fn twinkle<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
    now: Instant,
) {
    let count = canvas.count();
    if count == 0 {
        step.next = None;
        return;
    }

    let mut remaining = match step.data {
        StepData::Twinkle { remaining } => remaining,
        _ => 0,
    };
    if remaining == 0 {
        canvas.fill(resolve(params.second, step.step, rng));
        let quarter = (count / 4).max(1);
        remaining = quarter + rng.gen_range(0..quarter);
    }

    let target = rng.gen_range(0..count);
    canvas.set(target, resolve(params.first, step.step, rng));
    remaining -= 1;

    step.data = StepData::Twinkle { remaining };
    step.step = step.step.wrapping_add(1);
    step.next = reschedule(now, params.duration, count);
}

/// Flash one random pixel per tick against a solid background.
pub(super) fn sparkle<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
    now: Instant,
) {
    let count = canvas.count();
    if count == 0 {
        step.next = None;
        return;
    }

    let background = resolve(params.second, step.step, rng);
    if step.step == 0 {
        canvas.fill(background);
    }
    if let StepData::Sparkle { last: Some(last) } = step.data {
        canvas.set(last, background);
    }

    let target = rng.gen_range(0..count);
    canvas.set(target, resolve(params.first, step.step, rng));

    step.data = StepData::Sparkle { last: Some(target) };
    step.step = step.step.wrapping_add(1);
    step.next = reschedule(now, params.duration, count);
}
