//! Linear sweep effects: color wipe and the ping-pong scanner.

use embassy_time::Instant;
use rand::rngs::SmallRng;

use super::{RenderStep, StepData, reschedule, resolve};
use crate::PixelDriver;
use crate::canvas::Canvas;
use crate::params::LightingParameters;

/// Sweep the first color across the region one pixel per step, then sweep
/// the second color over it; idles after `2 * count` steps.
pub(super) fn color_wipe<D: PixelDriver>(
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

    if step.step < count {
        canvas.set(step.step, resolve(params.first, step.step, rng));
    } else if step.step < 2 * count {
        canvas.set(step.step - count, resolve(params.second, step.step, rng));
    }

    step.step = step.step.wrapping_add(1);
    step.next = if step.step >= 2 * count {
        None
    } else {
        reschedule(now, params.duration, 2 * count)
    };
}

/// One pixel ping-pongs across a background of the second color.
///
/// The travel direction lives in the step scratch and reverses at either
/// boundary.
pub(super) fn scan<D: PixelDriver>(
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

    let (mut pos, mut forward) = match step.data {
        StepData::Scan { pos, forward } => (pos, forward),
        _ => (0, true),
    };

    canvas.fill(resolve(params.second, step.step, rng));
    canvas.set(pos, resolve(params.first, step.step, rng));

    if forward {
        if pos + 1 >= count {
            forward = false;
            pos = pos.saturating_sub(1);
        } else {
            pos += 1;
        }
    } else if pos == 0 {
        forward = true;
        pos = if count > 1 { 1 } else { 0 };
    } else {
        pos -= 1;
    }

    step.data = StepData::Scan { pos, forward };
    step.step = step.step.wrapping_add(1);
    step.next = reschedule(now, params.duration, 2 * count);
}
