//! Effect algorithm library.
//!
//! One pure function per animation shape. Each consumes the current render
//! step plus the assignment parameters, writes pixels through the canvas,
//! and computes the next instant at which it wants to run again. `None`
//! means "render once, then idle until superseded" - nothing is ever waited
//! on inside an algorithm.

mod basic;
mod breathe;
mod chase;
mod rainbow;
mod twinkle;
mod wipe;

use embassy_time::{Duration, Instant};
use rand::Rng;
use rand::rngs::SmallRng;

use crate::PixelDriver;
use crate::canvas::Canvas;
use crate::color::{Rgb, wheel};
use crate::params::{ColorOption, EffectShape, LightingParameters};

/// Per-region scheduler state driving one effect's animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStep {
    /// Monotonically increasing step counter.
    pub step: u32,
    /// Next due instant; `None` means never automatically re-fire.
    pub next: Option<Instant>,
    /// Effect-specific scratch state.
    pub data: StepData,
}

impl RenderStep {
    /// Fresh state for a newly applied effect, due immediately.
    pub const fn starting(now: Instant) -> Self {
        Self {
            step: 0,
            next: Some(now),
            data: StepData::None,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next.is_some_and(|next| next <= now)
    }
}

/// Strongly-typed scratch state, one variant per shape that needs any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepData {
    #[default]
    None,
    /// Scan cursor and travel direction.
    Scan { pos: u32, forward: bool },
    /// Previously sparkled pixel, restored before the next flash.
    Sparkle { last: Option<u32> },
    /// Pixels left to extinguish before the twinkle field resets.
    Twinkle { remaining: u32 },
}

/// Run one animation frame for a region.
pub(crate) fn render<D: PixelDriver>(
    params: &LightingParameters,
    step: &mut RenderStep,
    canvas: &mut Canvas<'_, D>,
    rng: &mut SmallRng,
    now: Instant,
) {
    match params.shape {
        EffectShape::Transparent => step.next = None,
        EffectShape::Off => basic::off(step, canvas),
        EffectShape::Static => basic::static_fill(params, step, canvas, rng),
        EffectShape::Blink => basic::blink(params, step, canvas, rng, now),
        EffectShape::Alternate => basic::alternate(params, step, canvas, rng, now),
        EffectShape::ColorWipe => wipe::color_wipe(params, step, canvas, rng, now),
        EffectShape::Breathe => breathe::breathe(params, step, canvas, rng, now),
        EffectShape::Fade => breathe::fade(params, step, canvas, rng, now),
        EffectShape::Scan => wipe::scan(params, step, canvas, rng, now),
        EffectShape::Rainbow => rainbow::rainbow(params, step, canvas, now),
        EffectShape::RainbowCycle => rainbow::rainbow_cycle(params, step, canvas, now),
        EffectShape::ColorChase => chase::color_chase(params, step, canvas, rng, now),
        EffectShape::TheaterChase => chase::theater_chase(params, step, canvas, rng, now),
        EffectShape::TheaterChaseRainbow => chase::theater_chase_rainbow(params, step, canvas, now),
        EffectShape::Twinkle => twinkle::twinkle(params, step, canvas, rng, now),
        EffectShape::Sparkle => twinkle::sparkle(params, step, canvas, rng, now),
        EffectShape::Battery => basic::battery(step, canvas),
    }
}

/// Resolve a color argument for the current step.
///
/// Fixed options pass through literally; random draws a fresh wheel color
/// per call; rainbow rotates the hue wheel with the step counter.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn resolve(option: ColorOption, step: u32, rng: &mut SmallRng) -> Rgb {
    match option {
        ColorOption::Fixed(color) => color,
        ColorOption::Random => wheel(rng.r#gen::<u8>()),
        ColorOption::Rainbow => wheel((step % 256) as u8),
    }
}

/// Compute the next due instant from a duration-derived interval.
///
/// A zero divisor clamps to never instead of faulting.
pub(crate) fn reschedule(now: Instant, duration: u32, divisor: u32) -> Option<Instant> {
    if divisor == 0 {
        return None;
    }
    Some(now + Duration::from_millis(u64::from(duration / divisor)))
}
