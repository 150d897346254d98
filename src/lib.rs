#![no_std]

pub mod action;
pub mod channel;
pub mod color;
pub mod compositor;
pub mod config;
pub mod effect;
pub mod gamma;
pub mod math8;
pub mod params;
pub mod signal;
pub mod status;
pub mod tick_scheduler;
pub mod topology;

mod canvas;

pub use action::{Action, ActionTable, CommandGroup, LightCommands, TableFull, TravelDirection};
pub use compositor::{Compositor, CommandListenerQueue};
pub use config::{
    ActionBinding, ChannelConfig, CompositorConfig, ConfigSlot, RegionConfig, SectionConfig,
};
pub use effect::{RenderStep, StepData};
pub use params::{ColorOption, EffectShape, LightingParameters, Name, ParseError};
pub use signal::{PowerLevel, PowerStatus, SignalQueues, UpdateStatus};
pub use tick_scheduler::{TickResult, TickScheduler};
pub use topology::{LedType, LightChannel, Region, Section, Topology};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Error returned by [`PixelDriver::flush`] when the hardware transfer fails.
///
/// The compositor keeps the frame dirty and retries on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushError;

/// Abstract addressable-LED driver
///
/// Implement this trait to support different hardware platforms.
/// The compositor owns one driver and never touches registers directly.
/// Colors arriving here are already gamma corrected.
pub trait PixelDriver {
    /// Write one pixel of a channel's buffer
    fn set_pixel(&mut self, channel: u8, index: u16, color: Rgb);

    /// Write a contiguous pixel range `start..end` of a channel's buffer
    fn set_range(&mut self, channel: u8, start: u16, end: u16, color: Rgb) {
        for index in start..end {
            self.set_pixel(channel, index, color);
        }
    }

    /// Mark a channel as needing a hardware transfer
    fn mark_dirty(&mut self, channel: u8);

    /// Mark every channel as needing a hardware transfer
    fn mark_all_dirty(&mut self);

    /// Commit all dirty channels to the hardware
    fn flush(&mut self) -> Result<(), FlushError>;
}
