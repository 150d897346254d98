//! Static mapping from logical lighting regions onto physical LED channels.
//!
//! A region is one addressable surface that may span several disjoint
//! channel slices. The topology is built once at configuration load and is
//! read-only for the rest of the session.

use heapless::{FnvIndexMap, Vec};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::params::Name;

/// Maximum number of physical LED channels.
pub const MAX_CHANNELS: usize = 8;

/// Maximum number of named regions.
pub const MAX_REGIONS: usize = 16;

/// Maximum number of sections contributing to one region.
pub const MAX_SECTIONS: usize = 4;

/// LED wire/color-order type of a physical strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LedType {
    NeoPixelGrb = 0,
    NeoPixelGrbw,
    NeoPixelRgb,
    NeoPixelRgbw,
    DotStarBgr,
    DotStarLbgr,
    DotStarGrb,
    DotStarLgrb,
}

impl LedType {
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::NeoPixelGrb,
            1 => Self::NeoPixelGrbw,
            2 => Self::NeoPixelRgb,
            3 => Self::NeoPixelRgbw,
            4 => Self::DotStarBgr,
            5 => Self::DotStarLbgr,
            6 => Self::DotStarGrb,
            7 => Self::DotStarLgrb,
            _ => return None,
        })
    }
}

/// One physical LED segment.
#[derive(Debug, Clone, Copy)]
pub struct LightChannel {
    pub id: u8,
    pub led_count: u16,
    pub led_type: LedType,
}

/// A `(channel, start, end)` slice contributing to a region.
///
/// Invariant: `start < end <= channel.led_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub channel: u8,
    pub start: u16,
    pub end: u16,
}

impl Section {
    pub const fn span(&self) -> u16 {
        self.end - self.start
    }
}

/// Named logical addressable surface.
///
/// `breaks[i]` holds the pixel span of `sections[i]`; `count` is their sum.
/// The parallel list translates a logical linear index into
/// `(section, offset)` without re-deriving spans on every write.
#[derive(Debug, Clone, Default)]
pub struct Region {
    sections: Vec<Section, MAX_SECTIONS>,
    breaks: Vec<u16, MAX_SECTIONS>,
    count: u32,
}

impl Region {
    /// Build a region from its sections.
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut region = Self::default();
        for section in sections {
            if region.sections.push(*section).is_err() {
                break;
            }
            let span = section.span();
            // push cannot fail: breaks mirrors sections capacity
            let _ = region.breaks.push(span);
            region.count += u32::from(span);
        }
        region
    }

    /// Total number of logically addressable pixels.
    pub const fn count(&self) -> u32 {
        self.count
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Translate a logical index into `(channel id, physical index)`.
    ///
    /// Walks the breaks list accumulating a running base offset. Returns
    /// `None` when the index lies outside the region; callers treat that as
    /// a no-op write.
    pub fn resolve(&self, logical: u32) -> Option<(u8, u16)> {
        if logical >= self.count {
            return None;
        }

        let mut base: u32 = 0;
        for (section, span) in self.sections.iter().zip(self.breaks.iter()) {
            let span = u32::from(*span);
            if logical < base + span {
                #[allow(clippy::cast_possible_truncation)]
                let offset = (logical - base) as u16;
                return Some((section.channel, section.start + offset));
            }
            base += span;
        }
        None
    }
}

/// The full channel/region mapping for one device.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    channels: FnvIndexMap<u8, LightChannel, MAX_CHANNELS>,
    regions: FnvIndexMap<Name, Region, MAX_REGIONS>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a physical channel.
    pub fn add_channel(&mut self, channel: LightChannel) {
        if self.channels.insert(channel.id, channel).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[Topology.add_channel] channel table full, dropping {}", channel.id);
        }
    }

    /// Register a named region, validating each section against its channel.
    ///
    /// Sections referencing unknown channels or exceeding channel bounds are
    /// skipped; the region keeps the valid remainder.
    pub fn add_region(&mut self, name: &str, sections: &[Section]) {
        let mut valid: Vec<Section, MAX_SECTIONS> = Vec::new();
        for section in sections {
            let in_bounds = self
                .channels
                .get(&section.channel)
                .is_some_and(|channel| section.start < section.end && section.end <= channel.led_count);
            if !in_bounds {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[Topology.add_region] dropping invalid section {}..{} on channel {}",
                    section.start, section.end, section.channel
                );
                continue;
            }
            if valid.push(*section).is_err() {
                break;
            }
        }

        let Ok(name) = Name::try_from(name) else {
            #[cfg(feature = "esp32-log")]
            println!("[Topology.add_region] region name too long");
            return;
        };
        if self.regions.insert(name, Region::from_sections(&valid)).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[Topology.add_region] region table full");
        }
    }

    pub fn channel(&self, id: u8) -> Option<&LightChannel> {
        self.channels.get(&id)
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        let key = Name::try_from(name).ok()?;
        self.regions.get(&key)
    }

    pub fn contains_region(&self, name: &str) -> bool {
        self.region(name).is_some()
    }

    pub fn regions(&self) -> impl Iterator<Item = (&Name, &Region)> {
        self.regions.iter()
    }

    pub fn channels(&self) -> impl Iterator<Item = (&u8, &LightChannel)> {
        self.channels.iter()
    }
}
