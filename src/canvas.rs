//! Painting surface handed to the effect algorithms.
//!
//! A canvas addresses one region's logical pixel space and routes writes
//! through the topology into the hardware driver. Gamma correction happens
//! here, at the physical write, so algorithm math stays in linear-intent
//! color space.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PixelDriver;
use crate::color::Rgb;
use crate::gamma;
use crate::topology::Region;

pub(crate) struct Canvas<'a, D: PixelDriver> {
    region: &'a Region,
    driver: &'a mut D,
    touched: bool,
}

impl<'a, D: PixelDriver> Canvas<'a, D> {
    pub(crate) fn new(region: &'a Region, driver: &'a mut D) -> Self {
        Self {
            region,
            driver,
            touched: false,
        }
    }

    /// Number of logically addressable pixels in the region.
    pub(crate) const fn count(&self) -> u32 {
        self.region.count()
    }

    /// Paint one logical pixel.
    ///
    /// Out-of-range indices become no-op writes.
    pub(crate) fn set(&mut self, logical: u32, color: Rgb) {
        let Some((channel, index)) = self.region.resolve(logical) else {
            #[cfg(feature = "esp32-log")]
            println!("[Canvas.set] logical index {} out of range", logical);
            return;
        };
        self.driver.set_pixel(channel, index, gamma::corrected(color));
        self.driver.mark_dirty(channel);
        self.touched = true;
    }

    /// Paint the whole region, one hardware range write per section.
    pub(crate) fn fill(&mut self, color: Rgb) {
        let corrected = gamma::corrected(color);
        for section in self.region.sections() {
            self.driver
                .set_range(section.channel, section.start, section.end, corrected);
            self.driver.mark_dirty(section.channel);
        }
        self.touched |= !self.region.sections().is_empty();
    }

    /// Whether any pixel write happened through this canvas.
    pub(crate) const fn touched(&self) -> bool {
        self.touched
    }
}
