//! Configuration load for the compositor.
//!
//! The storage/transport collaborator hands over plain channel, region and
//! action descriptions; loading builds the immutable topology and the
//! action table. A staged [`CompositorConfig`] is swapped in atomically at
//! a tick boundary via [`ConfigSlot`], the single place where the
//! compositor shares mutable state with another task.

use core::cell::RefCell;

use critical_section::Mutex;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::action::ActionTable;
use crate::params::LightingParameters;
use crate::topology::{LedType, LightChannel, Section, Topology};

/// One physical channel description from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    pub channel: u8,
    pub led_count: u16,
    pub led_type: u8,
}

/// One region section description from configuration.
#[derive(Debug, Clone, Copy)]
pub struct SectionConfig {
    pub channel: u8,
    pub start: u16,
    pub end: u16,
}

/// One named region description from configuration.
#[derive(Debug, Clone, Copy)]
pub struct RegionConfig<'a> {
    pub name: &'a str,
    pub sections: &'a [SectionConfig],
}

/// One action binding: an effect literal targeting a region.
#[derive(Debug, Clone, Copy)]
pub struct ActionBinding<'a> {
    pub action: &'a str,
    pub region: &'a str,
    pub effect: &'a str,
}

/// Everything the compositor needs after a (re)load.
#[derive(Debug, Clone, Default)]
pub struct CompositorConfig {
    pub topology: Topology,
    pub actions: ActionTable,
}

impl CompositorConfig {
    /// Build a configuration from collaborator-supplied descriptions.
    ///
    /// Invalid entries are skipped with a log line; a malformed effect
    /// literal rejects only its own binding.
    pub fn load(
        channels: &[ChannelConfig],
        regions: &[RegionConfig<'_>],
        bindings: &[ActionBinding<'_>],
    ) -> Self {
        let mut topology = Topology::new();

        for channel in channels {
            let Some(led_type) = LedType::from_code(channel.led_type) else {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[CompositorConfig.load] unknown LED type {} on channel {}",
                    channel.led_type, channel.channel
                );
                continue;
            };
            topology.add_channel(LightChannel {
                id: channel.channel,
                led_count: channel.led_count,
                led_type,
            });
        }

        for region in regions {
            let mut sections: heapless::Vec<Section, { crate::topology::MAX_SECTIONS }> =
                heapless::Vec::new();
            for section in region.sections {
                let entry = Section {
                    channel: section.channel,
                    start: section.start,
                    end: section.end,
                };
                if sections.push(entry).is_err() {
                    #[cfg(feature = "esp32-log")]
                    println!(
                        "[CompositorConfig.load] too many sections for region {}",
                        region.name
                    );
                    break;
                }
            }
            topology.add_region(region.name, &sections);
        }

        let mut actions = ActionTable::new();
        for binding in bindings {
            match LightingParameters::parse(binding.region, binding.effect) {
                Ok(params) => {
                    if actions.insert(binding.action, params).is_err() {
                        #[cfg(feature = "esp32-log")]
                        println!(
                            "[CompositorConfig.load] action table full at {}",
                            binding.action
                        );
                    }
                }
                Err(_error) => {
                    #[cfg(feature = "esp32-log")]
                    println!(
                        "[CompositorConfig.load] rejected effect for {}: {:?}",
                        binding.action, _error
                    );
                }
            }
        }

        Self { topology, actions }
    }
}

/// Staging slot for bulk configuration reload.
///
/// The writer installs a complete new configuration under the guard; the
/// compositor takes it at the next tick boundary, so a reload never tears
/// mid-frame. This is the only mutual exclusion outside the queues.
pub struct ConfigSlot {
    inner: Mutex<RefCell<Option<CompositorConfig>>>,
}

impl ConfigSlot {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Stage a new configuration, replacing any not-yet-consumed one.
    pub fn stage(&self, config: CompositorConfig) {
        critical_section::with(|cs| {
            *self.inner.borrow(cs).borrow_mut() = Some(config);
        });
    }

    /// Take the staged configuration, if any.
    pub fn take(&self) -> Option<CompositorConfig> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().take())
    }
}

impl Default for ConfigSlot {
    fn default() -> Self {
        Self::new()
    }
}
