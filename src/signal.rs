//! Inbound device signals and their bounded queues.
//!
//! One queue per signal type. Producers (touch handler, power monitor, OTA
//! handler, BLE stack, control bridge) push from their own tasks; the
//! compositor drains everything non-blockingly at the start of each tick.

use crate::action::{Action, TravelDirection};
use crate::channel::Channel;
use crate::params::LightingParameters;

/// Coarse battery level reported by the power monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerLevel {
    #[default]
    Unknown,
    Critical,
    Low,
    Normal,
    Charged,
}

/// Snapshot of the device power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerStatus {
    pub charging: bool,
    pub battery_present: bool,
    pub percentage: u8,
    pub level: PowerLevel,
}

/// Progress markers emitted by the firmware-update handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Start,
    End,
    Write,
    ErrorStart,
    ErrorEnd,
    ErrorWrite,
}

/// All queues feeding the compositor task.
///
/// Intended to live in a `static`; senders are handed to producer tasks,
/// the compositor keeps a shared reference and drains.
pub struct SignalQueues {
    /// Touch pad pressed / released.
    pub touch: Channel<bool, 2>,
    /// A staged configuration is ready to be swapped in.
    pub config_updated: Channel<bool, 1>,
    /// Battery / charging state changes.
    pub power: Channel<PowerStatus, 1>,
    /// OTA update progress.
    pub update: Channel<UpdateStatus, 5>,
    /// BLE advertising started / stopped.
    pub advertising: Channel<bool, 1>,
    /// Current travel direction, for direction-aware action bindings.
    pub direction: Channel<TravelDirection, 1>,
    /// Direct effect assignments from the control bridge.
    pub assignments: Channel<LightingParameters, 8>,
    /// Symbolic vehicle actions from the motion state machine.
    pub actions: Channel<Action, 4>,
}

impl SignalQueues {
    pub const fn new() -> Self {
        Self {
            touch: Channel::new(),
            config_updated: Channel::new(),
            power: Channel::new(),
            update: Channel::new(),
            advertising: Channel::new(),
            direction: Channel::new(),
            assignments: Channel::new(),
            actions: Channel::new(),
        }
    }
}

impl Default for SignalQueues {
    fn default() -> Self {
        Self::new()
    }
}
