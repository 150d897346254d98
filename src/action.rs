//! Symbolic vehicle actions and their effect bindings.
//!
//! An action ("the rider is braking", "turn left") maps to one or more
//! effect assignments via a configuration-loaded table. Direction-aware
//! overrides use `-forward` / `-backward` suffixed names, chosen by the
//! vehicle's travel direction at dispatch time.

use core::fmt::Write;

use heapless::{FnvIndexMap, Vec};

use crate::params::{LightingParameters, Name};

/// Error returned when the action table cannot hold another binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFull;

/// Maximum number of action table entries (bare plus suffixed names).
pub const MAX_ACTIONS: usize = 32;

/// Maximum number of effect bindings per action.
pub const MAX_BINDINGS: usize = 4;

/// Vehicle travel direction used to select action overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelDirection {
    #[default]
    Forward,
    Backward,
}

impl TravelDirection {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Forward => "-forward",
            Self::Backward => "-backward",
        }
    }
}

/// Symbolic vehicle events that trigger lighting changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Off,
    Reset,
    MotionNeutral,
    MotionBrakes,
    MotionAcceleration,
    HeadlightNormal,
    HeadlightBright,
    TurnCenter,
    TurnLeft,
    TurnRight,
    TurnHazard,
    BatteryCritical,
    BatteryLow,
    BatteryNormal,
}

/// Grouping used to remember the last command per lighting concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Motion,
    Headlight,
    Turn,
}

impl Action {
    /// Table lookup name for this action.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Reset => "reset",
            Self::MotionNeutral => "motion-neutral",
            Self::MotionBrakes => "motion-brakes",
            Self::MotionAcceleration => "motion-acceleration",
            Self::HeadlightNormal => "headlight-normal",
            Self::HeadlightBright => "headlight-bright",
            Self::TurnCenter => "turn-center",
            Self::TurnLeft => "turn-left",
            Self::TurnRight => "turn-right",
            Self::TurnHazard => "turn-hazard",
            Self::BatteryCritical => "battery-critical",
            Self::BatteryLow => "battery-low",
            Self::BatteryNormal => "battery-normal",
        }
    }

    /// Which remembered command this action replaces, if any.
    pub const fn group(self) -> Option<CommandGroup> {
        match self {
            Self::MotionNeutral | Self::MotionBrakes | Self::MotionAcceleration => {
                Some(CommandGroup::Motion)
            }
            Self::HeadlightNormal | Self::HeadlightBright => Some(CommandGroup::Headlight),
            Self::TurnCenter | Self::TurnLeft | Self::TurnRight | Self::TurnHazard => {
                Some(CommandGroup::Turn)
            }
            _ => None,
        }
    }
}

/// Last committed command per lighting concern.
///
/// Mirrored to the wireless-control collaborator on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightCommands {
    pub motion: Action,
    pub headlight: Action,
    pub turn: Action,
}

impl Default for LightCommands {
    fn default() -> Self {
        Self {
            motion: Action::MotionNeutral,
            headlight: Action::HeadlightNormal,
            turn: Action::TurnCenter,
        }
    }
}

/// Configuration-loaded mapping from action names to effect bindings.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    bindings: FnvIndexMap<Name, Vec<LightingParameters, MAX_BINDINGS>, MAX_ACTIONS>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding under an action name (bare or suffixed).
    ///
    /// Returns `Err` when either the table or the per-action binding list
    /// is full.
    pub fn insert(&mut self, action: &str, params: LightingParameters) -> Result<(), TableFull> {
        let name = Name::try_from(action).map_err(|()| TableFull)?;
        if let Some(existing) = self.bindings.get_mut(&name) {
            return existing.push(params).map_err(|_| TableFull);
        }
        let mut list = Vec::new();
        // push cannot fail on a fresh list
        let _ = list.push(params);
        self.bindings.insert(name, list).map(|_| ()).map_err(|_| TableFull)
    }

    /// Resolve the bindings for an action, honoring direction overrides.
    ///
    /// The `-forward` / `-backward` variant wins over the bare name.
    pub fn resolve(
        &self,
        action: Action,
        direction: TravelDirection,
    ) -> Option<&[LightingParameters]> {
        let mut suffixed = Name::new();
        let _ = write!(suffixed, "{}{}", action.name(), direction.suffix());

        self.bindings
            .get(&suffixed)
            .or_else(|| {
                let name = Name::try_from(action.name()).ok()?;
                self.bindings.get(&name)
            })
            .map(|bindings| bindings.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
