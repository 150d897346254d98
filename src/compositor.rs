//! Compositor / scheduler.
//!
//! A single dedicated periodic task owns the compositor exclusively. Each
//! tick drains the inbound signal queues, determines which regions are due
//! for a redraw, orders simultaneous effects by layer, runs the algorithm
//! library and commits at most one hardware flush.

use embassy_time::Instant;
use heapless::{FnvIndexMap, Vec};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::action::{Action, ActionTable, CommandGroup, LightCommands};
use crate::action::{MAX_BINDINGS, TravelDirection};
use crate::canvas::Canvas;
use crate::channel::Channel;
use crate::config::{CompositorConfig, ConfigSlot};
use crate::effect::{self, RenderStep};
use crate::params::{LightingParameters, Name};
use crate::signal::{PowerStatus, SignalQueues, UpdateStatus};
use crate::status;
use crate::topology::{MAX_REGIONS, Topology};
use crate::{PixelDriver, FlushError};

/// Queue mirroring the latest light command state to the wireless
/// collaborator. Drop-oldest: a slow consumer sees the newest state.
pub type CommandListenerQueue = Channel<LightCommands, 2>;

/// The LED region animation compositor.
///
/// Owns the topology plus two parallel per-region maps (assignment and
/// render step), both mutated only from the compositor task.
pub struct Compositor<'a, D: PixelDriver> {
    topology: Topology,
    actions: ActionTable,
    driver: D,
    rng: SmallRng,

    params: FnvIndexMap<Name, LightingParameters, MAX_REGIONS>,
    steps: FnvIndexMap<Name, RenderStep, MAX_REGIONS>,

    signals: &'a SignalQueues,
    reload: &'a ConfigSlot,
    listeners: &'a CommandListenerQueue,

    commands: LightCommands,
    direction: TravelDirection,
    power: Option<PowerStatus>,
    updating: bool,
    advertising: bool,
    flush_pending: bool,
}

impl<'a, D: PixelDriver> Compositor<'a, D> {
    pub fn new(
        driver: D,
        config: CompositorConfig,
        signals: &'a SignalQueues,
        reload: &'a ConfigSlot,
        listeners: &'a CommandListenerQueue,
        seed: u64,
    ) -> Self {
        Self {
            topology: config.topology,
            actions: config.actions,
            driver,
            rng: SmallRng::seed_from_u64(seed),
            params: FnvIndexMap::new(),
            steps: FnvIndexMap::new(),
            signals,
            reload,
            listeners,
            commands: LightCommands::default(),
            direction: TravelDirection::default(),
            power: None,
            updating: false,
            advertising: false,
            flush_pending: false,
        }
    }

    /// One scheduler tick.
    ///
    /// Never blocks; when nothing is due the tick performs no hardware
    /// access beyond retrying a previously failed flush.
    pub fn tick(&mut self, now: Instant) {
        self.drain_signals(now);
        self.run_schedule(now);
    }

    /// Install an effect assignment for its region.
    ///
    /// Unknown regions are logged and ignored, leaving any previous
    /// assignment untouched. On success the old render step (and its
    /// shape-specific scratch) is discarded, so the new effect starts from
    /// frame zero at the next tick boundary.
    pub fn apply_effect(&mut self, params: LightingParameters, now: Instant) {
        if !self.topology.contains_region(&params.region) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[Compositor.apply_effect] unknown region {}",
                params.region.as_str()
            );
            return;
        }

        let name = params.region.clone();
        if self.steps.insert(name.clone(), RenderStep::starting(now)).is_err() {
            #[cfg(feature = "esp32-log")]
            println!("[Compositor.apply_effect] region map full");
            return;
        }
        let _ = self.params.insert(name, params);
    }

    /// Dispatch a symbolic vehicle action through the binding table.
    pub fn dispatch_action(&mut self, action: Action, now: Instant) {
        if action == Action::Reset {
            let commands = self.commands;
            self.run_bindings(commands.motion, now);
            self.run_bindings(commands.headlight, now);
            self.run_bindings(commands.turn, now);
            self.notify();
            return;
        }

        self.run_bindings(action, now);
        match action.group() {
            Some(CommandGroup::Motion) => self.commands.motion = action,
            Some(CommandGroup::Headlight) => self.commands.headlight = action,
            Some(CommandGroup::Turn) => self.commands.turn = action,
            None => {}
        }
        self.notify();
    }

    /// Last committed command per lighting concern.
    pub const fn commands(&self) -> LightCommands {
        self.commands
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn parameters(&self, region: &str) -> Option<&LightingParameters> {
        let key = Name::try_from(region).ok()?;
        self.params.get(&key)
    }

    pub fn step(&self, region: &str) -> Option<&RenderStep> {
        let key = Name::try_from(region).ok()?;
        self.steps.get(&key)
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn run_bindings(&mut self, action: Action, now: Instant) {
        let mut list: Vec<LightingParameters, MAX_BINDINGS> = Vec::new();
        if let Some(bindings) = self.actions.resolve(action, self.direction) {
            for params in bindings {
                let _ = list.push(params.clone());
            }
        } else {
            #[cfg(feature = "esp32-log")]
            println!("[Compositor.dispatch_action] no bindings for {}", action.name());
        }
        for params in list {
            self.apply_effect(params, now);
        }
    }

    fn notify(&self) {
        self.listeners.send_latest(self.commands);
    }

    /// Drain every inbound queue non-blockingly.
    fn drain_signals(&mut self, now: Instant) {
        while self.signals.config_updated.try_receive().is_ok() {
            if let Some(config) = self.reload.take() {
                self.install_config(config);
            }
        }

        while let Ok(direction) = self.signals.direction.try_receive() {
            self.direction = direction;
        }

        while let Ok(power) = self.signals.power.try_receive() {
            self.power = Some(power);
            if !self.updating && !self.advertising {
                self.apply_effect(status::power_status(&power), now);
            }
        }

        while let Ok(pressed) = self.signals.touch.try_receive() {
            if pressed {
                self.apply_effect(status::touch_down(), now);
            } else {
                self.reapply_power(now);
            }
        }

        while let Ok(update) = self.signals.update.try_receive() {
            self.updating = matches!(update, UpdateStatus::Start | UpdateStatus::Write);
            match status::update_status(update) {
                Some(params) => self.apply_effect(params, now),
                None => self.reapply_power(now),
            }
        }

        while let Ok(advertising) = self.signals.advertising.try_receive() {
            self.advertising = advertising;
            if advertising {
                self.apply_effect(status::advertising(), now);
            } else {
                self.reapply_power(now);
            }
        }

        while let Ok(action) = self.signals.actions.try_receive() {
            self.dispatch_action(action, now);
        }

        while let Ok(params) = self.signals.assignments.try_receive() {
            self.apply_effect(params, now);
            self.notify();
        }
    }

    /// Re-apply the power status color unless a higher-priority device
    /// state (update, advertising) owns the status region.
    fn reapply_power(&mut self, now: Instant) {
        if self.updating || self.advertising {
            return;
        }
        if let Some(power) = self.power {
            self.apply_effect(status::power_status(&power), now);
        }
    }

    /// Swap in a staged configuration at a tick boundary.
    fn install_config(&mut self, config: CompositorConfig) {
        self.topology = config.topology;
        self.actions = config.actions;
        self.params.clear();
        self.steps.clear();
        self.driver.mark_all_dirty();
        #[cfg(feature = "esp32-log")]
        println!("[Compositor.install_config] configuration reloaded");
    }

    /// The scheduling pass of one tick.
    fn run_schedule(&mut self, now: Instant) {
        let mut due: Vec<(u8, Name), MAX_REGIONS> = Vec::new();
        for (name, step) in &self.steps {
            if step.is_due(now) {
                if let Some(params) = self.params.get(name) {
                    let _ = due.push((params.layer, name.clone()));
                }
            }
        }

        if due.is_empty() {
            if self.flush_pending {
                self.try_flush();
            }
            return;
        }

        // A transient overlay must not permanently erase a static
        // background: re-enqueue every Static/Off entry on any frame that
        // changes anything, so the background is repainted underneath.
        for (name, params) in &self.params {
            if params.shape.is_background() && !due.iter().any(|(_, n)| n == name) {
                let _ = due.push((params.layer, name.clone()));
            }
        }

        // Smallest layer renders first; later writes land on top.
        due.sort_unstable_by_key(|entry| entry.0);

        let mut wrote = false;
        for (_, name) in &due {
            let Some(params) = self.params.get(name) else {
                continue;
            };
            let Some(step) = self.steps.get_mut(name) else {
                continue;
            };
            let Some(region) = self.topology.region(name) else {
                continue;
            };
            let mut canvas = Canvas::new(region, &mut self.driver);
            effect::render(params, step, &mut canvas, &mut self.rng, now);
            wrote |= canvas.touched();
        }

        if wrote || self.flush_pending {
            self.try_flush();
        }
    }

    /// Commit the frame; a failed transfer stays pending and is retried on
    /// the next tick without ever blocking the scheduler.
    fn try_flush(&mut self) {
        match self.driver.flush() {
            Ok(()) => self.flush_pending = false,
            Err(FlushError) => {
                self.flush_pending = true;
                #[cfg(feature = "esp32-log")]
                println!("[Compositor.flush] hardware flush failed, retrying next tick");
            }
        }
    }
}
