//! Concurrent front of the authoritative world
//!
//! The engine owns the world behind a single async mutex. Request handlers,
//! the enemy chase loop, the pickup relocation loop and the freeze timer all
//! take that lock for the duration of one world call and release it before
//! doing anything else, so every operation is atomic with respect to the
//! game state and the world timeline is a total order of such calls.

use crate::game::{CommandOutcome, TickOutcome, World};
use crate::map::GameMap;
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{Command, GameError, GameState, PortalPair, ENEMY_TICK, FREEZE_DURATION, PICKUP_TICK};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};

/// Timing and world parameters for a running engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Interval between enemy chase steps
    pub enemy_tick: Duration,
    /// Interval between pickup relocations
    pub pickup_tick: Duration,
    /// How long the one-shot freeze holds the AI still
    pub freeze_duration: Duration,
    pub portals: PortalPair,
    /// Fixed RNG seed for reproducible pickup placement
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enemy_tick: ENEMY_TICK,
            pickup_tick: PICKUP_TICK,
            freeze_duration: FREEZE_DURATION,
            portals: PortalPair::default(),
            seed: None,
        }
    }
}

/// Handle to the running game; clones share the same world
#[derive(Clone)]
pub struct Engine {
    world: Arc<Mutex<World>>,
    freeze_duration: Duration,
    shutdown_tx: Arc<watch::Sender<bool>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl Engine {
    /// Builds the world from a loaded map and starts the background loops
    ///
    /// Must be called from inside a tokio runtime.
    pub fn start(map: GameMap, config: EngineConfig) -> Self {
        let world = World::new(map, config.portals, config.rng());
        Self::with_world(world, config)
    }

    /// Starts the background loops over an already built world
    pub fn with_world(world: World, config: EngineConfig) -> Self {
        let world = Arc::new(Mutex::new(world));
        let (shutdown_tx, _) = watch::channel(false);

        let enemy_loop = tokio::spawn(run_tick_loop(
            "enemy",
            Arc::clone(&world),
            config.enemy_tick,
            shutdown_tx.subscribe(),
            World::step_enemy,
        ));
        let pickup_loop = tokio::spawn(run_tick_loop(
            "pickup",
            Arc::clone(&world),
            config.pickup_tick,
            shutdown_tx.subscribe(),
            World::relocate_pickup,
        ));

        info!(
            "Engine started (enemy every {:?}, pickup every {:?})",
            config.enemy_tick, config.pickup_tick
        );

        Self {
            world,
            freeze_duration: config.freeze_duration,
            shutdown_tx: Arc::new(shutdown_tx),
            tasks: Arc::new(Mutex::new(vec![enemy_loop, pickup_loop])),
        }
    }

    /// Registers a client and returns the world as it stands after spawning
    pub async fn register_player(&self, id: &str) -> Result<GameState, GameError> {
        self.world.lock().await.register_player(id)
    }

    /// Applies one client command
    ///
    /// A command that starts the freeze arms a timer task that thaws the
    /// world later; the lock is not held while the freeze lasts.
    pub async fn apply_command(
        &self,
        id: &str,
        sequence: u32,
        command: Command,
    ) -> Result<CommandOutcome, GameError> {
        let outcome = self.world.lock().await.apply_command(id, sequence, command)?;

        if outcome == CommandOutcome::FreezeStarted {
            self.spawn_thaw();
        }
        Ok(outcome)
    }

    /// Consistent copy of the whole world
    pub async fn snapshot(&self) -> GameState {
        self.world.lock().await.snapshot()
    }

    /// Consistent copy of the world for a registered client
    pub async fn snapshot_for(&self, id: &str) -> Result<GameState, GameError> {
        self.world.lock().await.snapshot_for(id)
    }

    fn spawn_thaw(&self) {
        let world = Arc::clone(&self.world);
        let hold = self.freeze_duration;
        let mut shutdown = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            tokio::select! {
                _ = sleep(hold) => {
                    world.lock().await.end_freeze();
                }
                _ = shutdown.changed() => {}
            }
        });
    }

    /// Stops the background loops and waits for them to finish
    pub async fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);

        let handles = std::mem::take(&mut *self.tasks.lock().await);
        for handle in handles {
            if let Err(e) = handle.await {
                error!("Background loop failed: {}", e);
            }
        }
        info!("Engine stopped");
    }
}

/// Runs one background activity on a fixed tick until shutdown or game over
async fn run_tick_loop(
    name: &'static str,
    world: Arc<Mutex<World>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    tick: fn(&mut World) -> TickOutcome,
) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Skip the first tick since it fires immediately
    timer.tick().await;

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                debug!("{} loop shutting down", name);
                break;
            }
            _ = timer.tick() => {
                let outcome = {
                    let mut world = world.lock().await;
                    tick(&mut world)
                };

                match outcome {
                    TickOutcome::Moved(pos) => debug!("{} at ({}, {})", name, pos.x, pos.y),
                    TickOutcome::Frozen => debug!("{} tick skipped while frozen", name),
                    TickOutcome::NoFreeCell => {}
                    TickOutcome::Caught | TickOutcome::Over => {
                        info!("{} loop finished: game over", name);
                        break;
                    }
                }
            }
        }
    }
}
