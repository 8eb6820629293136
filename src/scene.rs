//! Scenes and the context they run in.
//!
//! A [`Scene`] is one self-contained gameplay or UI state with its own
//! lifecycle. Scenes never reach the application core directly; every
//! lifecycle call receives the [`SceneContext`], which is how a scene asks
//! for a transition, reads time and input, or touches persisted data.
//!
//! Scene identity is the name a factory was registered under in the
//! [`SceneStore`]. Requesting the scene that is already active is ignored.

use log::{debug, info};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::platform::Canvas;
use crate::resources::animationstore::AnimationError;
use crate::resources::input::InputState;
use crate::resources::savemanager::{FileSettings, SaveData, SaveError, SaveManager};
use crate::resources::worldtime::WorldTime;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no scene registered under '{0}'")]
    Unknown(String),
    #[error("{0}")]
    Content(String),
    #[error(transparent)]
    Animation(#[from] AnimationError),
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Lifecycle of a scene.
///
/// Call order guaranteed by [`App`](crate::app::App):
/// `initialize` once, then per tick `on_focus_change` (only when pausing on
/// unfocus is enabled), `should_update` and `update`; `draw` once per
/// presented frame; `dispose` once, before the next scene's `initialize`.
pub trait Scene {
    /// Set up state and load content. Runs once, when the scene becomes active.
    fn initialize(&mut self, ctx: &mut SceneContext) -> Result<(), SceneError>;

    fn update(&mut self, ctx: &mut SceneContext, delta_time: f32);

    /// Draw into the intermediate surface. The surface is already cleared.
    fn draw(&mut self, canvas: &mut dyn Canvas);

    /// Window focus state, reported every tick while pausing on unfocus.
    fn on_focus_change(&mut self, _focused: bool) {}

    /// Whether `update` should run this tick.
    ///
    /// `window_focused` is the focus the scene should honor: always `true`
    /// when pausing on unfocus is disabled.
    fn should_update(&self, window_focused: bool) -> bool {
        window_focused
    }

    /// Release resources. The scene is dropped right after.
    fn dispose(&mut self, _ctx: &mut SceneContext) {}
}

pub type SceneFactory = Box<dyn Fn() -> Box<dyn Scene>>;

/// Scene factories keyed by name.
#[derive(Default)]
pub struct SceneStore {
    factories: FxHashMap<String, SceneFactory>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register<S, F>(&mut self, name: impl Into<String>, factory: F)
    where
        S: Scene + 'static,
        F: Fn() -> S + 'static,
    {
        let factory: SceneFactory = Box::new(move || -> Box<dyn Scene> { Box::new(factory()) });
        self.factories.insert(name.into(), factory);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<S, F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        S: Scene + 'static,
        F: Fn() -> S + 'static,
    {
        self.register(name, factory);
        self
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.factories.contains_key(name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build a fresh instance of the named scene.
    pub fn build(&self, name: &str) -> Option<Box<dyn Scene>> {
        self.factories.get(name).map(|factory| factory())
    }
}

/// A scene that was requested but not yet activated.
pub struct PendingScene {
    pub name: String,
    pub scene: Box<dyn Scene>,
}

/// Everything a scene may read or change, owned by the application core.
pub struct SceneContext {
    scenes: SceneStore,
    pending: Option<PendingScene>,
    active_name: Option<String>,
    pub(crate) time: WorldTime,
    pub(crate) input: InputState,
    pub(crate) exit_requested: bool,
    pub(crate) pause_on_unfocus: bool,
    pub(crate) window_focused: bool,
    pub(crate) render_size: (u32, u32),
    saves: SaveManager,
    rng: fastrand::Rng,
}

impl SceneContext {
    pub fn new(scenes: SceneStore, saves: SaveManager) -> Self {
        Self {
            scenes,
            pending: None,
            active_name: None,
            time: WorldTime::default(),
            input: InputState::default(),
            exit_requested: false,
            pause_on_unfocus: saves.settings().pause_on_uf,
            window_focused: true,
            render_size: (0, 0),
            saves,
            rng: fastrand::Rng::new(),
        }
    }

    /// Use a seeded random generator, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Ask for `name` to become the active scene on the next tick.
    ///
    /// Requesting the active scene does nothing. Otherwise a fresh instance
    /// is built and replaces any earlier pending request.
    pub fn request_scene_change(&mut self, name: &str) -> Result<(), SceneError> {
        if self.active_name.as_deref() == Some(name) {
            debug!("Scene '{}' is already active, request ignored", name);
            return Ok(());
        }
        let scene = self
            .scenes
            .build(name)
            .ok_or_else(|| SceneError::Unknown(name.to_string()))?;
        let replaced = self.pending.replace(PendingScene {
            name: name.to_string(),
            scene,
        });
        match replaced {
            Some(previous) => info!(
                "Scene change to '{}' replaces pending '{}'",
                name, previous.name
            ),
            None => debug!("Scene change to '{}' pending", name),
        }
        Ok(())
    }

    /// Name of the scene waiting to become active.
    pub fn pending_scene(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.name.as_str())
    }

    pub fn active_scene(&self) -> Option<&str> {
        self.active_name.as_deref()
    }

    /// Remove the pending request. Clearing an empty slot is a no-op.
    pub(crate) fn take_pending(&mut self) -> Option<PendingScene> {
        self.pending.take()
    }

    pub(crate) fn set_active_name(&mut self, name: Option<String>) {
        self.active_name = name;
    }

    pub fn scenes(&self) -> &SceneStore {
        &self.scenes
    }

    /// Stop the loop at the start of the next tick.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn pause_on_unfocus(&self) -> bool {
        self.pause_on_unfocus
    }

    pub fn set_pause_on_unfocus(&mut self, pause: bool) {
        self.pause_on_unfocus = pause;
    }

    /// Focus reported by the platform on the last tick.
    pub fn window_focused(&self) -> bool {
        self.window_focused
    }

    /// Size of the surface `draw` renders into. Zero until an
    /// [`App`](crate::app::App) owns the context.
    pub fn render_size(&self) -> (u32, u32) {
        self.render_size
    }

    /// Seconds elapsed in the most recent tick.
    pub fn delta_time(&self) -> f32 {
        self.time.delta
    }

    pub fn time(&self) -> &WorldTime {
        &self.time
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn rng(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }

    /// Uniform random value in `min..max`.
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.rng.f32() * (max - min)
    }

    pub fn settings(&self) -> &FileSettings {
        self.saves.settings()
    }

    pub fn settings_mut(&mut self) -> &mut FileSettings {
        self.saves.settings_mut()
    }

    pub fn save_data(&self) -> &SaveData {
        self.saves.save_data()
    }

    pub fn save_data_mut(&mut self) -> &mut SaveData {
        self.saves.save_data_mut()
    }

    pub fn saves(&self) -> &SaveManager {
        &self.saves
    }

    pub fn saves_mut(&mut self) -> &mut SaveManager {
        &mut self.saves
    }

    /// Persist settings and save data.
    pub fn save(&mut self) -> Result<(), SaveError> {
        self.saves.save()
    }
}
