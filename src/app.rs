//! Application core.
//!
//! [`App`] owns the active scene and the [`SceneContext`], and drives one
//! tick of the loop per host frame:
//!
//! 1. advance the frame clock and derive `delta_time`
//! 2. poll input and pump audio on the [`Platform`]
//! 3. stop if an exit was requested
//! 4. apply a pending scene change (dispose old, then initialize new)
//! 5. report window focus to the scene when pausing on unfocus
//! 6. update the scene if it is eligible
//!
//! [`App::draw`] renders the active scene into the intermediate surface and
//! composites it onto the output.
//!
//! The host owns the `App` value and passes nothing global around; several
//! instances can coexist.

use log::{debug, info};
use raylib::prelude::Color;
use thiserror::Error;

use crate::platform::{Frame, Platform};
use crate::resources::savemanager::{SaveError, SaveManager};
use crate::scene::{PendingScene, Scene, SceneContext, SceneError, SceneStore};

/// Color the intermediate surface and the output are cleared with.
pub const CLEAR_COLOR: Color = Color::BLACK;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("scene '{scene}' failed to initialize: {source}")]
    Transition {
        scene: String,
        #[source]
        source: SceneError,
    },
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("platform error: {0}")]
    Platform(String),
}

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Exit,
}

pub struct App<P: Platform> {
    platform: P,
    context: SceneContext,
    active: Option<Box<dyn Scene>>,
}

impl<P: Platform> App<P> {
    pub fn new(platform: P, scenes: SceneStore, saves: SaveManager) -> Self {
        Self::with_context(platform, SceneContext::new(scenes, saves))
    }

    pub fn with_context(platform: P, mut context: SceneContext) -> Self {
        context.render_size = platform.render_size();
        Self {
            platform,
            context,
            active: None,
        }
    }

    /// Apply persisted player settings to the platform.
    ///
    /// When the save store had to create its files, the settings are first
    /// seeded from the detected display mode and persisted.
    pub fn initialize(&mut self) -> Result<(), AppError> {
        if self.context.saves().was_freshly_created() {
            let (width, height) = self.platform.display_mode();
            let settings = self.context.settings_mut();
            settings.window_resolution_width = width;
            settings.window_resolution_height = height;
            self.context.save()?;
            info!("Seeded settings from display mode {}x{}", width, height);
        }

        let settings = self.context.settings().clone();
        if let Some((width, height)) = settings.window_resolution() {
            self.platform.set_output_size(width, height);
        }
        self.platform.set_fullscreen(settings.is_fullscreen);
        self.context.set_pause_on_unfocus(settings.pause_on_uf);
        info!(
            "App initialized: fullscreen={}, pause_on_unfocus={}",
            settings.is_fullscreen, settings.pause_on_uf
        );
        Ok(())
    }

    /// Run one tick with the host's frame time in seconds.
    pub fn tick(&mut self, frame_time: f32) -> Result<LoopState, AppError> {
        self.context.time.advance(frame_time);

        self.platform.poll_input(&mut self.context.input);
        self.platform.update_audio();

        if self.context.exit_requested {
            info!("Exit requested, stopping the loop");
            self.platform.request_close();
            return Ok(LoopState::Exit);
        }

        if let Some(pending) = self.context.take_pending() {
            self.transition(pending)?;
        }

        let window_focused = self.platform.has_focus();
        self.context.window_focused = window_focused;
        let pause_on_unfocus = self.context.pause_on_unfocus;
        let delta_time = self.context.time.delta;

        let Some(scene) = self.active.as_mut() else {
            return Ok(LoopState::Running);
        };
        if pause_on_unfocus {
            scene.on_focus_change(window_focused);
        }
        if scene.should_update(window_focused || !pause_on_unfocus) {
            scene.update(&mut self.context, delta_time);
        }
        Ok(LoopState::Running)
    }

    /// Replace the active scene with `pending`.
    ///
    /// The outgoing scene is disposed and dropped before the incoming one is
    /// initialized. A failing `initialize` leaves the new scene installed and
    /// is returned to the host; the old scene cannot be restored.
    fn transition(&mut self, pending: PendingScene) -> Result<(), AppError> {
        let PendingScene { name, scene } = pending;

        if let Some(mut outgoing) = self.active.take() {
            let outgoing_name = self.context.active_scene().unwrap_or("?").to_string();
            self.context.set_active_name(None);
            outgoing.dispose(&mut self.context);
            drop(outgoing);
            debug!("Disposed scene '{}'", outgoing_name);
        }

        info!("Transitioning to scene '{}'", name);
        self.context.set_active_name(Some(name.clone()));
        let scene = self.active.insert(scene);
        scene
            .initialize(&mut self.context)
            .map_err(|source| AppError::Transition {
                scene: name,
                source,
            })
    }

    /// Present one frame.
    ///
    /// The intermediate surface is cleared, the active scene draws into it,
    /// and the result is composited onto the output.
    pub fn draw(&mut self) {
        let active = &mut self.active;
        let mut frame = self.platform.begin_frame();
        frame.draw_intermediate(&mut |canvas| {
            canvas.clear(CLEAR_COLOR);
            if let Some(scene) = active.as_mut() {
                scene.draw(canvas);
            }
        });
        frame.composite(CLEAR_COLOR);
    }

    /// Ask for the named scene to become active on the next tick.
    pub fn request_scene_change(&mut self, name: &str) -> Result<(), SceneError> {
        self.context.request_scene_change(name)
    }

    /// Dispose the active scene and persist settings and save data.
    pub fn shutdown(&mut self) -> Result<(), AppError> {
        if let Some(mut scene) = self.active.take() {
            scene.dispose(&mut self.context);
            self.context.set_active_name(None);
        }
        self.context.save()?;
        info!("App shut down");
        Ok(())
    }

    /// Seconds elapsed in the most recent tick.
    pub fn delta_time(&self) -> f32 {
        self.context.delta_time()
    }

    pub fn exit_requested(&self) -> bool {
        self.context.exit_requested()
    }

    pub fn set_exit_requested(&mut self, exit: bool) {
        self.context.exit_requested = exit;
    }

    pub fn pause_on_unfocus(&self) -> bool {
        self.context.pause_on_unfocus()
    }

    pub fn set_pause_on_unfocus(&mut self, pause: bool) {
        self.context.set_pause_on_unfocus(pause);
    }

    pub fn active_scene(&self) -> Option<&str> {
        self.context.active_scene()
    }

    pub fn pending_scene(&self) -> Option<&str> {
        self.context.pending_scene()
    }

    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.context
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
