/// The view state machine: input events in, frames out through a `Renderer`
use log::{debug, error};

use crate::config::ViewConfig;
use crate::error::Result;
use crate::projection::Camera;
use crate::rig::RotateDirection;
use crate::scene::{Scene, SceneContext};
use crate::scheduler::FrameScheduler;

/// Anything that can draw a scene: a terminal rasterizer, a WebGL context, a
/// test double.
pub trait Renderer {
    /// The output surface changed size
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Draw one frame
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()>;
}

/// Input delivered by the host, in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    RotateLeft,
    RotateRight,
    /// Pointer drag in pixels since the previous drag event
    Drag { dx: f32, dy: f32 },
    /// Wheel notches, positive towards the scene
    Zoom { notches: f32 },
    Resize { width: u32, height: u32 },
}

pub struct Viewer<R: Renderer> {
    context: SceneContext,
    scheduler: FrameScheduler,
    renderer: R,
    frames: u64,
}

impl<R: Renderer> Viewer<R> {
    /// Bring up a view. `create` checks the host and builds the renderer; if it
    /// fails no scene is composed and the error is returned as is.
    pub fn launch<F>(config: &ViewConfig, create: F) -> Result<Self>
    where
        F: FnOnce(&ViewConfig) -> Result<R>,
    {
        let renderer = create(config).map_err(|err| {
            error!("{}", err);
            err
        })?;
        Self::new(config, renderer)
    }

    /// Compose the configured scene around an existing renderer and queue the
    /// first frame.
    pub fn new(config: &ViewConfig, mut renderer: R) -> Result<Self> {
        let context = SceneContext::new(config)?;
        renderer.resize(config.width, config.height)?;

        let mut viewer = Self {
            context,
            scheduler: FrameScheduler::new(config.redraw_policy()),
            renderer,
            frames: 0,
        };
        if viewer.scheduler.notify_change() {
            viewer.draw()?;
        }
        Ok(viewer)
    }

    /// Apply one input event. Returns `true` when view state changed.
    pub fn handle(&mut self, event: ViewEvent) -> Result<bool> {
        let changed = match event {
            ViewEvent::RotateLeft => self.context.rotate(RotateDirection::Left),
            ViewEvent::RotateRight => self.context.rotate(RotateDirection::Right),
            ViewEvent::Drag { dx, dy } => self.context.drag(dx, dy),
            ViewEvent::Zoom { notches } => self.context.zoom(notches),
            ViewEvent::Resize { width, height } => {
                self.context.resize(width, height);
                self.renderer.resize(width, height)?;
                self.draw()?;
                return Ok(true);
            }
        };

        if changed && self.scheduler.notify_change() {
            self.draw()?;
        }
        Ok(changed)
    }

    /// Timer or animation-frame callback. Returns `true` if a frame was drawn.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.scheduler.on_tick() {
            return Ok(false);
        }
        self.draw()?;
        Ok(true)
    }

    fn draw(&mut self) -> Result<()> {
        self.renderer
            .render(&self.context.scene, &self.context.camera)?;
        self.scheduler.mark_rendered();
        self.frames += 1;
        debug!("frame {} at azimuth {:.3}", self.frames, self.context.azimuth());
        Ok(())
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
