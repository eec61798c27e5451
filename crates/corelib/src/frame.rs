//! Render/animation loop.
//!
//! The loop does not own a thread or a timer. A host frame driver calls
//! [`FrameLoop::tick`] once per display refresh, and each tick asks the host
//! for the next one through [`FrameScheduler`]. A tick that fails never
//! reaches that request, so the chain ends there, and the loop refuses any
//! later tick the host delivers on its own.

use crate::animation::animate;
use crate::camera::PerspectiveCamera;
use crate::scene::Scene;
use crate::state::SceneState;

/// Drawable surface with a backing resolution that may lag behind the size
/// it is displayed at.
pub trait OutputSurface {
    fn backing_size(&self) -> (u32, u32);
    fn display_size(&self) -> (u32, u32);
    fn resize_backing(&mut self, width: u32, height: u32);
}

pub trait SceneRenderer {
    type Error;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), Self::Error>;
}

/// Host facility that runs the next tick before the next repaint.
pub trait FrameScheduler {
    fn request_frame(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

#[derive(Debug)]
pub enum TickError<E> {
    /// Tick arrived while the loop was idle.
    NotRunning,
    /// Tick arrived after an earlier tick failed.
    Stopped,
    Scene(crate::CoreError),
    Render(E),
}

impl<E: std::fmt::Display> std::fmt::Display for TickError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickError::NotRunning => write!(f, "frame loop has not been started"),
            TickError::Stopped => write!(f, "frame loop stopped after an earlier failure"),
            TickError::Scene(e) => write!(f, "animation failed: {e}"),
            TickError::Render(e) => write!(f, "render failed: {e}"),
        }
    }
}

#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
    stopped: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            frames: 0,
            stopped: false,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames rendered so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// True once a tick has failed. The loop stays `Running` but never
    /// renders again.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Idle -> Running, requesting the first frame. Returns `false` (and
    /// schedules nothing) if the loop was already running.
    pub fn start(&mut self, scheduler: &impl FrameScheduler) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        scheduler.request_frame();
        true
    }

    /// One frame at `t` seconds: resize, animate, render, reschedule.
    ///
    /// While the surface is displayed at zero area (minimized) the tick does
    /// nothing and schedules nothing; the host requests a frame again once
    /// the surface has a size.
    pub fn tick<T, S>(
        &mut self,
        state: &mut SceneState,
        target: &mut T,
        scheduler: &S,
        t: f32,
    ) -> Result<(), TickError<T::Error>>
    where
        T: OutputSurface + SceneRenderer,
        S: FrameScheduler,
    {
        if self.state != LoopState::Running {
            return Err(TickError::NotRunning);
        }
        if self.stopped {
            return Err(TickError::Stopped);
        }
        let (width, height) = target.display_size();
        if width == 0 || height == 0 {
            return Ok(());
        }

        sync_surface_size(target, &mut state.camera);
        let rendered = animate(state, t)
            .map_err(TickError::Scene)
            .and_then(|()| {
                target
                    .render(&state.scene, &state.camera)
                    .map_err(TickError::Render)
            });
        if let Err(e) = rendered {
            self.stopped = true;
            return Err(e);
        }
        self.frames += 1;

        scheduler.request_frame();
        Ok(())
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Matches the backing resolution to the displayed size and refreshes the
/// camera's aspect. Returns whether a resize happened. Zero-area sizes
/// (minimized windows) are left alone.
pub fn sync_surface_size<S: OutputSurface>(surface: &mut S, camera: &mut PerspectiveCamera) -> bool {
    let display = surface.display_size();
    if surface.backing_size() == display || display.0 == 0 || display.1 == 0 {
        return false;
    }
    surface.resize_backing(display.0, display.1);
    camera.aspect = display.0 as f32 / display.1 as f32;
    camera.update_projection();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{GeometryId, MaterialId, SceneObject};
    use crate::transform::Transform;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeTarget {
        backing: (u32, u32),
        display: (u32, u32),
        resizes: u32,
        renders: u32,
        fail_render: bool,
    }

    impl OutputSurface for FakeTarget {
        fn backing_size(&self) -> (u32, u32) {
            self.backing
        }
        fn display_size(&self) -> (u32, u32) {
            self.display
        }
        fn resize_backing(&mut self, width: u32, height: u32) {
            self.backing = (width, height);
            self.resizes += 1;
        }
    }

    impl SceneRenderer for FakeTarget {
        type Error = &'static str;
        fn render(&mut self, _: &Scene, _: &PerspectiveCamera) -> Result<(), Self::Error> {
            if self.fail_render {
                return Err("device lost");
            }
            self.renders += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingScheduler(Cell<u32>);

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn state() -> SceneState {
        let mut scene = Scene::new();
        let cubes = [0.0, -2.0, 2.0].map(|x| {
            scene.add(SceneObject::mesh(
                GeometryId(0),
                MaterialId(0),
                Transform::from_translation(crate::vec3(x, 0.0, 0.0)),
            ))
        });
        SceneState::new(scene, PerspectiveCamera::new(75.0, 2.0, 0.1, 200.0), cubes).unwrap()
    }

    #[test]
    fn idle_loop_refuses_ticks() {
        let mut lp = FrameLoop::new();
        let mut s = state();
        let mut target = FakeTarget::default();
        let sched = CountingScheduler::default();
        assert!(matches!(
            lp.tick(&mut s, &mut target, &sched, 1.0),
            Err(TickError::NotRunning)
        ));
        assert_eq!(target.renders, 0);
        assert_eq!(sched.0.get(), 0);
    }

    #[test]
    fn start_schedules_once() {
        let mut lp = FrameLoop::new();
        let sched = CountingScheduler::default();
        assert!(lp.start(&sched));
        assert!(!lp.start(&sched));
        assert_eq!(lp.state(), LoopState::Running);
        assert_eq!(sched.0.get(), 1);
    }

    #[test]
    fn first_frame_at_800x600() {
        let mut lp = FrameLoop::new();
        let mut s = state();
        let mut target = FakeTarget {
            backing: (300, 150),
            display: (800, 600),
            ..Default::default()
        };
        let sched = CountingScheduler::default();
        lp.start(&sched);
        lp.tick(&mut s, &mut target, &sched, 1.0).unwrap();

        assert_eq!(target.backing, (800, 600));
        assert!((s.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        let rot = |i: usize| s.scene.get(s.cubes[i]).unwrap().transform.rotation_euler;
        assert!((rot(0).x - 1.0).abs() < 1e-6 && (rot(0).y - 1.0).abs() < 1e-6);
        assert!((rot(1).x - 1.1).abs() < 1e-6 && (rot(1).y - 1.1).abs() < 1e-6);
        assert!((rot(2).x - 1.2).abs() < 1e-6 && (rot(2).y - 1.2).abs() < 1e-6);
        assert_eq!(target.renders, 1);
        assert_eq!(sched.0.get(), 2);
        assert_eq!(lp.frames(), 1);
    }

    #[test]
    fn resize_only_when_sizes_differ() {
        let mut lp = FrameLoop::new();
        let mut s = state();
        let mut target = FakeTarget {
            backing: (800, 600),
            display: (800, 600),
            ..Default::default()
        };
        let sched = CountingScheduler::default();
        lp.start(&sched);

        lp.tick(&mut s, &mut target, &sched, 0.1).unwrap();
        assert_eq!(target.resizes, 0);
        assert_eq!(s.camera.aspect, 2.0);

        target.display = (1000, 500);
        lp.tick(&mut s, &mut target, &sched, 0.2).unwrap();
        assert_eq!(target.resizes, 1);
        assert_eq!(s.camera.aspect, 2.0);
        let proj_after_resize = s.camera.proj();

        target.display = (900, 900);
        lp.tick(&mut s, &mut target, &sched, 0.3).unwrap();
        assert_eq!(target.resizes, 2);
        assert_eq!(s.camera.aspect, 1.0);
        assert_ne!(s.camera.proj(), proj_after_resize);

        lp.tick(&mut s, &mut target, &sched, 0.4).unwrap();
        assert_eq!(target.resizes, 2);
    }

    #[test]
    fn minimized_window_keeps_old_size() {
        let mut cam = PerspectiveCamera::new(75.0, 2.0, 0.1, 200.0);
        let mut target = FakeTarget {
            backing: (800, 600),
            display: (0, 0),
            ..Default::default()
        };
        assert!(!sync_surface_size(&mut target, &mut cam));
        assert_eq!(target.backing, (800, 600));
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn render_failure_ends_the_chain() {
        let mut lp = FrameLoop::new();
        let mut s = state();
        let mut target = FakeTarget {
            backing: (800, 600),
            display: (800, 600),
            fail_render: true,
            ..Default::default()
        };
        let sched = CountingScheduler::default();
        lp.start(&sched);
        let err = lp.tick(&mut s, &mut target, &sched, 0.5).unwrap_err();
        assert!(matches!(err, TickError::Render("device lost")));
        assert_eq!(err.to_string(), "render failed: device lost");
        // Only the request made by start(); the failed tick scheduled nothing.
        assert_eq!(sched.0.get(), 1);
        assert_eq!(lp.frames(), 0);
        assert!(lp.is_stopped());
    }

    #[test]
    fn redraw_after_failure_does_not_revive_the_chain() {
        let mut lp = FrameLoop::new();
        let mut s = state();
        let mut target = FakeTarget {
            backing: (800, 600),
            display: (800, 600),
            fail_render: true,
            ..Default::default()
        };
        let sched = CountingScheduler::default();
        lp.start(&sched);
        assert!(lp.tick(&mut s, &mut target, &sched, 0.5).is_err());

        // An expose or resize redraw from the window system.
        target.fail_render = false;
        let err = lp.tick(&mut s, &mut target, &sched, 0.6).unwrap_err();
        assert!(matches!(err, TickError::Stopped));
        assert_eq!(target.renders, 0);
        assert_eq!(sched.0.get(), 1);
        assert_eq!(lp.state(), LoopState::Running);
        assert!(!lp.start(&sched));
        assert_eq!(sched.0.get(), 1);
    }

    #[test]
    fn minimized_surface_skips_the_frame_and_the_reschedule() {
        let mut lp = FrameLoop::new();
        let mut s = state();
        let mut target = FakeTarget {
            backing: (800, 600),
            display: (0, 0),
            ..Default::default()
        };
        let sched = CountingScheduler::default();
        lp.start(&sched);

        lp.tick(&mut s, &mut target, &sched, 1.0).unwrap();
        assert_eq!(target.renders, 0);
        assert_eq!(target.resizes, 0);
        assert_eq!(sched.0.get(), 1);
        let cube = s.scene.get(s.cubes[0]).unwrap().transform.rotation_euler;
        assert_eq!(cube, crate::Vec3::ZERO);

        // Restored: the host's redraw picks the chain back up.
        target.display = (800, 600);
        lp.tick(&mut s, &mut target, &sched, 2.0).unwrap();
        assert_eq!(target.renders, 1);
        assert_eq!(sched.0.get(), 2);
        assert!(!lp.is_stopped());
    }
}
