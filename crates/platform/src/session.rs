//! Application state between the window and the GPU: scene, camera
//! controls, model load progress and the frame loop.

use asset::LoadError;
use asset::mtl::MaterialLibrary;
use asset::obj::ObjModel;
use asset::sequence::{LoadSequence, LoadStep, ModelRequest};
use corelib::Vec2;
use corelib::controls::OrbitControls;
use corelib::frame::{FrameLoop, FrameScheduler, LoopState, OutputSurface, SceneRenderer, TickError};
use corelib::scene::ObjectId;
use corelib::state::SceneState;
use renderer::ResourceSink;

use crate::model::instantiate_model;

/// What a finished load step led to.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Run this step next.
    Next(LoadStep),
    /// Model is in the scene and the frame loop has been started.
    Attached(ObjectId),
    /// Loading gave up; nothing further will be dispatched.
    Stalled,
}

pub struct Session {
    state: SceneState,
    controls: OrbitControls,
    frame_loop: FrameLoop,
    loading: LoadSequence,
    animate_without_model: bool,
}

impl Session {
    pub fn new(state: SceneState, request: ModelRequest, animate_without_model: bool) -> Self {
        let controls = OrbitControls::new(&state.camera, state.camera.target);
        Self {
            state,
            controls,
            frame_loop: FrameLoop::new(),
            loading: LoadSequence::new(request),
            animate_without_model,
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn loop_state(&self) -> LoopState {
        self.frame_loop.state()
    }

    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }

    pub fn loading(&self) -> &LoadSequence {
        &self.loading
    }

    pub fn first_step(&self) -> LoadStep {
        self.loading.first_step()
    }

    pub fn on_materials(
        &mut self,
        result: anyhow::Result<MaterialLibrary>,
        scheduler: &impl FrameScheduler,
    ) -> LoadOutcome {
        if let Ok(library) = &result {
            log::info!("Material library loaded: {} materials", library.materials.len());
        }
        match self.loading.on_materials(result) {
            Ok(step) => LoadOutcome::Next(step),
            Err(e) => self.stall(e, scheduler),
        }
    }

    /// Uploads the model, attaches it and starts the frame loop.
    pub fn on_geometry<R: ResourceSink>(
        &mut self,
        result: anyhow::Result<ObjModel>,
        resources: &mut R,
        scheduler: &impl FrameScheduler,
    ) -> LoadOutcome {
        let loaded = match self.loading.on_geometry(result) {
            Ok(loaded) => loaded,
            Err(e) => return self.stall(e, scheduler),
        };
        log::info!(
            "Geometry loaded: {} groups, {} vertices",
            loaded.geometry.groups.len(),
            loaded.geometry.vertex_count()
        );

        let object = instantiate_model(resources, &loaded);
        let id = match self.state.attach_model(object) {
            Ok(id) => id,
            Err(e) => {
                log::error!("Could not attach model: {e}");
                return LoadOutcome::Stalled;
            }
        };
        self.frame_loop.start(scheduler);
        LoadOutcome::Attached(id)
    }

    fn stall(&mut self, error: LoadError, scheduler: &impl FrameScheduler) -> LoadOutcome {
        log::error!("Model load failed: {error}");
        if self.animate_without_model && self.frame_loop.start(scheduler) {
            log::warn!("Animating without the model");
        }
        LoadOutcome::Stalled
    }

    /// One tick at `t` seconds since startup.
    pub fn frame<T, S>(
        &mut self,
        target: &mut T,
        scheduler: &S,
        t: f32,
    ) -> Result<(), TickError<T::Error>>
    where
        T: OutputSurface + SceneRenderer,
        S: FrameScheduler,
    {
        self.frame_loop.tick(&mut self.state, target, scheduler, t)
    }

    /// A minimized surface suspends the chain without ending it; the first
    /// non-empty size asks for a frame again.
    pub fn resume_after_resize(&self, width: u32, height: u32, scheduler: &impl FrameScheduler) {
        if width > 0
            && height > 0
            && self.frame_loop.state() == LoopState::Running
            && !self.frame_loop.is_stopped()
        {
            scheduler.request_frame();
        }
    }

    pub fn orbit(&mut self, delta: Vec2, surface_height: f32) {
        self.controls.rotate(delta, surface_height);
        self.controls.apply(&mut self.state.camera);
    }

    pub fn pan(&mut self, delta: Vec2, surface_height: f32) {
        self.controls.pan(delta, &self.state.camera, surface_height);
        self.controls.apply(&mut self.state.camera);
    }

    pub fn dolly(&mut self, notches: f32) {
        self.controls.dolly(notches);
        self.controls.apply(&mut self.state.camera);
    }
}
