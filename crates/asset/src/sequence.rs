//! Two-stage model load: the material library first, then the geometry
//! bound to it.
//!
//! The sequence performs no I/O itself. It says which step to run next and
//! absorbs the results, so the caller decides where the work happens.

use std::path::PathBuf;
use std::sync::Arc;

use crate::LoadError;
use crate::mtl::MaterialLibrary;
use crate::obj::ObjModel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelRequest {
    pub material_path: PathBuf,
    pub geometry_path: PathBuf,
}

/// Work the caller should perform next.
#[derive(Clone, Debug)]
pub enum LoadStep {
    Materials(PathBuf),
    /// Geometry to bind to the library the sequence now holds.
    Geometry(PathBuf),
}

/// Geometry bound to the material library it was loaded against.
#[derive(Clone, Debug)]
pub struct LoadedModel {
    pub geometry: ObjModel,
    pub materials: Arc<MaterialLibrary>,
}

#[derive(Clone, Debug)]
pub enum LoadState {
    PendingMaterial,
    PendingGeometry(Arc<MaterialLibrary>),
    Ready,
    Failed(LoadError),
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            LoadState::PendingMaterial => "pending-material",
            LoadState::PendingGeometry(_) => "pending-geometry",
            LoadState::Ready => "ready",
            LoadState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug)]
pub struct LoadSequence {
    request: ModelRequest,
    state: LoadState,
}

impl LoadSequence {
    pub fn new(request: ModelRequest) -> Self {
        Self {
            request,
            state: LoadState::PendingMaterial,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn request(&self) -> &ModelRequest {
        &self.request
    }

    pub fn first_step(&self) -> LoadStep {
        LoadStep::Materials(self.request.material_path.clone())
    }

    /// True once a step has failed. Nothing moves the sequence out of this
    /// state.
    pub fn is_stalled(&self) -> bool {
        matches!(self.state, LoadState::Failed(_))
    }

    pub fn on_materials(
        &mut self,
        result: anyhow::Result<MaterialLibrary>,
    ) -> Result<LoadStep, LoadError> {
        if !matches!(self.state, LoadState::PendingMaterial) {
            return Err(self.out_of_order("pending-material"));
        }
        match result {
            Ok(library) => {
                self.state = LoadState::PendingGeometry(Arc::new(library));
                Ok(LoadStep::Geometry(self.request.geometry_path.clone()))
            }
            Err(e) => Err(self.fail(LoadError::Material {
                path: self.request.material_path.clone(),
                reason: format!("{e:#}"),
            })),
        }
    }

    pub fn on_geometry(
        &mut self,
        result: anyhow::Result<ObjModel>,
    ) -> Result<LoadedModel, LoadError> {
        let LoadState::PendingGeometry(materials) = &self.state else {
            return Err(self.out_of_order("pending-geometry"));
        };
        let materials = Arc::clone(materials);
        match result {
            Ok(geometry) => {
                self.state = LoadState::Ready;
                Ok(LoadedModel {
                    geometry,
                    materials,
                })
            }
            Err(e) => Err(self.fail(LoadError::Geometry {
                path: self.request.geometry_path.clone(),
                reason: format!("{e:#}"),
            })),
        }
    }

    fn fail(&mut self, error: LoadError) -> LoadError {
        self.state = LoadState::Failed(error.clone());
        error
    }

    fn out_of_order(&self, expected: &'static str) -> LoadError {
        LoadError::OutOfOrder {
            expected,
            state: self.state.name(),
        }
    }
}
