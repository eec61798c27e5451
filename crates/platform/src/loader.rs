//! Background asset loading. Each step runs on its own worker thread and
//! reports back to the event loop as a user event.

use std::thread;

use anyhow::anyhow;
use asset::mtl::MaterialLibrary;
use asset::obj::{ObjModel, load_obj_from_path};
use asset::sequence::LoadStep;
use winit::event_loop::{EventLoopClosed, EventLoopProxy};

/// Results delivered to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    Materials(anyhow::Result<MaterialLibrary>),
    Geometry(anyhow::Result<ObjModel>),
}

/// Starts `step` on a worker thread. Completion, success or not, arrives as
/// exactly one [`AppEvent`].
pub fn dispatch(step: LoadStep, proxy: &EventLoopProxy<AppEvent>) {
    let worker_proxy = proxy.clone();
    let materials = matches!(step, LoadStep::Materials(_));
    let name = if materials { "load-materials" } else { "load-geometry" };
    log::info!("Loading {}", describe(&step));

    let spawned = thread::Builder::new()
        .name(name.to_owned())
        .spawn(move || {
            let event = run_step(step);
            delivered(worker_proxy.send_event(event));
        });

    if let Err(e) = spawned {
        let reason = anyhow!("Failed to spawn {name} worker: {e}");
        let event = if materials {
            AppEvent::Materials(Err(reason))
        } else {
            AppEvent::Geometry(Err(reason))
        };
        delivered(proxy.send_event(event));
    }
}

/// Logs an event the closed loop could not take. Returns whether it was
/// delivered.
fn delivered(sent: Result<(), EventLoopClosed<AppEvent>>) -> bool {
    match sent {
        Ok(()) => true,
        Err(EventLoopClosed(event)) => {
            log::debug!("Event loop closed; dropped {}", event.kind());
            false
        }
    }
}

impl AppEvent {
    fn kind(&self) -> &'static str {
        match self {
            AppEvent::Materials(_) => "material result",
            AppEvent::Geometry(_) => "geometry result",
        }
    }
}

/// Blocking body of a step.
pub fn run_step(step: LoadStep) -> AppEvent {
    match step {
        LoadStep::Materials(path) => AppEvent::Materials(MaterialLibrary::load(path)),
        LoadStep::Geometry(path) => AppEvent::Geometry(load_obj_from_path(path)),
    }
}

fn describe(step: &LoadStep) -> String {
    match step {
        LoadStep::Materials(path) => format!("materials from {}", path.display()),
        LoadStep::Geometry(path) => format!("geometry from {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_files_report_errors() {
        let event = run_step(LoadStep::Materials("/nonexistent/cat.mtl".into()));
        assert!(matches!(event, AppEvent::Materials(Err(_))));

        let event = run_step(LoadStep::Geometry("/nonexistent/cat.obj".into()));
        let AppEvent::Geometry(Err(e)) = event else {
            panic!("expected geometry error");
        };
        assert!(format!("{e:#}").contains("cat.obj"));
    }

    #[test]
    fn undeliverable_events_are_reported() {
        assert!(delivered(Ok(())));
        let closed = EventLoopClosed(AppEvent::Geometry(Err(anyhow!("spawn failed"))));
        assert!(!delivered(Err(closed)));
        assert_eq!(AppEvent::Materials(Err(anyhow!("x"))).kind(), "material result");
    }

    #[test]
    fn steps_read_from_disk() {
        let dir = std::env::temp_dir().join(format!("catscene-loader-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mtl = dir.join("cat.mtl");
        let obj = dir.join("cat.obj");
        fs::write(&mtl, "newmtl Fur\nKd 0.5 0.5 0.5\n").unwrap();
        fs::write(&obj, "v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Fur\nf 1 2 3\n").unwrap();

        let AppEvent::Materials(Ok(library)) = run_step(LoadStep::Materials(mtl)) else {
            panic!("expected materials");
        };
        assert!(library.get("Fur").is_some());

        let AppEvent::Geometry(Ok(model)) = run_step(LoadStep::Geometry(obj)) else {
            panic!("expected geometry");
        };
        assert_eq!(model.groups.len(), 1);
        assert_eq!(model.groups[0].material.as_deref(), Some("Fur"));

        fs::remove_dir_all(&dir).ok();
    }
}
