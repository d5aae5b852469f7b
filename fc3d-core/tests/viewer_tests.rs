use fc3d_core::{
    Camera, ControlMode, Error, RedrawPolicy, Renderer, Result, Scene, ViewConfig, ViewEvent,
    Viewer,
};
use nalgebra::Point3;
use std::f32::consts::PI;

/// Records every frame instead of drawing it
#[derive(Default)]
struct Recorder {
    renders: usize,
    cameras: Vec<Point3<f32>>,
    targets: Vec<Point3<f32>>,
    aspects: Vec<f32>,
    sizes: Vec<(u32, u32)>,
}

impl Renderer for Recorder {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.sizes.push((width, height));
        Ok(())
    }

    fn render(&mut self, _scene: &Scene, camera: &Camera) -> Result<()> {
        // Build the matrices every real back end needs
        camera.view_projection();
        self.renders += 1;
        self.cameras.push(camera.position);
        self.targets.push(camera.target);
        self.aspects.push(camera.aspect);
        Ok(())
    }
}

fn keys_viewer() -> Viewer<Recorder> {
    let mut viewer = Viewer::new(&ViewConfig::default(), Recorder::default()).unwrap();
    // Flush the initial frame
    assert!(viewer.tick().unwrap());
    viewer
}

#[test]
fn forty_left_steps_turn_one_radian() {
    let mut viewer = keys_viewer();
    assert!((viewer.context().azimuth() - PI).abs() < 1e-6);

    for _ in 0..40 {
        assert!(viewer.handle(ViewEvent::RotateLeft).unwrap());
    }
    assert!((viewer.context().azimuth() - (PI - 1.0)).abs() < 1e-4);
}

#[test]
fn left_then_right_restores_rig() {
    let mut viewer = keys_viewer();
    let camera_before = viewer.context().camera.position;
    let lights_before: Vec<_> = viewer
        .context()
        .scene
        .lights
        .points
        .iter()
        .map(|l| l.position)
        .collect();

    for _ in 0..17 {
        viewer.handle(ViewEvent::RotateLeft).unwrap();
    }
    assert!((viewer.context().camera.position - camera_before).norm() > 1.0);
    for _ in 0..17 {
        viewer.handle(ViewEvent::RotateRight).unwrap();
    }

    assert!((viewer.context().azimuth() - PI).abs() < 1e-4);
    assert!((viewer.context().camera.position - camera_before).norm() < 0.05);
    for (light, before) in viewer.context().scene.lights.points.iter().zip(&lights_before) {
        assert!((light.position - before).norm() < 0.05);
    }
}

#[test]
fn lights_stay_thirty_degrees_off_camera() {
    let mut viewer = keys_viewer();
    for _ in 0..9 {
        viewer.handle(ViewEvent::RotateRight).unwrap();
    }
    let azimuth = viewer.context().azimuth();
    let lights = &viewer.context().scene.lights.points;
    let angle_of = |p: Point3<f32>| p.x.atan2(p.y);

    let expected = [azimuth + PI / 6.0, azimuth - PI / 6.0];
    for (light, want) in lights.iter().zip(expected) {
        let got = angle_of(light.position);
        let diff = (got - want).rem_euclid(2.0 * PI);
        assert!(diff < 1e-3 || diff > 2.0 * PI - 1e-3);
        assert_eq!(light.position.z, 850.0);
    }
}

#[test]
fn poll_renders_once_per_burst_and_never_when_idle() {
    let mut viewer = keys_viewer();
    assert_eq!(viewer.renderer().renders, 1);

    // Idle ticks draw nothing
    for _ in 0..5 {
        assert!(!viewer.tick().unwrap());
    }
    assert_eq!(viewer.renderer().renders, 1);

    // Several changes inside one tick collapse into one frame
    viewer.handle(ViewEvent::RotateLeft).unwrap();
    viewer.handle(ViewEvent::RotateLeft).unwrap();
    assert_eq!(viewer.renderer().renders, 1);
    assert!(viewer.tick().unwrap());
    assert!(!viewer.tick().unwrap());
    assert_eq!(viewer.renderer().renders, 2);
}

#[test]
fn camera_always_targets_origin() {
    let mut viewer = keys_viewer();
    for i in 0..300 {
        let event = if i % 3 == 0 {
            ViewEvent::RotateRight
        } else {
            ViewEvent::RotateLeft
        };
        viewer.handle(event).unwrap();
        viewer.tick().unwrap();
    }
    assert!(viewer.renderer().targets.iter().all(|t| *t == Point3::origin()));
    assert_eq!(viewer.renderer().renders, 301);
}

#[test]
fn resize_updates_aspect_and_draws_once() {
    let mut viewer = keys_viewer();
    let before = viewer.renderer().renders;

    viewer
        .handle(ViewEvent::Resize {
            width: 800,
            height: 600,
        })
        .unwrap();

    assert_eq!(viewer.renderer().renders, before + 1);
    assert!((viewer.context().camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    assert!((viewer.renderer().aspects.last().unwrap() - 1.333_333).abs() < 1e-5);
    assert_eq!(viewer.renderer().sizes.last(), Some(&(800, 600)));

    // Nothing left pending for the poll timer
    assert!(!viewer.tick().unwrap());
    assert_eq!(viewer.renderer().renders, before + 1);
}

#[test]
fn zero_width_resize_keeps_drawing() {
    let mut viewer = keys_viewer();
    let before = viewer.renderer().renders;

    viewer
        .handle(ViewEvent::Resize {
            width: 0,
            height: 600,
        })
        .unwrap();
    viewer.handle(ViewEvent::RotateLeft).unwrap();
    assert!(viewer.tick().unwrap());

    assert_eq!(viewer.renderer().renders, before + 2);
    assert!(viewer.context().camera.aspect > 0.0);
    assert_eq!(viewer.renderer().sizes.last(), Some(&(0, 600)));
}

#[test]
fn orbit_redraws_on_each_change_notification() {
    let config = ViewConfig::for_mode(ControlMode::Orbit);
    let mut viewer = Viewer::new(&config, Recorder::default()).unwrap();
    assert_eq!(viewer.renderer().renders, 1);

    assert!(viewer.handle(ViewEvent::Drag { dx: 15.0, dy: 4.0 }).unwrap());
    assert!(viewer.handle(ViewEvent::Zoom { notches: 1.0 }).unwrap());
    assert_eq!(viewer.renderer().renders, 3);

    // Keyboard steps do not apply to orbit views and do not redraw
    assert!(!viewer.handle(ViewEvent::RotateLeft).unwrap());
    assert!(!viewer.tick().unwrap());
    assert_eq!(viewer.renderer().renders, 3);
    assert!(viewer.renderer().targets.iter().all(|t| *t == Point3::origin()));
}

#[test]
fn continuous_policy_draws_every_frame() {
    let mut config = ViewConfig::for_mode(ControlMode::Orbit);
    config.policy = Some(RedrawPolicy::Continuous);
    let mut viewer = Viewer::new(&config, Recorder::default()).unwrap();
    assert_eq!(viewer.renderer().renders, 0);

    for _ in 0..4 {
        assert!(viewer.tick().unwrap());
    }
    viewer.handle(ViewEvent::Drag { dx: 3.0, dy: 0.0 }).unwrap();
    assert_eq!(viewer.renderer().renders, 4);
}

#[test]
fn capability_failure_skips_scene_setup() {
    let mut config = ViewConfig::default();
    // Would fail to compose if setup were attempted
    config.shapes[0].height = -1.0;

    let result: Result<Viewer<Recorder>> =
        Viewer::launch(&config, |_| Err(Error::capability("WebGL")));
    match result {
        Err(err) => {
            assert!(err.is_capability());
            assert_eq!(err.to_string(), "WebGL not available");
        }
        Ok(_) => panic!("viewer started without a renderer"),
    }
}

#[test]
fn launch_with_working_host() {
    let viewer = Viewer::launch(&ViewConfig::default(), |config| {
        assert_eq!(config.width, 400);
        Ok(Recorder::default())
    })
    .unwrap();
    assert_eq!(viewer.context().scene.shapes.len(), 3);
    assert!(viewer.scheduler().is_dirty());
}
