use glam::{Mat4, Vec3};
use scene_wasm::gfx::projection;
use scene_wasm::headless::{DrawCommand, HeadlessContext, ManualScheduler};
use scene_wasm::{Animation, KeyAction, MeshKind, SceneConfig, SceneLoop, SceneObject};

type Scene = SceneLoop<HeadlessContext, ManualScheduler>;

fn build(config: SceneConfig) -> Scene {
    let mut scene = SceneLoop::new(HeadlessContext::new(640, 480), ManualScheduler::default(), config)
        .expect("scene setup");
    scene.start().expect("scene start");
    scene
}

fn running_scene() -> Scene {
    build(SceneConfig::default())
}

/// Fires `n` armed frames, as the display would.
fn run_frames(scene: &mut Scene, n: usize) {
    for _ in 0..n {
        let handle = scene.scheduler_mut().fire().expect("a frame should be armed");
        scene.on_frame(handle);
    }
}

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn speed_presses_then_frames_accumulate_angle() {
    let initial = SceneConfig::default().rotation_speed;
    for (presses, frames) in [(0, 1), (3, 10), (7, 25), (12, 40)] {
        let mut scene = running_scene();
        for _ in 0..presses {
            assert_eq!(scene.handle_key("r"), Some(KeyAction::SpeedUp));
        }
        run_frames(&mut scene, frames);

        let expected = frames as f32 * (initial + presses as f32 * 0.001);
        let angle = scene.state().rotation_angle;
        assert!(
            approx_eq(angle, expected),
            "presses={presses} frames={frames}: {angle} != {expected}"
        );
    }
}

#[test]
fn slow_down_can_reverse_rotation() {
    let mut scene = build(SceneConfig {
        rotation_speed: 0.0,
        ..SceneConfig::default()
    });
    scene.handle_key("e");
    scene.handle_key("e");
    run_frames(&mut scene, 5);
    assert!(approx_eq(scene.state().rotation_angle, -0.01));
}

#[test]
fn pausing_does_not_advance_the_trajectory() {
    let mut steady = running_scene();
    run_frames(&mut steady, 12);

    let mut paused = running_scene();
    run_frames(&mut paused, 5);
    paused.handle_key("p");
    assert_eq!(paused.animation(), Animation::Paused);
    assert_eq!(paused.scheduler_mut().fire(), None);
    let frozen = paused.state().rotation_angle;
    paused.handle_key("ArrowUp");
    paused.handle_key("ArrowDown");
    assert_eq!(paused.state().rotation_angle, frozen);
    paused.handle_key("p");
    run_frames(&mut paused, 7);

    assert_eq!(paused.state().rotation_angle, steady.state().rotation_angle);
}

#[test]
fn cancelled_frame_is_never_delivered() {
    let mut scene = running_scene();
    let stale = scene.pending_frame().expect("armed on start");
    scene.handle_key("p");
    scene.handle_key("p");

    // A host that still delivers the cancelled callback must not advance.
    scene.on_frame(stale);
    assert_eq!(scene.state().rotation_angle, 0.0);
    assert!(scene.graphics().draws().is_empty());

    let fresh = scene.pending_frame().expect("re-armed on resume");
    assert_ne!(fresh, stale);
    scene.on_frame(fresh);
    assert!(approx_eq(scene.state().rotation_angle, 0.01));
}

#[test]
fn unmapped_keys_change_nothing() {
    let mut scene = running_scene();
    let before = *scene.state();
    let pending = scene.pending_frame();
    for key in ["q", "Enter", "P", " ", "ArrowUpp", ""] {
        assert_eq!(scene.handle_key(key), None);
    }
    assert_eq!(*scene.state(), before);
    assert_eq!(scene.animation(), Animation::Running);
    assert_eq!(scene.pending_frame(), pending);
    assert_eq!(scene.scheduler().requested().len(), 1);
    assert!(scene.scheduler().cancelled().is_empty());
}

#[test]
fn two_objects_issue_two_draws_in_order() {
    let mut scene = build(SceneConfig {
        objects: vec![
            SceneObject::pyramid(Vec3::ZERO),
            SceneObject::terrain(Vec3::new(2.0, 0.0, 0.0), 2.0),
        ],
        ..SceneConfig::default()
    });
    scene.render_frame();
    assert_eq!(scene.graphics().draws(), vec![15, 6]);
    assert_eq!(
        scene.graphics().bound_meshes(),
        vec![MeshKind::Pyramid, MeshKind::Terrain]
    );
}

#[test]
fn unknown_objects_are_skipped() {
    let config = SceneConfig::from_json(
        r#"{"objects": [
            {"kind": "sphere", "position": [0.0, 0.0, 0.0]},
            {"kind": "terrain", "position": [0.0, -1.0, 0.0], "size": 4.0},
            {"kind": "pyramid", "position": [1.0, 0.0, 0.0]}
        ]}"#,
    )
    .unwrap();
    let mut scene = build(config);
    scene.render_frame();
    assert_eq!(scene.objects().len(), 3);
    assert_eq!(scene.graphics().draws(), vec![6, 15]);
}

#[test]
fn arrow_keys_step_one_axis() {
    let mut scene = running_scene();
    let start = scene.state().camera_position;

    for _ in 0..10 {
        scene.handle_key("ArrowUp");
    }
    let moved = scene.state().camera_position;
    assert!(approx_eq(moved.y - start.y, 1.0));
    assert_eq!(moved.x, start.x);
    assert_eq!(moved.z, start.z);

    scene.handle_key("ArrowRight");
    scene.handle_key("ArrowRight");
    scene.handle_key("ArrowLeft");
    let moved = scene.state().camera_position;
    assert!(approx_eq(moved.x - start.x, 0.1));
    assert!(approx_eq(moved.y - start.y, 1.0));
    assert_eq!(moved.z, start.z);
}

#[test]
fn double_toggle_cancels_once_and_rearms_once() {
    let mut scene = running_scene();
    let original = scene.animation();
    let first = scene.pending_frame().expect("armed on start");

    assert_eq!(scene.handle_key("p"), Some(KeyAction::ToggleAnimation));
    assert_eq!(scene.scheduler().cancelled(), vec![first]);
    assert_eq!(scene.scheduler().requested().len(), 1);
    assert_eq!(scene.scheduler().armed(), None);

    scene.handle_key("p");
    assert_eq!(scene.animation(), original);
    assert_eq!(scene.scheduler().cancelled(), vec![first]);
    assert_eq!(scene.scheduler().requested().len(), 2);
    assert_eq!(scene.scheduler().armed(), scene.pending_frame());
}

#[test]
fn paused_start_toggles_into_running() {
    let mut scene = build(SceneConfig {
        animate: false,
        ..SceneConfig::default()
    });
    assert_eq!(scene.pending_frame(), None);
    scene.handle_key("p");
    assert_eq!(scene.animation(), Animation::Running);
    run_frames(&mut scene, 3);
    assert!(approx_eq(scene.state().rotation_angle, 0.03));
}

#[test]
fn model_view_follows_camera_then_rotation() {
    let mut scene = build(SceneConfig {
        objects: vec![SceneObject::pyramid(Vec3::ZERO)],
        ..SceneConfig::default()
    });
    run_frames(&mut scene, 4);

    let state = *scene.state();
    let expected = Mat4::from_translation(state.camera_position)
        * Mat4::from_rotation_y(state.rotation_angle);
    let last = *scene
        .graphics()
        .model_views()
        .last()
        .expect("at least one draw");
    assert!(last.abs_diff_eq(expected, 1e-6));
}

#[test]
fn resize_refreshes_only_when_paused() {
    let mut scene = running_scene();
    scene.graphics_mut().resize(300, 100);
    scene.refresh();
    assert!(scene.graphics().draws().is_empty());

    scene.handle_key("p");
    scene.refresh();
    assert_eq!(scene.graphics().draws().len(), 3);
}

#[test]
fn render_uses_surface_aspect_and_fill_color() {
    let fill = [1.0, 0.0, 0.0, 1.0];
    let mut scene = build(SceneConfig {
        animate: false,
        fill_color: fill,
        objects: vec![SceneObject::pyramid(Vec3::ZERO)],
        ..SceneConfig::default()
    });
    scene.graphics_mut().resize(300, 100);
    scene.refresh();

    let commands = scene.graphics().commands();
    let last_projection = commands
        .iter()
        .rev()
        .find_map(|c| match c {
            DrawCommand::SetMatrices { projection, .. } => Some(*projection),
            _ => None,
        })
        .expect("matrices set for the draw");
    assert!(last_projection.abs_diff_eq(projection(3.0), 1e-6));

    let fills: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::UseProgram { fill } => Some(*fill),
            _ => None,
        })
        .collect();
    assert!(!fills.is_empty());
    assert!(fills.iter().all(|f| *f == fill));
}
