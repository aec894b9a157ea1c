//! Odometry Integration Tests
//!
//! Drives the public engine API with scripted matcher output to validate
//! the pose bookkeeping without a real registration algorithm:
//! - Extrinsic / inverse consistency
//! - Composition order of relative motions
//! - Failure handling (no pose advance, stale output)
//! - Covariance shape and fallback
//! - Planar projection and end-to-end trajectories
//!
//! Run with: `cargo test --test odometry_integration`

use approx::assert_relative_eq;
use gati::math::{planar_transform, transform_from_xyz_rpy, transforms_close};
use gati::{
    Covariance6, LaserOdometry, LaserScan, OdometryConfig, Pose2D, ResetMode, ScriptedMatcher,
    ScriptedStep, StampedScan, Transform3,
};
use std::f64::consts::{FRAC_PI_2, PI};

// ============================================================================
// Helpers
// ============================================================================

/// A small valid scan stamped at `t` microseconds.
fn scan_at(t: u64) -> StampedScan {
    LaserScan::new(0.0, 0.3, 0.1, 0.15, 12.0, vec![2.0, 2.1, 2.2, 2.3]).stamped(t)
}

fn engine_with(steps: Vec<ScriptedStep>, config: &OdometryConfig) -> LaserOdometry<ScriptedMatcher> {
    let mut odom = LaserOdometry::new(ScriptedMatcher::new(steps));
    assert!(odom.configure(config), "configure should succeed");
    odom
}

fn run_all(odom: &mut LaserOdometry<ScriptedMatcher>, count: usize) {
    for i in 0..count {
        let update = odom.process(&scan_at(i as u64 * 100_000));
        assert!(update.processed, "scan {} should succeed", i);
    }
}

// ============================================================================
// Extrinsic calibration
// ============================================================================

#[test]
fn test_laser_pose_inverse_consistency() {
    let mut odom = engine_with(Vec::new(), &OdometryConfig::default());

    let mounts = [
        planar_transform(-0.0936, 0.0, 0.0),
        planar_transform(0.1, 0.05, PI),
        transform_from_xyz_rpy(0.2, -0.1, 0.15, 0.3, -0.2, 1.2),
    ];

    for mount in mounts {
        odom.set_laser_pose(mount);
        let registry = odom.registry();
        assert_eq!(odom.laser_pose(), mount);
        assert!(transforms_close(&registry.body_to_sensor(), &mount.inverse(), 1e-12));
        assert!(transforms_close(&mount.inverse().inverse(), &mount, 1e-12));
    }
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_composition_is_left_to_right() {
    // Non-commuting rotations: roll then yaw differs from yaw then roll
    let r1 = transform_from_xyz_rpy(1.0, 0.0, 0.0, FRAC_PI_2, 0.0, 0.0);
    let r2 = transform_from_xyz_rpy(0.0, 1.0, 0.0, 0.0, 0.0, FRAC_PI_2);
    let r3 = transform_from_xyz_rpy(0.5, 0.0, 0.2, 0.0, 0.3, 0.0);

    let mut odom = engine_with(
        vec![
            ScriptedStep::Motion(r1),
            ScriptedStep::Motion(r2),
            ScriptedStep::Motion(r3),
        ],
        &OdometryConfig::default(),
    );
    run_all(&mut odom, 3);

    let expected = r1 * r2 * r3;
    let reversed = r3 * r2 * r1;
    assert!(transforms_close(&odom.estimated_pose(), &expected, 1e-9));
    assert!(
        !transforms_close(&odom.estimated_pose(), &reversed, 1e-3),
        "composition order must matter"
    );
}

#[test]
fn test_heading_error_leaks_into_position() {
    // A small heading change followed by a long straight line must bend the
    // path, which independent yaw/position updates would not.
    let mut odom = engine_with(
        vec![
            Pose2D::new(0.0, 0.0, 0.1).into(),
            Pose2D::new(10.0, 0.0, 0.0).into(),
        ],
        &OdometryConfig::default(),
    );
    run_all(&mut odom, 2);

    let pose = odom.fill_pose2d();
    assert_relative_eq!(pose.x, 10.0 * 0.1_f64.cos(), epsilon = 1e-9);
    assert_relative_eq!(pose.y, 10.0 * 0.1_f64.sin(), epsilon = 1e-9);
    assert_relative_eq!(pose.theta, 0.1, epsilon = 1e-12);
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_failure_does_not_advance_pose() {
    let mut odom = engine_with(
        vec![
            Pose2D::new(0.4, 0.1, 0.2).into(),
            ScriptedStep::Fail,
            Pose2D::new(0.4, 0.0, 0.0).into(),
        ],
        &OdometryConfig::default(),
    );

    assert!(odom.process(&scan_at(0)).processed);
    let before = odom.estimated_pose();

    let failed = odom.process(&scan_at(100_000));
    assert!(!failed.processed);
    assert!(failed.is_stale());
    assert_eq!(odom.estimated_pose(), before);
    assert_eq!(failed.odometry.timestamp_us, 100_000);

    // Next success continues from the pre-failure pose
    assert!(odom.process(&scan_at(200_000)).processed);
    let expected = before * planar_transform(0.4, 0.0, 0.0);
    assert!(transforms_close(&odom.estimated_pose(), &expected, 1e-12));
}

#[test]
fn test_planar_process_reports_failure() {
    let mut odom = engine_with(vec![ScriptedStep::Fail], &OdometryConfig::default());
    let (processed, pose) = odom.process_planar(&scan_at(5));
    assert!(!processed);
    assert_eq!(pose, Pose2D::identity());
}

// ============================================================================
// Covariance
// ============================================================================

#[test]
fn test_covariance_shape() {
    let config = OdometryConfig {
        covariance_diag: vec![0.01, 0.02, 0.03, 0.04, 0.05, 0.06],
        ..Default::default()
    };
    let odom = engine_with(Vec::new(), &config);
    let cov = odom.fill_covariance();

    let data = cov.to_array();
    assert_eq!(data.len(), 36);
    for (i, value) in data.iter().enumerate() {
        let (row, col) = (i / 6, i % 6);
        if row == col {
            assert_eq!(*value, config.covariance_diag[row]);
        } else {
            assert_eq!(*value, 0.0, "off-diagonal ({row}, {col}) must be zero");
        }
    }
}

#[test]
fn test_misconfigured_covariance_falls_back() {
    for bad in [vec![], vec![1.0, 2.0, 3.0], vec![1.0; 7]] {
        let config = OdometryConfig {
            covariance_diag: bad,
            ..Default::default()
        };
        let odom = engine_with(Vec::new(), &config);
        assert_eq!(odom.fill_covariance(), Covariance6::diagonal(&[1e-9; 6]));
    }
}

// ============================================================================
// Result materialization
// ============================================================================

#[test]
fn test_planar_projection() {
    let mut odom = engine_with(
        vec![ScriptedStep::Motion(planar_transform(3.0, 4.0, FRAC_PI_2))],
        &OdometryConfig::default(),
    );
    run_all(&mut odom, 1);

    let pose = odom.fill_pose2d();
    assert_relative_eq!(pose.x, 3.0, epsilon = 1e-12);
    assert_relative_eq!(pose.y, 4.0, epsilon = 1e-12);
    assert_relative_eq!(pose.theta, FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn test_output_stamping_uses_configured_frames() {
    let config = OdometryConfig {
        base_frame: "chassis".to_string(),
        laser_odom_frame: "laser_odom".to_string(),
        ..Default::default()
    };
    let mut odom = engine_with(vec![Pose2D::new(1.0, 0.0, 0.0).into()], &config);

    let update = odom.process(&scan_at(1_234_567));
    assert_eq!(update.odometry.timestamp_us, 1_234_567);
    assert_eq!(update.odometry.frame_id, "laser_odom");
    assert_eq!(update.odometry.child_frame_id, "chassis");
    assert_eq!(odom.current_time(), 1_234_567);
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_end_to_end_three_scans() {
    let mut odom = engine_with(
        vec![
            Pose2D::new(1.0, 0.0, 0.0).into(),
            Pose2D::new(1.0, 0.0, 0.0).into(),
            Pose2D::new(0.0, 0.0, FRAC_PI_2).into(),
        ],
        &OdometryConfig::default(),
    );
    run_all(&mut odom, 3);

    let pose = odom.fill_pose2d();
    assert_relative_eq!(pose.x, 2.0, epsilon = 1e-12);
    assert_relative_eq!(pose.y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(pose.theta, FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn test_square_path_returns_to_origin() {
    let side = Pose2D::new(1.0, 0.0, 0.0);
    let turn = Pose2D::new(0.0, 0.0, FRAC_PI_2);
    let steps: Vec<ScriptedStep> = (0..4)
        .flat_map(|_| [ScriptedStep::from(side), ScriptedStep::from(turn)])
        .collect();

    let mut odom = engine_with(steps, &OdometryConfig::default());
    run_all(&mut odom, 8);

    assert!(transforms_close(
        &odom.estimated_pose(),
        &Transform3::identity(),
        1e-9
    ));
}

#[test]
fn test_reset_then_continue() {
    let mut odom = engine_with(
        vec![
            Pose2D::new(1.0, 0.0, 0.0).into(),
            Pose2D::new(1.0, 0.0, 0.0).into(),
        ],
        &OdometryConfig::default(),
    );
    run_all(&mut odom, 1);

    odom.reset(ResetMode::ClearPose);
    assert!(odom.process(&scan_at(1)).processed);
    assert_relative_eq!(odom.fill_pose2d().x, 1.0, epsilon = 1e-12);
}

#[test]
fn test_config_file_drives_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gati.toml");
    std::fs::write(
        &path,
        r#"
base_frame = "chassis"
covariance_diag = [0.1, 0.1, 0.0, 0.0, 0.0, 0.05]

[laser_mount]
x = 0.5
"#,
    )
    .unwrap();

    let config = OdometryConfig::from_file(&path).unwrap();
    let mut odom = LaserOdometry::new(ScriptedMatcher::new(Vec::<ScriptedStep>::new()));
    assert!(odom.configure(&config));

    // Laser 0.5m ahead: a laser-frame motion that is a pure body spin
    let body_spin = planar_transform(0.0, 0.0, FRAC_PI_2);
    let laser_motion = odom.registry().body_to_sensor() * body_spin * odom.laser_pose();
    odom.matcher_mut().push(ScriptedStep::LaserMotion(laser_motion));

    let update = odom.process(&scan_at(10));
    assert!(update.processed);
    assert_eq!(update.odometry.child_frame_id, "chassis");
    assert_eq!(
        update.odometry.covariance.diagonal_values(),
        [0.1, 0.1, 0.0, 0.0, 0.0, 0.05]
    );
    let pose = odom.fill_pose2d();
    assert_relative_eq!(pose.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(pose.y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(pose.theta, FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn test_shipped_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/gati.toml");
    let config = OdometryConfig::from_file(path).unwrap();
    assert_eq!(config.covariance_diagonal(), [1e-3, 1e-3, 1e-6, 1e-6, 1e-6, 1e-3]);

    let odom = engine_with(Vec::new(), &config);
    assert_relative_eq!(odom.laser_pose().translation.x, -0.0936);
    assert_eq!(odom.frame_odometry(), "odom");
}
