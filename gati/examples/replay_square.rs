//! Replay a scripted square trajectory through the odometry engine.
//!
//! Usage:
//! ```bash
//! cargo run --example replay_square
//! cargo run --example replay_square -- gati.toml
//! RUST_LOG=debug cargo run --example replay_square
//! ```

use std::io::Write;

use gati::{
    LaserOdometry, LaserScan, OdometryConfig, Pose2D, ScriptedMatcher, ScriptedStep, StampedScan,
};

/// Scan period of a Delta-2D class lidar (5 Hz).
const SCAN_PERIOD_US: u64 = 200_000;

fn synthetic_scan(timestamp_us: u64) -> StampedScan {
    // 360 readings of a 2m circular room
    let ranges = vec![2.0; 360];
    LaserScan::new(
        0.0,
        std::f32::consts::TAU,
        std::f32::consts::TAU / 360.0,
        0.15,
        12.0,
        ranges,
    )
    .stamped(timestamp_us)
}

fn load_config() -> OdometryConfig {
    match std::env::args().nth(1) {
        Some(path) => match OdometryConfig::from_file(&path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path);
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config {}: {}", path, e);
                OdometryConfig::default()
            }
        },
        None => OdometryConfig::default(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let config = load_config();

    // 1m sides in 10cm steps, 90° turns in two 45° steps, one dropped match per side
    let forward = Pose2D::new(0.1, 0.0, 0.0);
    let half_turn = Pose2D::new(0.0, 0.0, std::f64::consts::FRAC_PI_4);
    let mut steps = Vec::new();
    for _ in 0..4 {
        steps.extend(std::iter::repeat_n(ScriptedStep::from(forward), 10));
        steps.push(ScriptedStep::Fail);
        steps.extend([ScriptedStep::from(half_turn), ScriptedStep::from(half_turn)]);
    }
    let scan_count = steps.len();

    let mut odom = LaserOdometry::new(ScriptedMatcher::new(steps));
    if !odom.configure(&config) {
        log::error!("Odometry configuration failed");
        std::process::exit(1);
    }

    let mut failures = 0;
    for i in 0..scan_count {
        let scan = synthetic_scan(i as u64 * SCAN_PERIOD_US);
        let update = odom.process(&scan);
        if update.is_stale() {
            failures += 1;
            continue;
        }
        let p = update.odometry.position;
        log::debug!("t={}us pos=({:.3}, {:.3})", update.odometry.timestamp_us, p.x, p.y);
    }

    let pose = odom.fill_pose2d();
    log::info!(
        "Processed {} scans ({} failed). Final pose in '{}': ({:.4}, {:.4}, {:.4})",
        scan_count,
        failures,
        odom.frame_odometry(),
        pose.x,
        pose.y,
        pose.theta
    );
}
