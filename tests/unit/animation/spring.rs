use super::*;

const DT: f64 = 1.0 / 60.0;

fn run_until_settled(spring: &mut Spring, max_ticks: usize) -> Vec<f64> {
    let mut positions = Vec::new();
    for _ in 0..max_ticks {
        let tick = spring.step(DT);
        positions.push(tick.position);
        if tick.settled {
            break;
        }
    }
    positions
}

#[test]
fn default_constants_do_not_overshoot() {
    let cfg = SpringConfig::default();
    assert!(cfg.damping_ratio() >= 1.0);
    cfg.validate().unwrap();
}

#[test]
fn converges_monotonically_and_snaps_to_target() {
    let mut s = Spring::new(SpringConfig::default(), 0.0);
    s.set_target(63.0);
    let positions = run_until_settled(&mut s, 600);

    assert!(s.is_settled());
    assert_eq!(s.position(), 63.0);
    assert_eq!(s.velocity(), 0.0);
    for pair in positions.windows(2) {
        assert!(pair[1] >= pair[0], "moved backwards: {pair:?}");
    }
    assert!(positions.iter().all(|p| *p <= 63.0));
    assert!(positions.len() > 5, "settled implausibly fast");
}

#[test]
fn tight_thresholds_settle_within_epsilon() {
    let cfg = SpringConfig {
        rest_delta: 1e-3,
        rest_speed: 1e-3,
        ..SpringConfig::default()
    };
    let mut s = Spring::new(cfg, 10.0);
    s.set_target(20.0);
    run_until_settled(&mut s, 2_000);
    assert!(s.is_settled());
    assert!((s.position() - 20.0).abs() < 1e-9);
}

#[test]
fn settled_spring_reports_no_motion() {
    let mut s = Spring::new(SpringConfig::default(), 4.0);
    let tick = s.step(DT);
    assert!(tick.settled);
    assert_eq!(tick.delta, 0.0);
    assert_eq!(tick.position, 4.0);
}

#[test]
fn retarget_mid_flight_keeps_velocity() {
    let mut s = Spring::new(SpringConfig::default(), 0.0);
    s.set_target(50.0);
    s.step(DT);
    s.step(DT);
    let v = s.velocity();
    assert!(v > 0.0);
    s.set_target(0.0);
    assert_eq!(s.velocity(), v);
    assert!(!s.is_settled());
    run_until_settled(&mut s, 2_000);
    assert_eq!(s.position(), 0.0);
}

#[test]
fn step_sizes_are_sanitized() {
    let mut s = Spring::new(SpringConfig::default(), 0.0);
    s.set_target(10.0);
    let t = s.step(f64::NAN);
    assert_eq!(t.position, 0.0);
    let t = s.step(-1.0);
    assert_eq!(t.position, 0.0);
    // A long stall integrates at most one second and stays finite.
    let t = s.step(1.0e6);
    assert!(t.position.is_finite());
    assert!(t.settled);
}

#[test]
fn non_finite_targets_are_ignored() {
    let mut s = Spring::new(SpringConfig::default(), 3.0);
    s.set_target(f64::NAN);
    s.set_target(f64::INFINITY);
    assert!(s.is_settled());
    assert_eq!(s.target(), 3.0);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = SpringConfig {
        stiffness: 0.0,
        ..SpringConfig::default()
    };
    assert!(cfg.validate().is_err());
    let cfg = SpringConfig {
        mass: f64::NAN,
        ..SpringConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn tiny_substep_config_still_steps_promptly() {
    let cfg = crate::PlayerConfig::from_json_str(r#"{"spring":{"max_substep_secs":1e-12}}"#)
        .unwrap()
        .spring;
    let mut fine = Spring::new(cfg, 0.0);
    fine.set_target(63.0);

    let started = std::time::Instant::now();
    let tick = fine.step(Spring::MAX_STEP_SECS);
    assert!(started.elapsed() < std::time::Duration::from_secs(1));
    assert!(tick.position > 0.0 && tick.position.is_finite());

    // Capped substeps behave like an explicit max_substep_secs of dt / MAX_SUBSTEPS.
    let mut capped = Spring::new(
        SpringConfig {
            max_substep_secs: Spring::MAX_STEP_SECS / f64::from(Spring::MAX_SUBSTEPS),
            ..SpringConfig::default()
        },
        0.0,
    );
    capped.set_target(63.0);
    assert!((capped.step(Spring::MAX_STEP_SECS).position - tick.position).abs() < 1e-9);
}
