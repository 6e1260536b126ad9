//! End-to-end outbreak scenarios against the `Simulation` facade.

use outbreak_sim::events::HealthEventKind;
use outbreak_sim::{SimParams, Simulation};

/// Parameters where every agent is always in range and infection is
/// certain: a 7x7 grid has a diagonal under the threshold of 10.
fn pressure_cooker() -> SimParams {
    SimParams {
        grid_size: 7,
        proximity_threshold: 10.0,
        infection_probability: 1.0,
        quarantine_duration: 1.0,
        protection_duration: 60.0,
        ..SimParams::default()
    }
}

#[test]
fn test_outbreak_spreads_then_burns_out_under_quarantine() {
    let mut sim = Simulation::with_params(42, 10, pressure_cooker());
    let dt = 0.1;

    // One tick is enough to infect the whole grid
    sim.tick(dt);
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.counts.infected, 10);

    let events = sim.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| e.kind == HealthEventKind::Infected)
            .count(),
        9
    );

    // Isolate everyone, wait out the quarantine (one spare tick for
    // accumulated float error in the countdown)
    sim.quarantine_all();
    assert_eq!(sim.snapshot().counts.quarantined, 10);
    for _ in 0..12 {
        sim.tick(dt);
    }

    assert!(sim.all_healthy());
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.counts.healthy, 10);

    // The driver resets its outbreak timer once everyone is healthy
    assert!(sim.elapsed_secs() > 0.0);
    sim.reset_elapsed();
    assert_eq!(sim.elapsed_secs(), 0.0);
}

#[test]
fn test_masks_block_infection_while_active() {
    let mut sim = Simulation::with_params(7, 10, pressure_cooker());
    sim.mask_all();

    // Certain infection, everyone in range, but every susceptible agent
    // is masked: nothing spreads
    for _ in 0..10 {
        sim.tick(0.1);
    }

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.counts.infected, 1);
    assert_eq!(snapshot.counts.protected, 9);
    assert!(sim
        .drain_events()
        .iter()
        .all(|e| e.kind != HealthEventKind::Infected));
}

#[test]
fn test_no_immunity_after_protection_expires() {
    let params = SimParams {
        protection_duration: 0.5,
        ..pressure_cooker()
    };
    let mut sim = Simulation::with_params(3, 6, params);
    sim.mask_all();

    // Masks run out after 0.5s; with the infected agent still circulating,
    // the ex-protected agents are susceptible again and get infected
    for _ in 0..10 {
        sim.tick(0.1);
    }

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.counts.infected, 6);
    assert_eq!(snapshot.counts.protected, 0);
}

#[test]
fn test_reseed_restarts_an_extinct_outbreak() {
    let mut sim = Simulation::with_params(11, 8, pressure_cooker());

    // Spread, quarantine, recover
    sim.tick(0.1);
    sim.quarantine_all();
    for _ in 0..12 {
        sim.tick(0.1);
    }
    assert!(sim.all_healthy());

    sim.seed_infection();
    assert!(!sim.all_healthy());
    assert_eq!(sim.snapshot().counts.infected, 1);
}
