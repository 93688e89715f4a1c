//! End-to-end crossing runs
//!
//! Paused-clock tests drive whole simulations in simulated time; the
//! multi-threaded test runs with zero delays to shake out lock ordering.

use std::sync::Arc;
use std::time::Duration;

use ferry_app::config::{Config, Timings};
use ferry_app::ferry;
use ferry_app::harbor::Harbor;
use ferry_app::simulation::{run_harbor, run_simulation, Outcome};
use ferry_app::vehicle::run_vehicle;
use ferry_domain::model::Roster;
use ferry_types::{Port, SimEvent, Vehicle, VehicleClass};

fn drained_config(seed: u64) -> Config {
    Config {
        seed: Some(seed),
        time_scale: 0.01,
        drain: true,
        ..Config::default()
    }
}

/// Boarding order at each port must be a prefix of queue order
fn assert_fifo(outcome: &Outcome) {
    for port in Port::ALL {
        let queued = outcome.queued_at(port);
        let loaded = outcome.loaded_at(port);
        assert!(
            loaded.len() <= queued.len() && queued[..loaded.len()] == loaded[..],
            "{}: boarded {:?} out of queue order {:?}",
            port,
            loaded,
            queued
        );
    }
}

fn assert_capacity_respected(outcome: &Outcome, capacity: u32) {
    for entry in &outcome.events {
        if let SimEvent::VehicleLoaded { load, .. } = entry.event {
            assert!(load <= capacity, "load {} over capacity {}", load, capacity);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_fifo_and_conservation_across_seeds() {
    for seed in [1, 2, 3, 42, 1234] {
        let outcome = run_simulation(&drained_config(seed)).await.unwrap();

        assert_fifo(&outcome);
        assert_capacity_respected(&outcome, 20);
        assert_eq!(outcome.report.queued(), 30, "seed {}", seed);
        assert_eq!(outcome.report.loaded(), 30, "seed {}", seed);
        assert!(outcome.report.drained);
    }
}

#[tokio::test(start_paused = true)]
async fn test_small_ferry_still_drains() {
    let config = Config {
        ferry_capacity: 3,
        ..drained_config(9)
    };
    let outcome = run_simulation(&config).await.unwrap();

    assert_fifo(&outcome);
    assert_capacity_respected(&outcome, 3);
    assert_eq!(outcome.report.loaded(), 30);
    // every truck fills the ferry on its own
    assert!(outcome.report.loaded_trips >= 8);
}

#[tokio::test(start_paused = true)]
async fn test_ferry_fetches_vehicles_from_the_far_side() {
    // every vehicle starts across from the ferry
    let roster = Roster::from_vehicles(
        (0..5)
            .map(|id| Vehicle::new(id, VehicleClass::Minibus, Port::East, (id % 2) as u8))
            .collect(),
    );
    let timings = Timings {
        toll: Duration::from_millis(100),
        unload: Duration::from_millis(200),
        load: Duration::from_millis(100),
        crossing: Duration::from_millis(300),
        idle: Duration::from_millis(100),
    };
    let harbor = Arc::new(Harbor::new(20, Port::West, timings));

    let drained = run_harbor(Arc::clone(&harbor), roster, true).await.unwrap();

    assert!(drained);
    let events = harbor.journal().events();
    let first_departure = events
        .iter()
        .find(|e| matches!(e, SimEvent::FerryDeparted { .. }))
        .cloned();
    assert_eq!(
        first_departure,
        Some(SimEvent::FerryDeparted {
            from: Port::West,
            to: Port::East,
            load: 0,
        })
    );
    assert_eq!(harbor.journal().loaded_at(Port::East).len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_ferry_waits_while_harbor_is_empty() {
    let harbor = Arc::new(Harbor::new(
        20,
        Port::West,
        Timings {
            idle: Duration::from_secs(1),
            ..Timings::instant()
        },
    ));
    let task = tokio::spawn(ferry::run(Arc::clone(&harbor)));

    tokio::time::sleep(Duration::from_secs(10)).await;
    task.abort();

    let events = harbor.journal().events();
    assert!(events.iter().any(|e| matches!(e, SimEvent::FerryIdle { .. })));
    assert!(!events.iter().any(|e| matches!(e, SimEvent::FerryDeparted { .. })));
    assert_eq!(harbor.ferry().snapshot().await.port, Port::West);
}

#[tokio::test(start_paused = true)]
async fn test_arrival_ends_idle_wait() {
    let harbor = Arc::new(Harbor::new(
        20,
        Port::West,
        Timings {
            idle: Duration::from_secs(3600),
            ..Timings::instant()
        },
    ));
    let task = tokio::spawn(ferry::run(Arc::clone(&harbor)));
    tokio::time::sleep(Duration::from_secs(1)).await;

    run_vehicle(
        Arc::clone(&harbor),
        Vehicle::new(0, VehicleClass::Car, Port::West, 0),
    )
    .await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    task.abort();

    // boarded long before the hour-long idle timeout would have expired
    assert_eq!(harbor.journal().loaded_at(Port::West), vec![0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_run_without_delays() {
    let config = Config {
        cars: 40,
        minibuses: 30,
        trucks: 30,
        ferry_capacity: 7,
        time_scale: 0.0,
        ..drained_config(77)
    };

    let outcome = tokio::time::timeout(Duration::from_secs(30), run_simulation(&config))
        .await
        .expect("simulation deadlocked")
        .unwrap();

    assert_fifo(&outcome);
    assert_capacity_respected(&outcome, 7);
    assert_eq!(outcome.report.loaded(), 100);
    assert_eq!(outcome.report.units_carried, 40 + 30 * 2 + 30 * 3);
}
