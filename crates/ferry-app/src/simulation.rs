//! Simulation runner
//!
//! Starts the ferry loop, then one task per vehicle, and waits for every
//! vehicle task to finish (and, in drain mode, for every vehicle to cross)
//! before tearing the ferry task down.

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use ferry_domain::model::roster::random_port;
use ferry_domain::model::{Fleet, Roster};
use ferry_types::{Error, Port, Result, SimEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tokio::task::{JoinError, JoinHandle, JoinSet};

use crate::config::Config;
use crate::ferry::{self, FerrySnapshot};
use crate::harbor::Harbor;
use crate::journal::JournalEntry;
use crate::vehicle::run_vehicle;

/// How often drain mode re-checks the harbor
const DRAIN_POLL: Duration = Duration::from_millis(10);

/// Per-port counters
#[derive(Debug, Clone, Serialize)]
pub struct PortReport {
    pub port: Port,
    pub queued: usize,
    pub loaded: usize,
    pub still_waiting: usize,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    pub start_port: Port,
    pub fleet: Fleet,
    pub drained: bool,
    pub ports: Vec<PortReport>,
    pub loaded_trips: usize,
    pub empty_trips: usize,
    pub units_carried: u64,
    pub ferry: FerrySnapshot,
    pub simulated_ms: u64,
}

impl RunReport {
    pub fn queued(&self) -> usize {
        self.ports.iter().map(|p| p.queued).sum()
    }

    pub fn loaded(&self) -> usize {
        self.ports.iter().map(|p| p.loaded).sum()
    }

    pub fn still_waiting(&self) -> usize {
        self.ports.iter().map(|p| p.still_waiting).sum()
    }

    /// Every queued vehicle either boarded or is still waiting
    pub fn is_conserved(&self) -> bool {
        self.queued() == self.loaded() + self.still_waiting()
    }
}

/// A finished run: the summary plus the full event journal
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub report: RunReport,
    pub events: Vec<JournalEntry>,
}

impl Outcome {
    /// Vehicle ids in queue order at `port`
    pub fn queued_at(&self, port: Port) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e.event {
                SimEvent::VehicleQueued { vehicle, port: p, .. } if p == port => Some(vehicle),
                _ => None,
            })
            .collect()
    }

    /// Vehicle ids in boarding order at `port`
    pub fn loaded_at(&self, port: Port) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e.event {
                SimEvent::VehicleLoaded { vehicle, port: p, .. } if p == port => Some(vehicle),
                _ => None,
            })
            .collect()
    }
}

/// Run a whole simulation as described by `config`
pub async fn run_simulation(config: &Config) -> Result<Outcome> {
    config.validate()?;

    let started_at = Utc::now();
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let start_port = config.start_port.unwrap_or_else(|| random_port(&mut rng));
    let roster = Roster::generate(&config.fleet(), &mut rng);

    tracing::info!(
        seed,
        vehicles = roster.len(),
        "Starting simulation: {} vehicles, ferry at {}",
        roster.len(),
        start_port
    );

    let harbor = Arc::new(Harbor::new(config.ferry_capacity, start_port, config.timings()));
    let drained = run_harbor(Arc::clone(&harbor), roster, config.drain).await?;

    let report = build_report(&harbor, config, started_at, seed, start_port, drained).await;
    tracing::info!(
        loaded = report.loaded(),
        waiting = report.still_waiting(),
        "Simulation finished after {} ms",
        report.simulated_ms
    );

    Ok(Outcome {
        report,
        events: harbor.journal().snapshot(),
    })
}

/// Drive the ferry and vehicle tasks on `harbor`. Returns whether the
/// harbor was drained when the ferry was torn down.
pub async fn run_harbor(harbor: Arc<Harbor>, roster: Roster, drain: bool) -> Result<bool> {
    // The ferry must be running before the first vehicle arrives
    let mut ferry_task = tokio::spawn(ferry::run(Arc::clone(&harbor)));

    let mut vehicles = JoinSet::new();
    for vehicle in roster {
        vehicles.spawn(run_vehicle(Arc::clone(&harbor), vehicle));
    }

    let result = async {
        supervise(&mut ferry_task, join_vehicles(&mut vehicles)).await?;
        tracing::debug!("All vehicle tasks joined");
        if drain {
            supervise(&mut ferry_task, wait_drained(&harbor)).await?;
            tracing::debug!("Harbor drained");
        }
        Ok::<(), Error>(())
    }
    .await;

    ferry_task.abort();
    vehicles.abort_all();
    result?;

    // Wait for the abort to land so the report sees a settled harbor
    match ferry_task.await {
        Ok(Err(e)) => return Err(e),
        Ok(Ok(never)) => match never {},
        Err(e) if e.is_cancelled() => {}
        Err(e) => return Err(Error::Task(format!("ferry task: {}", e))),
    }

    Ok(harbor.is_drained().await)
}

/// Run `work` while watching the ferry; a ferry that stops is a failure
async fn supervise<F>(ferry_task: &mut JoinHandle<Result<Infallible>>, work: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    tokio::select! {
        res = ferry_task => Err(ferry_failure(res)),
        res = work => res,
    }
}

fn ferry_failure(res: std::result::Result<Result<Infallible>, JoinError>) -> Error {
    match res {
        Ok(Err(e)) => e,
        Ok(Ok(never)) => match never {},
        Err(e) => Error::Task(format!("ferry task: {}", e)),
    }
}

async fn join_vehicles(vehicles: &mut JoinSet<()>) -> Result<()> {
    while let Some(res) = vehicles.join_next().await {
        res.map_err(|e| Error::Task(format!("vehicle task: {}", e)))?;
    }
    Ok(())
}

async fn wait_drained(harbor: &Harbor) -> Result<()> {
    while !harbor.is_drained().await {
        tokio::time::sleep(DRAIN_POLL).await;
    }
    Ok(())
}

async fn build_report(
    harbor: &Harbor,
    config: &Config,
    started_at: DateTime<Utc>,
    seed: u64,
    start_port: Port,
    drained: bool,
) -> RunReport {
    let journal = harbor.journal();
    let waiting = harbor.waiting().await;

    let ports = Port::ALL
        .iter()
        .map(|port| PortReport {
            port: *port,
            queued: journal.queued_at(*port).len(),
            loaded: journal.loaded_at(*port).len(),
            still_waiting: waiting[port.index()],
        })
        .collect();

    let mut loaded_trips = 0;
    let mut empty_trips = 0;
    let mut units_carried = 0u64;
    for event in journal.events() {
        match event {
            SimEvent::FerryDeparted { load: 0, .. } => empty_trips += 1,
            SimEvent::FerryDeparted { .. } => loaded_trips += 1,
            SimEvent::VehicleLoaded { class, .. } => units_carried += u64::from(class.units()),
            _ => {}
        }
    }

    RunReport {
        started_at,
        seed,
        start_port,
        fleet: config.fleet(),
        drained,
        ports,
        loaded_trips,
        empty_trips,
        units_carried,
        ferry: harbor.ferry().snapshot().await,
        simulated_ms: journal.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timings;
    use ferry_types::{Vehicle, VehicleClass};

    fn quick_config() -> Config {
        Config {
            seed: Some(11),
            start_port: Some(Port::West),
            time_scale: 0.01,
            drain: true,
            ..Config::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_drained_run_conserves_vehicles() {
        let outcome = run_simulation(&quick_config()).await.unwrap();
        let report = &outcome.report;

        assert!(report.drained);
        assert_eq!(report.queued(), 30);
        assert_eq!(report.loaded(), 30);
        assert_eq!(report.still_waiting(), 0);
        assert!(report.is_conserved());
        assert_eq!(report.units_carried, 12 + 10 * 2 + 8 * 3);
        assert_eq!(report.ferry.load, 0);
        assert!(report.loaded_trips > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_undrained_run_stops_after_vehicles_join() {
        let config = Config {
            drain: false,
            ..quick_config()
        };
        let outcome = run_simulation(&config).await.unwrap();

        assert_eq!(outcome.report.queued(), 30);
        assert!(outcome.report.is_conserved());
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_same_roster() {
        let a = run_simulation(&quick_config()).await.unwrap();
        let b = run_simulation(&quick_config()).await.unwrap();
        assert_eq!(a.report.seed, b.report.seed);
        for port in Port::ALL {
            let mut qa = a.queued_at(port);
            let mut qb = b.queued_at(port);
            qa.sort_unstable();
            qb.sort_unstable();
            assert_eq!(qa, qb);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_config_is_rejected_before_start() {
        let config = Config {
            ferry_capacity: 0,
            ..quick_config()
        };
        assert!(matches!(
            run_simulation(&config).await,
            Err(Error::Config(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ferry_failure_aborts_run() {
        let harbor = Arc::new(Harbor::new(3, Port::West, Timings::instant()));
        // a vehicle queued on the wrong side trips the ferry's port check
        harbor
            .area(Port::West)
            .enqueue(Vehicle::new(99, VehicleClass::Car, Port::East, 0), harbor.journal())
            .await;

        let roster = Roster::from_vehicles(vec![Vehicle::new(0, VehicleClass::Car, Port::West, 0)]);
        let err = run_harbor(harbor, roster, true).await.unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }
}
