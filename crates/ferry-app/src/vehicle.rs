//! Vehicle tasks: pass a toll gate, join the waiting area, done

use std::sync::Arc;

use ferry_types::{SimEvent, Vehicle};

use crate::harbor::Harbor;

pub async fn run_vehicle(harbor: Arc<Harbor>, vehicle: Vehicle) {
    let journal = harbor.journal();
    journal.record(SimEvent::VehicleStarted {
        vehicle: vehicle.id,
        class: vehicle.class,
        port: vehicle.origin,
    });

    harbor.gate(vehicle.gate).pass(harbor.timings().toll).await;
    journal.record(SimEvent::TollPassed {
        vehicle: vehicle.id,
        gate: vehicle.gate,
    });

    harbor.area(vehicle.origin).enqueue(vehicle, journal).await;
    harbor.notify_arrival();
}
