//! Output formatting module

use ferry_app::simulation::{Outcome, RunReport};
use ferry_types::{OutputFormat, Result};

pub fn output_report(output_format: OutputFormat, outcome: &Outcome, with_events: bool) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = if with_events {
            serde_json::to_string_pretty(outcome)?
        } else {
            serde_json::to_string_pretty(&outcome.report)?
        };
        println!("{}", content);
    } else {
        print_table(&outcome.report);
    }

    Ok(())
}

fn print_table(report: &RunReport) {
    println!("\nCrossing Report");
    println!("===============");
    println!("Started:         {}", report.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Seed:            {}", report.seed);
    println!("Ferry started:   {}", report.start_port);
    println!(
        "Fleet:           {} cars, {} minibuses, {} trucks",
        report.fleet.cars, report.fleet.minibuses, report.fleet.trucks
    );
    println!("Drained:         {}", if report.drained { "Yes" } else { "No" });

    println!("\n--- Ports ---");
    println!("{:<8} {:>8} {:>8} {:>8}", "Port", "Queued", "Loaded", "Waiting");
    for port in &report.ports {
        println!(
            "{:<8} {:>8} {:>8} {:>8}",
            port.port.index(),
            port.queued,
            port.loaded,
            port.still_waiting
        );
    }
    println!("-------------");

    println!("Loaded trips:    {}", report.loaded_trips);
    println!("Empty trips:     {}", report.empty_trips);
    println!("Units carried:   {}", report.units_carried);
    println!(
        "Ferry now at:    {} ({}/{} units aboard)",
        report.ferry.port, report.ferry.load, report.ferry.capacity
    );
    println!("Simulated time:  {:.1} s", report.simulated_ms as f64 / 1000.0);

    if !report.is_conserved() {
        println!("\nWarning: vehicle counts do not add up");
    }
}
