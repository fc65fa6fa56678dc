//! Drive one fill sequence against the built-in demo page.
//!
//! There is no real browser here: the engine runs against the synthetic
//! TM30 page, which mimics the form's controls, option panels, and reveal
//! delays. Useful for demoing the sequence and checking a profile's data
//! before a live run.

use config::Timing;
use formdom::tm30_page;
use tm30_engine::Engine;
use tm30_protocol::{
    EngineEvent, FillReport, Person,
    ipc::{FillRequest, command_channel, event_channel},
};
use tracing::debug;

use crate::error::{Error, Result};

/// Run a full fill for `person` and return the engine's report.
pub fn run(person: Person, timing: Timing) -> Result<FillReport> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(drive(person, timing))
}

async fn drive(person: Person, timing: Timing) -> Result<FillReport> {
    let page = tm30_page();
    let (events_tx, mut events_rx) = event_channel();
    let engine = Engine::new(page.dom.clone(), timing, events_tx);

    let (cmd_tx, cmd_rx) = command_channel();
    let server = tokio::spawn(engine.serve(cmd_rx));

    let (req, ack_rx) = FillRequest::new(person);
    cmd_tx.send(req).map_err(|_| Error::EngineStopped)?;
    let ack = ack_rx.await.map_err(|_| Error::EngineStopped)?;
    debug!(?ack, "fill command acknowledged");

    let mut report = None;
    while let Some(event) = events_rx.recv().await {
        match event {
            EngineEvent::FillStarted(id) => println!("filling profile {id}..."),
            EngineEvent::FieldSkipped { field, reason } => {
                println!("  skipped {field}: {reason}");
            }
            EngineEvent::FillCompleted(r) => {
                report = Some(r);
                break;
            }
        }
    }
    drop(cmd_tx);
    server.await.map_err(|_| Error::EngineStopped)?;

    let report = report.ok_or(Error::EngineStopped)?;
    println!(
        "done: {} filled, {} skipped",
        report.filled.len(),
        report.skipped.len()
    );
    for name in &report.filled {
        println!("  {name}");
    }
    Ok(report)
}
