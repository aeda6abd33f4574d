// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Demo session: a fixed script of device commands.
//
// Failures are reported and the script carries on, so every rejection path
// shows up in the logs alongside the successful ones.

use spoolwerk_core::human_errors::humanize_error;
use spoolwerk_core::types::{ClientId, DeviceKind};
use spoolwerk_print::{CommandOutcome, DeviceCommand, PrinterRegistry, Submission};
use tracing::{info, warn};

/// Commands issued before the network jobs are awaited.
fn opening_script() -> Vec<(DeviceKind, DeviceCommand)> {
    use DeviceKind::{Network, Usb};

    vec![
        (Network, DeviceCommand::connect("Computer1")),
        (Usb, DeviceCommand::connect("Computer2")),
        (Network, DeviceCommand::connect("Computer3")),
        (Usb, DeviceCommand::submit("USB Document X")),
        (Usb, DeviceCommand::submit("USB Document Y")),
        (Usb, DeviceCommand::submit("USB Document Z")),
        (Usb, DeviceCommand::disconnect(None)),
        (Network, DeviceCommand::submit("Document 1")),
        (Network, DeviceCommand::submit("Document 2")),
        (Network, DeviceCommand::submit("Document 3")),
        (Network, DeviceCommand::submit("Document 4")),
    ]
}

/// Commands issued once every queued job has finished.
fn closing_script() -> Vec<(DeviceKind, DeviceCommand)> {
    vec![
        (
            DeviceKind::Network,
            DeviceCommand::disconnect(Some(ClientId::from("Computer1"))),
        ),
        (
            DeviceKind::Network,
            DeviceCommand::disconnect(Some(ClientId::from("Computer3"))),
        ),
    ]
}

pub async fn run(registry: &mut PrinterRegistry) {
    for kind in [DeviceKind::Network, DeviceKind::Usb] {
        if let Err(e) = registry.add_printer(kind) {
            warn!(device = %kind, error = %e, "could not add printer");
        }
    }

    let queued = execute_all(registry, opening_script());
    info!(count = queued.len(), "waiting for queued jobs");
    for submission in queued {
        match submission.completed().await {
            Ok(receipt) => info!(
                job_id = %receipt.job_id,
                document = %receipt.document,
                document_hash = %receipt.document_hash,
                "job complete"
            ),
            Err(e) => warn!(error = %e, "job did not complete"),
        }
    }

    execute_all(registry, closing_script());
}

/// Run each command in order, returning submissions still in a queue.
fn execute_all(
    registry: &mut PrinterRegistry,
    script: Vec<(DeviceKind, DeviceCommand)>,
) -> Vec<Submission> {
    let mut queued = Vec::new();
    for (kind, command) in script {
        match registry.execute(kind, command) {
            Ok(CommandOutcome::Submitted(submission @ Submission::Queued(_))) => {
                queued.push(submission);
            }
            Ok(_) => {}
            Err(e) => {
                let human = humanize_error(&e);
                warn!(device = %kind, error = %e, suggestion = %human.suggestion, "{}", human.message);
            }
        }
    }
    queued
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoolwerk_core::SpoolConfig;

    #[test]
    fn opening_script_releases_usb_before_network_jobs() {
        let script = opening_script();
        let usb_release = script
            .iter()
            .position(|(kind, cmd)| {
                *kind == DeviceKind::Usb && matches!(cmd, DeviceCommand::Disconnect { .. })
            })
            .expect("usb disconnect");
        let first_network_job = script
            .iter()
            .position(|(kind, cmd)| {
                *kind == DeviceKind::Network && matches!(cmd, DeviceCommand::Submit { .. })
            })
            .expect("network submit");
        assert!(usb_release < first_network_job);
    }

    #[tokio::test(start_paused = true)]
    async fn session_leaves_devices_idle() {
        let mut registry = PrinterRegistry::new(SpoolConfig::default()).expect("registry");
        run(&mut registry).await;

        let network = registry
            .device(DeviceKind::Network)
            .and_then(|d| d.as_network())
            .expect("network printer");
        assert!(network.connections().is_empty());
        assert_eq!(network.queue().pending(), 0);

        let usb = registry
            .device(DeviceKind::Usb)
            .and_then(|d| d.as_usb())
            .expect("usb printer");
        assert!(!usb.connection().is_connected());
    }
}
