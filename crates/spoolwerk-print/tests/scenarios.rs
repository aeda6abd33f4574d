// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end device scenarios driven through the registry.

use tokio::sync::broadcast;

use spoolwerk_core::{ClientId, DeviceEvent, DeviceKind, SpoolConfig, SpoolError};
use spoolwerk_print::{PrinterRegistry, Submission};

fn registry() -> PrinterRegistry {
    let mut registry = PrinterRegistry::new(SpoolConfig::default()).expect("registry");
    registry.add_printer(DeviceKind::Usb).expect("usb");
    registry
}

/// Compact label for ordering assertions.
fn label(event: &DeviceEvent) -> String {
    match event {
        DeviceEvent::Connected { client, .. } => format!("connect:{client}"),
        DeviceEvent::Disconnected { client, .. } => match client {
            Some(client) => format!("disconnect:{client}"),
            None => "disconnect".to_string(),
        },
        DeviceEvent::Queued { document, .. } => format!("queued:{document}"),
        DeviceEvent::PrintStarted { document, .. } => format!("start:{document}"),
        DeviceEvent::PrintFinished { document, .. } => format!("finish:{document}"),
        DeviceEvent::Rejected { operation, .. } => format!("rejected:{operation}"),
    }
}

fn drain_ready(rx: &mut broadcast::Receiver<DeviceEvent>) -> Vec<String> {
    std::iter::from_fn(|| rx.try_recv().ok())
        .map(|e| label(&e))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn network_burst_prints_in_order_one_at_a_time() {
    let mut registry = registry();
    registry.add_printer(DeviceKind::Network).expect("network");
    let mut rx = registry.subscribe();

    let submissions: Vec<Submission> = ["Doc1", "Doc2", "Doc3"]
        .into_iter()
        .map(|doc| {
            registry
                .submit_document(DeviceKind::Network, doc)
                .expect("submit")
        })
        .collect();

    // Accepted immediately, nothing printed yet.
    assert_eq!(
        drain_ready(&mut rx),
        ["queued:Doc1", "queued:Doc2", "queued:Doc3"]
    );

    for submission in submissions {
        submission.completed().await.expect("completed");
    }

    assert_eq!(
        drain_ready(&mut rx),
        [
            "start:Doc1",
            "finish:Doc1",
            "start:Doc2",
            "finish:Doc2",
            "start:Doc3",
            "finish:Doc3",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn submissions_during_printing_join_the_tail() {
    let mut registry = registry();
    registry.add_printer(DeviceKind::Network).expect("network");
    let mut rx = registry.subscribe();

    let first = registry
        .submit_document(DeviceKind::Network, "early")
        .expect("submit");
    // Let the drain start printing the first job.
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    let second = registry
        .submit_document(DeviceKind::Network, "late")
        .expect("submit");

    first.completed().await.expect("first");
    second.completed().await.expect("second");

    assert_eq!(
        drain_ready(&mut rx),
        [
            "queued:early",
            "start:early",
            "queued:late",
            "finish:early",
            "start:late",
            "finish:late",
        ]
    );
}

#[test]
fn usb_exclusive_link_rejects_second_client() {
    let mut registry = registry();
    registry.connect(DeviceKind::Usb, "A").expect("connect A");

    let err = registry.connect(DeviceKind::Usb, "B").unwrap_err();
    assert!(matches!(err, SpoolError::AlreadyConnected { .. }));

    let holder = registry
        .device(DeviceKind::Usb)
        .and_then(|d| d.as_usb())
        .and_then(|p| p.connection().holder().cloned());
    assert_eq!(holder, Some(ClientId::from("A")));
}

#[test]
fn usb_print_then_foreign_disconnect() {
    let mut registry = registry();
    let mut rx = registry.subscribe();

    registry.connect(DeviceKind::Usb, "C1").expect("connect");
    let submission = registry
        .submit_document(DeviceKind::Usb, "X")
        .expect("print");
    assert!(matches!(submission, Submission::Printed(_)));

    let err = registry
        .disconnect(DeviceKind::Usb, Some(ClientId::from("C2")))
        .unwrap_err();
    assert!(matches!(err, SpoolError::WrongClient { .. }));

    assert_eq!(
        drain_ready(&mut rx),
        ["connect:C1", "start:X", "finish:X", "rejected:disconnect"]
    );

    // Still held by C1, which can release without naming itself.
    registry.disconnect(DeviceKind::Usb, None).expect("release");
}

#[test]
fn usb_print_while_unconnected_emits_no_completion() {
    let mut registry = registry();
    let mut rx = registry.subscribe();

    let result = registry.submit_document(DeviceKind::Usb, "X");
    assert!(matches!(result, Err(SpoolError::NotConnected)));
    assert_eq!(drain_ready(&mut rx), ["rejected:print"]);
}

#[tokio::test(start_paused = true)]
async fn devices_are_independent() {
    let mut registry = registry();
    registry.add_printer(DeviceKind::Network).expect("network");
    registry.connect(DeviceKind::Network, "Computer1").expect("net");
    registry.connect(DeviceKind::Usb, "Computer2").expect("usb");

    let queued = registry
        .submit_document(DeviceKind::Network, "Document 1")
        .expect("network");
    // USB prints while the network job is still waiting on its delay.
    let printed = registry
        .submit_document(DeviceKind::Usb, "USB Document X")
        .expect("usb")
        .completed()
        .await
        .expect("usb receipt");
    assert_eq!(printed.client, Some(ClientId::from("Computer2")));

    let receipt = queued.completed().await.expect("network receipt");
    assert!(receipt.finished_at >= printed.finished_at);
}
