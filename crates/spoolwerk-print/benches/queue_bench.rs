// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for job submission and drain throughput in the
// spoolwerk-print crate.

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use spoolwerk_core::{ClientId, SpoolConfig};
use spoolwerk_print::{EventBus, JobQueue, UsbPrinter};

fn bench_network_drain(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("tokio runtime");

    c.bench_function("network_submit_and_drain_100", |b| {
        b.to_async(&rt).iter(|| async {
            let queue = JobQueue::new(Duration::ZERO, EventBus::new(256)).expect("queue");
            let handles: Vec<_> = (0..100)
                .map(|n| queue.submit(format!("Document {n}")))
                .collect();
            for handle in handles {
                black_box(handle.wait().await.expect("completion"));
            }
        });
    });
}

fn bench_usb_print(c: &mut Criterion) {
    let mut printer = UsbPrinter::new(&SpoolConfig::default(), EventBus::new(256));
    printer
        .connect(ClientId::from("bench"))
        .expect("connect");

    c.bench_function("usb_print", |b| {
        b.iter(|| black_box(printer.print(black_box("USB Document")).expect("print")));
    });
}

criterion_group!(benches, bench_network_drain, bench_usb_print);
criterion_main!(benches);
