// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use galatea::budget::StepBudget;
use galatea::compile::compile_page;
use galatea::render::MemorySurface;
use galatea::report::NoticeLog;
use galatea::runtime::Interp;

mod fixtures;

// Benchmark identity (keep stable): group `eval.frames`, case IDs are the
// per-tick chain lengths.
fn benches_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval.frames");

    for chain_len in [4usize, 32, 128] {
        let diagram = fixtures::counter_board(chain_len);
        let log = Arc::new(NoticeLog::new());
        let budget = StepBudget::new();
        let windows = compile_page(&diagram, log.as_ref(), &budget).expect("compile");
        let window = windows.into_iter().next().expect("window");

        let surface = Arc::new(MemorySurface::from_diagram(&diagram));
        let interp = Interp::new(surface, log.clone());
        let runtime =
            tokio::runtime::Builder::new_current_thread().enable_all().build().expect("runtime");

        group.throughput(Throughput::Elements(chain_len as u64));
        group.bench_function(format!("chain_{chain_len}"), |b| {
            b.iter(|| {
                runtime
                    .block_on(interp.run_frames(black_box(&window), &diagram, 1))
                    .expect("run");
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benches_eval);
criterion_main!(benches);
