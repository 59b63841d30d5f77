// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use galatea::budget::StepBudget;
use galatea::compile::compile_page;
use galatea::report::NoticeLog;

mod fixtures;

// Benchmark identity (keep stable): group `compile.page`, case IDs are the
// chain lengths so results stay comparable over time.
fn benches_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile.page");

    for chain_len in [4usize, 32, 128] {
        let diagram = fixtures::counter_board(chain_len);
        group.throughput(Throughput::Elements(chain_len as u64));
        group.bench_function(format!("chain_{chain_len}"), |b| {
            b.iter(|| {
                let log = NoticeLog::new();
                let budget = StepBudget::new();
                let windows =
                    compile_page(black_box(&diagram), &log, &budget).expect("compile");
                black_box(windows.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benches_compile);
criterion_main!(benches);
