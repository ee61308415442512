use std::env;
use std::thread;
use std::time::Instant;

use serde::Serialize;
use switchyard_core::ports::ManagedPool;
use switchyard_core::{DispatchConfig, Dispatcher, StrategyKind};
use tracing_subscriber::EnvFilter;

const DEFAULT_TASKS: usize = 8;

#[derive(Debug, Serialize)]
struct TaskReport {
    index: usize,
    thread: String,
    on_caller: bool,
}

#[derive(Debug, Serialize)]
struct RunReport {
    mode: StrategyKind,
    pool_workers: usize,
    tasks: Vec<TaskReport>,
    failed: usize,
    elapsed_ms: u128,
}

fn thread_label() -> String {
    let current = thread::current();
    current
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{:?}", current.id()))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // (A) host toggle: SWITCHYARD_DISPATCH_MODE=inline|pooled
    DispatchConfig::from_env().apply();

    let count = env::args()
        .nth(1)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(DEFAULT_TASKS);

    // (B) submit a batch, the way message-send call sites would
    let caller = thread_label();
    let start = Instant::now();
    let completions: Vec<_> = (0..count)
        .map(|index| {
            let caller = caller.clone();
            Dispatcher::submit(move || {
                let thread = thread_label();
                TaskReport {
                    index,
                    on_caller: thread == caller,
                    thread,
                }
            })
        })
        .collect();

    // (C) collect in submission order; completion order is up to the strategy
    let mut tasks = Vec::with_capacity(count);
    let mut failed = 0;
    for completion in completions {
        match completion.await {
            Ok(report) => tasks.push(report),
            Err(err) => {
                tracing::error!(error = %err, "task failed");
                failed += 1;
            }
        }
    }

    let report = RunReport {
        mode: Dispatcher::mode(),
        pool_workers: Dispatcher::default_pool().worker_count(),
        tasks,
        failed,
        elapsed_ms: start.elapsed().as_millis(),
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(err) => tracing::error!(error = %err, "failed to render report"),
    }
}
