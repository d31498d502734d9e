use log::info;
use std::sync::{Mutex, PoisonError};
use std::thread;

/// A counter shared between workers. Every increment is a read-modify-write
/// done under one lock acquisition, so concurrent increments are never lost.
#[derive(Debug, Default)]
pub struct CounterMonitor {
    counter: Mutex<u64>,
}

impl CounterMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter and returns the new value.
    pub fn increment(&self, worker: &str, attempt: usize) -> u64 {
        // A panicking holder cannot leave the counter half-written.
        let mut counter = self.counter.lock().unwrap_or_else(PoisonError::into_inner);
        let current = *counter;
        info!("{} sees counter at attempt {}: {}", worker, attempt, current);
        *counter = current + 1;
        info!("{} increments counter to: {}", worker, *counter);
        *counter
    }

    pub fn value(&self) -> u64 {
        *self.counter.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone)]
pub struct Worker {
    pub name: String,
    pub increments: usize,
}

impl Worker {
    pub fn new(name: impl Into<String>, increments: usize) -> Self {
        Self {
            name: name.into(),
            increments,
        }
    }

    /// Increments `monitor` `increments` times, calling `pause` after each.
    pub fn run(&self, monitor: &CounterMonitor, mut pause: impl FnMut()) {
        for attempt in 1..=self.increments {
            monitor.increment(&self.name, attempt);
            pause();
        }
    }
}

/// Runs every worker on its own thread against one monitor and returns the
/// final count.
pub fn run_workers<P>(monitor: &CounterMonitor, workers: &[Worker], pause: P) -> u64
where
    P: Fn() + Sync,
{
    thread::scope(|scope| {
        for worker in workers {
            let pause = &pause;
            scope.spawn(move || worker.run(monitor, pause));
        }
    });
    monitor.value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_single_worker_counts_its_increments() {
        let monitor = CounterMonitor::new();
        Worker::new("Thread-1", 5).run(&monitor, || {});
        assert_eq!(monitor.value(), 5);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let monitor = CounterMonitor::new();
        let workers: Vec<Worker> = (1..=8)
            .map(|i| Worker::new(format!("Thread-{}", i), 1_000))
            .collect();
        assert_eq!(run_workers(&monitor, &workers, thread::yield_now), 8_000);
    }

    #[test]
    fn test_increment_returns_new_value() {
        let monitor = Arc::new(CounterMonitor::new());
        assert_eq!(monitor.increment("main", 1), 1);
        assert_eq!(monitor.increment("main", 2), 2);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let monitor = Arc::new(CounterMonitor::new());
        monitor.increment("main", 1);

        let poisoner = Arc::clone(&monitor);
        let _ = thread::spawn(move || {
            let _guard = poisoner.counter.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(monitor.increment("main", 2), 2);
    }
}
