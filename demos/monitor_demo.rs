use rand::Rng;
use scicalc_rs::monitor::{run_workers, CounterMonitor, Worker};
use std::thread;
use std::time::Duration;

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let monitor = CounterMonitor::new();
    let workers = [Worker::new("Thread-1", 5), Worker::new("Thread-2", 5)];

    let total = run_workers(&monitor, &workers, || {
        let millis = rand::rng().random_range(100..300);
        thread::sleep(Duration::from_millis(millis));
    });

    println!("Final counter value: {}", total);
}
