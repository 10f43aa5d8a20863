use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use fanlog::{Color, fanlog, logger_config};

fn count_errors(color: Color, message: &str, errors: &AtomicUsize) {
    if color == Color::Red {
        errors.fetch_add(1, Ordering::Relaxed);
        eprint!("callback saw: {message}");
    }
}

fn main() {
    let path = std::env::temp_dir().join("fanlog_example.log");
    let _guard = logger_config()
        .with_log_file(&path, false)
        .expect("Unable to open log file")
        .init_global();
    fanlog::install_log_bridge(log::LevelFilter::Info).expect("Another logger is installed");

    let errors = Arc::new(AtomicUsize::new(0));
    fanlog::add_callback(count_errors, errors.clone()).expect("Callback table is full");

    fanlog!(Color::Default, "plain line {}\n", 1);
    fanlog!(Color::Green, "green line\n");
    fanlog::log_info!("starting {} workers", 4);
    fanlog::log_error!("worker {} failed", 2);
    log::warn!("forwarded from the log crate");
    for i in 0..10 {
        fanlog::log_every!(5, fanlog::log_verbose!("tick {i}"));
        fanlog::log_once!(fanlog::log_warn!("first tick"));
    }

    println!(
        "errors seen by callback: {}",
        errors.load(Ordering::Relaxed)
    );
    fanlog::term();
    print!(
        "{} contains:\n{}",
        path.display(),
        std::fs::read_to_string(&path).unwrap_or_default()
    );
}
