mod failures;
mod nullability;
mod shopping;
mod simple;

use failures::failures;
use log::LevelFilter;
use nullability::nullability;
use rowbind::{ConnectionProvider, Database};
use shopping::shopping;
use simple::simple;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Runs the whole suite against a database, every driver calls this from its own tests.
pub fn execute_tests<P: ConnectionProvider>(db: &Database<P>) {
    simple(db);
    shopping(db);
    nullability(db);
    failures(db);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
