//! Shutdown-on-exit logging
//!
//! Installs a capturing logger, so this file holds the only test that needs
//! one.

use launch_core::actions::Shutdown;
use launch_core::{Action, Event, LaunchContext};
use std::sync::Mutex;

static RECORDS: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

#[test]
fn test_shutdown_logs_exited_process() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Info);

    let mut ctx = LaunchContext::new();
    let exited = Event::ProcessExited {
        process_name: "worker1".to_string(),
        pid: Some(4242),
        returncode: Some(1),
    };
    ctx.with_current_event(exited, |ctx| Shutdown::new().execute(ctx))
        .unwrap();

    let records = RECORDS.lock().unwrap();
    let mention = records
        .iter()
        .position(|r| r.contains("worker1"))
        .expect("no record mentions the exited process");
    assert_eq!(
        records[mention],
        "process[worker1] was required: shutting down launched system"
    );
    assert_eq!(ctx.take_pending_event(), Some(Event::shutdown("reason not given")));
}
