#![cfg(feature = "verbose-logging")]

use log::{LevelFilter, Log, Metadata, Record};
use sigma_transform::window::{gaussian, identity};
use sigma_transform::SigmaTransform1D;
use std::sync::Mutex;

struct Capture(Mutex<Vec<String>>);

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }
    fn log(&self, record: &Record) {
        self.0.lock().unwrap().push(record.args().to_string());
    }
    fn flush(&self) {}
}

static LOGGER: Capture = Capture(Mutex::new(Vec::new()));

#[test]
fn debug_events_are_emitted() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Debug);

    let signal = [1.0, f64::NAN, 2.0, f64::INFINITY, 0.0, 1.0, 2.0, 3.0];
    let mut st = SigmaTransform1D::new(identity(), gaussian(2.0), 8.0, 8, &[-2.0, 0.0, 2.0]).unwrap();
    st.analyze(&signal).unwrap().synthesize().unwrap();

    let lines = LOGGER.0.lock().unwrap();
    assert!(lines.iter().any(|l| l.contains("window bank") && l.contains("channels=3")));
    assert!(lines.iter().any(|l| l == "sanitized 2 non-finite samples"));
    assert!(lines.iter().any(|l| l.starts_with("analyze: 3 channels")));
    assert!(lines.iter().any(|l| l.starts_with("synthesize: 3 channels")));
}
