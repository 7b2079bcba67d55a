use std::collections::VecDeque;
use std::sync::Mutex;

use log::{Level, Metadata, Record};

/// Logger which keeps the latest records for the log panel, stdout belongs to the TUI
pub struct SimLogger {
    capacity: usize,
    records: Mutex<VecDeque<String>>,
}

impl SimLogger {
    pub const fn new(capacity: usize) -> Self {
        SimLogger {
            capacity,
            records: Mutex::new(VecDeque::new()),
        }
    }

    /// Oldest record first
    pub fn recent(&self) -> Vec<String> {
        match self.records.lock() {
            Ok(records) => records.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl log::Log for SimLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut records) = self.records.lock() {
            if records.len() == self.capacity {
                records.pop_front();
            }
            records.push_back(format!("{:<5} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}
