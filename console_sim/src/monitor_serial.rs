use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use thermistor::bsp::serial::Serial;

/// Serial port which keeps the last lines in memory, like the scrollback of a serial monitor
pub struct MonitorSerial {
    capacity: usize,
    baud_rate: Cell<Option<u32>>,
    lines: RefCell<VecDeque<String>>,
}

impl MonitorSerial {
    /// Factory function to create a serial monitor holding up to [capacity] lines
    pub fn create(capacity: usize) -> Self {
        MonitorSerial {
            capacity,
            baud_rate: Cell::new(None),
            lines: RefCell::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn baud_rate(&self) -> Option<u32> {
        self.baud_rate.get()
    }

    /// Oldest line first
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().iter().cloned().collect()
    }
}

impl Serial for MonitorSerial {
    fn begin(&self, baud_rate: u32) {
        log::info!("Serial monitor at {} baud", baud_rate);
        self.baud_rate.set(Some(baud_rate));
    }

    fn write_line(&self, line: &str) {
        let mut lines = self.lines.borrow_mut();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line.to_string());
    }
}
