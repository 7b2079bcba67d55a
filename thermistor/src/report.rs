use core::fmt::Write;

use no_std_compat::string::String;

use crate::config::LineFormat;
use crate::fault::Fault;
use crate::steinhart_hart::Reading;

pub const FAULT_MESSAGE: &str = "ERROR: invalid reading (check wiring / open circuit)";

/// Formats the outcome of one read cycle as a single status line (no line terminator)
pub fn format_line(
    outcome: &Result<Reading, Fault>,
    timestamp_ms: u64,
    format: LineFormat,
) -> String {
    let mut line = String::new();
    // writing into a String cannot fail
    let _ = write_line(&mut line, outcome, timestamp_ms, format);
    line
}

fn write_line<W: Write>(
    out: &mut W,
    outcome: &Result<Reading, Fault>,
    timestamp_ms: u64,
    format: LineFormat,
) -> core::fmt::Result {
    if format == LineFormat::Timestamped {
        write!(out, "[{} ms] ", timestamp_ms)?;
    }
    match (outcome, format) {
        (Err(fault), _) => write!(out, "Raw ADC: {} | {}", fault.raw(), FAULT_MESSAGE),
        (Ok(reading), LineFormat::Plain) => write!(
            out,
            "Raw ADC: {} | Voltage: {:.3} V | Temperature: {:.2} F; {:.2} C",
            reading.raw, reading.voltage, reading.fahrenheit, reading.celsius
        ),
        (Ok(reading), LineFormat::Timestamped) => write!(
            out,
            "Raw ADC: {} | Voltage: {:.3} V | Temp: {:.2} F ({:.2} C)",
            reading.raw, reading.voltage, reading.fahrenheit, reading.celsius
        ),
    }
}
