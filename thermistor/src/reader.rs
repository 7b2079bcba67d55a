use log::{debug, info, warn};
use no_std_compat::cell::Cell;

use crate::bsp::adc::AnalogInput;
use crate::bsp::serial::Serial;
use crate::config::ReaderConfig;
use crate::edt::EDT;
use crate::fault::Fault;
use crate::report::format_line;
use crate::steinhart_hart::{convert, Reading};

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Action {
    ReadCycle,
}

/// Samples the thermistor every [ReaderConfig::period_ms] and reports each sample over serial.
///
/// Wiring faults are reported for the cycle they occur in; the next cycle is scheduled
/// the same way no matter what the sample was.
pub struct ThermistorReader<'a> {
    adc: &'a dyn AnalogInput,
    serial: &'a dyn Serial,
    edt: &'a EDT<Action>,
    config: ReaderConfig,
    last_outcome: Cell<Option<Result<Reading, Fault>>>,
}

impl<'a> ThermistorReader<'a> {
    pub fn new(
        adc: &'a dyn AnalogInput,
        serial: &'a dyn Serial,
        edt: &'a EDT<Action>,
        config: ReaderConfig,
    ) -> Self {
        ThermistorReader {
            adc,
            serial,
            edt,
            config,
            last_outcome: Cell::new(None),
        }
    }

    pub fn start(&self) {
        self.serial.begin(self.config.baud_rate);
        info!(
            "Reading thermistor every {} ms: {:?}, {:?}",
            self.config.period_ms, self.config.divider, self.config.coefficients
        );
        self.edt.schedule(0, Action::ReadCycle);
    }

    pub fn process_message(&self, action: Action) {
        match action {
            Action::ReadCycle => self.read_cycle(),
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Result of the latest read cycle, [None] before the first one
    pub fn last_outcome(&self) -> Option<Result<Reading, Fault>> {
        self.last_outcome.get()
    }

    fn read_cycle(&self) {
        let timestamp = self.edt.now();
        let raw = self.adc.read();
        let outcome = convert(raw, &self.config);

        match &outcome {
            Ok(reading) => debug!(
                "{} ms: raw {} -> {:.1} ohm, {:.2} C",
                timestamp, raw, reading.resistance_ohms, reading.celsius
            ),
            Err(Fault::InvalidReading { cause, .. }) => {
                warn!("{} ms: raw {} rejected, {:?}?", timestamp, raw, cause)
            }
        }

        self.serial
            .write_line(&format_line(&outcome, timestamp, self.config.line_format));
        self.last_outcome.set(Some(outcome));
        self.edt.schedule(self.config.period_ms, Action::ReadCycle);
    }
}
