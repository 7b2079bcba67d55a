use std::cell::Cell;

use thermistor::bsp::adc::AnalogInput;
use thermistor::config::Divider;

const MIN_RESISTANCE: f32 = 10.0;
const MAX_RESISTANCE: f32 = 1_000_000.0;
/// Resistance changes by this factor on every key press
const STEP: f32 = 0.9;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Wiring {
    Connected,
    Open,
    Shorted,
}

/// NTC thermistor in a voltage divider, sampled by an ideal ADC
pub struct SimulatedThermistor {
    divider: Divider,
    resistance_ohms: Cell<f32>,
    wiring: Cell<Wiring>,
}

impl SimulatedThermistor {
    /// Factory function to create a connected thermistor with the given resistance
    pub fn create(divider: Divider, resistance_ohms: f32) -> Self {
        SimulatedThermistor {
            divider,
            resistance_ohms: Cell::new(resistance_ohms),
            wiring: Cell::new(Wiring::Connected),
        }
    }

    pub fn resistance_ohms(&self) -> f32 {
        self.resistance_ohms.get()
    }

    pub fn wiring(&self) -> Wiring {
        self.wiring.get()
    }

    /// NTC: warmer means lower resistance
    pub fn warm_up(&self) {
        self.set_resistance(self.resistance_ohms.get() * STEP);
    }

    pub fn cool_down(&self) {
        self.set_resistance(self.resistance_ohms.get() / STEP);
    }

    pub fn toggle_open(&self) {
        self.toggle(Wiring::Open);
    }

    pub fn toggle_short(&self) {
        self.toggle(Wiring::Shorted);
    }

    fn toggle(&self, fault: Wiring) {
        let wiring = if self.wiring.get() == fault {
            Wiring::Connected
        } else {
            fault
        };
        log::info!("Wiring: {:?}", wiring);
        self.wiring.set(wiring);
    }

    fn set_resistance(&self, resistance_ohms: f32) {
        self.resistance_ohms
            .set(resistance_ohms.max(MIN_RESISTANCE).min(MAX_RESISTANCE));
    }

    /// Inverse of the divider equation.
    /// Clamped so that a connected thermistor never reads as a fault.
    fn sample(&self) -> u16 {
        let adc_max = self.divider.adc_max as f32;
        let raw = adc_max / (self.resistance_ohms.get() / self.divider.fixed_resistor_ohms + 1.0);
        let lowest = self.divider.adc_min as f32 + 1.0;
        let highest = adc_max - 1.0;
        raw.round().max(lowest).min(highest) as u16
    }
}

impl AnalogInput for SimulatedThermistor {
    fn read(&self) -> u16 {
        match self.wiring.get() {
            Wiring::Connected => self.sample(),
            Wiring::Open => self.divider.adc_min,
            Wiring::Shorted => self.divider.adc_max,
        }
    }
}
