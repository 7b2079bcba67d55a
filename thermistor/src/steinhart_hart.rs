use crate::config::{Divider, ReaderConfig, SteinhartHart};
use crate::fault::{Fault, WiringFault};

pub const ZERO_CELSIUS_IN_KELVIN: f32 = 273.15;

/// Everything derived from one raw sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub raw: u16,
    pub voltage: f32,
    pub resistance_ohms: f32,
    pub kelvin: f32,
    pub celsius: f32,
    pub fahrenheit: f32,
}

/// Converts a raw sample to a temperature.
///
/// Samples pinned to either end of the ADC range are rejected before any division or
/// logarithm is attempted, a valid sample always yields finite values.
pub fn convert(raw: u16, config: &ReaderConfig) -> Result<Reading, Fault> {
    let divider = &config.divider;
    if !divider.is_valid_sample(raw) {
        let cause = if raw <= divider.adc_min {
            WiringFault::OpenCircuit
        } else {
            WiringFault::ShortToSupply
        };
        return Err(Fault::InvalidReading { raw, cause });
    }

    let voltage = adc_to_voltage(raw, divider);
    let resistance_ohms = thermistor_resistance(raw, divider);
    let kelvin = resistance_to_kelvin(resistance_ohms, &config.coefficients);
    let celsius = kelvin_to_celsius(kelvin);
    Ok(Reading {
        raw,
        voltage,
        resistance_ohms,
        kelvin,
        celsius,
        fahrenheit: celsius_to_fahrenheit(celsius),
    })
}

pub fn adc_to_voltage(raw: u16, divider: &Divider) -> f32 {
    raw as f32 * (divider.supply_voltage / divider.adc_max as f32)
}

/// Thermistor is the upper leg of the divider. Only meaningful for a valid sample.
pub fn thermistor_resistance(raw: u16, divider: &Divider) -> f32 {
    divider.fixed_resistor_ohms * (divider.adc_max as f32 / raw as f32 - 1.0)
}

pub fn resistance_to_kelvin(resistance_ohms: f32, coefficients: &SteinhartHart) -> f32 {
    let log_r = libm::logf(resistance_ohms);
    1.0 / (coefficients.c1 + log_r * (coefficients.c2 + coefficients.c3 * log_r * log_r))
}

pub fn kelvin_to_celsius(kelvin: f32) -> f32 {
    kelvin - ZERO_CELSIUS_IN_KELVIN
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}
