use crate::bsp::serial::DEFAULT_BAUD_RATE;
use crate::fault::ConfigError;
use crate::steinhart_hart::resistance_to_kelvin;

pub const READ_PERIOD: u64 = 500;

/// Voltage divider in front of the ADC:
/// supply -> thermistor -> sense node -> fixed resistor -> ground
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Divider {
    pub supply_voltage: f32,
    pub fixed_resistor_ohms: f32,
    pub adc_min: u16,
    pub adc_max: u16,
}

impl Divider {
    /// 5V reference, 10k resistor, 10 bit ADC
    pub const fn ten_bit_5v() -> Self {
        Divider {
            supply_voltage: 5.0,
            fixed_resistor_ohms: 10_000.0,
            adc_min: 0,
            adc_max: 1023,
        }
    }

    /// Samples strictly inside the ADC range are the only ones the formula accepts
    pub fn is_valid_sample(&self, raw: u16) -> bool {
        raw > self.adc_min && raw < self.adc_max
    }
}

/// Coefficients of the simplified Steinhart-Hart equation `1/T = c1 + c2 ln(R) + c3 ln(R)^3`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteinhartHart {
    pub c1: f32,
    pub c2: f32,
    pub c3: f32,
}

impl SteinhartHart {
    /// Generic 10k NTC coefficients. Calibration source unknown, good to a couple of degrees.
    pub const fn ntc_10k() -> Self {
        SteinhartHart {
            c1: 1.009249522e-03,
            c2: 2.378405444e-04,
            c3: 2.019202697e-07,
        }
    }

    /// Finite coefficients giving a finite, positive absolute temperature at [reference_ohms]
    pub fn is_plausible(&self, reference_ohms: f32) -> bool {
        let finite = self.c1.is_finite() && self.c2.is_finite() && self.c3.is_finite();
        let kelvin = resistance_to_kelvin(reference_ohms, self);
        finite && kelvin.is_finite() && kelvin > 0.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineFormat {
    /// `Raw ADC: .. | Voltage: .. V | Temperature: .. F; .. C`
    Plain,
    /// `[.. ms] Raw ADC: .. | Voltage: .. V | Temp: .. F (.. C)`
    Timestamped,
}

/// Everything the reader needs, built once at startup and never changed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReaderConfig {
    pub divider: Divider,
    pub coefficients: SteinhartHart,
    /// Time between two read cycles, milliseconds
    pub period_ms: u64,
    pub baud_rate: u32,
    pub line_format: LineFormat,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig::timestamped()
    }
}

impl ReaderConfig {
    pub const fn timestamped() -> Self {
        ReaderConfig {
            divider: Divider::ten_bit_5v(),
            coefficients: SteinhartHart::ntc_10k(),
            period_ms: READ_PERIOD,
            baud_rate: DEFAULT_BAUD_RATE,
            line_format: LineFormat::Timestamped,
        }
    }

    pub const fn plain() -> Self {
        ReaderConfig {
            line_format: LineFormat::Plain,
            ..ReaderConfig::timestamped()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let divider = &self.divider;
        if !(divider.supply_voltage.is_finite() && divider.supply_voltage > 0.0) {
            return Err(ConfigError::SupplyVoltage(divider.supply_voltage));
        }
        if !(divider.fixed_resistor_ohms.is_finite() && divider.fixed_resistor_ohms > 0.0) {
            return Err(ConfigError::FixedResistor(divider.fixed_resistor_ohms));
        }
        // at least one sample has to fit strictly between min and max
        if divider.adc_max <= divider.adc_min.saturating_add(1) {
            return Err(ConfigError::AdcRange {
                min: divider.adc_min,
                max: divider.adc_max,
            });
        }
        if !self.coefficients.is_plausible(divider.fixed_resistor_ohms) {
            return Err(ConfigError::Coefficients);
        }
        if self.period_ms == 0 {
            return Err(ConfigError::Period);
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::BaudRate);
        }
        Ok(())
    }
}
