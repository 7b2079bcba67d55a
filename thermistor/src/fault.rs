use thiserror_no_std::Error;

/// Which end of the ADC range a bad sample is pinned to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WiringFault {
    /// Sample at or below the minimum: the thermistor leg is open
    OpenCircuit,
    /// Sample at or above the maximum: the sense node is shorted to the supply
    ShortToSupply,
}

/// Reason a sample could not be converted to a temperature.
///
/// Faults are reported for the cycle they happen in and then forgotten,
/// the next cycle starts from scratch.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fault {
    #[error("invalid reading {raw}: {cause:?}")]
    InvalidReading { raw: u16, cause: WiringFault },
}

impl Fault {
    pub fn raw(&self) -> u16 {
        match self {
            Fault::InvalidReading { raw, .. } => *raw,
        }
    }
}

/// Configuration rejected at startup
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    #[error("supply voltage must be positive, got {0}")]
    SupplyVoltage(f32),
    #[error("fixed resistor must be positive, got {0} ohm")]
    FixedResistor(f32),
    #[error("ADC range {min}..={max} has no valid samples")]
    AdcRange { min: u16, max: u16 },
    #[error("Steinhart-Hart coefficients do not give a positive temperature")]
    Coefficients,
    #[error("read period must be at least 1 ms")]
    Period,
    #[error("baud rate must not be zero")]
    BaudRate,
}
