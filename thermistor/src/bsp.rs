pub mod adc {
    /// A single analog channel behind an ADC. [read] returns the quantized sample.
    pub trait AnalogInput {
        fn read(&self) -> u16;
    }
}

pub mod serial {
    pub const DEFAULT_BAUD_RATE: u32 = 9600;

    /// Line-oriented output, like a UART to a serial monitor
    pub trait Serial {
        /// Called once at startup, before the first line is written
        fn begin(&self, baud_rate: u32);
        fn write_line(&self, line: &str);
    }
}
