#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use thermistor::bsp::adc::AnalogInput;
    use thermistor::bsp::serial::Serial;
    use thermistor::config::{LineFormat, ReaderConfig, READ_PERIOD};
    use thermistor::edt::EDT;
    use thermistor::fault::{Fault, WiringFault};
    use thermistor::reader::{Action, ThermistorReader};

    #[test]
    fn serial_is_started_with_configured_baud_rate() {
        with_bench(ReaderConfig::default(), &|_advance_time, _adc, serial, _reader| {
            assert_eq!(serial.baud_rate.get(), Some(9600));
        });
    }

    #[test]
    fn first_line_is_written_immediately() {
        with_bench(ReaderConfig::default(), &|advance_time, _adc, serial, _reader| {
            advance_time(0);
            let lines = serial.lines();
            assert_eq!(lines.len(), 1);
            let first = &lines[0];
            assert!(
                first.starts_with("[0 ms] Raw ADC: 512 | Voltage: 2.502 V | Temp: "),
                "{}",
                first
            );
        });
    }

    #[test]
    fn lines_are_written_every_period() {
        with_bench(ReaderConfig::default(), &|advance_time, _adc, serial, _reader| {
            advance_time(READ_PERIOD * 4);
            let lines = serial.lines();
            assert_eq!(lines.len(), 5);
            for (i, line) in lines.iter().enumerate() {
                let prefix = format!("[{} ms] ", i as u64 * READ_PERIOD);
                assert!(line.starts_with(&prefix), "{}", line);
            }
        });
    }

    #[test]
    fn plain_format_has_no_timestamp() {
        with_bench(ReaderConfig::plain(), &|advance_time, adc, serial, _reader| {
            adc.set(500);
            advance_time(0);
            let line = serial.last_line();
            assert!(
                line.starts_with("Raw ADC: 500 | Voltage: 2.444 V | Temperature: "),
                "{}",
                line
            );
            assert_eq!(line.split(" | ").count(), 3);
        });
    }

    #[test]
    fn short_to_supply_is_reported_and_skipped() {
        with_bench(ReaderConfig::plain(), &|advance_time, adc, serial, reader| {
            adc.set(1023);
            advance_time(0);
            assert_eq!(
                serial.last_line(),
                "Raw ADC: 1023 | ERROR: invalid reading (check wiring / open circuit)"
            );
            assert_eq!(
                reader.last_outcome(),
                Some(Err(Fault::InvalidReading {
                    raw: 1023,
                    cause: WiringFault::ShortToSupply
                }))
            );
        });
    }

    #[test]
    fn open_circuit_is_reported_with_timestamp() {
        with_bench(ReaderConfig::default(), &|advance_time, adc, serial, _reader| {
            advance_time(READ_PERIOD);
            adc.set(0);
            advance_time(READ_PERIOD);
            let line = serial.last_line();
            assert_eq!(
                line,
                "[1000 ms] Raw ADC: 0 | ERROR: invalid reading (check wiring / open circuit)"
            );
            assert!(!line.contains("NaN") && !line.contains("inf"));
        });
    }

    #[test]
    fn reader_recovers_after_fault() {
        with_bench(ReaderConfig::default(), &|advance_time, adc, serial, reader| {
            adc.set(0);
            advance_time(READ_PERIOD * 2);
            assert!(serial.lines().iter().all(|it| it.contains("ERROR")));

            adc.set(600);
            advance_time(READ_PERIOD);
            assert!(serial.last_line().contains("Raw ADC: 600 | Voltage: 2.933 V | Temp: "));
            assert!(matches!(reader.last_outcome(), Some(Ok(_))));
        });
    }

    #[test]
    fn fault_does_not_change_the_cadence() {
        with_bench(ReaderConfig::default(), &|advance_time, adc, serial, _reader| {
            adc.set(1023);
            advance_time(READ_PERIOD * 3);
            assert_eq!(serial.lines().len(), 4);
        });
    }

    #[test]
    fn same_sample_gives_identical_lines() {
        with_bench(ReaderConfig::plain(), &|advance_time, adc, serial, _reader| {
            adc.set(700);
            advance_time(READ_PERIOD * 9);
            let lines = serial.lines();
            assert_eq!(lines.len(), 10);
            assert!(lines.iter().all(|it| *it == lines[0]));
        });
    }

    #[test]
    fn warmer_thermistor_reads_higher_temperature() {
        with_bench(ReaderConfig::default(), &|advance_time, adc, _serial, reader| {
            adc.set(400);
            advance_time(0);
            let cold = reader.last_outcome().unwrap().unwrap();
            adc.set(800);
            advance_time(READ_PERIOD);
            let warm = reader.last_outcome().unwrap().unwrap();
            assert!(warm.celsius > cold.celsius);
            assert!(warm.resistance_ohms < cold.resistance_ohms);
        });
    }

    #[test]
    fn only_one_cycle_is_pending() {
        let edt = EDT::<Action>::create();
        let adc = TestAdc { raw: Cell::new(512) };
        let serial = TestSerial::default();
        let reader = ThermistorReader::new(&adc, &serial, &edt, ReaderConfig::default());
        reader.start();
        edt.advance_time_by(READ_PERIOD * 10, &|msg| reader.process_message(msg));
        assert_eq!(edt.queue_len(), 1);
        assert_eq!(reader.config().line_format, LineFormat::Timestamped);
    }

    fn with_bench(
        config: ReaderConfig,
        block: &dyn Fn(&dyn Fn(u64), &TestAdc, &TestSerial, &ThermistorReader),
    ) {
        let adc = TestAdc { raw: Cell::new(512) };
        let serial = TestSerial::default();
        let edt = EDT::create();
        let reader = ThermistorReader::new(&adc, &serial, &edt, config);
        reader.start();

        let advance_time = |time: u64| {
            edt.advance_time_by(time, &|msg| {
                reader.process_message(msg);
            });
        };

        block(&advance_time, &adc, &serial, &reader);
    }

    struct TestAdc {
        raw: Cell<u16>,
    }

    impl TestAdc {
        fn set(&self, raw: u16) {
            self.raw.set(raw);
        }
    }

    impl AnalogInput for TestAdc {
        fn read(&self) -> u16 {
            self.raw.get()
        }
    }

    /// Serial port which keeps everything in memory
    #[derive(Default)]
    struct TestSerial {
        baud_rate: Cell<Option<u32>>,
        lines: RefCell<Vec<String>>,
    }

    impl TestSerial {
        fn lines(&self) -> Vec<String> {
            self.lines.borrow().clone()
        }

        fn last_line(&self) -> String {
            self.lines.borrow().last().cloned().unwrap_or_default()
        }
    }

    impl Serial for TestSerial {
        fn begin(&self, baud_rate: u32) {
            self.baud_rate.set(Some(baud_rate));
        }

        fn write_line(&self, line: &str) {
            self.lines.borrow_mut().push(line.to_string());
        }
    }
}
