use std::io;
use std::io::Stdout;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::LevelFilter;
use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Direction, Layout};
use tui::style::{Color, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::Terminal;

use thermistor::config::ReaderConfig;
use thermistor::edt::{Event, EDT};
use thermistor::reader::{Action, ThermistorReader};

use crate::monitor_serial::MonitorSerial;
use crate::sim_logger::SimLogger;
use crate::simulated_thermistor::{SimulatedThermistor, Wiring};

mod monitor_serial;
mod sim_logger;
mod simulated_thermistor;

const SERIAL_LINES: usize = 64;
const LOG_LINES: usize = 32;

static LOGGER: SimLogger = SimLogger::new(LOG_LINES);

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(LevelFilter::Debug);

    let config = ReaderConfig::default();
    config.validate()?;

    let thermistor =
        SimulatedThermistor::create(config.divider, config.divider.fixed_resistor_ohms);
    let serial = MonitorSerial::create(SERIAL_LINES);
    let edt = EDT::create();

    let reader = ThermistorReader::new(&thermistor, &serial, &edt, config);
    let started = Instant::now();
    reader.start();

    enable_raw_mode()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, started, &edt, &reader, &thermistor, &serial);

    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    Ok(result?)
}

fn run(
    terminal: &mut Tui,
    started: Instant,
    edt: &EDT<Action>,
    reader: &ThermistorReader,
    thermistor: &SimulatedThermistor,
    serial: &MonitorSerial,
) -> io::Result<()> {
    draw_tui(terminal, reader, thermistor, serial)?;
    loop {
        match edt.poll() {
            Event::Execute { msg } => reader.process_message(msg),
            Event::Wait { .. } => wait(started, edt, thermistor, &mut || {
                draw_tui(terminal, reader, thermistor, serial)
            })?,
            Event::Halt => break,
        }
        draw_tui(terminal, reader, thermistor, serial)?;
    }
    Ok(())
}

/// Blocks until the wall clock catches up with the EDT clock while handling key presses.
/// Time spent executing and drawing is not added to the cadence.
fn wait<T: Copy>(
    started: Instant,
    edt: &EDT<T>,
    thermistor: &SimulatedThermistor,
    redraw: &mut dyn FnMut() -> io::Result<()>,
) -> io::Result<()> {
    let deadline = deadline(started, edt.now());
    loop {
        let now = Instant::now();
        if now >= deadline {
            return Ok(());
        }
        if !event::poll(deadline - now)? {
            continue;
        }
        if let CEvent::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            match code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    log::info!("Exit");
                    edt.exit();
                    return Ok(());
                }
                KeyCode::Left => thermistor.warm_up(),
                KeyCode::Right => thermistor.cool_down(),
                KeyCode::Char('o') => thermistor.toggle_open(),
                KeyCode::Char('s') => thermistor.toggle_short(),
                _ => {}
            }
            redraw()?;
        }
    }
}

/// Wall clock instant of an EDT timestamp
fn deadline(started: Instant, scheduled_ms: u64) -> Instant {
    started + Duration::from_millis(scheduled_ms)
}

fn draw_tui(
    terminal: &mut Tui,
    reader: &ThermistorReader,
    thermistor: &SimulatedThermistor,
    serial: &MonitorSerial,
) -> io::Result<()> {
    terminal.draw(|rect| {
        let size = rect.size();
        let vertical_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(4),
                    Constraint::Min(5),
                    Constraint::Length(10),
                ]
                .as_ref(),
            )
            .split(size);

        let (wiring, wiring_color) = match thermistor.wiring() {
            Wiring::Connected => ("connected", Color::Green),
            Wiring::Open => ("open circuit", Color::Red),
            Wiring::Shorted => ("shorted to supply", Color::Red),
        };
        let temperature = match reader.last_outcome() {
            Some(Ok(reading)) => format!("{:.2} C", reading.celsius),
            Some(Err(_)) => "--".to_string(),
            None => "".to_string(),
        };
        let sensor_paragraph = Paragraph::new(vec![
            Spans::from(vec![
                Span::raw(format!(
                    "thermistor: {:.0} ohm | wiring: ",
                    thermistor.resistance_ohms()
                )),
                Span::styled(wiring, Style::default().fg(wiring_color)),
                Span::raw(format!(" | temperature: {}", temperature)),
            ]),
            Spans::from(Span::raw(
                "<- warmer  -> colder  o: open  s: short  q: quit",
            )),
        ])
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .title("Sensor")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );

        let monitor_title = match serial.baud_rate() {
            Some(baud_rate) => format!("Serial monitor ({} baud)", baud_rate),
            None => "Serial monitor".to_string(),
        };
        let serial_paragraph = Paragraph::new(tail(serial.lines(), vertical_layout[1].height))
            .block(
                Block::default()
                    .title(monitor_title)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Plain),
            );

        let log_paragraph = Paragraph::new(tail(LOGGER.recent(), vertical_layout[2].height))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().title("Log").borders(Borders::ALL));

        rect.render_widget(sensor_paragraph, vertical_layout[0]);
        rect.render_widget(serial_paragraph, vertical_layout[1]);
        rect.render_widget(log_paragraph, vertical_layout[2]);
    })?;
    Ok(())
}

/// Last lines which fit into a bordered block of the given height
fn tail(lines: Vec<String>, height: u16) -> Vec<Spans<'static>> {
    let visible = height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible);
    lines.into_iter().skip(skip).map(Spans::from).collect()
}
