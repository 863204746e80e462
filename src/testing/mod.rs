//! Deterministic stand-ins for the hardware capabilities
//!
//! `FakeIo` models the shared-line matrix closely enough to catch ordering
//! mistakes: it knows which buttons are held, which LEDs a given set of line
//! states would light, and counts every moment the button ground is asserted
//! while an LED is lit.

use crate::game::Coord;
use crate::hal::{
    Color, DigitalIo, Line, MonotonicClock, PinMode, SleepControl, ToneOutput, Wiring,
};
use crate::time::Instant;
use std::cell::Cell;
use std::collections::BTreeSet;

/// Rows share the green anodes with the button senses and the columns double
/// as button drives, like the production board.
pub const TEST_WIRING: Wiring = Wiring {
    led_columns: [Line(6), Line(7), Line(8)],
    led_rows: [[Line(0), Line(1)], [Line(2), Line(3)], [Line(4), Line(5)]],
    button_drives: [Line(6), Line(7), Line(8)],
    button_senses: [Line(0), Line(2), Line(4)],
    ground_enable: Line(9),
};

const LINES: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Lit {
    pub row: u8,
    pub col: u8,
    pub color: Color,
}

impl Lit {
    pub fn new(row: u8, col: u8, color: Color) -> Self {
        Self { row, col, color }
    }
}

pub struct FakeIo {
    wiring: Wiring,
    modes: [PinMode; LINES],
    levels: [bool; LINES],
    pressed: Vec<Coord>,
    lit: BTreeSet<Lit>,
    conflicts: u32,
}

impl FakeIo {
    pub fn new(wiring: Wiring) -> Self {
        Self {
            wiring,
            modes: [PinMode::Input; LINES],
            levels: [false; LINES],
            pressed: Vec::new(),
            lit: BTreeSet::new(),
            conflicts: 0,
        }
    }

    pub fn press(&mut self, coord: Coord) {
        if !self.pressed.contains(&coord) {
            self.pressed.push(coord);
        }
    }

    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    pub fn mode(&self, line: Line) -> PinMode {
        self.modes[line.0 as usize]
    }

    pub fn level(&self, line: Line) -> bool {
        self.levels[line.0 as usize]
    }

    /// Times the ground enable was asserted while an LED was lit
    pub fn conflicts(&self) -> u32 {
        self.conflicts
    }

    /// Every LED lit at any point since the last call, sorted
    pub fn take_lit(&mut self) -> Vec<Lit> {
        let lit = self.lit.iter().copied().collect();
        self.lit.clear();
        lit
    }

    pub fn lit_now(&self) -> Vec<Lit> {
        let mut lit = Vec::new();
        for (col, &column) in self.wiring.led_columns.iter().enumerate() {
            if !self.driven(column, false) {
                continue;
            }
            for (row, lines) in self.wiring.led_rows.iter().enumerate() {
                for color in [Color::Green, Color::Red] {
                    if self.driven(lines[color as usize], true) {
                        lit.push(Lit::new(row as u8, col as u8, color));
                    }
                }
            }
        }
        lit
    }

    fn driven(&self, line: Line, high: bool) -> bool {
        self.mode(line) == PinMode::Output && self.level(line) == high
    }

    fn observe(&mut self) {
        let lit = self.lit_now();
        if !lit.is_empty() && self.driven(self.wiring.ground_enable, true) {
            self.conflicts += 1;
        }
        self.lit.extend(lit);
    }

    fn sense_pulled_low(&self, line: Line) -> bool {
        if !self.driven(self.wiring.ground_enable, true) {
            return false;
        }
        self.pressed.iter().any(|coord| {
            self.wiring.button_senses[coord.row() as usize] == line
                && self.driven(self.wiring.button_drives[coord.col() as usize], false)
        })
    }
}

impl DigitalIo for FakeIo {
    fn configure(&mut self, line: Line, mode: PinMode) {
        let index = line.0 as usize;
        self.modes[index] = mode;
        // Same latch semantics as an AVR port: input mode picks the pull-up.
        match mode {
            PinMode::Input => self.levels[index] = false,
            PinMode::InputPullUp => self.levels[index] = true,
            PinMode::Output => {}
        }
        self.observe();
    }

    fn write(&mut self, line: Line, high: bool) {
        self.levels[line.0 as usize] = high;
        self.observe();
    }

    fn read(&mut self, line: Line) -> bool {
        match self.mode(line) {
            PinMode::Output => self.level(line),
            PinMode::InputPullUp => !self.sense_pulled_low(line),
            PinMode::Input => false,
        }
    }
}

#[derive(Default)]
pub struct FakeTone {
    pub level: u8,
    pub history: Vec<u8>,
}

impl ToneOutput for FakeTone {
    fn set_level(&mut self, level: u8) {
        self.level = level;
        self.history.push(level);
    }
}

/// Settable clock; the test moves time by hand.
#[derive(Default)]
pub struct FakeClock {
    millis: Cell<u32>,
}

impl FakeClock {
    pub fn set(&self, ms: u32) {
        self.millis.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.millis.set(self.millis.get().wrapping_add(ms));
    }
}

impl MonotonicClock for FakeClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.millis.get())
    }

    fn reset(&self) {
        self.millis.set(0);
    }
}

#[derive(Default)]
pub struct FakeSleep {
    pub halts: u32,
}

impl SleepControl for FakeSleep {
    fn halt_until_input(&mut self) {
        self.halts += 1;
    }
}

/// `ufmt` sink collecting output as text
#[derive(Default)]
pub struct LogBuffer(pub std::string::String);

impl ufmt::uWrite for LogBuffer {
    type Error = core::convert::Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.push_str(s);
        Ok(())
    }
}
