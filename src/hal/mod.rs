//! Hardware capability interfaces consumed by the game core
//!
//! The core never touches registers. It drives lines, tones, the clock and
//! sleep through these traits; `gpio`, `timer`, `pwm`, `power` and `uart`
//! provide the ATmega128 implementations and `crate::testing` the fakes.

#[cfg(target_arch = "avr")]
pub mod gpio;
#[cfg(target_arch = "avr")]
pub mod power;
#[cfg(target_arch = "avr")]
pub mod pwm;
pub mod ring;
pub mod timer;
#[cfg(target_arch = "avr")]
pub mod uart;

use crate::time::Instant;

/// Identifies one physical I/O line. The encoding belongs to the adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Line(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    Output,
    /// Tri-stated, no pull-up
    Input,
    InputPullUp,
}

/// Line-addressed digital I/O.
///
/// Button and LED lines may share conductors, so both subsystems address
/// lines by id through one `DigitalIo` and never own pins separately.
pub trait DigitalIo {
    fn configure(&mut self, line: Line, mode: PinMode);
    fn write(&mut self, line: Line, high: bool);
    fn read(&mut self, line: Line) -> bool;

    /// Set the output latch first, then switch to output, so the line never
    /// glitches to a stale level.
    #[inline]
    fn drive(&mut self, line: Line, high: bool) {
        self.write(line, high);
        self.configure(line, PinMode::Output);
    }

    #[inline]
    fn release(&mut self, line: Line) {
        self.configure(line, PinMode::Input);
    }
}

/// Buzzer carrier. Level 0 is silence; anything else selects a pitch.
pub trait ToneOutput {
    fn set_level(&mut self, level: u8);
}

/// Interrupt-fed millisecond counter
pub trait MonotonicClock {
    fn now(&self) -> Instant;
    fn reset(&self);
}

/// Low-power halt, resumed only by an input-line edge
pub trait SleepControl {
    fn halt_until_input(&mut self);
}

/// LED colour channel for a marker
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    Green = 0,
    Red = 1,
}

/// Which line plays which role. The same `Line` may appear in more than one
/// role when the board shares conductors between LEDs and buttons.
#[derive(Clone, Copy, Debug)]
pub struct Wiring {
    /// LED cathodes, active low
    pub led_columns: [Line; 3],
    /// LED anodes per row, indexed by `Color`, active high
    pub led_rows: [[Line; 2]; 3],
    /// Button matrix column drives, grounded one at a time
    pub button_drives: [Line; 3],
    /// Button matrix row senses, read with pull-ups
    pub button_senses: [Line; 3],
    /// Connects the button return path to ground. Must be low whenever LEDs
    /// are driven.
    pub ground_enable: Line,
}

impl Wiring {
    /// Every LED line, columns first
    pub fn led_lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.led_columns
            .iter()
            .copied()
            .chain(self.led_rows.iter().flat_map(|row| row.iter().copied()))
    }
}
