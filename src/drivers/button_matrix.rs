use crate::game::Coord;
use crate::hal::{DigitalIo, PinMode, Wiring};
use embedded_hal::blocking::delay::DelayUs;

/// Scans the 3x3 button matrix, one full pass per call.
///
/// Each drive column is grounded in turn with the others tri-stated, and the
/// sense rows are read through their pull-ups. A pass reports a press only
/// when exactly one button is down.
pub struct ButtonMatrix {
    wiring: Wiring,
    settle_us: u16,
}

impl ButtonMatrix {
    pub fn new(wiring: Wiring, settle_us: u16) -> Self {
        Self { wiring, settle_us }
    }

    /// One scan pass. `None` for no press and for ambiguous multi-presses.
    pub fn scan<IO, D>(&mut self, io: &mut IO, delay: &mut D) -> Option<Coord>
    where
        IO: DigitalIo,
        D: DelayUs<u16>,
    {
        // LED lines float during the scan so a grounded column cannot light
        // anything through a shared conductor.
        for line in self.wiring.led_lines() {
            io.release(line);
        }
        for &drive in &self.wiring.button_drives {
            io.release(drive);
        }
        for &sense in &self.wiring.button_senses {
            io.configure(sense, PinMode::InputPullUp);
        }
        io.drive(self.wiring.ground_enable, true);

        let mut found = None;
        let mut pressed = 0u8;
        for (col, &drive) in self.wiring.button_drives.iter().enumerate() {
            io.drive(drive, false);
            delay.delay_us(self.settle_us);

            for (row, &sense) in self.wiring.button_senses.iter().enumerate() {
                if !io.read(sense) {
                    pressed += 1;
                    found = Coord::new(row as u8, col as u8);
                }
            }
            io.release(drive);
        }

        for &sense in &self.wiring.button_senses {
            io.release(sense);
        }

        match pressed {
            1 => found,
            _ => None,
        }
    }

    /// Ground every drive column and leave the senses pulled up, so any press
    /// pulls a sense low and wakes the part. Used before sleeping.
    pub fn park<IO: DigitalIo>(&mut self, io: &mut IO) {
        for line in self.wiring.led_lines() {
            io.release(line);
        }
        for &sense in &self.wiring.button_senses {
            io.configure(sense, PinMode::InputPullUp);
        }
        for &drive in &self.wiring.button_drives {
            io.drive(drive, false);
        }
        io.drive(self.wiring.ground_enable, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeIo, TEST_WIRING};
    use embedded_hal_mock::delay::MockNoop;

    fn c(row: u8, col: u8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn matrix() -> ButtonMatrix {
        ButtonMatrix::new(TEST_WIRING, 2)
    }

    #[test]
    fn no_press_no_event() {
        let mut io = FakeIo::new(TEST_WIRING);
        assert_eq!(matrix().scan(&mut io, &mut MockNoop::new()), None);
    }

    #[test]
    fn every_single_press_is_located() {
        for index in 0..9 {
            let coord = Coord::from_index(index).unwrap();
            let mut io = FakeIo::new(TEST_WIRING);
            io.press(coord);
            assert_eq!(
                matrix().scan(&mut io, &mut MockNoop::new()),
                Some(coord),
                "button {:?}",
                coord
            );
        }
    }

    #[test]
    fn two_presses_discard_the_whole_pass() {
        let pairs = [
            (c(0, 0), c(0, 1)), // same row
            (c(0, 2), c(2, 2)), // same column
            (c(1, 0), c(2, 1)), // neither
        ];
        for (first, second) in pairs {
            let mut io = FakeIo::new(TEST_WIRING);
            io.press(first);
            io.press(second);
            assert_eq!(matrix().scan(&mut io, &mut MockNoop::new()), None);
        }
    }

    #[test]
    fn scan_never_lights_the_display() {
        let mut io = FakeIo::new(TEST_WIRING);
        io.press(c(1, 1));
        matrix().scan(&mut io, &mut MockNoop::new());
        assert!(io.take_lit().is_empty());
        assert_eq!(io.conflicts(), 0);
    }

    #[test]
    fn drive_lines_are_released_after_the_pass() {
        let mut io = FakeIo::new(TEST_WIRING);
        matrix().scan(&mut io, &mut MockNoop::new());
        for &drive in &TEST_WIRING.button_drives {
            assert_eq!(io.mode(drive), PinMode::Input);
        }
        for &sense in &TEST_WIRING.button_senses {
            assert_eq!(io.mode(sense), PinMode::Input);
        }
    }

    #[test]
    fn parked_matrix_reports_any_press() {
        let mut io = FakeIo::new(TEST_WIRING);
        let mut buttons = matrix();
        buttons.park(&mut io);
        io.press(c(2, 0));
        assert!(!io.read(TEST_WIRING.button_senses[2]));
    }
}
