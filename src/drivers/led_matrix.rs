use crate::game::{Board, Cell, SIZE};
use crate::hal::{Color, DigitalIo, Wiring};
use embedded_hal::blocking::delay::DelayUs;

/// Two bits per row, as the column is latched onto the row lines:
/// bit `2r` lights row `r`, bit `2r + 1` selects red.
pub fn pack_column(cells: [Cell; SIZE]) -> u8 {
    cells.iter().enumerate().fold(0, |bits, (row, cell)| {
        let shift = row * 2;
        match cell {
            Cell::Empty => bits,
            Cell::PlayerA => bits | 0b01 << shift,
            Cell::PlayerB => bits | 0b11 << shift,
        }
    })
}

/// Multiplexed bi-colour 3x3 LED matrix.
///
/// Lights one column per `refresh` call and leaves every line inactive
/// before returning, so the button scan that follows starts from a dark
/// matrix.
pub struct LedMatrix {
    wiring: Wiring,
    hold_us: u16,
    cursor: usize,
}

impl LedMatrix {
    pub fn new(wiring: Wiring, hold_us: u16) -> Self {
        Self {
            wiring,
            hold_us,
            cursor: 0,
        }
    }

    /// Column that the next `refresh` will light
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn refresh<IO, D>(&mut self, io: &mut IO, delay: &mut D, frame: &Board)
    where
        IO: DigitalIo,
        D: DelayUs<u16>,
    {
        // The button ground shares conductors with the LEDs. It has to be
        // off before anything is driven or the matrix shorts.
        io.drive(self.wiring.ground_enable, false);
        self.all_off(io);

        let column = self.cursor;
        let bits = pack_column(frame.column(column));

        io.write(self.wiring.led_columns[column], false);
        for (row, lines) in self.wiring.led_rows.iter().enumerate() {
            let shift = row * 2;
            if (bits >> shift) & 0b01 != 0 {
                let color = if (bits >> shift) & 0b10 != 0 {
                    Color::Red
                } else {
                    Color::Green
                };
                io.write(lines[color as usize], true);
            }
        }
        delay.delay_us(self.hold_us);

        self.all_off(io);
        self.cursor = (column + 1) % SIZE;
    }

    /// Drive every LED line to its inactive level
    pub fn blank<IO: DigitalIo>(&mut self, io: &mut IO) {
        io.drive(self.wiring.ground_enable, false);
        self.all_off(io);
        self.cursor = 0;
    }

    fn all_off<IO: DigitalIo>(&self, io: &mut IO) {
        for lines in &self.wiring.led_rows {
            for &line in lines {
                io.drive(line, false);
            }
        }
        for &line in &self.wiring.led_columns {
            io.drive(line, true);
        }
    }
}
