//! Port-register `DigitalIo` for the ATmega128
use super::{DigitalIo, Line, PinMode};
use avr_device::atmega128::{PORTA, PORTB, PORTC, PORTD, PORTE, PORTF};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
}

/// Encodes a port/bit pair as a `Line`
pub const fn line(port: Port, bit: u8) -> Line {
    Line(((port as u8) << 3) | (bit & 0x07))
}

/// Owns the port peripherals used by the matrix
pub struct Ports {
    _private: (),
}

impl Ports {
    pub fn new(_a: PORTA, _b: PORTB, _c: PORTC, _d: PORTD, _e: PORTE, _f: PORTF) -> Self {
        Self { _private: () }
    }
}

macro_rules! with_port {
    ($line:expr, |$ddr:ident, $port:ident, $pin:ident| $body:expr) => {
        match $line.0 >> 3 {
            0 => {
                let regs = unsafe { &*PORTA::ptr() };
                let ($ddr, $port, $pin) = (&regs.ddra, &regs.porta, &regs.pina);
                $body
            }
            1 => {
                let regs = unsafe { &*PORTB::ptr() };
                let ($ddr, $port, $pin) = (&regs.ddrb, &regs.portb, &regs.pinb);
                $body
            }
            2 => {
                let regs = unsafe { &*PORTC::ptr() };
                let ($ddr, $port, $pin) = (&regs.ddrc, &regs.portc, &regs.pinc);
                $body
            }
            3 => {
                let regs = unsafe { &*PORTD::ptr() };
                let ($ddr, $port, $pin) = (&regs.ddrd, &regs.portd, &regs.pind);
                $body
            }
            4 => {
                let regs = unsafe { &*PORTE::ptr() };
                let ($ddr, $port, $pin) = (&regs.ddre, &regs.porte, &regs.pine);
                $body
            }
            _ => {
                let regs = unsafe { &*PORTF::ptr() };
                let ($ddr, $port, $pin) = (&regs.ddrf, &regs.portf, &regs.pinf);
                $body
            }
        }
    };
}

impl DigitalIo for Ports {
    fn configure(&mut self, line: Line, mode: PinMode) {
        let mask = 1u8 << (line.0 & 0x07);
        with_port!(line, |ddr, port, _pin| {
            match mode {
                PinMode::Output => ddr.modify(|r, w| unsafe { w.bits(r.bits() | mask) }),
                PinMode::Input => {
                    ddr.modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
                    port.modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
                }
                PinMode::InputPullUp => {
                    ddr.modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
                    port.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
                }
            }
        })
    }

    #[inline]
    fn write(&mut self, line: Line, high: bool) {
        let mask = 1u8 << (line.0 & 0x07);
        with_port!(line, |_ddr, port, _pin| {
            if high {
                port.modify(|r, w| unsafe { w.bits(r.bits() | mask) })
            } else {
                port.modify(|r, w| unsafe { w.bits(r.bits() & !mask) })
            }
        })
    }

    #[inline]
    fn read(&mut self, line: Line) -> bool {
        let mask = 1u8 << (line.0 & 0x07);
        with_port!(line, |_ddr, _port, pin| {
            (pin.read().bits() & mask) != 0
        })
    }
}

/// Board wiring: LEDs on PORTA/PORTC, button matrix sharing the LED
/// column lines, ground enable on PD7. The buzzer (PB4/OC0) and the wake
/// line (PD0/INT0) are owned by `pwm` and `power`.
pub mod board {
    use super::{line, Port};
    use crate::hal::{Line, Wiring};

    pub const GROUND_ENABLE: Line = line(Port::D, 7);

    pub const WIRING: Wiring = Wiring {
        led_columns: [line(Port::C, 0), line(Port::C, 1), line(Port::C, 2)],
        led_rows: [
            [line(Port::A, 5), line(Port::A, 4)],
            [line(Port::A, 3), line(Port::A, 2)],
            [line(Port::A, 1), line(Port::A, 0)],
        ],
        // Shared with the LED cathodes
        button_drives: [line(Port::C, 0), line(Port::C, 1), line(Port::C, 2)],
        button_senses: [line(Port::F, 0), line(Port::F, 1), line(Port::F, 2)],
        ground_enable: GROUND_ENABLE,
    };
}
