//! Buzzer carrier on Timer0
//!
//! Timer0 runs in CTC mode and toggles OC0 (PB4) on every compare match, so
//! the buzzer sees a square wave at `F_CPU / (2 * TONE_PRESCALER * (level + 1))`.
//! Level 0 disconnects the compare output and floats the pin.

use super::timer::Prescaler;
use super::ToneOutput;
use crate::config::TONE_PRESCALER;
use avr_device::atmega128::{PORTB, TC0};

const WGM01: u8 = 1 << 3;
const COM00: u8 = 1 << 4;
const COM_MASK: u8 = 0b11 << 4;
const BUZZER: u8 = 1 << 4; // PB4 / OC0

pub struct Buzzer {
    tc0: TC0,
}

impl Buzzer {
    pub fn new(tc0: TC0) -> Self {
        let cs = match Prescaler::from_divisor(TONE_PRESCALER) {
            Some(prescaler) => prescaler.timer0_bits(),
            None => Prescaler::Div128.timer0_bits(),
        };
        tc0.tccr0.write(|w| unsafe { w.bits(WGM01 | cs) });
        let mut buzzer = Self { tc0 };
        buzzer.set_level(0);
        buzzer
    }
}

impl ToneOutput for Buzzer {
    fn set_level(&mut self, level: u8) {
        let portb = unsafe { &*PORTB::ptr() };
        if level == 0 {
            self.tc0
                .tccr0
                .modify(|r, w| unsafe { w.bits(r.bits() & !COM_MASK) });
            portb.ddrb.modify(|r, w| unsafe { w.bits(r.bits() & !BUZZER) });
            return;
        }

        portb.ddrb.modify(|r, w| unsafe { w.bits(r.bits() | BUZZER) });
        self.tc0.ocr0.write(|w| unsafe { w.bits(level) });
        self.tc0
            .tccr0
            .modify(|r, w| unsafe { w.bits((r.bits() & !COM_MASK) | COM00) });
    }
}
