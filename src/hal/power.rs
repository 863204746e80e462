use super::SleepControl;
use avr_device::atmega128::{CPU, EXINT, PORTD};

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum SleepMode {
    Idle = 0b000,
    AdcNoiseReduction = 0b001,
    PowerDown = 0b010,
    PowerSave = 0b011,
    Standby = 0b110,
    ExtendedStandby = 0b111,
}

// MCUCR: SE is bit 5, SM1:SM0 sit in bits 4:3 and SM2 in bit 2.
const SE: u8 = 1 << 5;
const SM_MASK: u8 = 0b111 << 2;
const INT0_MASK: u8 = 1 << 0;
const PD0: u8 = 1 << 0;
const ISC0_MASK: u8 = 0b11;

impl SleepMode {
    const fn mcucr_bits(self) -> u8 {
        let sm = self as u8;
        ((sm & 0b011) << 3) | (sm & 0b100)
    }
}

/// Power-down sleep, woken by a low level on INT0 (PD0)
pub struct Power {
    cpu: CPU,
    exint: EXINT,
}

impl Power {
    pub fn new(cpu: CPU, exint: EXINT) -> Self {
        Self { cpu, exint }
    }

    #[inline]
    pub fn set_sleep_mode(&mut self, mode: SleepMode) {
        self.cpu
            .mcucr
            .modify(|r, w| unsafe { w.bits((r.bits() & !SM_MASK) | mode.mcucr_bits()) });
    }

    #[inline]
    pub fn enable_sleep(&mut self) {
        self.cpu.mcucr.modify(|r, w| unsafe { w.bits(r.bits() | SE) });
    }

    #[inline]
    pub fn disable_sleep(&mut self) {
        self.cpu.mcucr.modify(|r, w| unsafe { w.bits(r.bits() & !SE) });
    }

    fn arm_wake(&mut self) {
        // PD0 collects the button senses through diodes; hold it up.
        let portd = unsafe { &*PORTD::ptr() };
        portd.ddrd.modify(|r, w| unsafe { w.bits(r.bits() & !PD0) });
        portd.portd.modify(|r, w| unsafe { w.bits(r.bits() | PD0) });
        // Only a level interrupt can wake the part from power-down.
        self.exint
            .eicra
            .modify(|r, w| unsafe { w.bits(r.bits() & !ISC0_MASK) });
        self.exint.eimsk.modify(|r, w| unsafe { w.bits(r.bits() | INT0_MASK) });
    }
}

impl SleepControl for Power {
    fn halt_until_input(&mut self) {
        self.arm_wake();
        self.set_sleep_mode(SleepMode::PowerDown);
        self.enable_sleep();
        avr_device::asm::sleep();
        self.disable_sleep();
    }
}

#[avr_device::interrupt(atmega128)]
fn INT0() {
    // Level-triggered: mask it again or it refires while the button is held.
    let exint = unsafe { &*EXINT::ptr() };
    exint.eimsk.modify(|r, w| unsafe { w.bits(r.bits() & !INT0_MASK) });
}
