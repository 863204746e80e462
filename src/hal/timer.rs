//! System tick, millisecond clock and busy-wait settle delay
use crate::config::{CPU_FREQ_HZ, TICK_HZ, TICK_PRESCALER};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prescaler {
    Stop,
    Direct,
    Div8,
    Div32,
    Div64,
    Div128,
    Div256,
    Div1024,
}

impl Prescaler {
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Stop => 0,
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div32 => 32,
            Prescaler::Div64 => 64,
            Prescaler::Div128 => 128,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }

    /// CS bits for Timer0, which has the asynchronous prescaler set
    pub const fn timer0_bits(self) -> u8 {
        match self {
            Prescaler::Stop => 0,
            Prescaler::Direct => 1,
            Prescaler::Div8 => 2,
            Prescaler::Div32 => 3,
            Prescaler::Div64 => 4,
            Prescaler::Div128 => 5,
            Prescaler::Div256 => 6,
            Prescaler::Div1024 => 7,
        }
    }

    /// CS bits for Timer2. Div32 and Div128 do not exist there.
    pub const fn timer2_bits(self) -> Option<u8> {
        match self {
            Prescaler::Stop => Some(0),
            Prescaler::Direct => Some(1),
            Prescaler::Div8 => Some(2),
            Prescaler::Div64 => Some(3),
            Prescaler::Div256 => Some(4),
            Prescaler::Div1024 => Some(5),
            Prescaler::Div32 | Prescaler::Div128 => None,
        }
    }

    pub const fn from_divisor(divisor: u32) -> Option<Prescaler> {
        match divisor {
            1 => Some(Prescaler::Direct),
            8 => Some(Prescaler::Div8),
            32 => Some(Prescaler::Div32),
            64 => Some(Prescaler::Div64),
            128 => Some(Prescaler::Div128),
            256 => Some(Prescaler::Div256),
            1024 => Some(Prescaler::Div1024),
            _ => None,
        }
    }
}

/// OCR value for an 8-bit CTC timer firing at `rate_hz`.
///
/// Returns `None` when the rate is unreachable with this prescaler.
pub const fn ctc_compare(cpu_hz: u32, prescaler: Prescaler, rate_hz: u32) -> Option<u8> {
    let divisor = prescaler.divisor();
    if divisor == 0 || rate_hz == 0 {
        return None;
    }
    let counts = cpu_hz / divisor / rate_hz;
    if counts == 0 || counts > 256 {
        return None;
    }
    Some((counts - 1) as u8)
}

/// Compare value for the 1 ms tick
pub const TICK_COMPARE: u8 = match Prescaler::from_divisor(TICK_PRESCALER) {
    Some(prescaler) => match ctc_compare(CPU_FREQ_HZ, prescaler, TICK_HZ) {
        Some(ocr) => ocr,
        None => panic!("tick rate unreachable with TICK_PRESCALER"),
    },
    None => panic!("TICK_PRESCALER is not a hardware divisor"),
};

#[cfg(target_arch = "avr")]
pub use self::avr::{Delay, TickClock};

#[cfg(target_arch = "avr")]
mod avr {
    use super::{Prescaler, TICK_COMPARE, TICK_PRESCALER};
    use crate::config::CPU_FREQ_HZ;
    use crate::hal::MonotonicClock;
    use crate::time::Instant;
    use avr_device::atmega128::TC2;
    use avr_device::interrupt::{self, Mutex};
    use core::cell::Cell;
    use embedded_hal::blocking::delay::DelayUs;

    // Written only by TIMER2_COMP
    static MILLIS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

    const WGM21: u8 = 1 << 3;
    const OCIE2: u8 = 1 << 7;

    /// Millisecond clock fed by the Timer2 compare-match interrupt
    pub struct TickClock {
        _private: (),
    }

    impl TickClock {
        /// Starts Timer2 in CTC mode. Interrupts must be enabled afterwards.
        pub fn new(tc2: TC2) -> Self {
            let cs = match Prescaler::from_divisor(TICK_PRESCALER) {
                Some(prescaler) => prescaler.timer2_bits().unwrap_or(0),
                None => 0,
            };
            tc2.tccr2.write(|w| unsafe { w.bits(WGM21 | cs) });
            tc2.tcnt2.write(|w| unsafe { w.bits(0) });
            tc2.ocr2.write(|w| unsafe { w.bits(TICK_COMPARE) });
            tc2.timsk.modify(|r, w| unsafe { w.bits(r.bits() | OCIE2) });
            Self { _private: () }
        }
    }

    impl MonotonicClock for TickClock {
        #[inline]
        fn now(&self) -> Instant {
            interrupt::free(|cs| Instant::from_millis(MILLIS.borrow(cs).get()))
        }

        fn reset(&self) {
            interrupt::free(|cs| MILLIS.borrow(cs).set(0));
        }
    }

    #[avr_device::interrupt(atmega128)]
    fn TIMER2_COMP() {
        interrupt::free(|cs| {
            let millis = MILLIS.borrow(cs);
            millis.set(millis.get().wrapping_add(1));
        });
    }

    // One loop pass is a nop plus roughly three cycles of loop overhead.
    const LOOPS_PER_US: u32 = CPU_FREQ_HZ / 1_000_000 / 4;

    /// Cycle-counted busy wait for electrical settle times
    pub struct Delay;

    impl DelayUs<u16> for Delay {
        fn delay_us(&mut self, us: u16) {
            for _ in 0..(us as u32 * LOOPS_PER_US) {
                avr_device::asm::nop();
            }
        }
    }
}
