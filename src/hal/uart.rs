//! Interrupt-driven USART0 transmitter for the event log
use super::ring::Buffer;
use crate::config::{CPU_FREQ_HZ, UART_BAUD};
use avr_device::atmega128::USART0;
use avr_device::interrupt::Mutex;
use core::cell::RefCell;
use core::convert::Infallible;

const UBRR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

// UCSR0B
const TXEN0: u8 = 1 << 3;
const UDRIE0: u8 = 1 << 5;
// UCSR0C: 8 data bits
const UCSZ_8BIT: u8 = 0b11 << 1;

static TX_BUFFER: Mutex<RefCell<Buffer>> = Mutex::new(RefCell::new(Buffer::new()));

pub struct Uart {
    _usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0) -> Self {
        usart.ubrr0h.write(|w| unsafe { w.bits((UBRR >> 8) as u8) });
        usart.ubrr0l.write(|w| unsafe { w.bits(UBRR as u8) });
        usart.ucsr0c.write(|w| unsafe { w.bits(UCSZ_8BIT) });
        usart.ucsr0b.write(|w| unsafe { w.bits(TXEN0) });
        Self { _usart: usart }
    }

    /// Queues one byte for the data-register-empty interrupt.
    ///
    /// `WouldBlock` means the queue is full; callers that must not stall
    /// drop the byte.
    pub fn write_byte(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        avr_device::interrupt::free(|cs| {
            if TX_BUFFER.borrow(cs).borrow_mut().write(byte) {
                let usart = unsafe { &*USART0::ptr() };
                usart.ucsr0b.modify(|r, w| unsafe { w.bits(r.bits() | UDRIE0) });
                Ok(())
            } else {
                Err(nb::Error::WouldBlock)
            }
        })
    }
}

#[avr_device::interrupt(atmega128)]
fn USART0_UDRE() {
    avr_device::interrupt::free(|cs| {
        let usart = unsafe { &*USART0::ptr() };
        if let Some(byte) = TX_BUFFER.borrow(cs).borrow_mut().read() {
            usart.udr0.write(|w| unsafe { w.bits(byte) });
        } else {
            // Buffer empty - disable TX interrupt
            usart.ucsr0b.modify(|r, w| unsafe { w.bits(r.bits() & !UDRIE0) });
        }
    });
}
