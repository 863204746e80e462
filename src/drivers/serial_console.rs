use crate::hal::uart::Uart;
use core::convert::Infallible;
use ufmt::uWrite;

/// `ufmt` sink over the interrupt-driven UART.
///
/// Never blocks: bytes that do not fit in the transmit ring are dropped, so
/// a burst of log lines costs characters, not loop time.
pub struct SerialConsole {
    uart: Uart,
    dropped: u16,
}

impl SerialConsole {
    pub fn new(uart: Uart) -> Self {
        Self { uart, dropped: 0 }
    }

    pub fn write_byte(&mut self, byte: u8) {
        if self.uart.write_byte(byte).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Bytes lost to a full transmit ring since start-up
    pub fn dropped(&self) -> u16 {
        self.dropped
    }
}

impl uWrite for SerialConsole {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}
