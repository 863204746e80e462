//! Configuration constants for the tic-tac-toe firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// UART baud rate for the event log
pub const UART_BAUD: u32 = 9600;

/// Timer2 prescaler for the 1 kHz system tick
pub const TICK_PRESCALER: u32 = 64;

/// System tick rate in Hz (one tick per millisecond)
pub const TICK_HZ: u32 = 1000;

/// Timer0 prescaler for the buzzer carrier
pub const TONE_PRESCALER: u32 = 128;

/// How long one LED column stays lit per tick, in microseconds
pub const DISPLAY_HOLD_US: u16 = 100;

/// Settle time after switching a button drive line
pub const INPUT_SETTLE_US: u16 = 2;

/// Half-period of the post-game blink
pub const BLINK_HALF_PERIOD_MS: u16 = 250;

/// Number of blink half-cycles before the sweep-off starts
#[cfg(not(feature = "low-power"))]
pub const BLINK_HALF_CYCLES: u8 = 12;
#[cfg(feature = "low-power")]
pub const BLINK_HALF_CYCLES: u8 = 8;

/// Per-cell stagger of the sweep-off phase
pub const SWEEP_STAGGER_MS: u16 = 100;

/// Idle time after the last accepted move before the board powers down
pub const IDLE_TIMEOUT_MS: u32 = 2 * 60 * 1000;

/// Whether the low-power profile (idle sleep) is built in
pub const LOW_POWER: bool = cfg!(feature = "low-power");
