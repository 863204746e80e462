pub mod button_matrix;
pub mod led_matrix;
#[cfg(target_arch = "avr")]
pub mod serial_console;

pub use button_matrix::ButtonMatrix;
pub use led_matrix::LedMatrix;
#[cfg(target_arch = "avr")]
pub use serial_console::SerialConsole;
