#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use avr_device::atmega128::Peripherals;
    use tictactoe_firmware::animation::AnimationTiming;
    use tictactoe_firmware::application::{Application, Platform};
    use tictactoe_firmware::config::LOW_POWER;
    use tictactoe_firmware::drivers::SerialConsole;
    use tictactoe_firmware::hal::gpio::{board, Ports};
    use tictactoe_firmware::hal::power::Power;
    use tictactoe_firmware::hal::pwm::Buzzer;
    use tictactoe_firmware::hal::timer::{Delay, TickClock};
    use tictactoe_firmware::hal::uart::Uart;
    use tictactoe_firmware::hal::MonotonicClock;
    use tictactoe_firmware::logger::{self, Level};
    use tictactoe_firmware::power::PowerManager;

    // Only `None` if the peripherals were already taken.
    let Some(dp) = Peripherals::take() else {
        loop {
            avr_device::asm::nop();
        }
    };

    let mut console = SerialConsole::new(Uart::new(dp.USART0));
    let mut hw = Platform {
        io: Ports::new(dp.PORTA, dp.PORTB, dp.PORTC, dp.PORTD, dp.PORTE, dp.PORTF),
        delay: Delay,
        tone: Buzzer::new(dp.TC0),
        clock: TickClock::new(dp.TC2),
        sleep: Power::new(dp.CPU, dp.EXINT),
    };
    let power = if LOW_POWER {
        Some(PowerManager::default())
    } else {
        None
    };
    let mut app = Application::new(board::WIRING, AnimationTiming::default(), power);

    // Enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    let _ = logger::log_line(
        &mut console,
        hw.clock.now(),
        Level::Info,
        concat!("tictactoe firmware v", env!("CARGO_PKG_VERSION")),
    );

    loop {
        match app.tick(&mut hw) {
            Ok(Some(event)) => {
                let _ = logger::log_event(&mut console, hw.clock.now(), &event);
            }
            Ok(None) => {}
            Err(fault) => {
                let _ = logger::log_fault(&mut console, hw.clock.now(), fault);
                app.freeze(&mut hw);
            }
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
