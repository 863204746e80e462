use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("avr") {
        // Host builds only carry the portable core and its tests.
        return;
    }

    // Configure for ATmega128
    println!("cargo:rustc-link-arg=-mmcu=atmega128");

    let low_power = env::var("CARGO_FEATURE_LOW_POWER").is_ok();
    println!(
        "cargo:warning=Building tic-tac-toe firmware for ATmega128 at 16MHz{}",
        if low_power { " (low-power profile)" } else { "" }
    );
}
