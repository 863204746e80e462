//! Line-oriented event log
//!
//! Every line is `[<ms>] <LEVEL> <message>\r\n`, formatted with `ufmt` into
//! whatever sink the caller hands in. On the board that is the serial
//! console, which drops bytes instead of blocking.

use crate::application::Event;
use crate::diagnostics::Fault;
use crate::time::Instant;
use ufmt::{uWrite, uwrite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

fn header<W>(w: &mut W, now: Instant, level: Level) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    uwrite!(w, "[{}] {} ", now.as_millis(), level.as_str())
}

fn write_hex<W>(w: &mut W, value: u16) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
    w.write_str("0x")?;
    for shift in [12, 8, 4, 0] {
        let nibble = HEX_CHARS[((value >> shift) & 0xF) as usize];
        w.write_char(nibble as char)?;
    }
    Ok(())
}

pub fn log_line<W>(w: &mut W, now: Instant, level: Level, msg: &str) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    header(w, now, level)?;
    w.write_str(msg)?;
    w.write_str("\r\n")
}

pub fn log_event<W>(w: &mut W, now: Instant, event: &Event) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    header(w, now, Level::Info)?;
    match *event {
        Event::Placed { player, coord } => uwrite!(
            w,
            "{:?} placed at {},{}",
            player,
            coord.row(),
            coord.col()
        )?,
        Event::Won { player, line } => uwrite!(w, "{:?} wins {:?}", player, line)?,
        Event::Draw => w.write_str("draw")?,
        Event::GameReset => w.write_str("new game")?,
        Event::Woke => w.write_str("woke from idle")?,
    }
    w.write_str("\r\n")
}

pub fn log_fault<W>(w: &mut W, now: Instant, fault: Fault) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    header(w, now, Level::Error)?;
    w.write_str("fault ")?;
    write_hex(w, fault.code())?;
    uwrite!(w, " {:?}\r\n", fault)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coord, Player, WinLine};
    use crate::testing::LogBuffer;

    #[test]
    fn plain_line_format() {
        let mut out = LogBuffer::default();
        log_line(&mut out, Instant::from_millis(7), Level::Info, "ready").unwrap();
        assert_eq!(out.0, "[7] INFO ready\r\n");
    }

    #[test]
    fn events_are_info_lines() {
        let mut out = LogBuffer::default();
        let now = Instant::from_millis(1500);
        let placed = Event::Placed {
            player: Player::B,
            coord: Coord::new(2, 1).unwrap(),
        };
        log_event(&mut out, now, &placed).unwrap();
        log_event(
            &mut out,
            now,
            &Event::Won {
                player: Player::A,
                line: WinLine::Row(0),
            },
        )
        .unwrap();
        log_event(&mut out, now, &Event::GameReset).unwrap();
        assert_eq!(
            out.0,
            "[1500] INFO B placed at 2,1\r\n\
             [1500] INFO A wins Row(0)\r\n\
             [1500] INFO new game\r\n"
        );
    }

    #[test]
    fn faults_carry_their_code() {
        let mut out = LogBuffer::default();
        let fault = Fault::MoveCountOverflow { count: 10 };
        log_fault(&mut out, Instant::from_millis(42), fault).unwrap();
        assert!(out.0.starts_with("[42] ERROR fault 0x8001 MoveCountOverflow"));
        assert!(out.0.ends_with("\r\n"));
    }
}
