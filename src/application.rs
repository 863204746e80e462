//! Cooperative scheduler
//!
//! One `tick` is one pass of the main loop: refresh one display column, scan
//! the buttons and apply any move, advance the melody, advance the animation,
//! then check the idle timeout. Nothing in a tick waits on the clock; the
//! only busy waits are the microsecond settle and hold delays.

use crate::animation::{AnimationSequencer, AnimationStatus, AnimationTiming};
use crate::config::{DISPLAY_HOLD_US, INPUT_SETTLE_US};
use crate::diagnostics::Fault;
use crate::drivers::{ButtonMatrix, LedMatrix};
use crate::game::{Coord, GameEngine, MoveOutcome, Placement, Player, ResetKind, WinLine};
use crate::hal::{DigitalIo, MonotonicClock, SleepControl, ToneOutput, Wiring};
use crate::melody::{self, MelodySequencer};
use crate::power::PowerManager;
use crate::time::Instant;
use embedded_hal::blocking::delay::DelayUs;

/// Capability implementations the scheduler runs on
pub struct Platform<IO, D, T, C, S> {
    pub io: IO,
    pub delay: D,
    pub tone: T,
    pub clock: C,
    pub sleep: S,
}

/// What a tick did that is worth a log line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Placed { player: Player, coord: Coord },
    Won { player: Player, line: WinLine },
    Draw,
    GameReset,
    Woke,
}

/// Everything that changes while the game runs
pub struct GameState {
    pub engine: GameEngine,
    pub melody: MelodySequencer,
    pub animation: AnimationSequencer,
    /// `None` unless the low-power profile is in use
    pub power: Option<PowerManager>,
}

pub struct Application {
    state: GameState,
    buttons: ButtonMatrix,
    leds: LedMatrix,
}

impl Application {
    pub fn new(wiring: Wiring, timing: AnimationTiming, power: Option<PowerManager>) -> Self {
        Self {
            state: GameState {
                engine: GameEngine::new(),
                melody: MelodySequencer::new(),
                animation: AnimationSequencer::new(timing),
                power,
            },
            buttons: ButtonMatrix::new(wiring, INPUT_SETTLE_US),
            leds: LedMatrix::new(wiring, DISPLAY_HOLD_US),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tick<IO, D, T, C, S>(
        &mut self,
        hw: &mut Platform<IO, D, T, C, S>,
    ) -> Result<Option<Event>, Fault>
    where
        IO: DigitalIo,
        D: DelayUs<u16>,
        T: ToneOutput,
        C: MonotonicClock,
        S: SleepControl,
    {
        let frame = self
            .state
            .engine
            .board()
            .masked(self.state.animation.overlay());
        self.leds.refresh(&mut hw.io, &mut hw.delay, &frame);

        let mut event = None;
        if let Some(coord) = self.buttons.scan(&mut hw.io, &mut hw.delay) {
            let placed = self.state.engine.apply_move(
                coord.row(),
                coord.col(),
                self.state.animation.is_active(),
            )?;
            if let Some(placement) = placed {
                event = Some(self.on_placement(placement, hw.clock.now(), &mut hw.tone));
            }
        }

        let now = hw.clock.now();
        self.state.melody.advance(now, &mut hw.tone);

        if self.state.animation.advance(now) == AnimationStatus::Finished {
            self.state.engine.reset(ResetKind::NextGame);
            if let Some(power) = self.state.power.as_mut() {
                power.rearm(now);
            }
            event = Some(Event::GameReset);
        }

        let idle = match &self.state.power {
            Some(power) => power.should_sleep(now, self.state.animation.is_active()),
            None => false,
        };
        if idle {
            self.idle_sleep(hw);
            event = Some(Event::Woke);
        }

        Ok(event)
    }

    fn on_placement<T: ToneOutput>(
        &mut self,
        placement: Placement,
        now: Instant,
        tone: &mut T,
    ) -> Event {
        let state = &mut self.state;
        if let Some(power) = state.power.as_mut() {
            power.note_input(now);
        }

        let Placement {
            coord,
            player,
            outcome,
        } = placement;
        match outcome {
            MoveOutcome::Continue => {
                state.melody.play(&melody::MARKER_PLACED, now, tone);
                Event::Placed { player, coord }
            }
            MoveOutcome::Win(line) => {
                state.melody.play(&melody::WIN, now, tone);
                state.animation.start_win(now, line);
                Event::Won { player, line }
            }
            MoveOutcome::Draw => {
                state.melody.play(&melody::DRAW, now, tone);
                state.animation.start_draw(now);
                Event::Draw
            }
        }
    }

    /// Dark display, silent buzzer, fresh board, then sleep until a button
    /// edge. The clock restarts from zero on wake.
    fn idle_sleep<IO, D, T, C, S>(&mut self, hw: &mut Platform<IO, D, T, C, S>)
    where
        IO: DigitalIo,
        T: ToneOutput,
        C: MonotonicClock,
        S: SleepControl,
    {
        self.leds.blank(&mut hw.io);
        self.state.melody.stop(&mut hw.tone);
        self.state.engine.reset(ResetKind::Fresh);
        self.buttons.park(&mut hw.io);

        hw.sleep.halt_until_input();

        hw.clock.reset();
        if let Some(power) = self.state.power.as_mut() {
            power.rearm(Instant::ZERO);
        }
    }

    /// Fatal trap: silence the buzzer and keep multiplexing the last frame.
    pub fn freeze<IO, D, T, C, S>(&mut self, hw: &mut Platform<IO, D, T, C, S>) -> !
    where
        IO: DigitalIo,
        D: DelayUs<u16>,
        T: ToneOutput,
    {
        self.state.melody.stop(&mut hw.tone);
        let frame = self
            .state
            .engine
            .board()
            .masked(self.state.animation.overlay());
        loop {
            self.leds.refresh(&mut hw.io, &mut hw.delay, &frame);
        }
    }
}
