//! Post-game blink and sweep-off sequence
//!
//! Runs entirely off its own start timestamp: a blink phase that toggles the
//! highlighted cells, then a sweep that darkens the board one cell at a time
//! in row-major order. The sequencer only ever writes the overlay of hidden
//! cells; the board itself is cleared by the engine when it reports
//! `Finished`.

use crate::config::{BLINK_HALF_CYCLES, BLINK_HALF_PERIOD_MS, SWEEP_STAGGER_MS};
use crate::game::{CellMask, WinLine, CELLS};
use crate::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationTiming {
    pub half_period_ms: u16,
    pub half_cycles: u8,
    pub stagger_ms: u16,
}

impl AnimationTiming {
    pub const fn blink_ms(&self) -> u32 {
        self.half_period_ms as u32 * self.half_cycles as u32
    }

    pub const fn sweep_ms(&self) -> u32 {
        self.stagger_ms as u32 * CELLS as u32
    }

    pub const fn total_ms(&self) -> u32 {
        self.blink_ms() + self.sweep_ms()
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            half_period_ms: BLINK_HALF_PERIOD_MS,
            half_cycles: BLINK_HALF_CYCLES,
            stagger_ms: SWEEP_STAGGER_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    None,
    Win,
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationState {
    pub kind: AnimationKind,
    pub started: Instant,
    /// Cells that blink: the winning line, or the whole board on a draw
    pub highlight: CellMask,
}

impl AnimationState {
    const IDLE: AnimationState = AnimationState {
        kind: AnimationKind::None,
        started: Instant::ZERO,
        highlight: CellMask::EMPTY,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Idle,
    Running,
    /// Returned once, on the poll that ends the sequence
    Finished,
}

pub struct AnimationSequencer {
    state: AnimationState,
    overlay: CellMask,
    timing: AnimationTiming,
}

impl AnimationSequencer {
    pub fn new(timing: AnimationTiming) -> Self {
        Self {
            state: AnimationState::IDLE,
            overlay: CellMask::EMPTY,
            timing,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.kind != AnimationKind::None
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Cells currently forced dark on the display
    pub fn overlay(&self) -> CellMask {
        self.overlay
    }

    pub fn start_win(&mut self, now: Instant, line: WinLine) {
        self.start(now, AnimationKind::Win, line.mask());
    }

    pub fn start_draw(&mut self, now: Instant) {
        self.start(now, AnimationKind::Draw, CellMask::ALL);
    }

    fn start(&mut self, now: Instant, kind: AnimationKind, highlight: CellMask) {
        if self.is_active() {
            return;
        }
        self.state = AnimationState {
            kind,
            started: now,
            highlight,
        };
        self.overlay = self.blink_overlay(0);
    }

    pub fn advance(&mut self, now: Instant) -> AnimationStatus {
        if !self.is_active() {
            return AnimationStatus::Idle;
        }

        let elapsed = now.elapsed_since(self.state.started);
        let blink_ms = self.timing.blink_ms();
        if elapsed < blink_ms {
            self.overlay = self.blink_overlay(elapsed);
            AnimationStatus::Running
        } else if elapsed < self.timing.total_ms() {
            // All cells lit at the start of the sweep, then one more goes
            // dark every stagger.
            let swept = (elapsed - blink_ms) / self.timing.stagger_ms as u32;
            self.overlay = CellMask::first(swept as usize);
            AnimationStatus::Running
        } else {
            self.state = AnimationState::IDLE;
            self.overlay = CellMask::EMPTY;
            AnimationStatus::Finished
        }
    }

    fn blink_overlay(&self, elapsed: u32) -> CellMask {
        let half_period = self.timing.half_period_ms.max(1) as u32;
        // Even half-cycles hide the highlight; the board was just showing it.
        if (elapsed / half_period) % 2 == 0 {
            self.state.highlight
        } else {
            CellMask::EMPTY
        }
    }
}

impl Default for AnimationSequencer {
    fn default() -> Self {
        Self::new(AnimationTiming::default())
    }
}
