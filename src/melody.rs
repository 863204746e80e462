//! Non-blocking melody playback
//!
//! A melody is a fixed list of `(duration, level)` steps. `advance` is polled
//! once per loop pass and moves at most one step, so a late poll stretches
//! the tune instead of skipping notes.

use crate::hal::ToneOutput;
use crate::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Note {
    pub duration_ms: u16,
    /// Timer compare value; 0 is a rest
    pub level: u8,
}

impl Note {
    pub const fn new(duration_ms: u16, level: u8) -> Self {
        Self { duration_ms, level }
    }

    pub const fn rest(duration_ms: u16) -> Self {
        Self::new(duration_ms, 0)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Melody {
    notes: &'static [Note],
}

impl Melody {
    pub const fn new(notes: &'static [Note]) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &'static [Note] {
        self.notes
    }
}

static MARKER_NOTES: [Note; 2] = [Note::new(100, 100), Note::new(100, 50)];
static WIN_NOTES: [Note; 5] = [
    Note::new(120, 120),
    Note::new(120, 95),
    Note::new(120, 80),
    Note::rest(60),
    Note::new(400, 60),
];
static DRAW_NOTES: [Note; 3] = [Note::new(250, 90), Note::rest(50), Note::new(500, 140)];

/// Two quick blips after every placed marker
pub static MARKER_PLACED: Melody = Melody::new(&MARKER_NOTES);

/// Rising run for a completed line
pub static WIN: Melody = Melody::new(&WIN_NOTES);

/// Falling pair for a full board
pub static DRAW: Melody = Melody::new(&DRAW_NOTES);

struct Playback {
    melody: &'static Melody,
    index: usize,
    step_started: Instant,
}

/// Drives the buzzer through one melody at a time
pub struct MelodySequencer {
    playback: Option<Playback>,
}

impl MelodySequencer {
    pub const fn new() -> Self {
        Self { playback: None }
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Starts `melody` now, cutting off whatever was playing.
    pub fn play<T: ToneOutput>(&mut self, melody: &'static Melody, now: Instant, tone: &mut T) {
        match melody.notes.first() {
            Some(first) => {
                tone.set_level(first.level);
                self.playback = Some(Playback {
                    melody,
                    index: 0,
                    step_started: now,
                });
            }
            None => self.stop(tone),
        }
    }

    /// Moves to the next step once the current one has run its length.
    ///
    /// Returns true on the call that finishes the melody.
    pub fn advance<T: ToneOutput>(&mut self, now: Instant, tone: &mut T) -> bool {
        let Some(playback) = self.playback.as_mut() else {
            return false;
        };

        let duration = playback.melody.notes[playback.index].duration_ms as u32;
        if !now.has_elapsed(playback.step_started, duration) {
            return false;
        }

        playback.index += 1;
        match playback.melody.notes.get(playback.index).copied() {
            Some(note) => {
                tone.set_level(note.level);
                playback.step_started = now;
                false
            }
            None => {
                self.stop(tone);
                true
            }
        }
    }

    pub fn stop<T: ToneOutput>(&mut self, tone: &mut T) {
        self.playback = None;
        tone.set_level(0);
    }
}

impl Default for MelodySequencer {
    fn default() -> Self {
        Self::new()
    }
}
