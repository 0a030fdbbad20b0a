//! Sequencer pattern grid and named presets.

use crate::bank::TRACK_COUNT;

/// Steps per pattern loop, at sixteenth-note resolution.
pub const STEP_COUNT: usize = 16;

/// Cells the chaos preset sets, drawn uniformly at random.
const CHAOS_DRAWS: usize = 10;

/// Fixed-size boolean grid of tracks × steps.
///
/// Dimensions never change after construction; cells mutate only through
/// explicit toggles, preset loads, and `clear`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGrid {
    cells: [[bool; STEP_COUNT]; TRACK_COUNT],
}

impl PatternGrid {
    pub fn new() -> Self {
        PatternGrid {
            cells: [[false; STEP_COUNT]; TRACK_COUNT],
        }
    }

    pub fn track_count(&self) -> usize {
        TRACK_COUNT
    }

    pub fn step_count(&self) -> usize {
        STEP_COUNT
    }

    /// Is the cell at (track, step) set? Out-of-range reads are false.
    pub fn get(&self, track: usize, step: usize) -> bool {
        self.cells
            .get(track)
            .and_then(|row| row.get(step))
            .copied()
            .unwrap_or(false)
    }

    /// Set a cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, track: usize, step: usize) {
        if track < TRACK_COUNT && step < STEP_COUNT {
            self.cells[track][step] = true;
        }
    }

    /// Flip a cell, returning its new value.
    pub fn toggle(&mut self, track: usize, step: usize) -> bool {
        if track < TRACK_COUNT && step < STEP_COUNT {
            self.cells[track][step] = !self.cells[track][step];
            self.cells[track][step]
        } else {
            false
        }
    }

    /// Reset every cell to false.
    pub fn clear(&mut self) {
        self.cells = [[false; STEP_COUNT]; TRACK_COUNT];
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|row| row.iter().all(|c| !c))
    }

    /// Tracks whose cell is set at the given step.
    pub fn active_tracks(&self, step: usize) -> Vec<usize> {
        (0..TRACK_COUNT).filter(|&t| self.get(t, step)).collect()
    }

    /// All set (track, step) pairs, row-major.
    pub fn set_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for track in 0..TRACK_COUNT {
            for step in 0..STEP_COUNT {
                if self.cells[track][step] {
                    out.push((track, step));
                }
            }
        }
        out
    }

    /// Clear the grid then load a named preset. Chaos draws its cells from
    /// the provided rng so callers can pin the outcome with a seed.
    pub fn load_preset(&mut self, preset: Preset, rng: &mut fastrand::Rng) {
        self.clear();
        match preset {
            Preset::Basic => {
                for step in [0, 4, 8, 12] {
                    self.set(1, step);
                }
                for step in [4, 12] {
                    self.set(6, step);
                }
                for step in (0..STEP_COUNT).step_by(2) {
                    self.set(5, step);
                }
            }
            Preset::Syncopated => {
                for step in [0, 3, 8, 11] {
                    self.set(1, step);
                }
                for step in [4, 12] {
                    self.set(6, step);
                }
                self.set(3, 14);
            }
            Preset::Chaos => {
                for _ in 0..CHAOS_DRAWS {
                    let track = rng.usize(..TRACK_COUNT);
                    let step = rng.usize(..STEP_COUNT);
                    self.set(track, step);
                }
            }
        }
    }
}

impl Default for PatternGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Named grid presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Basic,
    Syncopated,
    Chaos,
}

impl Preset {
    /// Resolve a preset by its UI name. Any unrecognized name loads as
    /// chaos, so every label a frontend sends produces a pattern.
    pub fn from_name(name: &str) -> Preset {
        match name {
            "basic" => Preset::Basic,
            "syncopated" => Preset::Syncopated,
            _ => Preset::Chaos,
        }
    }
}
