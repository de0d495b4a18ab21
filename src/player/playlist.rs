//! Playlist sequencing.
//!
//! Every entry advances on the same global tick. An entry with `n` frames
//! shows frame `tick % n` until it has played all of its loops, then holds
//! its last frame. Entries without frames (or with zero loops) are finished
//! from the start and show nothing.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::animation::Animation;
use crate::frame;

/// How many times an entry is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    Infinite,
    Times(u32),
}

impl Default for LoopCount {
    fn default() -> Self {
        Self::Times(1)
    }
}

impl LoopCount {
    /// `-1` means infinite, any other non-negative value is a loop count.
    pub fn from_i64(n: i64) -> Result<Self, String> {
        match n {
            -1 => Ok(Self::Infinite),
            n if n >= 0 => u32::try_from(n)
                .map(Self::Times)
                .map_err(|_| format!("loop count {n} is too large")),
            n => Err(format!("invalid loop count {n} (use -1 for infinite)")),
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Self::Infinite => -1,
            Self::Times(n) => i64::from(n),
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }
}

impl FromStr for LoopCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "inf" | "infinite" => Ok(Self::Infinite),
            other => {
                let n: i64 = other
                    .parse()
                    .map_err(|_| format!("invalid loop count '{other}'"))?;
                Self::from_i64(n)
            }
        }
    }
}

impl fmt::Display for LoopCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// An animation with its loop count.
#[derive(Debug, Clone)]
pub struct PlaylistEntry {
    pub animation: Animation,
    pub loops: LoopCount,
}

impl PlaylistEntry {
    pub fn new(animation: Animation, loops: LoopCount) -> Self {
        Self { animation, loops }
    }

    pub fn frame_count(&self) -> usize {
        self.animation.data.len()
    }

    /// Ticks until finished, `None` when it loops forever.
    pub fn total_ticks(&self) -> Option<usize> {
        let n = self.frame_count();
        match self.loops {
            _ if n == 0 => Some(0),
            LoopCount::Infinite => None,
            LoopCount::Times(loops) => Some(n * loops as usize),
        }
    }

    pub fn is_finished_at(&self, tick: usize) -> bool {
        self.total_ticks().is_some_and(|total| tick >= total)
    }

    /// Index of the frame shown at `tick`.
    pub fn frame_index_at(&self, tick: usize) -> Option<usize> {
        let n = self.frame_count();
        match self.total_ticks() {
            Some(0) => None,
            Some(total) if tick >= total => Some(n - 1),
            _ => Some(tick % n),
        }
    }

    pub fn frame_at(&self, tick: usize) -> Option<&str> {
        self.frame_index_at(tick)
            .map(|i| self.animation.data[i].as_str())
    }
}

/// Animations played side by side on a shared clock.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(entries: Vec<PlaylistEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, animation: Animation, loops: LoopCount) {
        self.entries.push(PlaylistEntry::new(animation, loops));
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frame of every entry at `tick`.
    pub fn frames_at(&self, tick: usize) -> Vec<Option<&str>> {
        self.entries.iter().map(|e| e.frame_at(tick)).collect()
    }

    /// True once every entry has played all its loops.
    pub fn is_finished(&self, tick: usize) -> bool {
        self.entries.iter().all(|e| e.is_finished_at(tick))
    }

    /// Length of the whole playlist, `None` if any entry loops forever.
    pub fn total_ticks(&self) -> Option<usize> {
        self.entries
            .iter()
            .map(PlaylistEntry::total_ticks)
            .try_fold(0, |acc, t| t.map(|t| acc.max(t)))
    }

    pub fn has_infinite_entries(&self) -> bool {
        self.entries.iter().any(|e| e.loops.is_infinite())
    }

    /// Copy with every infinite entry reduced to a single loop.
    pub fn single_pass(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|e| PlaylistEntry {
                animation: e.animation.clone(),
                loops: match e.loops {
                    LoopCount::Infinite => LoopCount::Times(1),
                    times => times,
                },
            })
            .collect();
        Self { entries }
    }

    /// Frame count of the longest entry that loops forever.
    pub fn cycle_length(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.loops.is_infinite())
            .map(PlaylistEntry::frame_count)
            .max()
            .unwrap_or(0)
    }

    /// Widest frame and tallest frame over all entries.
    pub fn max_frame_dimensions(&self) -> (usize, usize) {
        self.entries
            .iter()
            .map(|e| frame::max_dimensions(&e.animation.data))
            .fold((0, 0), |(w, h), (ew, eh)| (w.max(ew), h.max(eh)))
    }

    /// Delay between ticks.
    ///
    /// An explicit override wins, then the delay recorded in a lone
    /// animation, then `default_ms`.
    pub fn tick_delay(&self, override_ms: Option<u64>, default_ms: u64) -> Duration {
        let recorded = match self.entries.as_slice() {
            [only] => only.animation.frame_delay_ms,
            _ => None,
        };
        Duration::from_millis(override_ms.or(recorded).unwrap_or(default_ms).max(1))
    }
}
