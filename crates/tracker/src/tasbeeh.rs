//! Tasbeeh of Fatima (sa): 33 Subhanallah, 33 Alhamdulillah, 34 Allahu Akbar.

use namaz_store::{SettingsStore, StoreError};
use serde::Serialize;
use tracing::debug;

pub const PHASE_KEY: &str = "tasbeeh_phase";
pub const COUNT_KEY: &str = "tasbeeh_count";
pub const COMPLETED_KEY: &str = "tasbeeh_completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TasbeehPhase {
    pub arabic: &'static str,
    pub transliteration: &'static str,
    pub meaning: &'static str,
    pub target: u32,
}

pub const PHASES: [TasbeehPhase; 3] = [
    TasbeehPhase {
        arabic: "سُبْحَانَ اللَّهِ",
        transliteration: "Subhanallah",
        meaning: "Glory be to Allah",
        target: 33,
    },
    TasbeehPhase {
        arabic: "الْحَمْدُ لِلَّهِ",
        transliteration: "Alhamdulillah",
        meaning: "All praise belongs to Allah",
        target: 33,
    },
    TasbeehPhase {
        arabic: "اللَّهُ أَكْبَرُ",
        transliteration: "Allahu Akbar",
        meaning: "Allah is the Greatest",
        target: 34,
    },
];

/// What a single tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Counted { phase: usize, count: u32 },
    /// The previous phase hit its target; counting restarts in `phase`.
    PhaseAdvanced { phase: usize },
    Completed,
    /// Taps after completion are ignored until reset.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TasbeehCounter {
    phase: usize,
    count: u32,
    completed: bool,
}

impl TasbeehCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase_index(&self) -> usize {
        self.phase
    }

    pub fn phase(&self) -> &'static TasbeehPhase {
        &PHASES[self.phase]
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Recitations so far across all phases, out of 100.
    pub fn total(&self) -> u32 {
        let finished: u32 = PHASES[..self.phase].iter().map(|p| p.target).sum();
        finished + self.count
    }

    pub fn tap(&mut self) -> TapOutcome {
        let target = PHASES[self.phase].target;
        if self.completed || self.count >= target {
            return TapOutcome::Ignored;
        }
        self.count += 1;
        if self.count < target {
            return TapOutcome::Counted {
                phase: self.phase,
                count: self.count,
            };
        }
        if self.phase + 1 < PHASES.len() {
            self.phase += 1;
            self.count = 0;
            TapOutcome::PhaseAdvanced { phase: self.phase }
        } else {
            self.completed = true;
            TapOutcome::Completed
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Restore saved state, clamping anything out of range.
    ///
    /// An unfinished counter always has room for one more tap in its phase; a
    /// finished one sits at the end of the last phase.
    pub fn load<S: SettingsStore>(store: &S) -> Self {
        if store.get_bool(COMPLETED_KEY, false) {
            let phase = PHASES.len() - 1;
            return Self {
                phase,
                count: PHASES[phase].target,
                completed: true,
            };
        }
        let phase = usize::try_from(store.get_int(PHASE_KEY, 0))
            .unwrap_or(0)
            .min(PHASES.len() - 1);
        let count = u32::try_from(store.get_int(COUNT_KEY, 0))
            .unwrap_or(0)
            .min(PHASES[phase].target - 1);
        Self {
            phase,
            count,
            completed: false,
        }
    }

    pub fn save<S: SettingsStore>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set_int(PHASE_KEY, self.phase as i64)?;
        store.set_int(COUNT_KEY, i64::from(self.count))?;
        store.set_bool(COMPLETED_KEY, self.completed)?;
        debug!(
            phase = self.phase,
            count = self.count,
            completed = self.completed,
            "saved tasbeeh state"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use namaz_store::MemoryStore;

    #[test]
    fn phases_total_one_hundred() {
        assert_eq!(PHASES.iter().map(|p| p.target).sum::<u32>(), 100);
    }

    #[test]
    fn full_cycle_advances_and_completes() {
        let mut counter = TasbeehCounter::new();
        for _ in 0..32 {
            assert!(matches!(counter.tap(), TapOutcome::Counted { phase: 0, .. }));
        }
        assert_eq!(counter.tap(), TapOutcome::PhaseAdvanced { phase: 1 });
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.total(), 33);

        for _ in 0..33 {
            counter.tap();
        }
        assert_eq!(counter.phase().transliteration, "Allahu Akbar");
        for _ in 0..33 {
            counter.tap();
        }
        assert_eq!(counter.tap(), TapOutcome::Completed);
        assert!(counter.is_completed());
        assert_eq!(counter.total(), 100);
        assert_eq!(counter.tap(), TapOutcome::Ignored);
        assert_eq!(counter.count(), 34);

        counter.reset();
        assert_eq!(counter, TasbeehCounter::new());
    }

    #[test]
    fn state_persists_and_clamps() {
        let mut store = MemoryStore::new();
        let mut counter = TasbeehCounter::new();
        for _ in 0..40 {
            counter.tap();
        }
        counter.save(&mut store).unwrap();
        assert_eq!(store.get_int(PHASE_KEY, -1), 1);
        assert_eq!(TasbeehCounter::load(&store), counter);

        store.set_int(PHASE_KEY, 9).unwrap();
        store.set_int(COUNT_KEY, 99).unwrap();
        let clamped = TasbeehCounter::load(&store);
        assert_eq!(clamped.phase_index(), 2);
        assert_eq!(clamped.count(), 33);
        assert!(!clamped.is_completed());
    }

    #[test]
    fn count_at_target_still_accepts_the_next_tap() {
        let mut store = MemoryStore::new();
        store.set_int(PHASE_KEY, 0).unwrap();
        store.set_int(COUNT_KEY, 33).unwrap();
        store.set_bool(COMPLETED_KEY, false).unwrap();

        let mut counter = TasbeehCounter::load(&store);
        assert_eq!(counter.count(), 32);
        assert_eq!(counter.tap(), TapOutcome::PhaseAdvanced { phase: 1 });
    }

    #[test]
    fn last_phase_at_target_completes_on_next_tap() {
        let mut store = MemoryStore::new();
        store.set_int(PHASE_KEY, 2).unwrap();
        store.set_int(COUNT_KEY, 34).unwrap();

        let mut counter = TasbeehCounter::load(&store);
        assert_eq!(counter.tap(), TapOutcome::Completed);
        assert!(counter.is_completed());
    }

    #[test]
    fn completed_flag_pins_the_end_of_the_last_phase() {
        let mut store = MemoryStore::new();
        store.set_int(PHASE_KEY, 0).unwrap();
        store.set_int(COUNT_KEY, 5).unwrap();
        store.set_bool(COMPLETED_KEY, true).unwrap();

        let mut counter = TasbeehCounter::load(&store);
        assert_eq!(counter.phase_index(), PHASES.len() - 1);
        assert_eq!(counter.count(), 34);
        assert_eq!(counter.total(), 100);
        assert_eq!(counter.tap(), TapOutcome::Ignored);
    }
}
