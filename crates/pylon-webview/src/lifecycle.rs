//! Load sequencing for the embedded page.
//!
//! At most one load is in flight. Every load gets a fresh
//! [`LoadGeneration`]; a finished or failed signal carrying an older
//! generation belongs to content that a forced reload already discarded
//! and is ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    NotStarted,
    Loading,
    Loaded,
}

/// Token identifying one load of the embedded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadGeneration(pub u64);

impl fmt::Display for LoadGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct LifecycleController {
    state: LoadState,
    generation: LoadGeneration,
    ever_initialized: bool,
}

impl LifecycleController {
    pub fn new() -> Self {
        Self {
            state: LoadState::NotStarted,
            generation: LoadGeneration(0),
            ever_initialized: false,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Generation of the most recently started load.
    pub fn generation(&self) -> LoadGeneration {
        self.generation
    }

    pub fn has_started_loading(&self) -> bool {
        self.state != LoadState::NotStarted
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Whether the page has reported `initialized` at least once, across
    /// all loads.
    pub fn ever_initialized(&self) -> bool {
        self.ever_initialized
    }

    /// Returns the generation of a load the caller must now start, or
    /// `None` when a load is already in flight or done and `force_reload`
    /// is false.
    pub fn ensure_loaded(&mut self, force_reload: bool) -> Option<LoadGeneration> {
        if force_reload {
            self.state = LoadState::NotStarted;
        }
        if self.has_started_loading() {
            return None;
        }
        self.generation = LoadGeneration(self.generation.0 + 1);
        self.state = LoadState::Loading;
        Some(self.generation)
    }

    /// First finished signal for the current load: `true` means the caller
    /// must inject the initialization script. Duplicate and stale signals
    /// return `false`.
    pub fn on_page_finished(&mut self, generation: LoadGeneration) -> bool {
        if generation != self.generation || self.state != LoadState::Loading {
            return false;
        }
        self.state = LoadState::Loaded;
        true
    }

    /// Whether a load failure belongs to the current load.
    pub fn is_current(&self, generation: LoadGeneration) -> bool {
        self.has_started_loading() && generation == self.generation
    }

    pub fn mark_initialized(&mut self) {
        self.ever_initialized = true;
    }
}

impl Default for LifecycleController {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_started() {
        let lc = LifecycleController::new();
        assert_eq!(lc.state(), LoadState::NotStarted);
        assert!(!lc.has_started_loading());
        assert!(!lc.ever_initialized());
    }

    #[test]
    fn repeated_ensure_loaded_loads_once() {
        let mut lc = LifecycleController::new();
        let loads: Vec<_> = (0..5).filter_map(|_| lc.ensure_loaded(false)).collect();
        assert_eq!(loads, vec![LoadGeneration(1)]);
        assert_eq!(lc.state(), LoadState::Loading);
    }

    #[test]
    fn ensure_loaded_after_loaded_is_noop() {
        let mut lc = LifecycleController::new();
        let generation = lc.ensure_loaded(false).unwrap();
        assert!(lc.on_page_finished(generation));
        assert_eq!(lc.ensure_loaded(false), None);
        assert!(lc.is_loaded());
    }

    #[test]
    fn forced_reload_after_completion_loads_once_more() {
        let mut lc = LifecycleController::new();
        let first = lc.ensure_loaded(false).unwrap();
        assert!(lc.on_page_finished(first));

        let second = lc.ensure_loaded(true).unwrap();
        assert_eq!(second, LoadGeneration(2));
        assert_eq!(lc.state(), LoadState::Loading);
        assert_eq!(lc.ensure_loaded(false), None);
    }

    #[test]
    fn first_finished_signal_wins() {
        let mut lc = LifecycleController::new();
        let generation = lc.ensure_loaded(false).unwrap();
        assert!(lc.on_page_finished(generation));
        assert!(!lc.on_page_finished(generation));
    }

    #[test]
    fn stale_finished_after_forced_reload_is_ignored() {
        let mut lc = LifecycleController::new();
        let first = lc.ensure_loaded(false).unwrap();
        let second = lc.ensure_loaded(true).unwrap();

        assert!(!lc.on_page_finished(first));
        assert_eq!(lc.state(), LoadState::Loading);
        assert!(lc.on_page_finished(second));
    }

    #[test]
    fn finished_before_any_load_is_ignored() {
        let mut lc = LifecycleController::new();
        assert!(!lc.on_page_finished(LoadGeneration(0)));
        assert_eq!(lc.state(), LoadState::NotStarted);
    }

    #[test]
    fn is_current_tracks_latest_generation() {
        let mut lc = LifecycleController::new();
        assert!(!lc.is_current(LoadGeneration(0)));
        let first = lc.ensure_loaded(false).unwrap();
        assert!(lc.is_current(first));
        let second = lc.ensure_loaded(true).unwrap();
        assert!(!lc.is_current(first));
        assert!(lc.is_current(second));
    }

    #[test]
    fn initialized_flag_survives_reload() {
        let mut lc = LifecycleController::new();
        lc.ensure_loaded(false);
        lc.mark_initialized();
        lc.ensure_loaded(true);
        assert!(lc.ever_initialized());
    }
}
