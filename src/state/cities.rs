use liga_api::places::{CityCandidate, CityRecord};
use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Trailing debounce: every keystroke resets the deadline, so a burst of
/// typing produces a single fire once the keyboard goes quiet.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self { delay: SEARCH_DEBOUNCE, deadline: None }
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    pub fn record_input(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True exactly once per armed deadline, when the quiet period elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Admin city editor: the league cities list plus a debounced Google Places
/// autocomplete search.
#[derive(Debug, Default)]
pub struct CityAdminState {
    pub cities: Vec<CityRecord>,
    pub query: String,
    pub results: Vec<CityCandidate>,
    pub searching: bool,
    pub editing: bool,
    pub selected: usize,
    debouncer: Debouncer,
}

impl CityAdminState {
    pub fn edit_char(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.arm_or_cancel(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        self.query.pop();
        self.arm_or_cancel(now);
    }

    fn arm_or_cancel(&mut self, now: Instant) {
        // Autocomplete needs at least two characters to be useful.
        if self.query.trim().len() >= 2 {
            self.debouncer.record_input(now);
        } else {
            self.debouncer.cancel();
            self.results.clear();
        }
    }

    /// Called from the UI tick. Returns the query to search when the
    /// debounce window has closed.
    pub fn poll_search(&mut self, now: Instant) -> Option<String> {
        if !self.debouncer.fire(now) {
            return None;
        }
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }
        Some(query.to_owned())
    }

    pub fn load_cities(&mut self, cities: Vec<CityRecord>) {
        self.selected = 0;
        self.cities = cities;
    }

    /// Drop results for a query the user has since typed past.
    pub fn load_results(&mut self, query: &str, results: Vec<CityCandidate>) {
        if self.query.trim() == query {
            self.results = results;
        }
    }

    pub fn navigate_down(&mut self) {
        let max = self.cities.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_keystrokes_fires_exactly_once() {
        let mut state = CityAdminState::default();
        let t0 = Instant::now();

        // Five characters inside 100ms.
        for (i, c) in "sotog".chars().enumerate() {
            state.edit_char(c, t0 + Duration::from_millis(25 * i as u64));
        }
        let last = t0 + Duration::from_millis(100);

        assert!(state.poll_search(last + Duration::from_millis(249)).is_none());
        assert_eq!(
            state.poll_search(last + Duration::from_millis(250)).as_deref(),
            Some("sotog")
        );
        // Armed once, fires once.
        assert!(state.poll_search(last + Duration::from_millis(400)).is_none());
    }

    #[test]
    fn every_keystroke_pushes_the_deadline_back() {
        let mut state = CityAdminState::default();
        let t0 = Instant::now();
        state.edit_char('m', t0);
        state.edit_char('a', t0);
        assert!(state.poll_search(t0 + Duration::from_millis(200)).is_none());
        state.edit_char('d', t0 + Duration::from_millis(200));
        // The first deadline would have passed here, but the third
        // keystroke reset it.
        assert!(state.poll_search(t0 + Duration::from_millis(260)).is_none());
        assert!(state.poll_search(t0 + Duration::from_millis(450)).is_some());
    }

    #[test]
    fn short_queries_never_search() {
        let mut state = CityAdminState::default();
        let t0 = Instant::now();
        state.edit_char('m', t0);
        assert!(state.poll_search(t0 + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn deleting_below_two_chars_cancels_the_pending_search() {
        let mut state = CityAdminState::default();
        let t0 = Instant::now();
        state.edit_char('m', t0);
        state.edit_char('a', t0);
        state.backspace(t0 + Duration::from_millis(10));
        assert!(state.poll_search(t0 + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut state = CityAdminState::default();
        let t0 = Instant::now();
        for c in "madr".chars() {
            state.edit_char(c, t0);
        }
        state.load_results(
            "ma",
            vec![CityCandidate { place_id: "x".into(), description: "Málaga".into() }],
        );
        assert!(state.results.is_empty());
        state.load_results(
            "madr",
            vec![CityCandidate { place_id: "y".into(), description: "Madrid".into() }],
        );
        assert_eq!(state.results.len(), 1);
    }
}
