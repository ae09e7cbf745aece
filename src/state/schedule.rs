use liga_api::{MatchInfo, round_availability};
use std::collections::BTreeMap;

/// Schedule panel state: matches grouped by round, with a round selector
/// that knows which rounds actually have matches.
#[derive(Debug, Default)]
pub struct ScheduleState {
    pub matches: Vec<MatchInfo>,
    pub total_rounds: u8,
    pub selected_round: Option<u8>,
    pub scroll_offset: u16,
}

impl ScheduleState {
    pub fn load(&mut self, matches: Vec<MatchInfo>, total_rounds: u8) {
        let highest = matches.iter().map(|m| m.round).max().unwrap_or(0);
        self.total_rounds = total_rounds.max(highest);
        self.matches = matches;
        self.scroll_offset = 0;
        if let Some(round) = self.selected_round
            && round > self.total_rounds
        {
            self.selected_round = None;
        }
    }

    /// `(round, has_matches)` for every round of the season.
    pub fn rounds(&self) -> Vec<(u8, bool)> {
        round_availability(self.total_rounds, &self.matches)
    }

    pub fn grouped_by_round(&self) -> BTreeMap<u8, Vec<&MatchInfo>> {
        let mut grouped: BTreeMap<u8, Vec<&MatchInfo>> = BTreeMap::new();
        for m in &self.matches {
            grouped.entry(m.round).or_default().push(m);
        }
        grouped
    }

    pub fn visible_matches(&self) -> Vec<&MatchInfo> {
        match self.selected_round {
            None => self.matches.iter().collect(),
            Some(round) => self.matches.iter().filter(|m| m.round == round).collect(),
        }
    }

    /// Cycle round filter: all → 1 → 2 → … → all.
    pub fn cycle_round(&mut self) {
        self.scroll_offset = 0;
        self.selected_round = match self.selected_round {
            None if self.total_rounds > 0 => Some(1),
            Some(round) if round < self.total_rounds => Some(round + 1),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_in_round(round: u8) -> MatchInfo {
        MatchInfo { round, ..MatchInfo::default() }
    }

    #[test]
    fn rounds_flag_gaps_in_the_schedule() {
        let mut state = ScheduleState::default();
        state.load(vec![match_in_round(1), match_in_round(1), match_in_round(3)], 4);
        assert_eq!(state.rounds(), vec![(1, true), (2, false), (3, true), (4, false)]);
    }

    #[test]
    fn grouping_keeps_rounds_ordered() {
        let mut state = ScheduleState::default();
        state.load(vec![match_in_round(3), match_in_round(1), match_in_round(3)], 3);
        let grouped = state.grouped_by_round();
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(grouped[&3].len(), 2);
    }

    #[test]
    fn round_filter_cycles_back_to_all() {
        let mut state = ScheduleState::default();
        state.load(vec![match_in_round(1), match_in_round(2)], 2);
        assert_eq!(state.visible_matches().len(), 2);
        state.cycle_round();
        assert_eq!(state.selected_round, Some(1));
        assert_eq!(state.visible_matches().len(), 1);
        state.cycle_round();
        state.cycle_round();
        assert_eq!(state.selected_round, None);
    }

    #[test]
    fn total_rounds_stretches_to_cover_late_matches() {
        let mut state = ScheduleState::default();
        state.load(vec![match_in_round(6)], 4);
        assert_eq!(state.total_rounds, 6);
    }
}
