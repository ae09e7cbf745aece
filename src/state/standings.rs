use liga_api::{StandingsTable, season_display_name};

/// Standings panel state. Pure display over a server-computed table; a
/// failed fetch leaves it empty rather than erroring the page.
#[derive(Debug, Default)]
pub struct StandingsState {
    pub table: Option<StandingsTable>,
    pub season: Option<String>,
    pub selected: usize,
    pub scroll_offset: u16,
}

impl StandingsState {
    pub fn load(&mut self, table: StandingsTable) {
        self.selected = 0;
        self.scroll_offset = 0;
        self.table = Some(table);
    }

    pub fn season_label(&self) -> String {
        match &self.season {
            Some(slug) => season_display_name(slug),
            None => "Current season".to_owned(),
        }
    }

    pub fn navigate_down(&mut self) {
        let max = self
            .table
            .as_ref()
            .map(|t| t.rows.len().saturating_sub(1))
            .unwrap_or(0);
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
    use liga_api::StandingRow;

    #[test]
    fn season_label_uses_the_display_table() {
        let mut state = StandingsState::default();
        state.season = Some("verano2025".into());
        assert_eq!(state.season_label(), "Summer 2025");
        state.season = Some("liga-custom".into());
        assert_eq!(state.season_label(), "liga-custom");
    }

    #[test]
    fn navigation_clamps_to_the_table() {
        let mut state = StandingsState::default();
        state.navigate_down();
        assert_eq!(state.selected, 0);

        state.load(StandingsTable {
            rows: vec![StandingRow::default(), StandingRow::default()],
            ..StandingsTable::default()
        });
        state.navigate_down();
        state.navigate_down();
        assert_eq!(state.selected, 1);
        state.navigate_up();
        state.navigate_up();
        assert_eq!(state.selected, 0);
    }
}
