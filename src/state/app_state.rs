use crate::app::MenuItem;
use crate::state::cities::CityAdminState;
use crate::state::discount::DiscountState;
use crate::state::schedule::ScheduleState;
use crate::state::signup::SignupState;
use crate::state::standings::StandingsState;
use liga_api::{League, Locale};

// ---------------------------------------------------------------------------
// League lookup state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LeagueState {
    /// Slug being typed into the lookup field.
    pub slug_input: String,
    pub editing: bool,
    pub league: Option<League>,
    /// Set when the last lookup came back 404. Renders a dedicated
    /// not-found view instead of an error banner.
    pub not_found: Option<String>,
}

impl LeagueState {
    /// Finish editing and hand back the slug to load, if any.
    pub fn submit_slug(&mut self) -> Option<String> {
        self.editing = false;
        let slug = self.slug_input.trim().to_lowercase();
        if slug.is_empty() { None } else { Some(slug) }
    }

    pub fn loaded(&mut self, league: League) {
        self.not_found = None;
        self.slug_input = league.slug.clone();
        self.league = Some(league);
    }

    pub fn missing(&mut self, slug: String) {
        self.league = None;
        self.not_found = Some(slug);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub locale: Locale,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub league: LeagueState,
    pub signup: SignupState,
    pub discount: DiscountState,
    pub standings: StandingsState,
    pub schedule: ScheduleState,
    pub cities: CityAdminState,
}

impl AppState {
    pub fn new(locale: Locale) -> Self {
        Self { locale, ..Self::default() }
    }
}
