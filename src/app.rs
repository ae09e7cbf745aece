use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::form::{self, AccountPath};
use crate::state::messages::NetworkRequest;
use crate::state::signup::{
    AccountSignupPlan, AccountSignupSettled, SignupState, SubmitPhase, SubmitSettled,
    build_submit_plan,
};
use liga_api::places::{CityCandidate, CityRecord};
use liga_api::{DiscountValidation, League, MatchInfo, SkillLevel, StandingsTable};
use std::time::Instant;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    League,
    Signup,
    Standings,
    Schedule,
    Guide,
    Cities,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(settings.locale),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Store a freshly loaded league and reset everything scoped to the
    /// previous one. Returns the follow-up requests: standings, schedule,
    /// and a discount validation when there is a code to auto-apply.
    pub fn on_league_loaded(&mut self, league: League) -> Vec<NetworkRequest> {
        self.state.last_error = None;
        let slug = league.slug.clone();
        let season = league.resolved_season_name();

        self.state.signup = SignupState::default();
        if !league.requires_level_choice() {
            self.state.signup.form.level = Some(league.skill_level);
        }
        self.state.discount.reset_for_league();
        self.state.standings.season = Some(season.clone());
        self.state.league.loaded(league);

        let mut follow_ups = vec![
            NetworkRequest::LoadStandings { slug: slug.clone(), season: Some(season.clone()) },
            NetworkRequest::LoadMatches { slug: slug.clone(), season: Some(season) },
        ];
        if let Some(code) = self
            .state
            .discount
            .code_for_auto_apply(&slug, self.settings.startup_discount.as_deref())
        {
            self.state.discount.code_input = code.clone();
            self.state.discount.validating = true;
            follow_ups.push(NetworkRequest::ValidateDiscount { slug, code });
        }
        follow_ups
    }

    pub fn on_league_missing(&mut self, slug: String) {
        self.state.last_error = None;
        self.state.league.missing(slug);
    }

    pub fn on_standings_loaded(&mut self, table: StandingsTable) {
        self.state.standings.load(table);
    }

    pub fn on_matches_loaded(&mut self, matches: Vec<MatchInfo>) {
        let total_rounds = self
            .state
            .standings
            .table
            .as_ref()
            .map(|t| t.total_rounds)
            .unwrap_or(0);
        self.state.schedule.load(matches, total_rounds);
    }

    pub fn on_discount_validated(
        &mut self,
        slug: String,
        code: String,
        validation: DiscountValidation,
    ) {
        let current = self.state.league.league.as_ref().map(|l| l.slug.as_str());
        if current != Some(slug.as_str()) {
            // Stale response from a league the user has navigated away from.
            self.state.discount.validating = false;
            return;
        }
        if self.state.discount.code_input.trim().is_empty() {
            self.state.discount.code_input = code.clone();
        }
        self.state.discount.settle(&slug, &code, validation);
    }

    pub fn on_registration_settled(&mut self, settled: SubmitSettled) {
        self.state.signup.settle(settled);
    }

    pub fn on_signup_settled(&mut self, settled: AccountSignupSettled) {
        match settled {
            AccountSignupSettled::Created => {
                self.state.signup.errors.clear_all();
                self.state.signup.result = None;
                self.state.signup.phase = SubmitPhase::Success;
            }
            AccountSignupSettled::Rejected(errors) => {
                self.state.signup.errors = errors;
                self.state.signup.phase = SubmitPhase::Rejected;
            }
        }
    }

    pub fn on_cities_loaded(&mut self, cities: Vec<CityRecord>) {
        self.state.cities.load_cities(cities);
    }

    pub fn on_city_search_results(&mut self, query: String, results: Vec<CityCandidate>) {
        self.state.cities.searching = false;
        self.state.cities.load_results(&query, results);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Signup actions
    // -----------------------------------------------------------------------

    /// Validate and kick off a submission. Any client-side error aborts the
    /// attempt before a single byte leaves the machine. With a league loaded
    /// this is a registration; without one it is a bare account signup.
    pub fn submit_signup(&mut self) -> Option<NetworkRequest> {
        if self.state.signup.is_submitting() {
            return None;
        }
        let locale = self.state.locale;

        match self.state.league.league.as_ref() {
            Some(league) => {
                let errors = form::validate(&self.state.signup.form, league.skill_level, locale);
                if !errors.is_empty() {
                    self.state.signup.errors = errors;
                    return None;
                }
                self.state.signup.begin_submit();
                let plan = build_submit_plan(
                    &self.state.signup.form,
                    league,
                    locale,
                    self.state.discount.applied_code(),
                    self.settings.site_base(),
                );
                Some(NetworkRequest::SubmitRegistration { plan })
            }
            None => {
                // Account-only signup always needs the full identity.
                let mut form = self.state.signup.form.clone();
                form.path = AccountPath::New;
                let errors = form::validate(&form, SkillLevel::Beginner, locale);
                if !errors.is_empty() {
                    self.state.signup.errors = errors;
                    return None;
                }
                self.state.signup.begin_submit();
                let plan = AccountSignupPlan {
                    locale,
                    name: form.name.trim().to_owned(),
                    email: form.email.trim().to_owned(),
                    whatsapp: form.whatsapp.trim().to_owned(),
                    password: form.password.clone(),
                };
                Some(NetworkRequest::SubmitAccountSignup { plan })
            }
        }
    }

    pub fn apply_discount(&mut self) -> Option<NetworkRequest> {
        let league = self.state.league.league.as_ref()?;
        let code = self.state.discount.begin_validation()?;
        Some(NetworkRequest::ValidateDiscount { slug: league.slug.clone(), code })
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    /// Flip the UI language and persist the choice.
    pub fn toggle_locale(&mut self) {
        self.state.locale = self.state.locale.toggled();
        self.settings.locale = self.state.locale;
        self.settings.save();
    }

    // -----------------------------------------------------------------------
    // Clock tick — drives the city search debounce
    // -----------------------------------------------------------------------

    pub fn tick(&mut self, now: Instant) -> Option<NetworkRequest> {
        let query = self.state.cities.poll_search(now)?;
        self.state.cities.searching = true;
        Some(NetworkRequest::SearchCities { query })
    }
}
