use crate::state::network::LoadingState;
use crate::state::signup::{AccountSignupPlan, AccountSignupSettled, SubmitPlan, SubmitSettled};
use crossterm::event::KeyEvent;
use liga_api::places::{CityCandidate, CityRecord};
use liga_api::{DiscountValidation, League, MatchInfo, StandingsTable};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadLeague { slug: String },
    LoadStandings { slug: String, season: Option<String> },
    LoadMatches { slug: String, season: Option<String> },
    ValidateDiscount { slug: String, code: String },
    SubmitRegistration { plan: SubmitPlan },
    SubmitAccountSignup { plan: AccountSignupPlan },
    LoadCities,
    SearchCities { query: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    LeagueLoaded { league: Box<League> },
    LeagueMissing { slug: String },
    StandingsLoaded { table: StandingsTable },
    MatchesLoaded { matches: Vec<MatchInfo> },
    DiscountValidated { slug: String, code: String, validation: DiscountValidation },
    RegistrationSettled { settled: SubmitSettled },
    SignupSettled { settled: AccountSignupSettled },
    CitiesLoaded { cities: Vec<CityRecord> },
    CitySearchResults { query: String, results: Vec<CityCandidate> },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    Tick,
}
