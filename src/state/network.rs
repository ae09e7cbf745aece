use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::signup::{AccountSignupPlan, SubmitPlan, submit_account_signup, submit_registration};
use liga_api::client::{ApiError, LeagueApi};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: LeagueApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        api_base: Option<&str>,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        let client = match api_base {
            Some(base) => LeagueApi::with_base_url(base),
            None => LeagueApi::new(),
        };
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadLeague { slug } => self.handle_load_league(slug).await,
                NetworkRequest::LoadStandings { slug, season } => {
                    self.handle_load_standings(slug, season).await
                }
                NetworkRequest::LoadMatches { slug, season } => {
                    self.handle_load_matches(slug, season).await
                }
                NetworkRequest::ValidateDiscount { slug, code } => {
                    self.handle_validate_discount(slug, code).await
                }
                NetworkRequest::SubmitRegistration { plan } => {
                    self.handle_submit_registration(plan).await
                }
                NetworkRequest::SubmitAccountSignup { plan } => {
                    self.handle_submit_account_signup(plan).await
                }
                NetworkRequest::LoadCities => self.handle_load_cities().await,
                NetworkRequest::SearchCities { query } => self.handle_search_cities(query).await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_league(&self, slug: String) -> Result<NetworkResponse, ApiError> {
        debug!("loading league {slug}");
        match self.client.fetch_league(&slug).await {
            Ok(league) => Ok(NetworkResponse::LeagueLoaded { league: Box::new(league) }),
            // An unknown slug is a view state, not an error banner.
            Err(ApiError::NotFound(_)) => Ok(NetworkResponse::LeagueMissing { slug }),
            Err(e) => Err(e),
        }
    }

    async fn handle_load_standings(
        &self,
        slug: String,
        season: Option<String>,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("loading standings for {slug}");
        let table = self.client.fetch_standings(&slug, season.as_deref()).await?;
        Ok(NetworkResponse::StandingsLoaded { table })
    }

    async fn handle_load_matches(
        &self,
        slug: String,
        season: Option<String>,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("loading matches for {slug}");
        let matches = self
            .client
            .fetch_matches(&slug, season.as_deref(), None, None)
            .await?;
        Ok(NetworkResponse::MatchesLoaded { matches })
    }

    async fn handle_validate_discount(
        &self,
        slug: String,
        code: String,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("validating discount code for {slug}");
        let validation = self.client.validate_discount(&slug, &code).await;
        Ok(NetworkResponse::DiscountValidated { slug, code, validation })
    }

    async fn handle_submit_registration(
        &self,
        plan: SubmitPlan,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("submitting registration for league {}", plan.league_slug);
        let settled = submit_registration(&self.client, &plan).await;
        Ok(NetworkResponse::RegistrationSettled { settled })
    }

    async fn handle_submit_account_signup(
        &self,
        plan: AccountSignupPlan,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("submitting account signup");
        let settled = submit_account_signup(&self.client, &plan).await;
        Ok(NetworkResponse::SignupSettled { settled })
    }

    async fn handle_load_cities(&self) -> Result<NetworkResponse, ApiError> {
        debug!("loading league cities");
        let cities = self.client.list_cities().await?;
        Ok(NetworkResponse::CitiesLoaded { cities })
    }

    async fn handle_search_cities(&self, query: String) -> Result<NetworkResponse, ApiError> {
        debug!("searching cities for {query:?}");
        let results = self.client.search_google_cities(&query).await?;
        Ok(NetworkResponse::CitySearchResults { query, results })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
