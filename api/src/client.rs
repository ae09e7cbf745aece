use crate::places::{CitiesResponse, CityCandidate, CityRecord, CitySearchResponse};
use crate::wire::{
    DiscountResponse, LeagueEnvelope, MatchesResponse, ProfileResponse, RegisterResponse,
    SignInResponse, SignupResponse, StandingsResponse, WireLeague, WireMatch, WireStandingRow,
};
use crate::{
    Bilingual, DiscountValidation, League, LeagueStatus, MatchInfo, MatchStatus, PlayerProfile,
    Price, Season, SeasonConfig, SeasonRef, SkillLevel, StandingRow, StandingsTable,
};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BASE: &str = "https://api.ligadetenis.es";

/// League platform API client.
#[derive(Debug, Clone)]
pub struct LeagueApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for LeagueApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("ligatui/0.1 (terminal league client)")
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request bodies and typed outcomes
// ---------------------------------------------------------------------------

/// Body for `POST /api/players/register`. `password` and `discount_code`
/// must be absent from the JSON when unset — the backend treats an explicit
/// null as a value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub language: String,
    pub league_id: String,
    pub league_slug: String,
    pub season: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
}

/// Body for `POST /api/auth/signup` (account-only signup).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub password: String,
    pub language: String,
    pub source: String,
}

/// How a registration attempt settled, status-wise. A 409 is reported as a
/// bare `Conflict`: its meaning depends on which signup path issued the
/// request, and that context lives with the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    Success { whatsapp_group_link: Option<String> },
    Conflict,
    Invalid(Vec<String>),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct SignInOutcome {
    pub ok: bool,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    Created,
    EmailExists,
    Failed(String),
}

impl LeagueApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different backend. Tests aim this at a mock
    /// server; operators aim it at a staging deployment.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Fetch a league by slug. A missing slug is `ApiError::NotFound` and
    /// renders as a dedicated not-found view; there is no retry.
    pub async fn fetch_league(&self, slug: &str) -> ApiResult<League> {
        let url = format!("{}/api/leagues/{slug}", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("league {slug}")));
        }

        let raw: LeagueEnvelope = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.clone()))?
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url))?;
        Ok(map_league(raw.league))
    }

    /// Fetch the unified standings table. Client errors degrade to an empty
    /// table: the standings panel just shows nothing rather than failing.
    pub async fn fetch_standings(
        &self,
        slug: &str,
        season: Option<&str>,
    ) -> ApiResult<StandingsTable> {
        let mut url = format!("{}/api/leagues/{slug}/standings", self.base_url);
        if let Some(season) = season {
            url.push_str(&format!("?season={season}"));
        }
        let raw: StandingsResponse = self.get(&url).await?;
        Ok(map_standings(raw))
    }

    /// Fetch the match schedule; same lenient degradation as standings.
    pub async fn fetch_matches(
        &self,
        slug: &str,
        season: Option<&str>,
        status: Option<&str>,
        limit: Option<u32>,
    ) -> ApiResult<Vec<MatchInfo>> {
        let mut params: Vec<String> = Vec::new();
        if let Some(season) = season {
            params.push(format!("season={season}"));
        }
        if let Some(status) = status {
            params.push(format!("status={status}"));
        }
        if let Some(limit) = limit {
            params.push(format!("limit={limit}"));
        }
        let mut url = format!("{}/api/leagues/{slug}/matches", self.base_url);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        let raw: MatchesResponse = self.get(&url).await?;
        Ok(raw.matches.iter().map(map_match).collect())
    }

    /// Round-trip a discount code. Codes are uppercased before sending.
    /// Failures of any kind (network included) come back as an invalid
    /// validation carrying the reason — the discount box is never fatal.
    pub async fn validate_discount(&self, slug: &str, code: &str) -> DiscountValidation {
        let url = format!("{}/api/leagues/{slug}/discount/validate", self.base_url);
        let body = serde_json::json!({ "code": code.trim().to_uppercase() });

        let response = match self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return invalid_discount(format!("connection failed: {e}")),
        };

        if !response.status().is_success() {
            let raw: DiscountResponse = response.json().await.unwrap_or_default();
            return invalid_discount(
                raw.error.unwrap_or_else(|| "invalid discount code".to_owned()),
            );
        }

        match response.json::<DiscountResponse>().await {
            Ok(raw) => map_discount(raw),
            Err(e) => invalid_discount(format!("unreadable response: {e}")),
        }
    }

    /// Submit a registration and classify the response by status code.
    pub async fn register(&self, request: &RegistrationRequest) -> ApiResult<RegisterOutcome> {
        let url = format!("{}/api/players/register", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        let status = response.status();
        if status.is_success() {
            let raw: RegisterResponse = response.json().await.unwrap_or_default();
            return Ok(RegisterOutcome::Success {
                whatsapp_group_link: raw
                    .player
                    .and_then(|p| p.league)
                    .and_then(|l| l.whatsapp_group)
                    .and_then(|g| g.invite_link),
            });
        }
        if status == StatusCode::CONFLICT {
            return Ok(RegisterOutcome::Conflict);
        }

        let raw: RegisterResponse = response.json().await.unwrap_or_default();
        if !raw.errors.is_empty() {
            return Ok(RegisterOutcome::Invalid(raw.errors));
        }
        Ok(RegisterOutcome::Failed(
            raw.message.unwrap_or_else(|| format!("registration failed ({status})")),
        ))
    }

    /// Credentials sign-in. The provider's internals are a black box; all
    /// the flow needs is ok/not-ok plus a bearer token for the profile call.
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<SignInOutcome> {
        let url = format!("{}/api/auth/signin", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        if !response.status().is_success() {
            return Ok(SignInOutcome { ok: false, token: None });
        }
        let raw: SignInResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url))?;
        Ok(SignInOutcome { ok: raw.ok, token: raw.token })
    }

    /// Account-only signup (the legacy home-page flow).
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<SignupOutcome> {
        let url = format!("{}/api/auth/signup", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        let status = response.status();
        let raw: SignupResponse = response.json().await.unwrap_or_default();
        if raw.code.as_deref() == Some("EMAIL_EXISTS") {
            return Ok(SignupOutcome::EmailExists);
        }
        if status.is_success() {
            return Ok(SignupOutcome::Created);
        }
        Ok(SignupOutcome::Failed(
            raw.message.unwrap_or_else(|| format!("signup failed ({status})")),
        ))
    }

    /// Fetch the signed-in player's profile.
    pub async fn fetch_profile(&self, token: &str) -> ApiResult<PlayerProfile> {
        let url = format!("{}/api/player/profile", self.base_url);
        let raw: ProfileResponse = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.clone()))?
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url.clone()))?;
        let player = raw
            .player
            .ok_or_else(|| ApiError::Other(format!("empty profile from {url}")))?;
        Ok(PlayerProfile {
            name: player.name,
            email: player.email,
            whatsapp: player.whatsapp,
        })
    }

    /// Admin: list the city records backing the landing pages.
    pub async fn list_cities(&self) -> ApiResult<Vec<CityRecord>> {
        let url = format!("{}/api/admin/cities", self.base_url);
        let raw: CitiesResponse = self.get(&url).await?;
        Ok(raw
            .cities
            .into_iter()
            .map(|c| CityRecord {
                id: c.id,
                slug: c.slug,
                display_name: if c.name.es.is_empty() { c.name.en } else { c.name.es },
                province: c.province,
                status: c.status,
                league_count: c.league_count,
            })
            .collect())
    }

    /// Admin: Google Places autocomplete passthrough for the city editor.
    pub async fn search_google_cities(&self, query: &str) -> ApiResult<Vec<CityCandidate>> {
        let url = format!(
            "{}/api/admin/cities/search-google?query={}",
            self.base_url,
            query.trim().replace(' ', "+")
        );
        let raw: CitySearchResponse = self.get(&url).await?;
        Ok(raw
            .results
            .into_iter()
            .map(|p| CityCandidate { place_id: p.place_id, description: p.description })
            .collect())
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                // Client errors on read-only panels are silently skipped:
                // an empty table beats a dead page.
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_league(raw: WireLeague) -> League {
    League {
        id: raw.id,
        slug: raw.slug,
        name: raw.name,
        description: Bilingual { es: raw.description.es, en: raw.description.en },
        city: raw.location.city,
        region: raw.location.region,
        status: parse_league_status(&raw.status),
        skill_level: parse_skill_level(&raw.skill_level),
        seasons: raw
            .seasons
            .into_iter()
            .map(|s| Season {
                name: s.name,
                status: s.status,
                start_date: parse_date(s.start_date.as_deref()),
                price: s.price.map(map_price),
            })
            .collect(),
        season: raw.season.map(|s| SeasonRef { kind: s.kind, year: s.year }),
        season_config: raw.season_config.map(|c| SeasonConfig {
            start_date: parse_date(c.start_date.as_deref()),
            price: c.price.map(map_price),
        }),
    }
}

fn map_price(raw: crate::wire::WirePrice) -> Price {
    Price { is_free: raw.is_free, amount: raw.amount, currency: raw.currency }
}

fn parse_league_status(s: &str) -> LeagueStatus {
    match s {
        "active" => LeagueStatus::Active,
        "registration_open" => LeagueStatus::RegistrationOpen,
        "completed" => LeagueStatus::Completed,
        _ => LeagueStatus::Upcoming,
    }
}

fn parse_skill_level(s: &str) -> SkillLevel {
    match s {
        "beginner" => SkillLevel::Beginner,
        "intermediate" => SkillLevel::Intermediate,
        "advanced" => SkillLevel::Advanced,
        _ => SkillLevel::All,
    }
}

fn map_standings(raw: StandingsResponse) -> StandingsTable {
    let rows = raw.unified_standings.iter().map(map_standing_row).collect();
    StandingsTable {
        rows,
        total_players: raw.total_players,
        current_round: raw.current_round,
        total_rounds: raw.total_rounds.max(raw.current_round),
    }
}

fn map_standing_row(raw: &WireStandingRow) -> StandingRow {
    StandingRow {
        position: raw.position,
        player_name: raw.player.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
        elo: raw.elo_rating,
        matches_played: raw.matches_played,
        matches_won: raw.matches_won,
        sets_won: raw.sets_won,
        points: raw.points,
    }
}

fn map_match(raw: &WireMatch) -> MatchInfo {
    MatchInfo {
        round: raw.round,
        status: parse_match_status(&raw.status),
        home: raw
            .players
            .as_ref()
            .and_then(|p| p.player1.as_ref())
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "TBD".to_owned()),
        away: raw
            .players
            .as_ref()
            .and_then(|p| p.player2.as_ref())
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "TBD".to_owned()),
        score: raw
            .result
            .as_ref()
            .map(|r| r.score.clone())
            .filter(|s| !s.is_empty()),
        scheduled_at: parse_date(
            raw.schedule.as_ref().and_then(|s| s.confirmed_date.as_deref()),
        ),
    }
}

fn parse_match_status(s: &str) -> MatchStatus {
    match s {
        "completed" => MatchStatus::Completed,
        "postponed" => MatchStatus::Postponed,
        _ => MatchStatus::Scheduled,
    }
}

fn parse_date(s: Option<&str>) -> Option<DateTime<Utc>> {
    s.and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn map_discount(raw: DiscountResponse) -> DiscountValidation {
    DiscountValidation {
        valid: raw.valid,
        original_price: raw.original_price,
        final_price: raw.final_price,
        discount_percentage: raw.discount_percentage,
        description: raw.description,
        error: raw.error,
    }
}

fn invalid_discount(error: String) -> DiscountValidation {
    DiscountValidation { valid: false, error: Some(error), ..DiscountValidation::default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{WireMatchPlayers, WireMatchResult};

    #[test]
    fn league_status_parsing_defaults_to_upcoming() {
        assert_eq!(parse_league_status("active"), LeagueStatus::Active);
        assert_eq!(parse_league_status("registration_open"), LeagueStatus::RegistrationOpen);
        assert_eq!(parse_league_status("completed"), LeagueStatus::Completed);
        assert_eq!(parse_league_status("draft"), LeagueStatus::Upcoming);
    }

    #[test]
    fn skill_level_parsing_defaults_to_all() {
        assert_eq!(parse_skill_level("beginner"), SkillLevel::Beginner);
        assert_eq!(parse_skill_level("advanced"), SkillLevel::Advanced);
        assert_eq!(parse_skill_level(""), SkillLevel::All);
    }

    #[test]
    fn match_with_no_players_maps_to_tbd_slots() {
        let raw = WireMatch { round: 2, status: "scheduled".into(), ..WireMatch::default() };
        let m = map_match(&raw);
        assert_eq!(m.home, "TBD");
        assert_eq!(m.away, "TBD");
        assert_eq!(m.status, MatchStatus::Scheduled);
        assert!(m.score.is_none());
    }

    #[test]
    fn match_empty_score_maps_to_none() {
        let raw = WireMatch {
            round: 1,
            status: "completed".into(),
            players: Some(WireMatchPlayers {
                player1: Some(crate::wire::WireNamed { name: "Ana".into() }),
                player2: Some(crate::wire::WireNamed { name: "Luz".into() }),
            }),
            result: Some(WireMatchResult { score: String::new() }),
            schedule: None,
        };
        let m = map_match(&raw);
        assert_eq!(m.home, "Ana");
        assert!(m.score.is_none());
        assert_eq!(m.status, MatchStatus::Completed);
    }

    #[test]
    fn standings_total_rounds_never_below_current_round() {
        let raw = StandingsResponse {
            unified_standings: vec![],
            total_players: 20,
            current_round: 5,
            total_rounds: 0,
        };
        let table = map_standings(raw);
        assert_eq!(table.total_rounds, 5);
    }

    #[test]
    fn registration_body_omits_unset_optional_fields() {
        let request = RegistrationRequest {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            whatsapp: "+34600000000".into(),
            level: "beginner".into(),
            password: None,
            language: "es".into(),
            league_id: "abc".into(),
            league_slug: "liga-sotogrande".into(),
            season: "verano2025".into(),
            discount_code: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("discountCode").is_none());
        assert!(body.get("password").is_none());
        assert_eq!(body["leagueSlug"], "liga-sotogrande");
        assert_eq!(body["language"], "es");
    }

    #[test]
    fn registration_body_carries_applied_discount() {
        let request = RegistrationRequest {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            whatsapp: "+34600000000".into(),
            level: "beginner".into(),
            password: Some("secret".into()),
            language: "en".into(),
            league_id: "abc".into(),
            league_slug: "liga-sotogrande".into(),
            season: "verano2025".into(),
            discount_code: Some("VERANO20".into()),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["discountCode"], "VERANO20");
        assert_eq!(body["password"], "secret");
    }

    // -----------------------------------------------------------------------
    // HTTP-level tests against a mock backend
    // -----------------------------------------------------------------------

    fn request_fixture() -> RegistrationRequest {
        RegistrationRequest {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            whatsapp: "+34600000000".into(),
            level: "beginner".into(),
            password: None,
            language: "es".into(),
            league_id: "abc".into(),
            league_slug: "liga-madrid".into(),
            season: "verano2025".into(),
            discount_code: None,
        }
    }

    #[tokio::test]
    async fn fetch_league_maps_document() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/leagues/liga-madrid")
            .with_status(200)
            .with_body(
                r#"{"league":{"_id":"abc","slug":"liga-madrid","name":"Liga de Madrid",
                    "location":{"city":"Madrid","region":"Madrid"},
                    "status":"registration_open","skillLevel":"all",
                    "seasons":[{"name":"verano2025","status":"registration_open"}],
                    "season":{"type":"summer","year":2025}}}"#,
            )
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let league = api.fetch_league("liga-madrid").await.unwrap();
        assert_eq!(league.name, "Liga de Madrid");
        assert_eq!(league.status, LeagueStatus::RegistrationOpen);
        assert!(league.requires_level_choice());
        assert_eq!(league.resolved_season_name(), "verano2025");
    }

    #[tokio::test]
    async fn fetch_league_404_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/leagues/nope")
            .with_status(404)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let err = api.fetch_league("nope").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn standings_client_error_degrades_to_empty_table() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/leagues/liga-madrid/standings")
            .with_status(404)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let table = api.fetch_standings("liga-madrid", None).await.unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.total_players, 0);
    }

    #[tokio::test]
    async fn discount_codes_are_uppercased_and_mapped() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/leagues/liga-madrid/discount/validate")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({"code": "VERANO20"}),
            ))
            .with_status(200)
            .with_body(r#"{"valid":true,"originalPrice":25.0,"finalPrice":20.0,"discountPercentage":20.0}"#)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let validation = api.validate_discount("liga-madrid", "verano20").await;
        assert!(validation.valid);
        assert_eq!(validation.final_price, Some(20.0));
        assert!(validation.final_price <= validation.original_price);
    }

    #[tokio::test]
    async fn discount_rejection_is_a_value_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/leagues/liga-madrid/discount/validate")
            .with_status(400)
            .with_body(r#"{"valid":false,"error":"expired code"}"#)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let validation = api.validate_discount("liga-madrid", "old").await;
        assert!(!validation.valid);
        assert_eq!(validation.error.as_deref(), Some("expired code"));
    }

    #[tokio::test]
    async fn register_success_carries_invite_link() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/players/register")
            .with_status(200)
            .with_body(
                r#"{"success":true,"player":{"league":{"whatsappGroup":{"inviteLink":"https://wa.me/g123"}}}}"#,
            )
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let outcome = api.register(&request_fixture()).await.unwrap();
        assert_eq!(
            outcome,
            RegisterOutcome::Success { whatsapp_group_link: Some("https://wa.me/g123".into()) }
        );
    }

    #[tokio::test]
    async fn register_conflict_stays_unclassified() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/players/register")
            .with_status(409)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let outcome = api.register(&request_fixture()).await.unwrap();
        assert_eq!(outcome, RegisterOutcome::Conflict);
    }

    #[tokio::test]
    async fn register_error_list_surfaces_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/players/register")
            .with_status(422)
            .with_body(r#"{"errors":["whatsapp number looks wrong","level is required"]}"#)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let outcome = api.register(&request_fixture()).await.unwrap();
        assert_eq!(
            outcome,
            RegisterOutcome::Invalid(vec![
                "whatsapp number looks wrong".into(),
                "level is required".into(),
            ])
        );
    }

    #[tokio::test]
    async fn signup_email_exists_code_is_detected() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/auth/signup")
            .with_status(409)
            .with_body(r#"{"code":"EMAIL_EXISTS"}"#)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let request = SignupRequest {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            whatsapp: "+34600000000".into(),
            password: "secret".into(),
            language: "es".into(),
            source: "terminal".into(),
        };
        let outcome = api.signup(&request).await.unwrap();
        assert_eq!(outcome, SignupOutcome::EmailExists);
    }

    #[tokio::test]
    async fn failed_sign_in_is_ok_false() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/auth/signin")
            .with_status(401)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let outcome = api.sign_in("ana@x.com", "wrong").await.unwrap();
        assert!(!outcome.ok);
        assert!(outcome.token.is_none());
    }
}
