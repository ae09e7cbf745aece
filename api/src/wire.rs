/// Wire types for the league platform REST API.
/// Base: `{LIGA_API_BASE}/api` — see `client.rs` for the endpoints.
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct LeagueEnvelope {
    pub league: WireLeague,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireLeague {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: WireBilingual,
    #[serde(default)]
    pub location: WireLocation,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub skill_level: String,
    /// Missing on older league documents; the loose `season` object (or
    /// nothing at all) stands in for it then.
    #[serde(default)]
    pub seasons: Vec<WireSeason>,
    pub season: Option<WireSeasonRef>,
    pub season_config: Option<WireSeasonConfig>,
}

#[derive(Deserialize, Default, Debug)]
pub struct WireBilingual {
    #[serde(default)]
    pub es: String,
    #[serde(default)]
    pub en: String,
}

#[derive(Deserialize, Default, Debug)]
pub struct WireLocation {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireSeason {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    pub start_date: Option<String>,
    pub price: Option<WirePrice>,
}

#[derive(Deserialize, Default, Debug)]
pub struct WireSeasonRef {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub year: u16,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireSeasonConfig {
    pub start_date: Option<String>,
    pub price: Option<WirePrice>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WirePrice {
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
}

// ---------------------------------------------------------------------------
// Standings & matches
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StandingsResponse {
    #[serde(default)]
    pub unified_standings: Vec<WireStandingRow>,
    #[serde(default)]
    pub total_players: u32,
    #[serde(default)]
    pub current_round: u8,
    #[serde(default)]
    pub total_rounds: u8,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireStandingRow {
    #[serde(default)]
    pub position: u32,
    pub player: Option<WireNamed>,
    #[serde(default)]
    pub elo_rating: f64,
    #[serde(default)]
    pub matches_played: u32,
    #[serde(default)]
    pub matches_won: u32,
    #[serde(default)]
    pub sets_won: u32,
    #[serde(default)]
    pub points: u32,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct WireNamed {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, Default, Debug)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<WireMatch>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireMatch {
    #[serde(default)]
    pub round: u8,
    #[serde(default)]
    pub status: String,
    pub players: Option<WireMatchPlayers>,
    pub result: Option<WireMatchResult>,
    pub schedule: Option<WireMatchSchedule>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireMatchPlayers {
    pub player1: Option<WireNamed>,
    pub player2: Option<WireNamed>,
}

#[derive(Deserialize, Default, Debug)]
pub struct WireMatchResult {
    #[serde(default)]
    pub score: String,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireMatchSchedule {
    pub confirmed_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Discount validation
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResponse {
    #[serde(default)]
    pub valid: bool,
    pub original_price: Option<f64>,
    pub final_price: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub description: Option<String>,
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Registration, auth, profile
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    pub player: Option<WireRegisteredPlayer>,
    /// Field-level validation messages; routed by substring on the client.
    #[serde(default)]
    pub errors: Vec<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
pub struct WireRegisteredPlayer {
    pub league: Option<WireRegisteredLeague>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireRegisteredLeague {
    pub whatsapp_group: Option<WireWhatsappGroup>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WireWhatsappGroup {
    pub invite_link: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
pub struct SignInResponse {
    #[serde(default)]
    pub ok: bool,
    pub token: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
pub struct SignupResponse {
    pub code: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
pub struct ProfileResponse {
    pub player: Option<WireProfile>,
}

#[derive(Deserialize, Default, Debug)]
pub struct WireProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub whatsapp: String,
}
