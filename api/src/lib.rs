pub mod client;
pub mod places;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the backend wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct League {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: Bilingual,
    pub city: String,
    pub region: String,
    pub status: LeagueStatus,
    pub skill_level: SkillLevel,
    pub seasons: Vec<Season>,
    /// Loose season reference some league documents carry instead of (or in
    /// addition to) the `seasons` array. Shape owned by the backend.
    pub season: Option<SeasonRef>,
    pub season_config: Option<SeasonConfig>,
}

impl League {
    /// Season name used for display and for the registration body.
    ///
    /// Fallback chain, in order:
    /// 1) `seasons[0].name`
    /// 2) `"{kind}-{year}"` from the loose `season` reference
    /// 3) the literal `"summer-2025"`
    ///
    /// The chain mirrors what the backend's season-naming conventions
    /// actually produce; do not reorder it.
    pub fn resolved_season_name(&self) -> String {
        if let Some(first) = self.seasons.first()
            && !first.name.is_empty()
        {
            return first.name.clone();
        }
        if let Some(season) = &self.season {
            return format!("{}-{}", season.kind, season.year);
        }
        "summer-2025".to_owned()
    }

    /// Whether a registrant must pick their own level. Leagues pinned to a
    /// single skill level assign it; only `all` leagues ask.
    pub fn requires_level_choice(&self) -> bool {
        self.skill_level == SkillLevel::All
    }

    /// Start date shown on the post-registration screen, if the league
    /// advertises one.
    pub fn expected_start_date(&self) -> Option<DateTime<Utc>> {
        self.season_config
            .as_ref()
            .and_then(|c| c.start_date)
            .or_else(|| self.seasons.first().and_then(|s| s.start_date))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Bilingual {
    pub es: String,
    pub en: String,
}

impl Bilingual {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es => &self.es,
            Locale::En => &self.en,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeagueStatus {
    Active,
    RegistrationOpen,
    #[default]
    Upcoming,
    Completed,
}

impl LeagueStatus {
    pub fn label(self) -> &'static str {
        match self {
            LeagueStatus::Active => "Active",
            LeagueStatus::RegistrationOpen => "Registration open",
            LeagueStatus::Upcoming => "Upcoming",
            LeagueStatus::Completed => "Completed",
        }
    }

    pub fn accepts_registrations(self) -> bool {
        matches!(self, LeagueStatus::RegistrationOpen | LeagueStatus::Upcoming)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    #[default]
    All,
}

impl SkillLevel {
    /// The levels a registrant may self-select. `All` is a league policy,
    /// never a player level.
    pub const SELECTABLE: [SkillLevel; 3] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::All => "all",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Season {
    pub name: String,
    pub status: String,
    pub start_date: Option<DateTime<Utc>>,
    pub price: Option<Price>,
}

/// `{type, year}` pair, e.g. `summer` / `2025`.
#[derive(Debug, Clone, Default)]
pub struct SeasonRef {
    pub kind: String,
    pub year: u16,
}

#[derive(Debug, Clone, Default)]
pub struct SeasonConfig {
    pub start_date: Option<DateTime<Utc>>,
    pub price: Option<Price>,
}

#[derive(Debug, Clone, Default)]
pub struct Price {
    pub is_free: bool,
    pub amount: f64,
    pub currency: String,
}

impl Price {
    pub fn display(&self) -> String {
        if self.is_free {
            "Free".to_owned()
        } else {
            format!("{:.2} {}", self.amount, self.currency)
        }
    }
}

/// Result of the server-side discount-code check. `valid == false` carries a
/// reason in `error`; prices are server-computed and only present when valid.
/// Invariant: `final_price <= original_price` whenever valid.
#[derive(Debug, Clone, Default)]
pub struct DiscountValidation {
    pub valid: bool,
    pub original_price: Option<f64>,
    pub final_price: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub description: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerProfile {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
}

/// Everything the post-registration screen needs. Derived, never persisted.
#[derive(Debug, Clone, Default)]
pub struct RegistrationResult {
    pub player_name: String,
    pub league_name: String,
    pub league_status: LeagueStatus,
    pub expected_start_date: Option<DateTime<Utc>>,
    pub whatsapp_group_link: Option<String>,
    pub share_url: String,
}

// ---------------------------------------------------------------------------
// Standings & schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct StandingsTable {
    pub rows: Vec<StandingRow>,
    pub total_players: u32,
    pub current_round: u8,
    pub total_rounds: u8,
}

#[derive(Debug, Clone, Default)]
pub struct StandingRow {
    pub position: u32,
    pub player_name: String,
    pub elo: f64,
    pub matches_played: u32,
    pub matches_won: u32,
    pub sets_won: u32,
    pub points: u32,
}

impl StandingRow {
    /// Win rate as a rounded whole percentage; a player with no matches
    /// played sits at 0%, not NaN.
    pub fn win_percent(&self) -> u8 {
        if self.matches_played == 0 {
            return 0;
        }
        ((self.matches_won as f64 / self.matches_played as f64) * 100.0).round() as u8
    }

    pub fn zone(&self) -> PlayoffZone {
        playoff_zone(self.position)
    }
}

/// Qualification zone by table position. Positions outside the playoff cut
/// stay in the regular league table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayoffZone {
    PlayoffA,
    PlayoffB,
    #[default]
    League,
}

impl PlayoffZone {
    pub fn label(self) -> &'static str {
        match self {
            PlayoffZone::PlayoffA => "Playoff A",
            PlayoffZone::PlayoffB => "Playoff B",
            PlayoffZone::League => "League",
        }
    }
}

pub fn playoff_zone(position: u32) -> PlayoffZone {
    if position <= 8 {
        PlayoffZone::PlayoffA
    } else if position <= 16 {
        PlayoffZone::PlayoffB
    } else {
        PlayoffZone::League
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchInfo {
    pub round: u8,
    pub status: MatchStatus,
    pub home: String,
    pub away: String,
    pub score: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Completed,
    Postponed,
}

impl MatchStatus {
    pub fn label(self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "Scheduled",
            MatchStatus::Completed => "Completed",
            MatchStatus::Postponed => "Postponed",
        }
    }
}

/// Mark which rounds of `1..=total_rounds` actually have matches in the
/// schedule. Rounds with no matches render as unavailable, not hidden.
pub fn round_availability(total_rounds: u8, matches: &[MatchInfo]) -> Vec<(u8, bool)> {
    (1..=total_rounds)
        .map(|round| (round, matches.iter().any(|m| m.round == round)))
        .collect()
}

/// Season slugs the backend hands out mapped to their display names.
/// A finite table on purpose — unmapped slugs pass through unchanged
/// rather than being parsed.
const SEASON_DISPLAY_NAMES: [(&str, &str); 6] = [
    ("verano2025", "Summer 2025"),
    ("otono2025", "Autumn 2025"),
    ("invierno2025", "Winter 2025"),
    ("primavera2025", "Spring 2025"),
    ("invierno2026", "Winter 2026"),
    ("verano2026", "Summer 2026"),
];

pub fn season_display_name(slug: &str) -> String {
    SEASON_DISPLAY_NAMES
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, name)| (*name).to_owned())
        .unwrap_or_else(|| slug.to_owned())
}

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// UI language. Spanish is the platform default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Signup route segment on the public site. The Spanish route predates
    /// the English one and kept its legacy name.
    pub fn signup_route_prefix(self) -> &'static str {
        match self {
            Locale::Es => "registro",
            Locale::En => "signup",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::Es => Locale::En,
            Locale::En => Locale::Es,
        }
    }
}
