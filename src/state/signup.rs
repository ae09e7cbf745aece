use crate::state::copy;
use crate::state::form::{AccountPath, FieldName, FormErrors, RegistrationForm};
use chrono::{DateTime, Utc};
use liga_api::client::{LeagueApi, RegisterOutcome, RegistrationRequest};
use liga_api::{League, LeagueStatus, Locale, PlayerProfile, RegistrationResult, SkillLevel};
use log::error;

// ---------------------------------------------------------------------------
// Submit state machine
// ---------------------------------------------------------------------------

/// idle → submitting → {success | rejected}. `Submitting` covers exactly the
/// window between request start and settle; the submit key is ignored while
/// it is set. Every failure is terminal for the attempt — the player
/// resubmits explicitly, nothing retries on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Rejected,
    Success,
}

/// Form field under the cursor. `Discount` routes edits to the discount box,
/// which keeps its own state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusField {
    #[default]
    Name,
    Email,
    Whatsapp,
    Level,
    Password,
    Discount,
}

impl FocusField {
    fn order(path: AccountPath, level_choice: bool) -> Vec<FocusField> {
        let mut fields = Vec::new();
        if path == AccountPath::New {
            fields.push(FocusField::Name);
        }
        fields.push(FocusField::Email);
        if path == AccountPath::New {
            fields.push(FocusField::Whatsapp);
        }
        if level_choice {
            fields.push(FocusField::Level);
        }
        fields.push(FocusField::Password);
        fields.push(FocusField::Discount);
        fields
    }

    pub fn error_slot(self) -> Option<FieldName> {
        match self {
            FocusField::Name => Some(FieldName::Name),
            FocusField::Email => Some(FieldName::Email),
            FocusField::Whatsapp => Some(FieldName::Whatsapp),
            FocusField::Level => Some(FieldName::Level),
            FocusField::Password => Some(FieldName::Password),
            FocusField::Discount => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SignupState {
    pub form: RegistrationForm,
    pub errors: FormErrors,
    pub phase: SubmitPhase,
    pub result: Option<RegistrationResult>,
    pub focus: FocusField,
    pub editing: bool,
}

impl SignupState {
    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn focus_next(&mut self, level_choice: bool) {
        let order = FocusField::order(self.form.path, level_choice);
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + 1) % order.len()];
    }

    pub fn focus_prev(&mut self, level_choice: bool) {
        let order = FocusField::order(self.form.path, level_choice);
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + order.len() - 1) % order.len()];
    }

    /// Switch between the new-account and existing-account tabs. The tabs
    /// are mutually exclusive and a switch starts a fresh attempt.
    pub fn toggle_path(&mut self) {
        self.form.path = match self.form.path {
            AccountPath::New => AccountPath::Existing,
            AccountPath::Existing => AccountPath::New,
        };
        self.errors.clear_all();
        self.phase = SubmitPhase::Idle;
        self.focus = match self.form.path {
            AccountPath::New => FocusField::Name,
            AccountPath::Existing => FocusField::Email,
        };
    }

    /// Append a character to the focused field. Re-entering a field clears
    /// only that field's error.
    pub fn edit_char(&mut self, c: char) {
        match self.focus {
            FocusField::Name => self.form.name.push(c),
            FocusField::Email => self.form.email.push(c),
            FocusField::Whatsapp => self.form.whatsapp.push(c),
            FocusField::Password => self.form.password.push(c),
            FocusField::Level | FocusField::Discount => return,
        }
        if let Some(slot) = self.focus.error_slot() {
            self.errors.clear(slot);
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FocusField::Name => self.form.name.pop(),
            FocusField::Email => self.form.email.pop(),
            FocusField::Whatsapp => self.form.whatsapp.pop(),
            FocusField::Password => self.form.password.pop(),
            FocusField::Level | FocusField::Discount => return,
        };
        if let Some(slot) = self.focus.error_slot() {
            self.errors.clear(slot);
        }
    }

    pub fn begin_submit(&mut self) {
        self.errors.clear_all();
        self.phase = SubmitPhase::Submitting;
    }

    pub fn settle(&mut self, settled: SubmitSettled) {
        match settled {
            SubmitSettled::Success(result) => {
                self.errors.clear_all();
                self.result = Some(result);
                self.phase = SubmitPhase::Success;
            }
            SubmitSettled::Rejected(errors) => {
                self.errors = errors;
                self.phase = SubmitPhase::Rejected;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Submit plan — everything the network worker needs for one attempt
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SubmitPlan {
    pub path: AccountPath,
    pub locale: Locale,
    pub league_id: String,
    pub league_slug: String,
    pub league_name: String,
    pub league_status: LeagueStatus,
    pub season: String,
    pub level: SkillLevel,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub password: String,
    /// Pre-gated: only ever `Some` for a code the server validated.
    pub discount_code: Option<String>,
    pub expected_start_date: Option<DateTime<Utc>>,
    pub share_url: String,
}

pub fn build_submit_plan(
    form: &RegistrationForm,
    league: &League,
    locale: Locale,
    discount_code: Option<String>,
    site_base: &str,
) -> SubmitPlan {
    let level = if league.requires_level_choice() {
        form.level.unwrap_or(SkillLevel::Beginner)
    } else {
        league.skill_level
    };
    SubmitPlan {
        path: form.path,
        locale,
        league_id: league.id.clone(),
        league_slug: league.slug.clone(),
        league_name: league.name.clone(),
        league_status: league.status,
        season: season_for_submission(league, form.path),
        level,
        name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        whatsapp: form.whatsapp.trim().to_owned(),
        password: form.password.clone(),
        discount_code,
        expected_start_date: league.expected_start_date(),
        share_url: share_url(site_base, locale, &league.slug),
    }
}

/// Season string for the registration body. The two paths historically
/// disagree on the ordering — the sign-in path sends year-first — and the
/// backend expects exactly that, so both spellings stay.
pub fn season_for_submission(league: &League, path: AccountPath) -> String {
    match path {
        AccountPath::New => league.resolved_season_name(),
        AccountPath::Existing => league
            .season
            .as_ref()
            .map(|s| format!("{}-{}", s.year, s.kind))
            .unwrap_or_else(|| league.resolved_season_name()),
    }
}

impl SubmitPlan {
    /// Registration body, with profile-sourced identity on the sign-in path.
    pub fn request_with(&self, profile: Option<&PlayerProfile>) -> RegistrationRequest {
        let (name, email, whatsapp) = match profile {
            Some(p) => (p.name.clone(), p.email.clone(), p.whatsapp.clone()),
            None => (self.name.clone(), self.email.clone(), self.whatsapp.clone()),
        };
        RegistrationRequest {
            name,
            email,
            whatsapp,
            level: self.level.as_str().to_owned(),
            password: match self.path {
                AccountPath::New => Some(self.password.clone()),
                AccountPath::Existing => None,
            },
            language: self.locale.code().to_owned(),
            league_id: self.league_id.clone(),
            league_slug: self.league_slug.clone(),
            season: self.season.clone(),
            discount_code: self.discount_code.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestration — runs inside the network worker
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum SubmitSettled {
    Success(RegistrationResult),
    Rejected(FormErrors),
}

/// Run one registration attempt end to end: optional sign-in, profile fetch,
/// then the register call. Each step is terminal on failure — no retries.
pub async fn submit_registration(api: &LeagueApi, plan: &SubmitPlan) -> SubmitSettled {
    let locale = plan.locale;
    let mut profile: Option<PlayerProfile> = None;

    if plan.path == AccountPath::Existing {
        let session = match api.sign_in(&plan.email, &plan.password).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("sign-in request failed: {e}");
                return rejected(FieldName::Submit, copy::connection_error(locale));
            }
        };
        if !session.ok {
            return rejected(FieldName::Submit, copy::incorrect_credentials(locale));
        }
        match api.fetch_profile(session.token.as_deref().unwrap_or_default()).await {
            Ok(p) => profile = Some(p),
            Err(e) => {
                error!("profile fetch failed: {e}");
                return rejected(FieldName::Submit, copy::profile_fetch_failed(locale));
            }
        }
    }

    let request = plan.request_with(profile.as_ref());
    match api.register(&request).await {
        Ok(outcome) => route_outcome(outcome, plan, profile.as_ref()),
        Err(e) => {
            error!("registration request failed: {e}");
            rejected(FieldName::Submit, copy::connection_error(locale))
        }
    }
}

fn rejected(field: FieldName, message: &str) -> SubmitSettled {
    let mut errors = FormErrors::default();
    errors.set(field, message);
    SubmitSettled::Rejected(errors)
}

/// Map a register outcome into success state or error slots.
///
/// A 409 means two different things: on the plain signup path the email is
/// already taken (a field error); after a sign-in it means the player is
/// already in this league, which is information, not failure.
pub fn route_outcome(
    outcome: RegisterOutcome,
    plan: &SubmitPlan,
    profile: Option<&PlayerProfile>,
) -> SubmitSettled {
    let locale = plan.locale;
    match outcome {
        RegisterOutcome::Success { whatsapp_group_link } => {
            let player_name = profile.map(|p| p.name.clone()).unwrap_or_else(|| plan.name.clone());
            SubmitSettled::Success(RegistrationResult {
                player_name,
                league_name: plan.league_name.clone(),
                league_status: plan.league_status,
                expected_start_date: plan.expected_start_date,
                whatsapp_group_link,
                share_url: plan.share_url.clone(),
            })
        }
        RegisterOutcome::Conflict => match plan.path {
            AccountPath::New => rejected(FieldName::Email, copy::email_already_registered(locale)),
            AccountPath::Existing => rejected(FieldName::Info, copy::already_in_league(locale)),
        },
        RegisterOutcome::Invalid(messages) => {
            let mut errors = FormErrors::default();
            for message in messages {
                errors.set(route_server_error(&message), message.clone());
            }
            SubmitSettled::Rejected(errors)
        }
        RegisterOutcome::Failed(message) => {
            error!("registration rejected: {message}");
            rejected(FieldName::Submit, copy::something_went_wrong(locale))
        }
    }
}

/// Server error strings carry no field tag; route them by substring and let
/// anything unrecognized land under the submit button.
fn route_server_error(message: &str) -> FieldName {
    let lower = message.to_lowercase();
    if lower.contains("email") {
        FieldName::Email
    } else if lower.contains("whatsapp") {
        FieldName::Whatsapp
    } else if lower.contains("name") {
        FieldName::Name
    } else if lower.contains("level") {
        FieldName::Level
    } else {
        FieldName::Submit
    }
}

// ---------------------------------------------------------------------------
// Account-only signup — the legacy home-page flow, no league involved
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AccountSignupPlan {
    pub locale: Locale,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub password: String,
}

#[derive(Debug)]
pub enum AccountSignupSettled {
    Created,
    Rejected(FormErrors),
}

pub async fn submit_account_signup(
    api: &LeagueApi,
    plan: &AccountSignupPlan,
) -> AccountSignupSettled {
    let request = liga_api::client::SignupRequest {
        name: plan.name.clone(),
        email: plan.email.clone(),
        whatsapp: plan.whatsapp.clone(),
        password: plan.password.clone(),
        language: plan.locale.code().to_owned(),
        source: "terminal".to_owned(),
    };
    match api.signup(&request).await {
        Ok(liga_api::client::SignupOutcome::Created) => AccountSignupSettled::Created,
        Ok(liga_api::client::SignupOutcome::EmailExists) => {
            let mut errors = FormErrors::default();
            errors.set(FieldName::Email, copy::email_already_registered(plan.locale));
            AccountSignupSettled::Rejected(errors)
        }
        Ok(liga_api::client::SignupOutcome::Failed(message)) => {
            error!("account signup rejected: {message}");
            let mut errors = FormErrors::default();
            errors.set(FieldName::Submit, copy::something_went_wrong(plan.locale));
            AccountSignupSettled::Rejected(errors)
        }
        Err(e) => {
            error!("account signup request failed: {e}");
            let mut errors = FormErrors::default();
            errors.set(FieldName::Submit, copy::connection_error(plan.locale));
            AccountSignupSettled::Rejected(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// Success presenter
// ---------------------------------------------------------------------------

/// Shareable signup URL for the league page that produced the registration.
/// The route prefix is locale-bound: `registro` on the Spanish site,
/// `signup` on the English one.
pub fn share_url(site_base: &str, locale: Locale, slug: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        site_base.trim_end_matches('/'),
        locale.code(),
        locale.signup_route_prefix(),
        slug
    )
}

/// `wa.me` share deep link with the templated invite message.
pub fn whatsapp_share_link(locale: Locale, share_url: &str) -> String {
    let text = format!("{} {}", copy::share_message(locale), share_url);
    format!("https://wa.me/?text={}", percent_encode(&text))
}

fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use liga_api::{Season, SeasonRef};

    fn league_fixture() -> League {
        League {
            id: "abc".into(),
            slug: "liga-madrid".into(),
            name: "Liga de Madrid".into(),
            status: LeagueStatus::RegistrationOpen,
            skill_level: SkillLevel::Beginner,
            seasons: vec![Season { name: "verano2025".into(), ..Season::default() }],
            season: Some(SeasonRef { kind: "summer".into(), year: 2025 }),
            ..League::default()
        }
    }

    fn form_fixture() -> RegistrationForm {
        RegistrationForm {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            whatsapp: "+34600000000".into(),
            level: Some(SkillLevel::Beginner),
            password: "secret".into(),
            path: AccountPath::New,
        }
    }

    fn plan_fixture(path: AccountPath) -> SubmitPlan {
        let mut form = form_fixture();
        form.path = path;
        build_submit_plan(&form, &league_fixture(), Locale::En, None, "https://ligadetenis.es")
    }

    #[test]
    fn season_strings_keep_their_per_path_ordering() {
        let league = league_fixture();
        assert_eq!(season_for_submission(&league, AccountPath::New), "verano2025");
        assert_eq!(season_for_submission(&league, AccountPath::Existing), "2025-summer");

        let bare = League::default();
        assert_eq!(season_for_submission(&bare, AccountPath::New), "summer-2025");
        assert_eq!(season_for_submission(&bare, AccountPath::Existing), "summer-2025");
    }

    #[test]
    fn conflict_on_new_account_path_is_an_email_error() {
        let plan = plan_fixture(AccountPath::New);
        let settled = route_outcome(RegisterOutcome::Conflict, &plan, None);
        let SubmitSettled::Rejected(errors) = settled else {
            panic!("conflict must not succeed");
        };
        assert!(errors.get(FieldName::Email).is_some());
        assert!(errors.get(FieldName::Info).is_none());
        assert!(errors.get(FieldName::Submit).is_none());
    }

    #[test]
    fn conflict_on_sign_in_path_is_informational() {
        let plan = plan_fixture(AccountPath::Existing);
        let settled = route_outcome(RegisterOutcome::Conflict, &plan, None);
        let SubmitSettled::Rejected(errors) = settled else {
            panic!("conflict still settles as rejected");
        };
        assert!(errors.get(FieldName::Info).is_some());
        assert!(errors.get(FieldName::Email).is_none());
        assert!(errors.get(FieldName::Submit).is_none());
        assert!(!errors.blocks_success());
    }

    #[test]
    fn server_error_strings_route_by_substring() {
        assert_eq!(route_server_error("That email is taken"), FieldName::Email);
        assert_eq!(route_server_error("invalid WhatsApp number"), FieldName::Whatsapp);
        assert_eq!(route_server_error("name too short"), FieldName::Name);
        assert_eq!(route_server_error("unknown level"), FieldName::Level);
        assert_eq!(route_server_error("quota exceeded"), FieldName::Submit);
    }

    #[test]
    fn new_account_request_carries_password_and_form_identity() {
        let plan = plan_fixture(AccountPath::New);
        let request = plan.request_with(None);
        assert_eq!(request.name, "Ana");
        assert_eq!(request.password.as_deref(), Some("secret"));
        assert_eq!(request.season, "verano2025");
        assert_eq!(request.level, "beginner");
    }

    #[test]
    fn sign_in_request_prefers_profile_identity_and_drops_password() {
        let plan = plan_fixture(AccountPath::Existing);
        let profile = PlayerProfile {
            name: "Ana María".into(),
            email: "anamaria@x.com".into(),
            whatsapp: "+34611111111".into(),
        };
        let request = plan.request_with(Some(&profile));
        assert_eq!(request.name, "Ana María");
        assert_eq!(request.email, "anamaria@x.com");
        assert!(request.password.is_none());
        assert_eq!(request.season, "2025-summer");
    }

    #[test]
    fn fixed_skill_league_overrides_the_form_level() {
        let mut form = form_fixture();
        form.level = Some(SkillLevel::Advanced);
        let plan =
            build_submit_plan(&form, &league_fixture(), Locale::Es, None, "https://ligadetenis.es");
        assert_eq!(plan.level, SkillLevel::Beginner);
    }

    #[test]
    fn share_url_matches_the_locale_route() {
        assert_eq!(
            share_url("https://ligadetenis.es/", Locale::Es, "liga-madrid"),
            "https://ligadetenis.es/es/registro/liga-madrid"
        );
        assert_eq!(
            share_url("https://ligadetenis.es", Locale::En, "liga-madrid"),
            "https://ligadetenis.es/en/signup/liga-madrid"
        );
    }

    #[test]
    fn whatsapp_share_link_is_percent_encoded() {
        let link = whatsapp_share_link(Locale::En, "https://x.es/en/signup/liga");
        assert!(link.starts_with("https://wa.me/?text="));
        assert!(!link[20..].contains(' '));
        assert!(link.contains("%20"));
        assert!(link.contains("https%3A%2F%2Fx.es"));
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut state = SignupState::default();
        state.errors.set(FieldName::Email, "bad");
        state.errors.set(FieldName::Whatsapp, "bad");
        state.focus = FocusField::Email;
        state.edit_char('a');
        assert!(state.errors.get(FieldName::Email).is_none());
        assert!(state.errors.get(FieldName::Whatsapp).is_some());
    }

    #[test]
    fn focus_order_skips_fields_the_path_does_not_own() {
        let order = FocusField::order(AccountPath::Existing, false);
        assert!(!order.contains(&FocusField::Name));
        assert!(!order.contains(&FocusField::Whatsapp));
        assert!(!order.contains(&FocusField::Level));
        assert_eq!(order.first(), Some(&FocusField::Email));
    }

    #[tokio::test]
    async fn account_signup_email_exists_routes_to_email_field() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/auth/signup")
            .with_status(409)
            .with_body(r#"{"code":"EMAIL_EXISTS"}"#)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let plan = AccountSignupPlan {
            locale: Locale::Es,
            name: "Ana".into(),
            email: "ana@x.com".into(),
            whatsapp: "+34600000000".into(),
            password: "secret".into(),
        };
        let AccountSignupSettled::Rejected(errors) = submit_account_signup(&api, &plan).await
        else {
            panic!("expected rejection");
        };
        assert_eq!(
            errors.get(FieldName::Email),
            Some(copy::email_already_registered(Locale::Es))
        );
    }

    // -----------------------------------------------------------------------
    // Full submission runs against a mock backend
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn new_account_submission_end_to_end() {
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
        let plan = plan_fixture(AccountPath::New);
        let settled = submit_registration(&api, &plan).await;
        let SubmitSettled::Success(result) = settled else {
            panic!("expected success");
        };
        assert_eq!(result.whatsapp_group_link.as_deref(), Some("https://wa.me/g123"));
        assert_eq!(result.player_name, "Ana");
        assert_eq!(result.share_url, "https://ligadetenis.es/en/signup/liga-madrid");
    }

    #[tokio::test]
    async fn sign_in_submission_routes_conflict_to_info() {
        let mut server = mockito::Server::new_async().await;
        let _signin = server
            .mock("POST", "/api/auth/signin")
            .with_status(200)
            .with_body(r#"{"ok":true,"token":"tok"}"#)
            .create_async()
            .await;
        let _profile = server
            .mock("GET", "/api/player/profile")
            .with_status(200)
            .with_body(r#"{"player":{"name":"Ana","email":"ana@x.com","whatsapp":"+34600000000"}}"#)
            .create_async()
            .await;
        let _register = server
            .mock("POST", "/api/players/register")
            .with_status(409)
            .create_async()
            .await;

        let api = LeagueApi::with_base_url(server.url());
        let plan = plan_fixture(AccountPath::Existing);
        let settled = submit_registration(&api, &plan).await;
        let SubmitSettled::Rejected(errors) = settled else {
            panic!("409 settles as rejected");
        };
        assert!(errors.get(FieldName::Info).is_some());
        assert!(errors.get(FieldName::Submit).is_none());
    }

    #[tokio::test]
    async fn bad_credentials_stop_before_registration() {
        let mut server = mockito::Server::new_async().await;
        let _signin = server
            .mock("POST", "/api/auth/signin")
            .with_status(401)
            .create_async()
            .await;
        // No register mock: the flow must never reach it.

        let api = LeagueApi::with_base_url(server.url());
        let plan = plan_fixture(AccountPath::Existing);
        let settled = submit_registration(&api, &plan).await;
        let SubmitSettled::Rejected(errors) = settled else {
            panic!("expected rejection");
        };
        assert_eq!(errors.get(FieldName::Submit), Some(copy::incorrect_credentials(Locale::En)));
    }
}
