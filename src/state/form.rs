use crate::state::copy;
use liga_api::{Locale, SkillLevel};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern"));

/// Loose international phone pattern, checked after internal whitespace is
/// stripped. Deliberately permissive: the backend is the authority.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,5}[-\s.]?[0-9]{1,5}$",
    )
    .expect("phone pattern")
});

/// Every slot an error message can occupy. `Submit` is the generic failure
/// line under the button; `Info` is the informational (non-failure) line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Name,
    Email,
    Whatsapp,
    Level,
    Password,
    Submit,
    Info,
}

/// Field → message map with a defined single-field clear, so wiping one
/// error never disturbs the others.
#[derive(Debug, Clone, Default)]
pub struct FormErrors(HashMap<FieldName, String>);

impl FormErrors {
    pub fn set(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FieldName) {
        self.0.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when something actually failed. An `Info` line alone is not a
    /// failure.
    pub fn blocks_success(&self) -> bool {
        self.0.keys().any(|f| *f != FieldName::Info)
    }
}

/// Which signup tab is active. Mutually exclusive, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccountPath {
    #[default]
    New,
    Existing,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub level: Option<SkillLevel>,
    pub password: String,
    pub path: AccountPath,
}

impl RegistrationForm {
    pub fn cycle_level(&mut self) {
        let levels = SkillLevel::SELECTABLE;
        self.level = match self.level {
            None => Some(levels[0]),
            Some(current) => {
                let idx = levels.iter().position(|l| *l == current).unwrap_or(0);
                Some(levels[(idx + 1) % levels.len()])
            }
        };
    }
}

/// Check the form against the signup rules. Pure and synchronous; submission
/// is aborted entirely when the returned map is non-empty.
///
/// On the existing-account path only email and password are the player's to
/// get wrong — name and whatsapp come from the profile after sign-in.
pub fn validate(
    form: &RegistrationForm,
    league_skill: SkillLevel,
    locale: Locale,
) -> FormErrors {
    let mut errors = FormErrors::default();

    if form.path == AccountPath::New && form.name.trim().is_empty() {
        errors.set(FieldName::Name, copy::required_name(locale));
    }

    if !EMAIL_RE.is_match(form.email.trim()) {
        errors.set(FieldName::Email, copy::invalid_email(locale));
    }

    if form.path == AccountPath::New {
        let stripped: String = form.whatsapp.chars().filter(|c| !c.is_whitespace()).collect();
        if stripped.is_empty() || !PHONE_RE.is_match(&stripped) {
            errors.set(FieldName::Whatsapp, copy::invalid_whatsapp(locale));
        }
    }

    if league_skill == SkillLevel::All && form.level.is_none() {
        errors.set(FieldName::Level, copy::required_level(locale));
    }

    if form.password.is_empty() {
        errors.set(FieldName::Password, copy::required_password(locale));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            whatsapp: "+34 600 000 000".into(),
            level: Some(SkillLevel::Beginner),
            password: "secret".into(),
            path: AccountPath::New,
        }
    }

    #[test]
    fn valid_form_produces_no_errors() {
        let errors = validate(&valid_form(), SkillLevel::All, Locale::Es);
        assert!(errors.is_empty());
    }

    #[test]
    fn validation_is_idempotent() {
        let mut form = valid_form();
        form.email = "broken".into();
        form.name = "  ".into();
        let first = validate(&form, SkillLevel::All, Locale::En);
        let second = validate(&form, SkillLevel::All, Locale::En);
        for field in [
            FieldName::Name,
            FieldName::Email,
            FieldName::Whatsapp,
            FieldName::Level,
            FieldName::Password,
            FieldName::Submit,
            FieldName::Info,
        ] {
            assert_eq!(first.get(field), second.get(field));
        }
    }

    #[test]
    fn email_pattern_accepts_and_rejects() {
        let mut form = valid_form();
        for (email, ok) in [("a@b.com", true), ("a@b", false), ("a.com", false), ("", false)] {
            form.email = email.into();
            let errors = validate(&form, SkillLevel::Beginner, Locale::En);
            assert_eq!(errors.get(FieldName::Email).is_none(), ok, "email: {email:?}");
        }
    }

    #[test]
    fn phone_pattern_tolerates_whitespace() {
        let mut form = valid_form();
        form.whatsapp = "+34 600 000 000".into();
        assert!(validate(&form, SkillLevel::Beginner, Locale::En)
            .get(FieldName::Whatsapp)
            .is_none());

        form.whatsapp = "abc".into();
        assert!(validate(&form, SkillLevel::Beginner, Locale::En)
            .get(FieldName::Whatsapp)
            .is_some());

        form.whatsapp = "".into();
        assert!(validate(&form, SkillLevel::Beginner, Locale::En)
            .get(FieldName::Whatsapp)
            .is_some());
    }

    #[test]
    fn level_required_only_when_league_is_open_to_all() {
        let mut form = valid_form();
        form.level = None;
        assert!(validate(&form, SkillLevel::All, Locale::En)
            .get(FieldName::Level)
            .is_some());
        assert!(validate(&form, SkillLevel::Intermediate, Locale::En)
            .get(FieldName::Level)
            .is_none());
    }

    #[test]
    fn existing_account_path_skips_profile_sourced_fields() {
        let mut form = valid_form();
        form.path = AccountPath::Existing;
        form.name.clear();
        form.whatsapp.clear();
        let errors = validate(&form, SkillLevel::Beginner, Locale::En);
        assert!(errors.is_empty());
    }

    #[test]
    fn clearing_one_error_leaves_the_rest() {
        let mut errors = FormErrors::default();
        errors.set(FieldName::Email, "bad email");
        errors.set(FieldName::Whatsapp, "bad number");
        errors.clear(FieldName::Email);
        assert!(errors.get(FieldName::Email).is_none());
        assert_eq!(errors.get(FieldName::Whatsapp), Some("bad number"));
    }

    #[test]
    fn info_line_does_not_count_as_failure() {
        let mut errors = FormErrors::default();
        errors.set(FieldName::Info, "already registered");
        assert!(!errors.blocks_success());
        errors.set(FieldName::Submit, "boom");
        assert!(errors.blocks_success());
    }
}
