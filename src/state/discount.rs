use liga_api::DiscountValidation;
use std::collections::HashMap;

/// Discount box state. `validation == None` means "not yet validated" —
/// editing the code drops any previous verdict, and nothing re-validates
/// until the player explicitly applies again.
#[derive(Debug, Default)]
pub struct DiscountState {
    pub code_input: String,
    pub validating: bool,
    pub validation: Option<DiscountValidation>,
    /// Codes that validated during this session, per league slug, so
    /// returning to a league re-applies the code automatically.
    session_codes: HashMap<String, String>,
}

impl DiscountState {
    pub fn edit_char(&mut self, c: char) {
        self.code_input.push(c);
        self.validation = None;
    }

    pub fn backspace(&mut self) {
        self.code_input.pop();
        self.validation = None;
    }

    /// Start a validation round-trip. Returns the code to send, or `None`
    /// when the box is empty or a check is already in flight.
    pub fn begin_validation(&mut self) -> Option<String> {
        let code = self.code_input.trim();
        if code.is_empty() || self.validating {
            return None;
        }
        self.validating = true;
        Some(code.to_uppercase())
    }

    pub fn settle(&mut self, slug: &str, code: &str, validation: DiscountValidation) {
        self.validating = false;
        if validation.valid {
            self.session_codes.insert(slug.to_owned(), code.to_owned());
        }
        self.validation = Some(validation);
    }

    /// The code to attach to a registration body. Only a server-validated
    /// code ever leaves this as `Some` — an unapplied or rejected code is
    /// never sent.
    pub fn applied_code(&self) -> Option<String> {
        let validation = self.validation.as_ref()?;
        if !validation.valid {
            return None;
        }
        let code = self.code_input.trim();
        if code.is_empty() {
            return None;
        }
        Some(code.to_uppercase())
    }

    /// Code to auto-apply when a league loads: a code already validated for
    /// this league wins over one supplied at startup. The returned code
    /// still goes through the normal validation round-trip.
    pub fn code_for_auto_apply(&self, slug: &str, startup_code: Option<&str>) -> Option<String> {
        self.session_codes
            .get(slug)
            .cloned()
            .or_else(|| startup_code.map(|c| c.trim().to_uppercase()).filter(|c| !c.is_empty()))
    }

    /// Reset for a newly loaded league, keeping the session code memory.
    pub fn reset_for_league(&mut self) {
        self.code_input.clear();
        self.validating = false;
        self.validation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_validation() -> DiscountValidation {
        DiscountValidation {
            valid: true,
            original_price: Some(25.0),
            final_price: Some(20.0),
            discount_percentage: Some(20.0),
            ..DiscountValidation::default()
        }
    }

    #[test]
    fn invalid_validation_never_yields_an_applied_code() {
        let mut state = DiscountState::default();
        state.code_input = "OLD".into();
        state.settle(
            "liga-madrid",
            "OLD",
            DiscountValidation { valid: false, error: Some("expired".into()), ..Default::default() },
        );
        assert!(state.applied_code().is_none());
    }

    #[test]
    fn unvalidated_code_is_not_applied() {
        let mut state = DiscountState::default();
        state.code_input = "VERANO20".into();
        assert!(state.applied_code().is_none());
    }

    #[test]
    fn validated_code_is_applied_uppercase() {
        let mut state = DiscountState::default();
        state.code_input = "verano20".into();
        state.validating = true;
        state.settle("liga-madrid", "VERANO20", valid_validation());
        assert_eq!(state.applied_code().as_deref(), Some("VERANO20"));
    }

    #[test]
    fn editing_resets_the_verdict_until_reapplied() {
        let mut state = DiscountState::default();
        state.code_input = "VERANO2".into();
        state.settle("liga-madrid", "VERANO2", valid_validation());
        state.edit_char('0');
        assert!(state.validation.is_none());
        assert!(state.applied_code().is_none());
        // Only an explicit apply restarts validation.
        assert_eq!(state.begin_validation().as_deref(), Some("VERANO20"));
    }

    #[test]
    fn session_code_wins_over_startup_code() {
        let mut state = DiscountState::default();
        state.settle("liga-madrid", "SOCIO10", valid_validation());
        assert_eq!(
            state.code_for_auto_apply("liga-madrid", Some("otro5")).as_deref(),
            Some("SOCIO10")
        );
        assert_eq!(
            state.code_for_auto_apply("liga-sevilla", Some("otro5")).as_deref(),
            Some("OTRO5")
        );
        assert!(state.code_for_auto_apply("liga-sevilla", None).is_none());
    }

    #[test]
    fn begin_validation_ignores_empty_and_in_flight() {
        let mut state = DiscountState::default();
        assert!(state.begin_validation().is_none());
        state.code_input = "x".into();
        assert_eq!(state.begin_validation().as_deref(), Some("X"));
        // Second call while in flight is a no-op.
        assert!(state.begin_validation().is_none());
    }
}
