use crate::api::{ApiRequest, Endpoint};
use crate::dialog::form::{Form, TextField};
use crate::dialog::validate::{FieldRule, Rule};
use crate::dialog::Submission;

/// Commission is a percentage.
pub const RULES: &[FieldRule] = &[FieldRule {
    field: "maxAcceptableFee",
    rule: Rule::IntegerInRange { min: 0, max: 100 },
}];

/// Establish the maximum fee a developer accepts.
#[derive(Debug, Clone)]
pub struct FeeAgreementDialog {
    pub form: Form,
}

impl FeeAgreementDialog {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![TextField::new("maxAcceptableFee", "Max acceptable fee (%)")]),
        }
    }

    pub fn submit(&mut self) -> Submission {
        if !self.form.validate(RULES) {
            return Submission::Invalid;
        }
        let Some(fee) = self.form.integer("maxAcceptableFee") else {
            return Submission::Invalid;
        };
        Submission::Send(ApiRequest::new(Endpoint::EstablishFeeAgreement).query("maxAcceptableFee", fee))
    }
}

impl Default for FeeAgreementDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_fee(fee: &str) -> FeeAgreementDialog {
        let mut d = FeeAgreementDialog::new();
        d.form.field_mut("maxAcceptableFee").unwrap().set_text(fee);
        d
    }

    #[test]
    fn fee_above_hundred_is_rejected() {
        let mut d = with_fee("150");
        assert_eq!(d.submit(), Submission::Invalid);
        assert!(d.form.form_error);
    }

    #[test]
    fn non_numeric_fee_is_rejected() {
        let mut d = with_fee("ten");
        assert_eq!(d.submit(), Submission::Invalid);
    }

    #[test]
    fn valid_fee_builds_put() {
        let mut d = with_fee("15");
        match d.submit() {
            Submission::Send(req) => {
                assert_eq!(req.describe(), "PUT establish-fee-agreement?maxAcceptableFee=15")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
