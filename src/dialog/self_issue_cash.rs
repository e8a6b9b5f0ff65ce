use crate::api::{ApiRequest, Endpoint};
use crate::dialog::form::{Form, TextField};
use crate::dialog::validate::{FieldRule, Rule};
use crate::dialog::Submission;

pub const RULES: &[FieldRule] = &[
    FieldRule {
        field: "amount",
        rule: Rule::POSITIVE_INTEGER,
    },
    FieldRule {
        field: "currency",
        rule: Rule::ExactLength(3),
    },
];

/// Credit the current identity with an amount of one currency.
#[derive(Debug, Clone)]
pub struct SelfIssueCashDialog {
    pub form: Form,
}

impl SelfIssueCashDialog {
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                TextField::new("amount", "Amount"),
                TextField::new("currency", "Currency"),
            ]),
        }
    }

    pub fn submit(&mut self) -> Submission {
        if !self.form.validate(RULES) {
            return Submission::Invalid;
        }
        let Some(amount) = self.form.integer("amount") else {
            return Submission::Invalid;
        };
        let request = ApiRequest::new(Endpoint::SelfIssueCash)
            .query("amount", amount)
            .query("currency", self.form.value("currency"));
        Submission::Send(request)
    }
}

impl Default for SelfIssueCashDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(amount: &str, currency: &str) -> SelfIssueCashDialog {
        let mut d = SelfIssueCashDialog::new();
        d.form.field_mut("amount").unwrap().set_text(amount);
        d.form.field_mut("currency").unwrap().set_text(currency);
        d
    }

    #[test]
    fn negative_amount_and_short_currency_are_rejected() {
        let mut d = filled("-5", "US");
        assert_eq!(d.submit(), Submission::Invalid);
        assert!(d.form.form_error);
        assert_eq!(d.form.errors.len(), 2);
    }

    #[test]
    fn valid_input_builds_query() {
        let mut d = filled("10", "USD");
        match d.submit() {
            Submission::Send(req) => {
                assert_eq!(req.describe(), "POST self-issue-cash?amount=10&currency=USD");
                assert!(req.body.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!d.form.form_error);
    }

    #[test]
    fn error_flag_clears_after_correction() {
        let mut d = filled("0", "USD");
        assert_eq!(d.submit(), Submission::Invalid);
        assert!(d.form.form_error);
        d.form.field_mut("amount").unwrap().set_text("3");
        assert!(matches!(d.submit(), Submission::Send(_)));
        assert!(!d.form.form_error);
        assert!(d.form.errors.is_empty());
    }
}
