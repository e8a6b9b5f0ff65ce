//! Declarative per-form validation.
//!
//! Each form declares one `&[FieldRule]`; the whole set is evaluated before
//! a submission is allowed.

use crate::dialog::form::Form;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// A whole number within `min..=max`.
    IntegerInRange { min: i64, max: i64 },
    /// Exactly this many characters.
    ExactLength(usize),
}

impl Rule {
    pub const POSITIVE_INTEGER: Rule = Rule::IntegerInRange { min: 1, max: i64::MAX };

    /// Check a trimmed raw value. The error text is completed with the field label.
    pub fn check(&self, raw: &str) -> Result<(), String> {
        match *self {
            Rule::IntegerInRange { min, max } => {
                let n: i64 = raw
                    .parse()
                    .map_err(|_| "must be a whole number".to_string())?;
                if n < min || n > max {
                    if max == i64::MAX {
                        return Err(format!("must be at least {}", min));
                    }
                    return Err(format!("must be between {} and {}", min, max));
                }
                Ok(())
            }
            Rule::ExactLength(len) => {
                let count = raw.chars().count();
                if count != len {
                    return Err(format!("must be exactly {} characters", len));
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
}

/// All violations of `rules` in `form`, in rule order.
pub fn validate(rules: &[FieldRule], form: &Form) -> Vec<String> {
    rules
        .iter()
        .filter_map(|r| {
            let label = form.field(r.field).map(|f| f.label).unwrap_or(r.field);
            r.rule
                .check(form.value(r.field))
                .err()
                .map(|msg| format!("{} {}", label, msg))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::form::TextField;

    const RULES: &[FieldRule] = &[
        FieldRule {
            field: "fee",
            rule: Rule::IntegerInRange { min: 0, max: 100 },
        },
        FieldRule {
            field: "code",
            rule: Rule::ExactLength(3),
        },
    ];

    fn form(fee: &str, code: &str) -> Form {
        let mut form = Form::new(vec![TextField::new("fee", "Fee"), TextField::new("code", "Code")]);
        form.field_mut("fee").unwrap().set_text(fee);
        form.field_mut("code").unwrap().set_text(code);
        form
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let rule = Rule::IntegerInRange { min: 0, max: 100 };
        assert!(rule.check("0").is_ok());
        assert!(rule.check("100").is_ok());
        assert_eq!(rule.check("101"), Err("must be between 0 and 100".into()));
        assert_eq!(rule.check("-1"), Err("must be between 0 and 100".into()));
    }

    #[test]
    fn non_numeric_and_fractional_values_fail() {
        let rule = Rule::POSITIVE_INTEGER;
        assert_eq!(rule.check("ten"), Err("must be a whole number".into()));
        assert_eq!(rule.check("1.5"), Err("must be a whole number".into()));
        assert_eq!(rule.check(""), Err("must be a whole number".into()));
        assert_eq!(rule.check("0"), Err("must be at least 1".into()));
        assert!(rule.check("1").is_ok());
    }

    #[test]
    fn exact_length_counts_chars() {
        let rule = Rule::ExactLength(3);
        assert!(rule.check("USD").is_ok());
        assert!(rule.check("US").is_err());
        assert!(rule.check("USDT").is_err());
        assert!(rule.check("€€€").is_ok());
    }

    #[test]
    fn all_violations_are_reported_with_labels() {
        let errors = validate(RULES, &form("150", "US"));
        assert_eq!(
            errors,
            vec![
                "Fee must be between 0 and 100".to_string(),
                "Code must be exactly 3 characters".to_string()
            ]
        );
        assert!(validate(RULES, &form(" 10 ", "EUR")).is_empty());
    }
}
