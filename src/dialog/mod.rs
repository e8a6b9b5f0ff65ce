//! Modal dialogs: one controller per backend operation, plus the read-only
//! details and message dialogs.
//!
//! A dialog produces at most one request. The handler removes it from the
//! stack before the request is dispatched, so a second submit can never
//! reach the backend.

pub mod buy_pkg;
pub mod delete_pkg;
pub mod fee_agreement;
pub mod form;
pub mod json_input;
pub mod message;
pub mod pkg_details;
pub mod register_pkg;
pub mod self_issue_cash;
pub mod update_pkg;
pub mod validate;

pub use buy_pkg::BuyPkgDialog;
pub use delete_pkg::DeletePkgDialog;
pub use fee_agreement::FeeAgreementDialog;
pub use form::{Form, TextField};
pub use json_input::JsonInputDialog;
pub use message::{MessageDialog, ResponseMessage};
pub use pkg_details::PkgDetailsDialog;
pub use self_issue_cash::SelfIssueCashDialog;

use crate::api::{ApiRequest, Endpoint, RefreshTarget};
use crate::app::event::DialogId;
use std::fmt;

/// A state-changing backend operation a dialog can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SelfIssueCash,
    EstablishFeeAgreement,
    BuyPkg,
    RegisterPkg,
    UpdatePkg,
    DeletePkg,
}

impl Operation {
    pub fn title(self) -> &'static str {
        match self {
            Operation::SelfIssueCash => "Self-issue cash",
            Operation::EstablishFeeAgreement => "Establish fee agreement",
            Operation::BuyPkg => "Buy package",
            Operation::RegisterPkg => "Register package",
            Operation::UpdatePkg => "Update package",
            Operation::DeletePkg => "Delete package",
        }
    }

    pub fn endpoint(self) -> Endpoint {
        match self {
            Operation::SelfIssueCash => Endpoint::SelfIssueCash,
            Operation::EstablishFeeAgreement => Endpoint::EstablishFeeAgreement,
            Operation::BuyPkg => Endpoint::BuyPkg,
            Operation::RegisterPkg => Endpoint::RegisterPkg,
            Operation::UpdatePkg => Endpoint::UpdatePkg,
            Operation::DeletePkg => Endpoint::DeletePkg,
        }
    }

    /// View models that may change once the operation succeeds.
    pub fn affected(self) -> &'static [RefreshTarget] {
        match self {
            Operation::SelfIssueCash => &[RefreshTarget::Balances],
            Operation::EstablishFeeAgreement => &[RefreshTarget::FeeAgreement],
            Operation::BuyPkg => &[
                RefreshTarget::Marketplace,
                RefreshTarget::Licenses,
                RefreshTarget::Balances,
            ],
            Operation::RegisterPkg | Operation::UpdatePkg | Operation::DeletePkg => {
                &[RefreshTarget::PkgOffers, RefreshTarget::Marketplace]
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint().path())
    }
}

/// What a confirm key press on a dialog resolved to.
#[derive(Debug, PartialEq)]
pub enum Submission {
    /// Validation failed; the dialog stays open with its errors shown.
    Invalid,
    /// Close the dialog and issue exactly this request.
    Send(ApiRequest),
    /// Close the dialog and show a locally produced message instead.
    Show(ResponseMessage),
}

#[derive(Debug, Clone)]
pub enum DialogKind {
    SelfIssueCash(SelfIssueCashDialog),
    FeeAgreement(FeeAgreementDialog),
    BuyPkg(BuyPkgDialog),
    RegisterPkg(JsonInputDialog),
    UpdatePkg(JsonInputDialog),
    DeletePkg(DeletePkgDialog),
    PkgDetails(PkgDetailsDialog),
    Message(MessageDialog),
}

impl DialogKind {
    /// The operation this dialog submits, if it submits anything.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            DialogKind::SelfIssueCash(_) => Some(Operation::SelfIssueCash),
            DialogKind::FeeAgreement(_) => Some(Operation::EstablishFeeAgreement),
            DialogKind::BuyPkg(_) => Some(Operation::BuyPkg),
            DialogKind::RegisterPkg(_) => Some(Operation::RegisterPkg),
            DialogKind::UpdatePkg(_) => Some(Operation::UpdatePkg),
            DialogKind::DeletePkg(_) => Some(Operation::DeletePkg),
            DialogKind::PkgDetails(_) | DialogKind::Message(_) => None,
        }
    }

    pub fn title(&self) -> String {
        match self {
            DialogKind::PkgDetails(d) => format!("Package: {}", d.name),
            DialogKind::Message(m) => m.title.clone(),
            DialogKind::BuyPkg(d) => format!("Buy {}?", d.name),
            DialogKind::DeletePkg(d) => format!("Delete {}?", d.name),
            other => other
                .operation()
                .map(Operation::title)
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Resolve the dialog's input. Read-only dialogs have nothing to submit
    /// and resolve to `Invalid`.
    pub fn submit(&mut self) -> Result<Submission, serde_json::Error> {
        Ok(match self {
            DialogKind::SelfIssueCash(d) => d.submit(),
            DialogKind::FeeAgreement(d) => d.submit(),
            DialogKind::BuyPkg(d) => d.submit(),
            DialogKind::DeletePkg(d) => d.submit(),
            DialogKind::RegisterPkg(d) | DialogKind::UpdatePkg(d) => d.submit()?,
            DialogKind::PkgDetails(_) | DialogKind::Message(_) => Submission::Invalid,
        })
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match self {
            DialogKind::SelfIssueCash(d) => Some(&mut d.form),
            DialogKind::FeeAgreement(d) => Some(&mut d.form),
            _ => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut TextField> {
        match self {
            DialogKind::RegisterPkg(d) | DialogKind::UpdatePkg(d) => Some(&mut d.editor),
            _ => None,
        }
    }

    /// Scroll offset of a read-only viewer and the last offset the most
    /// recent draw could use.
    pub fn scroll_mut(&mut self) -> Option<(&mut u16, u16)> {
        match self {
            DialogKind::PkgDetails(d) => Some((&mut d.scroll, d.max_scroll.get())),
            DialogKind::Message(m) => Some((&mut m.scroll, m.max_scroll.get())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dialog {
    pub id: DialogId,
    pub kind: DialogKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_refreshes_listing_licenses_and_balances() {
        let affected = Operation::BuyPkg.affected();
        assert!(affected.contains(&RefreshTarget::Marketplace));
        assert!(affected.contains(&RefreshTarget::Licenses));
        assert!(affected.contains(&RefreshTarget::Balances));
        assert_eq!(Operation::SelfIssueCash.affected(), &[RefreshTarget::Balances]);
    }

    #[test]
    fn titles_and_operations() {
        let kind = DialogKind::FeeAgreement(FeeAgreementDialog::new());
        assert_eq!(kind.operation(), Some(Operation::EstablishFeeAgreement));
        assert_eq!(kind.title(), "Establish fee agreement");

        let msg = DialogKind::Message(MessageDialog::new(
            "Buy package",
            ResponseMessage::Local("x".into()),
        ));
        assert_eq!(msg.operation(), None);
        assert_eq!(msg.title(), "Buy package");
        assert_eq!(Operation::BuyPkg.to_string(), "marketplace/buy-pkg");
    }

    #[test]
    fn read_only_dialogs_do_not_submit() {
        let mut msg = DialogKind::Message(MessageDialog::new("t", ResponseMessage::Local("x".into())));
        assert_eq!(msg.submit().unwrap(), Submission::Invalid);
        assert!(msg.scroll_mut().is_some());
        assert!(msg.form_mut().is_none());
    }
}
