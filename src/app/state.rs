use crate::api::models::{CashBalances, FeeAgreement, Identity, PkgLicense, PkgOffer, Role};
use crate::api::{RefreshTarget, Refreshed};
use crate::app::event::DialogId;
use crate::config::{AppConfig, Page};
use crate::dialog::{Dialog, DialogKind, Operation};
use chrono::Local;
use std::collections::HashMap;

/// Cursor into one of the package lists.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ListSelection {
    pub selected: usize,
}

impl ListSelection {
    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub page: Page,

    pub identity: Option<Identity>,
    pub marketplace: Vec<PkgOffer>,
    pub licenses: Vec<PkgLicense>,
    pub balances: CashBalances,
    pub pkg_offers: Vec<PkgOffer>,
    pub fee_agreement: Option<FeeAgreement>,

    pub market_list: ListSelection,
    pub dev_list: ListSelection,

    /// Open dialogs, topmost last. Only the top one receives input.
    pub dialogs: Vec<Dialog>,
    pub next_dialog_id: DialogId,
    /// Requests dispatched by dialogs that have already closed.
    pub in_flight: HashMap<DialogId, Operation>,

    pub should_quit: bool,
    pub dirty: bool,
    pub clock: String,
    pub last_refreshed: HashMap<RefreshTarget, String>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let page = config.ui.start_page;
        let clock = Local::now().format(&config.ui.timestamp_format).to_string();
        Self {
            config,
            page,
            identity: None,
            marketplace: Vec::new(),
            licenses: Vec::new(),
            balances: CashBalances::new(),
            pkg_offers: Vec::new(),
            fee_agreement: None,
            market_list: ListSelection::default(),
            dev_list: ListSelection::default(),
            dialogs: Vec::new(),
            next_dialog_id: 0,
            in_flight: HashMap::new(),
            should_quit: false,
            dirty: true,
            clock,
            last_refreshed: HashMap::new(),
            status_message: None,
        }
    }

    pub fn role(&self) -> Role {
        self.identity.as_ref().map(Identity::role).unwrap_or_default()
    }

    pub fn allocate_dialog_id(&mut self) -> DialogId {
        let id = self.next_dialog_id;
        self.next_dialog_id += 1;
        id
    }

    pub fn open_dialog(&mut self, kind: DialogKind) -> DialogId {
        let id = self.allocate_dialog_id();
        self.dialogs.push(Dialog { id, kind });
        self.dirty = true;
        id
    }

    pub fn close_top(&mut self) -> Option<Dialog> {
        let closed = self.dialogs.pop();
        if closed.is_some() {
            self.dirty = true;
        }
        closed
    }

    pub fn top_dialog_mut(&mut self) -> Option<&mut Dialog> {
        self.dialogs.last_mut()
    }

    pub fn toggle_page(&mut self) {
        self.page = match self.page {
            Page::Marketplace => Page::Developer,
            Page::Developer => Page::Marketplace,
        };
        self.dirty = true;
    }

    /// Package list shown on the current page.
    pub fn visible_offers(&self) -> &[PkgOffer] {
        match self.page {
            Page::Marketplace => &self.marketplace,
            Page::Developer => &self.pkg_offers,
        }
    }

    pub fn selection_mut(&mut self) -> (&mut ListSelection, usize) {
        match self.page {
            Page::Marketplace => (&mut self.market_list, self.marketplace.len()),
            Page::Developer => (&mut self.dev_list, self.pkg_offers.len()),
        }
    }

    pub fn selected_offer(&self) -> Option<&PkgOffer> {
        let selected = match self.page {
            Page::Marketplace => self.market_list.selected,
            Page::Developer => self.dev_list.selected,
        };
        self.visible_offers().get(selected)
    }

    /// Replace exactly one view model.
    pub fn apply_refresh(&mut self, refreshed: Refreshed) -> RefreshTarget {
        let target = match refreshed {
            Refreshed::Identity(identity) => {
                self.identity = Some(identity);
                RefreshTarget::Identity
            }
            Refreshed::Marketplace(offers) => {
                self.marketplace = offers;
                self.market_list.clamp(self.marketplace.len());
                RefreshTarget::Marketplace
            }
            Refreshed::Licenses(licenses) => {
                self.licenses = licenses;
                RefreshTarget::Licenses
            }
            Refreshed::Balances(balances) => {
                self.balances = balances;
                RefreshTarget::Balances
            }
            Refreshed::PkgOffers(offers) => {
                self.pkg_offers = offers;
                self.dev_list.clamp(self.pkg_offers.len());
                RefreshTarget::PkgOffers
            }
            Refreshed::FeeAgreement(fee) => {
                self.fee_agreement = Some(fee);
                RefreshTarget::FeeAgreement
            }
        };
        self.last_refreshed.insert(target, self.clock.clone());
        self.dirty = true;
        target
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        let who = self
            .identity
            .as_ref()
            .map(|i| i.me.as_str())
            .filter(|me| !me.is_empty())
            .unwrap_or("(unknown identity)");
        let mut s = format!("{} | {}", who, self.config.api.base_url);
        if !self.in_flight.is_empty() {
            s.push_str(&format!(" | {} pending", self.in_flight.len()));
        }
        s
    }
}
