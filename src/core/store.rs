//! Domain store - Owns the three slices and applies actions to them.
//!
//! The store is an explicitly constructed value. Whoever owns the UI tree owns the
//! store and hands out references; there is no process-wide singleton. Each
//! [`Action`] touches one slice and is applied in full before listeners run.

use std::sync::Arc;

use crate::{
    core::{category::CategoriesState, transaction::TransactionsState},
    models::{
        Category, CategoryPatch, Currency, Language, NewCategory, NewTransaction, Settings,
        SettingsPatch, Theme, Transaction, TransactionPatch,
    },
};
use tracing::{debug, trace};

/// Complete in-memory application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Every recorded transaction
    pub transactions: TransactionsState,
    /// Defaults followed by user categories
    pub categories: CategoriesState,
    /// User preferences
    pub settings: Settings,
}

/// Every mutation the presentation layer can request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append a validated transaction
    AddTransaction(NewTransaction),
    /// Merge a patch into an existing transaction
    UpdateTransaction {
        /// Target transaction
        id: String,
        /// Fields to change
        patch: TransactionPatch,
    },
    /// Remove a transaction by id
    DeleteTransaction(String),
    /// Replace every transaction
    SetTransactions(Vec<Transaction>),
    /// Append a validated user category
    AddCategory(NewCategory),
    /// Merge a patch into a user category; defaults are left alone
    UpdateCategory {
        /// Target category
        id: String,
        /// Fields to change
        patch: CategoryPatch,
    },
    /// Remove a user category by id
    DeleteCategory(String),
    /// Replace every category
    SetCategories(Vec<Category>),
    /// Switch the interface language
    SetLanguage(Language),
    /// Switch the display currency
    SetCurrency(Currency),
    /// Switch the color scheme
    SetTheme(Theme),
    /// Turn reminders on or off
    SetNotifications(bool),
    /// Change several settings at once
    UpdateSettings(SettingsPatch),
}

impl Action {
    const fn name(&self) -> &'static str {
        match self {
            Self::AddTransaction(_) => "addTransaction",
            Self::UpdateTransaction { .. } => "updateTransaction",
            Self::DeleteTransaction(_) => "deleteTransaction",
            Self::SetTransactions(_) => "setTransactions",
            Self::AddCategory(_) => "addCategory",
            Self::UpdateCategory { .. } => "updateCategory",
            Self::DeleteCategory(_) => "deleteCategory",
            Self::SetCategories(_) => "setCategories",
            Self::SetLanguage(_) => "setLanguage",
            Self::SetCurrency(_) => "setCurrency",
            Self::SetTheme(_) => "setTheme",
            Self::SetNotifications(_) => "setNotifications",
            Self::UpdateSettings(_) => "updateSettings",
        }
    }
}

/// Applies `action` to `state`. Returns the generated id for add actions.
pub fn reduce(state: &mut AppState, action: Action) -> Option<String> {
    match action {
        Action::AddTransaction(new) => Some(state.transactions.add(new)),
        Action::UpdateTransaction { id, patch } => {
            state.transactions.update(&id, patch);
            None
        }
        Action::DeleteTransaction(id) => {
            state.transactions.delete(&id);
            None
        }
        Action::SetTransactions(transactions) => {
            state.transactions.replace_all(transactions);
            None
        }
        Action::AddCategory(new) => Some(state.categories.add(new)),
        Action::UpdateCategory { id, patch } => {
            state.categories.update(&id, patch);
            None
        }
        Action::DeleteCategory(id) => {
            state.categories.delete(&id);
            None
        }
        Action::SetCategories(categories) => {
            state.categories.replace_all(categories);
            None
        }
        Action::SetLanguage(language) => {
            state.settings.set_language(language);
            None
        }
        Action::SetCurrency(currency) => {
            state.settings.set_currency(currency);
            None
        }
        Action::SetTheme(theme) => {
            state.settings.set_theme(theme);
            None
        }
        Action::SetNotifications(enabled) => {
            state.settings.set_notifications(enabled);
            None
        }
        Action::UpdateSettings(patch) => {
            state.settings.apply(patch);
            None
        }
    }
}

/// Observer notified after every dispatched action with the resulting state.
pub trait StateListener: Send + Sync {
    /// Called synchronously on the dispatching thread; keep it cheap.
    fn state_changed(&self, state: &AppState);
}

/// State container with synchronous, one-at-a-time dispatch.
#[derive(Default)]
pub struct Store {
    state: AppState,
    listeners: Vec<Arc<dyn StateListener>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Store {
    /// Store starting from `state` with no listeners.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscribe(&mut self, listener: Arc<dyn StateListener>) {
        self.listeners.push(listener);
    }

    /// Applies `action` and notifies listeners. Returns the new id for add actions.
    pub fn dispatch(&mut self, action: Action) -> Option<String> {
        let name = action.name();
        trace!(action = name, "Dispatching");
        let created = reduce(&mut self.state, action);
        debug!(
            action = name,
            transactions = self.state.transactions.len(),
            categories = self.state.categories.all().len(),
            "Action applied"
        );
        for listener in &self.listeners {
            listener.state_changed(&self.state);
        }
        created
    }

    /// Consumes the store, returning its final state.
    #[must_use]
    pub fn into_state(self) -> AppState {
        self.state
    }
}
