//! In-memory shopping-list store.
//!
//! `ShoppingListStore` owns the item list, the category set and the draft
//! for the next item. Every successful mutation is announced to subscribers
//! as a `StoreEvent` once the new state is in place; failed operations and
//! no-ops stay silent.

use chrono::{DateTime, Utc};

use crate::config::{StoreConfig, UnregisteredCategoryPolicy};
use crate::error::{Error, Result};
use crate::export::render_share_text;
use crate::models::{CategoryName, CategorySet, Draft, Item, ItemId};
use crate::share::ShareSheet;
use crate::util::non_empty_trimmed;

/// State change announced to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    CategoryAdded(String),
    ItemAdded(ItemId),
    ItemToggled { id: ItemId, completed: bool },
    ItemRemoved(ItemId),
    DraftChanged,
    ComposeOpened,
    ComposeClosed,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Shopping-list state plus its mutation operations.
pub struct ShoppingListStore {
    items: Vec<Item>,
    categories: CategorySet,
    default_category: CategoryName,
    draft: Draft,
    compose_open: bool,
    policy: UnregisteredCategoryPolicy,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ShoppingListStore {
    /// Empty list with the default categories
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(
            CategorySet::default(),
            CategoryName::general(),
            UnregisteredCategoryPolicy::default(),
        )
    }

    /// Empty list seeded from `config`
    pub fn with_config(config: &StoreConfig) -> Result<Self> {
        let (categories, default_category) = config.build_categories()?;
        Ok(Self::from_parts(
            categories,
            default_category,
            config.unregistered_category,
        ))
    }

    fn from_parts(
        categories: CategorySet,
        default_category: CategoryName,
        policy: UnregisteredCategoryPolicy,
    ) -> Self {
        Self {
            items: Vec::new(),
            categories,
            draft: Draft::with_category(default_category.as_str()),
            default_category,
            compose_open: false,
            policy,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: &StoreEvent) {
        tracing::debug!(?event, "store changed");
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn categories(&self) -> &CategorySet {
        &self.categories
    }

    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    #[must_use]
    pub const fn is_compose_open(&self) -> bool {
        self.compose_open
    }

    #[must_use]
    pub const fn unregistered_category_policy(&self) -> UnregisteredCategoryPolicy {
        self.policy
    }

    // ------------------------------------------------------------------
    // Compose view and draft
    // ------------------------------------------------------------------

    pub fn open_compose(&mut self) {
        if !self.compose_open {
            self.compose_open = true;
            self.emit(&StoreEvent::ComposeOpened);
        }
    }

    /// Close the compose view without committing; the draft is kept.
    pub fn dismiss_compose(&mut self) {
        if self.compose_open {
            self.compose_open = false;
            self.emit(&StoreEvent::ComposeClosed);
        }
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.emit(&StoreEvent::DraftChanged);
    }

    /// Free-form category text, not checked against the set.
    pub fn set_draft_category(&mut self, category: impl Into<String>) {
        self.draft.category = category.into();
        self.emit(&StoreEvent::DraftChanged);
    }

    /// Pick a category from the set.
    pub fn select_category(&mut self, name: &str) -> Result<()> {
        if !self.categories.contains(name) {
            return Err(Error::UnknownCategory(name.to_string()));
        }
        self.set_draft_category(name);
        Ok(())
    }

    /// Apply a date-picker result. `None` means the picker was cancelled.
    pub fn set_draft_reminder(&mut self, reminder: Option<DateTime<Utc>>) {
        if let Some(reminder) = reminder {
            self.draft.reminder = Some(reminder);
            self.emit(&StoreEvent::DraftChanged);
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Register a new category and select it for the draft.
    ///
    /// Empty (after trimming) or already-present names are rejected and
    /// nothing changes.
    pub fn add_category(&mut self, name: &str) -> Result<()> {
        let added = self.categories.insert(name)?.to_string();
        tracing::debug!(category = %added, "category added");

        self.draft.category.clone_from(&added);
        self.emit(&StoreEvent::CategoryAdded(added));
        self.emit(&StoreEvent::DraftChanged);
        Ok(())
    }

    /// Submit the draft's category text as a new category.
    pub fn add_category_from_draft(&mut self) -> Result<()> {
        let candidate = self.draft.category.clone();
        self.add_category(&candidate)
    }

    /// Commit the draft as a new item at the end of the list.
    ///
    /// On success the draft name clears, the category goes back to the
    /// default and the compose view closes. The picked reminder carries
    /// over to the next item. Returns the new item's id.
    pub fn add_item(&mut self) -> Result<ItemId> {
        let name = non_empty_trimmed(&self.draft.name)
            .ok_or(Error::EmptyItemName)?
            .to_string();
        let category = self.resolve_draft_category()?;

        let item = Item::new(name, category, self.draft.reminder_or(Utc::now()));
        let id = item.id;
        tracing::debug!(%id, name = %item.name, category = %item.category, "item added");
        self.items.push(item);
        self.emit(&StoreEvent::ItemAdded(id));

        self.draft.name.clear();
        self.draft.category = self.default_category.to_string();
        self.emit(&StoreEvent::DraftChanged);
        self.dismiss_compose();
        Ok(id)
    }

    /// Category the next item is filed under, applying the
    /// unregistered-category policy. Blank text falls back to the default
    /// category.
    fn resolve_draft_category(&mut self) -> Result<String> {
        let category = non_empty_trimmed(&self.draft.category)
            .map_or_else(|| self.default_category.to_string(), ToString::to_string);
        if self.categories.contains(&category) {
            return Ok(category);
        }

        match self.policy {
            UnregisteredCategoryPolicy::Accept => {
                tracing::warn!(
                    category = %category,
                    "item filed under a category that is not in the category set"
                );
                Ok(category)
            }
            UnregisteredCategoryPolicy::Register => {
                self.categories.insert(&category)?;
                self.emit(&StoreEvent::CategoryAdded(category.clone()));
                Ok(category)
            }
            UnregisteredCategoryPolicy::Reject => Err(Error::UnregisteredCategory(category)),
        }
    }

    /// Flip the completion flag of one item. Unknown ids are ignored.
    pub fn toggle_completion(&mut self, id: &ItemId) {
        let Some(item) = self.items.iter_mut().find(|item| item.id == *id) else {
            tracing::debug!(%id, "toggle ignored, no such item");
            return;
        };
        item.completed = !item.completed;
        let event = StoreEvent::ItemToggled {
            id: *id,
            completed: item.completed,
        };
        self.emit(&event);
    }

    /// Remove one item, keeping the order of the rest. Unknown ids are
    /// ignored.
    pub fn remove_item(&mut self, id: &ItemId) {
        let Some(position) = self.items.iter().position(|item| item.id == *id) else {
            tracing::debug!(%id, "remove ignored, no such item");
            return;
        };
        self.items.remove(position);
        self.emit(&StoreEvent::ItemRemoved(*id));
    }

    // ------------------------------------------------------------------
    // Sharing
    // ------------------------------------------------------------------

    /// Share payload for the current list.
    #[must_use]
    pub fn export_as_text(&self) -> String {
        render_share_text(&self.items)
    }

    /// Hand the share payload to `sheet`. Store state is never touched.
    pub async fn share_list<S: ShareSheet>(&self, sheet: &S) -> Result<()> {
        let message = self.export_as_text();
        sheet.share(&message).await.map_err(|error| {
            tracing::warn!(%error, "sharing the list failed");
            Error::ShareFailed(error.to_string())
        })
    }
}

impl Default for ShoppingListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShoppingListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShoppingListStore")
            .field("items", &self.items)
            .field("categories", &self.categories)
            .field("draft", &self.draft)
            .field("compose_open", &self.compose_open)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
