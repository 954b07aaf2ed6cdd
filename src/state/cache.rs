/// The recipe query cache and its reconciliation rules
///
/// The cache is an explicit value owned by the application and lent to
/// whoever needs it. It holds the one collection the dashboard renders,
/// stored under the logical key `"recipes"`.
///
/// Mutation outcomes are folded into the collection optimistically:
/// - create: success prepends the server record, failure prepends the draft
///   under a random id
/// - update: success and failure both apply the patch on top of the entry
/// - delete: only success removes the entry
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use super::data::{PartialRecipe, Recipe, RecipeDraft, RecipeId, RecipePatch};
use super::mutation::{Mutation, MutationKind, Mutations};
use crate::api::{ApiError, ApiResult};

/// Logical key of the recipe collection
pub const RECIPES_KEY: &str = "recipes";

/// Read state of the collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    /// Nobody asked for the collection yet
    #[default]
    Idle,
    Loading,
    Failed(ApiError),
    Ready,
}

#[derive(Debug, Clone)]
pub struct RecipeCache {
    key: &'static str,
    fetch: FetchState,
    recipes: Vec<Recipe>,
    mutations: Mutations,
}

impl Default for RecipeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeCache {
    pub fn new() -> Self {
        Self {
            key: RECIPES_KEY,
            fetch: FetchState::Idle,
            recipes: Vec::new(),
            mutations: Mutations::default(),
        }
    }

    /// A cache whose list fetch already completed
    #[cfg(test)]
    pub fn seeded(recipes: Vec<Recipe>) -> Self {
        let mut cache = Self::new();
        cache.begin_fetch();
        cache.finish_fetch(Ok(recipes));
        cache
    }

    pub fn key(&self) -> &str {
        self.key
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        self.get(id).is_some()
    }

    pub fn mutation(&self, kind: MutationKind) -> &Mutation {
        self.mutations.get(kind)
    }

    /// Mark the collection as requested.
    ///
    /// Returns true only on first activation; later reads are served from
    /// the cache with no refresh and no expiry.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch != FetchState::Idle {
            return false;
        }
        self.fetch = FetchState::Loading;
        true
    }

    pub fn finish_fetch(&mut self, result: ApiResult<Vec<Recipe>>) {
        match result {
            Ok(recipes) => {
                let mut seen = HashSet::new();
                // Writes that settled while the list was in flight stay on top
                let mut merged = std::mem::take(&mut self.recipes);
                merged.extend(recipes);
                merged.retain(|recipe| seen.insert(recipe.id));
                info!(key = self.key, count = merged.len(), "🍕 Recipes loaded");
                self.recipes = merged;
                self.fetch = FetchState::Ready;
            }
            Err(err) => {
                warn!(key = self.key, error = %err, "Failed to load recipes");
                self.fetch = FetchState::Failed(err);
            }
        }
    }

    pub fn begin_mutation(&mut self, kind: MutationKind) {
        debug!(kind = kind.label(), "mutation pending");
        self.mutations.get_mut(kind).begin();
    }

    /// Apply the outcome of a create. Returns the id the record landed under.
    pub fn settle_create(&mut self, draft: RecipeDraft, result: ApiResult<Recipe>) -> RecipeId {
        self.mutations.get_mut(MutationKind::Create).settle(&result);

        let mut recipe = match result {
            Ok(created) => created,
            Err(err) => {
                warn!(error = %err, name = %draft.name, "Create failed, keeping the draft locally");
                Recipe::from_draft(RecipeId::random(), draft)
            }
        };

        // The demo service hands every new record the same id
        if self.contains(recipe.id) {
            let fresh = self.fresh_id();
            debug!(server_id = %recipe.id, local_id = %fresh, "Duplicate id from create, re-keyed");
            recipe.id = fresh;
        }

        let id = recipe.id;
        self.recipes.insert(0, recipe);
        id
    }

    /// Apply the outcome of an update. Returns false if no entry matched.
    pub fn settle_update(
        &mut self,
        id: RecipeId,
        patch: &RecipePatch,
        result: ApiResult<PartialRecipe>,
    ) -> bool {
        self.mutations.get_mut(MutationKind::Update).settle(&result);

        let Some(entry) = self.recipes.iter_mut().find(|recipe| recipe.id == id) else {
            debug!(%id, "Update settled for a recipe that is no longer cached");
            return false;
        };

        match result {
            Ok(server) => entry.merge_partial(server),
            Err(err) => warn!(%id, error = %err, "Update failed, applying the patch locally"),
        }
        entry.apply_patch(patch);
        true
    }

    /// Apply the outcome of a delete. Returns true if an entry was removed.
    pub fn settle_delete(&mut self, id: RecipeId, result: ApiResult<Value>) -> bool {
        self.mutations.get_mut(MutationKind::Delete).settle(&result);

        if let Err(err) = result {
            warn!(%id, error = %err, "Delete failed, recipe kept");
            return false;
        }

        let before = self.recipes.len();
        self.recipes.retain(|recipe| recipe.id != id);
        self.recipes.len() < before
    }

    fn fresh_id(&self) -> RecipeId {
        loop {
            let id = RecipeId::random();
            if !self.contains(id) {
                return id;
            }
        }
    }
}
