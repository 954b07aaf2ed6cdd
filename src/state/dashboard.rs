/// Dashboard controller state
///
/// Local UI state that is not part of the recipe cache: the search text,
/// whether the recipe modal is open, and which recipe it edits. The edit
/// target is kept as a key into the cache and resolved when needed, so the
/// form always sees the current version of the record.
use tracing::debug;

use super::cache::RecipeCache;
use super::data::{Recipe, RecipeDraft, RecipeId, RecipePatch};
use crate::ui::modal::RecipeForm;

/// Where a modal submission goes
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(RecipeDraft),
    Update(RecipeId, RecipePatch),
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    filter: String,
    modal_open: bool,
    editing: Option<RecipeId>,
    /// Transient input of the recipe modal
    pub form: RecipeForm,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: String) {
        self.filter = filter;
    }

    /// Recipes matching the search text, in cache order
    pub fn visible<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        filter_recipes(recipes, &self.filter)
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn editing(&self) -> Option<RecipeId> {
        self.editing
    }

    /// The recipe under edit, as currently cached
    pub fn editing_recipe<'a>(&self, cache: &'a RecipeCache) -> Option<&'a Recipe> {
        self.editing.and_then(|id| cache.get(id))
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = RecipeForm::default();
        self.modal_open = true;
    }

    pub fn open_edit(&mut self, recipe: &Recipe) {
        self.editing = Some(recipe.id);
        self.form = RecipeForm::for_recipe(recipe);
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.editing = None;
    }

    /// A recipe left the cache. Close the modal if it was being edited.
    pub fn forget(&mut self, id: RecipeId) {
        if self.editing == Some(id) {
            debug!(%id, "Edited recipe was deleted, closing the modal");
            self.close_modal();
        }
    }

    /// Turn the form into a create or an update.
    ///
    /// Returns `None` and keeps the modal open with an inline error when the
    /// form does not parse.
    pub fn submit(
        &mut self,
        cache: &RecipeCache,
        placeholder_image: &str,
        user_id: u64,
    ) -> Option<Submission> {
        let existing = self.editing_recipe(cache);

        let mut draft = match self.form.submit(existing, placeholder_image) {
            Ok(draft) => draft,
            Err(err) => {
                debug!(error = %err, "Recipe form rejected");
                self.form.error = Some(err);
                return None;
            }
        };
        self.form.error = None;

        match self.editing {
            Some(id) => Some(Submission::Update(id, RecipePatch::from(draft))),
            None => {
                draft.user_id = Some(user_id);
                Some(Submission::Create(draft))
            }
        }
    }
}

/// Case-insensitive substring match on the recipe name.
/// An empty filter keeps everything.
pub fn filter_recipes<'a>(recipes: &'a [Recipe], filter: &str) -> Vec<&'a Recipe> {
    let needle = filter.to_lowercase();
    recipes
        .iter()
        .filter(|recipe| recipe.name.to_lowercase().contains(&needle))
        .collect()
}
