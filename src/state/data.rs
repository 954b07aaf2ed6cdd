/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the recipe service, the cache and the UI layer.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image shown when a payload carries no image at all
pub const DEFAULT_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

/// Identifier of a recipe, unique within the cached collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub u64);

impl RecipeId {
    /// Generate a client-side id for records the server never confirmed.
    ///
    /// Kept inside the JSON safe integer range so it survives a round trip
    /// through any service that stores numbers as doubles.
    pub fn random() -> Self {
        RecipeId(rand::random::<u64>() & ((1 << 53) - 1))
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single recipe in the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub calories_per_serving: u32,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl Recipe {
    /// Build a recipe out of a draft and an id
    pub fn from_draft(id: RecipeId, draft: RecipeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            ingredients: draft.ingredients,
            calories_per_serving: draft.calories_per_serving,
            image: draft.image,
            user_id: draft.user_id,
        }
    }

    /// Overlay every field the server sent back
    pub fn merge_partial(&mut self, partial: PartialRecipe) {
        if let Some(name) = partial.name {
            self.name = name;
        }
        if let Some(ingredients) = partial.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(calories) = partial.calories_per_serving {
            self.calories_per_serving = calories;
        }
        if let Some(image) = partial.image {
            self.image = image;
        }
        if let Some(user_id) = partial.user_id {
            self.user_id = Some(user_id);
        }
    }

    /// Overlay the user's patch. Patch fields always win.
    pub fn apply_patch(&mut self, patch: &RecipePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(ingredients) = &patch.ingredients {
            self.ingredients = ingredients.clone();
        }
        if let Some(calories) = patch.calories_per_serving {
            self.calories_per_serving = calories;
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
    }

    /// Ingredient line shown on the card
    pub fn ingredient_summary(&self) -> String {
        if self.ingredients.is_empty() {
            "Secret ingredients".to_string()
        } else {
            self.ingredients.join(", ")
        }
    }
}

/// A recipe the user submitted for creation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    pub ingredients: Vec<String>,
    pub calories_per_serving: u32,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// Fields the user changed on an existing recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_serving: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<RecipeDraft> for RecipePatch {
    fn from(draft: RecipeDraft) -> Self {
        Self {
            name: Some(draft.name),
            ingredients: Some(draft.ingredients),
            calories_per_serving: Some(draft.calories_per_serving),
            image: Some(draft.image),
        }
    }
}

/// Whatever the service echoes back from an update.
///
/// The demo service may return a full record, a partial one, or stale values,
/// so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialRecipe {
    pub id: Option<RecipeId>,
    pub name: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub calories_per_serving: Option<u32>,
    pub image: Option<String>,
    pub user_id: Option<u64>,
}

/// Body of the list endpoint
#[derive(Debug, Deserialize)]
pub struct RecipeList {
    pub recipes: Vec<Recipe>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn veggie() -> Recipe {
        Recipe {
            id: RecipeId(1),
            name: "Veggie Pizza".to_string(),
            ingredients: vec!["Dough".to_string(), "Peppers".to_string()],
            calories_per_serving: 300,
            image: "https://cdn.dummyjson.com/recipe-images/1.webp".to_string(),
            user_id: None,
        }
    }

    #[test]
    fn test_deserialize_service_recipe() {
        let json = r#"{
            "id": 7,
            "name": "Margherita",
            "ingredients": ["Dough", "Basil"],
            "caloriesPerServing": 280,
            "image": "https://cdn.dummyjson.com/recipe-images/7.webp",
            "cuisine": "Italian",
            "rating": 4.6,
            "userId": 45
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();

        assert_eq!(recipe.id, RecipeId(7));
        assert_eq!(recipe.ingredients, vec!["Dough", "Basil"]);
        assert_eq!(recipe.calories_per_serving, 280);
        assert_eq!(recipe.user_id, Some(45));
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": 3, "name": "Calzone"}"#).unwrap();
        assert_eq!(recipe.image, DEFAULT_IMAGE);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.ingredient_summary(), "Secret ingredients");
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let draft = RecipeDraft {
            name: "BBQ Pizza".to_string(),
            ingredients: vec!["Chicken".to_string()],
            calories_per_serving: 450,
            image: "https://placehold.co/600x400".to_string(),
            user_id: Some(1),
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["caloriesPerServing"], 450);
        assert_eq!(value["userId"], 1);
    }

    #[test]
    fn test_patch_wins_over_server_fields() {
        let mut recipe = veggie();
        recipe.merge_partial(PartialRecipe {
            calories_per_serving: Some(120),
            name: Some("Old Name".to_string()),
            ..Default::default()
        });
        recipe.apply_patch(&RecipePatch {
            calories_per_serving: Some(500),
            ..Default::default()
        });

        assert_eq!(recipe.calories_per_serving, 500);
        assert_eq!(recipe.name, "Old Name");
        assert_eq!(recipe.id, RecipeId(1));
    }

    #[test]
    fn test_patch_skips_absent_fields_on_the_wire() {
        let patch = RecipePatch {
            name: Some("Hawaiian".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "Hawaiian" }));
    }

    #[test]
    fn test_random_id_fits_json_number() {
        for _ in 0..64 {
            assert!(RecipeId::random().0 < (1 << 53));
        }
    }
}
