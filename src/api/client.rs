use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use crate::state::data::{PartialRecipe, Recipe, RecipeDraft, RecipeId, RecipeList, RecipePatch};

/// The four calls the dashboard makes against the recipe service.
///
/// No retries and no timeouts beyond what the transport does by default;
/// failures are handed back to the caller as-is.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Fetch the menu
    async fn list_recipes(&self) -> ApiResult<Vec<Recipe>>;

    /// Create a recipe, returning the record as the service stored it
    async fn create_recipe(&self, draft: &RecipeDraft) -> ApiResult<Recipe>;

    /// Update a recipe. The response may not reflect the patch.
    async fn update_recipe(&self, id: RecipeId, patch: &RecipePatch) -> ApiResult<PartialRecipe>;

    /// Delete a recipe. The acknowledgement body is opaque.
    async fn delete_recipe(&self, id: RecipeId) -> ApiResult<Value>;
}

/// `RecipeApi` over HTTP, against a dummyjson-style `/recipes` resource
#[derive(Debug, Clone)]
pub struct HttpRecipeApi {
    client: Client,
    base_url: String,
    list_limit: u32,
}

impl HttpRecipeApi {
    pub fn new(client: Client, base_url: &str, list_limit: u32) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            list_limit,
        }
    }

    fn list_url(&self) -> String {
        format!("{}?limit={}", self.base_url, self.list_limit)
    }

    fn create_url(&self) -> String {
        format!("{}/add", self.base_url)
    }

    fn item_url(&self, id: RecipeId) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn list_recipes(&self) -> ApiResult<Vec<Recipe>> {
        let url = self.list_url();
        debug!(%url, "GET recipes");

        let list: RecipeList = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| logged("list", e))?
            .json()
            .await
            .map_err(|e| logged("list", e))?;

        Ok(list.recipes)
    }

    async fn create_recipe(&self, draft: &RecipeDraft) -> ApiResult<Recipe> {
        let url = self.create_url();
        debug!(%url, name = %draft.name, "POST recipe");

        let created = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| logged("create", e))?
            .json()
            .await
            .map_err(|e| logged("create", e))?;

        Ok(created)
    }

    async fn update_recipe(&self, id: RecipeId, patch: &RecipePatch) -> ApiResult<PartialRecipe> {
        let url = self.item_url(id);
        debug!(%url, "PUT recipe");

        let updated = self
            .client
            .put(&url)
            .json(patch)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| logged("update", e))?
            .json()
            .await
            .map_err(|e| logged("update", e))?;

        Ok(updated)
    }

    async fn delete_recipe(&self, id: RecipeId) -> ApiResult<Value> {
        let url = self.item_url(id);
        debug!(%url, "DELETE recipe");

        let body = self
            .client
            .delete(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| logged("delete", e))?
            .bytes()
            .await
            .map_err(|e| logged("delete", e))?;

        // Success is authoritative, whatever the body says
        Ok(serde_json::from_slice(&body).unwrap_or(Value::Null))
    }
}

fn logged(call: &str, err: reqwest::Error) -> ApiError {
    let err = ApiError::from(err);
    warn!(call, error = %err, "recipe service call failed");
    err
}
