/// Recipe service client
///
/// - The `RecipeApi` seam the dashboard talks to (client.rs)
/// - The HTTP implementation against the demo service (client.rs)
/// - Error taxonomy for failed calls (error.rs)

pub mod client;
pub mod error;

pub use client::{HttpRecipeApi, RecipeApi};
pub use error::{ApiError, ApiResult};
