use iced::widget::{column, container, scrollable};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod media;
mod state;
mod ui;

use api::{ApiResult, HttpRecipeApi, RecipeApi};
use config::Config;
use media::{MediaError, Thumbnails};
use state::cache::{FetchState, RecipeCache};
use state::dashboard::{Dashboard, Submission};
use state::data::{PartialRecipe, Recipe, RecipeDraft, RecipeId, RecipePatch};
use state::mutation::MutationKind;

/// A recipe service call in flight, resolving to the message that settles it
type Call = Pin<Box<dyn Future<Output = Message> + Send>>;

/// Main application state
struct PizzaShop {
    config: Config,
    /// The recipe service
    api: Arc<dyn RecipeApi>,
    /// Shared HTTP client for card images
    http: reqwest::Client,
    /// Query cache holding the menu
    cache: RecipeCache,
    /// Filter text, modal and edit target
    dashboard: Dashboard,
    thumbnails: Thumbnails,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Initial list fetch finished
    RecipesLoaded(ApiResult<Vec<Recipe>>),
    FilterChanged(String),
    OpenCreate,
    OpenEdit(RecipeId),
    CloseModal,
    NameChanged(String),
    IngredientsChanged(String),
    CaloriesChanged(String),
    /// User clicked "Upload Image" in the modal
    PickImage,
    SubmitForm,
    CreateSettled(RecipeDraft, ApiResult<Recipe>),
    UpdateSettled(RecipeId, RecipePatch, ApiResult<PartialRecipe>),
    Delete(RecipeId),
    DeleteSettled(RecipeId, ApiResult<Value>),
    ThumbnailLoaded(String, Result<iced::widget::image::Handle, MediaError>),
}

impl PizzaShop {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::load_or_default();
        let http = reqwest::Client::new();
        let api = Arc::new(HttpRecipeApi::new(
            http.clone(),
            &config.api_base_url,
            config.list_limit,
        ));

        let mut app = Self::with_api(config, http, api);
        info!("🍕 Pizza Shop starting");
        let fetch = perform(app.fetch_recipes());
        (app, fetch)
    }

    fn with_api(config: Config, http: reqwest::Client, api: Arc<dyn RecipeApi>) -> Self {
        PizzaShop {
            config,
            api,
            http,
            cache: RecipeCache::new(),
            dashboard: Dashboard::new(),
            thumbnails: Thumbnails::default(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::RecipesLoaded(result) => {
                self.cache.finish_fetch(result);
                self.load_thumbnails()
            }
            Message::FilterChanged(filter) => {
                self.dashboard.set_filter(filter);
                Task::none()
            }
            Message::OpenCreate => {
                self.dashboard.open_create();
                Task::none()
            }
            Message::OpenEdit(id) => {
                if let Some(recipe) = self.cache.get(id) {
                    self.dashboard.open_edit(recipe);
                }
                Task::none()
            }
            Message::CloseModal => {
                if !self.is_submitting() {
                    self.dashboard.close_modal();
                }
                Task::none()
            }
            Message::NameChanged(name) => {
                self.dashboard.form.name = name;
                Task::none()
            }
            Message::IngredientsChanged(ingredients) => {
                self.dashboard.form.ingredients = ingredients;
                Task::none()
            }
            Message::CaloriesChanged(calories) => {
                self.dashboard.form.calories = calories;
                Task::none()
            }
            Message::PickImage => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Choose a Recipe Image")
                    .add_filter("Images", &["png", "jpg", "jpeg", "webp", "gif", "bmp"])
                    .pick_file();

                if let Some(path) = file {
                    info!(path = %path.display(), "Image picked (kept local, never uploaded)");
                    self.dashboard.form.image_file = Some(path);
                }
                Task::none()
            }
            Message::SubmitForm => perform(self.submit()),
            Message::CreateSettled(draft, result) => {
                let id = self.cache.settle_create(draft, result);
                info!(%id, "Recipe created");
                self.dashboard.close_modal();
                self.load_thumbnails()
            }
            Message::UpdateSettled(id, patch, result) => {
                self.cache.settle_update(id, &patch, result);
                self.dashboard.close_modal();
                self.load_thumbnails()
            }
            Message::Delete(id) => perform(Some(self.delete_recipe(id))),
            Message::DeleteSettled(id, result) => {
                // Failures stay in the delete mutation state; the dashboard does not show them
                if self.cache.settle_delete(id, result) {
                    info!(%id, "Recipe deleted");
                    self.dashboard.forget(id);
                }
                Task::none()
            }
            Message::ThumbnailLoaded(url, result) => {
                self.thumbnails.finish(url, result);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match self.cache.fetch_state() {
            FetchState::Idle | FetchState::Loading => return ui::page::loading(),
            FetchState::Failed(_) => return ui::page::error(),
            FetchState::Ready => {}
        }

        let visible = self.dashboard.visible(self.cache.recipes());
        let menu = ui::grid::view(&visible, &self.thumbnails, self.dashboard.filter());

        let page = column![
            ui::page::navbar(),
            ui::page::hero(self.dashboard.filter()),
            container(menu).width(Length::Fill).padding([40, 24]),
            ui::page::footer(),
        ];
        let body: Element<Message> = scrollable(page).height(Length::Fill).into();

        if !self.dashboard.is_modal_open() {
            return body;
        }

        let dialog = ui::modal::view(
            &self.dashboard.form,
            self.dashboard.editing().is_some(),
            self.is_submitting(),
        );
        ui::modal::overlay(body, dialog)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }

    /// A create or update from the modal is in flight
    fn is_submitting(&self) -> bool {
        self.cache.mutation(MutationKind::Create).is_pending()
            || self.cache.mutation(MutationKind::Update).is_pending()
    }

    /// Start the list fetch, on first activation only
    fn fetch_recipes(&mut self) -> Option<Call> {
        if !self.cache.begin_fetch() {
            return None;
        }

        let api = self.api.clone();
        let call: Call = Box::pin(async move { Message::RecipesLoaded(api.list_recipes().await) });
        Some(call)
    }

    /// Turn the modal form into a create or update call
    fn submit(&mut self) -> Option<Call> {
        // One create or update at a time from the modal
        if self.is_submitting() {
            return None;
        }

        let submission = self.dashboard.submit(
            &self.cache,
            &self.config.placeholder_image,
            self.config.user_id,
        )?;

        Some(match submission {
            Submission::Create(draft) => self.create_recipe(draft),
            Submission::Update(id, patch) => self.update_recipe(id, patch),
        })
    }

    fn create_recipe(&mut self, draft: RecipeDraft) -> Call {
        self.cache.begin_mutation(MutationKind::Create);

        let api = self.api.clone();
        Box::pin(async move {
            let result = api.create_recipe(&draft).await;
            Message::CreateSettled(draft, result)
        })
    }

    fn update_recipe(&mut self, id: RecipeId, patch: RecipePatch) -> Call {
        self.cache.begin_mutation(MutationKind::Update);

        let api = self.api.clone();
        Box::pin(async move {
            let result = api.update_recipe(id, &patch).await;
            Message::UpdateSettled(id, patch, result)
        })
    }

    fn delete_recipe(&mut self, id: RecipeId) -> Call {
        self.cache.begin_mutation(MutationKind::Delete);

        let api = self.api.clone();
        Box::pin(async move { Message::DeleteSettled(id, api.delete_recipe(id).await) })
    }

    /// Start loading every card image not seen yet
    fn load_thumbnails(&mut self) -> Task<Message> {
        let urls = self
            .thumbnails
            .request(self.cache.recipes().iter().map(|recipe| recipe.image.as_str()));

        let size = self.config.thumbnail_size;
        Task::batch(urls.into_iter().map(|url| {
            let client = self.http.clone();
            Task::perform(
                async move {
                    let result = media::load_thumbnail(client, url.clone(), size).await;
                    (url, result)
                },
                |(url, result)| Message::ThumbnailLoaded(url, result),
            )
        }))
    }
}

/// Run a service call in the background, if there is one
fn perform(call: Option<Call>) -> Task<Message> {
    match call {
        Some(call) => Task::perform(call, std::convert::identity),
        None => Task::none(),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pizza_shop=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    init_logging();

    iced::application("Pizza Shop", PizzaShop::update, PizzaShop::view)
        .theme(PizzaShop::theme)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(PizzaShop::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::ApiError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use state::mutation::MutationStatus;
    use std::sync::Mutex;

    /// A recipe service answering every call with a fixed outcome,
    /// remembering what it was sent
    struct ScriptedApi {
        list: ApiResult<Vec<Recipe>>,
        create: ApiResult<Recipe>,
        update: ApiResult<PartialRecipe>,
        delete: ApiResult<Value>,
        created: Mutex<Vec<RecipeDraft>>,
        updated: Mutex<Vec<(RecipeId, RecipePatch)>>,
        deleted: Mutex<Vec<RecipeId>>,
    }

    impl ScriptedApi {
        /// Every call fails at the transport
        fn offline() -> Self {
            let offline = || ApiError::Network("offline".to_string());
            Self {
                list: Err(offline()),
                create: Err(offline()),
                update: Err(offline()),
                delete: Err(offline()),
                created: Mutex::default(),
                updated: Mutex::default(),
                deleted: Mutex::default(),
            }
        }

        /// The list succeeds, every write fails
        fn serving(recipes: Vec<Recipe>) -> Self {
            Self {
                list: Ok(recipes),
                ..Self::offline()
            }
        }
    }

    #[async_trait]
    impl RecipeApi for ScriptedApi {
        async fn list_recipes(&self) -> ApiResult<Vec<Recipe>> {
            self.list.clone()
        }

        async fn create_recipe(&self, draft: &RecipeDraft) -> ApiResult<Recipe> {
            self.created.lock().unwrap().push(draft.clone());
            self.create.clone()
        }

        async fn update_recipe(&self, id: RecipeId, patch: &RecipePatch) -> ApiResult<PartialRecipe> {
            self.updated.lock().unwrap().push((id, patch.clone()));
            self.update.clone()
        }

        async fn delete_recipe(&self, id: RecipeId) -> ApiResult<Value> {
            self.deleted.lock().unwrap().push(id);
            self.delete.clone()
        }
    }

    fn recipe(id: u64, name: &str, calories: u32) -> Recipe {
        Recipe {
            id: RecipeId(id),
            name: name.to_string(),
            ingredients: vec!["Dough".to_string(), "Tomato Sauce".to_string()],
            calories_per_serving: calories,
            image: format!("https://cdn.dummyjson.com/recipe-images/{id}.webp"),
            user_id: None,
        }
    }

    fn app_for(api: &Arc<ScriptedApi>) -> PizzaShop {
        PizzaShop::with_api(Config::default(), reqwest::Client::new(), api.clone())
    }

    /// An app whose initial list fetch went through the service
    async fn started(api: ScriptedApi) -> (PizzaShop, Arc<ScriptedApi>) {
        let api = Arc::new(api);
        let mut app = app_for(&api);
        let loaded = app.fetch_recipes().expect("first activation fetches").await;
        let _ = app.update(loaded);
        (app, api)
    }

    fn fill_form(app: &mut PizzaShop, name: &str, ingredients: &str, calories: &str) {
        let _ = app.update(Message::NameChanged(name.to_string()));
        let _ = app.update(Message::IngredientsChanged(ingredients.to_string()));
        let _ = app.update(Message::CaloriesChanged(calories.to_string()));
    }

    fn names(app: &PizzaShop) -> Vec<String> {
        app.cache.recipes().iter().map(|r| r.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_starts_loading_then_fails_to_error_page_state() {
        let api = Arc::new(ScriptedApi {
            list: Err(ApiError::Server { status: 500 }),
            ..ScriptedApi::offline()
        });
        let mut app = app_for(&api);

        let fetch = app.fetch_recipes().unwrap();
        assert_eq!(app.cache.fetch_state(), &FetchState::Loading);
        assert!(app.fetch_recipes().is_none());

        let _ = app.update(fetch.await);

        assert_eq!(
            app.cache.fetch_state(),
            &FetchState::Failed(ApiError::Server { status: 500 })
        );
    }

    #[tokio::test]
    async fn test_failed_create_is_kept_and_closes_modal() {
        let (mut app, api) = started(ScriptedApi::serving(vec![recipe(1, "Veggie Pizza", 300)])).await;

        let _ = app.update(Message::OpenCreate);
        fill_form(&mut app, " BBQ Pizza ", "Chicken, BBQ Sauce,", "450");
        let call = app.submit().unwrap();

        assert!(app.is_submitting());
        assert!(app.dashboard.is_modal_open());

        let settled = call.await;
        assert!(matches!(settled, Message::CreateSettled(_, Err(ApiError::Network(_)))));
        let _ = app.update(settled);

        assert_eq!(
            *api.created.lock().unwrap(),
            vec![RecipeDraft {
                name: "BBQ Pizza".to_string(),
                ingredients: vec!["Chicken".to_string(), "BBQ Sauce".to_string()],
                calories_per_serving: 450,
                image: Config::default().placeholder_image,
                user_id: Some(1),
            }]
        );
        assert_eq!(names(&app), vec!["BBQ Pizza", "Veggie Pizza"]);
        assert_ne!(app.cache.recipes()[0].id, RecipeId(1));
        assert!(!app.dashboard.is_modal_open());
        assert!(!app.is_submitting());
    }

    #[tokio::test]
    async fn test_created_record_with_taken_id_is_rekeyed() {
        let (mut app, _api) = started(ScriptedApi {
            create: Ok(recipe(1, "Calzone", 600)),
            ..ScriptedApi::serving(vec![recipe(1, "Veggie Pizza", 300)])
        })
        .await;

        let _ = app.update(Message::OpenCreate);
        fill_form(&mut app, "Calzone", "Dough, Ricotta", "600");
        let settled = app.submit().unwrap().await;
        let _ = app.update(settled);

        assert_eq!(names(&app), vec!["Calzone", "Veggie Pizza"]);
        assert_ne!(app.cache.recipes()[0].id, RecipeId(1));
        assert_eq!(app.cache.get(RecipeId(1)).unwrap().name, "Veggie Pizza");
        assert_eq!(
            app.cache.mutation(MutationKind::Create).status(),
            MutationStatus::Succeeded
        );
    }

    #[tokio::test]
    async fn test_filter_pizza_shows_only_matching_cards() {
        let (mut app, _api) = started(ScriptedApi::serving(vec![
            recipe(1, "Veggie Pizza", 300),
            recipe(2, "Pepperoni", 400),
        ]))
        .await;

        let _ = app.update(Message::FilterChanged("pizza".to_string()));

        let visible = app.dashboard.visible(app.cache.recipes());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Veggie Pizza");
    }

    #[tokio::test]
    async fn test_update_with_stale_server_response_keeps_patch() {
        let stale = PartialRecipe {
            id: Some(RecipeId(1)),
            calories_per_serving: Some(300),
            ..Default::default()
        };
        let (mut app, api) = started(ScriptedApi {
            update: Ok(stale),
            ..ScriptedApi::serving(vec![recipe(1, "Veggie Pizza", 300)])
        })
        .await;

        let _ = app.update(Message::OpenEdit(RecipeId(1)));
        let _ = app.update(Message::CaloriesChanged("500".to_string()));
        let call = app.submit().unwrap();
        assert!(app.cache.mutation(MutationKind::Update).is_pending());

        let _ = app.update(call.await);

        let updated = api.updated.lock().unwrap().clone();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, RecipeId(1));
        assert_eq!(updated[0].1.calories_per_serving, Some(500));

        assert_eq!(app.cache.get(RecipeId(1)).unwrap().calories_per_serving, 500);
        assert_eq!(app.cache.recipes().len(), 1);
        assert!(!app.dashboard.is_modal_open());
        assert_eq!(app.dashboard.editing(), None);
    }

    #[tokio::test]
    async fn test_submit_is_ignored_while_saving() {
        let (mut app, api) = started(ScriptedApi {
            create: Err(ApiError::Server { status: 503 }),
            ..ScriptedApi::serving(vec![])
        })
        .await;
        let _ = app.update(Message::OpenCreate);
        fill_form(&mut app, "Calzone", "Dough", "600");

        let call = app.submit().unwrap();
        assert!(app.submit().is_none());
        let _ = app.update(Message::CloseModal);

        assert!(app.dashboard.is_modal_open());
        assert_eq!(
            app.cache.mutation(MutationKind::Create).status(),
            MutationStatus::Pending
        );

        let _ = app.update(call.await);
        assert_eq!(api.created.lock().unwrap().len(), 1);
        assert_eq!(
            app.cache.mutation(MutationKind::Create).status(),
            MutationStatus::Failed(ApiError::Server { status: 503 })
        );
    }

    #[tokio::test]
    async fn test_failed_delete_is_silent_and_keeps_recipe() {
        let (mut app, api) = started(ScriptedApi::serving(vec![
            recipe(1, "Veggie Pizza", 300),
            recipe(2, "Pepperoni", 400),
        ]))
        .await;

        let settled = app.delete_recipe(RecipeId(2)).await;
        let _ = app.update(settled);

        assert_eq!(*api.deleted.lock().unwrap(), vec![RecipeId(2)]);
        assert_eq!(names(&app), vec!["Veggie Pizza", "Pepperoni"]);
        assert!(app.cache.mutation(MutationKind::Delete).error().is_some());
    }

    #[tokio::test]
    async fn test_deleting_the_edited_recipe_closes_modal() {
        let (mut app, _api) = started(ScriptedApi {
            delete: Ok(json!({ "id": 2, "isDeleted": true })),
            ..ScriptedApi::serving(vec![recipe(1, "Veggie Pizza", 300), recipe(2, "Pepperoni", 400)])
        })
        .await;
        let _ = app.update(Message::OpenEdit(RecipeId(2)));

        let settled = app.delete_recipe(RecipeId(2)).await;
        let _ = app.update(settled);

        assert_eq!(names(&app), vec!["Veggie Pizza"]);
        assert!(!app.dashboard.is_modal_open());
    }

    #[tokio::test]
    async fn test_thumbnails_requested_for_loaded_recipes() {
        let (app, _api) = started(ScriptedApi::serving(vec![recipe(1, "Veggie Pizza", 300)])).await;
        assert!(matches!(
            app.thumbnails.get("https://cdn.dummyjson.com/recipe-images/1.webp"),
            Some(media::Thumbnail::Loading)
        ));
    }
}
