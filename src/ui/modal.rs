/// Recipe create/edit modal
///
/// Holds the transient form input and turns it into a draft on submit.
/// The modal owns nothing else: where the draft goes is decided by the
/// dashboard.
use iced::widget::{
    button, center, column, container, horizontal_space, opaque, row, stack, text, text_input,
};
use iced::{Alignment, Color, Element, Length};
use reqwest::Url;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::data::{Recipe, RecipeDraft};
use crate::Message;

/// Why a form could not be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Recipe name is required")]
    MissingName,
    #[error("At least one ingredient is required")]
    MissingIngredients,
    #[error("Calories must be a whole number, got \"{0}\"")]
    InvalidCalories(String),
    #[error("Image path must be absolute: {0}")]
    InvalidImage(String),
}

/// Text input of the recipe modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeForm {
    pub name: String,
    /// Comma separated
    pub ingredients: String,
    pub calories: String,
    /// Local file picked for the image. Never uploaded anywhere.
    pub image_file: Option<PathBuf>,
    pub error: Option<FormError>,
}

impl RecipeForm {
    /// Pre-fill from an existing recipe (edit mode)
    pub fn for_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.join(", "),
            calories: recipe.calories_per_serving.to_string(),
            image_file: None,
            error: None,
        }
    }

    /// Parse the input into a draft.
    ///
    /// The image is, in order: the picked local file, the existing recipe's
    /// image, the placeholder. The draft carries no user id; the dashboard
    /// adds it for creates.
    pub fn submit(&self, existing: Option<&Recipe>, placeholder_image: &str) -> Result<RecipeDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let ingredients = parse_ingredients(&self.ingredients);
        if ingredients.is_empty() {
            return Err(FormError::MissingIngredients);
        }

        let calories = self.calories.trim();
        let calories_per_serving = calories
            .parse::<u32>()
            .map_err(|_| FormError::InvalidCalories(calories.to_string()))?;

        let image = match (&self.image_file, existing) {
            (Some(path), _) => local_image_url(path)?,
            (None, Some(recipe)) => recipe.image.clone(),
            (None, None) => placeholder_image.to_string(),
        };

        Ok(RecipeDraft {
            name: name.to_string(),
            ingredients,
            calories_per_serving,
            image,
            user_id: None,
        })
    }
}

/// Split free text on commas, dropping blanks
pub fn parse_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn local_image_url(path: &Path) -> Result<String, FormError> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|_| FormError::InvalidImage(path.display().to_string()))
}

/// Build the modal dialog
pub fn view<'a>(form: &'a RecipeForm, editing: bool, submitting: bool) -> Element<'a, Message> {
    let title = if editing { "Edit Recipe" } else { "New Creation" };
    let submit_label = match (submitting, editing) {
        (true, _) => "Saving...",
        (false, true) => "Update Recipe",
        (false, false) => "Create Recipe",
    };

    // Inputs without an on_input handler render disabled
    let mut name = text_input("Recipe Name", &form.name).padding(10);
    let mut ingredients = text_input("Dough, Tomato, Mozzarella", &form.ingredients).padding(10);
    let mut calories = text_input("Calories", &form.calories).padding(10);
    if !submitting {
        name = name.on_input(Message::NameChanged).on_submit(Message::SubmitForm);
        ingredients = ingredients
            .on_input(Message::IngredientsChanged)
            .on_submit(Message::SubmitForm);
        calories = calories
            .on_input(Message::CaloriesChanged)
            .on_submit(Message::SubmitForm);
    }

    let picked = form
        .image_file
        .as_ref()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "No file chosen".to_string());

    let image_row = row![
        button("Upload Image")
            .on_press_maybe((!submitting).then_some(Message::PickImage))
            .style(button::secondary),
        text(picked).size(14),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let error: Element<'a, Message> = match &form.error {
        Some(err) => text(err.to_string())
            .size(14)
            .color(Color::from_rgb(0.86, 0.15, 0.15))
            .into(),
        None => horizontal_space().into(),
    };

    let actions = row![
        horizontal_space(),
        button("Cancel")
            .on_press_maybe((!submitting).then_some(Message::CloseModal))
            .style(button::secondary)
            .padding([10, 20]),
        button(submit_label)
            .on_press_maybe((!submitting).then_some(Message::SubmitForm))
            .style(button::primary)
            .padding([10, 24]),
    ]
    .spacing(12);

    let content = column![
        text(title).size(30),
        labeled("Recipe Name", name.into()),
        labeled("Upload Image", image_row.into()),
        labeled("Ingredients", ingredients.into()),
        labeled("Calories", calories.into()),
        error,
        actions,
    ]
    .spacing(18);

    container(content)
        .width(Length::Fixed(520.0))
        .padding(32)
        .style(container::rounded_box)
        .into()
}

fn labeled<'a>(label: &'a str, input: Element<'a, Message>) -> Element<'a, Message> {
    column![text(label).size(14), input].spacing(6).into()
}

/// Lay the dialog over the dashboard, dimming and blocking what is behind it
pub fn overlay<'a>(base: Element<'a, Message>, dialog: Element<'a, Message>) -> Element<'a, Message> {
    stack![
        base,
        opaque(center(opaque(dialog)).style(|_theme| container::Style {
            background: Some(
                Color {
                    a: 0.6,
                    ..Color::BLACK
                }
                .into()
            ),
            ..container::Style::default()
        }))
    ]
    .into()
}
