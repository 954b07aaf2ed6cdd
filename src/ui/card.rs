use iced::widget::{button, column, container, horizontal_space, image, row, text};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::media::Thumbnail;
use crate::state::data::Recipe;
use crate::Message;

/// Width of a card in the grid
pub const CARD_WIDTH: f32 = 260.0;

const IMAGE_HEIGHT: f32 = 180.0;

/// One recipe with its edit and delete actions
pub fn view<'a>(recipe: &'a Recipe, thumbnail: Option<&'a Thumbnail>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnail {
        Some(Thumbnail::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(IMAGE_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        Some(Thumbnail::Loading) => placeholder("Loading..."),
        Some(Thumbnail::Failed) | None => placeholder("No Image"),
    };

    let title = row![
        text(&recipe.name).size(20).width(Length::Fill),
        container(text(format!("{} cal", recipe.calories_per_serving)).size(12))
            .padding([4, 8])
            .style(container::rounded_box),
    ]
    .spacing(8)
    .align_y(Alignment::Start);

    let ingredients = text(recipe.ingredient_summary())
        .size(14)
        .color(Color::from_rgb(0.42, 0.45, 0.5));

    let actions = row![
        button("Edit")
            .on_press(Message::OpenEdit(recipe.id))
            .style(button::secondary),
        button("Delete")
            .on_press(Message::Delete(recipe.id))
            .style(button::danger),
        horizontal_space(),
    ]
    .spacing(8);

    container(column![picture, title, ingredients, actions].spacing(12))
        .width(Length::Fixed(CARD_WIDTH))
        .padding(16)
        .style(container::bordered_box)
        .into()
}

fn placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(14))
        .width(Length::Fill)
        .height(Length::Fixed(IMAGE_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(IMAGE_HEIGHT))
        .style(container::rounded_box)
        .into()
}
