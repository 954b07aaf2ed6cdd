/// Page chrome: navigation bar, hero search, footer,
/// and the full-window loading and error states
use iced::widget::{button, column, container, horizontal_space, row, text, text_input};
use iced::{Alignment, Color, Element, Length};

use crate::Message;

/// Title bar with the add button
pub fn navbar<'a>() -> Element<'a, Message> {
    row![
        text("🍕 Pizza Shop").size(28),
        horizontal_space(),
        button("+ Add Recipe")
            .on_press(Message::OpenCreate)
            .padding([10, 24])
            .style(button::primary),
    ]
    .padding([16, 24])
    .align_y(Alignment::Center)
    .into()
}

/// Tagline and the search box
pub fn hero(filter: &str) -> Element<'_, Message> {
    let search = text_input("Search for pizza, pasta...", filter)
        .on_input(Message::FilterChanged)
        .padding(14)
        .size(18)
        .width(Length::Fixed(520.0));

    container(
        column![
            text("Crave it. Make it.").size(44),
            text("Discover and create the best pizza recipes in town.")
                .size(18)
                .color(Color::from_rgb(0.6, 0.6, 0.65)),
            search,
        ]
        .spacing(16)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .center_x(Length::Fill)
    .padding(48)
    .style(container::rounded_box)
    .into()
}

pub fn footer<'a>() -> Element<'a, Message> {
    row![
        text("🍕 PizzaShop").size(20),
        horizontal_space(),
        text("© 2026 PizzaShop Inc. All rights reserved.").size(14),
    ]
    .padding([24, 24])
    .align_y(Alignment::Center)
    .into()
}

pub fn loading<'a>() -> Element<'a, Message> {
    full_window(text("Loading recipes...").size(24).into())
}

/// Shown when the menu could not be fetched. There is no retry.
pub fn error<'a>() -> Element<'a, Message> {
    full_window(
        text("Error loading recipes")
            .size(24)
            .color(Color::from_rgb(0.94, 0.27, 0.27))
            .into(),
    )
}

fn full_window(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
