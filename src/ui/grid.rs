use iced::widget::{column, container, text};
use iced::{Element, Length, Pixels};
use iced_aw::Wrap;

use super::card;
use crate::media::Thumbnails;
use crate::state::data::Recipe;
use crate::Message;

const CARD_SPACING: f32 = 24.0;

/// The menu: a count header and the wrapped grid of cards
pub fn view<'a>(recipes: &[&'a Recipe], thumbnails: &'a Thumbnails, filter: &str) -> Element<'a, Message> {
    let header = text(format!("Menu Items ({})", recipes.len())).size(24);

    if recipes.is_empty() {
        let empty = container(text(format!("No recipes found matching \"{}\"", filter)).size(20))
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(80);
        return column![header, empty].spacing(24).into();
    }

    let cards: Vec<Element<'a, Message>> = recipes
        .iter()
        .map(|&recipe| card::view(recipe, thumbnails.get(&recipe.image)))
        .collect();

    let grid = Wrap::with_elements(cards)
        .spacing(Pixels(CARD_SPACING))
        .line_spacing(Pixels(CARD_SPACING));

    column![header, grid].spacing(24).into()
}
