/// User interface module
///
/// - Header, hero search box, loading and error pages (page.rs)
/// - Recipe cards (card.rs)
/// - The wrapped card grid (grid.rs)
/// - The create/edit modal and its form (modal.rs)

pub mod card;
pub mod grid;
pub mod modal;
pub mod page;
