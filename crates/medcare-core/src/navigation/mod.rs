//! Page routing and sidebar navigation state.

pub mod menu;
pub mod page;
pub mod state;

pub use menu::{main_menu, MenuItem};
pub use page::Page;
pub use state::{MenuOutcome, NavigationState};
