pub mod controller;
pub mod state;
pub mod view;

pub use controller::{FetchCompletion, PageController};
pub use state::ReaderState;
pub use view::TokenView;
