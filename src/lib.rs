pub mod io;
pub mod model;
pub mod store;
pub mod tui;
pub mod util;
pub mod view;
