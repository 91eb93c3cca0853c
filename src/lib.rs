pub mod cli;
pub mod commits;
pub mod error;
pub mod load;
pub mod model;
pub mod projects;
pub mod scale;
pub mod state;
pub mod stats;
pub mod tui;
pub mod util;
pub mod window;
