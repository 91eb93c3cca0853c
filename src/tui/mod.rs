pub mod draw;
pub mod input;
pub mod layout;
pub mod run;
pub mod views;

pub use draw::*;
pub use input::*;
pub use layout::*;
pub use run::run;
