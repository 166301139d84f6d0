#[macro_use]
extern crate log;

mod error;
mod executor;
mod layout;
mod paths;
mod platform;
mod plugin;
mod stager;
mod step;
mod target;

pub use error::*;
pub use executor::*;
pub use layout::*;
pub use paths::*;
pub use platform::*;
pub use plugin::*;
pub use stager::*;
pub use step::*;
pub use target::*;
