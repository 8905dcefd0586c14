#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

#[macro_use]
extern crate log;

mod command;
mod decimator;
mod distributor;
mod mixer;
mod params;
mod traits;

pub use command::*;
pub use decimator::*;
pub use distributor::*;
pub use mixer::*;
pub use params::*;
pub use traits::*;
