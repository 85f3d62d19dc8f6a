//! Lifecycle CO2-equivalent emissions of electric and diesel vehicles on the German market.

pub mod core;
pub mod error;
pub mod quantity;
