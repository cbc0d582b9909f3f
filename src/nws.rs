mod client;
mod field;
mod observation;

pub use client::*;
pub use field::*;
pub use observation::*;
