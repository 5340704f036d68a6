mod postgres;

#[cfg(feature = "in-memory")]
mod memory;

pub use self::postgres::*;

#[cfg(feature = "in-memory")]
pub use self::memory::*;
