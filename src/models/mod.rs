pub mod selection;
pub mod status;

pub use selection::*;
pub use status::*;
