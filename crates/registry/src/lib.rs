pub mod export;
pub mod feature;
pub mod layer;
pub mod registry;
pub mod store;
pub mod style;

pub use export::*;
pub use feature::*;
pub use layer::*;
pub use registry::*;
pub use store::*;
pub use style::*;
