pub mod conservation;
pub mod conversion;
pub mod definition;

pub use conservation::*;
pub use conversion::*;
pub use definition::*;
