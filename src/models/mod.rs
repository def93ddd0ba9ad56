pub mod decision;
pub mod reading;
pub mod zone;

pub use decision::*;
pub use reading::*;
pub use zone::*;
