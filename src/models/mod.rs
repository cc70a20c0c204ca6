pub mod enums;
pub mod practitioner;
pub mod raw;

pub use enums::*;
pub use practitioner::*;
pub use raw::RawRecord;
