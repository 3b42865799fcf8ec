mod reference;
mod s3;

pub use self::reference::*;
pub use self::s3::*;
