//! Protocol enumerations: request methods, status codes, versions
mod method;
mod status;
mod version;

pub use self::method::Method;
pub use self::status::{Status, reason_phrase};
pub use self::version::Version;
