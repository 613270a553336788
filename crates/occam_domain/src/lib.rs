mod error;
mod evaluation;
mod intent;
mod message;
mod page;
mod scenario;
mod services;

pub use error::*;
pub use evaluation::*;
pub use intent::*;
pub use message::*;
pub use page::*;
pub use scenario::*;
pub use services::*;
