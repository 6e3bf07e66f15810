//! Self-play game generation.

mod cancel;
mod config;
mod driver;
mod record;
mod repetition;
mod sampling;
mod sink;
mod start;

pub use cancel::*;
pub use config::*;
pub use driver::*;
pub use record::*;
pub use repetition::*;
pub use sampling::*;
pub use sink::*;
pub use start::*;
