pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Daemon, File, Health, Init, User, Version};
