pub mod blocking;
pub mod cooperative;
mod handle;
mod options;
mod protocol;

pub use blocking::FileLock;
pub use cooperative::AsyncFileLock;
pub use handle::LockFile;
pub use options::{LockOptions, DEFAULT_POLL_INTERVAL};
