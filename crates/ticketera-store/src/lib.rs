//! ticketera-store - Filesystem-backed session storage.

mod file;

pub use file::FileSessionStore;
