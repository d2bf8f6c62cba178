//! On-disk storage concerns.
//!
//! - **`resolver`**: maps request targets to files under the base directory,
//!   rejecting paths that escape it
//! - **`uploads`**: writes accepted upload entries and lists stored images

pub mod resolver;
pub mod uploads;
