pub mod digest;
pub mod feed;
pub mod image;

pub use digest::{DuplicateGroup, FileDigest};
pub use feed::{FeedEntry, FeedPage};
pub use image::{DownloadResult, ImageRef};
