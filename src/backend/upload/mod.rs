//! Upload Module
//!
//! Image uploads for posts.
//!
//! # Module Structure
//!
//! ```text
//! upload/
//! ├── mod.rs     - Module exports
//! ├── adapter.rs - Multipart parsing, MIME filter, single-file rule
//! └── images.rs  - Image directory, naming, cleanup
//! ```

/// Multipart adapter
pub mod adapter;

/// Image directory management
pub mod images;

pub use adapter::{read_upload, UploadForm, UploadedFile, IMAGE_FIELD};
pub use images::ImageStore;
