pub mod photo_row;

pub use photo_row::{NewPhotoRow, PhotoProjectionRow, PhotoRow};
