mod photo_repo;

pub use photo_repo::*;
