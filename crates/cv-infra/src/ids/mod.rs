mod random_photo_id;

pub use random_photo_id::RandomPhotoIdGenerator;
