pub mod photo_mapper;
