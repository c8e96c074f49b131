pub mod image_dto;

pub use image_dto::{ImageUpload, UploadImageDto, UploadedImageDto};
