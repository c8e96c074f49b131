pub mod item_dto;

pub use item_dto::{ItemRequestDto, ItemResponseDto};
