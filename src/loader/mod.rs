pub mod image_loader;
pub mod sample_loader;
