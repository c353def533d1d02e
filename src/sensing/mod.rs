pub mod dominant;

pub use dominant::dominant_colors;
