mod render;
mod review;
mod take;

pub use render::render;
