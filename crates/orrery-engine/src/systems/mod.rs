pub mod billboard;
pub mod lighting;
pub mod picking;
pub mod render;
