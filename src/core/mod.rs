pub mod admin;
pub mod app;
pub mod config;
pub mod image;
pub mod normalize;
pub mod paths;
pub mod segment;
pub mod session;
pub mod solver;
pub mod typeset;
