pub mod build_info;
pub mod cli;
pub mod decomposition;
pub mod domain;
pub mod equation;
pub mod error;
pub mod image;
pub mod orientation;
pub mod scaling;
pub mod solution;
pub mod solver;
pub mod stencil;
pub mod transport;
pub mod util;
