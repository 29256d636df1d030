//! # Representing linear programs
//!
//! Models are built from variables, expressions and columns, handed to a solver and answered with
//! a solution.
pub mod elements;
pub mod expression;
pub mod model;
pub mod solution;
