//! Contour and pseudocolor figures for multi-step fast-charging policy spaces.
//!
//! A policy is the current of the first three constant-current steps (CC1, CC2,
//! CC3); the fourth step (CC4) follows from a shared charging budget. The crate
//! draws that CC4 surface in 2x3 panels (one per CC3 value) with sampled policies
//! on top.

pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod figure;
