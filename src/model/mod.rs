//! # Data Model
//!
//! The typed pieces of the two resources the service interprets, and the
//! validation the store runs on every insert and update. Validation works
//! over the raw JSON document so merge-patched updates are re-checked in
//! full.

pub mod bootcamp;
pub mod course;

pub use bootcamp::{Location, CAREERS};
pub use course::MinimumSkill;
