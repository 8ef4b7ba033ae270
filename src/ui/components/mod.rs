//! Component modules
//!
//! Contains the rendering components shared by every page

pub mod footer;
pub mod header;
pub mod left_nav;
pub mod logs;
pub mod pages;
