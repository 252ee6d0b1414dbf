//! Template engine adapters.

pub mod mustache;

pub use self::mustache::MustacheEngine;
