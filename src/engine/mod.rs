// engine/mod.rs - 目录引擎
//! 提供统一的目录服务入口

pub mod core;
pub mod builder;

pub use self::core::*;
pub use self::builder::*;
