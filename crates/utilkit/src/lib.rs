//! Small lodash-style helpers.
//!
//! One flat function surface per domain: [`array`], [`string`], [`number`],
//! [`math`], [`date`], [`object`], [`function`] and [`types`]. Object and type
//! helpers work over [`serde_json::Value`].

pub mod array;
pub mod date;
pub mod function;
pub mod math;
pub mod number;
pub mod object;
pub mod string;
pub mod types;
