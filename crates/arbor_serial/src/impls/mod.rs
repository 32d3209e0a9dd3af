//! [`Attr`](crate::attr::Attr) and [`FromValue`](crate::object::FromValue)
//! implementations for core, alloc and std types.
//!
//! ## Coverage
//!
//! - `()` `bool` `f32` `f64`
//! - `i8` `i16` `i32` `i64` `isize`
//! - `u8` `u16` `u32` `u64` `usize`
//! - `String` `&'static str` (serialize only) `Cow<'static, str>`
//! - `Option<T>` `Box<T>`
//! - `Vec<T>` `VecDeque<T>` `[T; N]` and tuples up to four elements
//! - `BTreeSet<T>` `BTreeMap<K, V>`
//! - "std" feature: `HashSet<T>` `HashMap<K, V>`
//! - `Value` `ValueMap` (pass-through)
//!
//! Map keys go through [`MapKey`](crate::attr::MapKey), implemented for
//! `String`, `Cow<'static, str>` and every integer type.

mod map;
mod primitive;
mod sequence;
mod set;
mod value;
mod wrapper;
