//! Copy-on-write, zero-compressed packet buffer.
//!
//! A [`BufferView`] is a lightweight, cheaply cloned window over shared
//! byte [`storage`]; growing one view reallocates only when growth would
//! disturb bytes a sibling view still depends on, making sharing
//! transparent copy-on-write. A view may also represent a run of zero
//! bytes that consumes no physical storage at all (the "zero-compressed"
//! region), useful for padding and placeholder payloads in a network
//! simulation without paying for the memory. [`BufferIterator`] reads and
//! writes through that geometry with a cursor, in any of three byte
//! orders.

mod error;
mod iterator;
mod storage;
mod view;

pub use error::{Error, Result};
pub use iterator::{BufferIterator, ByteOrder};
pub use view::BufferView;
