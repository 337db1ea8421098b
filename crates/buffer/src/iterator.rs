//! Cursor-based typed reads and writes over a [`BufferView`], in native,
//! little-endian, or big-endian byte order.
//!
//! Grounded on the read/write atom family in
//! `examples/r3e-network-neo-rs/crates/io/src/memory_reader.rs` and
//! `binary_writer.rs` (paired `read_uN`/`read_uN_big_endian`,
//! `write_uN` methods advancing a cursor), generalised here to also
//! synthesise zero bytes for reads that fall in or straddle the owning
//! view's zero-compressed region, and to carry an explicit byte-order
//! argument rather than one method per order.
//!
//! An iterator's validity ends the moment the [`BufferView`] it was built
//! from is mutated. In debug builds this is enforced by a generation
//! counter checked on every access; in release builds a stale iterator
//! silently reads/writes through geometry that no longer matches the
//! view, which is the implementer's contract to avoid.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::view::BufferView;

/// Byte order for multi-byte reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Native,
    Little,
    Big,
}

/// A movable cursor over a [`BufferView`]'s logical byte range.
pub struct BufferIterator {
    view: BufferView,
    cursor: usize,
    generation_at_creation: u64,
}

macro_rules! read_uint {
    ($name:ident, $ty:ty, $width:expr) => {
        pub fn $name(&mut self, order: ByteOrder) -> Result<$ty> {
            let bytes = self.read_raw($width)?;
            let mut buf = [0u8; $width];
            buf.copy_from_slice(&bytes);
            Ok(match order {
                ByteOrder::Native => <$ty>::from_ne_bytes(buf),
                ByteOrder::Little => <$ty>::from_le_bytes(buf),
                ByteOrder::Big => <$ty>::from_be_bytes(buf),
            })
        }
    };
}

macro_rules! write_uint {
    ($name:ident, $ty:ty, $width:expr) => {
        pub fn $name(&mut self, value: $ty, order: ByteOrder) -> Result<()> {
            let bytes = match order {
                ByteOrder::Native => value.to_ne_bytes(),
                ByteOrder::Little => value.to_le_bytes(),
                ByteOrder::Big => value.to_be_bytes(),
            };
            self.write_raw(&bytes)
        }
    };
}

impl BufferIterator {
    pub(crate) fn new(view: BufferView) -> Self {
        let generation_at_creation = view.generation.get();
        BufferIterator {
            view,
            cursor: 0,
            generation_at_creation,
        }
    }

    fn check_valid(&self) {
        debug_assert_eq!(
            self.view.generation.get(),
            self.generation_at_creation,
            "buffer iterator used after its owning view was mutated"
        );
    }

    /// The logical size of the underlying view.
    pub fn len(&self) -> usize {
        self.view.size()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// The cursor's current offset from the start of the view.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The number of bytes still readable/writable ahead of the cursor.
    pub fn remaining(&self) -> usize {
        self.len() - self.cursor
    }

    /// Moves the cursor to an absolute offset, clamped to `[0, len()]`.
    pub fn seek(&mut self, position: usize) {
        self.check_valid();
        self.cursor = position.min(self.len());
    }

    /// Moves the cursor by `delta` (negative moves backward), clamped to
    /// `[0, len()]`.
    pub fn advance(&mut self, delta: isize) {
        self.check_valid();
        let target = (self.cursor as isize + delta).clamp(0, self.len() as isize);
        self.cursor = target as usize;
    }

    fn logical_position(&self, offset: usize) -> usize {
        self.view.start + offset
    }

    fn read_raw(&mut self, width: usize) -> Result<[u8; 8]> {
        self.check_valid();
        if self.cursor + width > self.len() {
            return Err(Error::InvalidArgument(format!(
                "read of {width} bytes at offset {} exceeds length {}",
                self.cursor,
                self.len()
            )));
        }
        let mut out = [0u8; 8];
        for i in 0..width {
            out[i] = self.view.read_logical_byte(self.logical_position(self.cursor + i));
        }
        self.cursor += width;
        Ok(out)
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.check_valid();
        let width = bytes.len();
        if self.cursor + width > self.len() {
            return Err(Error::InvalidArgument(format!(
                "write of {width} bytes at offset {} exceeds length {}",
                self.cursor,
                self.len()
            )));
        }
        for (i, byte) in bytes.iter().enumerate() {
            let pos = self.logical_position(self.cursor + i);
            self.view.write_logical_byte(pos, *byte)?;
        }
        self.cursor += width;
        Ok(())
    }

    /// Reads a single byte and advances the cursor by one.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_raw(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_raw(1)?[0] as i8)
    }

    /// Writes a single byte and advances the cursor by one.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_raw(&[value])
    }

    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_raw(&[value as u8])
    }

    read_uint!(read_u16, u16, 2);
    read_uint!(read_u32, u32, 4);
    read_uint!(read_u64, u64, 8);

    write_uint!(write_u16, u16, 2);
    write_uint!(write_u32, u32, 4);
    write_uint!(write_u64, u64, 8);

    pub fn read_i16(&mut self, order: ByteOrder) -> Result<i16> {
        Ok(self.read_u16(order)? as i16)
    }

    pub fn read_i32(&mut self, order: ByteOrder) -> Result<i32> {
        Ok(self.read_u32(order)? as i32)
    }

    pub fn read_i64(&mut self, order: ByteOrder) -> Result<i64> {
        Ok(self.read_u64(order)? as i64)
    }

    pub fn write_i16(&mut self, value: i16, order: ByteOrder) -> Result<()> {
        self.write_u16(value as u16, order)
    }

    pub fn write_i32(&mut self, value: i32, order: ByteOrder) -> Result<()> {
        self.write_u32(value as u32, order)
    }

    pub fn write_i64(&mut self, value: i64, order: ByteOrder) -> Result<()> {
        self.write_u64(value as u64, order)
    }

    /// Reads an `f32`, bit-cast through the same pipe as `read_u32`.
    pub fn read_f32(&mut self, order: ByteOrder) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32(order)?))
    }

    pub fn write_f32(&mut self, value: f32, order: ByteOrder) -> Result<()> {
        self.write_u32(value.to_bits(), order)
    }

    /// Reads an `f64`, bit-cast through the same pipe as `read_u64`.
    pub fn read_f64(&mut self, order: ByteOrder) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64(order)?))
    }

    pub fn write_f64(&mut self, value: f64, order: ByteOrder) -> Result<()> {
        self.write_u64(value.to_bits(), order)
    }

    /// Reads `dest.len()` bytes into `dest`, advancing the cursor.
    pub fn read_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.check_valid();
        if self.cursor + dest.len() > self.len() {
            return Err(Error::InvalidArgument(format!(
                "read of {} bytes at offset {} exceeds length {}",
                dest.len(),
                self.cursor,
                self.len()
            )));
        }
        for (i, slot) in dest.iter_mut().enumerate() {
            *slot = self.view.read_logical_byte(self.logical_position(self.cursor + i));
        }
        self.cursor += dest.len();
        Ok(())
    }

    /// Writes `src` at the cursor, advancing it.
    pub fn write_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.write_raw(src)
    }
}

impl BufferView {
    /// Creates an iterator over this view's full logical range, positioned
    /// at the start.
    pub fn iter(&self) -> BufferIterator {
        BufferIterator::new(self.shallow_copy())
    }

    fn shallow_copy(&self) -> BufferView {
        BufferView {
            storage: Rc::clone(&self.storage),
            start: self.start,
            zero_start: self.zero_start,
            zero_end: self.zero_end,
            end: self.end,
            generation: Rc::clone(&self.generation),
        }
    }
}
