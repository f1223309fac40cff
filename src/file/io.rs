//! Little-endian, bounds-checked reading and writing of primitive values.
//!
//! Support tables are a flat little-endian byte format. This module provides the
//! [`crate::file::io::ScalarIO`] trait together with the free functions the
//! [`crate::file::parser::Parser`] and the table writer build on:
//!
//! - [`crate::file::io::read_le_at`] - read a value and advance an offset
//! - [`crate::file::io::push_le`] - append to a growable buffer
//! - [`crate::file::io::push_compressed_uint`] - append an ECMA-335 compressed unsigned integer
//!
//! # Error Handling
//!
//! Reads return [`crate::Result<T>`] and fail with [`crate::Error::OutOfBounds`] if there
//! are insufficient bytes in the buffer.
//!
//! # Examples
//!
//! ```rust
//! use netoffice_compat::file::io::{read_le_at, push_le};
//!
//! let mut data = Vec::new();
//! push_le(&mut data, 1u16);
//! push_le(&mut data, 3u32);
//!
//! let mut offset = 0;
//! let first: u16 = read_le_at(&data, &mut offset)?;  // offset: 0 -> 2
//! let second: u32 = read_le_at(&data, &mut offset)?; // offset: 2 -> 6
//! assert_eq!((first, second, offset), (1, 3, 6));
//! # Ok::<(), netoffice_compat::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Trait for primitive types that can be safely read from and written to byte buffers.
///
/// Each implementation names the fixed-size byte array of the type through `Bytes`
/// (e.g. `[u8; 4]` for `u32`) and converts it in little-endian order.
pub trait ScalarIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_scalar_io {
    ($($ty:ty => $len:expr),* $(,)?) => {
        $(
            impl ScalarIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_scalar_io! {
    u8 => 1, i8 => 1,
    u16 => 2, i16 => 2,
    u32 => 4, i32 => 4,
    u64 => 8, i64 => 8,
    f32 => 4, f64 => 8,
}

/// Safely reads a value of type `T` in little-endian byte order at `offset`, advancing it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le_at<T: ScalarIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Appends a value of type `T` in little-endian byte order to a growable buffer.
pub fn push_le<T: ScalarIO>(data: &mut Vec<u8>, value: T) {
    data.extend_from_slice(value.to_le_bytes().as_ref());
}

/// Appends an ECMA-335 II.23.2 compressed unsigned integer.
///
/// Values up to `0x7F` take one byte, up to `0x3FFF` two bytes and up to
/// `0x1FFF_FFFF` four bytes.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] for values that cannot be compressed.
pub fn push_compressed_uint(data: &mut Vec<u8>, value: u32) -> Result<()> {
    match value {
        0..=0x7F => data.push(value as u8),
        0x80..=0x3FFF => {
            data.push(0x80 | (value >> 8) as u8);
            data.push((value & 0xFF) as u8);
        }
        0x4000..=0x1FFF_FFFF => {
            data.push(0xC0 | (value >> 24) as u8);
            data.push(((value >> 16) & 0xFF) as u8);
            data.push(((value >> 8) & 0xFF) as u8);
            data.push((value & 0xFF) as u8);
        }
        _ => {
            return Err(malformed_error!(
                "Value too large for compressed encoding - {}",
                value
            ))
        }
    }
    Ok(())
}

/// Appends a compressed-length prefixed UTF-8 string.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the string is too long to be prefixed.
pub fn push_compressed_string_utf8(data: &mut Vec<u8>, value: &str) -> Result<()> {
    let Ok(length) = u32::try_from(value.len()) else {
        return Err(malformed_error!("String too long - {} bytes", value.len()));
    };
    push_compressed_uint(data, length)?;
    data.extend_from_slice(value.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn read_le_at_widths() {
        let mut offset = 0;
        assert_eq!(read_le_at::<u16>(&TEST_BUFFER, &mut offset).unwrap(), 0x0201);
        assert_eq!(read_le_at::<i16>(&TEST_BUFFER, &mut offset).unwrap(), 0x0403);
        assert_eq!(read_le_at::<u32>(&TEST_BUFFER, &mut offset).unwrap(), 0x0807_0605);

        let mut offset = 0;
        assert_eq!(
            read_le_at::<u64>(&TEST_BUFFER, &mut offset).unwrap(),
            0x0807_0605_0403_0201
        );
    }

    #[test]
    fn read_le_at_advances() {
        let mut offset = 2;
        let result = read_le_at::<u16>(&TEST_BUFFER, &mut offset).unwrap();
        assert_eq!(result, 0x0403);
        assert_eq!(offset, 4);
    }

    #[test]
    fn read_le_past_end() {
        let mut offset = 6;
        assert!(matches!(
            read_le_at::<u32>(&TEST_BUFFER, &mut offset),
            Err(OutOfBounds)
        ));
        assert_eq!(offset, 6);
    }

    #[test]
    fn push_le_values() {
        let mut data = Vec::new();
        push_le(&mut data, 0x0403_0201u32);
        push_le(&mut data, 1.0f32);
        assert_eq!(&data[..4], &[0x01, 0x02, 0x03, 0x04]);
        let mut offset = 4;
        assert_eq!(read_le_at::<f32>(&data, &mut offset).unwrap(), 1.0);
    }

    #[test]
    fn compressed_uint_encodings() {
        let mut data = Vec::new();
        push_compressed_uint(&mut data, 0x03).unwrap();
        push_compressed_uint(&mut data, 0x80).unwrap();
        push_compressed_uint(&mut data, 0x4000).unwrap();
        assert_eq!(data, [0x03, 0x80, 0x80, 0xC0, 0x00, 0x40, 0x00]);

        assert!(push_compressed_uint(&mut data, 0x2000_0000).is_err());
    }
}
