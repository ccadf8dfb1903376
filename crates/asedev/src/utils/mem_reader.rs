//! Bounds-checked little-endian reading over in-memory byte slices.

use std::borrow::Cow;

use super::errors::{BlockContext, BoxError, InvalidDataError};

#[derive(Debug, thiserror::Error)]
#[error("Not enough data in buffer. Needed {required}, but only {available} available.")]
struct NotEnoughData {
    required: usize,
    available: usize,
}

macro_rules! impl_read_int {
    ($name:ident, $ty:ty) => {
        fn $name(&mut self) -> Result<$ty> {
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            self.read_exact(&mut buf)?;
            Ok(<$ty>::from_le_bytes(buf))
        }
    };
}

pub type Result<T> = std::result::Result<T, InvalidDataError>;

pub trait MemReader {
    #[must_use]
    fn tell(&self) -> usize;

    #[must_use]
    fn data_size(&self) -> usize;

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Create an `InvalidDataError` at the current position, carrying the
    /// reader's scope chain.
    fn create_invalid_data_error<Err>(&self, message: Err) -> InvalidDataError
    where
        Err: Into<BoxError>;

    /// Split off the next `len` bytes as a reader of their own, advancing this
    /// reader past them.
    ///
    /// The sub-reader cannot see bytes outside its range, so a decoder handed
    /// one can never run into the following block.
    fn read_to_subreader(&mut self, context: &str, len: usize) -> Result<SliceMemReader<'_>>;

    fn create_invalid_data_error_msg<'a, Msg>(&self, message: Msg) -> InvalidDataError
    where
        Msg: Into<Cow<'a, str>>,
    {
        self.create_invalid_data_error(message.into().into_owned())
    }

    #[must_use]
    fn remaining(&self) -> usize {
        self.data_size() - self.tell()
    }

    #[must_use]
    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn skip(&mut self, context: &str, len: usize) -> Result<()> {
        self.read_to_subreader(context, len)?;
        Ok(())
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0; len];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn read_remaining(&mut self) -> Result<Vec<u8>> {
        self.read_bytes(self.remaining())
    }

    /// Reads a `u16` byte length followed by that many bytes of UTF-8.
    fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16_le()?;
        let bytes = self.read_bytes(usize::from(len))?;
        String::from_utf8(bytes).map_err(|err| self.create_invalid_data_error(err))
    }

    impl_read_int!(read_u8, u8);
    impl_read_int!(read_i8, i8);
    impl_read_int!(read_u16_le, u16);
    impl_read_int!(read_i16_le, i16);
    impl_read_int!(read_u32_le, u32);
    impl_read_int!(read_i32_le, i32);
}

impl<M: MemReader> MemReader for &mut M {
    fn tell(&self) -> usize {
        (**self).tell()
    }

    fn data_size(&self) -> usize {
        (**self).data_size()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact(buf)
    }

    fn create_invalid_data_error<Err>(&self, message: Err) -> InvalidDataError
    where
        Err: Into<BoxError>,
    {
        (**self).create_invalid_data_error(message)
    }

    fn read_to_subreader(&mut self, context: &str, len: usize) -> Result<SliceMemReader<'_>> {
        (**self).read_to_subreader(context, len)
    }
}

/// A [`MemReader`] over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct SliceMemReader<'a> {
    data: &'a [u8],
    position: usize,
    /// Absolute offset of `data[0]` within the outermost buffer.
    base: usize,
    context: BlockContext,
}

impl<'a> SliceMemReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            base: 0,
            context: BlockContext::new_root(data.len()),
        }
    }

    fn check_available(&self, required: usize) -> Result<()> {
        let available = self.remaining();
        if required > available {
            return Err(self.create_invalid_data_error(NotEnoughData {
                required,
                available,
            }));
        }
        Ok(())
    }
}

impl MemReader for SliceMemReader<'_> {
    fn tell(&self) -> usize {
        self.position
    }

    fn data_size(&self) -> usize {
        self.data.len()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.check_available(buf.len())?;
        let end = self.position + buf.len();
        buf.copy_from_slice(&self.data[self.position..end]);
        self.position = end;
        Ok(())
    }

    fn create_invalid_data_error<Err>(&self, message: Err) -> InvalidDataError
    where
        Err: Into<BoxError>,
    {
        self.context.create_error(self.base + self.position, message)
    }

    fn read_to_subreader(&mut self, context: &str, len: usize) -> Result<SliceMemReader<'_>> {
        self.check_available(len)?;
        let start = self.position;
        let end = start + len;
        self.position = end;
        Ok(SliceMemReader {
            data: &self.data[start..end],
            position: 0,
            base: self.base + start,
            context: self.context.nested(self.base + start, self.base + end, context),
        })
    }
}
