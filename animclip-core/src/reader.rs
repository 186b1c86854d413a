//! Bounds-checked little-endian cursor over a binary stream.

use crate::codec::Decodable;
use crate::config::CodecConfig;
use crate::error::{CodecError, FormatError};
use crate::version::Version;

/// A binary reader over a borrowed byte slice.
///
/// The position is measured from the start of the slice, which is taken to be
/// the start of the whole stream; alignment is computed against it.
pub struct AssetReader<'a> {
    data: &'a [u8],
    position: usize,
    version: Version,
    config: CodecConfig,
}

impl<'a> AssetReader<'a> {
    /// Creates a reader at the start of `data` with default limits.
    pub fn new(data: &'a [u8], version: Version) -> Result<Self, CodecError> {
        Self::with_config(data, version, CodecConfig::default())
    }

    /// Creates a reader at the start of `data` with the given limits.
    pub fn with_config(
        data: &'a [u8],
        version: Version,
        config: CodecConfig,
    ) -> Result<Self, CodecError> {
        if !version.is_supported() {
            log::warn!("refusing to read stream of unsupported version {version}");
            return Err(CodecError::UnsupportedVersion(version));
        }
        Ok(AssetReader {
            data,
            position: 0,
            version,
            config,
        })
    }

    /// Moves the cursor to an absolute stream position.
    pub fn seek(&mut self, position: usize) -> Result<(), FormatError> {
        if position > self.data.len() {
            return Err(FormatError::Truncated {
                position: self.data.len(),
                needed: position - self.data.len(),
                remaining: 0,
            });
        }
        self.position = position;
        Ok(())
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Current position from the start of the stream.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Returns the next `len` bytes and advances the cursor.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        if len > self.remaining() {
            return Err(FormatError::Truncated {
                position: self.position,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.read_bytes(N)?);
        Ok(arr)
    }

    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, FormatError> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, FormatError> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Reads an int32 length prefix and validates it against `limit`.
    ///
    /// The cursor is left after the prefix.
    pub fn read_length(&mut self, what: &'static str, limit: usize) -> Result<usize, FormatError> {
        let position = self.position;
        let length = self.read_i32()?;
        let length = usize::try_from(length).map_err(|_| FormatError::NegativeLength {
            what,
            length,
            position,
        })?;
        if length > limit {
            return Err(FormatError::LengthTooLarge {
                what,
                length,
                limit,
                position,
            });
        }
        Ok(length)
    }

    /// Reads an int32-prefixed UTF-8 string. No alignment follows it.
    pub fn read_string(&mut self) -> Result<String, FormatError> {
        let length = self.read_length("string", self.config.max_string_len)?;
        let position = self.position;
        let bytes = self.read_bytes(length)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| FormatError::InvalidUtf8 { position })
    }

    /// Reads an element count followed by that many records.
    ///
    /// The count is checked against the configured limit and against the
    /// bytes left in the stream before anything is allocated.
    pub fn read_asset_array<T: Decodable>(&mut self) -> Result<Vec<T>, CodecError> {
        let position = self.position;
        let count = self.read_length("array", self.config.max_array_len)?;
        let fits = self.remaining() / T::MIN_ENCODED_LEN.max(1);
        if count > fits {
            return Err(FormatError::LengthTooLarge {
                what: "array",
                length: count,
                limit: fits,
                position,
            }
            .into());
        }

        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode(self)?);
        }
        Ok(items)
    }

    /// Skips padding up to the next 4-byte boundary of the stream.
    ///
    /// Returns the number of bytes skipped (0..=3).
    pub fn align_stream(&mut self) -> Result<usize, FormatError> {
        let padding = (4 - self.position % 4) % 4;
        self.read_bytes(padding)?;
        if padding > 0 {
            log::debug!("skipped {padding} alignment bytes at {}", self.position - padding);
        }
        Ok(padding)
    }
}
