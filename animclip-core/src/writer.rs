use crate::codec::Encodable;
use crate::error::{CodecError, FormatError};
use crate::version::Version;

/// A binary writer producing a little-endian stream.
///
/// Mirror of [`AssetReader`](crate::AssetReader): every write has a matching
/// read, and alignment pads with zero bytes relative to the stream start.
pub struct AssetWriter {
    buf: Vec<u8>,
    version: Version,
}

impl AssetWriter {
    /// Creates an empty writer for the given format version.
    pub fn new(version: Version) -> Result<Self, CodecError> {
        Self::with_buffer(Vec::new(), version)
    }

    /// Creates a writer appending to an existing stream.
    pub fn with_buffer(buf: Vec<u8>, version: Version) -> Result<Self, CodecError> {
        if !version.is_supported() {
            log::warn!("refusing to write stream of unsupported version {version}");
            return Err(CodecError::UnsupportedVersion(version));
        }
        Ok(AssetWriter { buf, version })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Current position from the start of the stream.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an int32 length prefix.
    pub fn write_length(&mut self, what: &'static str, length: usize) -> Result<(), FormatError> {
        let prefix = i32::try_from(length).map_err(|_| FormatError::LengthTooLarge {
            what,
            length,
            limit: i32::MAX as usize,
            position: self.position(),
        })?;
        self.write_i32(prefix);
        Ok(())
    }

    /// Writes an int32-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> Result<(), FormatError> {
        self.write_length("string", value.len())?;
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    /// Writes an element count followed by each record.
    pub fn write_asset_array<T: Encodable>(&mut self, items: &[T]) -> Result<(), CodecError> {
        self.write_length("array", items.len())?;
        for item in items {
            item.encode(self)?;
        }
        Ok(())
    }

    /// Pads with zeros up to the next 4-byte boundary of the stream.
    ///
    /// Returns the number of bytes written (0..=3).
    pub fn align_stream(&mut self) -> usize {
        let padding = (4 - self.buf.len() % 4) % 4;
        self.buf.resize(self.buf.len() + padding, 0);
        if padding > 0 {
            log::debug!("wrote {padding} alignment bytes at {}", self.buf.len() - padding);
        }
        padding
    }
}
