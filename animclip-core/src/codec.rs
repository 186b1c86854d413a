use crate::error::CodecError;
use crate::reader::AssetReader;
use crate::writer::AssetWriter;

/// A value that can be read from a binary stream.
pub trait Decodable: Sized {
    /// Smallest number of bytes one encoded value can occupy.
    ///
    /// Used to reject array counts that cannot fit in the remaining stream.
    const MIN_ENCODED_LEN: usize;

    /// Reads one value, leaving the cursor at the end of the record.
    fn decode(reader: &mut AssetReader<'_>) -> Result<Self, CodecError>;
}

/// A value that can be written to a binary stream.
pub trait Encodable {
    /// Writes one value in the exact order [`Decodable::decode`] reads it.
    fn encode(&self, writer: &mut AssetWriter) -> Result<(), CodecError>;
}

macro_rules! impl_codec_primitive {
    ($t:ty, $len:expr, $read:ident, $write:ident) => {
        impl Decodable for $t {
            const MIN_ENCODED_LEN: usize = $len;

            fn decode(reader: &mut AssetReader<'_>) -> Result<Self, CodecError> {
                Ok(reader.$read()?)
            }
        }

        impl Encodable for $t {
            fn encode(&self, writer: &mut AssetWriter) -> Result<(), CodecError> {
                writer.$write(*self);
                Ok(())
            }
        }
    };
}

impl_codec_primitive!(i32, 4, read_i32, write_i32);
impl_codec_primitive!(i64, 8, read_i64, write_i64);
impl_codec_primitive!(f32, 4, read_f32, write_f32);

impl Decodable for String {
    const MIN_ENCODED_LEN: usize = 4;

    fn decode(reader: &mut AssetReader<'_>) -> Result<Self, CodecError> {
        Ok(reader.read_string()?)
    }
}

impl Encodable for String {
    fn encode(&self, writer: &mut AssetWriter) -> Result<(), CodecError> {
        Ok(writer.write_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn string_array_roundtrip() {
        let version = Version::new(2019, 1, 0);
        let items = vec!["a".to_string(), String::new(), "längd".to_string()];

        let mut writer = AssetWriter::new(version).unwrap();
        writer.write_asset_array(&items).unwrap();
        let bytes = writer.into_bytes();

        let mut reader = AssetReader::new(&bytes, version).unwrap();
        let recovered: Vec<String> = reader.read_asset_array().unwrap();
        assert_eq!(recovered, items);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn float_bits_preserved() {
        let version = Version::new(2019, 1, 0);
        let mut writer = AssetWriter::new(version).unwrap();
        (-0.0f32).encode(&mut writer).unwrap();
        let bytes = writer.into_bytes();

        let mut reader = AssetReader::new(&bytes, version).unwrap();
        let value = f32::decode(&mut reader).unwrap();
        assert_eq!(value.to_bits(), (-0.0f32).to_bits());
    }
}
