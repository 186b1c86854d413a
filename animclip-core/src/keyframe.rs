use crate::codec::{Decodable, Encodable};
use crate::dependency::Dependent;
use crate::error::CodecError;
use crate::export::{Exportable, Node};
use crate::pptr::PPtr;
use crate::reader::AssetReader;
use crate::type_tree::{Described, TypeTreeNode};
use crate::version::Version;
use crate::writer::AssetWriter;

pub const TIME_NAME: &str = "time";
pub const VALUE_NAME: &str = "value";

/// One sample of an object-reference curve: at `time`, the property
/// points at `value`.
///
/// Equality compares the bit pattern of `time`, so a keyframe read back from
/// its own encoding is always equal to it, NaN times included.
#[derive(Debug, Clone, Copy)]
pub struct PPtrKeyframe {
    pub time: f32,
    pub value: PPtr,
}

impl PartialEq for PPtrKeyframe {
    fn eq(&self, other: &Self) -> bool {
        self.time.to_bits() == other.time.to_bits() && self.value == other.value
    }
}

impl Eq for PPtrKeyframe {}

impl PPtrKeyframe {
    pub fn new(time: f32, value: PPtr) -> Self {
        PPtrKeyframe { time, value }
    }
}

impl Decodable for PPtrKeyframe {
    const MIN_ENCODED_LEN: usize = f32::MIN_ENCODED_LEN + PPtr::MIN_ENCODED_LEN;

    fn decode(reader: &mut AssetReader<'_>) -> Result<Self, CodecError> {
        let time = reader.read_f32()?;
        let value = PPtr::decode(reader)?;
        Ok(PPtrKeyframe { time, value })
    }
}

impl Encodable for PPtrKeyframe {
    fn encode(&self, writer: &mut AssetWriter) -> Result<(), CodecError> {
        writer.write_f32(self.time);
        self.value.encode(writer)
    }
}

impl Described for PPtrKeyframe {
    fn type_tree(version: Version, name: &str) -> TypeTreeNode {
        TypeTreeNode::node(
            "PPtrKeyframe",
            name,
            vec![
                TypeTreeNode::float(TIME_NAME),
                PPtr::type_tree("Object", version, VALUE_NAME),
            ],
        )
    }
}

impl Exportable for PPtrKeyframe {
    fn export(&self) -> Node {
        Node::mapping([
            (TIME_NAME, Node::from(self.time)),
            (VALUE_NAME, self.value.export()),
        ])
    }
}

impl Dependent for PPtrKeyframe {
    fn dependencies(&self) -> impl Iterator<Item = PPtr> + '_ {
        self.value.dependencies()
    }
}
