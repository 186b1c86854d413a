//! Object-reference animation curves.
//!
//! A [`PPtrCurve`] animates a reference-valued property: the property at
//! `attribute` on the component of type `class_id` found at `path` is
//! switched between objects by its keyframes.
//!
//! Two curves are equal when they animate the same property, whatever their
//! keyframes. Curves split per array element or per field are recombined by
//! grouping on that identity (see [`merge_curves`](crate::merge_curves)).

use std::hash::{Hash, Hasher};

use crate::class_id::ClassIdType;
use crate::codec::{Decodable, Encodable};
use crate::dependency::Dependent;
use crate::error::CodecError;
use crate::export::{Exportable, Node};
use crate::keyframe::PPtrKeyframe;
use crate::pptr::PPtr;
use crate::reader::AssetReader;
use crate::type_tree::{Described, TypeTreeNode};
use crate::version::{Version, requires_alignment};
use crate::writer::AssetWriter;

pub const CURVE_NAME: &str = "curve";
pub const ATTRIBUTE_NAME: &str = "attribute";
pub const PATH_NAME: &str = "path";
pub const CLASS_ID_NAME: &str = "classID";
pub const SCRIPT_NAME: &str = "script";

/// The fields that decide whether two curves animate the same property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurveIdentity {
    /// Hierarchy path of the target object.
    pub path: String,
    /// Animated property, possibly with an element index such as `items[3]`.
    pub attribute: String,
    pub class_id: ClassIdType,
    /// Script asset of the target when it is a user script, otherwise null.
    pub script: PPtr,
}

impl CurveIdentity {
    pub fn new(
        path: impl Into<String>,
        attribute: impl Into<String>,
        class_id: ClassIdType,
        script: PPtr,
    ) -> Self {
        CurveIdentity {
            path: path.into(),
            attribute: attribute.into(),
            class_id,
            script,
        }
    }

    /// Hash of the identity fields that is the same in every process.
    pub fn stable_hash(&self) -> u64 {
        let mut hash: u64 = 113;
        hash = hash.wrapping_add(457u64.wrapping_mul(digest(&self.attribute)));
        hash = hash.wrapping_mul(433).wrapping_add(digest(&self.path));
        hash = hash
            .wrapping_mul(223)
            .wrapping_add(self.class_id.as_i32() as u32 as u64);
        hash = hash.wrapping_mul(911).wrapping_add(self.script.stable_hash());
        hash
    }
}

fn digest(s: &str) -> u64 {
    let hash = blake3::hash(s.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}

/// A curve of object-reference keyframes bound to one animated property.
///
/// The keyframe sequence has a fixed length once constructed. Replacing it
/// means building a new curve with the same identity.
#[derive(Debug, Clone)]
pub struct PPtrCurve {
    identity: CurveIdentity,
    keyframes: Box<[PPtrKeyframe]>,
}

impl PPtrCurve {
    pub fn new(
        path: impl Into<String>,
        attribute: impl Into<String>,
        class_id: ClassIdType,
        script: PPtr,
        keyframes: impl Into<Box<[PPtrKeyframe]>>,
    ) -> Self {
        Self::from_identity(CurveIdentity::new(path, attribute, class_id, script), keyframes)
    }

    pub fn from_identity(
        identity: CurveIdentity,
        keyframes: impl Into<Box<[PPtrKeyframe]>>,
    ) -> Self {
        PPtrCurve {
            identity,
            keyframes: keyframes.into(),
        }
    }

    /// Returns a curve for the same property with a new keyframe sequence.
    pub fn with_keyframes(&self, keyframes: impl Into<Box<[PPtrKeyframe]>>) -> Self {
        Self::from_identity(self.identity.clone(), keyframes)
    }

    pub fn identity(&self) -> &CurveIdentity {
        &self.identity
    }

    pub fn into_parts(self) -> (CurveIdentity, Box<[PPtrKeyframe]>) {
        (self.identity, self.keyframes)
    }

    pub fn path(&self) -> &str {
        &self.identity.path
    }

    pub fn attribute(&self) -> &str {
        &self.identity.attribute
    }

    pub fn class_id(&self) -> ClassIdType {
        self.identity.class_id
    }

    pub fn script(&self) -> PPtr {
        self.identity.script
    }

    pub fn keyframes(&self) -> &[PPtrKeyframe] {
        &self.keyframes
    }
}

impl PartialEq for PPtrCurve {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for PPtrCurve {}

impl Hash for PPtrCurve {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl Decodable for PPtrCurve {
    // empty keyframe array, two empty strings, class id, short reference
    const MIN_ENCODED_LEN: usize = 4 + 4 + 4 + 4 + PPtr::MIN_ENCODED_LEN;

    fn decode(reader: &mut AssetReader<'_>) -> Result<Self, CodecError> {
        let keyframes: Vec<PPtrKeyframe> = reader.read_asset_array()?;
        if requires_alignment(reader.version()) {
            reader.align_stream()?;
        }

        let attribute = reader.read_string()?;
        let path = reader.read_string()?;
        let class_id = ClassIdType::try_from(reader.read_i32()?)?;
        let script = PPtr::decode(reader)?;

        log::trace!(
            "decoded PPtrCurve {path:?}/{attribute:?} ({}) with {} keyframes",
            class_id.name(),
            keyframes.len()
        );
        Ok(PPtrCurve::new(path, attribute, class_id, script, keyframes))
    }
}

impl Encodable for PPtrCurve {
    fn encode(&self, writer: &mut AssetWriter) -> Result<(), CodecError> {
        writer.write_asset_array(&self.keyframes)?;
        if requires_alignment(writer.version()) {
            writer.align_stream();
        }

        writer.write_string(&self.identity.attribute)?;
        writer.write_string(&self.identity.path)?;
        writer.write_i32(self.identity.class_id.as_i32());
        self.identity.script.encode(writer)?;

        log::trace!(
            "encoded PPtrCurve {:?}/{:?} with {} keyframes",
            self.identity.path,
            self.identity.attribute,
            self.keyframes.len()
        );
        Ok(())
    }
}

impl Described for PPtrCurve {
    fn type_tree(version: Version, name: &str) -> TypeTreeNode {
        TypeTreeNode::node(
            "PPtrCurve",
            name,
            vec![
                TypeTreeNode::vector(
                    CURVE_NAME,
                    PPtrKeyframe::type_tree(version, "data"),
                    requires_alignment(version),
                ),
                TypeTreeNode::string(ATTRIBUTE_NAME),
                TypeTreeNode::string(PATH_NAME),
                TypeTreeNode::type_star(CLASS_ID_NAME),
                PPtr::type_tree("MonoScript", version, SCRIPT_NAME),
            ],
        )
    }
}

impl Exportable for PPtrCurve {
    fn export(&self) -> Node {
        Node::mapping([
            (CURVE_NAME, self.keyframes.export()),
            (ATTRIBUTE_NAME, Node::from(self.identity.attribute.as_str())),
            (PATH_NAME, Node::from(self.identity.path.as_str())),
            (CLASS_ID_NAME, Node::from(self.identity.class_id.as_i32())),
            (SCRIPT_NAME, self.identity.script.export()),
        ])
    }
}

impl Dependent for PPtrCurve {
    fn dependencies(&self) -> impl Iterator<Item = PPtr> + '_ {
        self.keyframes
            .dependencies()
            .chain(std::iter::once(self.identity.script))
    }
}
