//! Static descriptions of binary record layouts.
//!
//! A type tree documents the field order and field types of a record without
//! reference to any decoded value. Tooling can parse or validate a buffer from
//! the tree alone (see [`TypeTreeNode::read_value`]), so every tree must list
//! its fields in exactly the order the matching codec reads them.

use indexmap::IndexMap;

use crate::error::{CodecError, FormatError};
use crate::export::Node;
use crate::reader::AssetReader;
use crate::version::{Version, has_long_path_id};

/// Meta flag bit: the stream is aligned to 4 bytes after this node.
pub const ALIGN_BYTES: u32 = 0x4000;

/// Type name of a raw integer holding a runtime type tag.
pub const TYPE_STAR: &str = "Type*";

/// Byte size recorded for variable-length nodes.
pub const VARIABLE_SIZE: i32 = -1;

/// One node of a type tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTreeNode {
    pub type_name: String,
    pub name: String,
    pub byte_size: i32,
    pub meta_flag: u32,
    pub children: Vec<TypeTreeNode>,
}

/// A type whose binary layout can be described without an instance.
pub trait Described {
    /// Returns the layout used by `version`, rooted at a node called `name`.
    fn type_tree(version: Version, name: &str) -> TypeTreeNode;
}

impl TypeTreeNode {
    /// Creates a fixed-size leaf node.
    pub fn primitive(type_name: &str, name: &str, byte_size: i32) -> Self {
        TypeTreeNode {
            type_name: type_name.to_string(),
            name: name.to_string(),
            byte_size,
            meta_flag: 0,
            children: Vec::new(),
        }
    }

    pub fn int(name: &str) -> Self {
        Self::primitive("int", name, 4)
    }

    pub fn sint64(name: &str) -> Self {
        Self::primitive("SInt64", name, 8)
    }

    pub fn float(name: &str) -> Self {
        Self::primitive("float", name, 4)
    }

    /// A 4-byte raw integer tagged as a runtime type reference.
    pub fn type_star(name: &str) -> Self {
        Self::primitive(TYPE_STAR, name, 4)
    }

    /// Creates a composite node. Its size is the sum of its children's sizes
    /// when all of them are fixed.
    pub fn node(type_name: &str, name: &str, children: Vec<TypeTreeNode>) -> Self {
        let byte_size = children
            .iter()
            .try_fold(0i32, |acc, c| (c.byte_size >= 0).then(|| acc + c.byte_size))
            .unwrap_or(VARIABLE_SIZE);
        TypeTreeNode {
            type_name: type_name.to_string(),
            name: name.to_string(),
            byte_size,
            meta_flag: 0,
            children,
        }
    }

    /// Creates a composite node whose length depends on its data.
    pub fn variable(type_name: &str, name: &str, children: Vec<TypeTreeNode>) -> Self {
        TypeTreeNode {
            byte_size: VARIABLE_SIZE,
            ..Self::node(type_name, name, children)
        }
    }

    /// A length-prefixed string.
    pub fn string(name: &str) -> Self {
        let array = Self::variable(
            "Array",
            "Array",
            vec![Self::int("size"), Self::primitive("char", "data", 1)],
        );
        Self::variable("string", name, vec![array])
    }

    /// A length-prefixed array of `element`, optionally aligned afterwards.
    pub fn vector(name: &str, element: TypeTreeNode, align: bool) -> Self {
        let array = Self::variable(
            "Array",
            "Array",
            vec![Self::int("size"), element.renamed("data")],
        );
        let vector = Self::variable("vector", name, vec![array]);
        if align { vector.aligned() } else { vector }
    }

    /// A weak reference to an object of type `target`.
    pub fn pptr(target: &str, name: &str, version: Version) -> Self {
        let path_id = if has_long_path_id(version) {
            Self::sint64("m_PathID")
        } else {
            Self::int("m_PathID")
        };
        Self::node(
            &format!("PPtr<{target}>"),
            name,
            vec![Self::int("m_FileID"), path_id],
        )
    }

    /// Returns this node with a different field name.
    pub fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Returns this node with the alignment flag set.
    pub fn aligned(mut self) -> Self {
        self.meta_flag |= ALIGN_BYTES;
        self
    }

    pub fn is_aligned(&self) -> bool {
        self.meta_flag & ALIGN_BYTES != 0
    }

    /// Names of the direct children, in field order.
    pub fn field_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }

    /// Looks up a direct child by field name.
    pub fn child(&self, name: &str) -> Option<&TypeTreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Smallest number of bytes a value of this node can occupy.
    pub fn min_encoded_len(&self) -> usize {
        match self.type_name.as_str() {
            "string" | "vector" => 4,
            _ if self.children.is_empty() => usize::try_from(self.byte_size).unwrap_or(0),
            _ => self.children.iter().map(TypeTreeNode::min_encoded_len).sum(),
        }
    }

    fn unknown(&self) -> CodecError {
        CodecError::UnknownNodeType {
            type_name: self.type_name.clone(),
            name: self.name.clone(),
        }
    }

    fn array_element(&self) -> Result<&TypeTreeNode, CodecError> {
        self.children
            .first()
            .and_then(|array| array.children.get(1))
            .ok_or_else(|| self.unknown())
    }

    /// Parses one value from `reader` using only this tree.
    ///
    /// Composite nodes become mappings keyed by field name, vectors become
    /// sequences and leaves become scalars.
    pub fn read_value(&self, reader: &mut AssetReader<'_>) -> Result<Node, CodecError> {
        let value = match self.type_name.as_str() {
            "string" => Node::String(reader.read_string()?),
            "vector" => {
                let element = self.array_element()?;
                let position = reader.position();
                let count = reader.read_length("array", reader.config().max_array_len)?;
                let fits = reader.remaining() / element.min_encoded_len().max(1);
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
                    items.push(element.read_value(reader)?);
                }
                Node::Sequence(items)
            }
            _ if !self.children.is_empty() => {
                let mut fields = IndexMap::with_capacity(self.children.len());
                for child in &self.children {
                    fields.insert(child.name.clone(), child.read_value(reader)?);
                }
                Node::Mapping(fields)
            }
            "int" | TYPE_STAR => Node::from(reader.read_i32()?),
            "SInt64" => Node::from(reader.read_i64()?),
            "float" => Node::from(reader.read_f32()?),
            _ => return Err(self.unknown()),
        };
        if self.is_aligned() {
            reader.align_stream()?;
        }
        Ok(value)
    }
}
