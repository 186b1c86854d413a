use serde::{Deserialize, Serialize};

use crate::codec::{Decodable, Encodable};
use crate::error::{CodecError, FormatError};
use crate::export::{Exportable, Node};
use crate::reader::AssetReader;
use crate::type_tree::TypeTreeNode;
use crate::version::{Version, has_long_path_id};
use crate::writer::AssetWriter;

pub const FILE_ID_NAME: &str = "m_FileID";
pub const PATH_ID_NAME: &str = "m_PathID";

/// A weak reference to an object in this or another serialized file.
///
/// The pair does not own its target; an external table resolves
/// `file_index` to a file and `path_id` to an object inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PPtr {
    /// Index into the owning file's external references, 0 for the file itself.
    pub file_index: i32,
    /// Object identifier inside the referenced file, 0 for none.
    pub path_id: i64,
}

impl PPtr {
    /// The empty reference.
    pub const NULL: PPtr = PPtr {
        file_index: 0,
        path_id: 0,
    };

    pub const fn new(file_index: i32, path_id: i64) -> Self {
        PPtr {
            file_index,
            path_id,
        }
    }

    pub fn is_null(&self) -> bool {
        self.path_id == 0
    }

    /// Layout of a reference to an object of type `target`.
    pub fn type_tree(target: &str, version: Version, name: &str) -> TypeTreeNode {
        TypeTreeNode::pptr(target, name, version)
    }

    /// Hash of both fields that does not depend on the process or platform.
    pub fn stable_hash(&self) -> u64 {
        let mut hash: u64 = 17;
        hash = hash.wrapping_mul(31).wrapping_add(self.file_index as u32 as u64);
        hash = hash.wrapping_mul(31).wrapping_add(self.path_id as u64);
        hash
    }
}

impl Decodable for PPtr {
    const MIN_ENCODED_LEN: usize = 8;

    fn decode(reader: &mut AssetReader<'_>) -> Result<Self, CodecError> {
        let file_index = reader.read_i32()?;
        let path_id = if has_long_path_id(reader.version()) {
            reader.read_i64()?
        } else {
            reader.read_i32()?.into()
        };
        Ok(PPtr {
            file_index,
            path_id,
        })
    }
}

impl Encodable for PPtr {
    fn encode(&self, writer: &mut AssetWriter) -> Result<(), CodecError> {
        writer.write_i32(self.file_index);
        if has_long_path_id(writer.version()) {
            writer.write_i64(self.path_id);
        } else {
            let path_id = i32::try_from(self.path_id)
                .map_err(|_| FormatError::PathIdOutOfRange(self.path_id))?;
            writer.write_i32(path_id);
        }
        Ok(())
    }
}

impl Exportable for PPtr {
    fn export(&self) -> Node {
        Node::mapping([
            (FILE_ID_NAME, Node::from(self.file_index)),
            (PATH_ID_NAME, Node::from(self.path_id)),
        ])
    }
}
