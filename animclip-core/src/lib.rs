//! Animclip reads and writes the object-reference curves of animation clips.
//!
//! Core concepts:
//! - **PPtrCurve**: a curve whose keyframes switch a property between objects
//! - **CurveIdentity**: the (path, attribute, class id, script) merge key
//! - **PPtr**: a weak reference to an object, resolved by an external table
//! - **Type tree**: a static description of a record's binary layout
//! - **Version**: the container format version every layout decision keys on
//!
//! Every record type implements independent capabilities: [`Decodable`] and
//! [`Encodable`] for the binary form, [`Described`] for its type tree,
//! [`Exportable`] for the ordered document form and [`Dependent`] for the
//! references it holds.
//!
//! # Example
//!
//! ```
//! use animclip_core::{
//!     AssetReader, AssetWriter, ClassIdType, Decodable, Encodable, PPtr, PPtrCurve,
//!     PPtrKeyframe, Version,
//! };
//!
//! let version: Version = "2019.4.0f1".parse().unwrap();
//! let curve = PPtrCurve::new(
//!     "Body/Head",
//!     "m_Sprite",
//!     ClassIdType::SpriteRenderer,
//!     PPtr::NULL,
//!     vec![PPtrKeyframe::new(0.0, PPtr::new(0, 12))],
//! );
//!
//! let mut writer = AssetWriter::new(version).unwrap();
//! curve.encode(&mut writer).unwrap();
//! let bytes = writer.into_bytes();
//!
//! let mut reader = AssetReader::new(&bytes, version).unwrap();
//! let decoded = PPtrCurve::decode(&mut reader).unwrap();
//! assert_eq!(decoded, curve);
//! assert_eq!(decoded.keyframes(), curve.keyframes());
//! ```

mod class_id;
mod codec;
mod config;
mod curve;
mod dependency;
mod error;
pub mod export;
mod keyframe;
mod merge;
mod pptr;
mod reader;
pub mod type_tree;
pub mod version;
mod writer;

pub use class_id::ClassIdType;
pub use codec::{Decodable, Encodable};
pub use config::{CodecConfig, ConfigError};
pub use curve::{
    ATTRIBUTE_NAME, CLASS_ID_NAME, CURVE_NAME, CurveIdentity, PATH_NAME, PPtrCurve, SCRIPT_NAME,
};
pub use dependency::Dependent;
pub use error::{CodecError, FormatError};
pub use export::{Exportable, Node};
pub use keyframe::PPtrKeyframe;
pub use merge::merge_curves;
pub use pptr::PPtr;
pub use reader::AssetReader;
pub use type_tree::{Described, TypeTreeNode};
pub use version::{Version, VersionParseError, has_long_path_id, requires_alignment};
pub use writer::AssetWriter;
