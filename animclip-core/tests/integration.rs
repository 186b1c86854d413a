//! Integration tests for the curve codec, its type tree and its export form.

use animclip_core::{
    AssetReader, AssetWriter, CLASS_ID_NAME, ClassIdType, CodecConfig, CodecError, Decodable,
    Dependent, Described, Encodable, Exportable, FormatError, PPtr, PPtrCurve, PPtrKeyframe,
    Version, requires_alignment,
};
use proptest::prelude::*;

const VERSIONS: &[&str] = &[
    "4.7.2f1",
    "5.6.7f1",
    "2016.4.40f1",
    "2017.1.0f3",
    "2018.4.36f1",
    "2021.3.5f1",
];

fn v(s: &str) -> Version {
    s.parse().unwrap()
}

fn sample_curve() -> PPtrCurve {
    PPtrCurve::new(
        "Root/Body/Weapon",
        "m_Materials.Array.data[1]",
        ClassIdType::MeshRenderer,
        PPtr::NULL,
        vec![
            PPtrKeyframe::new(0.0, PPtr::new(0, 101)),
            PPtrKeyframe::new(0.5, PPtr::new(1, 102)),
            PPtrKeyframe::new(1.0, PPtr::new(0, 101)),
        ],
    )
}

/// Encodes `curve` after `prefix` bytes of unrelated stream content.
fn encode_at(curve: &PPtrCurve, version: Version, prefix: usize) -> Vec<u8> {
    let mut writer = AssetWriter::with_buffer(vec![0xee; prefix], version).unwrap();
    curve.encode(&mut writer).unwrap();
    writer.into_bytes()
}

/// Hand-built record with an empty keyframe array, starting at `prefix`.
fn empty_record(prefix: usize, padding: usize) -> Vec<u8> {
    let mut data = vec![0xee; prefix];
    data.extend_from_slice(&0i32.to_le_bytes());
    data.extend(std::iter::repeat_n(0u8, padding));
    data.extend_from_slice(&4i32.to_le_bytes());
    data.extend_from_slice(b"m_On");
    data.extend_from_slice(&4i32.to_le_bytes());
    data.extend_from_slice(b"Root");
    data.extend_from_slice(&ClassIdType::Behaviour.as_i32().to_le_bytes());
    data.extend_from_slice(&0i32.to_le_bytes());
    data.extend_from_slice(&0i64.to_le_bytes());
    data
}

#[test]
fn empty_curve_below_threshold_consumes_no_padding() {
    let data = empty_record(1, 0);
    let mut reader = AssetReader::new(&data, v("5.6.7f1")).unwrap();
    reader.seek(1).unwrap();

    let curve = PPtrCurve::decode(&mut reader).unwrap();
    assert!(curve.keyframes().is_empty());
    assert_eq!(curve.attribute(), "m_On");
    assert_eq!(curve.path(), "Root");
    assert_eq!(curve.class_id(), ClassIdType::Behaviour);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn empty_curve_on_boundary_consumes_no_padding() {
    let data = empty_record(0, 0);
    let mut reader = AssetReader::new(&data, v("2019.4.0f1")).unwrap();

    let curve = PPtrCurve::decode(&mut reader).unwrap();
    assert!(curve.keyframes().is_empty());
    assert_eq!(curve.attribute(), "m_On");
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn empty_curve_off_boundary_consumes_padding() {
    let data = empty_record(1, 3);
    let mut reader = AssetReader::new(&data, v("2019.4.0f1")).unwrap();
    reader.seek(1).unwrap();

    let curve = PPtrCurve::decode(&mut reader).unwrap();
    assert_eq!(curve.attribute(), "m_On");
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn padding_is_relative_to_stream_start() {
    let curve = sample_curve();
    for prefix in 0..4 {
        for version in VERSIONS.iter().map(|s| v(s)) {
            let bytes = encode_at(&curve, version, prefix);
            let mut reader = AssetReader::new(&bytes, version).unwrap();
            reader.seek(prefix).unwrap();

            let tree = PPtrCurve::type_tree(version, "curve");
            let keyframes_end = {
                let mut ahead = AssetReader::new(&bytes, version).unwrap();
                ahead.seek(prefix).unwrap();
                ahead.read_asset_array::<PPtrKeyframe>().unwrap();
                ahead.position()
            };

            tree.children[0].read_value(&mut reader).unwrap();
            if requires_alignment(version) {
                assert_eq!(reader.position() % 4, 0, "{version} prefix {prefix}");
            } else {
                assert_eq!(reader.position(), keyframes_end, "{version} prefix {prefix}");
            }
        }
    }
}

#[test]
fn identity_equal_curves_with_different_keyframes() {
    let a = PPtrCurve::new(
        "Root/Arm",
        "localPosition.x",
        ClassIdType::Transform,
        PPtr::NULL,
        vec![
            PPtrKeyframe::new(0.0, PPtr::new(0, 1)),
            PPtrKeyframe::new(1.0, PPtr::new(0, 2)),
        ],
    );
    let b = a.with_keyframes(vec![PPtrKeyframe::new(2.0, PPtr::new(0, 3))]);
    assert_eq!(a, b);
    assert_eq!(a.identity().stable_hash(), b.identity().stable_hash());

    let mut set = std::collections::HashSet::new();
    set.insert(a);
    assert!(!set.insert(b));
}

#[test]
fn dependencies_in_keyframe_then_script_order() {
    let x = PPtr::new(0, 7);
    let y = PPtr::new(2, 8);
    let s = PPtr::new(1, 9);
    let curve = PPtrCurve::new(
        "",
        "m_Sprite",
        ClassIdType::MonoBehaviour,
        s,
        vec![PPtrKeyframe::new(0.0, x), PPtrKeyframe::new(1.0, y)],
    );
    assert_eq!(curve.dependencies().collect::<Vec<_>>(), vec![x, y, s]);
}

#[test]
fn export_renders_keys_in_fixed_order() {
    let json = serde_json::to_string(&sample_curve().export()).unwrap();
    let positions: Vec<usize> = ["\"curve\"", "\"attribute\"", "\"path\"", "\"classID\"", "\"script\""]
        .iter()
        .map(|k| json.find(k).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    assert!(json.contains("\"classID\":23"));
}

#[test]
fn every_truncation_fails_cleanly() {
    let version = v("2018.4.36f1");
    let bytes = encode_at(&sample_curve(), version, 0);
    for len in 0..bytes.len() {
        let mut reader = AssetReader::new(&bytes[..len], version).unwrap();
        let result = PPtrCurve::decode(&mut reader);
        assert!(
            matches!(result, Err(CodecError::Format(_))),
            "prefix of {len} bytes decoded"
        );
    }
}

#[test]
fn negative_keyframe_count_rejected() {
    let mut data = (-3i32).to_le_bytes().to_vec();
    data.extend_from_slice(&[0; 32]);
    let mut reader = AssetReader::new(&data, v("2018.4.36f1")).unwrap();
    assert!(matches!(
        PPtrCurve::decode(&mut reader),
        Err(CodecError::Format(FormatError::NegativeLength { length: -3, .. }))
    ));
}

#[test]
fn keyframe_count_above_configured_limit_rejected() {
    let version = v("2018.4.36f1");
    let bytes = encode_at(&sample_curve(), version, 0);
    let config = CodecConfig::from_toml_str("max_array_len = 2").unwrap();
    let mut reader = AssetReader::with_config(&bytes, version, config).unwrap();
    assert!(matches!(
        PPtrCurve::decode(&mut reader),
        Err(CodecError::Format(FormatError::LengthTooLarge { length: 3, limit: 2, .. }))
    ));
}

#[test]
fn unknown_class_id_rejected() {
    let version = v("2018.4.36f1");
    let mut bytes = encode_at(&sample_curve(), version, 0);
    // class id sits right before the 12-byte script reference
    let at = bytes.len() - 12 - 4;
    bytes[at..at + 4].copy_from_slice(&4242i32.to_le_bytes());

    let mut reader = AssetReader::new(&bytes, version).unwrap();
    assert_eq!(
        PPtrCurve::decode(&mut reader).unwrap_err(),
        CodecError::Format(FormatError::UnknownClassId(4242))
    );

    let mut reader = AssetReader::new(&bytes, version).unwrap();
    let tree = PPtrCurve::type_tree(version, "curve");
    let raw = tree.read_value(&mut reader).unwrap();
    assert_eq!(raw.get(CLASS_ID_NAME), Some(&animclip_core::Node::Int(4242)));
}

#[test]
fn newer_component_class_ids_decode() {
    let version = v("2021.3.5f1");
    for (raw, expected) in [
        (483i32, ClassIdType::TilemapRenderer),
        (331, ClassIdType::SpriteMask),
        (328, ClassIdType::VideoPlayer),
    ] {
        let mut bytes = encode_at(&sample_curve(), version, 0);
        let at = bytes.len() - 12 - 4;
        bytes[at..at + 4].copy_from_slice(&raw.to_le_bytes());

        let mut reader = AssetReader::new(&bytes, version).unwrap();
        let curve = PPtrCurve::decode(&mut reader).unwrap();
        assert_eq!(curve.class_id(), expected);
        assert_eq!(curve.keyframes(), sample_curve().keyframes());
        assert_eq!(reader.remaining(), 0);
    }
}

#[test]
fn unsupported_version_fails_explicitly() {
    let data = empty_record(0, 0);
    let version = v("2.6.1f1");
    assert_eq!(
        AssetReader::new(&data, version).err(),
        Some(CodecError::UnsupportedVersion(version))
    );
}

fn pptr() -> impl Strategy<Value = PPtr> {
    (any::<i32>(), any::<i32>()).prop_map(|(file, path)| PPtr::new(file, path.into()))
}

fn keyframe() -> impl Strategy<Value = PPtrKeyframe> {
    (-1.0e6f32..1.0e6f32, pptr()).prop_map(|(time, value)| PPtrKeyframe::new(time, value))
}

fn curve() -> impl Strategy<Value = PPtrCurve> {
    (
        "\\PC{0,16}",
        "[A-Za-z0-9_.\\[\\]]{0,24}",
        prop::sample::select(ClassIdType::ALL),
        pptr(),
        prop::collection::vec(keyframe(), 0..8),
    )
        .prop_map(|(path, attribute, class_id, script, keyframes)| {
            PPtrCurve::new(path, attribute, class_id, script, keyframes)
        })
}

fn version() -> impl Strategy<Value = Version> {
    prop::sample::select(VERSIONS).prop_map(v)
}

proptest! {
    #[test]
    fn decode_reverses_encode(curve in curve(), version in version(), prefix in 0usize..4) {
        let bytes = encode_at(&curve, version, prefix);
        let mut reader = AssetReader::new(&bytes, version).unwrap();
        reader.seek(prefix).unwrap();

        let decoded = PPtrCurve::decode(&mut reader).unwrap();
        prop_assert_eq!(decoded.identity(), curve.identity());
        prop_assert_eq!(decoded.keyframes(), curve.keyframes());
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn type_tree_parses_what_codec_writes(curve in curve(), version in version(), prefix in 0usize..4) {
        let bytes = encode_at(&curve, version, prefix);
        let tree = PPtrCurve::type_tree(version, "curve");

        let mut reader = AssetReader::new(&bytes, version).unwrap();
        reader.seek(prefix).unwrap();
        let parsed = tree.read_value(&mut reader).unwrap();

        prop_assert_eq!(reader.remaining(), 0);
        prop_assert_eq!(parsed, curve.export());
    }

    #[test]
    fn equality_ignores_keyframes(curve in curve(), other in prop::collection::vec(keyframe(), 0..8)) {
        let replaced = curve.with_keyframes(other);
        prop_assert_eq!(&replaced, &curve);
        prop_assert_eq!(replaced.identity().stable_hash(), curve.identity().stable_hash());
    }
}
