use indexmap::IndexMap;

use crate::curve::{CurveIdentity, PPtrCurve};
use crate::keyframe::PPtrKeyframe;

/// Recombines curves that animate the same property.
///
/// Curves are grouped by identity in first-seen order and each group's
/// keyframes are concatenated in encounter order. Keyframe times are not
/// sorted or validated.
pub fn merge_curves(curves: impl IntoIterator<Item = PPtrCurve>) -> Vec<PPtrCurve> {
    let mut groups: IndexMap<CurveIdentity, Vec<PPtrKeyframe>> = IndexMap::new();
    for curve in curves {
        let (identity, keyframes) = curve.into_parts();
        groups.entry(identity).or_default().extend(keyframes.into_vec());
    }
    groups
        .into_iter()
        .map(|(identity, keyframes)| PPtrCurve::from_identity(identity, keyframes))
        .collect()
}
