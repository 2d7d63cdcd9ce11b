use serde::{Deserialize, Serialize};

/// One LAB box: `(l_min, l_max, a_min, a_max, b_min, b_max)`.
///
/// Serialized as a 6-element array. Bounds are inclusive, and a reversed
/// pair (`min > max`) is treated as the same range written the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i8; 6]", into = "[i8; 6]")]
pub struct LabRange {
    pub l: (i8, i8),
    pub a: (i8, i8),
    pub b: (i8, i8),
}

impl LabRange {
    pub const fn new(l_min: i8, l_max: i8, a_min: i8, a_max: i8, b_min: i8, b_max: i8) -> Self {
        Self {
            l: (l_min, l_max),
            a: (a_min, a_max),
            b: (b_min, b_max),
        }
    }

    #[inline]
    fn within((lo, hi): (i8, i8), value: i8) -> bool {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        lo <= value && value <= hi
    }

    pub fn contains(&self, lab: [i8; 3]) -> bool {
        Self::within(self.l, lab[0])
            && Self::within(self.a, lab[1])
            && Self::within(self.b, lab[2])
    }
}

impl From<[i8; 6]> for LabRange {
    fn from(v: [i8; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

impl From<LabRange> for [i8; 6] {
    fn from(r: LabRange) -> Self {
        [r.l.0, r.l.1, r.a.0, r.a.1, r.b.0, r.b.1]
    }
}

/// Colour-threshold descriptor attached to a registry entry.
///
/// Fusion never looks inside it: the descriptor is handed to the blob source
/// as-is. The reference segmenter reads it as a union of [LabRange]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorThreshold(Vec<LabRange>);

impl ColorThreshold {
    pub fn new(ranges: impl IntoIterator<Item = LabRange>) -> Self {
        Self(ranges.into_iter().collect())
    }

    /// Threshold with a single LAB box
    pub fn single(range: LabRange) -> Self {
        Self(vec![range])
    }

    pub fn ranges(&self) -> &[LabRange] {
        &self.0
    }

    /// Does a LAB pixel fall inside any of the ranges?
    pub fn matches(&self, lab: [i8; 3]) -> bool {
        self.0.iter().any(|range| range.contains(lab))
    }
}
