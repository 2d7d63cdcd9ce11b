use crate::{util::Vec3, CameraIntrinsics};

/// Recover a tag's raw translation from its detection homography.
///
/// The homography maps the ideal tag (corners at (±1, ±1)) to pixels, and is
/// assumed to be the projection matrix times the model matrix:
///
/// ```text
/// [ fx 0  cx ] [ R00  R01  TX ]    [ H00 H01 H02 ]
/// [  0 fy cy ] [ R10  R11  TY ] =  [ H10 H11 H12 ]
/// [  0  0  1 ] [ R20  R21  TZ ]    [ H20 H21 H22 ]
/// ```
///
/// The result is expressed in tag edge lengths (the ideal tag is 2 units wide,
/// so the translation is halved), with +Z pointing out of the camera. Returns
/// `None` for a degenerate homography.
pub fn raw_translation_from_homography(H: &[[f64; 3]; 3], intrinsics: &CameraIntrinsics) -> Option<Vec3> {
	let CameraIntrinsics { fx, fy, cx, cy } = *intrinsics;

	// Note that every variable that we compute is proportional to the scale factor of H.
	let R20 = H[2][0];
	let R21 = H[2][1];
	let TZ  = H[2][2];
	let R00 = (H[0][0] - cx*R20) / fx;
	let R01 = (H[0][1] - cx*R21) / fx;
	let TX  = (H[0][2] - cx*TZ)  / fx;
	let R10 = (H[1][0] - cy*R20) / fy;
	let R11 = (H[1][1] - cy*R21) / fy;
	let TY  = (H[1][2] - cy*TZ)  / fy;

	// compute the scale by requiring that the rotation columns are unit length
	// (Use geometric average of the two length vectors we have)
	let length1 = f64::sqrt(R00*R00 + R10*R10 + R20*R20);
	let length2 = f64::sqrt(R01*R01 + R11*R11 + R21*R21);
	let s = f64::sqrt(length1 * length2).recip();
	if !s.is_finite() {
		return None;
	}

	// tag must be in front of the camera (+Z)
	let s = if TZ < 0. { -s } else { s };

	// ideal tag is 2 units wide
	let t = Vec3::of(TX, TY, TZ).scale(s * 0.5);
	if t.is_finite() {
		Some(t)
	} else {
		None
	}
}
