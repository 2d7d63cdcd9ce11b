//! sRGB to CIE L*a*b* (D65), quantized to `i8` the way threshold tuples are written

/// sRGB channel to linear light
fn linearize(c: u8) -> f64 {
    let c = c as f64 / 255.;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    const DELTA: f64 = 6. / 29.;
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3. * DELTA * DELTA) + 4. / 29.
    }
}

/// Convert an sRGB pixel to `[L, a, b]`, with L in `0..=100` and a/b clamped to `i8`.
pub fn rgb_to_lab([r, g, b]: [u8; 3]) -> [i8; 3] {
    let (r, g, b) = (linearize(r), linearize(g), linearize(b));

    let x = 0.4124 * r + 0.3576 * g + 0.1805 * b;
    let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    let z = 0.0193 * r + 0.1192 * g + 0.9505 * b;

    // D65 white point
    let fx = lab_f(x / 0.95047);
    let fy = lab_f(y);
    let fz = lab_f(z / 1.08883);

    let l = 116. * fy - 16.;
    let a = 500. * (fx - fy);
    let b = 200. * (fy - fz);

    [
        l.round().clamp(0., 100.) as i8,
        a.round().clamp(-128., 127.) as i8,
        b.round().clamp(-128., 127.) as i8,
    ]
}

#[cfg(test)]
mod test {
    use super::rgb_to_lab;

    #[test]
    fn black_and_white() {
        assert_eq!(rgb_to_lab([0, 0, 0]), [0, 0, 0]);
        let [l, a, b] = rgb_to_lab([255, 255, 255]);
        assert_eq!(l, 100);
        assert!(a.abs() <= 1 && b.abs() <= 1);
    }

    #[test]
    fn primaries() {
        let [l, a, b] = rgb_to_lab([255, 0, 0]);
        assert!((l - 53).abs() <= 1, "L = {l}");
        assert!((a - 80).abs() <= 1, "a = {a}");
        assert!((b - 67).abs() <= 1, "b = {b}");

        let [l, a, b] = rgb_to_lab([0, 200, 0]);
        assert!((l - 70).abs() <= 1, "L = {l}");
        assert!((a + 72).abs() <= 1, "a = {a}");
        assert!((b - 69).abs() <= 1, "b = {b}");
    }
}
