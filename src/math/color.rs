use super::Vec3;

/// HSL to RGB conversion, all channels in [0, 1]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Vec3::new(l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Vec3::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_red() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((red.x - 1.0).abs() < 0.01);
        assert!(red.y.abs() < 0.01);
        assert!(red.z.abs() < 0.01);
    }

    #[test]
    fn test_hsl_green() {
        let green = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
        assert!(green.x.abs() < 0.01);
        assert!((green.y - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_hsl_grayscale() {
        let gray = hsl_to_rgb(0.7, 0.0, 0.4);
        assert!((gray.x - 0.4).abs() < 0.01);
        assert!((gray.y - 0.4).abs() < 0.01);
        assert!((gray.z - 0.4).abs() < 0.01);
    }

    #[test]
    fn test_hsl_channels_in_range() {
        for i in 0..20 {
            let c = hsl_to_rgb(i as f32 * 0.05, 0.8, 0.6);
            assert!(c.x >= 0.0 && c.x <= 1.0);
            assert!(c.y >= 0.0 && c.y <= 1.0);
            assert!(c.z >= 0.0 && c.z <= 1.0);
        }
    }
}
