//! Orientation transforms
//!
//! Each EXIF orientation code selects one fixed 2-D affine transform, written
//! in the canvas convention `[a, b, c, d, e, f]`:
//!
//! ```text
//! x' = a*x + c*y + e
//! y' = b*x + d*y + f
//! ```
//!
//! where `(x, y)` is a point of the image drawn at its target size `w x h` and
//! `(x', y')` the point on the output surface. Codes 5-8 exchange the axes, so
//! their surface is `h x w`.

use super::orientation::Orientation;
use super::resize::Dimensions;
use image::RgbImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffineTransform {
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub d: i64,
    pub e: i64,
    pub f: i64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform::new(1, 0, 0, 1, 0, 0);

    pub const fn new(a: i64, b: i64, c: i64, d: i64, e: i64, f: i64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Transform for an orientation code with the image drawn at `draw` size.
    /// Unknown codes map to the identity.
    pub fn for_orientation(orientation: Orientation, draw: Dimensions) -> Self {
        let w = draw.width as i64;
        let h = draw.height as i64;
        match orientation.code() {
            2 => Self::new(-1, 0, 0, 1, w, 0),
            3 => Self::new(-1, 0, 0, -1, w, h),
            4 => Self::new(1, 0, 0, -1, 0, h),
            5 => Self::new(0, 1, 1, 0, 0, 0),
            6 => Self::new(0, 1, -1, 0, h, 0),
            7 => Self::new(0, -1, -1, 0, h, w),
            8 => Self::new(0, -1, 1, 0, 0, w),
            _ => Self::IDENTITY,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether the linear part exchanges the x and y axes.
    pub fn swaps_axes(&self) -> bool {
        self.a == 0 && self.d == 0
    }

    /// Map the centre of source pixel `(x, y)` to the pixel it lands in.
    ///
    /// Works in doubled coordinates so pixel centres stay integral.
    pub fn apply_to_pixel(&self, x: u32, y: u32) -> (i64, i64) {
        let cx = 2 * x as i64 + 1;
        let cy = 2 * y as i64 + 1;
        let tx = self.a * cx + self.c * cy + 2 * self.e;
        let ty = self.b * cx + self.d * cy + 2 * self.f;
        (tx.div_euclid(2), ty.div_euclid(2))
    }
}

/// Surface size needed to hold an image drawn at `draw` under `orientation`.
pub fn surface_dimensions(orientation: Orientation, draw: Dimensions) -> Dimensions {
    if AffineTransform::for_orientation(orientation, draw).swaps_axes() {
        draw.transposed()
    } else {
        draw
    }
}

/// Draw size and surface size for an image of `original` stored pixels.
///
/// The box bounds the upright output, so for axis-swapping codes the box is
/// fitted against the transposed size and the draw size is its transpose.
pub fn fit_oriented(
    orientation: Orientation,
    original: Dimensions,
    max_width: u32,
    max_height: u32,
) -> (Dimensions, Dimensions) {
    let upright = if orientation.swaps_axes() {
        original.transposed()
    } else {
        original
    };
    let surface = upright.fit_within(max_width, max_height);
    let draw = if orientation.swaps_axes() {
        surface.transposed()
    } else {
        surface
    };
    (draw, surface)
}

/// Draw `img` onto a fresh surface through the orientation transform.
pub fn render_oriented(img: RgbImage, orientation: Orientation) -> RgbImage {
    let draw = Dimensions::new(img.width(), img.height());
    let transform = AffineTransform::for_orientation(orientation, draw);
    if transform.is_identity() {
        return img;
    }

    let surface_dims = surface_dimensions(orientation, draw);
    let mut surface = RgbImage::new(surface_dims.width, surface_dims.height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let (tx, ty) = transform.apply_to_pixel(x, y);
        if tx >= 0 && ty >= 0 && (tx as u32) < surface_dims.width && (ty as u32) < surface_dims.height
        {
            surface.put_pixel(tx as u32, ty as u32, *pixel);
        }
    }

    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const MARK: Rgb<u8> = Rgb([255, 0, 0]);

    /// 3x2 image with the top-left pixel marked.
    fn marked() -> RgbImage {
        let mut img = RgbImage::from_pixel(3, 2, Rgb([0, 0, 255]));
        img.put_pixel(0, 0, MARK);
        img
    }

    fn mark_position(img: &RgbImage) -> (u32, u32) {
        img.enumerate_pixels()
            .find(|(_, _, p)| **p == MARK)
            .map(|(x, y, _)| (x, y))
            .unwrap()
    }

    #[test]
    fn test_lookup_table() {
        let draw = Dimensions::new(30, 20);
        assert_eq!(
            AffineTransform::for_orientation(Orientation(2), draw),
            AffineTransform::new(-1, 0, 0, 1, 30, 0)
        );
        assert_eq!(
            AffineTransform::for_orientation(Orientation(6), draw),
            AffineTransform::new(0, 1, -1, 0, 20, 0)
        );
        assert_eq!(
            AffineTransform::for_orientation(Orientation(7), draw),
            AffineTransform::new(0, -1, -1, 0, 20, 30)
        );
        assert_eq!(
            AffineTransform::for_orientation(Orientation(8), draw),
            AffineTransform::new(0, -1, 1, 0, 0, 30)
        );
    }

    #[test]
    fn test_unknown_codes_are_identity() {
        let draw = Dimensions::new(30, 20);
        for code in [0u16, 1, 9, 255, u16::MAX] {
            assert!(AffineTransform::for_orientation(Orientation(code), draw).is_identity());
        }
    }

    #[test]
    fn test_surface_dimensions() {
        let draw = Dimensions::new(30, 20);
        for code in 1..=4 {
            assert_eq!(surface_dimensions(Orientation(code), draw), draw);
        }
        for code in 5..=8 {
            assert_eq!(
                surface_dimensions(Orientation(code), draw),
                Dimensions::new(20, 30)
            );
        }
    }

    #[test]
    fn test_fit_oriented_bounds_upright_output() {
        let original = Dimensions::new(4000, 2000);

        let (draw, surface) = fit_oriented(Orientation(1), original, 1920, 1080);
        assert_eq!(draw, Dimensions::new(1920, 960));
        assert_eq!(surface, draw);

        // Upright 2000x4000 into 1920x1080: scale 0.27.
        let (draw, surface) = fit_oriented(Orientation(6), original, 1920, 1080);
        assert_eq!(surface, Dimensions::new(540, 1080));
        assert_eq!(draw, Dimensions::new(1080, 540));
    }

    #[test]
    fn test_fit_oriented_small_rotated_image_untouched() {
        let (draw, surface) = fit_oriented(Orientation(8), Dimensions::new(64, 32), 100, 50);
        assert_eq!(draw, Dimensions::new(64, 32));
        assert_eq!(surface, Dimensions::new(32, 64));
    }

    #[test]
    fn test_fit_oriented_never_exceeds_box() {
        for code in 1..=8 {
            let (draw, surface) =
                fit_oriented(Orientation(code), Dimensions::new(400, 200), 100, 50);
            assert!(surface.width <= 100 && surface.height <= 50, "code {}", code);
            assert_eq!(surface_dimensions(Orientation(code), draw), surface, "code {}", code);
        }
    }

    #[test]
    fn test_identity_returns_input() {
        let img = marked();
        assert_eq!(render_oriented(img.clone(), Orientation(1)), img);
        assert_eq!(render_oriented(img.clone(), Orientation(12)), img);
    }

    #[test]
    fn test_marked_corner_lands_where_expected() {
        // (code, surface size, position of the top-left source pixel)
        let cases = [
            (2, (3, 2), (2, 0)),
            (3, (3, 2), (2, 1)),
            (4, (3, 2), (0, 1)),
            (5, (2, 3), (0, 0)),
            (6, (2, 3), (1, 0)),
            (7, (2, 3), (1, 2)),
            (8, (2, 3), (0, 2)),
        ];

        for (code, size, expected) in cases {
            let out = render_oriented(marked(), Orientation(code));
            assert_eq!(out.dimensions(), size, "code {}", code);
            assert_eq!(mark_position(&out), expected, "code {}", code);
        }
    }

    #[test]
    fn test_every_pixel_is_covered() {
        let mut img = RgbImage::new(4, 3);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgb([x as u8 + 1, y as u8 + 1, 7]);
        }

        for code in 2..=8 {
            let out = render_oriented(img.clone(), Orientation(code));
            assert!(
                out.pixels().all(|p| p[2] == 7),
                "code {} left uncovered pixels",
                code
            );
        }
    }

    #[test]
    fn test_rotate_90_matches_imageops() {
        let mut img = RgbImage::new(4, 3);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgb([x as u8, y as u8, 0]);
        }
        let expected = image::imageops::rotate90(&img);
        assert_eq!(render_oriented(img.clone(), Orientation(6)), expected);

        let expected = image::imageops::rotate270(&img);
        assert_eq!(render_oriented(img.clone(), Orientation(8)), expected);

        let expected = image::imageops::rotate180(&img);
        assert_eq!(render_oriented(img, Orientation(3)), expected);
    }
}
