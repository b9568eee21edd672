use ndarray::ArrayView2;

use crate::geometry::Spacing;

pub(crate) struct Interpolator;

impl Interpolator {
    /// Isotropic display dimensions (x, y, z) for a volume, scaled so the
    /// smallest spacing maps to one pixel. Coronal and sagittal slices are
    /// resampled to these extents to preserve physical aspect ratios.
    pub(crate) fn display_dimensions(spacing: Spacing, dim: (u32, u32, u32)) -> (u32, u32, u32) {
        let min_spacing = spacing.x.min(spacing.y).min(spacing.z);
        let inv_min_spacing = 1.0 / min_spacing;

        let (width, height, depth) = dim;
        let new_x = (width as f32 * spacing.x * inv_min_spacing) as u32;
        let new_y = (height as f32 * spacing.y * inv_min_spacing) as u32;
        let new_z = (depth as f32 * spacing.z * inv_min_spacing) as u32;

        (new_x, new_y, new_z)
    }

    #[inline]
    pub(crate) fn bilinear_interpolate(slice: &ArrayView2<u16>, y: f32, x: f32) -> u16 {
        let (height, width) = slice.dim();

        let y0 = y.floor() as usize;
        let x0 = x.floor() as usize;
        let y1 = (y0 + 1).min(height - 1);
        let x1 = (x0 + 1).min(width - 1);

        let dy = y - y0 as f32;
        let dx = x - x0 as f32;
        let one_minus_dx = 1.0 - dx;
        let one_minus_dy = 1.0 - dy;

        let v00 = slice[[y0, x0]] as f32;
        let v01 = slice[[y0, x1]] as f32;
        let v10 = slice[[y1, x0]] as f32;
        let v11 = slice[[y1, x1]] as f32;

        let v0 = v00.mul_add(one_minus_dx, v01 * dx);
        let v1 = v10.mul_add(one_minus_dx, v11 * dx);

        v0.mul_add(one_minus_dy, v1 * dy).round() as u16
    }
}
