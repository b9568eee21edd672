use crate::enums::Orientation;
use crate::geometry::{Spacing, VolumeGeometry};
use crate::interpolator::Interpolator;

use image::ImageBuffer;
use image::Luma;
use ndarray::Array3;
use ndarray::ArrayView2;
use ndarray::s;
use rayon::prelude::*;

/// Voxel data of a loaded study. The array is indexed `(z, y, x)`; the
/// geometry is derived from the array shape and the acquisition spacing and
/// stays immutable for the lifetime of the volume.
pub struct Volume {
    data: Array3<u16>,
    geometry: VolumeGeometry,
}

impl Volume {
    pub fn new(data: Array3<u16>, spacing: Spacing) -> Self {
        let (depth, height, width) = data.dim();
        let geometry = VolumeGeometry::new(width as u32, height as u32, depth as u32, spacing);
        Self { data, geometry }
    }

    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    /// Dimensions of the volume array (depth, height, width).
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    pub fn data(&self) -> &Array3<u16> {
        &self.data
    }

    #[inline]
    fn normalize_to_u8(value: u16) -> u8 {
        ((value as f32 / 65535.0) * 255.0).clamp(0.0, 255.0) as u8
    }

    /// 2D view of one slice. Axial fixes Z, coronal fixes Y, sagittal
    /// fixes X; rows/columns follow the standard plane conventions.
    pub fn slice_view(&self, index: u32, orientation: Orientation) -> Option<ArrayView2<'_, u16>> {
        if index >= self.geometry.slice_count(orientation) {
            return None;
        }
        let index = index as usize;
        let view = match orientation {
            Orientation::Axial => self.data.slice(s![index, .., ..]),
            Orientation::Coronal => self.data.slice(s![.., index, ..]),
            Orientation::Sagittal => self.data.slice(s![.., .., index]),
        };
        Some(view)
    }

    /// Pixel dimensions (width, height) a slice is rendered at, resampled
    /// so anisotropic spacing does not distort the image.
    pub fn display_dimensions(&self, orientation: Orientation) -> (u32, u32) {
        let (iso_x, iso_y, iso_z) = Interpolator::display_dimensions(
            self.geometry.spacing,
            (self.geometry.width, self.geometry.height, self.geometry.depth),
        );
        match orientation {
            Orientation::Axial => (iso_x, iso_y),
            Orientation::Coronal => (iso_x, iso_z),
            Orientation::Sagittal => (iso_y, iso_z),
        }
    }

    /// Grayscale image of one slice. Axial slices are isotropic in-plane
    /// and converted directly; coronal and sagittal slices are resampled
    /// to their display dimensions with bilinear interpolation.
    pub fn slice_image(
        &self,
        index: u32,
        orientation: Orientation,
    ) -> Option<ImageBuffer<Luma<u8>, Vec<u8>>> {
        let slice = self.slice_view(index, orientation)?;

        if matches!(orientation, Orientation::Axial) {
            return Self::slice_to_image(&slice);
        }

        let (width, height) = self.display_dimensions(orientation);
        Self::resample_slice(&slice, width, height)
    }

    fn slice_to_image(slice: &ArrayView2<'_, u16>) -> Option<ImageBuffer<Luma<u8>, Vec<u8>>> {
        let (height, width) = slice.dim();
        let pixel_data: Vec<u8> = slice
            .into_par_iter()
            .map(|&v| Self::normalize_to_u8(v))
            .collect();
        ImageBuffer::from_raw(width as u32, height as u32, pixel_data)
    }

    fn resample_slice(
        slice: &ArrayView2<'_, u16>,
        width: u32,
        height: u32,
    ) -> Option<ImageBuffer<Luma<u8>, Vec<u8>>> {
        let (slice_height, slice_width) = slice.dim();

        let pixel_data: Vec<u8> = (0..height)
            .into_par_iter()
            .flat_map(|y| {
                (0..width)
                    .map(|x| {
                        // Normalized coordinates with half-pixel offset.
                        let norm_x = (x as f32 + 0.5) / width as f32;
                        let norm_y = (y as f32 + 0.5) / height as f32;

                        let src_x = norm_x * slice_width as f32 - 0.5;
                        let src_y = norm_y * slice_height as f32 - 0.5;

                        let src_x = src_x.clamp(0.0, (slice_width - 1) as f32);
                        let src_y = src_y.clamp(0.0, (slice_height - 1) as f32);

                        let value = Interpolator::bilinear_interpolate(slice, src_y, src_x);
                        Self::normalize_to_u8(value)
                    })
                    .collect::<Vec<u8>>()
            })
            .collect();

        ImageBuffer::from_raw(width, height, pixel_data)
    }
}
