use std::path::PathBuf;

use mpr_crosshair::{CanvasSize, Orientation, SortBy, ViewerState, VolumeLoader};

fn main() {
    tracing_subscriber::fmt::init();

    let volume = VolumeLoader::load_from_directory(PathBuf::from("dicom"), SortBy::InstanceNumber)
        .expect("should have loaded files from directory");

    let mut viewer = ViewerState::new(*volume.geometry());
    for orientation in Orientation::ALL {
        viewer.set_canvas_size(
            orientation,
            CanvasSize {
                width: 800.0,
                height: 600.0,
            },
        );
    }

    for orientation in Orientation::ALL {
        let point = viewer.crosshair(orientation);
        println!(
            "{orientation:?}: slice {} crosshair ({:.1}, {:.1})",
            viewer.slice(orientation),
            point.x,
            point.y
        );
    }

    let image = volume
        .slice_image(viewer.slice(Orientation::Axial), Orientation::Axial)
        .expect("should have extracted slice at center of volume");
    image
        .save("axial.png")
        .expect("should have saved slice image");
}
