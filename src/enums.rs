/// The three orthogonal viewing planes of a medical volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Axial,
    Coronal,
    Sagittal,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [
        Orientation::Axial,
        Orientation::Coronal,
        Orientation::Sagittal,
    ];
}

/// Which part of the crosshair a drag gesture grabbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    /// Center marker, moves both axes.
    Center,
    /// Vertical line, moves only the screen X axis.
    Vertical,
    /// Horizontal line, moves only the screen Y axis.
    Horizontal,
}

/// Crosshair element under the pointer, used for hover styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrosshairElement {
    Vertical,
    Horizontal,
    Center,
}

/// Direction of a single-step slice navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceStep {
    Next,
    Prev,
}

#[derive(Default)]
pub enum SortBy {
    #[default]
    ImagePositionPatient,
    TablePosition,
    InstanceNumber,
    None,
}
