pub mod colormap;
pub mod contour;
pub mod grid;
pub mod surface;
