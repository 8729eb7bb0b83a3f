pub(crate) mod panel;
pub(crate) mod raster;
