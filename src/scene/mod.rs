pub(crate) mod builder;
pub(crate) mod clip;
pub(crate) mod duration;
pub(crate) mod export;
pub(crate) mod model;
pub(crate) mod parse;
pub(crate) mod position;
pub(crate) mod project;
pub(crate) mod sample;
pub(crate) mod validate;
pub(crate) mod video;
