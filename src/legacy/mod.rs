//! V1 portal pieces: hand-rolled static file serving and the server-rendered
//! HTML pages backed by the flat-file contact log.

pub mod pages;
pub mod static_files;
