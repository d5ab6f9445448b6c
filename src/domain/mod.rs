// Domain layer: request/response models, URL parsing and the ports the extraction chain depends on.

pub mod model;
pub mod ports;
pub mod shortcode;
pub mod url_check;
