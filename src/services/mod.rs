//! Services organized by domain concern.

pub mod bootcamp_service;
pub mod file_service;
pub mod geocoder;

pub use bootcamp_service::BootcampService;
pub use file_service::FileService;
pub use geocoder::Geocoder;
