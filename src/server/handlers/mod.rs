pub mod geocode;
pub mod quotes;
pub mod rides;
pub mod vehicles;
