mod coordinates;
mod quote;
mod ride;
mod ride_request;
mod route_plan;
mod stop;
mod vehicle;

pub use coordinates::{earth, Coordinates, GeoPoint};
pub use quote::{Quote, QuoteRequest, QuoteStop};
pub use ride::{Ride, RidePayload, Status as RideStatus, SubmissionReceipt, Waypoint};
pub use ride_request::RideRequest;
pub use route_plan::{round2, RoutePlan};
pub use stop::{Stop, StopKind};
pub use vehicle::{VehicleCatalog, VehicleOption, DEFAULT_VEHICLE_TYPE};
