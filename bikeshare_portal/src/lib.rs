mod client;
mod dom;
mod errors;
pub mod extract;
pub mod types;
pub use self::client::{Client, ClientConfig};
pub use self::errors::Error;
pub use self::extract::profile::{extract_profile, trips_link, TripsLink};
pub use self::extract::trips::{extract_trip_data, last_page_number};
