//! The account data model assembled from the profile page.
//!
//! Every leaf defaults to `None` and is populated at most once, by exactly
//! one extractor; a failed lookup leaves the leaf `None` without affecting
//! its siblings. Two-part fields serialize as two-element arrays.

use serde::{Deserialize, Serialize};

/// Everything scraped from the member profile page, plus the capture
/// timestamp and the account id discovered from the trips link.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Account {
    pub trips: TripTotals,
    pub last_trip: LastTrip,
    pub bike_key: BikeKey,
    pub membership_status: MembershipStatus,
    pub billing_summary: BillingSummary,
    pub billing_information: BillingInformation,
    pub profile: Profile,
    pub my_statistics: Statistics,
    /// Account identifiers parsed from the trips link; one entry per run.
    pub id: Vec<String>,
    /// Unix seconds at capture time.
    pub ts: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TripTotals {
    pub lifetime: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LastTrip {
    /// Start and end date texts; `(None, None)` if either part is missing.
    pub date: (Option<String>, Option<String>),
    /// Start and end station names; `(None, None)` if either part is missing.
    pub station: (Option<String>, Option<String>),
    pub trip_time: Option<String>,
    pub bike_angels_points: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BikeKey {
    pub number: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MembershipStatus {
    pub current: CurrentMembership,
    pub next: NextMembership,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CurrentMembership {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub expiration: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NextMembership {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub start: Option<String>,
    pub expiration: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BillingSummary {
    pub next_billing_date: Option<String>,
    pub current_balance: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BillingInformation {
    pub postal_code: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub member_since: Option<String>,
    pub bike_angel_since: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    pub number_of_trips: Option<String>,
    pub total_usage_time: Option<String>,
    pub distance_traveled: Option<String>,
    pub gas_saved: Option<String>,
    pub co2_reduced: Option<String>,
    pub bike_angels_current: Option<i64>,
    pub bike_angels_annual: Option<i64>,
    pub bike_angels_lifetime: Option<i64>,
}
