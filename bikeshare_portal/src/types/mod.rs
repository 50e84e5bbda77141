mod account;
mod trip;

pub use self::account::{
    Account, BikeKey, BillingInformation, BillingSummary, CurrentMembership, LastTrip,
    MembershipStatus, NextMembership, Profile, Statistics, TripTotals,
};
pub use self::trip::RawTrip;
