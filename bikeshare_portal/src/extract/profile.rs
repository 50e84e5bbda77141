//! Field extractors for the member profile page.
//!
//! The class strings below are the wire contract against the portal's
//! current template; each extractor looks up one node and degrades to
//! `None` when it is absent or malformed. Two of the field groups have no
//! unique selectors in the real markup and are read by position instead:
//!
//! - lifetime statistics block (`VALUE_STATS_PERIOD`): index 0 = total
//!   usage time, 1 = distance traveled, 2 = gas saved, 3 = CO2 reduced
//!   (the trip-count node carries an extra `_lifetime` class and is
//!   addressed separately);
//! - bike-angels points block: the unlabeled `__part` node is the current
//!   total, `__part_1` the annual, `__part_2` the lifetime.

use crate::dom::Page;
use crate::types::{
    Account, BikeKey, BillingInformation, BillingSummary, CurrentMembership, LastTrip,
    MembershipStatus, NextMembership, Profile, Statistics, TripTotals,
};
use scraper::Selector;

const VALUE_STATS_LIFETIME: &str = "ed-panel__info__value ed-panel__info__value_member-stats-for-period ed-panel__info__value_member-stats-for-period_lifetime";
const VALUE_STATS_PERIOD: &str =
    "ed-panel__info__value ed-panel__info__value_member-stats-for-period";

const VALUE_FIRST_NAME: &str = "ed-panel__info__value ed-panel__info__value_firstname";
const VALUE_LAST_NAME: &str = "ed-panel__info__value ed-panel__info__value_lastname";
const VALUE_USER_NAME: &str = "ed-panel__info__value ed-panel__info__value_username";
const VALUE_DATE_OF_BIRTH: &str = "ed-panel__info__value ed-panel__info__value_date-of-birth";
const VALUE_GENDER: &str = "ed-panel__info__value ed-panel__info__value_gender";
const VALUE_PHONE: &str = "ed-panel__info__value ed-panel__info__value_phone-number";
const VALUE_EMAIL: &str = "ed-panel__info__value ed-panel__info__value_email";
const VALUE_MEMBER_SINCE: &str = "ed-panel__info__value ed-panel__info__value_member-since";
const VALUE_ANGEL_SINCE: &str = "ed-panel__info__value ed-panel__info__value_bike-angel-since";

const PART_START_DATE: &str = "ed-panel__info__value__part ed-panel__info__value__part_start-date";
const PART_END_DATE: &str = "ed-panel__info__value__part ed-panel__info__value__part_end-date";
const PART_START_STATION: &str =
    "ed-panel__info__value__part ed-panel__info__value__part_start-station-name";
const PART_END_STATION: &str =
    "ed-panel__info__value__part ed-panel__info__value__part_end-station-name";
const VALUE_LAST_TRIP_TIME: &str =
    "ed-panel__info__value ed-panel__info__value_summary ed-panel__info__value_last-trip";
const VALUE_LAST_TRIP_ANGELS: &str =
    "ed-panel__info__value ed-panel__info__value_last-trip-bike-angel";

const PART: &str = "ed-panel__info__value__part";
const PART_ANNUAL: &str = "ed-panel__info__value__part ed-panel__info__value__part_1";
const PART_LIFETIME: &str = "ed-panel__info__value__part ed-panel__info__value__part_2";

const VALUE_KEY_NUMBER: &str = "ed-panel__info__value ed-panel__info__value_key-number";
const VALUE_KEY_STATUS: &str = "ed-panel__info__value ed-panel__info__value_key-status";

const VALUE_SUB_TYPE: &str = "ed-panel__info__value ed-panel__info__value_subscription-type";
const VALUE_SUB_STATUS: &str = "ed-panel__info__value ed-panel__info__value_subscription-status";
const VALUE_SUB_END: &str = "ed-panel__info__value ed-panel__info__value_subscription-end-date";
const VALUE_RENEWED_TYPE: &str =
    "ed-panel__info__value ed-panel__info__value_renewed-subscription-type";
const VALUE_RENEWED_STATUS: &str =
    "ed-panel__info__value ed-panel__info__value_renewed-subscription-status";
const VALUE_RENEWED_START: &str =
    "ed-panel__info__value ed-panel__info__value_renewed-subscription-start-date";
const VALUE_RENEWED_END: &str =
    "ed-panel__info__value ed-panel__info__value_renewed-subscription-end-date";

const VALUE_NEXT_BILLING: &str = "ed-panel__info__value ed-panel__info__value_period";
const VALUE_BALANCE: &str = "ed-panel__info__value ed-panel__info__value_amount";
const PART_POSTAL_CODE: &str =
    "ed-panel__info__value__part ed-panel__info__value__part_postalCode";

const MENU_TRIPS: &str =
    "ed-profile-menu__link ed-profile-menu__link_trips ed-profile-menu__link_level1";

/// Builds the account model from profile-page markup.
///
/// Infallible by design: every field lookup recovers to `None` on its own,
/// so one missing panel never costs the rest of the page. The bike-angels
/// fields are only read when `extended` is set; otherwise they stay `None`
/// for the whole run. `account.id` is filled later, by [`trips_link`]
/// discovery, not here.
pub fn extract_profile(html: &str, extended: bool, ts: i64) -> Account {
    let page = Page::parse(html);
    let stats = page.texts_exact("div", VALUE_STATS_PERIOD);

    let (ba_current, ba_annual, ba_lifetime, last_trip_points) = if extended {
        (
            page.text_with_class("div", PART)
                .and_then(|t| leading_int(&t)),
            page.text_exact("div", PART_ANNUAL)
                .and_then(|t| leading_int(&t)),
            page.text_exact("div", PART_LIFETIME)
                .and_then(|t| leading_int(&t)),
            page.text_exact("div", VALUE_LAST_TRIP_ANGELS),
        )
    } else {
        (None, None, None, None)
    };

    Account {
        trips: TripTotals {
            lifetime: page
                .text_exact("div", VALUE_STATS_LIFETIME)
                .and_then(|t| leading_int(&t)),
        },
        last_trip: LastTrip {
            date: both_or_neither(
                page.text_exact("div", PART_START_DATE),
                page.text_exact("div", PART_END_DATE),
            ),
            station: both_or_neither(
                page.text_exact("div", PART_START_STATION),
                page.text_exact("div", PART_END_STATION),
            ),
            trip_time: page.text_exact("div", VALUE_LAST_TRIP_TIME),
            bike_angels_points: last_trip_points,
        },
        bike_key: BikeKey {
            number: page.text_exact("div", VALUE_KEY_NUMBER),
            status: page.text_exact("div", VALUE_KEY_STATUS),
        },
        membership_status: MembershipStatus {
            current: CurrentMembership {
                kind: page.text_exact("div", VALUE_SUB_TYPE),
                status: page.text_exact("div", VALUE_SUB_STATUS),
                expiration: page.text_exact("div", VALUE_SUB_END),
            },
            next: NextMembership {
                kind: page.text_exact("div", VALUE_RENEWED_TYPE),
                status: page.text_exact("div", VALUE_RENEWED_STATUS),
                start: page.text_exact("div", VALUE_RENEWED_START),
                expiration: page.text_exact("div", VALUE_RENEWED_END),
            },
        },
        billing_summary: BillingSummary {
            next_billing_date: page.text_exact("div", VALUE_NEXT_BILLING),
            current_balance: page.text_exact("div", VALUE_BALANCE),
        },
        billing_information: BillingInformation {
            postal_code: page.text_exact("div", PART_POSTAL_CODE),
        },
        profile: Profile {
            first_name: page.text_exact("div", VALUE_FIRST_NAME),
            last_name: page.text_exact("div", VALUE_LAST_NAME),
            user_name: page.text_exact("div", VALUE_USER_NAME),
            date_of_birth: page.text_exact("div", VALUE_DATE_OF_BIRTH),
            gender: page.text_exact("div", VALUE_GENDER),
            phone: page.text_exact("div", VALUE_PHONE),
            email: page.text_exact("div", VALUE_EMAIL),
            member_since: page.text_exact("div", VALUE_MEMBER_SINCE),
            bike_angel_since: page.text_exact("div", VALUE_ANGEL_SINCE),
        },
        my_statistics: Statistics {
            number_of_trips: page.text_exact("div", VALUE_STATS_LIFETIME),
            total_usage_time: stats.first().cloned(),
            distance_traveled: stats.get(1).cloned(),
            gas_saved: stats.get(2).cloned(),
            co2_reduced: stats.get(3).cloned(),
            bike_angels_current: ba_current,
            bike_angels_annual: ba_annual,
            bike_angels_lifetime: ba_lifetime,
        },
        id: Vec::new(),
        ts,
    }
}

/// The trips-history link from the profile menu, with the account id the
/// portal embeds as its last path segment.
#[derive(Clone, Debug, PartialEq)]
pub struct TripsLink {
    /// Path relative to the member base URL.
    pub path: String,
    pub account_id: String,
}

/// Extracts the trips-menu link. `None` here is fatal to pagination and is
/// escalated by the client.
pub fn trips_link(html: &str) -> Option<TripsLink> {
    let page = Page::parse(html);
    let item = page.first_exact("li", MENU_TRIPS)?;
    let anchor = Selector::parse("a").ok()?;
    let href = item.select(&anchor).next()?.value().attr("href")?;
    let account_id = href.rsplit('/').next().unwrap_or("").to_string();
    Some(TripsLink {
        path: href.to_string(),
        account_id,
    })
}

/// Integer before the first space, as in `"70 points (August)"` -> 70.
fn leading_int(text: &str) -> Option<i64> {
    text.split(' ').next()?.parse().ok()
}

/// Pairs degrade whole: a missing part empties both slots rather than
/// leaving a half-filled pair behind.
fn both_or_neither(
    first: Option<String>,
    second: Option<String>,
) -> (Option<String>, Option<String>) {
    match (first, second) {
        (Some(a), Some(b)) => (Some(a), Some(b)),
        _ => (None, None),
    }
}
