use bikeshare_portal::types::Account;
use bikeshare_portal::{extract_profile, trips_link};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn profile_fixture_extracts_account() {
    let html = load_fixture("profile.html");
    let account = extract_profile(&html, true, 1565600000);

    assert_eq!(account.profile.first_name.as_deref(), Some("Jo"));
    assert_eq!(account.trips.lifetime, Some(1040));
    assert_eq!(account.my_statistics.bike_angels_current, Some(70));
    assert_eq!(
        account.last_trip.station.0.as_deref(),
        Some("10 Ave & W 28 St")
    );
    assert_eq!(account.billing_information.postal_code.as_deref(), Some("10001"));

    let link = trips_link(&html).unwrap();
    assert_eq!(link.account_id, "4271");
}

#[test]
fn account_json_round_trip_is_exact() {
    let html = load_fixture("profile.html");
    let mut account = extract_profile(&html, true, 1565600000);
    account.id.push("4271".to_string());

    let json = serde_json::to_string_pretty(&account).unwrap();
    let reloaded: Account = serde_json::from_str(&json).unwrap();
    assert_eq!(account, reloaded);

    // the nested two-part fields serialize as arrays, membership types
    // under the `type` key
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["last_trip"]["date"].is_array());
    assert_eq!(value["membership_status"]["current"]["type"], "Annual Membership");
    assert_eq!(value["id"][0], "4271");
    assert_eq!(value["ts"], 1565600000);
}

#[test]
fn extended_fields_stay_null_without_the_flag() {
    let html = load_fixture("profile.html");
    let account = extract_profile(&html, false, 0);
    let value = serde_json::to_value(&account).unwrap();
    assert!(value["my_statistics"]["bike_angels_current"].is_null());
    assert!(value["my_statistics"]["bike_angels_annual"].is_null());
    assert!(value["my_statistics"]["bike_angels_lifetime"].is_null());
    assert!(value["last_trip"]["bike_angels_points"].is_null());
}
