use anyhow::Result;
use bikeshare_lib::types::Account;
use bikeshare_lib::{Export, StationSet};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Prints the trip export: the hydrated rows when present, otherwise the
/// raw rows.
pub fn print_trips(export: &Export, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => match &export.trips_full {
            Some(full) => println!("{}", serde_json::to_string_pretty(full)?),
            None => println!("{}", serde_json::to_string_pretty(&export.trips)?),
        },
        OutputFormat::Summary => {
            for line in trips_summary(export) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

pub fn print_account(account: &Account, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(account)?),
        OutputFormat::Summary => {
            let name = [&account.profile.first_name, &account.profile.last_name]
                .iter()
                .filter_map(|part| part.as_deref())
                .collect::<Vec<_>>()
                .join(" ");
            println!("{}", name);
            if let Some(lifetime) = account.trips.lifetime {
                println!("{} lifetime trips", lifetime);
            }
            if let Some(member_since) = &account.profile.member_since {
                println!("member since {}", member_since);
            }
        }
    }
    Ok(())
}

pub fn print_stations(stations: &StationSet, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stations)?),
        OutputFormat::Summary => println!("{} stations", stations.len()),
    }
    Ok(())
}

fn trips_summary(export: &Export) -> Vec<String> {
    let mut lines = vec![
        format!("account {}", export.account.id.join(",")),
        format!(
            "{} trips across {} stations",
            export.trips.len(),
            export.stations.len()
        ),
    ];
    if let Some(latest) = export.trips.first() {
        lines.push(format!(
            "most recent: {} -> {} ({})",
            latest.start_name, latest.end_name, latest.duration
        ));
    }
    if let Some(full) = &export.trips_full {
        let unresolved = full.iter().filter(|t| t.start_id == "-" || t.end_id == "-").count();
        lines.push(format!("{} hydrated rows, {} with unresolved docks", full.len(), unresolved));
    }
    lines
}
