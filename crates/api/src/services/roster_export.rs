//! CSV rendering of a match roster.

use domain::models::RosterEntry;

pub const ROSTER_CSV_HEADER: &str = "ID,Name,Email";

/// One line per registration: registration ID, display name, email.
pub fn roster_csv(entries: &[RosterEntry]) -> String {
    let mut csv = String::with_capacity(64 * (entries.len() + 1));
    csv.push_str(ROSTER_CSV_HEADER);
    csv.push('\n');

    for entry in entries {
        csv.push_str(&format!(
            "{},{},{}\n",
            entry.registration_id,
            escape_csv(&entry.display_name),
            escape_csv(&entry.email)
        ));
    }

    csv
}

fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// `Content-Disposition` file name for a match's roster.
pub fn roster_filename(match_id: uuid::Uuid) -> String {
    format!("roster-{}.csv", match_id)
}
