// src/contacts.rs - Contact spreadsheet discovery and parsing
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::models::{Contact, Result};

/// Finds the first `{company}*.csv` file in the working directory.
pub fn discover_contact_csv(company: &str) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(".")?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with(company) && name.ends_with(".csv"))
        })
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| format!("No {} CSV file found in the working directory", company).into())
}

pub fn read_contacts(path: &Path) -> Result<Vec<Contact>> {
    let file = std::fs::File::open(path)?;
    parse_contacts(file)
}

pub fn parse_contacts<R: std::io::Read>(reader: R) -> Result<Vec<Contact>> {
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut contacts = Vec::new();
    for record in csv_reader.records() {
        let Ok(record) = record else {
            warn!("Skipping unreadable CSV row");
            continue;
        };
        let row: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.trim().to_string(), value.trim().to_string()))
            .collect();
        contacts.push(contact_from_row(&row));
    }

    Ok(contacts)
}

fn contact_from_row(row: &HashMap<String, String>) -> Contact {
    let full_name = field(row, &["name", "Name"]);
    let first_name = {
        let explicit = field(row, &["First Name"]);
        if explicit.is_empty() {
            full_name
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string()
        } else {
            explicit
        }
    };
    let last_name = {
        let explicit = field(row, &["Last Name"]);
        if explicit.is_empty() {
            full_name
                .split_whitespace()
                .skip(1)
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            explicit
        }
    };

    Contact {
        first_name,
        last_name,
        email: field(row, &["Email", "email"]),
        company: field(row, &["Company", "company"]),
        title: field(row, &["Title", "title"]),
        linkedin_url: optional(field(row, &["Person Linkedin Url", "LinkedIn URL", "linkedin_url"])),
        website_url: optional(field(row, &["Website", "website"])),
        industry: optional(field(row, &["Industry", "industry"])),
        aws_usage: optional(field(row, &["AWS User - Gemini"])),
    }
}

/// First non-empty value among the recognized column names.
fn field(row: &HashMap<String, String>, names: &[&str]) -> String {
    names
        .iter()
        .find_map(|name| row.get(*name).filter(|value| !value.is_empty()))
        .cloned()
        .unwrap_or_default()
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Drops rows with neither a scrapeable URL nor a delivery address.
pub fn filter_processable(contacts: Vec<Contact>) -> Vec<Contact> {
    let total = contacts.len();
    let valid: Vec<Contact> = contacts.into_iter().filter(Contact::is_processable).collect();
    if valid.len() < total {
        info!("Dropped {} contacts with no URL and no email", total - valid.len());
    }
    valid
}

/// Random subsample of at most `limit` contacts.
pub fn sample_contacts(mut contacts: Vec<Contact>, limit: usize) -> Vec<Contact> {
    if contacts.len() > limit {
        fastrand::shuffle(&mut contacts);
        contacts.truncate(limit);
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
First Name,Last Name,Email,Company,Title,Person Linkedin Url,Industry,AWS User - Gemini
Jane,Doe,jane@acme.com,Acme,CTO,https://linkedin.com/in/jane-doe/,Robotics,Confirmed
John,Smith,,Initech,Engineer,,,
,,bare@nowhere.com,,,,,
";

    #[test]
    fn recognized_columns_map_onto_contacts() {
        let contacts = parse_contacts(CSV.as_bytes()).unwrap();
        assert_eq!(contacts.len(), 3);

        let jane = &contacts[0];
        assert_eq!(jane.first_name, "Jane");
        assert_eq!(jane.email, "jane@acme.com");
        assert_eq!(jane.linkedin_url.as_deref(), Some("https://linkedin.com/in/jane-doe/"));
        assert_eq!(jane.industry.as_deref(), Some("Robotics"));
        assert_eq!(jane.aws_usage.as_deref(), Some("Confirmed"));
    }

    #[test]
    fn lowercase_website_columns_are_recognized() {
        let csv = "name,email,website,company\nJoel Garcia,joel@acme.com,acme.com,Acme\n";
        let contacts = parse_contacts(csv.as_bytes()).unwrap();
        assert_eq!(contacts[0].first_name, "Joel");
        assert_eq!(contacts[0].last_name, "Garcia");
        assert_eq!(contacts[0].website_url.as_deref(), Some("acme.com"));
    }

    #[test]
    fn rows_without_email_or_url_are_dropped() {
        let contacts = parse_contacts(CSV.as_bytes()).unwrap();
        let valid = filter_processable(contacts);

        // John has neither an email nor any URL; Jane and the bare-email row stay.
        assert_eq!(valid.len(), 2);
        assert!(valid.iter().all(Contact::is_processable));
        assert!(!valid.iter().any(|c| c.first_name == "John"));
    }

    #[test]
    fn sampling_is_bounded_by_limit_and_population() {
        let contacts = parse_contacts(CSV.as_bytes()).unwrap();
        assert_eq!(sample_contacts(contacts.clone(), 2).len(), 2);
        assert_eq!(sample_contacts(contacts.clone(), 10).len(), 3);
        assert_eq!(sample_contacts(Vec::new(), 5).len(), 0);
    }
}
