//! CSV import and export of traveler profiles.
//!
//! The sheet format mirrors the profile JSON (camelCase headers, no id
//! column). Import is forgiving: rows with an unknown gender code or a
//! malformed birth date are skipped and counted, not fatal.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tm30_protocol::{Gender, Person, PersonId, current_year, validate_birth_date};
use tracing::{info, warn};

use crate::{ProfileStore, Result};

/// One spreadsheet row.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetRecord {
    first_name: String,
    last_name: String,
    passport_no: String,
    nationality: String,
    #[serde(default)]
    nationality_code: String,
    /// One-letter code, `M` or `F`.
    gender: String,
    birth_date: String,
    #[serde(default)]
    phone_no: String,
    #[serde(default)]
    check_in: Option<String>,
    #[serde(default)]
    check_out: Option<String>,
}

/// Outcome of a CSV import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows saved as new profiles.
    pub imported: usize,
    /// Rows rejected by validation.
    pub skipped: usize,
}

/// Write every saved profile to `path` as CSV. Returns the row count.
pub fn export_csv(profiles: &ProfileStore, path: &Path) -> Result<usize> {
    let persons = profiles.all();
    let mut writer = csv::Writer::from_path(path)?;
    for person in &persons {
        writer.serialize(to_record(person))?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = persons.len(), "profiles exported");
    Ok(persons.len())
}

/// Read `path` and save each valid row as a new profile.
pub fn import_csv(profiles: &ProfileStore, path: &Path) -> Result<ImportSummary> {
    let mut reader = csv::Reader::from_path(path)?;
    let year = current_year();
    let mut summary = ImportSummary {
        imported: 0,
        skipped: 0,
    };
    for (idx, row) in reader.deserialize::<SheetRecord>().enumerate() {
        let record = match row {
            Ok(record) => record,
            Err(err) => {
                warn!(row = idx + 1, %err, "unreadable row skipped");
                summary.skipped += 1;
                continue;
            }
        };
        match from_record(record, year) {
            Some(person) => {
                profiles.save(person, None)?;
                summary.imported += 1;
            }
            None => {
                warn!(row = idx + 1, "invalid row skipped");
                summary.skipped += 1;
            }
        }
    }
    info!(
        path = %path.display(),
        imported = summary.imported,
        skipped = summary.skipped,
        "import finished"
    );
    Ok(summary)
}

fn to_record(person: &Person) -> SheetRecord {
    SheetRecord {
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        passport_no: person.passport_no.clone(),
        nationality: person.nationality.clone(),
        nationality_code: person.nationality_code.clone(),
        gender: match person.gender {
            Gender::M => "M".into(),
            Gender::F => "F".into(),
        },
        birth_date: person.birth_date.clone(),
        phone_no: person.phone_no.clone(),
        check_in: person.check_in.clone(),
        check_out: person.check_out.clone(),
    }
}

fn from_record(record: SheetRecord, current_year: u32) -> Option<Person> {
    let gender = Gender::from_code(&record.gender)?;
    if !validate_birth_date(&record.birth_date, current_year) {
        return None;
    }
    if record.first_name.trim().is_empty() || record.passport_no.trim().is_empty() {
        return None;
    }
    Some(Person {
        id: PersonId(0),
        first_name: record.first_name,
        last_name: record.last_name,
        passport_no: record.passport_no,
        nationality: record.nationality,
        nationality_code: record.nationality_code,
        gender,
        birth_date: record.birth_date,
        phone_no: record.phone_no,
        check_in: record.check_in,
        check_out: record.check_out,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::Store;

    fn open(dir: &TempDir) -> ProfileStore {
        let store = Store::open(&dir.path().join("persons.json")).unwrap();
        ProfileStore::new(store)
    }

    fn somchai() -> Person {
        Person {
            id: PersonId(0),
            first_name: "Somchai".into(),
            last_name: "Sook".into(),
            passport_no: "AB1234567".into(),
            nationality: "THA : THAI".into(),
            nationality_code: "THA".into(),
            gender: Gender::M,
            birth_date: "05/11/1990".into(),
            phone_no: "0812345678".into(),
            check_in: None,
            check_out: None,
        }
    }

    #[test]
    fn export_then_import_preserves_profiles() {
        let dir = TempDir::new().unwrap();
        let src = open(&dir);
        src.save(somchai(), None).unwrap();
        let csv_path = dir.path().join("sheet.csv");
        assert_eq!(export_csv(&src, &csv_path).unwrap(), 1);

        let dst_dir = TempDir::new().unwrap();
        let dst = open(&dst_dir);
        let summary = import_csv(&dst, &csv_path).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 0);
        let got = &dst.all()[0];
        assert_eq!(got.first_name, "Somchai");
        assert_eq!(got.gender, Gender::M);
        assert!(got.id.0 > 0, "imported profiles get fresh ids");
    }

    #[test]
    fn invalid_rows_are_counted_not_fatal() {
        let dir = TempDir::new().unwrap();
        let profiles = open(&dir);
        let csv_path = dir.path().join("sheet.csv");
        fs::write(
            &csv_path,
            "firstName,lastName,passportNo,nationality,nationalityCode,gender,birthDate,phoneNo,checkIn,checkOut\n\
             Somchai,Sook,AB1234567,THA : THAI,THA,M,05/11/1990,,,\n\
             Bad,Gender,AB1,THA : THAI,THA,X,05/11/1990,,,\n\
             Bad,Date,AB2,THA : THAI,THA,F,5/11/1990,,,\n",
        )
        .unwrap();
        let summary = import_csv(&profiles, &csv_path).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(profiles.all().len(), 1);
    }
}
