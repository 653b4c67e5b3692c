//! Read-only search and sort over patient listings.
//!
//! The query functions operate on a snapshot (a slice of records cloned out
//! of the store) and always return a fresh `Vec`, leaving the input
//! untouched. Filtering and ordering never mutate the store.

use crate::patient::Patient;
use crate::PatientError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field a patient listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    City,
    Age,
    Height,
    Weight,
    Bmi,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::City => "city",
            SortField::Age => "age",
            SortField::Height => "height",
            SortField::Weight => "weight",
            SortField::Bmi => "bmi",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortField {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "city" => Ok(SortField::City),
            "age" => Ok(SortField::Age),
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(PatientError::InvalidInput(format!(
                "unknown sort field '{}', expected one of id, name, city, age, height, weight, bmi",
                other
            ))),
        }
    }
}

/// Direction of an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = PatientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(PatientError::InvalidInput(
                "sort order must be 'asc' or 'desc'".into(),
            )),
        }
    }
}

/// Case-insensitive free-text search across `name`, `id` and `city`.
///
/// The term is trimmed and lowercased; a record matches when any of the
/// three fields contains the term as a substring. An empty or
/// whitespace-only term matches every record, preserving input order.
pub fn search(records: &[Patient], term: &str) -> Vec<Patient> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|patient| {
            patient.name.contains_ignore_case(&needle)
                || patient.id.to_lowercase().contains(&needle)
                || patient.city.contains_ignore_case(&needle)
        })
        .cloned()
        .collect()
}

/// Returns the records ordered by `field` in the given direction.
///
/// The sort is stable: records comparing equal on the key keep their input
/// order, in both directions. Numeric fields compare via `f64::total_cmp`,
/// string fields by ordinal (byte-wise) ordering.
pub fn sort(records: &[Patient], field: SortField, direction: SortDirection) -> Vec<Patient> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by(field, a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

fn compare_by(field: SortField, a: &Patient, b: &Patient) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::City => a.city.cmp(&b.city),
        SortField::Age => a.age.cmp(&b.age),
        SortField::Height => a.height.total_cmp(&b.height),
        SortField::Weight => a.weight.total_cmp(&b.weight),
        SortField::Bmi => a.bmi.total_cmp(&b.bmi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::PatientDraft;

    fn patient(id: &str, name: &str, city: &str, height: f64, weight: f64) -> Patient {
        Patient::from_draft(PatientDraft {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            age: 30,
            gender: "other".to_string(),
            height,
            weight,
        })
        .unwrap()
    }

    fn sample() -> Vec<Patient> {
        vec![
            patient("P001", "Ana Jones", "New York", 1.75, 70.0),
            patient("P002", "Bruno Diaz", "London", 1.80, 95.0),
            patient("P003", "Cleo Nyati", "Nairobi", 1.60, 48.0),
        ]
    }

    #[test]
    fn test_search_matches_city_case_insensitively() {
        let records = sample();
        let hits = search(&records, "YORK");
        let ids: Vec<_> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P001"]);
    }

    #[test]
    fn test_search_matches_name_substring() {
        let records = sample();
        // "ny" occurs in "Cleo Nyati" and nowhere else
        let hits = search(&records, "ny");
        let ids: Vec<_> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P003"]);
    }

    #[test]
    fn test_search_matches_id_field() {
        let records = sample();
        let hits = search(&records, "p002");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "P002");
    }

    #[test]
    fn test_search_empty_term_returns_everything_in_order() {
        let records = sample();
        let hits = search(&records, "   ");
        let ids: Vec<_> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P001", "P002", "P003"]);
    }

    #[test]
    fn test_search_no_match_returns_empty() {
        let records = sample();
        assert!(search(&records, "zzz").is_empty());
    }

    #[test]
    fn test_search_leaves_input_untouched() {
        let records = sample();
        let _ = search(&records, "ana");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "P001");
    }

    #[test]
    fn test_sort_by_numeric_field() {
        let records = sample();
        let sorted = sort(&records, SortField::Weight, SortDirection::Ascending);
        let ids: Vec<_> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P003", "P001", "P002"]);
    }

    #[test]
    fn test_sort_descending_reverses_order() {
        let records = sample();
        let sorted = sort(&records, SortField::Weight, SortDirection::Descending);
        let ids: Vec<_> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P002", "P001", "P003"]);
    }

    #[test]
    fn test_sort_by_name_uses_ordinal_ordering() {
        let records = sample();
        let sorted = sort(&records, SortField::Name, SortDirection::Ascending);
        let names: Vec<_> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Jones", "Bruno Diaz", "Cleo Nyati"]);
    }

    #[test]
    fn test_sort_ties_keep_input_order_in_both_directions() {
        // same height and weight, so every sort key compares equal
        let records = vec![
            patient("P010", "First", "Town", 1.70, 70.0),
            patient("P011", "Second", "Town", 1.70, 70.0),
            patient("P012", "Third", "Town", 1.70, 70.0),
        ];

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sorted = sort(&records, SortField::Bmi, direction);
            let ids: Vec<_> = sorted.iter().map(|p| p.id.as_str()).collect();
            assert_eq!(ids, vec!["P010", "P011", "P012"]);
        }
    }

    #[test]
    fn test_sort_field_parses_known_names() {
        assert_eq!("bmi".parse::<SortField>().unwrap(), SortField::Bmi);
        assert_eq!("Height".parse::<SortField>().unwrap(), SortField::Height);
        assert!("speed".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_direction_parses_exact_tokens_only() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert!("DESC".parse::<SortDirection>().is_err());
        assert!("down".parse::<SortDirection>().is_err());
    }
}
