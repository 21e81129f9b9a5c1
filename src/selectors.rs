use crate::types::BillRecord;

/// Text fields of a bill that keyword rules can look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Themes,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Description, Field::Themes];
}

/// Select one text field. Missing fields are already empty strings.
pub fn select(record: &BillRecord, field: Field) -> &str {
    match field {
        Field::Name => &record.name,
        Field::Description => &record.description,
        Field::Themes => &record.themes,
    }
}

/// Name, description and themes joined by single spaces
pub fn combined_text(record: &BillRecord) -> String {
    Field::ALL
        .iter()
        .map(|&field| select(record, field))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_text() {
        let record = BillRecord::new("UT", "SB 152", "Social media regulation", "Children", "");
        assert_eq!(combined_text(&record), "SB 152 Social media regulation Children");
        assert_eq!(select(&record, Field::Themes), "Children");
    }

    #[test]
    fn test_combined_text_of_empty_bill_has_no_words() {
        let record = BillRecord::new("", "", "", "", "");
        assert!(combined_text(&record).trim().is_empty());
    }
}
