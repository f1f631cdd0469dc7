//! Mapping from publication records to Dublin Core fields
//!
//! One pure function per record type. [`RecordKind`] ties the repeating
//! record types to their query and mapping so the export driver can walk
//! them in a fixed order.

use super::field::DublinCoreField;
use crate::adapters::database::queries;
use crate::domain::{Author, JournalEntry, Keyword, Publication, Result, Row, Subject};
use std::fmt;

/// Title, abstract and creation date of a publication, in that order
pub fn format_publication(publication: &Publication) -> Vec<DublinCoreField> {
    vec![
        DublinCoreField::unqualified("title", &publication.title),
        DublinCoreField::new("description", "abstract", &publication.abstract_text),
        DublinCoreField::new("date", "created", &publication.year),
    ]
}

/// Journal name, volume, page range and extent
pub fn format_journal(journal: &JournalEntry) -> Vec<DublinCoreField> {
    vec![
        DublinCoreField::new("relation", "ispartof", &journal.journal),
        DublinCoreField::new("citation", "volume", &journal.volume),
        DublinCoreField::new("citation", "spage", &journal.spage),
        DublinCoreField::new("citation", "epage", &journal.epage),
        DublinCoreField::new("format", "extent", &journal.extent),
    ]
}

pub fn format_author(author: &Author) -> DublinCoreField {
    DublinCoreField::unqualified("creator", author.full_name())
}

pub fn format_subject(subject: &Subject) -> DublinCoreField {
    DublinCoreField::unqualified("subject", &subject.name)
}

pub fn format_keyword(keyword: &Keyword) -> DublinCoreField {
    DublinCoreField::new("subject", "keyword", &keyword.name)
}

/// Repeating record types looked up per publication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Author,
    Journal,
    Subject,
    Keyword,
}

impl RecordKind {
    /// Order in which the groups appear in `dublin_core.xml`
    pub const ORDER: [RecordKind; 4] = [
        RecordKind::Author,
        RecordKind::Journal,
        RecordKind::Subject,
        RecordKind::Keyword,
    ];

    /// Query returning this kind's rows for one publication
    pub fn sql(&self) -> &'static str {
        match self {
            RecordKind::Author => queries::AUTHORS,
            RecordKind::Journal => queries::JOURNALS,
            RecordKind::Subject => queries::SUBJECTS,
            RecordKind::Keyword => queries::KEYWORDS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Author => "author",
            RecordKind::Journal => "journal",
            RecordKind::Subject => "subject",
            RecordKind::Keyword => "keyword",
        }
    }

    /// Maps one row of this kind to its fields
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be read as this record type.
    pub fn format(&self, row: &Row) -> Result<Vec<DublinCoreField>> {
        Ok(match self {
            RecordKind::Author => vec![format_author(&row.to_record()?)],
            RecordKind::Journal => format_journal(&row.to_record()?),
            RecordKind::Subject => vec![format_subject(&row.to_record()?)],
            RecordKind::Keyword => vec![format_keyword(&row.to_record()?)],
        })
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PublicationId;

    fn triples(fields: &[DublinCoreField]) -> Vec<(&str, &str, &str)> {
        fields
            .iter()
            .map(|f| (f.element.as_str(), f.qualifier.as_str(), f.value.as_str()))
            .collect()
    }

    #[test]
    fn test_format_publication() {
        let publication = Publication {
            pub_id: PublicationId::new(7),
            title: "A Study".to_string(),
            abstract_text: "Short".to_string(),
            year: "2020".to_string(),
            pub_file: "a.pdf".to_string(),
        };

        assert_eq!(
            triples(&format_publication(&publication)),
            vec![
                ("title", "", "A Study"),
                ("description", "abstract", "Short"),
                ("date", "created", "2020"),
            ]
        );
    }

    #[test]
    fn test_format_journal() {
        let journal = JournalEntry {
            journal: "Nature".to_string(),
            volume: "12".to_string(),
            spage: "100".to_string(),
            epage: "110".to_string(),
            extent: "11".to_string(),
        };

        assert_eq!(
            triples(&format_journal(&journal)),
            vec![
                ("relation", "ispartof", "Nature"),
                ("citation", "volume", "12"),
                ("citation", "spage", "100"),
                ("citation", "epage", "110"),
                ("format", "extent", "11"),
            ]
        );
    }

    #[test]
    fn test_subject_and_keyword_share_element() {
        let subject = format_subject(&Subject {
            name: "Physics".to_string(),
        });
        let keyword = format_keyword(&Keyword {
            name: "lasers".to_string(),
        });

        assert_eq!(subject.element, keyword.element);
        assert_eq!(subject.qualifier, "");
        assert_eq!(keyword.qualifier, "keyword");
    }

    #[test]
    fn test_record_kind_format_author_row() {
        let row = Row::new().with("fname", "Jane").with("lname", "Doe");
        let fields = RecordKind::Author.format(&row).unwrap();
        assert_eq!(triples(&fields), vec![("creator", "", "Doe, Jane")]);
    }

    #[test]
    fn test_record_kind_format_author_without_first_name() {
        let row = Row::new()
            .with("fname", serde_json::Value::Null)
            .with("lname", "Doe");
        let fields = RecordKind::Author.format(&row).unwrap();
        assert_eq!(fields[0].value, "Doe");
    }

    #[test]
    fn test_record_kind_order() {
        let names: Vec<&str> = RecordKind::ORDER.iter().map(RecordKind::as_str).collect();
        assert_eq!(names, vec!["author", "journal", "subject", "keyword"]);
    }

    #[test]
    fn test_record_kind_sql() {
        assert!(RecordKind::Keyword.sql().contains("pubs_tag"));
        assert!(RecordKind::Subject.sql().contains("pubs_category"));
        assert!(RecordKind::Journal.sql().contains("pubs_journal_new"));
        assert!(RecordKind::Author.sql().contains("pubs_author"));
    }
}
