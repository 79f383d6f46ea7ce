use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The single resume document shown by the viewer and edited by the form.
///
/// Sequences are display order. A missing or `null` sequence in stored data
/// deserializes to an empty list; a missing scalar is a shape error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub contact: String,
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
}

/// `Default` is the empty template appended by "Add More".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Invalid field path '{0}'")]
    InvalidPath(String),

    #[error("Unknown list '{0}' (expected education, experience or skills)")]
    UnknownList(String),

    #[error("Index {index} is out of range for {list} (length {len})")]
    IndexOutOfRange {
        list: ListName,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListName {
    Education,
    Experience,
    Skills,
}

impl ListName {
    pub const ALL: [ListName; 3] = [ListName::Education, ListName::Experience, ListName::Skills];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListName::Education => "education",
            ListName::Experience => "experience",
            ListName::Skills => "skills",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListName {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListName::ALL
            .into_iter()
            .find(|list| list.as_str() == s)
            .ok_or_else(|| FieldError::UnknownList(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Degree,
    Institution,
    Year,
}

impl EducationField {
    pub const ALL: [EducationField; 3] = [
        EducationField::Degree,
        EducationField::Institution,
        EducationField::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationField::Degree => "degree",
            EducationField::Institution => "institution",
            EducationField::Year => "year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Title,
    Company,
    Duration,
    Description,
}

impl ExperienceField {
    pub const ALL: [ExperienceField; 4] = [
        ExperienceField::Title,
        ExperienceField::Company,
        ExperienceField::Duration,
        ExperienceField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceField::Title => "title",
            ExperienceField::Company => "company",
            ExperienceField::Duration => "duration",
            ExperienceField::Description => "description",
        }
    }
}

/// Address of one scalar in a record, written as a dotted path:
/// `name`, `education.0.degree`, `experience.1.title`, `skills.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Name,
    Contact,
    Address,
    Education { index: usize, field: EducationField },
    Experience { index: usize, field: ExperienceField },
    Skill { index: usize },
}

impl FromStr for FieldPath {
    type Err = FieldError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let invalid = || FieldError::InvalidPath(path.to_string());
        let mut parts = path.split('.');

        let parsed = match parts.next() {
            Some("name") => FieldPath::Name,
            Some("contact") => FieldPath::Contact,
            Some("address") => FieldPath::Address,
            Some("education") => {
                let index = parse_index(parts.next()).ok_or_else(invalid)?;
                let field = parts
                    .next()
                    .and_then(|f| EducationField::ALL.into_iter().find(|e| e.as_str() == f))
                    .ok_or_else(invalid)?;
                FieldPath::Education { index, field }
            }
            Some("experience") => {
                let index = parse_index(parts.next()).ok_or_else(invalid)?;
                let field = parts
                    .next()
                    .and_then(|f| ExperienceField::ALL.into_iter().find(|e| e.as_str() == f))
                    .ok_or_else(invalid)?;
                FieldPath::Experience { index, field }
            }
            Some("skills") => FieldPath::Skill {
                index: parse_index(parts.next()).ok_or_else(invalid)?,
            },
            _ => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(parsed)
    }
}

fn parse_index(segment: Option<&str>) -> Option<usize> {
    let segment = segment?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Name => f.write_str("name"),
            FieldPath::Contact => f.write_str("contact"),
            FieldPath::Address => f.write_str("address"),
            FieldPath::Education { index, field } => {
                write!(f, "education.{index}.{}", field.as_str())
            }
            FieldPath::Experience { index, field } => {
                write!(f, "experience.{index}.{}", field.as_str())
            }
            FieldPath::Skill { index } => write!(f, "skills.{index}"),
        }
    }
}

impl EducationEntry {
    pub fn field(&self, field: EducationField) -> &str {
        match field {
            EducationField::Degree => &self.degree,
            EducationField::Institution => &self.institution,
            EducationField::Year => &self.year,
        }
    }

    fn field_mut(&mut self, field: EducationField) -> &mut String {
        match field {
            EducationField::Degree => &mut self.degree,
            EducationField::Institution => &mut self.institution,
            EducationField::Year => &mut self.year,
        }
    }
}

impl ExperienceEntry {
    pub fn field(&self, field: ExperienceField) -> &str {
        match field {
            ExperienceField::Title => &self.title,
            ExperienceField::Company => &self.company,
            ExperienceField::Duration => &self.duration,
            ExperienceField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: ExperienceField) -> &mut String {
        match field {
            ExperienceField::Title => &mut self.title,
            ExperienceField::Company => &mut self.company,
            ExperienceField::Duration => &mut self.duration,
            ExperienceField::Description => &mut self.description,
        }
    }
}

fn item_mut<T>(items: &mut [T], list: ListName, index: usize) -> Result<&mut T, FieldError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(FieldError::IndexOutOfRange { list, index, len })
}

impl ResumeRecord {
    /// The bundled record used on first run and whenever the stored slot is unusable.
    pub fn default_record() -> Self {
        ResumeRecord {
            name: "John Doe".to_string(),
            address: "123 Main Street, New York, NY 10001".to_string(),
            contact: "john.doe@example.com | (123) 456-7890".to_string(),
            education: vec![
                EducationEntry {
                    degree: "Bachelor of Science in Computer Science".to_string(),
                    institution: "University of ABC".to_string(),
                    year: "2018 - 2022".to_string(),
                },
                EducationEntry {
                    degree: "High School Diploma".to_string(),
                    institution: "XYZ High School".to_string(),
                    year: "2016 - 2018".to_string(),
                },
            ],
            experience: vec![
                ExperienceEntry {
                    title: "Software Engineer Intern".to_string(),
                    company: "Google".to_string(),
                    duration: "June 2021 - August 2021".to_string(),
                    description: "Developed web applications using React, Node.js, and MongoDB. \
                                  Implemented features, fixed bugs, and wrote tests."
                        .to_string(),
                },
                ExperienceEntry {
                    title: "Teaching Assistant".to_string(),
                    company: "University of ABC".to_string(),
                    duration: "January 2021 - May 2021".to_string(),
                    description: "Assisted students with assignments and projects in the Data \
                                  Structures and Algorithms course. Graded papers and provided \
                                  feedback."
                        .to_string(),
                },
            ],
            skills: [
                "JavaScript",
                "React",
                "Node.js",
                "MongoDB",
                "HTML",
                "CSS",
                "Git",
                "Python",
                "Java",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }

    pub fn list_len(&self, list: ListName) -> usize {
        match list {
            ListName::Education => self.education.len(),
            ListName::Experience => self.experience.len(),
            ListName::Skills => self.skills.len(),
        }
    }

    /// Replaces one scalar value. List entries must already exist.
    pub fn set_field(&mut self, path: &FieldPath, value: String) -> Result<(), FieldError> {
        match *path {
            FieldPath::Name => self.name = value,
            FieldPath::Contact => self.contact = value,
            FieldPath::Address => self.address = value,
            FieldPath::Education { index, field } => {
                *item_mut(&mut self.education, ListName::Education, index)?.field_mut(field) =
                    value;
            }
            FieldPath::Experience { index, field } => {
                *item_mut(&mut self.experience, ListName::Experience, index)?.field_mut(field) =
                    value;
            }
            FieldPath::Skill { index } => {
                *item_mut(&mut self.skills, ListName::Skills, index)? = value;
            }
        }
        Ok(())
    }

    /// Pushes an empty entry to the end of `list` and returns its index.
    pub fn append_item(&mut self, list: ListName) -> usize {
        match list {
            ListName::Education => self.education.push(EducationEntry::default()),
            ListName::Experience => self.experience.push(ExperienceEntry::default()),
            ListName::Skills => self.skills.push(String::new()),
        }
        self.list_len(list) - 1
    }

    /// Removes the entry at `index`, keeping the order of the rest.
    pub fn remove_item(&mut self, list: ListName, index: usize) -> Result<(), FieldError> {
        let len = self.list_len(list);
        if index >= len {
            return Err(FieldError::IndexOutOfRange { list, index, len });
        }
        match list {
            ListName::Education => {
                self.education.remove(index);
            }
            ListName::Experience => {
                self.experience.remove(index);
            }
            ListName::Skills => {
                self.skills.remove(index);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_record() -> ResumeRecord {
        ResumeRecord {
            name: String::new(),
            contact: String::new(),
            address: String::new(),
            education: vec![],
            experience: vec![],
            skills: vec![],
        }
    }

    #[test]
    fn test_default_record_contents() {
        let record = ResumeRecord::default_record();
        assert_eq!(record.name, "John Doe");
        assert_eq!(record.education.len(), 2);
        assert_eq!(record.experience.len(), 2);
        assert_eq!(record.skills.len(), 9);
        assert_eq!(record.skills[0], "JavaScript");
        assert_eq!(record.skills[8], "Java");
    }

    #[test]
    fn test_missing_sequences_become_empty() {
        let json = r#"{"name":"A","contact":"B","address":"C"}"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert!(record.education.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_null_sequence_becomes_empty() {
        let json = r#"{"name":"A","contact":"B","address":"C","skills":null}"#;
        let record: ResumeRecord = serde_json::from_str(json).unwrap();
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_missing_scalar_is_rejected() {
        let json = r#"{"name":"A","contact":"B","education":[]}"#;
        assert!(serde_json::from_str::<ResumeRecord>(json).is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(ResumeRecord::default_record()).unwrap();
        for key in ["name", "contact", "address", "education", "experience", "skills"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["education"][0]["year"], "2018 - 2022");
    }

    #[test]
    fn test_parse_scalar_paths() {
        assert_eq!("name".parse::<FieldPath>().unwrap(), FieldPath::Name);
        assert_eq!("contact".parse::<FieldPath>().unwrap(), FieldPath::Contact);
        assert_eq!("address".parse::<FieldPath>().unwrap(), FieldPath::Address);
    }

    #[test]
    fn test_parse_list_paths() {
        assert_eq!(
            "education.0.degree".parse::<FieldPath>().unwrap(),
            FieldPath::Education {
                index: 0,
                field: EducationField::Degree
            }
        );
        assert_eq!(
            "experience.12.description".parse::<FieldPath>().unwrap(),
            FieldPath::Experience {
                index: 12,
                field: ExperienceField::Description
            }
        );
        assert_eq!(
            "skills.3".parse::<FieldPath>().unwrap(),
            FieldPath::Skill { index: 3 }
        );
    }

    #[test]
    fn test_parse_invalid_paths() {
        for path in [
            "",
            "nickname",
            "name.0",
            "education",
            "education.0",
            "education.x.degree",
            "education.+1.degree",
            "education.0.gpa",
            "experience.0.title.extra",
            "skills",
            "skills.-1",
        ] {
            assert!(
                matches!(path.parse::<FieldPath>(), Err(FieldError::InvalidPath(_))),
                "expected '{path}' to be rejected"
            );
        }
    }

    #[test]
    fn test_path_display_matches_parse() {
        let path = FieldPath::Experience {
            index: 1,
            field: ExperienceField::Company,
        };
        assert_eq!(path.to_string(), "experience.1.company");
        assert_eq!(path.to_string().parse::<FieldPath>().unwrap(), path);
    }

    #[test]
    fn test_list_name_parse() {
        assert_eq!("skills".parse::<ListName>().unwrap(), ListName::Skills);
        assert!(matches!(
            "hobbies".parse::<ListName>(),
            Err(FieldError::UnknownList(_))
        ));
    }

    #[test]
    fn test_set_nested_field() {
        let mut record = ResumeRecord::default_record();
        record
            .set_field(&"education.1.year".parse().unwrap(), "2015".to_string())
            .unwrap();
        assert_eq!(record.education[1].year, "2015");
        assert_eq!(record.education[0].year, "2018 - 2022");
    }

    #[test]
    fn test_set_field_past_end_fails() {
        let mut record = empty_record();
        let err = record
            .set_field(&FieldPath::Skill { index: 0 }, "Rust".to_string())
            .unwrap_err();
        assert_eq!(
            err,
            FieldError::IndexOutOfRange {
                list: ListName::Skills,
                index: 0,
                len: 0
            }
        );
    }

    #[test]
    fn test_append_uses_empty_template() {
        let mut record = empty_record();
        assert_eq!(record.append_item(ListName::Experience), 0);
        assert_eq!(record.experience[0], ExperienceEntry::default());
        assert_eq!(record.append_item(ListName::Skills), 0);
        assert_eq!(record.skills, vec![String::new()]);
    }

    #[test]
    fn test_append_then_remove_skill_is_noop() {
        let mut record = empty_record();
        record.append_item(ListName::Skills);
        record.remove_item(ListName::Skills, 0).unwrap();
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut record = empty_record();
        for degree in ["A", "B", "C"] {
            let index = record.append_item(ListName::Education);
            record
                .set_field(
                    &FieldPath::Education {
                        index,
                        field: EducationField::Degree,
                    },
                    degree.to_string(),
                )
                .unwrap();
        }
        record.remove_item(ListName::Education, 1).unwrap();
        let degrees: Vec<_> = record.education.iter().map(|e| e.degree.as_str()).collect();
        assert_eq!(degrees, vec!["A", "C"]);
    }

    #[test]
    fn test_remove_invalid_index() {
        let mut record = ResumeRecord::default_record();
        assert!(record.remove_item(ListName::Experience, 2).is_err());
        assert_eq!(record.experience.len(), 2);
    }
}
