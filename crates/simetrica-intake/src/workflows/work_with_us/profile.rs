use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::{Availability, CompletedProjectsRange, ExperienceLevel, Specialty};

pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

/// Every field the wizard can report an error against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    FullName,
    IdentificationNumber,
    ContactNumber,
    BirthDate,
    Email,
    Department,
    Municipality,
    Specialties,
    OtherSpecialtyDetail,
    ExperienceLevel,
    Certifications,
    Availability,
    CompletedProjects,
    ExperienceDescription,
    ProjectPhotos,
    References,
    AdditionalComments,
}

impl FieldName {
    /// Name used by the backend payload, handy for focusing inputs.
    pub const fn wire_name(self) -> &'static str {
        match self {
            FieldName::FullName => "fullName",
            FieldName::IdentificationNumber => "identificationNumber",
            FieldName::ContactNumber => "contactNumber",
            FieldName::BirthDate => "birthDate",
            FieldName::Email => "email",
            FieldName::Department => "department",
            FieldName::Municipality => "municipality",
            FieldName::Specialties => "specialties",
            FieldName::OtherSpecialtyDetail => "otherSpecialtyDetail",
            FieldName::ExperienceLevel => "experienceLevel",
            FieldName::Certifications => "hasCertifications",
            FieldName::Availability => "availability",
            FieldName::CompletedProjects => "completedProjectsRange",
            FieldName::ExperienceDescription => "constructionExperienceDescription",
            FieldName::ProjectPhotos => "projectPhotos",
            FieldName::References => "references",
            FieldName::AdditionalComments => "additionalComments",
        }
    }

    /// Fields whose format is re-checked on every keystroke.
    pub const fn validates_live(self) -> bool {
        matches!(
            self,
            FieldName::IdentificationNumber | FieldName::ContactNumber | FieldName::Email
        )
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Selected trades. The free-text detail exists only while [`Specialty::Otro`] is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialtySelection {
    trades: BTreeSet<Specialty>,
    other: Option<String>,
}

impl SpecialtySelection {
    pub fn toggle(&mut self, specialty: Specialty) {
        if specialty == Specialty::Otro {
            self.other = match self.other.take() {
                Some(_) => None,
                None => Some(String::new()),
            };
        } else if !self.trades.remove(&specialty) {
            self.trades.insert(specialty);
        }
    }

    pub fn contains(&self, specialty: Specialty) -> bool {
        match specialty {
            Specialty::Otro => self.other.is_some(),
            trade => self.trades.contains(&trade),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty() && self.other.is_none()
    }

    /// Selected specialties in catalog order, `Otro` last.
    pub fn selected(&self) -> Vec<Specialty> {
        let mut selected: Vec<Specialty> = self.trades.iter().copied().collect();
        if self.other.is_some() {
            selected.push(Specialty::Otro);
        }
        selected
    }

    pub fn other_detail(&self) -> Option<&str> {
        self.other.as_deref()
    }

    /// Returns `false` when `Otro` is not selected; the detail is then discarded.
    pub fn set_other_detail(&mut self, detail: impl Into<String>) -> bool {
        match self.other.as_mut() {
            Some(current) => {
                *current = detail.into();
                true
            }
            None => false,
        }
    }
}

/// A professional reference row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

impl ReferenceEntry {
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.phone.trim().is_empty()
            && self.relationship.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceField {
    Name,
    Phone,
    Relationship,
}

/// Reference rows; never shorter than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct References {
    entries: Vec<ReferenceEntry>,
}

impl Default for References {
    fn default() -> Self {
        Self {
            entries: vec![ReferenceEntry::default()],
        }
    }
}

impl References {
    pub fn push_blank(&mut self) {
        self.entries.push(ReferenceEntry::default());
    }

    pub fn get(&self, index: usize) -> Option<&ReferenceEntry> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut ReferenceEntry> {
        self.entries.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the list starts with one row and rows are never removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }
}

/// Metadata for an uploaded project photo. Only [`ProjectPhoto::new`] builds one,
/// deserialization included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PhotoMetadata")]
pub struct ProjectPhoto {
    url: String,
    filename: String,
    mime_type: String,
    size: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhotoMetadata {
    url: String,
    filename: String,
    mime_type: String,
    size: u64,
}

impl TryFrom<PhotoMetadata> for ProjectPhoto {
    type Error = PhotoRejection;

    fn try_from(raw: PhotoMetadata) -> Result<Self, Self::Error> {
        Self::new(raw.url, raw.filename, raw.mime_type, raw.size)
    }
}

/// Client-side photo checks are advisory; the backend stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhotoRejection {
    #[error("'{filename}' no tiene un tipo de archivo reconocible ({mime_type})")]
    UnknownType { filename: String, mime_type: String },
    #[error("'{filename}' no es una imagen ({mime_type})")]
    NotAnImage { filename: String, mime_type: String },
    #[error("'{filename}' supera el tamaño máximo de 10 MB")]
    TooLarge { filename: String, size: u64 },
}

impl ProjectPhoto {
    pub fn new(
        url: impl Into<String>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
    ) -> Result<Self, PhotoRejection> {
        let filename = filename.into();
        let mime_type = mime_type.into();

        let parsed: mime::Mime = match mime_type.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                return Err(PhotoRejection::UnknownType {
                    filename,
                    mime_type,
                })
            }
        };
        if parsed.type_() != mime::IMAGE {
            return Err(PhotoRejection::NotAnImage {
                filename,
                mime_type,
            });
        }
        if size > MAX_PHOTO_BYTES {
            return Err(PhotoRejection::TooLarge { filename, size });
        }

        Ok(Self {
            url: url.into(),
            filename,
            mime_type: parsed.essence_str().to_string(),
            size,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Aggregate state of the application form across all steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantProfile {
    pub full_name: String,
    pub identification_number: String,
    pub contact_number: String,
    pub birth_date: String,
    pub email: String,
    pub department: String,
    pub municipality: String,
    pub specialties: SpecialtySelection,
    pub experience_level: Option<ExperienceLevel>,
    pub has_certifications: Option<bool>,
    pub availability: Option<Availability>,
    pub completed_projects: Option<CompletedProjectsRange>,
    pub experience_description: String,
    pub project_photos: Vec<ProjectPhoto>,
    pub references: References,
    pub additional_comments: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_otro_twice_restores_selection() {
        let mut selection = SpecialtySelection::default();
        selection.toggle(Specialty::Carpinteria);
        let before = selection.clone();

        selection.toggle(Specialty::Otro);
        assert!(selection.contains(Specialty::Otro));
        assert_eq!(selection.other_detail(), Some(""));
        selection.toggle(Specialty::Otro);

        assert_eq!(selection, before);
        assert_eq!(selection.other_detail(), None);
    }

    #[test]
    fn other_detail_requires_otro() {
        let mut selection = SpecialtySelection::default();
        assert!(!selection.set_other_detail("Soldadura"));
        selection.toggle(Specialty::Otro);
        assert!(selection.set_other_detail("Soldadura"));
        assert_eq!(selection.other_detail(), Some("Soldadura"));
    }

    #[test]
    fn selected_keeps_catalog_order() {
        let mut selection = SpecialtySelection::default();
        selection.toggle(Specialty::Otro);
        selection.toggle(Specialty::Plomeria);
        selection.toggle(Specialty::ObraNegra);
        assert_eq!(
            selection.selected(),
            vec![Specialty::ObraNegra, Specialty::Plomeria, Specialty::Otro]
        );
    }

    #[test]
    fn references_start_with_one_blank_row() {
        let references = References::default();
        assert_eq!(references.len(), 1);
        assert!(references.get(0).is_some_and(ReferenceEntry::is_blank));
        assert!(!references.is_empty());
    }

    #[test]
    fn photos_must_be_reasonable_images() {
        let photo = ProjectPhoto::new("https://cdn/obra.jpg", "obra.jpg", "image/jpeg", 2048)
            .expect("jpeg accepted");
        assert_eq!(photo.mime_type(), "image/jpeg");

        assert!(matches!(
            ProjectPhoto::new("u", "plano.pdf", "application/pdf", 10),
            Err(PhotoRejection::NotAnImage { .. })
        ));
        assert!(matches!(
            ProjectPhoto::new("u", "obra.png", "image/png", MAX_PHOTO_BYTES + 1),
            Err(PhotoRejection::TooLarge { .. })
        ));
        assert!(matches!(
            ProjectPhoto::new("u", "obra", "not a mime", 10),
            Err(PhotoRejection::UnknownType { .. })
        ));
    }

    #[test]
    fn deserialized_photos_pass_the_same_checks() {
        let photo: ProjectPhoto = serde_json::from_str(
            r#"{"url":"https://cdn/obra.jpg","filename":"obra.jpg","mimeType":"image/jpeg","size":2048}"#,
        )
        .expect("jpeg accepted");
        assert_eq!(photo.mime_type(), "image/jpeg");
        assert_eq!(photo.size(), 2048);

        let err = serde_json::from_str::<ProjectPhoto>(
            r#"{"url":"u","filename":"plano.pdf","mimeType":"application/pdf","size":10}"#,
        )
        .expect_err("pdf refused");
        assert!(err.to_string().contains("no es una imagen"));

        let oversized = format!(
            r#"{{"url":"u","filename":"obra.png","mimeType":"image/png","size":{}}}"#,
            MAX_PHOTO_BYTES + 1
        );
        assert!(serde_json::from_str::<ProjectPhoto>(&oversized).is_err());
    }
}
