use serde::{Deserialize, Serialize};

/// Trade categories an applicant can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialty {
    ObraNegra,
    ObraBlanca,
    Carpinteria,
    Electricidad,
    Plomeria,
    EstructurasMetalicas,
    Otro,
}

impl Specialty {
    pub const ALL: [Specialty; 7] = [
        Specialty::ObraNegra,
        Specialty::ObraBlanca,
        Specialty::Carpinteria,
        Specialty::Electricidad,
        Specialty::Plomeria,
        Specialty::EstructurasMetalicas,
        Specialty::Otro,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Specialty::ObraNegra => "Obra negra",
            Specialty::ObraBlanca => "Obra blanca",
            Specialty::Carpinteria => "Carpintería",
            Specialty::Electricidad => "Electricidad",
            Specialty::Plomeria => "Plomería",
            Specialty::EstructurasMetalicas => "Estructuras metálicas",
            Specialty::Otro => "Otro",
        }
    }
}

/// Years-of-experience bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    LessThanOne,
    OneToThree,
    ThreeToFive,
    FiveToTen,
    MoreThanTen,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 5] = [
        ExperienceLevel::LessThanOne,
        ExperienceLevel::OneToThree,
        ExperienceLevel::ThreeToFive,
        ExperienceLevel::FiveToTen,
        ExperienceLevel::MoreThanTen,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ExperienceLevel::LessThanOne => "Menos de un año",
            ExperienceLevel::OneToThree => "1 a 3 años",
            ExperienceLevel::ThreeToFive => "3 a 5 años",
            ExperienceLevel::FiveToTen => "5 a 10 años",
            ExperienceLevel::MoreThanTen => "Más de 10 años",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    FullTime,
    PartTime,
    Weekends,
    Contract,
}

impl Availability {
    pub const ALL: [Availability; 4] = [
        Availability::FullTime,
        Availability::PartTime,
        Availability::Weekends,
        Availability::Contract,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Availability::FullTime => "Tiempo completo",
            Availability::PartTime => "Medio tiempo",
            Availability::Weekends => "Solo fines de semana",
            Availability::Contract => "Por contrato específico",
        }
    }
}

/// Bucketed count of past projects, serialized as the backend's range strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletedProjectsRange {
    #[serde(rename = "0-5")]
    UpTo5,
    #[serde(rename = "5-10")]
    From5To10,
    #[serde(rename = "10-15")]
    From10To15,
    #[serde(rename = "15-20")]
    From15To20,
    #[serde(rename = "20-25")]
    From20To25,
    #[serde(rename = "25-30")]
    From25To30,
    #[serde(rename = "30-35")]
    From30To35,
    #[serde(rename = "35-40")]
    From35To40,
    #[serde(rename = "40-45")]
    From40To45,
    #[serde(rename = "45-50")]
    From45To50,
    #[serde(rename = "50+")]
    MoreThan50,
}

impl CompletedProjectsRange {
    pub const ALL: [CompletedProjectsRange; 11] = [
        CompletedProjectsRange::UpTo5,
        CompletedProjectsRange::From5To10,
        CompletedProjectsRange::From10To15,
        CompletedProjectsRange::From15To20,
        CompletedProjectsRange::From20To25,
        CompletedProjectsRange::From25To30,
        CompletedProjectsRange::From30To35,
        CompletedProjectsRange::From35To40,
        CompletedProjectsRange::From40To45,
        CompletedProjectsRange::From45To50,
        CompletedProjectsRange::MoreThan50,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            CompletedProjectsRange::UpTo5 => "0-5",
            CompletedProjectsRange::From5To10 => "5-10",
            CompletedProjectsRange::From10To15 => "10-15",
            CompletedProjectsRange::From15To20 => "15-20",
            CompletedProjectsRange::From20To25 => "20-25",
            CompletedProjectsRange::From25To30 => "25-30",
            CompletedProjectsRange::From30To35 => "30-35",
            CompletedProjectsRange::From35To40 => "35-40",
            CompletedProjectsRange::From40To45 => "40-45",
            CompletedProjectsRange::From45To50 => "45-50",
            CompletedProjectsRange::MoreThan50 => "50+",
        }
    }

    pub fn label(self) -> String {
        match self {
            CompletedProjectsRange::MoreThan50 => "Más de 50 proyectos".to_string(),
            other => format!("{} proyectos", other.code().replace('-', " a ")),
        }
    }
}
