use bevy::color::Color;
use bevy::math::Vec3;

/// Identifier of a portfolio section, one per door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Skills,
    Experience,
    Projects,
    Education,
    Contact,
}

impl SectionKey {
    /// Convert string identifier to a section key for RPC and data lookups.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skills" => Some(Self::Skills),
            "experience" => Some(Self::Experience),
            "projects" => Some(Self::Projects),
            "education" => Some(Self::Education),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }

    /// Field name used by the portfolio document and the frontend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Education => "education",
            Self::Contact => "contact",
        }
    }
}

pub struct SectionSpec {
    pub key: SectionKey,
    pub label: &'static str,
    pub position: Vec3,
    pub colour: Color,
}

/// Door catalogue in rendering order. Order is significant.
pub const SECTION_CATALOG: &[SectionSpec] = &[
    SectionSpec {
        key: SectionKey::Skills,
        label: "Skills",
        position: Vec3::new(-3.0, 0.0, 0.0),
        colour: Color::srgb(0.290, 0.565, 0.886),
    },
    SectionSpec {
        key: SectionKey::Experience,
        label: "Experience",
        position: Vec3::new(0.0, 0.0, 0.0),
        colour: Color::srgb(0.886, 0.290, 0.290),
    },
    SectionSpec {
        key: SectionKey::Projects,
        label: "Projects",
        position: Vec3::new(3.0, 0.0, 0.0),
        colour: Color::srgb(0.290, 0.886, 0.290),
    },
    SectionSpec {
        key: SectionKey::Education,
        label: "Education",
        position: Vec3::new(-1.5, -3.0, 0.0),
        colour: Color::srgb(0.886, 0.643, 0.290),
    },
    SectionSpec {
        key: SectionKey::Contact,
        label: "Contact",
        position: Vec3::new(1.5, -3.0, 0.0),
        colour: Color::srgb(0.643, 0.290, 0.886),
    },
];

/// Catalogue entry for a key. The catalogue is declared in discriminant order.
pub fn get_section_spec(key: SectionKey) -> &'static SectionSpec {
    &SECTION_CATALOG[key as usize]
}
