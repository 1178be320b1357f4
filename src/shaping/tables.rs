//! @ai:module:intent Immutable name and color tables used when shaping results
//! @ai:module:layer domain
//! @ai:module:public_api Rgb, ShapingTables, humanize, DEFAULT_PALETTE
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::shaping::category::TestCategory;
use serde::{Deserialize, Serialize};

/// @ai:intent An sRGB color serialized as #RRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// @ai:intent Parse a #RRGGBB string
    /// @ai:effects pure
    pub fn parse(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// @ai:effects pure
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Rgb::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub const DEFAULT_PALETTE: [Rgb; 8] = [
    Rgb::new(0x4E, 0x79, 0xA7),
    Rgb::new(0xF2, 0x8E, 0x2B),
    Rgb::new(0xE1, 0x57, 0x59),
    Rgb::new(0x76, 0xB7, 0xB2),
    Rgb::new(0x59, 0xA1, 0x4F),
    Rgb::new(0xED, 0xC9, 0x48),
    Rgb::new(0xB0, 0x7A, 0xA1),
    Rgb::new(0xFF, 0x9D, 0xA7),
];

const LEARNING_STYLE_NAMES: &[(&str, &str)] = &[
    ("visual", "Visual"),
    ("auditivo", "Auditivo"),
    ("auditory", "Auditivo"),
    ("lectura_escritura", "Lectura/Escritura"),
    ("reading_writing", "Lectura/Escritura"),
    ("kinestesico", "Kinestésico"),
    ("kinesthetic", "Kinestésico"),
];

const EMOTIONAL_INTELLIGENCE_NAMES: &[(&str, &str)] = &[
    ("autoconciencia", "Autoconciencia"),
    ("autorregulacion", "Autorregulación"),
    ("motivacion", "Motivación"),
    ("empatia", "Empatía"),
    ("habilidades_sociales", "Habilidades Sociales"),
];

const SOFT_SKILL_NAMES: &[(&str, &str)] = &[
    ("comunicacion", "Comunicación"),
    ("trabajo_en_equipo", "Trabajo en Equipo"),
    ("liderazgo", "Liderazgo"),
    ("resolucion_de_problemas", "Resolución de Problemas"),
    ("adaptabilidad", "Adaptabilidad"),
    ("pensamiento_critico", "Pensamiento Crítico"),
    ("gestion_del_tiempo", "Gestión del Tiempo"),
    ("creatividad", "Creatividad"),
];

const ASSISTANCE_NAMES: &[(&str, &str)] = &[
    ("ansiedad", "Ansiedad"),
    ("depresion", "Depresión"),
    ("estres", "Estrés"),
    ("autoestima", "Autoestima"),
    ("relaciones_interpersonales", "Relaciones Interpersonales"),
    ("rendimiento_academico", "Rendimiento Académico"),
    ("consumo_sustancias", "Consumo de Sustancias"),
];

const ASSISTANCE_COLORS: &[(&str, Rgb)] = &[
    ("ansiedad", Rgb::new(0xE1, 0x57, 0x59)),
    ("depresion", Rgb::new(0x4E, 0x79, 0xA7)),
    ("estres", Rgb::new(0xF2, 0x8E, 0x2B)),
    ("autoestima", Rgb::new(0x59, 0xA1, 0x4F)),
    ("relaciones_interpersonales", Rgb::new(0xB0, 0x7A, 0xA1)),
    ("rendimiento_academico", Rgb::new(0xED, 0xC9, 0x48)),
    ("consumo_sustancias", Rgb::new(0x9C, 0x75, 0x5F)),
];

fn lookup<'a, T: Copy>(table: &'a [(&'a str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// @ai:intent Split on underscores and hyphens, capitalize each word
/// @ai:effects pure
pub fn humanize(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|token| !token.is_empty())
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// @ai:intent Name dictionaries, fixed colors and palette for the shaper
#[derive(Debug, Clone, PartialEq)]
pub struct ShapingTables {
    palette: Vec<Rgb>,
}

impl ShapingTables {
    /// @ai:intent Build tables with a custom palette; empty falls back to the default
    /// @ai:effects pure
    pub fn with_palette(palette: Vec<Rgb>) -> Self {
        if palette.is_empty() {
            return Self::default();
        }
        Self { palette }
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    /// @ai:intent Palette color cycling by entry index
    /// @ai:effects pure
    pub fn palette_color(&self, index: usize) -> Rgb {
        self.palette[index % self.palette.len()]
    }

    /// @ai:intent Dictionary name for a raw key, humanized on miss
    /// @ai:effects pure
    pub fn display_name(&self, category: TestCategory, key: &str) -> String {
        let table: &[(&str, &str)] = match category {
            TestCategory::LearningStyles => LEARNING_STYLE_NAMES,
            TestCategory::EmotionalIntelligence => EMOTIONAL_INTELLIGENCE_NAMES,
            TestCategory::SoftSkills => SOFT_SKILL_NAMES,
            TestCategory::PsychologicalAssistance => ASSISTANCE_NAMES,
            TestCategory::Generic => &[],
        };

        lookup(table, key)
            .map(str::to_string)
            .unwrap_or_else(|| humanize(key))
    }

    /// @ai:intent Entry color: fixed assistance map first, palette by index second
    /// @ai:effects pure
    pub fn entry_color(&self, category: TestCategory, key: &str, index: usize) -> Rgb {
        let fixed = match category {
            TestCategory::PsychologicalAssistance => lookup(ASSISTANCE_COLORS, key),
            _ => None,
        };

        fixed.unwrap_or_else(|| self.palette_color(index))
    }
}

impl Default for ShapingTables {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}
