use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{StudioError, StudioResult};

/// Base instruction used when no style preset is selected.
pub const DEFAULT_PROMPT: &str = "Cinematic studio portrait style, extremely detailed and ultra realistic face with natural skin pores, fine textures, and authentic features, sharp focus on facial details, vibrant yet natural colors, realistic three-dimensional lighting and shadows, dramatic but soft cinematic studio lighting, smooth depth of field, professional cinematic color grading, bright and attractive background, hyper-detailed, lifelike";

/// Named looks that replace [`DEFAULT_PROMPT`] as the base instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePreset {
    /// 1940s film noir.
    Noir,
    /// Neon-lit cyberpunk.
    Cyberpunk,
    /// Ethereal fantasy.
    Fantasy,
    /// 1950s analog photography.
    Vintage,
    /// High-fashion editorial.
    Fashion,
}

impl StylePreset {
    /// All presets in display order.
    pub const ALL: [Self; 5] = [
        Self::Noir,
        Self::Cyberpunk,
        Self::Fantasy,
        Self::Vintage,
        Self::Fashion,
    ];

    /// Stable identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Noir => "noir",
            Self::Cyberpunk => "cyberpunk",
            Self::Fantasy => "fantasy",
            Self::Vintage => "vintage",
            Self::Fashion => "fashion",
        }
    }

    /// Base instruction for this look.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Noir => {
                "film noir style, high contrast black and white, dramatic venetian blind shadows, mystery, 1940s aesthetic"
            }
            Self::Cyberpunk => {
                "cyberpunk style, neon blue and pink lighting, futuristic atmosphere, rain-slicked reflections, chromatic aberration"
            }
            Self::Fantasy => {
                "ethereal fantasy portrait, magical glowing lighting, soft dreamlike focus, intricate details, elven aesthetic"
            }
            Self::Vintage => {
                "vintage 1950s photography, warm sepia tones, film grain, analog camera aesthetic, nostalgic feel"
            }
            Self::Fashion => {
                "high fashion editorial, avant-garde makeup, bold styling, clean minimalist background, sharp focus"
            }
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StylePreset {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| StudioError::validation(format!("unknown style preset '{needle}'")))
    }
}

/// Lighting intensity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lighting {
    /// Diffused, even light.
    Soft,
    /// Balanced three-dimensional studio light.
    Cinematic,
    /// Strong key light and deep shadows.
    #[default]
    Dramatic,
    /// Harsh, edgy mood light.
    Intense,
}

impl Lighting {
    /// Prompt fragment for this lighting.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Soft => {
                "soft diffused studio lighting, gentle shadows, flattering portrait light, evenly lit"
            }
            Self::Cinematic => {
                "cinematic three-dimensional lighting, professional studio setup, dramatic key light, balanced contrast, rim light"
            }
            Self::Dramatic => {
                "dramatic lighting, strong key light, deep mysterious shadows, high contrast chiaroscuro"
            }
            Self::Intense => "intense mood lighting, harsh shadows, edgy look, strong backlight",
        }
    }
}

/// Color grading look.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorGrading {
    /// No grading instruction.
    None,
    /// Warm, nostalgic film tones.
    WarmVintage,
    /// Desaturated cool tones.
    CoolNoir,
    /// Teal and orange blockbuster look.
    #[default]
    TealOrange,
    /// Monochrome.
    ClassicBw,
}

impl ColorGrading {
    /// Prompt fragment for this grading, `None` for [`ColorGrading::None`].
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::WarmVintage => Some(
                "warm vintage color grading, nostalgic tones, golden hour feel, kodak portra style",
            ),
            Self::CoolNoir => Some(
                "cool noir cinematic tones, desaturated blues, moody atmosphere, matrix green tint",
            ),
            Self::TealOrange => Some(
                "vibrant teal and orange cinematic color grading, hollywood blockbuster look, complementary colors",
            ),
            Self::ClassicBw => Some(
                "classic black and white photography, high contrast monochrome, timeless silver screen look",
            ),
        }
    }
}

/// Output quality tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityMode {
    /// No quality suffix.
    Standard,
    /// Adds resolution and editorial-quality modifiers.
    #[default]
    High,
}

impl QualityMode {
    /// Suffix appended verbatim (including its leading separator).
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Standard => "",
            Self::High => {
                ", 4K resolution, masterpiece quality, high-end editorial photography style"
            }
        }
    }
}

/// User-facing knobs that shape the edit prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSettings {
    /// Selected look, or `None` for the default cinematic portrait.
    pub preset: Option<StylePreset>,
    /// Ask for high-fidelity skin texture.
    pub skin_texture: bool,
    /// Facial detail, 0 to 100.
    pub face_detail: u8,
    /// Creative freedom, 0 to 100.
    pub creativity: u8,
    /// Lighting intensity.
    pub lighting: Lighting,
    /// Color grading.
    pub color_grading: ColorGrading,
    /// Quality tier.
    pub quality: QualityMode,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            preset: None,
            skin_texture: true,
            face_detail: 65,
            creativity: 30,
            lighting: Lighting::default(),
            color_grading: ColorGrading::default(),
            quality: QualityMode::default(),
        }
    }
}

impl StyleSettings {
    /// Check slider ranges.
    pub fn validate(&self) -> StudioResult<()> {
        if self.face_detail > 100 {
            return Err(StudioError::validation("face_detail must be within 0..=100"));
        }
        if self.creativity > 100 {
            return Err(StudioError::validation("creativity must be within 0..=100"));
        }
        Ok(())
    }
}

/// Assemble the edit instruction for `settings`.
pub fn build_prompt(settings: &StyleSettings) -> String {
    let mut prompt = settings
        .preset
        .map_or(DEFAULT_PROMPT, StylePreset::prompt)
        .to_owned();

    if settings.skin_texture {
        prompt.push_str(", high fidelity texture, realistic pores");
    }
    if settings.face_detail > 60 {
        prompt.push_str(", hyper-detailed facial features");
    }
    if settings.creativity < 30 {
        prompt.push_str(", subtle retouching, preserve original identity");
    } else if settings.creativity > 70 {
        prompt.push_str(", creative interpretation, stylized, artistic");
    }

    prompt.push_str(", ");
    prompt.push_str(settings.lighting.prompt());
    if let Some(grading) = settings.color_grading.prompt() {
        prompt.push_str(", ");
        prompt.push_str(grading);
    }
    prompt.push_str(settings.quality.suffix());
    prompt
}

/// Follow-up instruction for a chat refinement of the current result.
pub fn refine_prompt(settings: &StyleSettings, message: &str) -> String {
    format!("{}, {}", build_prompt(settings), message.trim())
}

#[cfg(test)]
#[path = "../../tests/unit/edit/prompt.rs"]
mod tests;
