use std::fmt;

/// Ghostscript `-dPDFSETTINGS` presets, from smallest to most faithful.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QualityProfile {
    /// 72 dpi
    Screen,
    /// 150 dpi
    Ebook,
    /// 300 dpi
    Printer,
    /// 300 dpi, colour preserving
    Prepress,
}

impl QualityProfile {
    pub fn name(&self) -> &'static str {
        match self {
            QualityProfile::Screen => "screen",
            QualityProfile::Ebook => "ebook",
            QualityProfile::Printer => "printer",
            QualityProfile::Prepress => "prepress",
        }
    }

    /// Value passed to `-dPDFSETTINGS=`.
    pub fn directive(&self) -> &'static str {
        match self {
            QualityProfile::Screen => "/screen",
            QualityProfile::Ebook => "/ebook",
            QualityProfile::Printer => "/printer",
            QualityProfile::Prepress => "/prepress",
        }
    }
}

impl fmt::Display for QualityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Profiles tried by the whole-document method, most faithful first.
pub const DEFAULT_PROFILE_LADDER: [QualityProfile; 2] =
    [QualityProfile::Ebook, QualityProfile::Screen];

/// The profile used when image re-encoding gives up.
pub const FALLBACK_PROFILE: QualityProfile = QualityProfile::Screen;

/// A JPEG quality and resolution pair for image re-encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QualityStep {
    quality: u8,
    dpi: u16,
}

impl QualityStep {
    /// `quality` must be in 1..=100 and `dpi` non-zero.
    pub fn new(quality: u8, dpi: u16) -> Option<Self> {
        if (1..=100).contains(&quality) && dpi > 0 {
            Some(Self { quality, dpi })
        } else {
            None
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn dpi(&self) -> u16 {
        self.dpi
    }
}

impl fmt::Display for QualityStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quality {} at {} dpi", self.quality, self.dpi)
    }
}

const DEFAULT_QUALITIES: [u8; 4] = [75, 60, 50, 40];
const DEFAULT_DPIS: [u16; 4] = [200, 150, 120, 100];

/// Steps tried by the image re-encoding method, most faithful first.
pub fn default_step_ladder() -> Vec<QualityStep> {
    DEFAULT_QUALITIES
        .iter()
        .zip(DEFAULT_DPIS.iter())
        .map(|(&quality, &dpi)| QualityStep { quality, dpi })
        .collect()
}
