//! Bilingual caption track shown while an Adzan plays.

use crate::error::CaptionError;
use serde::{Deserialize, Serialize};

const ARABIC_LINES: [&str; 8] = [
    "اللّهُ أَكْبَرُ ٱللَّهُ أَكْبَرُ",
    "اللّهُ أَكْبَرُ ٱللَّهُ أَكْبَرُ",
    "أَشْهَدُ أَنْ لَا إِلٰهَ إِلَّا ٱللَّهُ",
    "أَشْهَدُ أَنَّ مُحَمَّدًا رَسُولُ ٱللَّهِ",
    "حَيَّ عَلَى ٱلصَّلَاةِ",
    "حَيَّ عَلَى ٱلْفَلَاحِ",
    "اللّهُ أَكْبَرُ",
    "لَا إِلٰهَ إِلَّا ٱللَّهُ",
];

const LATIN_LINES: [&str; 8] = [
    "Allahu Akbar, Allahu Akbar",
    "Allahu Akbar, Allahu Akbar",
    "Asyhadu an lā ilāha illā Allāh",
    "Asyhadu anna Muhammadan rasūlullāh",
    "Hayya ‘alaṣ-ṣalāh",
    "Hayya ‘alal-falāḥ",
    "Allahu Akbar",
    "Lā ilāha illā Allāh",
];

/// One synchronization step: the same phrase in both scripts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionPair {
    pub source: String,
    pub transliterated: String,
}

/// Index-aligned source and transliteration lines.
///
/// Construction guarantees both sequences have the same non-zero length,
/// so every index in `0..len()` has a line on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionTrack {
    source_lines: Vec<String>,
    transliterated_lines: Vec<String>,
}

impl Default for CaptionTrack {
    fn default() -> Self {
        Self::adzan()
    }
}

impl CaptionTrack {
    pub fn new(
        source_lines: Vec<String>,
        transliterated_lines: Vec<String>,
    ) -> Result<Self, CaptionError> {
        if source_lines.len() != transliterated_lines.len() {
            return Err(CaptionError::LengthMismatch {
                source_len: source_lines.len(),
                transliterated_len: transliterated_lines.len(),
            });
        }
        if source_lines.is_empty() {
            return Err(CaptionError::Empty);
        }

        Ok(Self {
            source_lines,
            transliterated_lines,
        })
    }

    /// The standard eight-phrase Adzan in Arabic and Latin script.
    pub fn adzan() -> Self {
        Self {
            source_lines: ARABIC_LINES.iter().map(|s| s.to_string()).collect(),
            transliterated_lines: LATIN_LINES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.source_lines.len()
    }

    /// Always false for a constructed track; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.source_lines.is_empty()
    }

    /// Index of the final caption.
    pub fn last_index(&self) -> usize {
        self.len().saturating_sub(1)
    }

    pub fn source_line(&self, index: usize) -> Option<&str> {
        self.source_lines.get(index).map(String::as_str)
    }

    pub fn transliterated_line(&self, index: usize) -> Option<&str> {
        self.transliterated_lines.get(index).map(String::as_str)
    }

    /// Safe lookup of both lines; `None` outside `0..len()`.
    pub fn pair(&self, index: usize) -> Option<CaptionPair> {
        Some(CaptionPair {
            source: self.source_line(index)?.to_string(),
            transliterated: self.transliterated_line(index)?.to_string(),
        })
    }

    /// Like [`CaptionTrack::pair`] but degrades to empty strings.
    pub fn pair_or_default(&self, index: usize) -> CaptionPair {
        self.pair(index).unwrap_or_default()
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    pub fn transliterated_lines(&self) -> &[String] {
        &self.transliterated_lines
    }
}

/// Config-file form of a caption track override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionConfig {
    pub source_lines: Vec<String>,
    pub transliterated_lines: Vec<String>,
}

impl TryFrom<&CaptionConfig> for CaptionTrack {
    type Error = CaptionError;

    fn try_from(config: &CaptionConfig) -> Result<Self, Self::Error> {
        CaptionTrack::new(
            config.source_lines.clone(),
            config.transliterated_lines.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adzan_track_aligned() {
        let track = CaptionTrack::adzan();
        assert_eq!(track.len(), 8);
        assert_eq!(track.source_lines().len(), track.transliterated_lines().len());

        for i in 0..track.len() {
            let pair = track.pair(i).expect("every index has both lines");
            assert!(!pair.source.is_empty());
            assert!(!pair.transliterated.is_empty());
        }
    }

    #[test]
    fn test_out_of_range_is_absent() {
        let track = CaptionTrack::adzan();
        assert!(track.pair(8).is_none());
        assert!(track.source_line(usize::MAX).is_none());
        assert_eq!(track.pair_or_default(42), CaptionPair::default());
    }

    #[test]
    fn test_first_and_last_lines() {
        let track = CaptionTrack::adzan();
        assert_eq!(
            track.transliterated_line(0),
            Some("Allahu Akbar, Allahu Akbar")
        );
        assert_eq!(track.last_index(), 7);
        assert_eq!(track.transliterated_line(7), Some("Lā ilāha illā Allāh"));
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let result = CaptionTrack::new(
            vec!["a".to_string(), "b".to_string()],
            vec!["a".to_string()],
        );
        assert_eq!(
            result,
            Err(CaptionError::LengthMismatch {
                source_len: 2,
                transliterated_len: 1
            })
        );
    }

    #[test]
    fn test_rejects_empty_track() {
        assert_eq!(CaptionTrack::new(vec![], vec![]), Err(CaptionError::Empty));
    }

    #[test]
    fn test_from_config() {
        let config = CaptionConfig {
            source_lines: vec!["one".to_string()],
            transliterated_lines: vec!["satu".to_string()],
        };
        let track = CaptionTrack::try_from(&config).unwrap();
        assert_eq!(track.pair(0).unwrap().transliterated, "satu");
    }
}
