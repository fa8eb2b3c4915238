use serde::Serialize;
use std::fmt;

use super::blueprint::TraitSection;
use super::domain::{ResponseSet, TraitKind};

/// Trait average held in tenths so it always renders with one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TraitScore {
    tenths: u32,
}

impl TraitScore {
    /// Averages `total` over `count` answers, rounding half away from zero.
    pub fn from_total(total: u32, count: u32) -> Self {
        if count == 0 {
            return Self::default();
        }
        Self {
            tenths: (total * 20 + count) / (count * 2),
        }
    }

    pub fn tenths(self) -> u32 {
        self.tenths
    }

    pub fn value(self) -> f64 {
        f64::from(self.tenths) / 10.0
    }
}

impl fmt::Display for TraitScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

impl Serialize for TraitScore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// Scores a section over its full question list; unanswered questions count as zero.
pub fn score_section(section: &TraitSection, responses: &ResponseSet) -> TraitScore {
    let total: u32 = section
        .question_ids()
        .map(|id| responses.get(id).map_or(0, |value| u32::from(value.value())))
        .sum();
    TraitScore::from_total(total, section.len() as u32)
}

/// One score per trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraitScores {
    pub openness: TraitScore,
    pub conscientiousness: TraitScore,
    pub extraversion: TraitScore,
    pub agreeableness: TraitScore,
    pub emotional_stability: TraitScore,
}

impl TraitScores {
    pub fn from_fn(mut score: impl FnMut(TraitKind) -> TraitScore) -> Self {
        Self {
            openness: score(TraitKind::Openness),
            conscientiousness: score(TraitKind::Conscientiousness),
            extraversion: score(TraitKind::Extraversion),
            agreeableness: score(TraitKind::Agreeableness),
            emotional_stability: score(TraitKind::EmotionalStability),
        }
    }

    pub fn get(&self, kind: TraitKind) -> TraitScore {
        match kind {
            TraitKind::Openness => self.openness,
            TraitKind::Conscientiousness => self.conscientiousness,
            TraitKind::Extraversion => self.extraversion,
            TraitKind::Agreeableness => self.agreeableness,
            TraitKind::EmotionalStability => self.emotional_stability,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitKind, TraitScore)> + '_ {
        TraitKind::ordered()
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_render_with_one_digit() {
        assert_eq!(TraitScore::from_total(30, 6).to_string(), "5.0");
        assert_eq!(TraitScore::from_total(15, 6).to_string(), "2.5");
        assert_eq!(TraitScore::from_total(0, 6).to_string(), "0.0");
        assert_eq!(TraitScore::from_total(6, 0).to_string(), "0.0");
    }

    #[test]
    fn rounding_goes_half_away_from_zero() {
        // 1/6 = 0.1666..
        assert_eq!(TraitScore::from_total(1, 6).to_string(), "0.2");
        // 4/6 = 0.666..
        assert_eq!(TraitScore::from_total(4, 6).to_string(), "0.7");
        // 25/6 = 4.1666..
        assert_eq!(TraitScore::from_total(25, 6).to_string(), "4.2");
        // 0.25 exactly
        assert_eq!(TraitScore::from_total(1, 4).to_string(), "0.3");
        assert_eq!(TraitScore::from_total(3, 4).value(), 0.8);
    }

    #[test]
    fn scores_serialize_as_numbers() {
        let json = serde_json::to_string(&TraitScore::from_total(21, 6)).expect("serialize");
        assert_eq!(json, "3.5");
    }
}
