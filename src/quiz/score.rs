use std::collections::HashMap;

use crate::error::ConfigError;

/// One result band. `max` is inclusive; the last band has no ceiling.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tier {
    pub min: usize,
    #[serde(default)]
    pub max: Option<usize>,
    pub description: String,
}

impl Tier {
    #[cfg(test)]
    pub fn new(min: usize, max: Option<usize>, description: impl Into<String>) -> Self {
        Self {
            min,
            max,
            description: description.into(),
        }
    }

    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Scoring {
    /// Compared against answers without regard to case, e.g. "да".
    pub affirmative: String,
    pub tiers: Vec<Tier>,
}

impl Scoring {
    #[cfg(test)]
    pub fn new(affirmative: impl Into<String>, tiers: Vec<Tier>) -> Self {
        Self {
            affirmative: affirmative.into(),
            tiers,
        }
    }

    pub fn is_affirmative(&self, answer: &str) -> bool {
        answer.to_lowercase() == self.affirmative.to_lowercase()
    }

    pub fn yes_count(&self, answers: &HashMap<String, String>) -> usize {
        answers.values().filter(|a| self.is_affirmative(a)).count()
    }

    /// Always `Some` for a table that passed `validate`.
    pub fn tier_for(&self, yes_count: usize) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.contains(yes_count))
    }

    pub fn score(&self, answers: &HashMap<String, String>) -> Option<&Tier> {
        self.tier_for(self.yes_count(answers))
    }

    /// The table has to start at zero, be contiguous and end open.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.affirmative.trim().is_empty() {
            return Err(ConfigError::EmptyAffirmative);
        }
        if self.tiers.is_empty() {
            return Err(ConfigError::NoTiers);
        }

        let mut expected = 0;
        let last = self.tiers.len() - 1;
        for (index, tier) in self.tiers.iter().enumerate() {
            if tier.min != expected {
                return Err(ConfigError::TierGap {
                    index,
                    expected,
                    found: tier.min,
                });
            }
            match tier.max {
                Some(max) if max < tier.min => {
                    return Err(ConfigError::TierInverted {
                        index,
                        min: tier.min,
                        max,
                    })
                }
                Some(_) if index == last => return Err(ConfigError::TierCeiling),
                Some(max) => expected = max + 1,
                None if index != last => return Err(ConfigError::TierUnbounded(index)),
                None => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn scoring() -> Scoring {
        Scoring::new(
            "да",
            vec![
                Tier::new(0, Some(3), "low"),
                Tier::new(4, Some(7), "medium"),
                Tier::new(8, Some(12), "high"),
                Tier::new(13, None, "severe"),
            ],
        )
    }

    fn answers(yes: usize, no: usize) -> HashMap<String, String> {
        let mut answers = HashMap::new();
        for i in 0..yes {
            answers.insert(format!("q{}", i), "Да".to_string());
        }
        for i in yes..yes + no {
            answers.insert(format!("q{}", i), "Нет".to_string());
        }
        answers
    }

    #[test]
    fn tiers_are_inclusive_and_contiguous() {
        let scoring = scoring();
        scoring.validate().unwrap();
        let expect = [
            (0, "low"),
            (3, "low"),
            (4, "medium"),
            (7, "medium"),
            (8, "high"),
            (12, "high"),
            (13, "severe"),
            (40, "severe"),
        ];
        for (count, description) in expect {
            assert_eq!(
                scoring.tier_for(count).map(|t| t.description.as_str()),
                Some(description),
                "count {}",
                count
            );
        }
    }

    #[test]
    fn every_count_lands_in_exactly_one_tier() {
        let scoring = scoring();
        for count in 0..30 {
            let hits = scoring.tiers.iter().filter(|t| t.contains(count)).count();
            assert_eq!(hits, 1, "count {}", count);
        }
    }

    #[test]
    fn affirmative_ignores_case_only() {
        let scoring = scoring();
        assert!(scoring.is_affirmative("ДА"));
        assert!(scoring.is_affirmative("Да"));
        assert!(!scoring.is_affirmative(" да"));
        assert!(!scoring.is_affirmative(""));
        assert!(!scoring.is_affirmative("yes"));
    }

    #[test]
    fn five_yes_ten_no_is_medium() {
        let scoring = scoring();
        let answers = answers(5, 10);
        assert_eq!(scoring.yes_count(&answers), 5);
        assert_eq!(scoring.score(&answers).map(|t| t.min), Some(4));
        assert_eq!(scoring.score(&answers).unwrap().description, "medium");
    }

    #[test]
    fn gap_is_rejected() {
        let mut scoring = scoring();
        scoring.tiers[1].min = 5;
        assert!(matches!(
            scoring.validate(),
            Err(ConfigError::TierGap {
                index: 1,
                expected: 4,
                found: 5
            })
        ));
    }

    #[test]
    fn overlap_is_rejected() {
        let mut scoring = scoring();
        scoring.tiers[2].min = 7;
        assert!(matches!(scoring.validate(), Err(ConfigError::TierGap { index: 2, .. })));
    }

    #[test]
    fn table_must_start_at_zero() {
        let mut scoring = scoring();
        scoring.tiers[0].min = 1;
        assert!(matches!(scoring.validate(), Err(ConfigError::TierGap { index: 0, .. })));
    }

    #[test]
    fn last_tier_must_be_open() {
        let mut scoring = scoring();
        scoring.tiers[3].max = Some(15);
        assert!(matches!(scoring.validate(), Err(ConfigError::TierCeiling)));

        let mut scoring = self::scoring();
        scoring.tiers[1].max = None;
        assert!(matches!(scoring.validate(), Err(ConfigError::TierUnbounded(1))));
    }

    #[test]
    fn inverted_and_empty_tables_are_rejected() {
        let mut scoring = scoring();
        scoring.tiers[1].max = Some(2);
        assert!(matches!(
            scoring.validate(),
            Err(ConfigError::TierInverted { index: 1, .. })
        ));

        let empty = Scoring::new("да", Vec::new());
        assert!(matches!(empty.validate(), Err(ConfigError::NoTiers)));
        // An unchecked empty table yields no tier instead of panicking.
        assert_eq!(empty.tier_for(0), None);
        assert_eq!(empty.score(&answers(2, 1)), None);
        let mut scoring = self::scoring();
        scoring.affirmative = "  ".to_string();
        assert!(matches!(scoring.validate(), Err(ConfigError::EmptyAffirmative)));
    }
}
