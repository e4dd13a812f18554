use crate::error::QuizError;

/// Score band shown on the results screen and the result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    Visionary,
    UnderConstruction,
    NeedsPlanning,
}

impl ResultTier {
    pub fn title(self) -> &'static str {
        match self {
            ResultTier::Visionary => "Visionário Internacional",
            ResultTier::UnderConstruction => "Em Construção",
            ResultTier::NeedsPlanning => "Precisa de Planejamento",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ResultTier::Visionary => {
                "Você compreende a importância da estrutura além dos tijolos. Está pronto para a Rota da Águia."
            }
            ResultTier::UnderConstruction => {
                "Você tem boas noções, mas ainda há riscos ocultos em sua estratégia de internacionalização."
            }
            ResultTier::NeedsPlanning => {
                "Cuidado. Ficar onde está pode ser o maior risco. É hora de buscar conhecimento estruturado."
            }
        }
    }

    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => ResultTier::Visionary,
            50..=79 => ResultTier::UnderConstruction,
            _ => ResultTier::NeedsPlanning,
        }
    }
}

/// `round(100 * score / total)`, halves rounded up.
pub fn percentage(score: usize, total: usize) -> Result<u32, QuizError> {
    if total == 0 {
        return Err(QuizError::Configuration(
            "cannot derive a result tier for zero questions".into(),
        ));
    }
    let rounded = (200 * score + total) / (2 * total);
    Ok(rounded as u32)
}

pub fn tier(score: usize, total: usize) -> Result<ResultTier, QuizError> {
    percentage(score, total).map(ResultTier::from_percentage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier(8, 10).unwrap(), ResultTier::Visionary);
        assert_eq!(tier(5, 10).unwrap(), ResultTier::UnderConstruction);
        assert_eq!(tier(7, 10).unwrap(), ResultTier::UnderConstruction);
        assert_eq!(tier(4, 10).unwrap(), ResultTier::NeedsPlanning);
        assert_eq!(tier(10, 10).unwrap(), ResultTier::Visionary);
        assert_eq!(tier(0, 10).unwrap(), ResultTier::NeedsPlanning);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3).unwrap(), 33);
        assert_eq!(percentage(2, 3).unwrap(), 67);
        assert_eq!(percentage(1, 8).unwrap(), 13);
        assert_eq!(percentage(7, 10).unwrap(), 70);
    }

    #[test]
    fn test_rounding_can_promote_tier() {
        // 79.5% rounds to 80
        assert_eq!(percentage(159, 200).unwrap(), 80);
        assert_eq!(tier(159, 200).unwrap(), ResultTier::Visionary);
        // 49.5% rounds to 50
        assert_eq!(tier(99, 200).unwrap(), ResultTier::UnderConstruction);
    }

    #[test]
    fn test_zero_total_is_rejected() {
        assert!(matches!(tier(0, 0), Err(QuizError::Configuration(_))));
    }

    #[test]
    fn test_titles_and_messages() {
        assert_eq!(ResultTier::UnderConstruction.title(), "Em Construção");
        assert!(ResultTier::Visionary.message().contains("Rota da Águia"));
    }
}
