//! Goal tips

use rand::seq::SliceRandom;

use crate::models::Goal;

const WEIGHT_LOSS_TIPS: [&str; 3] = [
    "Eat more fiber to stay full",
    "Drink water before meals",
    "Prioritize protein",
];

const WEIGHT_GAIN_TIPS: [&str; 3] = [
    "Add calorie-dense foods like nuts",
    "Lift weights to build muscle",
    "Eat every 3 hours",
];

/// All tips for a goal
pub fn tips_for(goal: Goal) -> &'static [&'static str] {
    match goal {
        Goal::WeightLoss => &WEIGHT_LOSS_TIPS,
        Goal::WeightGain => &WEIGHT_GAIN_TIPS,
    }
}

/// One tip for the goal, chosen uniformly at random
pub fn random_tip(goal: Goal) -> &'static str {
    tips_for(goal)
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_tip_belongs_to_goal() {
        for goal in Goal::ALL {
            for _ in 0..20 {
                assert!(tips_for(goal).contains(&random_tip(goal)));
            }
        }
    }

    #[test]
    fn test_each_goal_has_three_tips() {
        assert_eq!(tips_for(Goal::WeightLoss).len(), 3);
        assert_eq!(tips_for(Goal::WeightGain).len(), 3);
        assert_eq!(tips_for(Goal::WeightGain)[2], "Eat every 3 hours");
    }
}
