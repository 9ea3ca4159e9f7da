//! Dice backed by the thread-local RNG

use rand::Rng;

use crate::domain::services::DiceRoller;

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDice;

impl DiceRoller for RandomDice {
    fn roll(&self, sides: u32) -> i32 {
        let sides = i32::try_from(sides.max(1)).unwrap_or(i32::MAX);
        rand::thread_rng().gen_range(1..=sides)
    }
}
