//! Opening tutorial prompts

use serde::{Deserialize, Serialize};

pub const TUTORIAL_MESSAGES: [&str; 6] = [
    "Use LEFT and RIGHT to move",
    "Press SPACE to jump",
    "Press SHIFT to dash",
    "Collect powerups for higher jumps",
    "Avoid spikes and monsters",
    "Chain jumps for combos!",
];

/// Ticks each prompt stays up
pub const MESSAGE_TICKS: u32 = 300;
/// Fade starts this many ticks into a prompt
const FADE_START: u32 = 240;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tutorial {
    pub step: usize,
    pub timer: u32,
}

impl Tutorial {
    /// Advance one live tick
    pub fn advance(&mut self) {
        if self.is_finished() {
            return;
        }
        self.timer += 1;
        if self.timer >= MESSAGE_TICKS {
            self.step += 1;
            self.timer = 0;
        }
    }

    /// Jump past every prompt
    pub fn skip(&mut self) {
        self.step = TUTORIAL_MESSAGES.len();
        self.timer = 0;
    }

    pub fn is_finished(&self) -> bool {
        self.step >= TUTORIAL_MESSAGES.len()
    }

    /// Current prompt and its opacity (0-255)
    pub fn current(&self) -> Option<(&'static str, u8)> {
        let message = *TUTORIAL_MESSAGES.get(self.step)?;
        let fade = self.timer.saturating_sub(FADE_START) * 2;
        Some((message, 255u32.saturating_sub(fade) as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_through_all_messages() {
        let mut tutorial = Tutorial::default();
        assert_eq!(tutorial.current(), Some((TUTORIAL_MESSAGES[0], 255)));

        for _ in 0..MESSAGE_TICKS {
            tutorial.advance();
        }
        assert_eq!(tutorial.step, 1);
        assert_eq!(tutorial.timer, 0);

        for _ in 0..MESSAGE_TICKS * 5 {
            tutorial.advance();
        }
        assert!(tutorial.is_finished());
        assert_eq!(tutorial.current(), None);

        tutorial.advance();
        assert_eq!(tutorial.step, TUTORIAL_MESSAGES.len());
    }

    #[test]
    fn test_fade_out() {
        let mut tutorial = Tutorial {
            step: 2,
            timer: 240,
        };
        assert_eq!(tutorial.current().map(|(_, a)| a), Some(255));
        tutorial.timer = 270;
        assert_eq!(tutorial.current().map(|(_, a)| a), Some(195));
        tutorial.timer = 299;
        assert_eq!(tutorial.current().map(|(_, a)| a), Some(137));
    }
}
