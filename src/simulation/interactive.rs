//! Decision primitives for rounds where the player's choices come from
//! outside the engine (a terminal prompt, a queue, a test script).

/// A player's choice at a decision point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
}

impl Decision {
    /// Parse a line of user input, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Decision> {
        match input.trim().to_lowercase().as_str() {
            "hit" | "h" => Some(Decision::Hit),
            "stand" | "s" => Some(Decision::Stand),
            _ => None,
        }
    }
}

/// Replays a fixed list of decisions, then stands
#[derive(Debug, Clone)]
pub struct ScriptedDecider {
    decisions: Vec<Decision>,
    pos: usize,
}

impl ScriptedDecider {
    pub fn new(decisions: Vec<Decision>) -> Self {
        ScriptedDecider { decisions, pos: 0 }
    }

    pub fn next_decision(&mut self) -> Decision {
        let decision = self
            .decisions
            .get(self.pos)
            .copied()
            .unwrap_or(Decision::Stand);
        self.pos += 1;
        decision
    }

    /// How many decisions have been requested so far
    pub fn asked(&self) -> usize {
        self.pos
    }
}
