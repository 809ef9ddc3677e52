//! The riddle-guessing game.
//!
//! A [`RiddleBank`] is the fixed, non-empty collection of riddles loaded at
//! startup.  A [`RiddleSession`] holds the current riddle and the pending
//! answer the player is typing.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::observability::{ANSWERS_CORRECT, ANSWERS_WRONG, RIDDLES_PICKED};

/// A question and its answer.  Immutable once defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    /// The question shown to the player.
    pub question: String,
    /// The expected answer.
    pub answer: String,
}

impl Riddle {
    /// Creates a riddle.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The fixed collection riddles are drawn from.  Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiddleBank {
    riddles: Vec<Riddle>,
}

impl RiddleBank {
    /// Creates a bank from a list of riddles.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `riddles` is empty.
    pub fn new(riddles: Vec<Riddle>) -> Result<Self> {
        if riddles.is_empty() {
            return Err(Error::validation(
                "riddle bank must contain at least one riddle",
                Some("riddles".to_string()),
            ));
        }
        Ok(Self { riddles })
    }

    /// The three riddles the game ships with.
    pub fn builtin() -> Self {
        Self {
            riddles: vec![
                Riddle::new("ما هو الشيء الذي يمشي بلا أرجل؟", "الساعة"),
                Riddle::new("ما هو الشيء الذي كلما أخذت منه كبر؟", "الحفرة"),
                Riddle::new("له أسنان ولا يعض، ما هو؟", "المشط"),
            ],
        }
    }

    /// Loads a bank from a YAML list of `{question, answer}` entries.
    ///
    /// ```yaml
    /// - question: "له أسنان ولا يعض، ما هو؟"
    ///   answer: "المشط"
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| {
            Error::io(format!("failed to read riddles from {}", path.display()), err)
        })?;
        Self::from_yaml(&content)
    }

    /// Parses a bank from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let riddles: Vec<Riddle> = serde_yaml::from_str(content)?;
        Self::new(riddles)
    }

    /// Number of riddles in the bank.
    pub fn len(&self) -> usize {
        self.riddles.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.riddles.is_empty()
    }

    /// All riddles in insertion order.
    pub fn riddles(&self) -> &[Riddle] {
        &self.riddles
    }

    /// Returns true if the bank contains `riddle`.
    pub fn contains(&self, riddle: &Riddle) -> bool {
        self.riddles.iter().any(|r| r == riddle)
    }
}

impl Default for RiddleBank {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The outcome of checking an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the submitted answer matched.
    pub correct: bool,
    /// The stored answer, for display on a mismatch.
    pub answer: String,
}

/// Running tally of checked answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    /// Answers that matched.
    pub correct: u32,
    /// Answers that did not.
    pub wrong: u32,
}

/// Trim surrounding whitespace and fold case.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Holds the current riddle and the answer being typed.
pub struct RiddleSession {
    bank: RiddleBank,
    current: usize,
    input: String,
    score: Score,
    rng: StdRng,
}

impl RiddleSession {
    /// Starts a session and picks the first riddle.
    pub fn new(bank: RiddleBank) -> Self {
        Self::with_rng(bank, StdRng::from_os_rng())
    }

    /// Starts a session with a seeded generator, for reproducible picks.
    pub fn with_seed(bank: RiddleBank, seed: u64) -> Self {
        Self::with_rng(bank, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bank: RiddleBank, rng: StdRng) -> Self {
        let mut session = Self {
            bank,
            current: 0,
            input: String::new(),
            score: Score::default(),
            rng,
        };
        session.pick_random();
        session
    }

    /// Replaces the current riddle with a uniformly random one from the bank
    /// and clears the pending answer.
    pub fn pick_random(&mut self) -> &Riddle {
        self.current = self.rng.random_range(0..self.bank.len());
        self.input.clear();
        RIDDLES_PICKED.click();
        &self.bank.riddles[self.current]
    }

    /// The riddle currently shown.
    pub fn current(&self) -> &Riddle {
        &self.bank.riddles[self.current]
    }

    /// Compares `answer_text` with the current riddle's answer after
    /// normalizing both, then clears the pending answer.
    pub fn check(&mut self, answer_text: &str) -> Verdict {
        let riddle = &self.bank.riddles[self.current];
        let correct = normalize(answer_text) == normalize(&riddle.answer);
        let verdict = Verdict {
            correct,
            answer: riddle.answer.clone(),
        };
        if correct {
            self.score.correct += 1;
            ANSWERS_CORRECT.click();
        } else {
            self.score.wrong += 1;
            ANSWERS_WRONG.click();
        }
        self.input.clear();
        verdict
    }

    /// Checks whatever is in the pending answer buffer.
    pub fn check_input(&mut self) -> Verdict {
        let input = std::mem::take(&mut self.input);
        self.check(&input)
    }

    /// Replaces the pending answer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// The pending answer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Answers checked so far.
    pub fn score(&self) -> Score {
        self.score
    }

    /// The bank riddles are drawn from.
    pub fn bank(&self) -> &RiddleBank {
        &self.bank
    }
}
