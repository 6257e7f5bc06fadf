use std::collections::HashMap;

/// Feedback attached to a single letter of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LetterStatus {
    /// Typed but not yet evaluated
    #[default]
    Unknown,
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl LetterStatus {
    /// Rank used when merging statuses into keyboard hints.
    fn priority(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Absent => 1,
            Self::Present => 2,
            Self::Correct => 3,
        }
    }

    /// Keep whichever of the two statuses tells the player more.
    #[must_use]
    pub fn strongest(self, other: Self) -> Self {
        if other.priority() > self.priority() {
            other
        } else {
            self
        }
    }
}

/// How repeated letters are classified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Scoring {
    /// A letter is marked present or correct whenever its character occurs in
    /// the target, however many times it was guessed.
    #[default]
    Positional,
    /// Present and correct marks are capped by the letter's count in the
    /// target, greens taking their share first.
    Classic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Letter {
    value: char,
    status: LetterStatus,
}

impl Letter {
    /// A freshly typed letter. The value is stored upper-cased.
    pub fn new(value: char) -> Self {
        Self {
            value: value.to_ascii_uppercase(),
            status: LetterStatus::Unknown,
        }
    }

    pub fn value(self) -> char {
        self.value
    }

    pub fn status(self) -> LetterStatus {
        self.status
    }

    #[must_use]
    pub fn with_status(self, status: LetterStatus) -> Self {
        Self { status, ..self }
    }
}

/// One attempt, complete or still being typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    letters: Vec<Letter>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The letters as an upper-case string.
    pub fn word(&self) -> String {
        self.letters.iter().map(|l| l.value).collect()
    }

    pub fn count(&self, status: LetterStatus) -> usize {
        self.letters.iter().filter(|l| l.status == status).count()
    }

    pub(crate) fn push(&mut self, letter: Letter) {
        self.letters.push(letter);
    }

    pub(crate) fn pop(&mut self) -> Option<Letter> {
        self.letters.pop()
    }
}

impl FromIterator<Letter> for Row {
    fn from_iter<T: IntoIterator<Item = Letter>>(iter: T) -> Self {
        Self {
            letters: iter.into_iter().collect(),
        }
    }
}

/// Classify every letter of `row` against `target`, returning the evaluated row.
///
/// `target` is expected upper-case; letters in a [`Row`] always are.
pub fn evaluate(row: &Row, target: &str, scoring: Scoring) -> Row {
    let statuses = match scoring {
        Scoring::Positional => positional_statuses(row, target),
        Scoring::Classic => classic_statuses(row, target),
    };
    row.letters
        .iter()
        .zip(statuses)
        .map(|(letter, status)| letter.with_status(status))
        .collect()
}

fn positional_statuses(row: &Row, target: &str) -> Vec<LetterStatus> {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (i, c) in target.chars().enumerate() {
        positions.entry(c).or_default().push(i);
    }

    row.letters
        .iter()
        .enumerate()
        .map(|(i, letter)| match positions.get(&letter.value) {
            Some(at) if at.contains(&i) => LetterStatus::Correct,
            Some(_) => LetterStatus::Present,
            None => LetterStatus::Absent,
        })
        .collect()
}

fn classic_statuses(row: &Row, target: &str) -> Vec<LetterStatus> {
    let target: Vec<char> = target.chars().collect();
    let mut statuses = vec![LetterStatus::Absent; row.len()];
    let mut remaining: HashMap<char, usize> = HashMap::new();

    // First pass: greens, counting what is left over for yellows
    for (i, &t) in target.iter().enumerate() {
        if row.letters.get(i).map(|l| l.value) == Some(t) {
            statuses[i] = LetterStatus::Correct;
        } else {
            *remaining.entry(t).or_insert(0) += 1;
        }
    }

    // Second pass: yellows
    for (i, letter) in row.letters.iter().enumerate() {
        if statuses[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(&letter.value)
            && *count > 0
        {
            statuses[i] = LetterStatus::Present;
            *count -= 1;
        }
    }

    statuses
}
