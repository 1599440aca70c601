// Comment model persisted through a repository.

use rand::Rng;

use crate::error::Result;
use crate::ring::ShardId;
use crate::storage::Repository;

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "shard", "ring", "replica", "hash", "node",
    "key", "value", "store", "balance", "arc", "moves", "quickly", "slowly", "every", "data",
    "mostly", "never", "always", "growth", "partition", "memory", "table", "order", "light",
];

/// A user comment keyed by its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub text: String,
}

impl Comment {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Persists the comment, returning the shard it landed on.
    pub fn save(&self, repo: &dyn Repository<String>) -> Result<ShardId> {
        repo.store(&self.id, self.text.clone())
    }

    /// Loads the comment with `id`.
    pub fn get_by_id(repo: &dyn Repository<String>, id: &str) -> Result<Self> {
        let text = repo.load(id)?;
        Ok(Self::new(id, text))
    }
}

/// Random sentence of 5 to 20 words.
pub fn fake_text<R: Rng>(rng: &mut R) -> String {
    let words = rng.gen_range(5..=20);
    let mut text = String::new();
    for i in 0..words {
        let word = WORDS[rng.gen_range(0..WORDS.len())];
        if i == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                text.extend(first.to_uppercase());
                text.push_str(chars.as_str());
            }
        } else {
            text.push(' ');
            text.push_str(word);
        }
    }
    text.push('.');
    text
}
