use crate::clause::Clause;
use crate::error::Result;
use crate::term::Term;
use log::debug;

/// Ordered clause storage.
///
/// Clauses are appended and never edited. The search visits them newest
/// first, so a later declaration is tried before an earlier one with the
/// same head. Lifecycle: construct, populate, query, optionally [`clear`].
///
/// [`clear`]: Database::clear
#[derive(Debug, Clone, Default)]
pub struct Database {
    clauses: Vec<Clause>,
}

impl Database {
    /// Create an empty database
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause
    pub fn add_clause(&mut self, clause: Clause) {
        debug!("adding clause #{}: {clause}", self.clauses.len());
        self.clauses.push(clause);
    }

    /// Append a fact
    pub fn add_fact(&mut self, head: Term) {
        self.add_clause(Clause::fact(head));
    }

    /// Append a rule
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyRuleBody`](crate::EngineError::EmptyRuleBody)
    /// if `body` is empty; nothing is stored in that case.
    pub fn add_rule<I>(&mut self, head: Term, body: I) -> Result<()>
    where
        I: IntoIterator<Item = Term>,
    {
        self.add_clause(Clause::rule(head, body)?);
        Ok(())
    }

    /// Remove every clause
    pub fn clear(&mut self) {
        debug!("clearing {} clauses", self.clauses.len());
        self.clauses.clear();
    }

    /// Number of stored clauses
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether no clause is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses in declaration order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Clause> + ExactSizeIterator {
        self.clauses.iter()
    }

    /// Clauses in the order the search tries them: most recently added first
    pub fn iter_most_recent_first(
        &self,
    ) -> impl DoubleEndedIterator<Item = &Clause> + ExactSizeIterator {
        self.clauses.iter().rev()
    }

    /// The `n`-th clause in search order
    pub(crate) fn nth_most_recent(&self, n: usize) -> Option<&Clause> {
        let index = self.clauses.len().checked_sub(n + 1)?;
        self.clauses.get(index)
    }
}

impl Extend<Clause> for Database {
    fn extend<I: IntoIterator<Item = Clause>>(&mut self, clauses: I) {
        for clause in clauses {
            self.add_clause(clause);
        }
    }
}

impl FromIterator<Clause> for Database {
    fn from_iter<I: IntoIterator<Item = Clause>>(clauses: I) -> Self {
        let mut database = Self::new();
        database.extend(clauses);
        database
    }
}
