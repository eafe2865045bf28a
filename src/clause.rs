use crate::error::{EngineError, Result};
use crate::term::{Term, Var};
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use std::fmt;

/// Body goals of a rule. Most rules have one or two.
pub type Body = SmallVec<[Term; 2]>;

/// A stored clause (e.g. `(parent alice bob)` or
/// `(ancestor ?x ?y) :- (parent ?x ?z), (ancestor ?z ?y)`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// An unconditional head
    Fact(Term),
    /// A head that holds when every body goal holds, left to right
    Rule {
        /// The conclusion of the rule
        head: Term,
        /// The goals to prove, never empty
        body: Body,
    },
}

impl Clause {
    /// A fact with the given head
    #[must_use]
    pub fn fact(head: Term) -> Self {
        Clause::Fact(head)
    }

    /// A rule with the given head and body goals
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyRuleBody`] if `body` yields no goals.
    pub fn rule<I>(head: Term, body: I) -> Result<Self>
    where
        I: IntoIterator<Item = Term>,
    {
        let body: Body = body.into_iter().collect();
        if body.is_empty() {
            return Err(EngineError::EmptyRuleBody {
                head: head.to_string(),
            });
        }
        Ok(Clause::Rule { head, body })
    }

    /// The clause head
    #[must_use]
    pub fn head(&self) -> &Term {
        match self {
            Clause::Fact(head) | Clause::Rule { head, .. } => head,
        }
    }

    /// The body goals; empty for a fact
    #[must_use]
    pub fn body(&self) -> &[Term] {
        match self {
            Clause::Fact(_) => &[],
            Clause::Rule { body, .. } => body,
        }
    }

    /// Whether this clause is a fact
    #[must_use]
    pub fn is_fact(&self) -> bool {
        matches!(self, Clause::Fact(_))
    }

    /// Distinct variables of the clause, head first, in order of first occurrence
    #[must_use]
    pub fn variables(&self) -> Vec<Var> {
        let mut vars = IndexSet::new();
        self.head().collect_variables(&mut vars);
        for goal in self.body() {
            goal.collect_variables(&mut vars);
        }
        vars.into_iter().collect()
    }

    /// Copy of this clause with every variable replaced by a fresh one.
    ///
    /// Repeated occurrences of a variable map to the same fresh variable, so
    /// sharing inside the clause survives. Each call mints a new set, which is
    /// why the search renames a clause on every attempt to use it.
    #[must_use]
    pub fn rename(&self) -> Self {
        let mut renamer = Renamer::default();
        match self {
            Clause::Fact(head) => Clause::Fact(renamer.rename(head)),
            Clause::Rule { head, body } => Clause::Rule {
                head: renamer.rename(head),
                body: body.iter().map(|goal| renamer.rename(goal)).collect(),
            },
        }
    }

    /// Split into head and body goals
    #[must_use]
    pub fn into_parts(self) -> (Term, Body) {
        match self {
            Clause::Fact(head) => (head, Body::new()),
            Clause::Rule { head, body } => (head, body),
        }
    }
}

/// Per-call mapping from original variables to their fresh copies
#[derive(Debug, Default)]
struct Renamer {
    fresh: IndexMap<Var, Var>,
}

impl Renamer {
    fn rename(&mut self, term: &Term) -> Term {
        match term {
            Term::Variable(var) => {
                Term::Variable(self.fresh.entry(var.clone()).or_insert_with(|| var.fresh()).clone())
            }
            Term::Atom(_) => term.clone(),
            Term::Compound(head, tail) => Term::cons(self.rename(head), self.rename(tail)),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Fact(head) => write!(f, "{head}"),
            Clause::Rule { head, body } => {
                write!(f, "{head} :-")?;
                for (i, goal) in body.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{goal}")?;
                }
                Ok(())
            }
        }
    }
}
