use crate::clause::{Body, Clause};
use crate::database::Database;
use crate::error::{EngineError, Result};
use crate::query::{Query, Solution};
use crate::subst::Substitution;
use crate::term::Term;
use crate::unify::unify;
use log::{debug, trace};
use std::sync::Arc;

/// Goals still waiting to be proved, shared between sibling alternatives
#[derive(Debug, Clone, Default)]
struct Goals(Option<Arc<GoalNode>>);

#[derive(Debug)]
struct GoalNode {
    goal: Term,
    rest: Goals,
}

impl Goals {
    fn from_slice(goals: &[Term]) -> Self {
        Self::default().prepend(goals.iter().cloned())
    }

    /// `goals` followed by `self`
    fn prepend<I>(&self, goals: I) -> Self
    where
        I: IntoIterator<Item = Term>,
        I::IntoIter: DoubleEndedIterator,
    {
        goals.into_iter().rev().fold(self.clone(), |rest, goal| {
            Goals(Some(Arc::new(GoalNode { goal, rest })))
        })
    }

    fn split_first(&self) -> Option<(&Term, &Goals)> {
        self.0.as_deref().map(|node| (&node.goal, &node.rest))
    }
}

#[derive(Debug)]
enum Frame {
    /// Prove `goals` left to right under `subst`
    Prove { goals: Goals, subst: Substitution },
    /// Try the `next` clause (in search order) against `goal`, then `rest`
    Resolve {
        goal: Term,
        rest: Goals,
        subst: Substitution,
        next: usize,
    },
}

/// Lazy depth-first SLD resolution.
///
/// Each item is a substitution proving every goal. Solutions come out in the
/// same order as the recursive definition: for each clause (newest first)
/// whose renamed head unifies with the first goal, all proofs of that clause's
/// body followed by the remaining goals, before the next clause is tried.
///
/// The work stack replaces host recursion, so deep derivations do not
/// overflow. A rule that recurses into itself before reaching a base case
/// still searches forever.
#[derive(Debug)]
pub struct Solutions<'db> {
    database: &'db Database,
    stack: Vec<Frame>,
}

impl<'db> Solutions<'db> {
    fn new(database: &'db Database, frame: Frame) -> Self {
        Self {
            database,
            stack: vec![frame],
        }
    }

    fn resolve(&mut self, goal: Term, rest: Goals, subst: Substitution, next: usize) {
        let database = self.database;
        let Some(clause) = database.nth_most_recent(next) else {
            return;
        };
        let (head, body): (Term, Body) = clause.rename().into_parts();
        let unified = unify(&goal, &head, &subst);
        trace!(
            "goal {goal} against clause #{next} {clause}: {}",
            if unified.is_some() { "unified" } else { "failed" }
        );

        let continuation = unified.map(|subst| Frame::Prove {
            goals: rest.prepend(body),
            subst,
        });
        if next + 1 < database.len() {
            self.stack.push(Frame::Resolve {
                goal,
                rest,
                subst,
                next: next + 1,
            });
        }
        if let Some(frame) = continuation {
            self.stack.push(frame);
        }
    }
}

impl Iterator for Solutions<'_> {
    type Item = Substitution;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Prove { goals, subst } => match goals.split_first() {
                    None => return Some(subst),
                    Some((goal, rest)) => self.stack.push(Frame::Resolve {
                        goal: goal.clone(),
                        rest: rest.clone(),
                        subst,
                        next: 0,
                    }),
                },
                Frame::Resolve {
                    goal,
                    rest,
                    subst,
                    next,
                } => self.resolve(goal, rest, subst, next),
            }
        }
        None
    }
}

/// The logic engine: a clause database plus proof search over it
#[derive(Debug, Default)]
pub struct Engine {
    database: Database,
}

impl Engine {
    /// Create an engine with an empty database
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an already populated database
    #[must_use]
    pub fn with_database(database: Database) -> Self {
        Self { database }
    }

    /// The clause database
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Give back the clause database
    #[must_use]
    pub fn into_database(self) -> Database {
        self.database
    }

    /// Add a clause to the knowledge base
    pub fn add_clause(&mut self, clause: Clause) {
        self.database.add_clause(clause);
    }

    /// Add a fact to the knowledge base
    pub fn add_fact(&mut self, head: Term) {
        self.database.add_fact(head);
    }

    /// Add a rule to the knowledge base
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyRuleBody`] if `body` is empty.
    pub fn add_rule<I>(&mut self, head: Term, body: I) -> Result<()>
    where
        I: IntoIterator<Item = Term>,
    {
        self.database.add_rule(head, body)
    }

    /// Forget every clause
    pub fn clear(&mut self) {
        self.database.clear();
    }

    /// All substitutions proving `goal` under `subst`, trying every clause
    /// newest first.
    #[must_use]
    pub fn prove_one(&self, goal: &Term, subst: &Substitution) -> Solutions<'_> {
        Solutions::new(
            &self.database,
            Frame::Resolve {
                goal: goal.clone(),
                rest: Goals::default(),
                subst: subst.clone(),
                next: 0,
            },
        )
    }

    /// All substitutions proving every goal in `goals` under `subst`.
    ///
    /// With no goals the only solution is `subst` itself.
    #[must_use]
    pub fn prove_all(&self, goals: &[Term], subst: &Substitution) -> Solutions<'_> {
        Solutions::new(
            &self.database,
            Frame::Prove {
                goals: Goals::from_slice(goals),
                subst: subst.clone(),
            },
        )
    }

    /// Returns the selected variable bindings of every proof of the query.
    ///
    /// Search stops as soon as the limit is reached, so a capped query over an
    /// infinite relation can still return. The result always equals the first
    /// `limit` solutions of the uncapped query.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidLimit`] if the query limit is zero.
    pub fn query(&self, query: &Query) -> Result<Vec<Solution>> {
        let limit = match query.solution_limit() {
            Some(0) => return Err(EngineError::InvalidLimit(0)),
            Some(limit) => limit,
            None => usize::MAX,
        };
        debug!(
            "query: {} goals, {} selected variables, limit {:?}",
            query.goals().len(),
            query.vars().len(),
            query.solution_limit()
        );

        let solutions: Vec<Solution> = self
            .prove_all(query.goals(), &Substitution::new())
            .take(limit)
            .map(|subst| Solution::project(&subst, query.vars(), query.resolves_fully()))
            .collect();

        debug!("query produced {} solutions", solutions.len());
        Ok(solutions)
    }

    /// Returns whether the query has at least one proof
    #[must_use]
    pub fn ask(&self, query: &Query) -> bool {
        self.prove_all(query.goals(), &Substitution::new())
            .next()
            .is_some()
    }
}
