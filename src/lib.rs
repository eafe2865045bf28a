//! # Sldlog
//!
//! A minimal logic-programming engine in Rust: facts and rules over symbolic
//! terms, answered by depth-first SLD resolution with unification.
//!
//! ## Features
//!
//! - Unification with occurs check over pair-structured terms
//! - Persistent substitutions, so backtracking is just dropping a reference
//! - Fresh variables for every use of a clause
//! - Lazy, depth-first proof search in declaration-reverse clause order
//!
//! ## Example
//!
//! ```rust
//! use sldlog::{Engine, Query, Term, Var};
//!
//! let mut engine = Engine::new();
//! engine.add_fact(Term::compound("parent", [Term::symbol("alice"), Term::symbol("bob")]));
//! engine.add_fact(Term::compound("parent", [Term::symbol("bob"), Term::symbol("carol")]));
//!
//! let child = Var::new("child");
//! let query = Query::new([Term::compound("parent", [Term::symbol("bob"), Term::var(&child)])])
//!     .select([&child]);
//!
//! let solutions = engine.query(&query).unwrap();
//! assert_eq!(solutions[0].get(&child), Some(&Term::symbol("carol")));
//! ```

/// Stored facts and rules, and variable renaming.
pub mod clause;
/// Ordered clause storage.
pub mod database;
/// Proof search.
pub mod engine;
/// Error types.
pub mod error;
/// Queries and their solutions.
pub mod query;
/// Persistent substitutions.
pub mod subst;
/// Terms: variables, atoms and pairs.
pub mod term;
/// Unification.
pub mod unify;

#[cfg(test)]
mod test_support;

pub use clause::Clause;
pub use database::Database;
pub use engine::{Engine, Solutions};
pub use error::{EngineError, Result};
pub use query::{Query, Solution};
pub use subst::Substitution;
pub use term::{Atom, Term, TermKind, Var};
pub use unify::unify;
