use crate::subst::Substitution;
use crate::term::{Term, Var};
use indexmap::IndexMap;
use std::borrow::Borrow;

/// A conjunction of goals plus what to report about each proof.
///
/// ```rust
/// use sldlog::{Query, Term, Var};
///
/// let who = Var::new("who");
/// let query = Query::new([Term::compound("parent", [Term::symbol("bob"), Term::var(&who)])])
///     .select([&who])
///     .limit(1);
/// assert_eq!(query.solution_limit(), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    goals: Vec<Term>,
    vars: Vec<Var>,
    limit: Option<usize>,
    resolve_fully: bool,
}

impl Query {
    /// Query proving `goals` left to right
    pub fn new<I>(goals: I) -> Self
    where
        I: IntoIterator<Item = Term>,
    {
        Self {
            goals: goals.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Variables to report in each solution, in this order
    #[must_use]
    pub fn select<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Var>,
    {
        self.vars = vars.into_iter().map(|var| var.borrow().clone()).collect();
        self
    }

    /// Return at most `limit` solutions. Zero is rejected when the query runs.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Replace bound variables nested inside reported values as well, not
    /// only at the top. Off by default.
    #[must_use]
    pub fn resolve_fully(mut self, resolve_fully: bool) -> Self {
        self.resolve_fully = resolve_fully;
        self
    }

    /// The goals, in proof order
    #[must_use]
    pub fn goals(&self) -> &[Term] {
        &self.goals
    }

    /// The reported variables
    #[must_use]
    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    /// Maximum number of solutions, if capped
    #[must_use]
    pub fn solution_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Whether reported values are resolved all the way down
    #[must_use]
    pub fn resolves_fully(&self) -> bool {
        self.resolve_fully
    }
}

/// Values of the selected variables under one proof
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    bindings: IndexMap<Var, Term>,
}

impl Solution {
    /// Restrict `subst` to `vars`, walking each one to its value
    pub(crate) fn project(subst: &Substitution, vars: &[Var], resolve_fully: bool) -> Self {
        let bindings = vars
            .iter()
            .map(|var| {
                let term = Term::var(var);
                let value = if resolve_fully {
                    subst.resolve(&term)
                } else {
                    subst.walk(&term).clone()
                };
                (var.clone(), value)
            })
            .collect();
        Self { bindings }
    }

    /// Value of `var`, if it was selected
    #[must_use]
    pub fn get(&self, var: &Var) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Value of the first selected variable named `name`
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Term> {
        self.bindings
            .iter()
            .find_map(|(var, value)| (var.name() == name).then_some(value))
    }

    /// Selected variables and their values, in selection order
    pub fn iter(&self) -> impl Iterator<Item = (&Var, &Term)> {
        self.bindings.iter()
    }

    /// Number of reported variables
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no variable was selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Encode as a JSON object keyed by variable name
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Serialization`](crate::EngineError::Serialization)
    /// if encoding fails.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Solution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.bindings.len()))?;
        for (var, value) in &self.bindings {
            map.serialize_entry(var.name(), value)?;
        }
        map.end()
    }
}
