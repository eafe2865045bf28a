use crate::term::{Term, Var};
use std::sync::Arc;

#[derive(Debug)]
struct Binding {
    var: Var,
    value: Term,
    next: Option<Arc<Binding>>,
}

/// A persistent binding environment.
///
/// Bindings form a shared association list, newest first. Extending never
/// touches the receiver, so a branch of the search is abandoned by dropping
/// its substitution while every older version stays valid.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    head: Option<Arc<Binding>>,
    len: usize,
}

impl Substitution {
    /// The empty substitution
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bindings in the chain
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Most recent binding of `var`, if any
    #[must_use]
    pub fn lookup(&self, var: &Var) -> Option<&Term> {
        self.iter()
            .find_map(|(bound, value)| (bound == var).then_some(value))
    }

    /// Dereference `term`: follow variable bindings until reaching an unbound
    /// variable or a non-variable.
    #[must_use]
    pub fn walk<'a>(&'a self, term: &'a Term) -> &'a Term {
        let mut current = term;
        while let Term::Variable(var) = current {
            match self.lookup(var) {
                Some(value) => current = value,
                None => break,
            }
        }
        current
    }

    /// Whether `var` appears in `term` once bindings are followed
    #[must_use]
    pub fn occurs(&self, var: &Var, term: &Term) -> bool {
        match self.walk(term) {
            Term::Variable(other) => other == var,
            Term::Atom(_) => false,
            Term::Compound(head, tail) => self.occurs(var, head) || self.occurs(var, tail),
        }
    }

    /// New substitution with `var` bound to `value`, or `None` when the binding
    /// would make `var` part of its own value.
    #[must_use]
    pub fn extend(&self, var: Var, value: Term) -> Option<Self> {
        if self.occurs(&var, &value) {
            return None;
        }
        Some(Self {
            head: Some(Arc::new(Binding {
                var,
                value,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        })
    }

    /// Walk `term` all the way down, rebuilding pairs so that no bound
    /// variable remains anywhere inside the result.
    #[must_use]
    pub fn resolve(&self, term: &Term) -> Term {
        match self.walk(term) {
            Term::Compound(head, tail) => Term::cons(self.resolve(head), self.resolve(tail)),
            other => other.clone(),
        }
    }

    /// Bindings, newest first
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl Drop for Substitution {
    // Unlink uniquely owned nodes one by one; long chains would otherwise
    // drop recursively.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut binding) => next = binding.next.take(),
                Err(_) => break,
            }
        }
    }
}

/// Iterator over the bindings of a [`Substitution`], newest first
#[derive(Debug)]
pub struct Iter<'a> {
    next: Option<&'a Binding>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Var, &'a Term);

    fn next(&mut self) -> Option<Self::Item> {
        let binding = self.next?;
        self.next = binding.next.as_deref();
        Some((&binding.var, &binding.value))
    }
}

impl<'a> IntoIterator for &'a Substitution {
    type Item = (&'a Var, &'a Term);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
