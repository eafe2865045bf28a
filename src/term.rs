use indexmap::IndexSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of variable identities. Every [`Var`] ever created gets its own id.
static NEXT_VAR_ID: AtomicU64 = AtomicU64::new(0);

/// A logic variable.
///
/// Two variables are equal only when they share the same identity, never
/// because their names match. `Var::new("x")` called twice yields two
/// unrelated variables that are both named `x`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Var {
    id: u64,
    name: Arc<str>,
}

impl Var {
    /// Create a variable with a globally fresh identity
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
        }
    }

    /// A new variable with the same display name but a fresh identity
    #[must_use]
    pub fn fresh(&self) -> Self {
        Self::new(Arc::clone(&self.name))
    }

    /// The display name given at creation
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unique identity of this variable
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Var {}

impl Hash for Var {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}#{}", self.name, self.id)
    }
}

/// An opaque leaf value. Only equality matters during matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Atom {
    /// The empty marker terminating a chain of pairs
    Nil,
    /// A bare symbol (e.g. `parent`, `alice`)
    Symbol(Arc<str>),
    /// An integer constant
    Integer(i64),
    /// A string constant, distinct from a symbol with the same spelling
    Text(Arc<str>),
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Nil => f.write_str("()"),
            Atom::Symbol(sym) => f.write_str(sym),
            Atom::Integer(n) => write!(f, "{n}"),
            Atom::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// Structural class of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// A logic variable
    Variable,
    /// A leaf value
    Atom,
    /// A pair node
    Compound,
}

/// A term: a variable, an atom, or a pair of terms.
///
/// N-ary terms are right-nested chains of pairs terminated by [`Atom::Nil`],
/// so `parent(alice, ?x)` is the list `(parent alice ?x)`. Terms are immutable;
/// cloning shares the pair nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Term {
    /// A logic variable
    Variable(Var),
    /// A leaf value
    Atom(Atom),
    /// A pair of head and tail
    Compound(Arc<Term>, Arc<Term>),
}

impl Term {
    /// Variable term referring to `var`
    #[must_use]
    pub fn var(var: &Var) -> Self {
        Term::Variable(var.clone())
    }

    /// Symbol atom
    pub fn symbol(sym: impl Into<Arc<str>>) -> Self {
        Term::Atom(Atom::Symbol(sym.into()))
    }

    /// Integer atom
    #[must_use]
    pub fn integer(n: i64) -> Self {
        Term::Atom(Atom::Integer(n))
    }

    /// String atom
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Term::Atom(Atom::Text(text.into()))
    }

    /// The empty marker
    #[must_use]
    pub fn nil() -> Self {
        Term::Atom(Atom::Nil)
    }

    /// A single pair node
    #[must_use]
    pub fn cons(head: Term, tail: Term) -> Self {
        Term::Compound(Arc::new(head), Arc::new(tail))
    }

    /// Right-nested chain of pairs ending in [`Atom::Nil`]
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Term>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(Term::nil(), |tail, head| Term::cons(head, tail))
    }

    /// `functor(args...)` encoded as the list `(functor args...)`
    pub fn compound<I>(functor: &str, args: I) -> Self
    where
        I: IntoIterator<Item = Term>,
    {
        let items: Vec<Term> = std::iter::once(Term::symbol(functor)).chain(args).collect();
        Term::list(items)
    }

    /// Build a leaf from text using the `?name` convention: a leading `?`
    /// yields a fresh variable, anything else a symbol.
    #[must_use]
    pub fn from_symbol(text: &str) -> Self {
        match text.strip_prefix('?') {
            Some(name) => Term::Variable(Var::new(name)),
            None => Term::symbol(text),
        }
    }

    /// Structural class of this term
    #[must_use]
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Variable(_) => TermKind::Variable,
            Term::Atom(_) => TermKind::Atom,
            Term::Compound(..) => TermKind::Compound,
        }
    }

    /// The variable, if this term is one
    #[must_use]
    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Term::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Whether this term is a variable
    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Same atom value, same variable identity, or the very same pair node.
    /// Pairs are not compared structurally here; the unifier descends into them.
    pub(crate) fn is_identical(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::Variable(a), Term::Variable(b)) => a == b,
            (Term::Atom(a), Term::Atom(b)) => a == b,
            (Term::Compound(h1, t1), Term::Compound(h2, t2)) => {
                Arc::ptr_eq(h1, h2) && Arc::ptr_eq(t1, t2)
            }
            _ => false,
        }
    }

    /// Add every variable of this term to `out`, in first-occurrence order
    pub(crate) fn collect_variables(&self, out: &mut IndexSet<Var>) {
        match self {
            Term::Variable(var) => {
                out.insert(var.clone());
            }
            Term::Atom(_) => {}
            Term::Compound(head, tail) => {
                head.collect_variables(out);
                tail.collect_variables(out);
            }
        }
    }
}

impl From<Var> for Term {
    fn from(var: Var) -> Self {
        Term::Variable(var)
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Term::Atom(atom)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(var) => write!(f, "{var}"),
            Term::Atom(atom) => write!(f, "{atom}"),
            Term::Compound(head, tail) => {
                write!(f, "({head}")?;
                let mut rest: &Term = &**tail;
                loop {
                    match rest {
                        Term::Compound(head, tail) => {
                            write!(f, " {head}")?;
                            rest = &**tail;
                        }
                        Term::Atom(Atom::Nil) => break,
                        other => {
                            write!(f, " . {other}")?;
                            break;
                        }
                    }
                }
                f.write_str(")")
            }
        }
    }
}
