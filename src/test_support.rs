//! Proptest strategies shared by the unit tests.

use crate::subst::Substitution;
use crate::term::{Term, Var};
use proptest::prelude::*;

/// A small pool of distinct variables so generated terms share them often
pub(crate) fn var_pool(size: usize) -> Vec<Var> {
    (0..size).map(|i| Var::new(format!("v{i}"))).collect()
}

/// Terms over `vars`, a few symbols and integers, nested up to depth 4
pub(crate) fn term_strategy(vars: Vec<Var>) -> impl Strategy<Value = Term> {
    let leaf = prop_oneof![
        prop::sample::select(vars).prop_map(Term::Variable),
        prop::sample::select(vec!["a", "b", "c"]).prop_map(|sym| Term::symbol(sym)),
        (0i64..3).prop_map(Term::integer),
        Just(Term::nil()),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        (inner.clone(), inner).prop_map(|(head, tail)| Term::cons(head, tail))
    })
}

/// Cycle-free substitutions over `vars`
pub(crate) fn substitution_strategy(vars: Vec<Var>) -> impl Strategy<Value = Substitution> {
    prop::collection::vec(
        (prop::sample::select(vars.clone()), term_strategy(vars)),
        0..6,
    )
    .prop_map(|bindings| {
        bindings
            .into_iter()
            .fold(Substitution::new(), |subst, (var, value)| {
                if subst.lookup(&var).is_some() {
                    return subst;
                }
                subst.extend(var, value).unwrap_or(subst)
            })
    })
}

/// A substitution and a term drawn from the same variable pool
pub(crate) fn subst_and_term() -> impl Strategy<Value = (Substitution, Term)> {
    let vars = var_pool(4);
    (substitution_strategy(vars.clone()), term_strategy(vars))
}

/// A substitution and two terms drawn from the same variable pool
pub(crate) fn subst_and_pair() -> impl Strategy<Value = (Substitution, Term, Term)> {
    let vars = var_pool(4);
    (
        substitution_strategy(vars.clone()),
        term_strategy(vars.clone()),
        term_strategy(vars),
    )
}

/// A substitution, one variable of its pool and a term over the same pool
pub(crate) fn subst_var_and_term() -> impl Strategy<Value = (Substitution, Var, Term)> {
    let vars = var_pool(4);
    (
        substitution_strategy(vars.clone()),
        prop::sample::select(vars.clone()),
        term_strategy(vars),
    )
}
