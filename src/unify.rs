use crate::subst::Substitution;
use crate::term::Term;

/// Unify `x` and `y` under `subst`.
///
/// Returns the extended substitution, or `None` on a shape mismatch, on two
/// distinct atoms, or when the occurs check rejects a binding. When both
/// sides walk to distinct unbound variables, `x` is bound to `y`.
///
/// Pairs unify head first, then tail under the bindings the heads produced.
/// Tails are followed iteratively so long lists do not deepen the stack.
#[must_use]
pub fn unify(x: &Term, y: &Term, subst: &Substitution) -> Option<Substitution> {
    let mut subst = subst.clone();
    let mut x = x.clone();
    let mut y = y.clone();

    loop {
        let walked_x = subst.walk(&x).clone();
        let walked_y = subst.walk(&y).clone();

        if walked_x.is_identical(&walked_y) {
            return Some(subst);
        }
        if let Term::Variable(var) = walked_x {
            return subst.extend(var, walked_y);
        }
        if let Term::Variable(var) = walked_y {
            return subst.extend(var, walked_x);
        }

        let (Term::Compound(x_head, x_tail), Term::Compound(y_head, y_tail)) = (walked_x, walked_y)
        else {
            return None;
        };
        subst = unify(&x_head, &y_head, &subst)?;
        x = Term::clone(&x_tail);
        y = Term::clone(&y_tail);
    }
}
