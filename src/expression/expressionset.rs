//! Sets of rational expressions over a context.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::context::{AstNode, Context, ParseError};
use crate::labelset::{LabelSet, ONE_TEXT};
use crate::valueset::{Convert, Join, ValueSet};
use crate::weightset::{StarError, WeightSet};

use super::{Expression, ExpressionRef, Identities};

type Value<L, W> = ExpressionRef<<L as ValueSet>::Value, <W as ValueSet>::Value>;

/// The rational expressions over a context, with their identities.
///
/// An expression set is also a weight set: its `star` is always defined,
/// so automata weighted by expressions never fail to be made proper.
///
/// # Example
///
/// ```rust,ignore
/// let ctx = Context::new(LetterSet::make("lal_char(ab)")?, Z);
/// let rs = ExpressionSet::new(ctx, Identities::Series);
/// let a = rs.atom(&'a');
/// let e = rs.add(&a, &a);
/// assert_eq!(rs.print(&e), "<2>a");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionSet<L: LabelSet, W: WeightSet> {
    ctx: Context<L, W>,
    identities: Identities,
}

impl<L: LabelSet, W: WeightSet> ExpressionSet<L, W> {
    /// The expressions over `ctx`.
    pub fn new(ctx: Context<L, W>, identities: Identities) -> Self {
        ExpressionSet { ctx, identities }
    }

    /// The context.
    pub fn context(&self) -> &Context<L, W> {
        &self.ctx
    }

    /// The identities applied while building.
    pub fn identities(&self) -> Identities {
        self.identities
    }

    /// The label set of the context.
    pub fn labelset(&self) -> &L {
        self.ctx.labelset()
    }

    /// The weight set of the context.
    pub fn weightset(&self) -> &W {
        self.ctx.weightset()
    }

    /// The expression of a single label; the identity label gives `\e`.
    pub fn atom(&self, l: &L::Value) -> Value<L, W> {
        if self.labelset().is_one(l) {
            WeightSet::one(self)
        } else {
            Arc::new(Expression::Atom(l.clone()))
        }
    }

    /// The Kleene star of `e`; always defined.
    pub fn closure(&self, e: &Value<L, W>) -> Value<L, W> {
        match **e {
            Expression::Zero => WeightSet::one(self),
            _ => Arc::new(Expression::Star(e.clone())),
        }
    }

    /// `<w>e`.
    pub fn lweight(&self, w: &W::Value, e: &Value<L, W>) -> Value<L, W> {
        let ws = self.weightset();
        if ws.is_zero(w) {
            return WeightSet::zero(self);
        }
        if ws.is_one(w) {
            return e.clone();
        }
        match &**e {
            Expression::Zero => e.clone(),
            Expression::LWeight(w2, f) => self.lweight(&ws.mul(w, w2), f),
            _ => Arc::new(Expression::LWeight(w.clone(), e.clone())),
        }
    }

    /// `e<w>`; the same as `<w>e` when weights commute.
    pub fn rweight(&self, e: &Value<L, W>, w: &W::Value) -> Value<L, W> {
        let ws = self.weightset();
        if ws.is_commutative() {
            return self.lweight(w, e);
        }
        if ws.is_zero(w) {
            return WeightSet::zero(self);
        }
        if ws.is_one(w) {
            return e.clone();
        }
        match &**e {
            Expression::Zero => e.clone(),
            Expression::RWeight(f, w2) => self.rweight(f, &ws.mul(w2, w)),
            _ => Arc::new(Expression::RWeight(e.clone(), w.clone())),
        }
    }

    /// The sum of several expressions.
    pub fn sum_of(&self, es: impl IntoIterator<Item = Value<L, W>>) -> Value<L, W> {
        es.into_iter()
            .fold(WeightSet::zero(self), |acc, e| WeightSet::add(self, &acc, &e))
    }

    /// The product of several expressions.
    pub fn prod_of(&self, es: impl IntoIterator<Item = Value<L, W>>) -> Value<L, W> {
        es.into_iter()
            .fold(WeightSet::one(self), |acc, e| WeightSet::mul(self, &acc, &e))
    }

    fn push_flat(terms: &mut Vec<Value<L, W>>, e: &Value<L, W>, sum: bool) {
        match (&**e, sum) {
            (Expression::Sum(es), true) | (Expression::Prod(es), false) => {
                terms.extend(es.iter().cloned())
            }
            _ => terms.push(e.clone()),
        }
    }

    fn add_series(&self, l: &Value<L, W>, r: &Value<L, W>) -> Value<L, W> {
        let ws = self.weightset();
        let mut terms = Vec::new();
        Self::push_flat(&mut terms, l, true);
        Self::push_flat(&mut terms, r, true);
        let mut coeffs: BTreeMap<Value<L, W>, W::Value> = BTreeMap::new();
        for t in terms {
            let (w, e) = match &*t {
                Expression::Zero => continue,
                Expression::LWeight(w, e) => (w.clone(), e.clone()),
                _ => (ws.one(), t.clone()),
            };
            let c = coeffs.entry(e).or_insert_with(|| ws.zero());
            *c = ws.add(c, &w);
        }
        let mut res: Vec<Value<L, W>> = coeffs
            .into_iter()
            .filter(|(_, w)| !ws.is_zero(w))
            .map(|(e, w)| self.lweight(&w, &e))
            .collect();
        match res.len() {
            0 => WeightSet::zero(self),
            1 => res.remove(0),
            _ => Arc::new(Expression::Sum(res)),
        }
    }

    fn print_child(&self, e: &Value<L, W>, min: u8, out: &mut String) {
        let atom_needs_parens = match &**e {
            Expression::Atom(l) => min > 1 && self.labelset().print(l).chars().count() > 1,
            _ => false,
        };
        if e.precedence() < min || atom_needs_parens {
            out.push('(');
            self.print_into(e, out);
            out.push(')');
        } else {
            self.print_into(e, out);
        }
    }

    fn print_into(&self, e: &Value<L, W>, out: &mut String) {
        match &**e {
            Expression::Zero => out.push_str("\\z"),
            Expression::One => out.push_str(ONE_TEXT),
            Expression::Atom(l) => out.push_str(&self.labelset().print(l)),
            Expression::Sum(es) => {
                for (i, f) in es.iter().enumerate() {
                    if i > 0 {
                        out.push('+');
                    }
                    self.print_child(f, 1, out);
                }
            }
            Expression::Prod(es) => {
                for f in es {
                    self.print_child(f, 2, out);
                }
            }
            Expression::Star(f) => {
                self.print_child(f, 4, out);
                out.push('*');
            }
            Expression::LWeight(w, f) => {
                out.push('<');
                out.push_str(&self.weightset().print(w));
                out.push('>');
                self.print_child(f, 3, out);
            }
            Expression::RWeight(f, w) => {
                self.print_child(f, 3, out);
                out.push('<');
                out.push_str(&self.weightset().print(w));
                out.push('>');
            }
        }
    }
}

impl<L: LabelSet, W: WeightSet> ValueSet for ExpressionSet<L, W> {
    type Value = Value<L, W>;

    fn sname() -> String {
        format!("ratexpset<{}>", Context::<L, W>::sname())
    }

    fn vname(&self) -> String {
        match self.identities {
            Identities::Trivial => format!("ratexpset<{}>", self.ctx.vname()),
            ids => format!("ratexpset<{}>({})", self.ctx.vname(), ids),
        }
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        match node {
            AstNode::ExpressionSet {
                context,
                identities,
            } => Ok(ExpressionSet::new(Context::from_ast(context)?, *identities)),
            other => Err(ParseError::Mismatch {
                expected: Self::sname(),
                found: other.vname(),
            }),
        }
    }

    /// Read `\z`, `\e` or a single label.
    fn conv(&self, input: &str) -> Result<Self::Value, ParseError> {
        match input.trim() {
            "\\z" => Ok(WeightSet::zero(self)),
            ONE_TEXT => Ok(WeightSet::one(self)),
            text => Ok(self.atom(&self.labelset().conv(text)?)),
        }
    }

    fn print(&self, v: &Self::Value) -> String {
        let mut out = String::new();
        self.print_into(v, &mut out);
        out
    }
}

impl<L: LabelSet, W: WeightSet> WeightSet for ExpressionSet<L, W> {
    fn zero(&self) -> Self::Value {
        Arc::new(Expression::Zero)
    }

    fn one(&self) -> Self::Value {
        Arc::new(Expression::One)
    }

    fn add(&self, l: &Self::Value, r: &Self::Value) -> Self::Value {
        if let Identities::Series = self.identities {
            return self.add_series(l, r);
        }
        match (&**l, &**r) {
            (Expression::Zero, _) => r.clone(),
            (_, Expression::Zero) => l.clone(),
            _ => {
                let mut terms = Vec::new();
                Self::push_flat(&mut terms, l, true);
                Self::push_flat(&mut terms, r, true);
                Arc::new(Expression::Sum(terms))
            }
        }
    }

    fn mul(&self, l: &Self::Value, r: &Self::Value) -> Self::Value {
        match (&**l, &**r) {
            (Expression::Zero, _) | (_, Expression::Zero) => WeightSet::zero(self),
            (Expression::One, _) => r.clone(),
            (_, Expression::One) => l.clone(),
            (Expression::LWeight(w, e), _) if self.identities == Identities::Series => {
                self.lweight(w, &self.mul(e, r))
            }
            (_, Expression::LWeight(w, f))
                if self.identities == Identities::Series && self.weightset().is_commutative() =>
            {
                self.lweight(w, &self.mul(l, f))
            }
            _ => {
                let mut factors = Vec::new();
                Self::push_flat(&mut factors, l, false);
                Self::push_flat(&mut factors, r, false);
                Arc::new(Expression::Prod(factors))
            }
        }
    }

    fn star(&self, v: &Self::Value) -> Result<Self::Value, StarError> {
        Ok(self.closure(v))
    }

    fn is_zero(&self, v: &Self::Value) -> bool {
        matches!(**v, Expression::Zero)
    }

    fn is_one(&self, v: &Self::Value) -> bool {
        matches!(**v, Expression::One)
    }

    fn is_commutative(&self) -> bool {
        false
    }

    fn transpose(&self, v: &Self::Value) -> Self::Value {
        let ws = self.weightset();
        match &**v {
            Expression::Zero | Expression::One => v.clone(),
            Expression::Atom(l) => self.atom(&self.labelset().transpose(l)),
            Expression::Sum(es) => self.sum_of(es.iter().map(|e| self.transpose(e))),
            Expression::Prod(es) => self.prod_of(es.iter().rev().map(|e| self.transpose(e))),
            Expression::Star(e) => self.closure(&self.transpose(e)),
            Expression::LWeight(w, e) => self.rweight(&self.transpose(e), &ws.transpose(w)),
            Expression::RWeight(e, w) => self.lweight(&ws.transpose(w), &self.transpose(e)),
        }
    }
}

impl<L1, W1, L2, W2> Join<ExpressionSet<L2, W2>> for ExpressionSet<L1, W1>
where
    L1: LabelSet + Join<L2>,
    W1: WeightSet + Join<W2>,
    L2: LabelSet,
    W2: WeightSet,
    <L1 as Join<L2>>::Output: LabelSet,
    <W1 as Join<W2>>::Output: WeightSet,
{
    type Output = ExpressionSet<<L1 as Join<L2>>::Output, <W1 as Join<W2>>::Output>;

    fn join(&self, rhs: &ExpressionSet<L2, W2>) -> Self::Output {
        ExpressionSet::new(
            self.ctx.join(&rhs.ctx),
            self.identities.max(rhs.identities),
        )
    }
}

impl<L, W, L1, W1> Convert<ExpressionSet<L1, W1>> for ExpressionSet<L, W>
where
    L: LabelSet + Convert<L1>,
    W: WeightSet + Convert<W1>,
    L1: LabelSet,
    W1: WeightSet,
{
    fn conv_from(&self, from: &ExpressionSet<L1, W1>, v: &Value<L1, W1>) -> Self::Value {
        let ls = self.labelset();
        let ws = self.weightset();
        match &**v {
            Expression::Zero => WeightSet::zero(self),
            Expression::One => WeightSet::one(self),
            Expression::Atom(l) => self.atom(&ls.conv_from(from.labelset(), l)),
            Expression::Sum(es) => self.sum_of(es.iter().map(|e| self.conv_from(from, e))),
            Expression::Prod(es) => self.prod_of(es.iter().map(|e| self.conv_from(from, e))),
            Expression::Star(e) => self.closure(&self.conv_from(from, e)),
            Expression::LWeight(w, e) => {
                self.lweight(&ws.conv_from(from.weightset(), w), &self.conv_from(from, e))
            }
            Expression::RWeight(e, w) => {
                self.rweight(&self.conv_from(from, e), &ws.conv_from(from.weightset(), w))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelset::{LetterSet, WordSet};
    use crate::weightset::{Rational, B, Q, Z};

    fn rs_z(ids: Identities) -> ExpressionSet<LetterSet, Z> {
        ExpressionSet::new(Context::make("lal_char(abc)_z").unwrap(), ids)
    }

    #[test]
    fn test_names() {
        let rs = rs_z(Identities::Series);
        assert_eq!(rs.vname(), "ratexpset<lal_char(abc)_z>(series)");
        assert_eq!(ExpressionSet::<LetterSet, Z>::sname(), "ratexpset<lal_char_z>");
        let again = ExpressionSet::<LetterSet, Z>::make(&rs.vname()).unwrap();
        assert_eq!(again, rs);
    }

    #[test]
    fn test_trivial_identities() {
        let rs = rs_z(Identities::Trivial);
        let a = rs.atom(&'a');
        let b = rs.atom(&'b');
        let zero = WeightSet::zero(&rs);
        let one = WeightSet::one(&rs);
        assert_eq!(WeightSet::add(&rs, &zero, &a), a);
        assert_eq!(WeightSet::mul(&rs, &one, &a), a);
        assert!(rs.is_zero(&WeightSet::mul(&rs, &a, &zero)));
        assert_eq!(rs.lweight(&1, &a), a);
        assert!(rs.is_zero(&rs.lweight(&0, &a)));
        let e = WeightSet::add(&rs, &a, &a);
        assert_eq!(rs.print(&e), "a+a");
        let e = WeightSet::mul(&rs, &WeightSet::mul(&rs, &a, &b), &a);
        assert_eq!(rs.print(&e), "aba");
    }

    #[test]
    fn test_series_identities_merge_terms() {
        let rs = rs_z(Identities::Series);
        let a = rs.atom(&'a');
        let b = rs.atom(&'b');
        let e = rs.sum_of([b.clone(), a.clone(), rs.lweight(&2, &a)]);
        assert_eq!(rs.print(&e), "<3>a+b");
        let e = WeightSet::add(&rs, &rs.lweight(&-1, &b), &b);
        assert!(rs.is_zero(&e));
        let e = WeightSet::mul(&rs, &rs.lweight(&2, &a), &rs.lweight(&3, &b));
        assert_eq!(rs.print(&e), "<6>(ab)");
    }

    #[test]
    fn test_printing_precedence() {
        let rs = rs_z(Identities::Trivial);
        let a = rs.atom(&'a');
        let b = rs.atom(&'b');
        let ab = WeightSet::add(&rs, &a, &b);
        let e = WeightSet::mul(&rs, &ab, &rs.closure(&ab));
        assert_eq!(rs.print(&e), "(a+b)(a+b)*");
        let e = rs.lweight(&2, &rs.closure(&a));
        assert_eq!(rs.print(&e), "<2>a*");
        let e = rs.closure(&rs.lweight(&2, &a));
        assert_eq!(rs.print(&e), "(<2>a)*");
        assert_eq!(rs.print(&rs.closure(&WeightSet::zero(&rs))), "\\e");
    }

    #[test]
    fn test_word_atoms_are_bracketed() {
        let rs: ExpressionSet<WordSet, B> =
            ExpressionSet::new(Context::make("law_char(ab)_b").unwrap(), Identities::Trivial);
        let ab = rs.atom(&"ab".to_string());
        let e = WeightSet::mul(&rs, &ab, &rs.closure(&ab));
        assert_eq!(rs.print(&e), "(ab)(ab)*");
        assert_eq!(rs.print(&rs.atom(&String::new())), "\\e");
    }

    #[test]
    fn test_star_is_total() {
        let rs = rs_z(Identities::Trivial);
        let a = rs.atom(&'a');
        assert!(rs.star(&a).is_ok());
    }

    #[test]
    fn test_transpose() {
        let rs: ExpressionSet<WordSet, Z> =
            ExpressionSet::new(Context::make("law_char(ab)_z").unwrap(), Identities::Trivial);
        let e = WeightSet::mul(&rs, &rs.atom(&"ab".to_string()), &rs.atom(&"b".to_string()));
        assert_eq!(rs.print(&rs.transpose(&e)), "b(ba)");
    }

    #[test]
    fn test_conv() {
        let rs = rs_z(Identities::Trivial);
        assert_eq!(rs.conv("a"), Ok(rs.atom(&'a')));
        assert!(rs.is_one(&rs.conv("\\e").unwrap()));
        assert!(rs.is_zero(&rs.conv("\\z").unwrap()));
        assert!(rs.conv("ab").is_err());
    }

    #[test]
    fn test_join_and_convert() {
        let l = rs_z(Identities::Trivial);
        let r: ExpressionSet<LetterSet, Q> =
            ExpressionSet::new(Context::make("lal_char(x)_q").unwrap(), Identities::Series);
        let j = l.join(&r);
        assert_eq!(j.vname(), "ratexpset<lal_char(abcx)_q>(series)");
        let e = l.lweight(&3, &l.atom(&'a'));
        let c = j.conv_from(&l, &e);
        assert_eq!(j.print(&c), "<3>a");
        let half = j.lweight(&Rational::new(1, 2), &j.atom(&'x'));
        assert_eq!(j.print(&half), "<1/2>x");
    }
}
