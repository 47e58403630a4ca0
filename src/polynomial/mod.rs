//! Polynomials: finite weighted sums of labels.
//!
//! `<2>ab + <3>b` is the polynomial mapping the word `ab` to 2 and `b` to
//! 3. Polynomials are kept canonical: monomials are sorted by label and no
//! coefficient is zero.

use std::collections::BTreeMap;

use crate::context::{AstNode, Context, ParseError};
use crate::labelset::{LabelSet, WordSet};
use crate::valueset::ValueSet;
use crate::weightset::{StarError, WeightSet};

/// A map from labels to non-zero weights.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Polynomial<L: Ord, W>(BTreeMap<L, W>);

impl<L: Ord, W> Polynomial<L, W> {
    /// The zero polynomial.
    pub fn new() -> Self {
        Polynomial(BTreeMap::new())
    }

    /// The coefficient of `label`, if non-zero.
    pub fn get(&self, label: &L) -> Option<&W> {
        self.0.get(label)
    }

    /// The monomials, in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &W)> {
        self.0.iter()
    }

    /// Number of monomials.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the zero polynomial.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Ord, W> Default for Polynomial<L, W> {
    fn default() -> Self {
        Self::new()
    }
}

type Value<L, W> = Polynomial<<L as ValueSet>::Value, <W as ValueSet>::Value>;

/// The polynomials over a context.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialSet<L: LabelSet, W: WeightSet> {
    ctx: Context<L, W>,
}

impl<L: LabelSet, W: WeightSet> PolynomialSet<L, W> {
    /// The polynomials over `ctx`.
    pub fn new(ctx: Context<L, W>) -> Self {
        PolynomialSet { ctx }
    }

    /// The context.
    pub fn context(&self) -> &Context<L, W> {
        &self.ctx
    }

    /// `<w>l`.
    pub fn monomial(&self, l: L::Value, w: W::Value) -> Value<L, W> {
        let mut res = Polynomial::new();
        self.add_here(&mut res, l, w);
        res
    }

    /// Add `<w>l` to `p` in place.
    pub fn add_here(&self, p: &mut Value<L, W>, l: L::Value, w: W::Value) {
        let ws = self.ctx.weightset();
        let sum = match p.0.get(&l) {
            Some(old) => ws.add(old, &w),
            None => w,
        };
        if ws.is_zero(&sum) {
            p.0.remove(&l);
        } else {
            p.0.insert(l, sum);
        }
    }

    /// The coefficient of `l` in `p`, zero if absent.
    pub fn get(&self, p: &Value<L, W>, l: &L::Value) -> W::Value {
        p.get(l)
            .cloned()
            .unwrap_or_else(|| self.ctx.weightset().zero())
    }

    /// `p + q`.
    pub fn sum(&self, p: &Value<L, W>, q: &Value<L, W>) -> Value<L, W> {
        let mut res = p.clone();
        for (l, w) in q.iter() {
            self.add_here(&mut res, l.clone(), w.clone());
        }
        res
    }

    /// The product of `p` and `q`, concatenating labels; monomials whose
    /// labels do not concatenate are dropped.
    pub fn product(&self, p: &Value<L, W>, q: &Value<L, W>) -> Value<L, W> {
        let (ls, ws) = (self.ctx.labelset(), self.ctx.weightset());
        let mut res = Polynomial::new();
        for (l1, w1) in p.iter() {
            for (l2, w2) in q.iter() {
                if let Some(l) = ls.mul(l1, l2) {
                    self.add_here(&mut res, l, ws.mul(w1, w2));
                }
            }
        }
        res
    }

    /// `<w>p`.
    pub fn lweight(&self, w: &W::Value, p: &Value<L, W>) -> Value<L, W> {
        let ws = self.ctx.weightset();
        let mut res = Polynomial::new();
        for (l, v) in p.iter() {
            self.add_here(&mut res, l.clone(), ws.mul(w, v));
        }
        res
    }

    /// `p<w>`.
    pub fn rweight(&self, p: &Value<L, W>, w: &W::Value) -> Value<L, W> {
        let ws = self.ctx.weightset();
        let mut res = Polynomial::new();
        for (l, v) in p.iter() {
            self.add_here(&mut res, l.clone(), ws.mul(v, w));
        }
        res
    }

    fn invalid(&self, input: &str, reason: &str) -> ParseError {
        ParseError::InvalidValue {
            valueset: self.vname(),
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Split on `+` outside of `<...>`.
    fn terms(input: &str) -> Vec<&str> {
        let mut res = Vec::new();
        let (mut depth, mut start) = (0usize, 0);
        for (i, c) in input.char_indices() {
            match c {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                '+' if depth == 0 => {
                    res.push(&input[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        res.push(&input[start..]);
        res
    }

    fn monomial_of(&self, term: &str) -> Result<(L::Value, W::Value), ParseError> {
        let (ls, ws) = (self.ctx.labelset(), self.ctx.weightset());
        let term = term.trim();
        let (weight, label) = if let Some(rest) = term.strip_prefix('<') {
            let mut depth = 1;
            let close = rest
                .char_indices()
                .find(|(_, c)| {
                    match c {
                        '<' => depth += 1,
                        '>' => depth -= 1,
                        _ => {}
                    }
                    depth == 0
                })
                .map(|(i, _)| i)
                .ok_or_else(|| self.invalid(term, "unterminated weight"))?;
            (ws.conv(&rest[..close])?, rest[close + 1..].trim())
        } else {
            (ws.one(), term)
        };
        let label = if label.is_empty() {
            ls.one()
                .ok_or_else(|| self.invalid(term, "missing label"))?
        } else {
            ls.conv(label)?
        };
        Ok((label, weight))
    }
}

impl<L: LabelSet, W: WeightSet> ValueSet for PolynomialSet<L, W> {
    type Value = Value<L, W>;

    fn sname() -> String {
        format!("polynomialset<{}>", Context::<L, W>::sname())
    }

    fn vname(&self) -> String {
        format!("polynomialset<{}>", self.ctx.vname())
    }

    fn from_ast(node: &AstNode) -> Result<Self, ParseError> {
        match node {
            AstNode::PolynomialSet(ctx) => Ok(PolynomialSet::new(Context::from_ast(ctx)?)),
            other => Err(ParseError::Mismatch {
                expected: Self::sname(),
                found: other.vname(),
            }),
        }
    }

    /// Read `<w>l + <w>l + ...`; weights equal to one may be omitted.
    fn conv(&self, input: &str) -> Result<Self::Value, ParseError> {
        let mut res = Polynomial::new();
        if input.trim() == "\\z" {
            return Ok(res);
        }
        for term in Self::terms(input) {
            let (l, w) = self.monomial_of(term)?;
            self.add_here(&mut res, l, w);
        }
        Ok(res)
    }

    fn print(&self, v: &Self::Value) -> String {
        if v.is_empty() {
            return "\\z".to_string();
        }
        let (ls, ws) = (self.ctx.labelset(), self.ctx.weightset());
        v.iter()
            .map(|(l, w)| {
                if ws.show_one() || !ws.is_one(w) {
                    format!("<{}>{}", ws.print(w), ls.print(l))
                } else {
                    ls.print(l)
                }
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Polynomials of words form a semiring: the weights of the series with
/// finite support.
impl<W: WeightSet> WeightSet for PolynomialSet<WordSet, W> {
    fn zero(&self) -> Self::Value {
        Polynomial::new()
    }

    fn one(&self) -> Self::Value {
        self.monomial(String::new(), self.ctx.weightset().one())
    }

    fn add(&self, l: &Self::Value, r: &Self::Value) -> Self::Value {
        self.sum(l, r)
    }

    fn mul(&self, l: &Self::Value, r: &Self::Value) -> Self::Value {
        self.product(l, r)
    }

    /// Defined for polynomials `<w>\e` whose weight is starrable.
    fn star(&self, v: &Self::Value) -> Result<Self::Value, StarError> {
        let ws = self.ctx.weightset();
        match v.iter().next() {
            None => Ok(WeightSet::one(self)),
            Some((l, w)) if v.len() == 1 && l.is_empty() => {
                let star = ws.star(w).map_err(|_| StarError::new(self, v))?;
                Ok(self.monomial(String::new(), star))
            }
            Some(_) => Err(StarError::new(self, v)),
        }
    }

    fn is_zero(&self, v: &Self::Value) -> bool {
        v.is_empty()
    }

    fn is_commutative(&self) -> bool {
        false
    }

    fn transpose(&self, v: &Self::Value) -> Self::Value {
        let (ls, ws) = (self.ctx.labelset(), self.ctx.weightset());
        let mut res = Polynomial::new();
        for (l, w) in v.iter() {
            self.add_here(&mut res, ls.transpose(l), ws.transpose(w));
        }
        res
    }
}
