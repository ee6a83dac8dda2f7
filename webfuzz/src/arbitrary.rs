//! Composable randomized-value generators with shrinking.
//!
//! An [`Arbitrary`] pairs generation with a shrink relation: `generate` draws
//! a value from a seeded RNG, `shrink` proposes strictly-smaller candidates
//! from a failing one. Generation is a pure function of the RNG state, so a
//! fixed seed replays the exact same sequence of samples.
//!
//! The algebra here is deliberately small: `constant`, weighted `one_of`,
//! bounded `vec_of` / `string_of` / `dict_of`, fixed-key `record`, bounded
//! `int_range`, and `filter` with an explicit retry budget. Domain generators
//! (paths, adversarial strings, query parameters) are built from these in
//! their own modules.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::Rng;
use rand::RngCore;

use crate::error::ArbitraryError;

/// Retry budget for `filter` before it reports the generator as
/// over-constrained.
pub const FILTER_RETRY_BUDGET: usize = 100;

/// A generator of values plus a shrink relation.
pub trait Arbitrary {
    /// The type of values this arbitrary generates.
    type Value: Clone + fmt::Debug + 'static;

    /// Draw one value from the given RNG.
    fn generate(&self, rng: &mut dyn RngCore) -> Result<Self::Value, ArbitraryError>;

    /// Propose smaller candidate values from a failing one. Candidates are
    /// ordered cheapest-first; an empty iterator ends the shrink search.
    fn shrink(&self, value: &Self::Value) -> Box<dyn Iterator<Item = Self::Value>>;

    /// The single value this arbitrary always produces, if it is
    /// constant-like. Used by `one_of` for branch-swap shrinking.
    fn constant_value(&self) -> Option<Self::Value> {
        None
    }
}

/// Internal trait for type-erased arbitraries.
trait DynArbitrary<T>: Send + Sync {
    fn generate_dyn(&self, rng: &mut dyn RngCore) -> Result<T, ArbitraryError>;
    fn shrink_dyn(&self, value: &T) -> Box<dyn Iterator<Item = T>>;
    fn constant_dyn(&self) -> Option<T>;
}

impl<A> DynArbitrary<A::Value> for A
where
    A: Arbitrary + Send + Sync,
{
    fn generate_dyn(&self, rng: &mut dyn RngCore) -> Result<A::Value, ArbitraryError> {
        self.generate(rng)
    }

    fn shrink_dyn(&self, value: &A::Value) -> Box<dyn Iterator<Item = A::Value>> {
        self.shrink(value)
    }

    fn constant_dyn(&self) -> Option<A::Value> {
        self.constant_value()
    }
}

/// A type-erased arbitrary, for heterogeneous composition (`one_of` branches,
/// `record` fields).
pub struct BoxedArb<T> {
    inner: Arc<dyn DynArbitrary<T>>,
}

impl<T> Clone for BoxedArb<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + fmt::Debug + 'static> Arbitrary for BoxedArb<T> {
    type Value = T;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<T, ArbitraryError> {
        self.inner.generate_dyn(rng)
    }

    fn shrink(&self, value: &T) -> Box<dyn Iterator<Item = T>> {
        self.inner.shrink_dyn(value)
    }

    fn constant_value(&self) -> Option<T> {
        self.inner.constant_dyn()
    }
}

/// Erase an arbitrary's concrete type.
pub fn boxed<A>(arb: A) -> BoxedArb<A::Value>
where
    A: Arbitrary + Send + Sync + 'static,
{
    BoxedArb {
        inner: Arc::new(arb),
    }
}

/// An arbitrary that always yields the same value; no shrink candidates.
#[derive(Debug, Clone)]
pub struct ConstantArb<T> {
    value: T,
}

impl<T: Clone + fmt::Debug + 'static> Arbitrary for ConstantArb<T> {
    type Value = T;

    fn generate(&self, _rng: &mut dyn RngCore) -> Result<T, ArbitraryError> {
        Ok(self.value.clone())
    }

    fn shrink(&self, _value: &T) -> Box<dyn Iterator<Item = T>> {
        Box::new(std::iter::empty())
    }

    fn constant_value(&self) -> Option<T> {
        Some(self.value.clone())
    }
}

/// Always yield `value`.
pub fn constant<T: Clone + fmt::Debug + 'static>(value: T) -> ConstantArb<T> {
    ConstantArb { value }
}

/// Weighted choice among sub-arbitraries.
pub struct OneOfArb<T> {
    branches: Vec<(u32, BoxedArb<T>)>,
    total_weight: u32,
}

impl<T: Clone + fmt::Debug + Send + Sync + 'static> OneOfArb<T> {
    /// Uniform choice among branches. Panics on an empty branch list; an
    /// empty union is a construction bug, not a runtime condition.
    pub fn new(branches: Vec<BoxedArb<T>>) -> Self {
        Self::weighted(branches.into_iter().map(|b| (1, b)).collect())
    }

    /// Weighted choice among branches.
    pub fn weighted(branches: Vec<(u32, BoxedArb<T>)>) -> Self {
        if branches.is_empty() {
            panic!("OneOfArb cannot be created with no branches");
        }
        let total_weight = branches.iter().map(|(w, _)| *w).sum();
        assert!(total_weight > 0, "OneOfArb requires a positive total weight");
        Self {
            branches,
            total_weight,
        }
    }

    /// Uniform choice among fixed values.
    pub fn constants(values: Vec<T>) -> Self {
        Self::new(values.into_iter().map(|v| boxed(constant(v))).collect())
    }
}

impl<T: Clone + fmt::Debug + PartialEq + 'static> Arbitrary for OneOfArb<T> {
    type Value = T;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<T, ArbitraryError> {
        let mut pick = rng.gen_range(0..self.total_weight);
        for (weight, branch) in &self.branches {
            if pick < *weight {
                return branch.generate(rng);
            }
            pick -= weight;
        }
        // Unreachable: the weights sum to total_weight.
        self.branches[0].1.generate(rng)
    }

    fn shrink(&self, value: &T) -> Box<dyn Iterator<Item = T>> {
        // Every candidate must stay within the current value's printed
        // size; a swap must strictly shrink it, so two constant branches
        // can never trade places and grow the counterexample.
        let size = |v: &T| format!("{:?}", v).len();
        let limit = size(value);
        let mut candidates = Vec::new();

        if let Some(swap) = self
            .branches
            .iter()
            .filter_map(|(_, b)| b.constant_value())
            .filter(|c| c != value && size(c) < limit)
            .min_by_key(|c| size(c))
        {
            candidates.push(swap);
        }

        for (_, branch) in &self.branches {
            candidates.extend(branch.shrink(value).filter(|c| size(c) <= limit));
        }

        Box::new(candidates.into_iter())
    }
}

/// Uniform choice among sub-arbitraries.
pub fn one_of<T: Clone + fmt::Debug + Send + Sync + 'static>(
    branches: Vec<BoxedArb<T>>,
) -> OneOfArb<T> {
    OneOfArb::new(branches)
}

/// Bounded-length vector of elements drawn from `elem`.
pub struct VecArb<A> {
    elem: A,
    min_len: usize,
    max_len: usize,
}

impl<A: Arbitrary> VecArb<A> {
    pub fn new(elem: A, min_len: usize, max_len: usize) -> Self {
        assert!(min_len <= max_len, "VecArb requires min_len <= max_len");
        Self {
            elem,
            min_len,
            max_len,
        }
    }
}

impl<A: Arbitrary> Arbitrary for VecArb<A> {
    type Value = Vec<A::Value>;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<Vec<A::Value>, ArbitraryError> {
        let len = rng.gen_range(self.min_len..=self.max_len);
        (0..len).map(|_| self.elem.generate(rng)).collect()
    }

    fn shrink(&self, value: &Vec<A::Value>) -> Box<dyn Iterator<Item = Vec<A::Value>>> {
        let mut candidates = Vec::new();

        if value.len() > self.min_len {
            // Big step: chop straight down to the minimum length.
            candidates.push(value[..self.min_len].to_vec());

            // Remove one element at a time.
            for i in 0..value.len() {
                let mut shorter = value.clone();
                shorter.remove(i);
                candidates.push(shorter);
            }
        }

        // Shrink elements in place, a few candidates per slot.
        for (i, elem) in value.iter().enumerate() {
            for cand in self.elem.shrink(elem).take(3) {
                let mut replaced = value.clone();
                replaced[i] = cand;
                candidates.push(replaced);
            }
        }

        Box::new(candidates.into_iter())
    }
}

/// Bounded vector of elements.
pub fn vec_of<A: Arbitrary>(elem: A, min_len: usize, max_len: usize) -> VecArb<A> {
    VecArb::new(elem, min_len, max_len)
}

/// Bounded-length string over a fixed character set.
#[derive(Debug, Clone)]
pub struct StringArb {
    charset: Vec<char>,
    min_len: usize,
    max_len: usize,
}

impl StringArb {
    pub fn new(charset: &str, min_len: usize, max_len: usize) -> Self {
        assert!(min_len <= max_len, "StringArb requires min_len <= max_len");
        let charset: Vec<char> = charset.chars().collect();
        assert!(!charset.is_empty(), "StringArb requires a non-empty charset");
        Self {
            charset,
            min_len,
            max_len,
        }
    }

    /// Printable ASCII strings.
    pub fn ascii(min_len: usize, max_len: usize) -> Self {
        let printable: String = (b' '..=b'~').map(char::from).collect();
        Self::new(&printable, min_len, max_len)
    }
}

impl Arbitrary for StringArb {
    type Value = String;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<String, ArbitraryError> {
        let len = rng.gen_range(self.min_len..=self.max_len);
        Ok((0..len)
            .map(|_| self.charset[rng.gen_range(0..self.charset.len())])
            .collect())
    }

    fn shrink(&self, value: &String) -> Box<dyn Iterator<Item = String>> {
        let mut candidates = Vec::new();
        let len = value.chars().count();

        if len > self.min_len {
            // Truncate to the minimum, then halfway, then drop single chars.
            candidates.push(value.chars().take(self.min_len).collect());

            let half = self.min_len + (len - self.min_len) / 2;
            if half > self.min_len && half < len {
                candidates.push(value.chars().take(half).collect());
            }

            for i in 0..len.min(3) {
                let mut chars: Vec<char> = value.chars().collect();
                chars.remove(i);
                candidates.push(chars.into_iter().collect());
            }
        }

        Box::new(candidates.into_iter())
    }
}

/// Bounded string over a charset.
pub fn string_of(charset: &str, min_len: usize, max_len: usize) -> StringArb {
    StringArb::new(charset, min_len, max_len)
}

/// Bounded mapping of generated keys to generated values.
///
/// Keys are drawn from a string arbitrary; collisions simply produce a
/// smaller map. `BTreeMap` keeps iteration (and therefore shrinking and
/// serialization) order deterministic.
pub struct DictArb {
    key: BoxedArb<String>,
    value: BoxedArb<String>,
    min_entries: usize,
    max_entries: usize,
}

impl DictArb {
    pub fn new(
        key: BoxedArb<String>,
        value: BoxedArb<String>,
        min_entries: usize,
        max_entries: usize,
    ) -> Self {
        assert!(
            min_entries <= max_entries,
            "DictArb requires min_entries <= max_entries"
        );
        Self {
            key,
            value,
            min_entries,
            max_entries,
        }
    }
}

impl Arbitrary for DictArb {
    type Value = BTreeMap<String, String>;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<BTreeMap<String, String>, ArbitraryError> {
        let entries = rng.gen_range(self.min_entries..=self.max_entries);
        let mut map = BTreeMap::new();
        for _ in 0..entries {
            let key = self.key.generate(rng)?;
            let value = self.value.generate(rng)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    fn shrink(
        &self,
        value: &BTreeMap<String, String>,
    ) -> Box<dyn Iterator<Item = BTreeMap<String, String>>> {
        let mut candidates = Vec::new();

        if value.len() > self.min_entries {
            if self.min_entries == 0 {
                candidates.push(BTreeMap::new());
            }
            for key in value.keys() {
                let mut smaller = value.clone();
                smaller.remove(key);
                candidates.push(smaller);
            }
        }

        for (key, entry) in value {
            for cand in self.value.shrink(entry).take(3) {
                let mut replaced = value.clone();
                replaced.insert(key.clone(), cand);
                candidates.push(replaced);
            }
        }

        Box::new(candidates.into_iter())
    }
}

/// Bounded dictionary of string keys to string values.
pub fn dict_of(
    key: BoxedArb<String>,
    value: BoxedArb<String>,
    min_entries: usize,
    max_entries: usize,
) -> DictArb {
    DictArb::new(key, value, min_entries, max_entries)
}

/// Fixed-key record of named sub-arbitraries.
///
/// The key set is fixed at construction; values are regenerated per trial and
/// shrunk component-wise.
pub struct RecordArb {
    fields: Vec<(String, BoxedArb<serde_json::Value>)>,
}

impl RecordArb {
    pub fn new(fields: Vec<(&str, BoxedArb<serde_json::Value>)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, arb)| (name.to_string(), arb))
                .collect(),
        }
    }
}

impl Arbitrary for RecordArb {
    type Value = serde_json::Map<String, serde_json::Value>;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<Self::Value, ArbitraryError> {
        let mut map = serde_json::Map::new();
        for (name, arb) in &self.fields {
            map.insert(name.clone(), arb.generate(rng)?);
        }
        Ok(map)
    }

    fn shrink(&self, value: &Self::Value) -> Box<dyn Iterator<Item = Self::Value>> {
        let mut candidates = Vec::new();
        for (name, arb) in &self.fields {
            let Some(field_value) = value.get(name) else {
                continue;
            };
            for cand in arb.shrink(field_value) {
                let mut replaced = value.clone();
                replaced.insert(name.clone(), cand);
                candidates.push(replaced);
            }
        }
        Box::new(candidates.into_iter())
    }
}

/// Fixed-key record.
pub fn record(fields: Vec<(&str, BoxedArb<serde_json::Value>)>) -> RecordArb {
    RecordArb::new(fields)
}

/// Adapter lifting a string arbitrary into JSON values, preserving its
/// shrink relation (unlike a general `map`, the inverse is known here).
pub struct JsonStringArb<A> {
    inner: A,
}

impl<A: Arbitrary<Value = String>> Arbitrary for JsonStringArb<A> {
    type Value = serde_json::Value;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<serde_json::Value, ArbitraryError> {
        Ok(serde_json::Value::String(self.inner.generate(rng)?))
    }

    fn shrink(&self, value: &serde_json::Value) -> Box<dyn Iterator<Item = serde_json::Value>> {
        match value {
            serde_json::Value::String(s) => {
                Box::new(self.inner.shrink(s).map(serde_json::Value::String))
            }
            _ => Box::new(std::iter::empty()),
        }
    }

    fn constant_value(&self) -> Option<serde_json::Value> {
        self.inner.constant_value().map(serde_json::Value::String)
    }
}

/// Lift a string arbitrary into JSON values for use in `record`.
pub fn json_string<A: Arbitrary<Value = String>>(inner: A) -> JsonStringArb<A> {
    JsonStringArb { inner }
}

/// Rejection sampling over an inner arbitrary, with a bounded retry budget.
pub struct FilterArb<A: Arbitrary> {
    inner: A,
    predicate: Arc<dyn Fn(&A::Value) -> bool + Send + Sync>,
    budget: usize,
}

impl<A: Arbitrary> FilterArb<A> {
    pub fn new(inner: A, predicate: impl Fn(&A::Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            inner,
            predicate: Arc::new(predicate),
            budget: FILTER_RETRY_BUDGET,
        }
    }
}

impl<A: Arbitrary> Arbitrary for FilterArb<A> {
    type Value = A::Value;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<A::Value, ArbitraryError> {
        for _ in 0..self.budget {
            let candidate = self.inner.generate(rng)?;
            if (self.predicate)(&candidate) {
                return Ok(candidate);
            }
        }
        Err(ArbitraryError::FilterExhausted {
            attempts: self.budget,
        })
    }

    fn shrink(&self, value: &A::Value) -> Box<dyn Iterator<Item = A::Value>> {
        // Shrink candidates must satisfy the filter too, or shrinking could
        // walk into the excluded space.
        let predicate = Arc::clone(&self.predicate);
        Box::new(
            self.inner
                .shrink(value)
                .filter(move |candidate| predicate(candidate)),
        )
    }
}

/// Keep only values matching `predicate`, giving up with a configuration
/// error after [`FILTER_RETRY_BUDGET`] rejections.
pub fn filter<A: Arbitrary>(
    inner: A,
    predicate: impl Fn(&A::Value) -> bool + Send + Sync + 'static,
) -> FilterArb<A> {
    FilterArb::new(inner, predicate)
}

/// Bounded integer, shrinking toward the lower bound.
#[derive(Debug, Clone)]
pub struct IntRangeArb {
    min: usize,
    max: usize,
}

impl IntRangeArb {
    pub fn new(min: usize, max: usize) -> Self {
        assert!(min <= max, "IntRangeArb requires min <= max");
        Self { min, max }
    }
}

impl Arbitrary for IntRangeArb {
    type Value = usize;

    fn generate(&self, rng: &mut dyn RngCore) -> Result<usize, ArbitraryError> {
        Ok(rng.gen_range(self.min..=self.max))
    }

    fn shrink(&self, value: &usize) -> Box<dyn Iterator<Item = usize>> {
        // Bisect from the lower bound upward: min first, then ever-closer
        // values, ending at value - 1. Restarting from each accepted
        // candidate converges on the smallest failing value.
        let mut candidates = Vec::new();
        let mut step = value - self.min;
        while step > 0 {
            let candidate = value - step;
            if candidates.last() != Some(&candidate) {
                candidates.push(candidate);
            }
            step /= 2;
        }
        Box::new(candidates.into_iter())
    }
}

/// Bounded integer in `min..=max`.
pub fn int_range(min: usize, max: usize) -> IntRangeArb {
    IntRangeArb::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_seeded_rng;

    #[test]
    fn test_constant_has_no_shrinks() {
        let arb = constant("/".to_string());
        let mut rng = create_seeded_rng(1);
        let value = arb.generate(&mut rng).unwrap();
        assert_eq!(value, "/");
        assert_eq!(arb.shrink(&value).count(), 0);
        assert_eq!(arb.constant_value(), Some("/".to_string()));
    }

    #[test]
    fn test_one_of_constants_membership() {
        let arb = OneOfArb::constants(vec![1usize, 2, 3]);
        let mut rng = create_seeded_rng(7);
        for _ in 0..50 {
            let value = arb.generate(&mut rng).unwrap();
            assert!((1..=3).contains(&value));
        }
    }

    #[test]
    fn test_one_of_branch_swap_shrink() {
        let arb: OneOfArb<String> = OneOfArb::new(vec![
            boxed(constant("/".to_string())),
            boxed(StringArb::ascii(1, 10)),
        ]);
        let shrinks: Vec<String> = arb.shrink(&"abcdef".to_string()).collect();
        // Cheapest candidate first: the constant branch.
        assert_eq!(shrinks[0], "/");
        // Followed by in-value shrinks from the string branch.
        assert!(shrinks.len() > 1);
    }

    #[test]
    fn test_branch_swap_never_grows_the_value() {
        let arb = OneOfArb::constants(vec![
            "/a-very-long-constant-path".to_string(),
            "/x".to_string(),
        ]);
        // The shortest constant has nowhere smaller to go.
        assert_eq!(arb.shrink(&"/x".to_string()).count(), 0);
        // The longer one swaps down to it, and only down.
        let shrinks: Vec<String> = arb
            .shrink(&"/a-very-long-constant-path".to_string())
            .collect();
        assert_eq!(shrinks, vec!["/x".to_string()]);
    }

    #[test]
    fn test_branch_swap_picks_the_smallest_constant() {
        let arb = OneOfArb::constants(vec![
            "/medium-path".to_string(),
            "/".to_string(),
            "/longer-still-path".to_string(),
        ]);
        let shrinks: Vec<String> = arb.shrink(&"/longer-still-path".to_string()).collect();
        assert_eq!(shrinks[0], "/");
    }

    #[test]
    #[should_panic(expected = "OneOfArb cannot be created with no branches")]
    fn test_one_of_rejects_empty() {
        OneOfArb::<String>::new(vec![]);
    }

    #[test]
    fn test_vec_respects_bounds() {
        let arb = vec_of(int_range(0, 9), 2, 5);
        let mut rng = create_seeded_rng(3);
        for _ in 0..50 {
            let value = arb.generate(&mut rng).unwrap();
            assert!((2..=5).contains(&value.len()));
        }
    }

    #[test]
    fn test_vec_shrink_never_goes_below_min_len() {
        let arb = vec_of(int_range(0, 9), 2, 5);
        let value = vec![7, 8, 9, 1];
        for cand in arb.shrink(&value) {
            assert!(cand.len() >= 2);
            assert!(cand.len() <= value.len());
        }
    }

    #[test]
    fn test_string_shrink_is_monotone() {
        let arb = StringArb::ascii(0, 30);
        let value = "hello world".to_string();
        for cand in arb.shrink(&value) {
            assert!(cand.len() <= value.len());
        }
    }

    #[test]
    fn test_filter_exhaustion_is_a_configuration_error() {
        let arb = filter(int_range(0, 9), |_| false);
        let mut rng = create_seeded_rng(1);
        let err = arb.generate(&mut rng).unwrap_err();
        assert_eq!(
            err,
            ArbitraryError::FilterExhausted {
                attempts: FILTER_RETRY_BUDGET
            }
        );
    }

    #[test]
    fn test_filter_applies_to_generation_and_shrinking() {
        let arb = filter(int_range(0, 100), |n| n % 2 == 0);
        let mut rng = create_seeded_rng(5);
        for _ in 0..50 {
            assert_eq!(arb.generate(&mut rng).unwrap() % 2, 0);
        }
        for cand in arb.shrink(&80) {
            assert_eq!(cand % 2, 0);
        }
    }

    #[test]
    fn test_int_range_shrinks_toward_min() {
        let arb = int_range(2, 10);
        let shrinks: Vec<usize> = arb.shrink(&10).collect();
        assert!(!shrinks.is_empty());
        assert!(shrinks.iter().all(|&n| n >= 2 && n < 10));
        // The lower bound is always the first, most aggressive candidate.
        assert_eq!(shrinks[0], 2);
        assert_eq!(*shrinks.last().unwrap(), 9);
        assert_eq!(arb.shrink(&2).count(), 0);
    }

    #[test]
    fn test_dict_respects_bounds() {
        let arb = dict_of(
            boxed(string_of("abc", 1, 4)),
            boxed(StringArb::ascii(0, 8)),
            0,
            6,
        );
        let mut rng = create_seeded_rng(11);
        for _ in 0..50 {
            // Key collisions can only make the map smaller, never larger.
            assert!(arb.generate(&mut rng).unwrap().len() <= 6);
        }
    }

    #[test]
    fn test_dict_shrink_removes_entries() {
        let arb = dict_of(
            boxed(string_of("abc", 1, 4)),
            boxed(StringArb::ascii(0, 8)),
            0,
            6,
        );
        let mut value = BTreeMap::new();
        value.insert("a".to_string(), "xx".to_string());
        value.insert("b".to_string(), "yy".to_string());
        let shrinks: Vec<_> = arb.shrink(&value).collect();
        assert!(shrinks.contains(&BTreeMap::new()));
        assert!(shrinks.iter().all(|m| m.len() <= value.len()));
    }

    #[test]
    fn test_record_fixes_key_set() {
        let arb = record(vec![
            ("path", boxed(json_string(constant("/".to_string())))),
            ("query", boxed(json_string(StringArb::ascii(0, 10)))),
        ]);
        let mut rng = create_seeded_rng(2);
        let value = arb.generate(&mut rng).unwrap();
        let keys: Vec<&String> = value.keys().collect();
        assert_eq!(keys, vec!["path", "query"]);
    }

    #[test]
    fn test_record_shrinks_component_wise() {
        let arb = record(vec![
            ("path", boxed(json_string(constant("/crash".to_string())))),
            ("note", boxed(json_string(StringArb::ascii(0, 10)))),
        ]);
        let mut rng = create_seeded_rng(2);
        let value = arb.generate(&mut rng).unwrap();
        for cand in arb.shrink(&value) {
            // Keys never change; only one component moves per candidate.
            assert_eq!(cand.len(), value.len());
            assert!(cand.contains_key("path"));
        }
    }

    #[test]
    fn test_generation_is_deterministic_per_seed() {
        let arb = vec_of(StringArb::ascii(0, 12), 1, 8);
        let a = arb.generate(&mut create_seeded_rng(99)).unwrap();
        let b = arb.generate(&mut create_seeded_rng(99)).unwrap();
        assert_eq!(a, b);
    }
}
