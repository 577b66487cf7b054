//! Log-transform and min-max scaling of similarity criteria.

use super::RankingError;
use crate::dataset::{AgencyId, Universe, UniverseVersion};
use crate::metrics::SimilarityCriterion;
use std::collections::HashMap;

/// Log target for the ranking engine
const LOG_TARGET: &str = "ranking";

/// One criterion's normalized values for every agency in a universe, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    criterion: SimilarityCriterion,
    values: HashMap<AgencyId, f64>,
}

impl Normalization {
    #[must_use]
    pub const fn criterion(&self) -> SimilarityCriterion {
        self.criterion
    }

    pub fn get(&self, id: AgencyId) -> Result<f64, RankingError> {
        self.values.get(&id).copied().ok_or(RankingError::AgencyNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgencyId, f64)> + '_ {
        self.values.iter().map(|(&id, &value)| (id, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Normalize one criterion over the whole universe.
///
/// Each raw value `v` becomes `ln(v + 1)`, then is min-max scaled across all agencies. When every agency has the
/// same transformed value the scale is taken as 1, so every normalized value is 0.
pub fn normalize(universe: &Universe, criterion: SimilarityCriterion) -> Result<Normalization, RankingError> {
    let mut transformed = Vec::with_capacity(universe.len());
    for agency in universe.agencies() {
        let raw = criterion.extract(agency);
        transformed.push((agency.id, log_transform(criterion, agency.id, raw)?));
    }

    let (min, max) = transformed
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &(_, v)| (min.min(v), max.max(v)));
    let scale = if max > min { max - min } else { 1.0 };

    Ok(Normalization {
        criterion,
        values: transformed.into_iter().map(|(id, v)| (id, (v - min) / scale)).collect(),
    })
}

fn log_transform(criterion: SimilarityCriterion, id: AgencyId, value: f64) -> Result<f64, RankingError> {
    // ln(v + 1) needs v + 1 > 0
    if !value.is_finite() || value <= -1.0 {
        return Err(RankingError::InvalidInput { criterion, id, value });
    }

    Ok(value.ln_1p())
}

/// Normalizations computed for one universe, cached per criterion.
///
/// Normalization depends only on the universe, never on filters or the home agency, so entries stay valid until
/// a different universe is presented, at which point the cache starts over.
#[derive(Debug, Clone, Default)]
pub struct NormalizedValues {
    version: Option<UniverseVersion>,
    by_criterion: HashMap<SimilarityCriterion, Normalization>,
}

impl NormalizedValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize the given criteria for a universe.
    pub fn for_universe(
        universe: &Universe,
        criteria: impl IntoIterator<Item = SimilarityCriterion>,
    ) -> Result<Self, RankingError> {
        let mut values = Self::new();
        values.ensure(universe, criteria)?;
        Ok(values)
    }

    /// Make sure every criterion is normalized for `universe`.
    ///
    /// Either all missing criteria are added or, on error, the cache is left as it was.
    pub fn ensure(
        &mut self,
        universe: &Universe,
        criteria: impl IntoIterator<Item = SimilarityCriterion>,
    ) -> Result<(), RankingError> {
        let stale = self.version != Some(universe.version());

        let mut computed = HashMap::new();
        for criterion in criteria {
            if (stale || !self.by_criterion.contains_key(&criterion)) && !computed.contains_key(&criterion) {
                let _ = computed.insert(criterion, normalize(universe, criterion)?);
            }
        }

        if stale {
            if self.version.is_some() {
                log::debug!(target: LOG_TARGET, "Universe changed to {}, discarding cached normalizations", universe.version());
            }
            self.by_criterion.clear();
            self.version = Some(universe.version());
        }

        if !computed.is_empty() {
            log::debug!(target: LOG_TARGET, "Normalized {} criteria over {} agencies", computed.len(), universe.len());
        }

        self.by_criterion.extend(computed);
        Ok(())
    }

    /// The normalization of one criterion for `universe`, computing it if it is not cached yet.
    pub fn get_or_compute(&mut self, universe: &Universe, criterion: SimilarityCriterion) -> Result<&Normalization, RankingError> {
        self.ensure(universe, [criterion])?;
        self.by_criterion.get(&criterion).ok_or(RankingError::NotNormalized(criterion))
    }

    #[must_use]
    pub fn get(&self, criterion: SimilarityCriterion) -> Option<&Normalization> {
        self.by_criterion.get(&criterion)
    }

    /// The normalized value of one criterion for one agency.
    pub fn value(&self, criterion: SimilarityCriterion, id: AgencyId) -> Result<f64, RankingError> {
        self.get(criterion).ok_or(RankingError::NotNormalized(criterion))?.get(id)
    }

    #[must_use]
    pub const fn universe_version(&self) -> Option<UniverseVersion> {
        self.version
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_criterion.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_criterion.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Agency;
    use strum::IntoEnumIterator;

    fn universe(ridership: &[f64]) -> Universe {
        Universe::new(
            ridership
                .iter()
                .zip(1..)
                .map(|(&r, id)| {
                    let mut agency = Agency::new(AgencyId::new(id), format!("Agency {id}"));
                    agency.ridership = r;
                    agency.population = Some(r * 3.0);
                    agency.operating_expenses = r * 7.5;
                    agency
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_values_are_bounded() {
        let u = universe(&[0.0, 12.0, 1_000.0, 5e8, 42.0]);
        for criterion in SimilarityCriterion::iter() {
            let n = normalize(&u, criterion).unwrap();
            assert_eq!(n.len(), 5);
            for (id, value) in n.iter() {
                assert!((0.0..=1.0).contains(&value), "{criterion} {id} = {value}");
            }
        }
    }

    #[test]
    fn test_extremes_map_to_zero_and_one() {
        let u = universe(&[10.0, 1_000_000.0, 500.0]);
        let n = normalize(&u, SimilarityCriterion::Ridership).unwrap();
        assert_eq!(n.get(AgencyId::new(1)).unwrap(), 0.0);
        assert_eq!(n.get(AgencyId::new(2)).unwrap(), 1.0);
    }

    #[test]
    fn test_monotonic() {
        let raw = [3.0, 0.0, 900.0, 12.5, 12.5, 1e7];
        let u = universe(&raw);
        let n = normalize(&u, SimilarityCriterion::Ridership).unwrap();
        for (a, ra) in (1..).zip(raw) {
            for (b, rb) in (1..).zip(raw) {
                if ra <= rb {
                    assert!(n.get(AgencyId::new(a)).unwrap() <= n.get(AgencyId::new(b)).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_log_scaling() {
        let u = universe(&[0.0, 9.0, 99.0]);
        let n = normalize(&u, SimilarityCriterion::Ridership).unwrap();
        let middle = n.get(AgencyId::new(2)).unwrap();
        assert!((middle - 10f64.ln() / 100f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_universe_is_all_zero() {
        let u = universe(&[250.0, 250.0, 250.0]);
        let n = normalize(&u, SimilarityCriterion::Ridership).unwrap();
        assert!(n.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_missing_values_read_as_zero() {
        let mut agency = Agency::new(AgencyId::new(1), "No population");
        agency.ridership = 10.0;
        let mut other = Agency::new(AgencyId::new(2), "Big");
        other.population = Some(1e6);
        let u = Universe::new(vec![agency, other]).unwrap();

        let n = normalize(&u, SimilarityCriterion::Population).unwrap();
        assert_eq!(n.get(AgencyId::new(1)).unwrap(), 0.0);
        assert_eq!(n.get(AgencyId::new(2)).unwrap(), 1.0);
    }

    #[test]
    fn test_invalid_input() {
        let mut agency = Agency::new(AgencyId::new(1), "Broken");
        agency.ridership = -2.0;
        let u = Universe::new(vec![agency]).unwrap();

        let err = normalize(&u, SimilarityCriterion::Ridership).unwrap_err();
        assert!(matches!(err, RankingError::InvalidInput { value, .. } if value == -2.0));
    }

    #[test]
    fn test_small_negative_is_within_domain() {
        let mut agency = Agency::new(AgencyId::new(1), "Odd");
        agency.ridership = -0.5;
        let u = Universe::new(vec![agency, Agency::new(AgencyId::new(2), "Zero")]).unwrap();
        let n = normalize(&u, SimilarityCriterion::Ridership).unwrap();
        assert_eq!(n.get(AgencyId::new(1)).unwrap(), 0.0);
        assert_eq!(n.get(AgencyId::new(2)).unwrap(), 1.0);
    }

    #[test]
    fn test_unknown_agency_is_not_found() {
        let u = universe(&[1.0, 2.0]);
        let n = normalize(&u, SimilarityCriterion::Ridership).unwrap();
        assert_eq!(n.get(AgencyId::new(99)).unwrap_err(), RankingError::AgencyNotFound(AgencyId::new(99)));
    }

    #[test]
    fn test_empty_universe() {
        let u = Universe::new(Vec::new()).unwrap();
        assert!(normalize(&u, SimilarityCriterion::Ridership).unwrap().is_empty());
    }

    #[test]
    fn test_cache_computes_on_demand() {
        let u = universe(&[1.0, 2.0, 3.0]);
        let mut cache = NormalizedValues::new();
        assert_eq!(
            cache.value(SimilarityCriterion::Ridership, AgencyId::new(1)).unwrap_err(),
            RankingError::NotNormalized(SimilarityCriterion::Ridership)
        );

        cache.ensure(&u, [SimilarityCriterion::Ridership]).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.universe_version(), Some(u.version()));
        assert_eq!(cache.value(SimilarityCriterion::Ridership, AgencyId::new(3)).unwrap(), 1.0);

        cache.ensure(&u, [SimilarityCriterion::Ridership, SimilarityCriterion::Population]).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_or_compute() {
        let u = universe(&[1.0, 9.0]);
        let mut cache = NormalizedValues::new();
        let normalization = cache.get_or_compute(&u, SimilarityCriterion::Ridership).unwrap();
        assert_eq!(normalization.criterion(), SimilarityCriterion::Ridership);
        assert_eq!(normalization.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_invalidated_by_new_universe() {
        let first = universe(&[1.0, 2.0]);
        let mut cache = NormalizedValues::for_universe(&first, [SimilarityCriterion::Ridership, SimilarityCriterion::Population]).unwrap();
        assert_eq!(cache.len(), 2);

        let second = universe(&[5.0, 5.0]);
        cache.ensure(&second, [SimilarityCriterion::Ridership]).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.universe_version(), Some(second.version()));
        assert_eq!(cache.value(SimilarityCriterion::Ridership, AgencyId::new(2)).unwrap(), 0.0);
    }

    #[test]
    fn test_cache_untouched_on_error() {
        let good = universe(&[1.0, 2.0]);
        let mut cache = NormalizedValues::for_universe(&good, [SimilarityCriterion::Ridership]).unwrap();

        let mut broken = Agency::new(AgencyId::new(1), "Broken");
        broken.operating_expenses = -10.0;
        let bad = Universe::new(vec![broken]).unwrap();

        let _ = cache.ensure(&bad, [SimilarityCriterion::OperatingExpenses]).unwrap_err();
        assert_eq!(cache.universe_version(), Some(good.version()));
        assert_eq!(cache.len(), 1);
    }
}
