//! Population (generation) of candidate schedules.

use rand::Rng;

use crate::error::SchedulerError;
use crate::models::{Catalog, Schedule};

/// An ordered collection of schedules with a cached fittest member.
#[derive(Debug, Clone, Default)]
pub struct Population {
    schedules: Vec<Schedule>,
    fittest: Option<usize>,
    fittest_score: u32,
}

impl Population {
    /// Creates an empty population, the construction target of a generation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `size` random schedules and caches the fittest.
    pub fn random<R: Rng>(
        catalog: &Catalog,
        size: usize,
        rng: &mut R,
    ) -> Result<Self, SchedulerError> {
        let mut population = Self::new();
        for _ in 0..size {
            population.add(Schedule::random(catalog, rng)?);
        }
        population.find_fittest();
        Ok(population)
    }

    /// Appends a schedule. No dedup, no reordering.
    pub fn add(&mut self, schedule: Schedule) {
        self.schedules.push(schedule);
    }

    /// Scans for the fittest schedule and caches it.
    ///
    /// The first schedule whose fitness strictly exceeds the best seen so
    /// far wins, starting from a floor of 0. A population where every
    /// schedule scores 0 therefore has no fittest member.
    pub fn find_fittest(&mut self) -> Option<&Schedule> {
        self.fittest = None;
        self.fittest_score = 0;
        for (i, schedule) in self.schedules.iter().enumerate() {
            if schedule.fitness() > self.fittest_score {
                self.fittest = Some(i);
                self.fittest_score = schedule.fitness();
            }
        }
        self.fittest()
    }

    /// Cached fittest schedule from the last scan.
    pub fn fittest(&self) -> Option<&Schedule> {
        self.fittest.and_then(|i| self.schedules.get(i))
    }

    /// Cached best fitness from the last scan (0 if none).
    pub fn fittest_score(&self) -> u32 {
        self.fittest_score
    }

    /// Stable sort, highest fitness first.
    ///
    /// Equal-fitness schedules keep their relative order. The cached fittest
    /// is rescanned so it keeps pointing at the same ranking.
    pub fn sort_by_fitness_desc(&mut self) {
        self.schedules.sort_by(|a, b| a.cmp_by_fitness_desc(b));
        if self.fittest.is_some() {
            self.find_fittest();
        }
    }

    pub fn get(&self, index: usize) -> Option<&Schedule> {
        self.schedules.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Schedule> {
        self.schedules.get_mut(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Schedule> {
        self.schedules.iter()
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    /// Consumes the population, returning its schedules in order.
    pub fn into_schedules(self) -> Vec<Schedule> {
        self.schedules
    }
}

impl FromIterator<Schedule> for Population {
    /// Collects schedules and caches the fittest.
    fn from_iter<I: IntoIterator<Item = Schedule>>(iter: I) -> Self {
        let mut population = Self {
            schedules: iter.into_iter().collect(),
            ..Self::default()
        };
        population.find_fittest();
        population
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Schedule;
    type IntoIter = std::slice::Iter<'a, Schedule>;

    fn into_iter(self) -> Self::IntoIter {
        self.schedules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceId, Session, WeekLayout};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::builder(WeekLayout::new(2, 1, 36))
            .with_room("R", [0, 1])
            .with_tutor("T", 5, [0, 1])
            .with_supervisor("S", 5, [0, 1])
            .build()
            .unwrap()
    }

    /// `filled` leading slots get the sole meeting; 0 scores 33, 1 or 2 score 100.
    fn scored(catalog: &Catalog, filled: usize) -> Schedule {
        let m = Session::meeting(ResourceId(0), ResourceId(0), ResourceId(0));
        let sessions = (0..2).map(|i| if i < filled { m } else { Session::Empty }).collect();
        let mut s = Schedule::from_sessions(sessions);
        s.compute_fitness(catalog).unwrap();
        s
    }

    #[test]
    fn test_random_population() {
        let c = catalog();
        let mut rng = SmallRng::seed_from_u64(42);
        let p = Population::random(&c, 10, &mut rng).unwrap();
        assert_eq!(p.len(), 10);
        let best = p.iter().map(|s| s.fitness()).max().unwrap();
        assert_eq!(p.fittest_score(), best);
        assert_eq!(p.fittest().unwrap().fitness(), best);
    }

    #[test]
    fn test_find_fittest_keeps_first_of_ties() {
        let c = catalog();
        let p: Population = [scored(&c, 0), scored(&c, 2), scored(&c, 2)]
            .into_iter()
            .collect();
        assert_eq!(p.fittest_score(), 100);
        assert!(std::ptr::eq(p.fittest().unwrap(), p.get(1).unwrap()));
    }

    #[test]
    fn test_all_zero_population_has_no_fittest() {
        let p: Population = vec![Schedule::empty(2), Schedule::empty(2)].into_iter().collect();
        assert!(p.fittest().is_none());
        assert_eq!(p.fittest_score(), 0);
    }

    #[test]
    fn test_new_population_is_empty() {
        let mut p = Population::new();
        assert!(p.is_empty());
        assert!(p.find_fittest().is_none());
        p.add(Schedule::empty(2));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_sort_is_non_increasing_and_stable() {
        let c = catalog();
        let mut p = Population::new();
        p.add(scored(&c, 0));
        p.add(scored(&c, 1));
        p.add(scored(&c, 2));
        p.add(Schedule::empty(2));
        p.find_fittest();
        p.sort_by_fitness_desc();

        let scores: Vec<u32> = p.iter().map(|s| s.fitness()).collect();
        assert_eq!(scores, vec![100, 100, 33, 0]);
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        // equal scores keep insertion order
        assert_eq!(p.get(0).unwrap().session_count(), 1);
        assert_eq!(p.get(1).unwrap().session_count(), 2);
        assert!(std::ptr::eq(p.fittest().unwrap(), p.get(0).unwrap()));
    }
}
