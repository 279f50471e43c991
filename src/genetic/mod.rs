//! Toy genetic algorithm maximizing `x² − 3y + 4z` over bounded integer genes.
//!
//! The population lives in a plain [`Population`] value threaded through free
//! functions (`create_population`, `select_parent`, `reproduce`, `mutate`,
//! `discard_population`, `best_individual`). All randomness comes from a
//! [`RandomSource`], so a seeded RNG or a scripted sequence makes runs exact.

pub mod random;

pub use random::RandomSource;

use crate::error::{AnalysisError, Result};
use std::cmp::Reverse;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::Serialize;

pub const X_BOUNDS: (i32, i32) = (-10, 10);
pub const Y_BOUNDS: (i32, i32) = (0, 12);
pub const Z_BOUNDS: (i32, i32) = (-20, 20);

/// Highest value of the mutation roll; rolls are drawn from `0..=MUTATION_ROLL_MAX`.
pub const MUTATION_ROLL_MAX: i32 = 100;

/// One candidate solution. `fitness` is always consistent with the genes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Individual {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub fitness: i32,
}

impl Individual {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Individual { x, y, z, fitness: evaluate(x, y, z) }
    }

    /// Draws x, y and z (in that order) uniformly within their bounds.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let x = rng.uniform_inclusive(X_BOUNDS.0, X_BOUNDS.1);
        let y = rng.uniform_inclusive(Y_BOUNDS.0, Y_BOUNDS.1);
        let z = rng.uniform_inclusive(Z_BOUNDS.0, Z_BOUNDS.1);
        Individual::new(x, y, z)
    }
}

/// Fitness function being maximized.
pub fn evaluate(x: i32, y: i32, z: i32) -> i32 {
    x * x - 3 * y + 4 * z
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticConfig {
    /// Survivors kept after every generation.
    pub population_size: usize,
    /// Children produced per generation, in crossover pairs.
    pub num_offspring: usize,
    /// Mutation threshold on the `0..=100` roll.
    pub mutation_rate: i32,
    pub generations: usize,
}

impl GeneticConfig {
    pub const DEFAULT_POPULATION_SIZE: usize = 20;
    pub const DEFAULT_NUM_OFFSPRING: usize = 14;
    pub const DEFAULT_MUTATION_RATE: i32 = 1;
    pub const DEFAULT_GENERATIONS: usize = 10;

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(AnalysisError::InvalidHyperparameter {
                param: "population_size",
                value: self.population_size.to_string(),
                constraint: "must be greater than 0",
            });
        }
        Ok(())
    }
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            population_size: Self::DEFAULT_POPULATION_SIZE,
            num_offspring: Self::DEFAULT_NUM_OFFSPRING,
            mutation_rate: Self::DEFAULT_MUTATION_RATE,
            generations: Self::DEFAULT_GENERATIONS,
        }
    }
}

/// Current survivors plus the offspring buffer of the generation in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    pub individuals: Vec<Individual>,
    pub offspring: Vec<Individual>,
}

pub fn create_population<R: RandomSource + ?Sized>(config: &GeneticConfig, rng: &mut R) -> Population {
    Population {
        individuals: (0..config.population_size).map(|_| Individual::random(rng)).collect(),
        offspring: Vec::new(),
    }
}

/// Size-2 tournament: draws two indices (with replacement) and returns the one
/// with higher fitness. The first draw wins ties.
///
/// # Panics
/// If `population.individuals` is empty.
pub fn select_parent<R: RandomSource + ?Sized>(population: &Population, rng: &mut R) -> usize {
    let len = population.individuals.len();
    let candidate1 = rng.index(len);
    let candidate2 = rng.index(len);
    if population.individuals[candidate2].fitness > population.individuals[candidate1].fitness {
        candidate2
    } else {
        candidate1
    }
}

/// Possibly re-randomizes the genes, then recomputes fitness.
///
/// A single roll in `0..=100` decides for all three genes at once: if
/// `roll <= mutation_rate` then x, y and z are all redrawn, otherwise none is.
/// Genes are not rolled independently.
pub fn mutate<R: RandomSource + ?Sized>(individual: &mut Individual, mutation_rate: i32, rng: &mut R) {
    let roll = rng.uniform_inclusive(0, MUTATION_ROLL_MAX);
    if roll <= mutation_rate {
        individual.x = rng.uniform_inclusive(X_BOUNDS.0, X_BOUNDS.1);
        individual.y = rng.uniform_inclusive(Y_BOUNDS.0, Y_BOUNDS.1);
        individual.z = rng.uniform_inclusive(Z_BOUNDS.0, Z_BOUNDS.1);
    }
    individual.fitness = evaluate(individual.x, individual.y, individual.z);
}

/// Appends `num_offspring / 2` crossover pairs to the offspring buffer.
///
/// The first child takes x and z from the first parent and y from the second;
/// the second child is the mirror image. Each child is mutated right away.
/// An empty population has no parents and produces nothing.
pub fn reproduce<R: RandomSource + ?Sized>(population: &mut Population, config: &GeneticConfig, rng: &mut R) {
    if population.individuals.is_empty() {
        return;
    }
    for _ in 0..config.num_offspring / 2 {
        let parent1 = population.individuals[select_parent(population, rng)];
        let parent2 = population.individuals[select_parent(population, rng)];

        let mut child1 = Individual::new(parent1.x, parent2.y, parent1.z);
        let mut child2 = Individual::new(parent2.x, parent1.y, parent2.z);

        mutate(&mut child1, config.mutation_rate, rng);
        mutate(&mut child2, config.mutation_rate, rng);

        population.offspring.push(child1);
        population.offspring.push(child2);
    }
}

/// Merges the offspring into the population and keeps the fittest
/// `population_size`. Equal fitness keeps the earlier position.
pub fn discard_population(population: &mut Population, config: &GeneticConfig) {
    population.individuals.append(&mut population.offspring);
    population.individuals.sort_by_key(|individual| Reverse(individual.fitness));
    population.individuals.truncate(config.population_size);
}

/// Highest-fitness individual; the first one wins ties.
pub fn best_individual(population: &Population) -> Option<Individual> {
    let mut best: Option<Individual> = None;
    for &individual in &population.individuals {
        if best.map_or(true, |current| individual.fitness > current.fitness) {
            best = Some(individual);
        }
    }
    best
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionReport {
    pub best: Individual,
    /// Best fitness of the initial population, then after each generation.
    pub history: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct GeneticOptimizer {
    config: GeneticConfig,
}

impl GeneticOptimizer {
    pub fn new(config: GeneticConfig) -> Result<Self> {
        config.validate()?;
        Ok(GeneticOptimizer { config })
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    pub fn run<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Individual {
        self.run_with_history(rng).best
    }

    /// Creates a population and evolves it for `config.generations` rounds of
    /// reproduce-then-trim.
    pub fn run_with_history<R: RandomSource + ?Sized>(&self, rng: &mut R) -> EvolutionReport {
        info!(
            generations = self.config.generations,
            population_size = self.config.population_size,
            "starting genetic optimizer"
        );

        let mut population = create_population(&self.config, rng);
        let mut best = self.current_best(&population);
        let mut history = Vec::with_capacity(self.config.generations + 1);
        history.push(best.fitness);

        for generation in 0..self.config.generations {
            reproduce(&mut population, &self.config, rng);
            discard_population(&mut population, &self.config);
            best = self.current_best(&population);
            history.push(best.fitness);
            debug!(generation, best_fitness = best.fitness, "generation complete");
        }

        info!(x = best.x, y = best.y, z = best.z, fitness = best.fitness, "genetic optimizer finished");
        EvolutionReport { best, history }
    }

    fn current_best(&self, population: &Population) -> Individual {
        // `new` rejects population_size == 0 and trimming never goes below it.
        best_individual(population).expect("population is never empty")
    }
}
