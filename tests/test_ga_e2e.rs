/// End-to-end tests of the genetic algorithm on f(x) = -x² + 7x
///
/// Run with: cargo test --test test_ga_e2e -- --nocapture
use quadga::error::GaError;
use quadga::ga::Evolution;
use quadga::individual::{objective, GENE_SPACE};
use quadga::param::Param;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const OPTIMUM: f64 = 12.0;

fn optimum_reached(evolution: &Evolution, seed: u64) -> bool {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pop = evolution.run(&mut rng);
    let best = pop.fittest().expect("population is never empty");
    best.fitness == OPTIMUM
}

#[test]
fn test_ga_converges_with_mutation() {
    let evolution = Evolution::new(0.7, 0.5, true, 50, 200).unwrap();
    for seed in 0..10 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pop = evolution.run(&mut rng);
        let best = pop.fittest().unwrap();
        assert_eq!(pop.len(), 50);
        assert!(
            best.value() == 3 || best.value() == 4,
            "seed {} ended on {}",
            seed,
            best
        );
        assert_eq!(best.fitness, OPTIMUM);
    }
}

#[test]
fn test_ga_crossover_only_mostly_converges() {
    // Without mutation the gene pool can lose the bits needed for x=3 or x=4,
    // so only a majority of seeds (about 60%) is expected to reach the optimum
    let evolution = Evolution::new(1.0, 0.0, true, 10, 50).unwrap();
    let seeds = 100;
    let reached = (0..seeds).filter(|&seed| optimum_reached(&evolution, seed)).count();
    println!("optimum reached for {}/{} seeds", reached, seeds);
    assert!(reached >= 45, "only {}/{} seeds reached the optimum", reached, seeds);
}

#[test]
fn test_ga_crossover_only_keeps_best_initial_individual() {
    let evolution = Evolution::new(1.0, 0.0, true, 10, 50).unwrap();
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let trace = evolution.run_with_trace(&mut rng);
        assert_eq!(trace.len(), 51);
        let initial_best = trace[0].max_fitness();
        let final_best = trace[50].max_fitness();
        assert!(final_best >= initial_best, "seed {}: {} < {}", seed, final_best, initial_best);
        for pop in &trace {
            assert_eq!(pop.len(), 10);
        }
    }
}

#[test]
fn test_every_final_individual_is_consistent() {
    let evolution = Evolution::new(0.8, 0.4, false, 25, 30).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let pop = evolution.run(&mut rng);
    let mut cumulative = 0.0;
    for individual in &pop.individuals {
        assert!(individual.value() < GENE_SPACE);
        assert_eq!(individual.fitness, objective(individual.value()));
        assert!(individual.scaled_fitness >= 0.0);
        cumulative += individual.selection_probability;
    }
    assert!((cumulative - 1.0).abs() < 1e-9);
    assert_eq!(pop.individuals[24].cumulative_probability, 1.0);
}

#[test]
fn test_run_with_default_parameters() {
    let mut param = Param::default();
    param.ga.generations = 100;
    param.general.keep_trace = true;
    param.general.display_colorful = false;

    let experiment = quadga::run(&param).unwrap();

    assert_eq!(experiment.final_population.len(), 50);
    assert_eq!(experiment.collection.len(), 101);
    assert_eq!(experiment.collection.last(), Some(&experiment.final_population));
    assert_eq!(experiment.max_fitness(), OPTIMUM);
    assert!(experiment.average_fitness() <= OPTIMUM);
    assert!(experiment.generation_reaching_best().is_some());
    assert!(experiment.id.starts_with("quadga_"));

    let report = experiment.display();
    assert!(report.contains("The average fitness:"));
    assert!(report.contains("The highest fitness: 12.000"));
    assert!(report.contains("The fittest individual: 0001") || report.contains("The fittest individual: 0010"));
}

#[test]
fn test_run_without_trace_keeps_only_final_population() {
    let mut param = Param::default();
    param.ga.generations = 5;
    let experiment = quadga::run(&param).unwrap();
    assert!(experiment.collection.is_empty());
    assert_eq!(experiment.generation_reaching_best(), None);
}

#[test]
fn test_run_is_reproducible_for_a_seed() {
    let mut param = Param::default();
    param.ga.generations = 40;
    param.general.seed = 99;
    let a = quadga::run(&param).unwrap();
    let b = quadga::run(&param).unwrap();
    assert_eq!(a.final_population, b.final_population);
}

#[test]
fn test_run_with_zero_generations() {
    let mut param = Param::default();
    param.ga.generations = 0;
    param.ga.population_size = 7;
    let experiment = quadga::run(&param).unwrap();
    assert_eq!(experiment.final_population.len(), 7);
}

#[test]
fn test_run_rejects_invalid_parameters() {
    let mut param = Param::default();
    param.ga.population_size = 1;
    assert!(matches!(quadga::run(&param), Err(GaError::Configuration(_))));

    let mut param = Param::default();
    param.ga.mutation_rate = 2.0;
    assert!(matches!(quadga::run(&param), Err(GaError::Configuration(_))));
}
