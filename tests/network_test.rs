//! Recruitment and tick semantics of the network

use std::collections::HashSet;

use generational_arena::Index;
use rstest::rstest;

use mlmsim::domain::{
    FixedBatch, Marketer, Network, Prospect, RecruitState, RecruitingStrategy, SingleRecruit,
};
use mlmsim::util::testing;

/// Offers far more recruits than any quota allows.
#[derive(Debug)]
struct Greedy;

impl RecruitingStrategy for Greedy {
    fn prospects(&mut self, _recruiter: &Marketer) -> Vec<Prospect> {
        vec![Prospect::new(); 50]
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Recruits people who never recruit themselves.
#[derive(Debug)]
struct Dormant;

impl RecruitingStrategy for Dormant {
    fn prospects(&mut self, _recruiter: &Marketer) -> Vec<Prospect> {
        vec![Prospect::with_target(0)]
    }

    fn name(&self) -> &'static str {
        "dormant"
    }
}

fn single(target: usize) -> Network {
    testing::init_test_setup();
    Network::new(Box::new(SingleRecruit), target)
}

fn ticks(network: &mut Network, n: usize) {
    for _ in 0..n {
        network.recruit();
    }
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn given_fresh_root_when_one_tick_then_root_has_one_child_and_registry_two() {
    let mut network = single(5);
    network.recruit();

    assert_eq!(network.front_line_of(network.root()).len(), 1);
    assert_eq!(network.len(), 2);
}

#[test]
fn given_fresh_root_when_five_ticks_then_root_saturated_with_five_children() {
    let mut network = single(5);
    ticks(&mut network, 5);

    let root = network.get(network.root()).unwrap();
    assert_eq!(root.front_line.len(), 5);
    assert_eq!(root.state(), RecruitState::Saturated);
    let child_ids: Vec<u64> = network
        .front_line_of(network.root())
        .iter()
        .map(|m| m.id.get())
        .collect();
    assert_eq!(child_ids, vec![2, 3, 5, 9, 17]);
}

#[test]
fn given_default_quota_when_ticking_then_population_doubles_until_root_saturates() {
    let mut network = single(5);
    let mut sizes = Vec::new();
    for _ in 0..6 {
        network.recruit();
        sizes.push(network.len());
    }
    // The root drops out in month 6, everybody else still recruits
    assert_eq!(sizes, vec![2, 4, 8, 16, 32, 63]);
}

#[test]
fn given_only_root_can_recruit_when_five_ticks_then_registry_holds_six() {
    testing::init_test_setup();
    let mut network = Network::new(Box::new(Dormant), 5);
    ticks(&mut network, 5);

    assert_eq!(network.len(), 6);
    assert_eq!(network.front_line_of(network.root()).len(), 5);
    assert!(network
        .front_line_of(network.root())
        .iter()
        .all(|m| m.front_line.is_empty()));

    assert_eq!(network.recruit(), 0);
    assert_eq!(network.len(), 6);
}

// ============================================================
// Quota and saturation
// ============================================================

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
fn given_default_strategy_when_recruiting_then_saturates_after_exactly_target_calls(
    #[case] target: usize,
) {
    let mut network = single(target);
    for call in 1..=target {
        assert_eq!(
            network.get(network.root()).unwrap().state(),
            RecruitState::Recruiting,
            "root saturated before call {call}"
        );
        network.recruit();
        assert_eq!(network.get(network.root()).unwrap().front_line.len(), call);
    }
    assert!(network.get(network.root()).unwrap().sponsoring_goals_met());
}

#[test]
fn given_saturated_marketer_when_recruiting_again_then_front_line_unchanged() {
    let mut network = single(2);
    ticks(&mut network, 2);
    let before = network.get(network.root()).unwrap().front_line.clone();

    ticks(&mut network, 3);

    assert_eq!(network.get(network.root()).unwrap().front_line, before);
}

#[test]
fn given_zero_quota_when_ticking_then_nothing_ever_happens() {
    let mut network = single(0);
    assert_eq!(network.get(network.root()).unwrap().state(), RecruitState::Saturated);
    ticks(&mut network, 4);
    assert_eq!(network.len(), 1);
    assert_eq!(network.month(), 4);
}

#[rstest]
#[case::single(Box::new(SingleRecruit) as Box<dyn RecruitingStrategy>)]
#[case::batch(Box::new(FixedBatch::new(3).unwrap()) as Box<dyn RecruitingStrategy>)]
#[case::greedy(Box::new(Greedy) as Box<dyn RecruitingStrategy>)]
fn given_any_strategy_when_ticking_then_quota_never_exceeded(
    #[case] strategy: Box<dyn RecruitingStrategy>,
) {
    testing::init_test_setup();
    let mut network = Network::new(strategy, 4);
    for _ in 0..4 {
        network.recruit();
        assert!(network
            .marketers()
            .all(|m| m.front_line.len() <= m.front_line_target));
    }
    assert!(network.get(network.root()).unwrap().sponsoring_goals_met());
}

#[test]
fn given_greedy_strategy_when_clamped_then_ids_stay_contiguous() {
    testing::init_test_setup();
    let mut network = Network::new(Box::new(Greedy), 3);
    ticks(&mut network, 2);

    // month 1: root takes 3; month 2: each of the 3 takes 3
    assert_eq!(network.len(), 1 + 3 + 9);
    let ids: Vec<u64> = network.marketers().map(|m| m.id.get()).collect();
    assert_eq!(ids, (1..=13).collect::<Vec<u64>>());
}

// ============================================================
// Identity and registry
// ============================================================

#[test]
fn given_long_run_when_collecting_ids_then_unique_and_strictly_increasing() {
    let mut network = single(3);
    ticks(&mut network, 6);

    let ids: Vec<u64> = network.marketers().map(|m| m.id.get()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids.first(), Some(&1));
    assert_eq!(network.tree().issued_ids(), ids.len() as u64);
}

#[test]
fn given_grown_network_when_walking_tree_then_registry_matches_reachable_nodes() {
    let mut network = single(3);
    ticks(&mut network, 4);

    let reachable: Vec<Index> = network.tree().iter().map(|(idx, _)| idx).collect();
    let registry: HashSet<Index> = network.registry().iter().copied().collect();

    assert_eq!(registry.len(), network.len(), "registry holds duplicates");
    assert_eq!(reachable.len(), network.len());
    assert!(reachable.iter().all(|idx| registry.contains(idx)));
}

#[test]
fn given_recruits_when_inspected_then_point_back_to_sponsor() {
    let mut network = single(5);
    ticks(&mut network, 3);

    for &idx in network.registry() {
        let marketer = network.get(idx).unwrap();
        for &child in &marketer.front_line {
            assert_eq!(network.get(child).unwrap().sponsor, Some(idx));
        }
    }
    assert!(network.get(network.root()).unwrap().sponsor.is_none());
}

// ============================================================
// Breadth-first ticks
// ============================================================

#[test]
fn given_marketers_created_in_tick_when_tick_ends_then_they_have_not_recruited() {
    let mut network = single(5);
    for month in 1..=5u64 {
        network.recruit();
        let newcomers: Vec<&Marketer> = network
            .marketers()
            .filter(|m| m.joined_month == month)
            .collect();
        assert!(!newcomers.is_empty());
        assert!(newcomers.iter().all(|m| m.front_line.is_empty()));
    }
}

#[test]
fn given_default_strategy_when_ticking_then_growth_equals_recruiting_marketers() {
    let mut network = single(2);
    for _ in 0..6 {
        let recruiting = network.recruiting_count();
        let added = network.recruit();
        assert_eq!(added, recruiting);
    }
}

#[test]
fn given_three_levels_when_measuring_depth_then_one_level_per_tick() {
    let mut network = single(5);
    assert_eq!(network.depth(), 1);
    ticks(&mut network, 3);
    assert_eq!(network.depth(), 4);
}
