//! Property tests for ced-scm: determinism, order, and do-operation locality
//! over random DAG-shaped equation sets.

use proptest::prelude::*;

use ced_scm::{evaluate, EquationSet, Override, StructuralEquation};

/// Build a random DAG: node `i` may only take parents with a smaller index,
/// so the set is acyclic. Nodes are declared in reverse so the declaration
/// order disagrees with the topological order.
fn build_random_set(n: usize, edges: &[(usize, usize)], seed: u64) -> EquationSet {
    let mut parents: Vec<Vec<String>> = vec![Vec::new(); n];
    for &(a, b) in edges {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        if lo != hi && lo < n && hi < n {
            let name = format!("v{lo}");
            if !parents[hi].contains(&name) {
                parents[hi].push(name);
            }
        }
    }

    let mut set = EquationSet::new(seed);
    for i in (0..n).rev() {
        let refs: Vec<&str> = parents[i].iter().map(String::as_str).collect();
        let names = parents[i].clone();
        let equation = StructuralEquation::new(format!("v{i}"), &refs, move |ctx| {
            let n = ctx.n_samples();
            let mut acc = ctx.noise().normal(1.0, n)?;
            for p in &names {
                for (a, x) in acc.iter_mut().zip(ctx.parent(p)?) {
                    *a += 0.5 * x;
                }
            }
            Ok(acc)
        });
        set.declare(equation).unwrap();
    }
    set
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n, 0..n), 0..n * 2)
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(
        edges in edge_strategy(8),
        seed in any::<u32>(),
        rows in 1_usize..64,
    ) {
        let set = build_random_set(8, &edges, u64::from(seed));
        let a = evaluate(&set, rows).unwrap();
        let b = evaluate(&set, rows).unwrap();
        prop_assert_eq!(a, b);
    }
}

proptest! {
    #[test]
    fn topological_order_puts_parents_first(edges in edge_strategy(10)) {
        let set = build_random_set(10, &edges, 0);
        let graph = set.graph().unwrap();
        let order = graph.topological_order();
        prop_assert_eq!(order.len(), 10);
        for (parent, child) in graph.edges() {
            let p = order.iter().position(|n| *n == parent).unwrap();
            let c = order.iter().position(|n| *n == child).unwrap();
            prop_assert!(p < c, "{} evaluated after its child {}", parent, child);
        }
    }
}

proptest! {
    #[test]
    fn intervention_preserves_non_descendants(
        edges in edge_strategy(8),
        target in 0_usize..8,
        value in -5.0_f64..5.0,
    ) {
        let set = build_random_set(8, &edges, 17);
        let target = format!("v{target}");
        let base = evaluate(&set, 32).unwrap().sample;
        let done = set.intervene(&target, Override::Constant(value)).unwrap();
        let perturbed = evaluate(&done, 32).unwrap().sample;

        let graph = set.graph().unwrap();
        let descendants = graph.descendants(&target).unwrap();
        for name in set.names() {
            if name != target && !descendants.contains(&name) {
                prop_assert_eq!(base.column(name), perturbed.column(name));
            }
        }
        prop_assert!(perturbed.column(&target).unwrap().iter().all(|&x| x == value));
    }
}
