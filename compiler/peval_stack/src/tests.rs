use super::*;

/// Models a left-leaning `1 + 1 + 1 + ...` chain, one frame per operator.
fn fold_sum_chain(depth: u32) -> f64 {
    ensure_sufficient_stack(|| {
        if depth == 0 {
            1.0
        } else {
            fold_sum_chain(depth - 1) + 1.0
        }
    })
}

#[test]
fn shallow_chain_folds() {
    assert_eq!(fold_sum_chain(9), 10.0);
}

#[test]
fn deep_chain_does_not_overflow() {
    assert_eq!(fold_sum_chain(200_000), 200_001.0);
}

#[test]
fn passes_option_results_through() {
    let folded: Option<&str> = ensure_sufficient_stack(|| Some("folded"));
    assert_eq!(folded, Some("folded"));
}
