use approx::assert_abs_diff_eq;
use cancor::{AveBlocks, AveSummary, Scheme, SgccaFit, Summary, analyze};
use ndarray::{Array2, array};

/// Wraps a single score vector as an observations-by-one matrix.
fn single_component_block(values: &[f64]) -> Array2<f64> {
    Array2::from_shape_vec((values.len(), 1), values.to_vec()).unwrap()
}

fn scalar_ave() -> AveSummary {
    AveSummary {
        inner: array![0.42],
        outer: array![0.58],
        per_block: AveBlocks::Heterogeneous(vec![array![0.4], array![0.5], array![0.6]]),
    }
}

/// Three blocks where only the (1,3) and (2,3) pairs are connected, and
/// the component correlations are exactly 1, -1, -1.
fn chained_fit(scheme: Scheme) -> SgccaFit {
    let scores = vec![
        single_component_block(&[1.0, 2.0, 3.0, 4.0]),
        single_component_block(&[2.0, 4.0, 6.0, 8.0]),
        single_component_block(&[4.0, 3.0, 2.0, 1.0]),
    ];
    let weights = vec![array![[1.0]], array![[1.0]], array![[1.0]]];
    let connection = array![[0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
    SgccaFit::new(
        scores,
        weights.clone(),
        weights,
        scalar_ave(),
        connection,
        scheme,
    )
    .unwrap()
}

/// Three fully connected blocks with correlations 0.5, 0.5, -0.5.
fn fully_connected_fit(scheme: Scheme) -> SgccaFit {
    let scores = vec![
        single_component_block(&[1.0, 2.0, 3.0]),
        single_component_block(&[2.0, 1.0, 3.0]),
        single_component_block(&[1.0, 3.0, 2.0]),
    ];
    let weights = vec![array![[1.0]], array![[1.0]], array![[1.0]]];
    let connection = array![[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
    SgccaFit::new(
        scores,
        weights.clone(),
        weights,
        scalar_ave(),
        connection,
        scheme,
    )
    .unwrap()
}

#[test]
fn chained_design_under_factorial_matches_hand_computation() {
    let summary = analyze(&chained_fit(Scheme::Factorial)).unwrap();

    let names: Vec<&str> = summary.names().collect();
    assert_eq!(
        names,
        vec![
            "vs12", "vs13", "vs23", "AVE_inner", "AVE_outer", "cc1", "var12", "var13", "var23",
            "weights"
        ]
    );

    assert_abs_diff_eq!(summary.get("vs12").unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.get("vs13").unwrap(), -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.get("vs23").unwrap(), -1.0, epsilon = 1e-12);

    assert_eq!(summary.get("var12"), Some(0.0));
    assert_eq!(summary.get("var13"), Some(1.0));
    assert_eq!(summary.get("var23"), Some(1.0));
    assert_eq!(summary.get("weights"), Some(2.0));

    // Only the two connected pairs contribute: (-1)^2 + (-1)^2.
    assert_abs_diff_eq!(summary.get("cc1").unwrap(), 2.0, epsilon = 1e-12);

    assert_abs_diff_eq!(summary.get("AVE_inner").unwrap(), 0.42, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.get("AVE_outer").unwrap(), 0.58, epsilon = 1e-12);
}

#[test]
fn zero_connection_pairs_drop_out_under_every_scheme() {
    // The (1,2) pair correlates perfectly but is unconnected; it must
    // not reach cc1 under any scheme, while keeping its vs/var entries.
    let centroid = analyze(&chained_fit(Scheme::Centroid)).unwrap();
    let horst = analyze(&chained_fit(Scheme::Horst)).unwrap();
    let factorial = analyze(&chained_fit(Scheme::Factorial)).unwrap();

    assert_abs_diff_eq!(centroid.get("cc1").unwrap(), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(horst.get("cc1").unwrap(), -2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(factorial.get("cc1").unwrap(), 2.0, epsilon = 1e-12);

    for summary in [&centroid, &horst, &factorial] {
        assert_eq!(summary.get("vs12"), Some(1.0));
        assert_eq!(summary.get("var12"), Some(0.0));
        assert_eq!(summary.get("weights"), Some(2.0));
    }
}

#[test]
fn fully_connected_design_counts_every_pair() {
    let summary = analyze(&fully_connected_fit(Scheme::Centroid)).unwrap();
    assert_eq!(summary.get("weights"), Some(3.0));

    assert_abs_diff_eq!(summary.get("vs12").unwrap(), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.get("vs13").unwrap(), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.get("vs23").unwrap(), -0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.get("cc1").unwrap(), 1.5, epsilon = 1e-12);

    let horst = analyze(&fully_connected_fit(Scheme::Horst)).unwrap();
    assert_abs_diff_eq!(horst.get("cc1").unwrap(), 0.5, epsilon = 1e-12);

    let factorial = analyze(&fully_connected_fit(Scheme::Factorial)).unwrap();
    assert_abs_diff_eq!(factorial.get("cc1").unwrap(), 0.75, epsilon = 1e-12);
}

#[test]
fn summary_length_is_determined_by_block_count_and_ave_arity() {
    let summary = analyze(&fully_connected_fit(Scheme::Horst)).unwrap();
    let pairs = 3;
    let ave_entries = 2;
    assert_eq!(summary.len(), 2 * pairs + ave_entries + 1 + 1);
}

#[test]
fn relabeled_fits_analyze_identically() {
    let names: Vec<String> = ["expression", "methylation", "clinical"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let plain = analyze(&chained_fit(Scheme::Factorial)).unwrap();
    let relabeled_fit = chained_fit(Scheme::Factorial).relabel(&names).unwrap();
    let relabeled = analyze(&relabeled_fit).unwrap();

    assert_eq!(relabeled_fit.block_names, names);
    assert_eq!(plain, relabeled);

    // Relabeling again with the same names changes nothing further.
    let again = relabeled_fit.clone().relabel(&names).unwrap();
    assert_eq!(again.block_names, relabeled_fit.block_names);
}

#[test]
fn fit_and_summary_survive_a_serde_round_trip() {
    let fit = chained_fit(Scheme::Factorial);
    let encoded = serde_json::to_string(&fit).unwrap();
    let decoded: SgccaFit = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded.block_names, fit.block_names);
    assert_eq!(decoded.call.scheme, fit.call.scheme);
    assert_eq!(decoded.call.connection, fit.call.connection);
    assert_eq!(analyze(&decoded).unwrap(), analyze(&fit).unwrap());

    let summary = analyze(&fit).unwrap();
    let encoded = serde_json::to_string(&summary).unwrap();
    let decoded: Summary = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, summary);
}
