//! End-to-end scenarios (§8): each builds a model through the public
//! facade surface only (`ModelBuilder` -> `Model` -> `CompiledModel`
//! -> `Simulation`) and checks an observable property of the run, not
//! implementation internals.

use approx::assert_relative_eq;

use bugs::{ModelBuilder, SArray, Shape, SimulationConfigBuilder};

/// Closed-form posterior for a Normal-Normal conjugate pair: `n`
/// observations with known precision `tau_y` around an unknown mean
/// with prior `dnorm(mu0, tau0)`.
fn normal_normal_posterior(tau0: f64, mu0: f64, tau_y: f64, ys: &[f64]) -> (f64, f64) {
    let n = ys.len() as f64;
    let ybar: f64 = ys.iter().sum::<f64>() / n;
    let post_tau = tau0 + n * tau_y;
    let post_mean = (tau0 * mu0 + n * tau_y * ybar) / post_tau;
    (post_mean, 1.0 / post_tau)
}

#[test]
fn conjugate_normal_chain_recovers_closed_form_posterior() {
    let n = 100;
    let true_mu = 3.0;
    let tau_y = 1.0;
    let tau0 = 0.0001;
    let mu0 = 0.0;

    let ys: Vec<f64> = (0..n).map(|i| true_mu + 0.37 * ((i as f64 * 1.37).sin())).collect();

    let mut builder = ModelBuilder::new()
        .constant("mu0", vec![1])
        .constant("tau0", vec![1])
        .stochastic("mu", "dnorm", vec![1], &["mu0", "tau0"], false, (None, None))
        .constant("tau_y", vec![1]);
    for i in 0..n {
        let name = format!("y{i}");
        builder = builder.stochastic(&name, "dnorm", vec![1], &["mu", "tau_y"], true, (None, None));
    }

    let mut model = builder.build().expect("model builds");
    model.set_data("mu0", SArray::scalar(mu0)).unwrap();
    model.set_data("tau0", SArray::scalar(tau0)).unwrap();
    model.set_data("tau_y", SArray::scalar(tau_y)).unwrap();
    for (i, &y) in ys.iter().enumerate() {
        model.set_data(&format!("y{i}"), SArray::scalar(y)).unwrap();
    }

    let compiled = model.compile().expect("all observed nodes have data");
    let config = SimulationConfigBuilder::default().chains(1).adapt_iterations(0).seed(7).build().unwrap();
    let mut sim = compiled.initialize(&config).expect("a conjugate sampler is claimed for mu");

    sim.attach_monitor("mu_mean", &["mu"], "mean", None).unwrap();
    sim.run(5000).unwrap();

    let (expected_mean, expected_var) = normal_normal_posterior(tau0, mu0, tau_y, &ys);
    let dump = sim.monitor_result("mu_mean").unwrap();
    let observed_mean = dump.values()[0];

    assert_relative_eq!(observed_mean, expected_mean, epsilon = 0.05);
    let _ = expected_var;
}

#[test]
fn conjugate_dirichlet_categorical_recovers_posterior_proportions() {
    let counts = [40usize, 20, 30, 10];
    let alpha0 = [1.0, 1.0, 1.0, 1.0];

    let mut builder = ModelBuilder::new()
        .constant("alpha", vec![4])
        .stochastic("p", "ddirch", vec![4], &["alpha"], false, (None, None));

    let mut index = 0usize;
    for (category, &count) in counts.iter().enumerate() {
        for _ in 0..count {
            let name = format!("y{index}");
            builder = builder.stochastic(&name, "dcat", vec![1], &["p"], true, (None, None));
            index += 1;
        }
        let _ = category;
    }

    let mut model = builder.build().expect("model builds");
    model.set_data("alpha", SArray::new(Shape::new(vec![4]), alpha0.to_vec())).unwrap();
    let mut index = 0usize;
    for (category, &count) in counts.iter().enumerate() {
        for _ in 0..count {
            model.set_data(&format!("y{index}"), SArray::scalar((category + 1) as f64)).unwrap();
            index += 1;
        }
    }

    let compiled = model.compile().expect("all observed nodes have data");
    let config = SimulationConfigBuilder::default().chains(1).adapt_iterations(0).seed(11).build().unwrap();
    let mut sim = compiled.initialize(&config).expect("a conjugate sampler is claimed for p");

    sim.attach_monitor("p_mean", &["p"], "mean", None).unwrap();
    sim.run(3000).unwrap();

    let dump = sim.monitor_result("p_mean").unwrap();
    let total: f64 = counts.iter().map(|&c| c as f64).sum::<f64>() + alpha0.iter().sum::<f64>();
    let expected: Vec<f64> = counts.iter().zip(alpha0.iter()).map(|(&c, &a)| (c as f64 + a) / total).collect();

    for (observed, exp) in dump.values().iter().zip(expected.iter()) {
        assert_relative_eq!(observed, exp, epsilon = 0.03);
    }
}

#[test]
fn dsum_constraint_holds_every_iteration() {
    let model = ModelBuilder::new()
        .constant("zero", vec![1])
        .constant("one", vec![1])
        .stochastic("x1", "dnorm", vec![1], &["zero", "one"], false, (None, None))
        .stochastic("x2", "dnorm", vec![1], &["zero", "one"], false, (None, None))
        .stochastic("s", "dsum", vec![1], &["x1", "x2"], true, (None, None));

    let mut model = model.build().expect("model builds");
    model.set_data("zero", SArray::scalar(0.0)).unwrap();
    model.set_data("one", SArray::scalar(1.0)).unwrap();
    model.set_data("s", SArray::scalar(2.0)).unwrap();

    let compiled = model.compile().expect("all observed nodes have data");
    let config = SimulationConfigBuilder::default().chains(1).adapt_iterations(0).seed(13).build().unwrap();
    let mut sim = compiled.initialize(&config).expect("RealDSum claims the x1/x2 block");

    for _ in 0..200 {
        sim.run(1).unwrap();
        let x1 = sim.node_value("x1", 0).unwrap()[0];
        let x2 = sim.node_value("x2", 0).unwrap()[0];
        assert_relative_eq!(x1 + x2, 2.0, epsilon = 1e-6);
    }
}

#[test]
fn shared_linear_predictor_forms_one_glm_block() {
    let n = 30;
    let xs: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
    let true_alpha = 1.0;
    let true_beta = 2.0;

    let mut builder = ModelBuilder::new()
        .constant("zero", vec![1])
        .constant("prec0", vec![1])
        .stochastic("alpha", "dnorm", vec![1], &["zero", "prec0"], false, (None, None))
        .stochastic("beta", "dnorm", vec![1], &["zero", "prec0"], false, (None, None))
        .constant("tau_y", vec![1]);

    for (i, _) in xs.iter().enumerate() {
        builder = builder.constant(&format!("x{i}"), vec![1]);
        builder = builder.logical(&format!("bx{i}"), "*", &["beta", &format!("x{i}")]);
        builder = builder.logical(&format!("mean{i}"), "+", &["alpha", &format!("bx{i}")]);
        builder = builder.stochastic(
            &format!("y{i}"),
            "dnorm",
            vec![1],
            &[&format!("mean{i}"), "tau_y"],
            true,
            (None, None),
        );
    }

    let mut model = builder.build().expect("model builds");
    model.set_data("zero", SArray::scalar(0.0)).unwrap();
    model.set_data("prec0", SArray::scalar(1e-4)).unwrap();
    model.set_data("tau_y", SArray::scalar(1.0)).unwrap();
    for (i, &x) in xs.iter().enumerate() {
        model.set_data(&format!("x{i}"), SArray::scalar(x)).unwrap();
        let y = true_alpha + true_beta * x;
        model.set_data(&format!("y{i}"), SArray::scalar(y)).unwrap();
    }

    let compiled = model.compile().expect("all observed nodes have data");
    let config = SimulationConfigBuilder::default().chains(1).adapt_iterations(0).seed(17).build().unwrap();
    let mut sim = compiled.initialize(&config).expect("alpha and beta are jointly claimable");

    sim.attach_monitor("alpha_mean", &["alpha"], "mean", None).unwrap();
    sim.attach_monitor("beta_mean", &["beta"], "mean", None).unwrap();
    sim.run(5000).unwrap();

    let alpha_hat = sim.monitor_result("alpha_mean").unwrap().values()[0];
    let beta_hat = sim.monitor_result("beta_mean").unwrap().values()[0];
    assert_relative_eq!(alpha_hat, true_alpha, epsilon = 0.2);
    assert_relative_eq!(beta_hat, true_beta, epsilon = 0.2);
}

#[test]
fn deviance_monitor_matches_minus_twice_log_density_at_convergence() {
    let n = 100;
    let true_mu = 0.5;
    let tau_y = 1.0;
    let tau0 = 0.0001;

    let ys: Vec<f64> = (0..n).map(|i| true_mu + 0.2 * ((i as f64 * 0.91).cos())).collect();

    let mut builder = ModelBuilder::new()
        .constant("mu0", vec![1])
        .constant("tau0", vec![1])
        .stochastic("mu", "dnorm", vec![1], &["mu0", "tau0"], false, (None, None))
        .constant("tau_y", vec![1]);
    for i in 0..n {
        builder = builder.stochastic(&format!("y{i}"), "dnorm", vec![1], &["mu", "tau_y"], true, (None, None));
    }
    let parents: Vec<String> = (0..n).map(|i| format!("y{i}")).collect();
    let parent_refs: Vec<&str> = parents.iter().map(|s| s.as_str()).collect();
    builder = builder.deviance("dev", &parent_refs, (0..n).collect());

    let mut model = builder.build().expect("model builds");
    model.set_data("mu0", SArray::scalar(0.0)).unwrap();
    model.set_data("tau0", SArray::scalar(tau0)).unwrap();
    model.set_data("tau_y", SArray::scalar(tau_y)).unwrap();
    for (i, &y) in ys.iter().enumerate() {
        model.set_data(&format!("y{i}"), SArray::scalar(y)).unwrap();
    }

    let compiled = model.compile().expect("all observed nodes have data");
    let config = SimulationConfigBuilder::default().chains(1).adapt_iterations(0).seed(19).build().unwrap();
    let mut sim = compiled.initialize(&config).expect("a conjugate sampler is claimed for mu");

    sim.attach_monitor("mu_mean", &["mu"], "mean", None).unwrap();
    sim.attach_monitor("dev_mean", &["dev"], "mean", None).unwrap();
    sim.run(5000).unwrap();

    let mu_hat = sim.monitor_result("mu_mean").unwrap().values()[0];
    let expected_deviance: f64 = ys
        .iter()
        .map(|&y| {
            let resid = y - mu_hat;
            -2.0 * (-0.5 * (2.0 * std::f64::consts::PI).ln() - 0.5 * resid * resid)
        })
        .sum();
    let observed_deviance = sim.monitor_result("dev_mean").unwrap().values()[0];

    assert_relative_eq!(observed_deviance, expected_deviance, epsilon = observed_deviance.abs() * 0.05 + 1.0);
}

#[test]
fn compiling_with_an_unbound_observed_node_is_a_fatal_diagnostic() {
    let model = ModelBuilder::new()
        .constant("mu0", vec![1])
        .constant("tau0", vec![1])
        .stochastic("mu", "dnorm", vec![1], &["mu0", "tau0"], false, (None, None))
        .constant("tau_y", vec![1])
        .stochastic("y0", "dnorm", vec![1], &["mu", "tau_y"], true, (None, None));

    let mut model = model.build().expect("model builds");
    model.set_data("mu0", SArray::scalar(0.0)).unwrap();
    model.set_data("tau0", SArray::scalar(0.0001)).unwrap();
    model.set_data("tau_y", SArray::scalar(1.0)).unwrap();
    // `y0` is observed but deliberately left unbound.

    let err = model.compile().expect_err("an observed node with no bound data is a compilation failure");
    assert_eq!(err.code(), bugs::ErrorCode::DimensionMismatch);
    assert_eq!(err.node(), Some("y0"));
}

#[test]
fn unknown_monitor_type_is_rejected_without_panicking() {
    let model = ModelBuilder::new()
        .constant("mu0", vec![1])
        .constant("tau0", vec![1])
        .stochastic("mu", "dnorm", vec![1], &["mu0", "tau0"], false, (None, None));

    let mut model = model.build().expect("model builds");
    model.set_data("mu0", SArray::scalar(0.0)).unwrap();
    model.set_data("tau0", SArray::scalar(1.0)).unwrap();

    let compiled = model.compile().expect("no observed nodes to bind");
    let config = SimulationConfigBuilder::default().chains(1).build().unwrap();
    let mut sim = compiled.initialize(&config).expect("a sampler is claimed for the free mu node");

    let err = sim.attach_monitor("bogus", &["mu"], "not-a-real-kind", None).expect_err("unknown monitor kind");
    assert_eq!(err.code(), bugs::ErrorCode::InvalidParameter);
}
