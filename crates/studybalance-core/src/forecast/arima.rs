//! Regression-augmented ARIMA(1,1,1) estimation.
//!
//! The model regresses the response on a single exogenous series and
//! drives the regression residual with ARIMA(1,1,1):
//!
//! `(1 - phi B)(1 - B)(y_t - beta * x_t) = (1 + theta B) eps_t`
//!
//! Parameters are estimated by minimizing the conditional sum of
//! squares with a Nelder–Mead simplex. No stationarity or
//! invertibility constraints are imposed: estimation is tolerant by
//! design and proceeds with whatever the solver converges to.

/// Fitted ARIMAX(1,1,1) parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArimaxParams {
    /// Autoregressive coefficient on the differenced residual.
    pub phi: f64,
    /// Moving-average coefficient.
    pub theta: f64,
    /// Exogenous regression coefficient.
    pub beta: f64,
}

/// Differenced regression residual: `d_j = w_{j+1} - w_j` where
/// `w_t = y_t - beta * x_t`.
fn diff_residual(y: &[f64], x: &[f64], beta: f64) -> Vec<f64> {
    (1..y.len())
        .map(|t| (y[t] - beta * x[t]) - (y[t - 1] - beta * x[t - 1]))
        .collect()
}

/// Innovations implied by the parameters, conditional on zero
/// pre-sample values.
fn innovations(d: &[f64], phi: f64, theta: f64) -> Vec<f64> {
    let mut eps = Vec::with_capacity(d.len());
    for j in 0..d.len() {
        let e = if j == 0 {
            d[0]
        } else {
            d[j] - phi * d[j - 1] - theta * eps[j - 1]
        };
        eps.push(e);
    }
    eps
}

/// Conditional sum of squares for a parameter vector.
fn css(y: &[f64], x: &[f64], p: &ArimaxParams) -> f64 {
    let d = diff_residual(y, x, p.beta);
    innovations(&d, p.phi, p.theta).iter().map(|e| e * e).sum()
}

/// Estimate parameters on aligned response/exogenous series.
///
/// Requires at least 3 observations (two differences). Shorter inputs
/// return the zero model, which forecasts a flat line.
pub fn fit(y: &[f64], x: &[f64]) -> ArimaxParams {
    debug_assert_eq!(y.len(), x.len());
    if y.len() < 3 {
        return ArimaxParams {
            phi: 0.0,
            theta: 0.0,
            beta: 0.0,
        };
    }

    let objective = |p: &[f64]| {
        css(
            y,
            x,
            &ArimaxParams {
                phi: p[0],
                theta: p[1],
                beta: p[2],
            },
        )
    };
    let solution = nelder_mead(objective, &[0.1, 0.1, 0.0], 0.25, 300);
    ArimaxParams {
        phi: solution[0],
        theta: solution[1],
        beta: solution[2],
    }
}

/// Project `horizon` steps past the end of the sample, holding the
/// exogenous series constant at `x_future`.
pub fn forecast(y: &[f64], x: &[f64], p: &ArimaxParams, x_future: f64, horizon: usize) -> Vec<f64> {
    let d = diff_residual(y, x, p.beta);
    let eps = innovations(&d, p.phi, p.theta);

    let mut w_last = y[y.len() - 1] - p.beta * x[x.len() - 1];
    let mut d_prev = d.last().copied().unwrap_or(0.0);
    let mut eps_prev = eps.last().copied().unwrap_or(0.0);

    let mut out = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        let d_next = p.phi * d_prev + p.theta * eps_prev;
        w_last += d_next;
        out.push(w_last + p.beta * x_future);
        d_prev = d_next;
        eps_prev = 0.0;
    }
    out
}

/// One-step-ahead forecast conditioned on the full history and the
/// next day's actual exogenous value.
pub fn one_step_ahead(y: &[f64], x: &[f64], x_next: f64, p: &ArimaxParams) -> f64 {
    let d = diff_residual(y, x, p.beta);
    let eps = innovations(&d, p.phi, p.theta);
    let d_hat = p.phi * d.last().copied().unwrap_or(0.0)
        + p.theta * eps.last().copied().unwrap_or(0.0);
    let w_last = y[y.len() - 1] - p.beta * x[x.len() - 1];
    w_last + d_hat + p.beta * x_next
}

/// Unconstrained Nelder–Mead simplex minimization.
///
/// Standard reflection/expansion/contraction/shrink coefficients;
/// converges far enough for the smooth CSS surfaces seen here.
fn nelder_mead<F>(f: F, x0: &[f64], step: f64, max_iter: usize) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    const ALPHA: f64 = 1.0; // reflection
    const GAMMA: f64 = 2.0; // expansion
    const RHO: f64 = 0.5; // contraction
    const SIGMA: f64 = 0.5; // shrink

    let n = x0.len();
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(x0.to_vec());
    for i in 0..n {
        let mut v = x0.to_vec();
        v[i] += step;
        simplex.push(v);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| f(v)).collect();

    for _ in 0..max_iter {
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        if (values[worst] - values[best]).abs() < 1e-12 {
            break;
        }

        // Centroid of all but the worst vertex
        let mut centroid = vec![0.0; n];
        for &i in order.iter().take(n) {
            for d in 0..n {
                centroid[d] += simplex[i][d] / n as f64;
            }
        }

        let reflected: Vec<f64> = (0..n)
            .map(|d| centroid[d] + ALPHA * (centroid[d] - simplex[worst][d]))
            .collect();
        let f_reflected = f(&reflected);

        if f_reflected < values[best] {
            let expanded: Vec<f64> = (0..n)
                .map(|d| centroid[d] + GAMMA * (reflected[d] - centroid[d]))
                .collect();
            let f_expanded = f(&expanded);
            if f_expanded < f_reflected {
                simplex[worst] = expanded;
                values[worst] = f_expanded;
            } else {
                simplex[worst] = reflected;
                values[worst] = f_reflected;
            }
        } else if f_reflected < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = f_reflected;
        } else {
            let contracted: Vec<f64> = (0..n)
                .map(|d| centroid[d] + RHO * (simplex[worst][d] - centroid[d]))
                .collect();
            let f_contracted = f(&contracted);
            if f_contracted < values[worst] {
                simplex[worst] = contracted;
                values[worst] = f_contracted;
            } else {
                // Shrink toward the best vertex
                let best_vertex = simplex[best].clone();
                for i in 0..=n {
                    if i == best {
                        continue;
                    }
                    for d in 0..n {
                        simplex[i][d] =
                            best_vertex[d] + SIGMA * (simplex[i][d] - best_vertex[d]);
                    }
                    values[i] = f(&simplex[i]);
                }
            }
        }
    }

    let best = (0..=n)
        .min_by(|&a, &b| values[a].total_cmp(&values[b]))
        .unwrap_or(0);
    simplex[best].clone()
}
