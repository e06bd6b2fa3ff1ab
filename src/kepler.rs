use super::constants::DPI;
use std::f64::consts::PI;

/// Principal value of an angle in radians, in [0, 2π).
pub(crate) fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Principal difference between two angles, in [-π, π].
#[cfg(test)]
pub(crate) fn angle_diff(a: f64, b: f64) -> f64 {
    let mut diff = principal_angle(a) - principal_angle(b);

    if diff > PI {
        diff -= DPI;
    } else if diff < -PI {
        diff += DPI;
    }

    diff
}

/// Solve Kepler's equation `E - e·sin(E) = M` for an elliptic orbit with Newton's method.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` in radians (any value, reduced internally)
/// * `eccentricity`: eccentricity `e` in `[0, 1)`
///
/// Return
/// ------
/// * the eccentric anomaly `E` in radians, in [0, 2π)
///
/// Remarks
/// -------
/// * The starting guess is `M` for low eccentricities and `π` above 0.8, which keeps the
///   iteration monotone for the near-parabolic cases.
/// * The iteration stops after 20 steps; planetary eccentricities converge in a handful.
pub(crate) fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    const ITX: usize = 20;
    let contr = 100.0 * f64::EPSILON;

    let ell = principal_angle(mean_anomaly);
    let mut u = if eccentricity < 0.8 { ell } else { PI };

    for _ in 0..ITX {
        let du = -(u - eccentricity * u.sin() - ell) / (1.0 - eccentricity * u.cos());
        u += du;
        if du.abs() < contr {
            break;
        }
    }

    principal_angle(u)
}
